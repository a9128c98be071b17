use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::marker::PhantomData;

use crate::container::injector::{
    CallContext, ContextForwardingResolver, InjectorError, TypedResolve,
};
use crate::provider::closure::Closure;
use crate::provider::TypedProvider;

/// A [`Provider`] which supplies objects from a [`Closure`].
///
/// # Examples
///
/// ```rust
/// # use std::convert::Infallible;
/// # use knit::provider::closure::ClosureProvider;
/// let closure = |a: i32, b: f64| Ok::<_, Infallible>((a, b));
/// let provider = ClosureProvider::new(["a", "b"], closure);
/// ```
///
/// [`Provider`]: crate::provider::Provider
pub struct ClosureProvider<T, C, D>
where
    T: 'static,
    C: Closure<D, Constructed = T>,
    D: 'static,
{
    names: C::Names,
    closure: C,
    _marker: PhantomData<fn() -> (T, D)>,
}

impl<T, C, D> ClosureProvider<T, C, D>
where
    T: 'static,
    C: Closure<D, Constructed = T>,
    D: 'static,
{
    /// Creates a new [`ClosureProvider`] from the closure's parameter names
    /// and the [`Closure`] itself.
    pub fn new(names: C::Names, closure: C) -> Self {
        Self {
            names,
            closure,
            _marker: PhantomData,
        }
    }
}

impl<T, C, D> Debug for ClosureProvider<T, C, D>
where
    T: 'static,
    C: Closure<D, Constructed = T>,
    D: 'static,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ClosureProvider<T, C, D>")
            .field("names", &self.names.as_ref())
            .finish_non_exhaustive()
    }
}

impl<T, C, D> TypedProvider for ClosureProvider<T, C, D>
where
    T: 'static,
    C: Closure<D, Constructed = T>,
    D: 'static,
{
    type Output = T;

    fn provide<R>(
        &self,
        resolver: &R,
        context: &CallContext<'_>,
    ) -> Result<Self::Output, InjectorError>
    where
        R: TypedResolve + ?Sized,
    {
        let resolver = ContextForwardingResolver::new(resolver, context);
        match self.closure.run(&self.names, &resolver) {
            Ok(Ok(obj)) => Ok(obj),
            Ok(Err(err)) => Err(InjectorError::construction(context, err)),
            Err(err) => Err(err),
        }
    }

    fn parameters(&self) -> Vec<&'static str> {
        self.names.as_ref().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;
    use std::error::Error;

    use crate::container::injector::MockResolve;
    use crate::key;

    use super::*;

    #[test]
    fn closure_provider_succeeds() {
        let mut resolver = MockResolve::new();
        resolver
            .expect_dyn_resolve_dependency()
            .withf(|dependency, context| {
                dependency.key() == &key::named("v") && context.key() == &key::named("answer")
            })
            .returning(|_, _| Ok(Some(Box::new(42i32))));

        let provider = ClosureProvider::new(["v"], |v: i32| Ok::<_, Infallible>(v));
        let key = key::named("answer");

        let res = provider.provide(&resolver, &CallContext::new(&key));
        assert_eq!(res.unwrap(), 42);
        assert_eq!(provider.parameters(), vec!["v"]);
    }

    #[test]
    fn closure_provider_wraps_construction_errors() {
        let resolver = MockResolve::new();
        let provider = ClosureProvider::new([], || Err::<i32, _>("boom"));
        let key = key::named("answer");

        let err = provider
            .provide(&resolver, &CallContext::new(&key))
            .unwrap_err();
        assert!(matches!(err, InjectorError::ObjectConstruction { .. }));
        assert_eq!(err.key(), Some(&key));
        assert_eq!(Error::source(&err).unwrap().to_string(), "boom");
    }
}
