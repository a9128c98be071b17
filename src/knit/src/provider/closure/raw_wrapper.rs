use std::fmt::{Debug, Formatter, Result as FmtResult};

use crate::container::injector::{
    CallContext, ContextForwardingResolver, InjectorError, TypedResolve,
};
use crate::provider::closure::RawClosure;
use crate::provider::TypedProvider;

pub struct RawClosureProvider<T, C>
where
    T: 'static,
    C: RawClosure<Constructed = T>,
{
    closure: C,
}

impl<T, C> RawClosureProvider<T, C>
where
    T: 'static,
    C: RawClosure<Constructed = T>,
{
    pub fn new(closure: C) -> Self {
        Self { closure }
    }
}

impl<T, C> Debug for RawClosureProvider<T, C>
where
    T: 'static,
    C: RawClosure<Constructed = T>,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("RawClosureProvider<T, C>")
            .finish_non_exhaustive()
    }
}

impl<T, C> TypedProvider for RawClosureProvider<T, C>
where
    T: 'static,
    C: RawClosure<Constructed = T>,
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
        match (self.closure)(&resolver) {
            Ok(Ok(obj)) => Ok(obj),
            Ok(Err(err)) => Err(InjectorError::construction(context, err)),
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use crate::container::injector::{MockResolve, Resolve};
    use crate::key;

    use super::*;

    #[test]
    fn raw_closure_provider_succeeds() {
        let mut resolver = MockResolve::new();
        resolver
            .expect_dyn_resolve_dependency()
            .returning(|_, _| Ok(None));

        let provider = RawClosureProvider::new(|resolver: &dyn Resolve| {
            resolver
                .param_or("retries", 3u8)
                .map(|retries| Ok::<_, Infallible>(retries * 2))
        });
        let key = key::named("budget");

        let res = provider.provide(&resolver, &CallContext::new(&key));
        assert_eq!(res.unwrap(), 6);
    }
}
