use crate::container::injector::{CallContext, Dependency, InjectorError, Resolve};
use crate::container::Managed;

/// Attaches the context of the binding being built to every lookup its
/// factory makes, so nested errors and cycle checks see the whole path.
pub struct ContextForwardingResolver<'a, R>
where
    R: Resolve + ?Sized,
{
    inner: &'a R,
    context: &'a CallContext<'a>,
}

impl<'a, R> ContextForwardingResolver<'a, R>
where
    R: Resolve + ?Sized,
{
    pub fn new(inner: &'a R, context: &'a CallContext<'a>) -> Self {
        Self { inner, context }
    }
}

impl<R> Resolve for ContextForwardingResolver<'_, R>
where
    R: Resolve + ?Sized,
{
    fn dyn_resolve(
        &self,
        dependency: &Dependency,
    ) -> Result<Option<Box<dyn Managed>>, InjectorError> {
        self.inner.dyn_resolve_dependency(dependency, self.context)
    }

    fn dyn_resolve_dependency<'a>(
        &self,
        dependency: &Dependency,
        context: &'a CallContext<'a>,
    ) -> Result<Option<Box<dyn Managed>>, InjectorError> {
        self.inner.dyn_resolve_dependency(dependency, context)
    }
}

#[cfg(test)]
mod tests {
    use crate::container::injector::{MockResolve, TypedResolve};
    use crate::key;

    use super::*;

    #[test]
    fn proxy_forwards_its_context() {
        let mut inner = MockResolve::new();
        inner
            .expect_dyn_resolve_dependency()
            .withf(|dependency, _| dependency.key() == &key::named("port"))
            .times(1)
            .returning(|_, context| {
                assert_eq!(context.key(), &key::named("app"));
                Ok(Some(Box::new(7u16)))
            });

        let app = key::named("app");
        let context = CallContext::new(&app);
        let proxy = ContextForwardingResolver::new(&inner, &context);

        assert_eq!(proxy.param::<u16>("port").unwrap(), 7);
    }
}
