use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::marker::PhantomData;

use crate::container::injector::{
    CallContext, ContextForwardingResolver, InjectorError, TypedResolve,
};
use crate::provider::component::Component;
use crate::provider::TypedProvider;

pub struct ComponentProvider<C>
where
    C: Component,
{
    _marker: PhantomData<fn() -> C>,
}

impl<C> ComponentProvider<C>
where
    C: Component,
{
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<C> Default for ComponentProvider<C>
where
    C: Component,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Debug for ComponentProvider<C>
where
    C: Component,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ComponentProvider<C>")
            .field("component", &std::any::type_name::<C>())
            .finish()
    }
}

impl<C> TypedProvider for ComponentProvider<C>
where
    C: Component,
{
    type Output = C::Constructed;

    fn provide<R>(
        &self,
        resolver: &R,
        context: &CallContext<'_>,
    ) -> Result<Self::Output, InjectorError>
    where
        R: TypedResolve + ?Sized,
    {
        let resolver = ContextForwardingResolver::new(resolver, context);
        match C::construct(&resolver) {
            Ok(Ok(obj)) => Ok(obj.post_process()),
            Ok(Err(err)) => Err(InjectorError::construction(context, err)),
            Err(err) => Err(err),
        }
    }

    fn parameters(&self) -> Vec<&'static str> {
        C::parameters().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;
    use std::rc::Rc;

    use crate::container::injector::MockResolve;
    use crate::key::{self, TypeInfo};
    use crate::provider::Provider;

    use super::*;

    pub trait Abstract {
        fn name(&self) -> &str;
    }

    pub struct Impl {
        name: String,
    }

    impl Abstract for Impl {
        fn name(&self) -> &str {
            &self.name
        }
    }

    impl Component for Impl {
        type Constructed = Rc<dyn Abstract>;

        type Error = Infallible;

        fn parameters() -> &'static [&'static str] {
            &["name"]
        }

        fn construct<R>(resolver: &R) -> Result<Result<Self, Self::Error>, InjectorError>
        where
            R: TypedResolve + ?Sized,
        {
            let name = resolver.param("name")?;
            Ok(Ok(Impl { name }))
        }

        fn post_process(self) -> Self::Constructed {
            Rc::new(self)
        }
    }

    #[test]
    fn component_provider_succeeds() {
        let mut resolver = MockResolve::new();
        resolver
            .expect_dyn_resolve_dependency()
            .returning(|_, _| Ok(Some(Box::new(String::from("impl")))));

        let provider = ComponentProvider::<Impl>::new();
        let key = key::of::<Rc<dyn Abstract>>();
        let res = provider.provide(&resolver, &CallContext::new(&key)).unwrap();

        assert_eq!(res.name(), "impl");
        assert_eq!(provider.output(), TypeInfo::of::<Rc<dyn Abstract>>());
        assert_eq!(provider.dyn_parameters(), vec!["name"]);
    }
}
