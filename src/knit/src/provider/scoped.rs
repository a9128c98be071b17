use std::fmt::{Debug, Formatter, Result as FmtResult};

use crate::container::injector::{CallContext, InjectorError, Resolve};
use crate::key::TypeInfo;
use crate::provider::{Provided, Provider, TypedProvider};
use crate::scope::Scoped;

/// A [`Provider`] whose products are [`Scoped`] resources.
///
/// The wrapped provider builds the resource; the injector acquires it and
/// hands out [`Scoped::Target`], so that is the type this provider reports
/// as its output.
pub struct ScopedProvider<P>
where
    P: TypedProvider<Output: Scoped>,
{
    inner: P,
}

impl<P> ScopedProvider<P>
where
    P: TypedProvider<Output: Scoped>,
{
    pub fn new(inner: P) -> Self {
        Self { inner }
    }
}

impl<P> Debug for ScopedProvider<P>
where
    P: TypedProvider<Output: Scoped>,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ScopedProvider")
            .field("inner", &self.inner)
            .finish()
    }
}

impl<P> Provider for ScopedProvider<P>
where
    P: TypedProvider<Output: Scoped>,
{
    fn dyn_provide(
        &self,
        resolver: &dyn Resolve,
        context: &CallContext<'_>,
    ) -> Result<Provided, InjectorError> {
        self.inner
            .provide(resolver, context)
            .map(|resource| Provided::Resource(Box::new(resource)))
    }

    fn output(&self) -> TypeInfo {
        TypeInfo::of::<<P::Output as Scoped>::Target>()
    }

    fn dyn_parameters(&self) -> Vec<&'static str> {
        self.inner.parameters()
    }
}
