pub mod closure;
pub mod component;
pub mod instance;
pub mod list;
pub mod scoped;

use std::fmt::Debug;

use crate::container::injector::{CallContext, InjectorError, Resolve, TypedResolve};
use crate::container::Managed;
use crate::key::TypeInfo;
use crate::scope::Resource;

/// What a [`Provider`] hands back to the injector.
pub enum Provided {
    /// A ready-to-use object.
    Object(Box<dyn Managed>),
    /// A resource the injector still has to acquire and later release.
    Resource(Box<dyn Resource>),
}

/// A universal factory which constructs objects of one type.
///
/// A [`Provider`] is responsible for constructing an object on each request
/// and retrieving all dependencies from a [`Resolve`]. Caching is the
/// injector's job: a provider should build a fresh object every time it is
/// asked.
///
/// Usually, you don't need to implement [`Provider`] manually, since this is
/// automatically done by [`TypedProvider`]'s blanket implementation.
pub trait Provider: Debug + 'static {
    /// Provides a newly created type-erased object. Lookups made on behalf of
    /// the object should be forwarded to `resolver` together with `context`.
    ///
    /// # Errors
    ///
    /// Returns an error if a dependency can't be resolved or the object
    /// construction fails.
    fn dyn_provide(
        &self,
        resolver: &dyn Resolve,
        context: &CallContext<'_>,
    ) -> Result<Provided, InjectorError>;

    /// The type of the object handed out, after acquisition for resources.
    fn output(&self) -> TypeInfo;

    /// Names of the parameters the provider is known to resolve.
    fn dyn_parameters(&self) -> Vec<&'static str> {
        Vec::new()
    }
}

/// A static variant of the [`Provider`] trait, leveraging static dispatch and
/// type-safety.
pub trait TypedProvider: Debug + 'static {
    /// The return type in response to each request to the provider.
    type Output: 'static;

    /// Provides a newly created object of type [`TypedProvider::Output`].
    ///
    /// # Errors
    ///
    /// Returns an error if a dependency can't be resolved or the object
    /// construction fails.
    fn provide<R>(
        &self,
        resolver: &R,
        context: &CallContext<'_>,
    ) -> Result<Self::Output, InjectorError>
    where
        R: TypedResolve + ?Sized;

    fn parameters(&self) -> Vec<&'static str> {
        Vec::new()
    }
}

impl<T> Provider for T
where
    T: TypedProvider<Output: Managed>,
{
    fn dyn_provide(
        &self,
        resolver: &dyn Resolve,
        context: &CallContext<'_>,
    ) -> Result<Provided, InjectorError> {
        self.provide(resolver, context)
            .map(|obj| Provided::Object(Box::new(obj)))
    }

    fn output(&self) -> TypeInfo {
        TypeInfo::of::<T::Output>()
    }

    fn dyn_parameters(&self) -> Vec<&'static str> {
        self.parameters()
    }
}
