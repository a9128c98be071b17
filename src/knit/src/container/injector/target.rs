use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::marker::PhantomData;
use std::rc::Rc;

use crate::container::injector::Dependency;
use crate::container::Managed;
use crate::key::Key;
use crate::provider::component::{Component, ComponentProvider};

/// A typed request for a value of type `T`.
///
/// # Examples
///
/// ```rust
/// # use knit::container::injector::Target;
/// let by_name: Target<String> = Target::named("greeting");
/// let by_type: Target<u64> = Target::of();
/// let from_str: Target<String> = "greeting".into();
/// ```
pub struct Target<T>
where
    T: Managed,
{
    dependency: Dependency,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Target<T>
where
    T: Managed,
{
    /// Requests the binding registered under `name`.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(Dependency::exact::<T>(Key::named(name)))
    }

    /// Requests the binding registered for the type `T`.
    pub fn of() -> Self {
        Self::new(Dependency::exact::<T>(Key::of::<T>()))
    }

    /// Constructs `C` directly, resolving its parameters from the context.
    /// `C` doesn't have to be registered.
    pub fn component<C>() -> Self
    where
        C: Component<Constructed = T>,
    {
        Self::new(Dependency::direct::<T>(Rc::new(ComponentProvider::<C>::new())))
    }

    fn new(dependency: Dependency) -> Self {
        Self {
            dependency,
            _marker: PhantomData,
        }
    }

    pub fn dependency(&self) -> &Dependency {
        &self.dependency
    }

    pub fn key(&self) -> &Key {
        self.dependency.key()
    }
}

impl<T> Clone for Target<T>
where
    T: Managed,
{
    fn clone(&self) -> Self {
        Self::new(self.dependency.clone())
    }
}

impl<T> Debug for Target<T>
where
    T: Managed,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_tuple("Target").field(self.dependency.key()).finish()
    }
}

impl<T> From<&str> for Target<T>
where
    T: Managed,
{
    fn from(name: &str) -> Self {
        Self::named(name)
    }
}

impl<T> From<String> for Target<T>
where
    T: Managed,
{
    fn from(name: String) -> Self {
        Self::named(name)
    }
}
