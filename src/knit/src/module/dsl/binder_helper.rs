use std::marker::PhantomData;

use crate::container::registry::{Configurer, TypedConfigurer};
use crate::container::Managed;
use crate::key::Key;
use crate::module::dsl::provider_helper::ProviderBinding;
use crate::provider::closure::{Closure, ClosureProvider, RawClosure, RawClosureProvider};
use crate::provider::component::{Component, ComponentProvider};
use crate::provider::instance::InstanceProvider;
use crate::provider::scoped::ScopedProvider;
use crate::provider::TypedProvider;
use crate::scope::Scoped;

/// The key half of a binding, waiting for its provider.
pub struct Binder<T>
where
    T: Managed,
{
    key: Key,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Binder<T>
where
    T: Managed,
{
    pub(super) fn new(key: Key) -> Self {
        Self {
            key,
            _marker: PhantomData,
        }
    }

    pub fn to_instance(self, instance: T) -> ProviderBinding<InstanceProvider<T>>
    where
        T: Clone,
    {
        ProviderBinding::new(self.key, InstanceProvider::new(instance))
    }

    pub fn to_closure<C, D>(
        self,
        names: C::Names,
        closure: C,
    ) -> ProviderBinding<ClosureProvider<T, C, D>>
    where
        C: Closure<D, Constructed = T>,
        D: 'static,
    {
        ProviderBinding::new(self.key, ClosureProvider::new(names, closure))
    }

    pub fn to_raw_closure<C>(self, closure: C) -> ProviderBinding<RawClosureProvider<T, C>>
    where
        C: RawClosure<Constructed = T>,
    {
        ProviderBinding::new(self.key, RawClosureProvider::new(closure))
    }

    pub fn to_component<C>(self) -> ProviderBinding<ComponentProvider<C>>
    where
        C: Component<Constructed = T>,
    {
        ProviderBinding::new(self.key, ComponentProvider::new())
    }

    /// Binds to a closure producing a [`Scoped`] resource whose acquired
    /// value is a `T`.
    pub fn to_scoped<S, C, D>(
        self,
        names: C::Names,
        closure: C,
    ) -> ProviderBinding<ScopedProvider<ClosureProvider<S, C, D>>>
    where
        S: Scoped<Target = T>,
        C: Closure<D, Constructed = S>,
        D: 'static,
    {
        let provider = ClosureProvider::new(names, closure);
        ProviderBinding::new(self.key, ScopedProvider::new(provider))
    }

    pub fn to_scoped_component<C>(self) -> ProviderBinding<ScopedProvider<ComponentProvider<C>>>
    where
        C: Component<Constructed: Scoped<Target = T>>,
    {
        ProviderBinding::new(self.key, ScopedProvider::new(ComponentProvider::new()))
    }

    pub fn to_provider<P>(self, provider: P) -> ProviderBinding<P>
    where
        P: TypedProvider<Output = T>,
    {
        ProviderBinding::new(self.key, provider)
    }
}

impl<T> Binder<T>
where
    T: Managed + Component<Constructed = T>,
{
    /// Binds a component type to itself.
    pub fn set_on(self, configurer: &mut dyn Configurer) {
        configurer.register(self.key, ComponentProvider::<T>::new());
    }
}
