use crate::container::registry::{Configurer, TypedConfigurer};
use crate::key::Key;
use crate::provider::Provider;

/// A provider ready to be registered under its key.
pub struct ProviderBinding<P>
where
    P: Provider,
{
    key: Key,
    provider: P,
}

impl<P> ProviderBinding<P>
where
    P: Provider,
{
    pub(super) fn new(key: Key, provider: P) -> Self {
        Self { key, provider }
    }

    pub fn key(&self) -> &Key {
        &self.key
    }

    pub fn set_on(self, configurer: &mut dyn Configurer) {
        configurer.register(self.key, self.provider);
    }
}
