use std::rc::Rc;

use crate::container::registry::{ConfigurerImpl, ProviderMap, RegistryError};
use crate::key::Key;
use crate::module::Module;
use crate::provider::Provider;

/// A validated set of bindings, keyed by name or by type.
///
/// # Examples
///
/// ```rust
/// # use knit::prelude::*;
/// let production = Context::init(|configurer: &mut dyn Configurer| -> Result<(), BoxError> {
///     bind::<String>("dsn").to_instance("postgres://prod".to_owned()).set_on(configurer);
///     bind::<u16>("port").to_instance(5432).set_on(configurer);
///     Ok(())
/// })
/// .unwrap();
/// let overrides = Context::init(|configurer: &mut dyn Configurer| -> Result<(), BoxError> {
///     bind::<String>("dsn").to_instance("sqlite::memory:".to_owned()).set_on(configurer);
///     Ok(())
/// })
/// .unwrap();
///
/// let context = production.merge(overrides);
/// assert_eq!(context.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Context {
    providers: ProviderMap,
}

impl Context {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects the bindings of `module`.
    ///
    /// # Errors
    ///
    /// Returns every duplicated or reserved key and every module error,
    /// aggregated when there is more than one.
    pub fn init<M>(module: M) -> Result<Self, RegistryError>
    where
        M: Module,
    {
        let mut configurer = ConfigurerImpl::new();
        module.setup(&mut configurer);
        configurer.finish().map(Self::from_providers)
    }

    pub(crate) fn from_providers(providers: ProviderMap) -> Self {
        Self { providers }
    }

    /// Overrides entries of `self` with the ones of `overrides`, key by key.
    pub fn merge(mut self, overrides: Context) -> Self {
        self.providers.overlay(overrides.providers);
        self
    }

    pub fn contains(&self, key: &Key) -> bool {
        self.providers.contains(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.providers.keys()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub(crate) fn get(&self, key: &Key) -> Option<&Rc<dyn Provider>> {
        self.providers.get(key)
    }

    pub(crate) fn into_providers(self) -> ProviderMap {
        self.providers
    }
}

#[cfg(test)]
mod tests {
    use crate::container::registry::{Configurer, TypedConfigurer};
    use crate::container::injector::BoxError;
    use crate::key;
    use crate::provider::instance::InstanceProvider;

    use super::*;

    struct Production;

    impl Module for Production {
        fn configure(&self, configurer: &mut dyn Configurer) -> Result<(), BoxError> {
            configurer.register(key::named("db"), InstanceProvider::new("postgres"));
            configurer.register(key::named("cache"), InstanceProvider::new("redis"));
            Ok(())
        }
    }

    struct Testing;

    impl Module for Testing {
        fn configure(&self, configurer: &mut dyn Configurer) -> Result<(), BoxError> {
            configurer.register(key::named("db"), InstanceProvider::new(String::from("sqlite")));
            Ok(())
        }
    }

    struct Broken;

    impl Module for Broken {
        fn configure(&self, configurer: &mut dyn Configurer) -> Result<(), BoxError> {
            configurer.register(key::named("db"), InstanceProvider::new(1u8));
            configurer.register(key::named("db"), InstanceProvider::new(2u8));
            Err("broken module".into())
        }
    }

    #[test]
    fn context_merge_overrides_key_by_key() {
        let context = Context::init(Production)
            .unwrap()
            .merge(Context::init(Testing).unwrap());

        assert_eq!(context.len(), 2);
        assert_eq!(
            context.get(&key::named("db")).unwrap().output(),
            key::TypeInfo::of::<String>()
        );
        assert_eq!(
            context.get(&key::named("cache")).unwrap().output(),
            key::TypeInfo::of::<&str>()
        );
    }

    #[test]
    fn context_init_reports_all_errors() {
        let err = Context::init(Broken).unwrap_err();
        let RegistryError::Aggregated { errors } = &err else {
            panic!("errors should be aggregated");
        };
        assert_eq!(errors.len(), 2);
        assert!(err.to_string().contains("the key \"db\" already exists"));
        assert!(err.to_string().contains("fails to setup the configuration"));
    }
}
