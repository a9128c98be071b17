//! Modules group bindings and write them into a [`Configurer`].

pub mod dsl;

use std::any;

use crate::container::injector::BoxError;
use crate::container::registry::Configurer;

pub use dsl::{bind, bind_list, bind_type};

pub trait Module: 'static {
    fn setup(&self, configurer: &mut dyn Configurer) {
        if let Err(err) = self.configure(configurer) {
            configurer.report_module_error(any::type_name::<Self>(), err);
        }
    }

    /// Registers the bindings of this module.
    ///
    /// # Errors
    ///
    /// A module may fail for reasons of its own. The error is reported along
    /// with every registration error of the whole configuration.
    fn configure(&self, configurer: &mut dyn Configurer) -> Result<(), BoxError>;
}

impl<F> Module for F
where
    F: Fn(&mut dyn Configurer) -> Result<(), BoxError> + 'static,
{
    fn configure(&self, configurer: &mut dyn Configurer) -> Result<(), BoxError> {
        self(configurer)
    }
}

/// An ordered list of modules, set up one after another.
#[derive(Default)]
pub struct Configuration {
    modules: Vec<Box<dyn Module>>,
}

impl Configuration {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with<M: Module>(mut self, module: M) -> Self {
        self.modules.push(Box::new(module));
        self
    }

    pub fn compose(mut self, mut other: Configuration) -> Self {
        self.modules.append(&mut other.modules);
        self
    }
}

impl Module for Configuration {
    fn configure(&self, configurer: &mut dyn Configurer) -> Result<(), BoxError> {
        self.modules
            .iter()
            .for_each(|module| module.setup(configurer));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::container::registry::{Context, RegistryError, TypedConfigurer};
    use crate::key;
    use crate::provider::instance::InstanceProvider;

    use super::*;

    struct Database;

    impl Module for Database {
        fn configure(&self, configurer: &mut dyn Configurer) -> Result<(), BoxError> {
            configurer.register(key::named("dsn"), InstanceProvider::new("postgres://"));
            Ok(())
        }
    }

    struct Failing;

    impl Module for Failing {
        fn configure(&self, _configurer: &mut dyn Configurer) -> Result<(), BoxError> {
            Err("missing environment".into())
        }
    }

    #[test]
    fn configuration_sets_up_every_module() {
        let configuration = Configuration::new().with(Database).compose(
            Configuration::new().with(|configurer: &mut dyn Configurer| -> Result<(), BoxError> {
                configurer.register(key::named("port"), InstanceProvider::new(5432u16));
                Ok(())
            }),
        );

        let context = Context::init(configuration).unwrap();
        assert!(context.contains(&key::named("dsn")));
        assert!(context.contains(&key::named("port")));
    }

    #[test]
    fn module_errors_name_the_module() {
        let err = Context::init(Configuration::new().with(Failing)).unwrap_err();
        let RegistryError::ModuleInner { module, .. } = err else {
            panic!("the module error should be reported");
        };
        assert!(module.ends_with("Failing"));
    }
}
