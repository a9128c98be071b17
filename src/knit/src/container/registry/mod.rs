mod configurer;
mod context;
mod provider_map;

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::rc::Rc;

use snafu::prelude::*;

use crate::container::injector::BoxError;
use crate::key::Key;
use crate::provider::Provider;

pub(crate) use configurer::ConfigurerImpl;
pub use context::Context;
pub(crate) use provider_map::ProviderMap;

/// The sink a [`Module`] writes its bindings into.
///
/// [`Module`]: crate::module::Module
pub trait Configurer {
    #[doc(hidden)]
    #[allow(private_interfaces)]
    fn as_private(&mut self) -> &mut dyn ConfigurerPrivate;

    fn report_module_error(&mut self, module: &'static str, err: BoxError);
}

trait ConfigurerPrivate: Configurer {
    fn dyn_register(&mut self, key: Key, provider: Rc<dyn Provider>);
}

pub trait TypedConfigurer: Configurer {
    fn register<K, P>(&mut self, key: K, provider: P)
    where
        K: Into<Key>,
        P: Provider,
    {
        self.as_private()
            .dyn_register(key.into(), Rc::new(provider));
    }
}

impl<T: Configurer + ?Sized> TypedConfigurer for T {}

#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum RegistryError {
    #[snafu(display("the key {key} already exists in the context"))]
    #[non_exhaustive]
    KeyDuplicated { key: Key },
    #[snafu(display("the name {key} is reserved for the injector itself"))]
    #[non_exhaustive]
    ReservedName { key: Key },
    #[snafu(display("module {module} fails to setup the configuration"))]
    #[non_exhaustive]
    ModuleInner {
        module: &'static str,
        source: BoxError,
    },
    #[snafu(display("aggregated registry errors:\n{}", AggregatedDisplayer::new(errors)))]
    Aggregated { errors: Vec<RegistryError> },
}

struct AggregatedDisplayer<'a> {
    errors: &'a [RegistryError],
}

impl<'a> AggregatedDisplayer<'a> {
    fn new(errors: &'a [RegistryError]) -> Self {
        Self { errors }
    }
}

impl Display for AggregatedDisplayer<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for (i, error) in self.errors.iter().enumerate() {
            writeln!(f, "{:4}: {}", i + 1, error)?;
        }
        Ok(())
    }
}
