use std::mem;
use std::rc::Rc;

use crate::container::injector::BoxError;
use crate::container::registry::provider_map::ProviderMap;
use crate::container::registry::{Configurer, ConfigurerPrivate, RegistryError};
use crate::key::Key;
use crate::provider::Provider;

pub struct ConfigurerImpl {
    providers: ProviderMap,
    errors: Vec<RegistryError>,
}

impl ConfigurerImpl {
    pub fn new() -> Self {
        Self {
            providers: ProviderMap::new(),
            errors: Vec::new(),
        }
    }

    pub fn finish(mut self) -> Result<ProviderMap, RegistryError> {
        match self.errors.len() {
            0 => Ok(self.providers),
            1 => Err(self.errors.remove(0)),
            _ => Err(RegistryError::Aggregated {
                errors: mem::take(&mut self.errors),
            }),
        }
    }
}

impl Configurer for ConfigurerImpl {
    #[allow(private_interfaces)]
    fn as_private(&mut self) -> &mut dyn ConfigurerPrivate {
        self
    }

    fn report_module_error(&mut self, module: &'static str, err: BoxError) {
        self.errors.push(RegistryError::ModuleInner {
            module,
            source: err,
        });
    }
}

impl ConfigurerPrivate for ConfigurerImpl {
    fn dyn_register(&mut self, key: Key, provider: Rc<dyn Provider>) {
        if key.is_reserved() {
            self.errors.push(RegistryError::ReservedName { key });
        } else if self.providers.contains(&key) {
            self.errors.push(RegistryError::KeyDuplicated { key });
        } else {
            self.providers.insert(key, provider);
        }
    }
}
