use std::rc::Rc;

use crate::container::Managed;
use crate::key::{Key, TypeInfo};
use crate::provider::Provider;

/// Describes what a caller needs and where the injector may look for it.
#[derive(Debug, Clone)]
pub struct Dependency {
    key: Key,
    target: TypeInfo,
    lookup: Lookup,
}

/// How a [`Dependency`] is resolved when its key is neither cached nor bound.
#[derive(Debug, Clone)]
pub enum Lookup {
    /// Fails with a missing binding.
    Exact,
    /// Retries with the binding of the declared type, caching the result under
    /// the original name.
    NameThenType,
    /// Reports the absence to the caller, which supplies a default value.
    Optional,
    /// Skips the context entirely and builds with the given provider.
    Direct(Rc<dyn Provider>),
}

impl Dependency {
    pub fn exact<T: Managed>(key: Key) -> Self {
        Self::new(key, TypeInfo::of::<T>(), Lookup::Exact)
    }

    pub fn parameter<T: Managed>(name: impl Into<String>) -> Self {
        Self::new(Key::named(name), TypeInfo::of::<T>(), Lookup::NameThenType)
    }

    pub fn optional<T: Managed>(name: impl Into<String>) -> Self {
        Self::new(Key::named(name), TypeInfo::of::<T>(), Lookup::Optional)
    }

    pub fn direct<T: Managed>(provider: Rc<dyn Provider>) -> Self {
        Self::new(Key::of::<T>(), TypeInfo::of::<T>(), Lookup::Direct(provider))
    }

    fn new(key: Key, target: TypeInfo, lookup: Lookup) -> Self {
        Self {
            key,
            target,
            lookup,
        }
    }

    pub fn key(&self) -> &Key {
        &self.key
    }

    pub fn target(&self) -> TypeInfo {
        self.target
    }

    pub fn lookup(&self) -> &Lookup {
        &self.lookup
    }
}
