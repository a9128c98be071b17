use std::collections::HashMap;
use std::rc::Rc;

use crate::key::Key;
use crate::provider::Provider;

#[derive(Debug, Clone, Default)]
pub struct ProviderMap {
    providers: HashMap<Key, Rc<dyn Provider>>,
}

impl ProviderMap {
    pub fn new() -> Self {
        Self {
            providers: HashMap::new(),
        }
    }

    /// Inserts `provider` under `key`, returning the provider it replaces.
    pub fn insert(&mut self, key: Key, provider: Rc<dyn Provider>) -> Option<Rc<dyn Provider>> {
        self.providers.insert(key, provider)
    }

    pub fn get(&self, key: &Key) -> Option<&Rc<dyn Provider>> {
        self.providers.get(key)
    }

    pub fn contains(&self, key: &Key) -> bool {
        self.providers.contains_key(key)
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

    /// Moves every entry of `other` into `self`. Entries of `other` win.
    pub fn overlay(&mut self, other: ProviderMap) {
        self.providers.extend(other.providers);
    }
}

#[cfg(test)]
mod tests {
    use crate::key;
    use crate::provider::instance::InstanceProvider;

    use super::*;

    #[test]
    fn provider_map_insert_succeeds() {
        let mut map = ProviderMap::new();
        assert!(map
            .insert(key::named("port"), Rc::new(InstanceProvider::new(80u16)))
            .is_none());
        assert!(map
            .insert(key::of::<u16>(), Rc::new(InstanceProvider::new(80u16)))
            .is_none());
        assert!(map
            .insert(key::named("port"), Rc::new(InstanceProvider::new(443u16)))
            .is_some());

        assert_eq!(map.len(), 2);
        assert!(map.contains(&key::named("port")));
        assert!(!map.contains(&key::named("host")));
    }

    #[test]
    fn provider_map_overlay_prefers_later_entries() {
        let mut base = ProviderMap::new();
        base.insert(key::named("port"), Rc::new(InstanceProvider::new(80u16)));
        base.insert(key::named("host"), Rc::new(InstanceProvider::new("prod")));

        let mut overrides = ProviderMap::new();
        overrides.insert(key::named("host"), Rc::new(InstanceProvider::new(String::from("test"))));
        base.overlay(overrides);

        assert_eq!(base.len(), 2);
        let host = base.get(&key::named("host")).unwrap();
        assert_eq!(host.output(), crate::key::TypeInfo::of::<String>());
    }
}
