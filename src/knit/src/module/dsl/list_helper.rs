use std::marker::PhantomData;

use crate::container::injector::Target;
use crate::container::Managed;
use crate::key::Key;
use crate::module::dsl::provider_helper::ProviderBinding;
use crate::provider::list::ListProvider;

/// The key half of a list binding, waiting for its entries.
pub struct ListBinder<T>
where
    T: Managed + Clone,
{
    key: Key,
    _marker: PhantomData<fn() -> T>,
}

impl<T> ListBinder<T>
where
    T: Managed + Clone,
{
    pub(super) fn new(key: Key) -> Self {
        Self {
            key,
            _marker: PhantomData,
        }
    }

    /// Resolves to a `Vec<T>` holding one value per entry, in order.
    pub fn to_entries<I, E>(self, entries: I) -> ProviderBinding<ListProvider<T>>
    where
        I: IntoIterator<Item = E>,
        E: Into<Target<T>>,
    {
        let entries = entries.into_iter().map(Into::into).collect();
        ProviderBinding::new(self.key, ListProvider::new(entries))
    }
}
