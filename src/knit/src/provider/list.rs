use std::fmt::{Debug, Formatter, Result as FmtResult};

use crate::container::injector::{
    CallContext, ContextForwardingResolver, InjectorError, Target, TypedResolve,
};
use crate::container::Managed;
use crate::provider::TypedProvider;

/// A [`Provider`] for an ordered sequence of entries, each resolved
/// independently.
///
/// [`Provider`]: crate::provider::Provider
pub struct ListProvider<T>
where
    T: Managed + Clone,
{
    entries: Vec<Target<T>>,
}

impl<T> ListProvider<T>
where
    T: Managed + Clone,
{
    pub fn new(entries: Vec<Target<T>>) -> Self {
        Self { entries }
    }
}

impl<T> Debug for ListProvider<T>
where
    T: Managed + Clone,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ListProvider<T>")
            .field("entries", &self.entries)
            .finish()
    }
}

impl<T> TypedProvider for ListProvider<T>
where
    T: Managed + Clone,
{
    type Output = Vec<T>;

    fn provide<R>(
        &self,
        resolver: &R,
        context: &CallContext<'_>,
    ) -> Result<Self::Output, InjectorError>
    where
        R: TypedResolve + ?Sized,
    {
        ContextForwardingResolver::new(resolver, context).list(&self.entries)
    }
}

#[cfg(test)]
mod tests {
    use crate::container::injector::MockResolve;
    use crate::key;

    use super::*;

    #[test]
    fn list_provider_resolves_entries_in_order() {
        let mut resolver = MockResolve::new();
        resolver.expect_dyn_resolve_dependency().returning(|dependency, _| {
            let name = dependency.key().name().unwrap_or("typed").to_uppercase();
            Ok(Some(Box::new(name)))
        });

        let provider = ListProvider::new(vec![
            Target::<String>::named("b"),
            Target::of(),
            Target::named("a"),
        ]);
        let key = key::named("letters");

        let res = provider.provide(&resolver, &CallContext::new(&key)).unwrap();
        assert_eq!(res, vec!["B", "TYPED", "A"]);
    }
}
