use std::fmt::{Debug, Formatter, Result as FmtResult};

use crate::container::injector::{CallContext, InjectorError, TypedResolve};
use crate::container::Managed;
use crate::provider::TypedProvider;

/// A [`Provider`] for a plain value, cloned on every request.
///
/// [`Provider`]: crate::provider::Provider
pub struct InstanceProvider<T>
where
    T: Managed + Clone,
{
    instance: T,
}

impl<T> InstanceProvider<T>
where
    T: Managed + Clone,
{
    pub fn new(instance: T) -> Self {
        Self { instance }
    }
}

impl<T> Debug for InstanceProvider<T>
where
    T: Managed + Clone,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("InstanceProvider<T>")
            .finish_non_exhaustive()
    }
}

impl<T> TypedProvider for InstanceProvider<T>
where
    T: Managed + Clone,
{
    type Output = T;

    fn provide<R>(
        &self,
        _resolver: &R,
        _context: &CallContext<'_>,
    ) -> Result<Self::Output, InjectorError>
    where
        R: TypedResolve + ?Sized,
    {
        Ok(self.instance.clone())
    }
}
