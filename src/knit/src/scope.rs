//! Scoped resources: values with an explicit acquire/release lifecycle.
//!
//! When a factory produces a [`Scoped`] value, the injector calls
//! [`Scoped::acquire`] right away and hands out the acquired value. The
//! resource itself is kept on the stack of the innermost open [`Injection`]
//! and released when that injection closes. Resources of one injection are
//! released in the reverse order of their acquisition.
//!
//! [`Injection`]: crate::container::Injection

use std::convert::Infallible;

use crate::container::injector::BoxError;
use crate::container::Managed;

/// A value that must be acquired before use and released afterwards.
///
/// # Examples
///
/// ```rust
/// # use std::convert::Infallible;
/// # use knit::scope::Scoped;
/// struct Transaction {
///     open: bool,
/// }
///
/// impl Scoped for Transaction {
///     type Target = u64;
///
///     type Error = Infallible;
///
///     fn acquire(&mut self) -> Result<u64, Infallible> {
///         self.open = true;
///         Ok(42)
///     }
///
///     fn release(self) -> Result<(), Infallible> {
///         Ok(())
///     }
/// }
/// ```
pub trait Scoped: Sized + 'static {
    /// The value handed out while the resource is held.
    type Target: Managed;

    type Error: Into<BoxError>;

    fn acquire(&mut self) -> Result<Self::Target, Self::Error>;

    fn release(self) -> Result<(), Self::Error>;
}

/// The type-erased form of [`Scoped`] kept on an injection's resource stack.
pub trait Resource {
    fn dyn_acquire(&mut self) -> Result<Box<dyn Managed>, BoxError>;

    fn dyn_release(self: Box<Self>) -> Result<(), BoxError>;
}

impl<S> Resource for S
where
    S: Scoped,
{
    fn dyn_acquire(&mut self) -> Result<Box<dyn Managed>, BoxError> {
        self.acquire()
            .map(|target| -> Box<dyn Managed> { Box::new(target) })
            .map_err(Into::into)
    }

    fn dyn_release(self: Box<Self>) -> Result<(), BoxError> {
        (*self).release().map_err(Into::into)
    }
}

/// A [`Scoped`] value which runs a closure on release.
pub struct Guard<T, F>
where
    T: Managed + Clone,
    F: FnOnce(T) + 'static,
{
    value: T,
    on_release: F,
}

impl<T, F> Scoped for Guard<T, F>
where
    T: Managed + Clone,
    F: FnOnce(T) + 'static,
{
    type Target = T;

    type Error = Infallible;

    fn acquire(&mut self) -> Result<Self::Target, Self::Error> {
        Ok(self.value.clone())
    }

    fn release(self) -> Result<(), Self::Error> {
        (self.on_release)(self.value);
        Ok(())
    }
}

/// Wraps `value` so that `on_release` receives it when the owning injection
/// closes.
pub fn guard<T, F>(value: T, on_release: F) -> Guard<T, F>
where
    T: Managed + Clone,
    F: FnOnce(T) + 'static,
{
    Guard { value, on_release }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::util::any::Downcast;

    use super::*;

    #[test]
    fn guard_runs_closure_on_release() {
        let released = Rc::new(RefCell::new(None));
        let mut resource: Box<dyn Resource> = Box::new(guard(String::from("conn"), {
            let released = Rc::clone(&released);
            move |value| *released.borrow_mut() = Some(value)
        }));

        let acquired = resource.dyn_acquire().unwrap();
        assert_eq!(*acquired.downcast::<String>().unwrap_or_default(), "conn");
        assert!(released.borrow().is_none());

        resource.dyn_release().unwrap();
        assert_eq!(released.borrow().as_deref(), Some("conn"));
    }
}
