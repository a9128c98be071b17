pub mod injector;
pub mod registry;

mod core;
mod handle;
mod injection;

use crate::util::any::AsAny;

pub use handle::Injector;
pub use injection::Injection;

/// A value the injector can cache and hand out.
///
/// Every resolution of a cached key returns a clone of the cached value, so
/// values behind `Rc` or `Arc` are shared while plain values are copied.
pub trait Managed: AsAny {
    fn dyn_clone(&self) -> Box<dyn Managed>;
}

impl<T> Managed for T
where
    T: Clone + 'static,
{
    fn dyn_clone(&self) -> Box<dyn Managed> {
        Box::new(self.clone())
    }
}
