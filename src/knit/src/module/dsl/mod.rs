//! A small builder DSL for registering bindings.
//!
//! ```rust
//! # use std::convert::Infallible;
//! # use knit::prelude::*;
//! let context = Context::init(|configurer: &mut dyn Configurer| -> Result<(), BoxError> {
//!     bind::<u16>("port").to_instance(8080).set_on(configurer);
//!     bind::<String>("address")
//!         .to_closure(["port"], |port: u16| Ok::<_, Infallible>(format!("0.0.0.0:{port}")))
//!         .set_on(configurer);
//!     bind_list::<u16>("ports").to_entries(["port"]).set_on(configurer);
//!     Ok(())
//! })
//! .unwrap();
//! assert_eq!(context.len(), 3);
//! ```

pub mod binder_helper;
pub mod list_helper;
pub mod provider_helper;

use binder_helper::Binder;
use list_helper::ListBinder;

use crate::container::Managed;
use crate::key::Key;

/// Starts a binding for the parameter `name`.
pub fn bind<T>(name: impl Into<String>) -> Binder<T>
where
    T: Managed,
{
    Binder::new(Key::named(name))
}

/// Starts a binding for the type `T`, used whenever a parameter of type `T`
/// is not bound by name.
pub fn bind_type<T>() -> Binder<T>
where
    T: Managed,
{
    Binder::new(Key::of::<T>())
}

/// Starts a binding for the parameter `name` which resolves to a list.
pub fn bind_list<T>(name: impl Into<String>) -> ListBinder<T>
where
    T: Managed + Clone,
{
    ListBinder::new(Key::named(name))
}
