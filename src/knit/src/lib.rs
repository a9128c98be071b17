#![allow(clippy::new_without_default)]

pub mod container;
pub mod key;
pub mod module;
pub mod provider;
pub mod scope;
mod util;

extern crate self as knit;

pub use knit_derive::component;

pub mod prelude {
    pub use crate::component;
    pub use crate::container::injector::{
        BoxError, InjectorError, Request, Resolve, Target, TypedResolve,
    };
    pub use crate::container::registry::{Configurer, Context, RegistryError, TypedConfigurer};
    pub use crate::container::{Injection, Injector};
    pub use crate::key;
    pub use crate::module::{bind, bind_list, bind_type, Configuration, Module};
    pub use crate::scope::{guard, Scoped};
}
