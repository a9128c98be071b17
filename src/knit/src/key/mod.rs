//! Keys identifying bindings in a [`Context`].
//!
//! A binding is either looked up by a parameter *name* or by a declared
//! *type*. Names are what factories ask for first; types are the fallback
//! used when a name is not bound.
//!
//! [`Context`]: crate::container::registry::Context

use std::any::{self, TypeId};
use std::fmt::{Debug, Display, Formatter, Result as FmtResult};
use std::hash::{Hash, Hasher};

use crate::container::Managed;
use crate::util::any::AsAny;

/// The name under which an [`Injector`] injects a handle to itself.
///
/// [`Injector`]: crate::container::Injector
pub const INJECTOR_NAME: &str = "injector";

/// Runtime information about a Rust type.
#[derive(Clone, Copy)]
pub struct TypeInfo {
    id: TypeId,
    name: &'static str,
}

impl TypeInfo {
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: any::type_name::<T>(),
        }
    }

    /// Describes the concrete type behind a type-erased object.
    pub(crate) fn of_val(object: &dyn Managed) -> Self {
        Self {
            id: object.as_any().type_id(),
            name: object.type_name(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Debug for TypeInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.name)
    }
}

impl Display for TypeInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.name)
    }
}

impl PartialEq for TypeInfo {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeInfo {}

impl Hash for TypeInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Name(String),
    Type(TypeInfo),
}

impl Key {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    pub fn of<T: ?Sized + 'static>() -> Self {
        Self::Type(TypeInfo::of::<T>())
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Name(name) => Some(name.as_str()),
            Self::Type(_) => None,
        }
    }

    pub fn is_reserved(&self) -> bool {
        self.name() == Some(INJECTOR_NAME)
    }
}

impl Display for Key {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Name(name) => write!(f, "\"{name}\""),
            Self::Type(info) => write!(f, "{info}"),
        }
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Self::named(name)
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

pub fn named(name: impl Into<String>) -> Key {
    Key::named(name)
}

pub fn of<T: ?Sized + 'static>() -> Key {
    Key::of::<T>()
}
