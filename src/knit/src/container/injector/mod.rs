mod context;
mod dependency;
mod proxy;
mod request;
mod target;

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

use snafu::prelude::*;

use crate::container::{Injector, Managed};
use crate::key::{Key, INJECTOR_NAME};
use crate::util::any::Downcast;

pub use context::{CallContext, InjectionTrace, Trace};
pub use dependency::{Dependency, Lookup};
pub(crate) use proxy::ContextForwardingResolver;
pub use request::Request;
pub use target::Target;

pub type BoxError = Box<dyn Error + Send + Sync>;

/// The type-erased interface factories use to pull their dependencies.
#[cfg_attr(test, mockall::automock)]
pub trait Resolve {
    /// Resolves `dependency` on behalf of the caller. Returns `Ok(None)` only
    /// for [`Lookup::Optional`] dependencies which are not bound.
    fn dyn_resolve(&self, dependency: &Dependency)
        -> Result<Option<Box<dyn Managed>>, InjectorError>;

    fn dyn_resolve_dependency<'a>(
        &self,
        dependency: &Dependency,
        context: &'a CallContext<'a>,
    ) -> Result<Option<Box<dyn Managed>>, InjectorError>;
}

pub trait TypedResolve: Resolve {
    /// Resolves a root [`Target`].
    fn get<T>(&self, target: Target<T>) -> Result<T, InjectorError>
    where
        T: Managed,
    {
        match self.dyn_resolve(target.dependency())? {
            Some(object) => Ok(downcast_managed(object)),
            None => unreachable!("only optional dependencies can be absent"),
        }
    }

    /// Resolves a parameter by `name`, falling back to the binding of `T`.
    fn param<T>(&self, name: &str) -> Result<T, InjectorError>
    where
        T: Managed,
    {
        match self.dyn_resolve(&Dependency::parameter::<T>(name))? {
            Some(object) => Ok(downcast_managed(object)),
            None => unreachable!("only optional dependencies can be absent"),
        }
    }

    fn param_or<T>(&self, name: &str, default: T) -> Result<T, InjectorError>
    where
        T: Managed,
    {
        self.param_or_else(name, || default)
    }

    fn param_or_else<T, F>(&self, name: &str, default: F) -> Result<T, InjectorError>
    where
        T: Managed,
        F: FnOnce() -> T,
    {
        match self.dyn_resolve(&Dependency::optional::<T>(name))? {
            Some(object) => Ok(downcast_managed(object)),
            None => Ok(default()),
        }
    }

    /// Resolves every entry in order.
    fn list<T>(&self, entries: &[Target<T>]) -> Result<Vec<T>, InjectorError>
    where
        T: Managed,
    {
        entries.iter().map(|entry| self.get(entry.clone())).collect()
    }

    /// Returns a handle to the injector running the current resolution.
    fn injector(&self) -> Result<Injector, InjectorError> {
        self.param(INJECTOR_NAME)
    }

    fn upcast_dyn(&self) -> &dyn Resolve;
}

impl<T> TypedResolve for T
where
    T: Resolve,
{
    fn upcast_dyn(&self) -> &dyn Resolve {
        self
    }
}

impl TypedResolve for dyn Resolve + '_ {
    fn upcast_dyn(&self) -> &dyn Resolve {
        self
    }
}

pub(crate) fn downcast_managed<T: Managed>(object: Box<dyn Managed>) -> T {
    match object.downcast::<T>() {
        Ok(object) => *object,
        Err(_) => unreachable!("the object's type should be checked against `T`"),
    }
}

#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum InjectorError {
    #[snafu(display("could not find a binding for {key}{}", trace.within()))]
    #[non_exhaustive]
    NotFound { key: Key, trace: Trace },
    #[snafu(display(
        "could not construct {key} of built-in type `{type_name}` without a binding{}",
        trace.within()
    ))]
    #[non_exhaustive]
    Introspection {
        key: Key,
        type_name: &'static str,
        trace: Trace,
    },
    #[snafu(display(
        "{key} provides `{found}` but `{expected}` was requested{}",
        trace.within()
    ))]
    #[non_exhaustive]
    TypeMismatch {
        key: Key,
        expected: &'static str,
        found: &'static str,
        trace: Trace,
    },
    #[snafu(display("dependency cycle detected: {trace}"))]
    #[non_exhaustive]
    CyclicDependency { key: Key, trace: Trace },
    #[snafu(display("could not construct the object {key}{}", trace.within()))]
    #[non_exhaustive]
    ObjectConstruction {
        key: Key,
        trace: Trace,
        source: BoxError,
    },
    #[snafu(display("could not acquire the scoped resource {key}{}", trace.within()))]
    #[non_exhaustive]
    Acquisition {
        key: Key,
        trace: Trace,
        source: BoxError,
    },
    #[snafu(display("could not release the scoped resource {key}"))]
    #[non_exhaustive]
    Release { key: Key, source: BoxError },
    #[snafu(display("bindings for {} already exist", KeyListDisplayer::new(keys)))]
    #[non_exhaustive]
    AlreadyExists { keys: Vec<Key> },
}

impl InjectorError {
    /// Wraps an error raised by a user factory while building `context.key()`.
    pub fn construction(context: &CallContext<'_>, source: impl Into<BoxError>) -> Self {
        Self::ObjectConstruction {
            key: context.key().clone(),
            trace: context.outer_trace(),
            source: source.into(),
        }
    }

    /// Returns the key the error is about, if there is exactly one.
    pub fn key(&self) -> Option<&Key> {
        match self {
            Self::NotFound { key, .. }
            | Self::Introspection { key, .. }
            | Self::TypeMismatch { key, .. }
            | Self::CyclicDependency { key, .. }
            | Self::ObjectConstruction { key, .. }
            | Self::Acquisition { key, .. }
            | Self::Release { key, .. } => Some(key),
            Self::AlreadyExists { .. } => None,
        }
    }

    pub fn trace(&self) -> Option<&Trace> {
        match self {
            Self::NotFound { trace, .. }
            | Self::Introspection { trace, .. }
            | Self::TypeMismatch { trace, .. }
            | Self::CyclicDependency { trace, .. }
            | Self::ObjectConstruction { trace, .. }
            | Self::Acquisition { trace, .. } => Some(trace),
            Self::Release { .. } | Self::AlreadyExists { .. } => None,
        }
    }
}

struct KeyListDisplayer<'a> {
    keys: &'a [Key],
}

impl<'a> KeyListDisplayer<'a> {
    fn new(keys: &'a [Key]) -> Self {
        Self { keys }
    }
}

impl Display for KeyListDisplayer<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for (i, key) in self.keys.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::key;

    use super::*;

    #[test]
    fn param_succeeds_when_resolved() {
        let mut resolver = MockResolve::new();
        resolver
            .expect_dyn_resolve()
            .withf(|dependency| {
                dependency.key() == &key::named("prefix")
                    && matches!(dependency.lookup(), Lookup::NameThenType)
            })
            .returning(|_| Ok(Some(Box::new(String::from("abc")))));

        assert_eq!(resolver.param::<String>("prefix").unwrap(), "abc");
    }

    #[test]
    fn param_or_falls_back_to_default_when_absent() {
        let mut resolver = MockResolve::new();
        resolver
            .expect_dyn_resolve()
            .withf(|dependency| matches!(dependency.lookup(), Lookup::Optional))
            .returning(|_| Ok(None));

        assert_eq!(resolver.param_or("port", 8080u16).unwrap(), 8080);
        assert_eq!(resolver.param_or_else("retries", || 3u8).unwrap(), 3);
    }

    #[test]
    fn param_propagates_errors() {
        let mut resolver = MockResolve::new();
        resolver.expect_dyn_resolve().returning(|dependency| {
            Err(InjectorError::NotFound {
                key: dependency.key().clone(),
                trace: Trace::empty(),
            })
        });

        let err = resolver.param::<u8>("missing").unwrap_err();
        assert!(matches!(err, InjectorError::NotFound { .. }));
        assert_eq!(err.to_string(), "could not find a binding for \"missing\"");
    }

    #[test]
    fn error_display_includes_trace() {
        let err = InjectorError::NotFound {
            key: key::named("unknown"),
            trace: Trace::new(vec![key::named("app"), key::named("database")]),
        };
        assert_eq!(
            err.to_string(),
            "could not find a binding for \"unknown\" (while building \"app\" -> \"database\")"
        );

        let err = InjectorError::AlreadyExists {
            keys: vec![key::named("a"), key::named("b")],
        };
        assert_eq!(err.to_string(), "bindings for \"a\", \"b\" already exist");
    }
}
