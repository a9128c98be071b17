use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::key::Key;

/// Information about the binding currently being built.
#[derive(Clone)]
pub struct CallContext<'a> {
    trace: InjectionTrace<'a>,
}

impl<'a> CallContext<'a> {
    pub fn new(key: &'a Key) -> Self {
        Self {
            trace: InjectionTrace::new(key),
        }
    }

    pub fn append<'b>(&'b self, key: &'b Key) -> CallContext<'b> {
        CallContext {
            trace: self.trace.append(key),
        }
    }

    pub fn key(&self) -> &Key {
        self.trace.key()
    }

    pub fn trace(&self) -> &InjectionTrace<'_> {
        &self.trace
    }

    /// The keys being built around the current one, outermost first.
    pub fn outer_trace(&self) -> Trace {
        self.trace
            .previous()
            .map(InjectionTrace::to_trace)
            .unwrap_or_else(Trace::empty)
    }
}

/// The chain of keys under construction, linked from the innermost one.
#[derive(Clone)]
pub struct InjectionTrace<'a> {
    key: &'a Key,
    previous: Option<&'a InjectionTrace<'a>>,
}

impl<'a> InjectionTrace<'a> {
    pub fn new(key: &'a Key) -> Self {
        Self {
            key,
            previous: None,
        }
    }

    pub fn append<'b>(&'b self, key: &'b Key) -> InjectionTrace<'b> {
        InjectionTrace {
            key,
            previous: Some(self),
        }
    }

    pub fn key(&self) -> &Key {
        self.key
    }

    pub fn previous(&self) -> Option<&InjectionTrace<'a>> {
        self.previous
    }

    pub fn contains(&self, key: &Key) -> bool {
        let mut this = Some(self);
        while let Some(current) = this {
            if current.key() == key {
                return true;
            }
            this = current.previous();
        }
        false
    }

    /// Collects the keys into an owned [`Trace`], outermost first.
    pub fn to_trace(&self) -> Trace {
        let mut keys = Vec::new();
        let mut this = Some(self);
        while let Some(current) = this {
            keys.push(current.key().clone());
            this = current.previous();
        }
        keys.reverse();
        Trace::new(keys)
    }
}

/// An owned resolution path attached to errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trace {
    keys: Vec<Key>,
}

impl Trace {
    pub fn new(keys: Vec<Key>) -> Self {
        Self { keys }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub(crate) fn with(mut self, key: Key) -> Self {
        self.keys.push(key);
        self
    }

    pub(crate) fn within(&self) -> Within<'_> {
        Within(self)
    }
}

impl Display for Trace {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for (i, key) in self.keys.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{key}")?;
        }
        Ok(())
    }
}

pub(crate) struct Within<'a>(&'a Trace);

impl Display for Within<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        if self.0.is_empty() {
            Ok(())
        } else {
            write!(f, " (while building {})", self.0)
        }
    }
}
