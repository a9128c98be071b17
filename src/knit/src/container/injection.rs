use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::ops::Deref;
use std::rc::Rc;

use tracing::error;

use crate::container::core::{FrameId, InjectorCore};
use crate::container::injector::InjectorError;

/// A value handed out by an [`Injector`], valid until the session it was
/// built in closes.
///
/// Closing, either with [`Injection::close`] or by dropping, releases the
/// scoped resources acquired in the session in reverse order. Sessions
/// opened after this one and still alive are closed first.
///
/// [`Injector`]: crate::container::Injector
#[must_use = "dropping an `Injection` releases its resources immediately"]
pub struct Injection<T> {
    value: T,
    core: Rc<InjectorCore>,
    frame: FrameId,
    closed: bool,
}

impl<T> Injection<T> {
    pub(super) fn new(value: T, core: Rc<InjectorCore>, frame: FrameId) -> Self {
        Self {
            value,
            core,
            frame,
            closed: false,
        }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Closes the session and releases its resources.
    ///
    /// # Errors
    ///
    /// Every resource is released even if an earlier release fails; the first
    /// failure is returned as [`InjectorError::Release`].
    pub fn close(mut self) -> Result<(), InjectorError> {
        self.closed = true;
        let mut errors = self.core.close_frame(self.frame).into_iter();
        let first = errors.next();
        for err in errors {
            error!("{}", err);
        }
        match first {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl<T> Deref for Injection<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl<T> Drop for Injection<T> {
    fn drop(&mut self) {
        if !self.closed {
            for err in self.core.close_frame(self.frame) {
                error!("{}", err);
            }
        }
    }
}

impl<T: Debug> Debug for Injection<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_tuple("Injection").field(&self.value).finish()
    }
}
