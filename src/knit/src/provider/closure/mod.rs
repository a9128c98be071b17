mod closure_implementation;
mod raw_wrapper;
mod wrapper;

use crate::container::injector::{BoxError, InjectorError, Resolve};

pub use raw_wrapper::RawClosureProvider;
pub use wrapper::ClosureProvider;

/// A specialized form of [`Fn`] that can be called by supplying arguments
/// resolved by name from a [`Resolve`].
///
/// Closures of `Fn(A1, A2, ...) -> Result<T, E> + 'static` where
/// `Ai: Managed` are [`Closure`]. Each argument is paired with a parameter
/// name, in order, and resolved by that name first and by its type second.
/// The names come as an array whose length must equal the closure's arity,
/// so a missing or extra name is a compile error.
///
/// Usually you don't need to use a [`Closure`] directly. The most recommended
/// way is to use `to_closure()` [`dsl`]s offered by this crate. Or wrap your
/// [`Closure`] in a [`ClosureProvider`] if you need low-level control.
///
/// [`Closure`] is only implemented by functions whose arity is at most 12.
///
/// [`dsl`]: crate::module::dsl
pub trait Closure<D>: 'static {
    /// The successfully constructed object.
    type Constructed: 'static;

    /// The error occurred in object construction after all dependencies are
    /// retrieved.
    type Error: Into<BoxError>;

    /// One parameter name per argument, `[&'static str; N]`.
    type Names: AsRef<[&'static str]> + Copy + 'static;

    /// Resolves every argument by its name and calls `self` with them.
    ///
    /// # Errors
    ///
    /// Returns an error if a dependency can't be resolved.
    ///
    /// Returns an inner error [`Closure::Error`] wrapped in the outer [`Ok`]
    /// if the object construction fails.
    fn run(
        &self,
        names: &Self::Names,
        resolver: &dyn Resolve,
    ) -> Result<Result<Self::Constructed, Self::Error>, InjectorError>;
}

/// A specialized form of [`Fn`] which directly accepts a [`Resolve`] and
/// constructs objects.
///
/// Usually you don't need to use a [`RawClosure`] directly. The most
/// recommended way is to use `to_raw_closure()` [`dsl`]s offered by this
/// crate. Or wrap your [`RawClosure`] in a [`RawClosureProvider`] if you need
/// low-level control.
///
/// [`dsl`]: crate::module::dsl
pub trait RawClosure
where
    Self: Fn(&dyn Resolve) -> Result<Result<Self::Constructed, Self::Error>, InjectorError>,
    Self: 'static,
{
    /// The successfully constructed object.
    type Constructed: 'static;

    /// The error occurred in object construction after all dependencies are
    /// retrieved.
    type Error: Into<BoxError>;
}

impl<F, T, E> RawClosure for F
where
    T: 'static,
    E: Into<BoxError>,
    Self: Fn(&dyn Resolve) -> Result<Result<T, E>, InjectorError>,
    Self: 'static,
{
    type Constructed = T;

    type Error = E;
}
