mod wrapper;

use crate::container::injector::{BoxError, InjectorError, TypedResolve};

pub use wrapper::ComponentProvider;

/// A type that has a dedicated constructor for dependency injection.
///
/// Usually, you don't need to implement the [`Component`] trait manually for
/// your components, because the [`component`] macro helps with this. In case
/// that you really want to write implementation in your own, take a look at
/// the following code snippet:
///
/// ```rust
/// # use std::rc::Rc;
/// # use std::convert::Infallible;
/// # use knit::container::injector::{TypedResolve, InjectorError};
/// # use knit::provider::component::Component;
/// #
/// trait Greeter {}
///
/// struct English {
///     prefix: String,
///     times: u32,
/// }
///
/// impl Greeter for English {}
///
/// impl Component for English {
///     type Constructed = Rc<dyn Greeter>;
///
///     type Error = Infallible;
///
///     fn parameters() -> &'static [&'static str] {
///         &["prefix", "times"]
///     }
///
///     fn construct<R>(resolver: &R) -> Result<Result<Self, Self::Error>, InjectorError>
///     where
///         R: TypedResolve + ?Sized
///     {
///         let prefix = resolver.param("prefix")?;
///         let times = resolver.param_or("times", 1)?;
///         Ok(Ok(Self { prefix, times }))
///     }
///
///     fn post_process(self) -> Self::Constructed {
///         Rc::new(self)
///     }
/// }
/// ```
///
/// In addition, you don't need to use functions in [`Component`] directly. The
/// most recommended way is to use `to_component()` [`dsl`]s offered by this
/// crate. Or wrap your [`Component`] in a [`ComponentProvider`] if you need
/// low-level control.
///
/// [`component`]: crate::component
/// [`dsl`]: crate::module::dsl
pub trait Component: Sized + 'static {
    /// The successfully constructed object. This can be not only `Self`, but
    /// also some boxed `Self`, such as `Rc<Self>` and `Rc<dyn Trait>`, or a
    /// [`Scoped`] resource.
    ///
    /// [`Scoped`]: crate::scope::Scoped
    type Constructed: 'static;

    /// The error occurred in object construction after all dependencies are
    /// retrieved.
    type Error: Into<BoxError>;

    /// Names of the constructor's parameters, in declaration order.
    fn parameters() -> &'static [&'static str] {
        &[]
    }

    /// Retrieves the dependencies from the resolver and creates the object.
    ///
    /// # Errors
    ///
    /// Returns an error if a dependency can't be resolved.
    ///
    /// Returns an inner error [`Component::Error`] wrapped in the outer [`Ok`]
    /// if the object construction fails.
    fn construct<R>(resolver: &R) -> Result<Result<Self, Self::Error>, InjectorError>
    where
        R: TypedResolve + ?Sized;

    /// Converts `self` to [`Component::Constructed`]. Typical usages are
    /// putting `self` to an [`Rc`] and coercing it to an `Rc<dyn Trait>`.
    ///
    /// [`Rc`]: std::rc::Rc
    fn post_process(self) -> Self::Constructed;
}
