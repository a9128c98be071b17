use std::any;
use std::collections::BTreeMap;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::rc::Rc;

use tracing::{debug, error};

use crate::container::core::InjectorCore;
use crate::container::injection::Injection;
use crate::container::injector::{InjectorError, Request, Resolve, Target, TypedResolve};
use crate::container::registry::Context;
use crate::container::Managed;
use crate::key::Key;

/// Resolves objects out of a [`Context`] and owns the scoped resources it
/// acquires on the way.
///
/// An `Injector` is a cheap handle: clones share the same context and the same
/// sessions. Every `inject*` call opens a session which lasts as long as the
/// returned [`Injection`]. Sessions opened while another one is alive are
/// nested in it and start with its cached objects.
///
/// # Examples
///
/// ```rust
/// # use std::convert::Infallible;
/// # use knit::prelude::*;
/// let context = Context::init(|configurer: &mut dyn Configurer| -> Result<(), BoxError> {
///     bind::<String>("name").to_instance(String::from("world")).set_on(configurer);
///     bind::<String>("greeting")
///         .to_closure(["name"], |name: String| Ok::<_, Infallible>(format!("hello, {name}")))
///         .set_on(configurer);
///     Ok(())
/// })
/// .unwrap();
///
/// let injector = Injector::new(context);
/// let greeting: Injection<String> = injector.inject("greeting").unwrap();
/// assert_eq!(*greeting, "hello, world");
/// ```
#[derive(Clone)]
pub struct Injector {
    core: Rc<InjectorCore>,
}

impl Injector {
    pub fn new(context: Context) -> Self {
        Self::from_core(InjectorCore::new(context))
    }

    pub(super) fn from_core(core: Rc<InjectorCore>) -> Self {
        Self { core }
    }

    /// Resolves a single target.
    ///
    /// # Errors
    ///
    /// Returns an error if the target or one of its dependencies can't be
    /// resolved or constructed. Resources acquired so far are released
    /// before the error is returned.
    pub fn inject<T>(&self, target: impl Into<Target<T>>) -> Result<Injection<T>, InjectorError>
    where
        T: Managed,
    {
        let target = target.into();
        debug!("inject({})", target.key());
        self.session(|resolver| resolver.get(target))
    }

    /// Resolves every target of `request` in one session. A tuple of targets
    /// yields a tuple of values in the same order.
    ///
    /// # Errors
    ///
    /// Returns the first error met, after releasing every resource acquired
    /// in the session.
    pub fn inject_all<R>(&self, request: R) -> Result<Injection<R::Output>, InjectorError>
    where
        R: Request,
    {
        debug!("inject_all({})", any::type_name::<R::Output>());
        self.session(|resolver| request.resolve(resolver))
    }

    /// Resolves each entry, by name or by type, into a `Vec` of the same order.
    ///
    /// # Errors
    ///
    /// Returns the first error met, after releasing every resource acquired
    /// in the session.
    pub fn inject_list<T, I, E>(&self, entries: I) -> Result<Injection<Vec<T>>, InjectorError>
    where
        T: Managed,
        I: IntoIterator<Item = E>,
        E: Into<Target<T>>,
    {
        let entries: Vec<Target<T>> = entries.into_iter().map(Into::into).collect();
        debug!("inject_list({:?})", entries);
        self.session(|resolver| resolver.list(&entries))
    }

    /// Resolves each aliased entry, by name or by type, into a map keyed by the
    /// same aliases. Entries are resolved in alias order.
    ///
    /// # Errors
    ///
    /// Returns the first error met, after releasing every resource acquired
    /// in the session.
    pub fn inject_map<T, K, I, E>(
        &self,
        entries: I,
    ) -> Result<Injection<BTreeMap<K, T>>, InjectorError>
    where
        T: Managed,
        K: Ord + Debug,
        I: IntoIterator<Item = (K, E)>,
        E: Into<Target<T>>,
    {
        let entries: BTreeMap<K, Target<T>> = entries
            .into_iter()
            .map(|(alias, entry)| (alias, entry.into()))
            .collect();
        debug!("inject_map({:?})", entries);
        self.session(|resolver| entries.resolve(resolver))
    }

    /// Adds bindings to the innermost open session, or to the injector itself
    /// when no session is open. Bindings added to a session are gone once it
    /// closes.
    ///
    /// # Errors
    ///
    /// Returns [`InjectorError::AlreadyExists`] with every key of `context`
    /// which is already bound or cached. Nothing is added in that case.
    pub fn extend(&self, context: Context) -> Result<(), InjectorError> {
        self.core.extend(context)
    }

    /// Returns true if `key` is bound or cached in the innermost session.
    pub fn contains(&self, key: &Key) -> bool {
        self.core.contains(key)
    }

    /// The number of sessions currently open.
    pub fn session_depth(&self) -> usize {
        self.core.depth()
    }

    fn session<T, F>(&self, build: F) -> Result<Injection<T>, InjectorError>
    where
        F: FnOnce(&dyn Resolve) -> Result<T, InjectorError>,
    {
        let frame = self.core.open_frame();
        match build(&*self.core) {
            Ok(value) => Ok(Injection::new(value, Rc::clone(&self.core), frame)),
            Err(err) => {
                for release_err in self.core.close_frame(frame) {
                    error!("{}", release_err);
                }
                Err(err)
            }
        }
    }
}

impl Debug for Injector {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Injector")
            .field("session_depth", &self.session_depth())
            .finish_non_exhaustive()
    }
}
