use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use tracing::{debug, trace};

use crate::container::handle::Injector;
use crate::container::injector::{CallContext, Dependency, InjectorError, Lookup, Resolve};
use crate::container::registry::{Context, ProviderMap};
use crate::container::Managed;
use crate::key::{Key, TypeInfo};
use crate::provider::{Provided, Provider};
use crate::scope::Resource;
use crate::util::builtin;

/// Identifies one open session of an [`InjectorCore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct FrameId(u64);

/// The shared state behind every [`Injector`] handle.
///
/// No `RefCell` borrow is held while a provider runs, so factories are free to
/// call back into the injector.
pub(super) struct InjectorCore {
    this: Weak<InjectorCore>,
    context: RefCell<ProviderMap>,
    frames: RefCell<Vec<Frame>>,
    next_frame: Cell<u64>,
}

impl InjectorCore {
    pub fn new(context: Context) -> Rc<Self> {
        Rc::new_cyclic(|this| Self {
            this: this.clone(),
            context: RefCell::new(context.into_providers()),
            frames: RefCell::new(Vec::new()),
            next_frame: Cell::new(0),
        })
    }

    /// Opens a session nested in the current one. Its cache starts as a copy
    /// of the enclosing session's cache.
    pub fn open_frame(&self) -> FrameId {
        let id = self.next_frame.get();
        self.next_frame.set(id + 1);

        let mut frames = self.frames.borrow_mut();
        let objects = frames
            .last()
            .map(|parent| {
                parent
                    .objects
                    .iter()
                    .map(|(key, object)| (key.clone(), (**object).dyn_clone()))
                    .collect()
            })
            .unwrap_or_default();
        frames.push(Frame::new(id, objects));
        trace!("opened session {} at depth {}", id, frames.len());
        FrameId(id)
    }

    /// Closes the session `id` along with every session opened inside it, and
    /// releases their resources, innermost first.
    ///
    /// Every resource is released even if some of them fail; all failures are
    /// returned in release order. Closing a session twice does nothing.
    pub fn close_frame(&self, id: FrameId) -> Vec<InjectorError> {
        let closed = {
            let mut frames = self.frames.borrow_mut();
            match frames.iter().position(|frame| frame.id == id.0) {
                Some(index) => frames.split_off(index),
                None => return Vec::new(),
            }
        };

        let mut errors = Vec::new();
        for frame in closed.into_iter().rev() {
            trace!("closing session {}", frame.id);
            errors.extend(frame.release());
        }
        errors
    }

    pub fn depth(&self) -> usize {
        self.frames.borrow().len()
    }

    pub fn contains(&self, key: &Key) -> bool {
        if key.is_reserved() {
            return true;
        }
        let frames = self.frames.borrow();
        let cached = frames
            .last()
            .is_some_and(|frame| frame.objects.contains_key(key));
        cached
            || frames.iter().any(|frame| frame.extension.contains(key))
            || self.context.borrow().contains(key)
    }

    /// Adds the bindings of `context` to the innermost session, or to the base
    /// context when no session is open.
    pub fn extend(&self, context: Context) -> Result<(), InjectorError> {
        let providers = context.into_providers();

        let mut existing: Vec<Key> = providers
            .keys()
            .filter(|key| self.contains(key))
            .cloned()
            .collect();
        if !existing.is_empty() {
            existing.sort_by_cached_key(ToString::to_string);
            return Err(InjectorError::AlreadyExists { keys: existing });
        }

        debug!("extending the context with {} binding(s)", providers.len());
        match self.frames.borrow_mut().last_mut() {
            Some(frame) => frame.extension.overlay(providers),
            None => self.context.borrow_mut().overlay(providers),
        }
        Ok(())
    }

    fn resolve(
        &self,
        dependency: &Dependency,
        parent: Option<&CallContext<'_>>,
    ) -> Result<Option<Box<dyn Managed>>, InjectorError> {
        let key = dependency.key();
        let context = match parent {
            Some(parent) => parent.append(key),
            None => CallContext::new(key),
        };

        if key.is_reserved() {
            return self.handle(dependency, &context).map(Some);
        }

        if parent.is_some_and(|parent| parent.trace().contains(key)) {
            return Err(InjectorError::CyclicDependency {
                key: key.clone(),
                trace: context.outer_trace().with(key.clone()),
            });
        }

        if let Lookup::Direct(provider) = dependency.lookup() {
            return self.build(dependency, provider, &context).map(Some);
        }

        if let Some(object) = self.cached(key) {
            trace!("{} is cached", key);
            let found = TypeInfo::of_val(&*object);
            check_type(dependency, found, &context)?;
            return Ok(Some(object));
        }

        if let Some(provider) = self.binding(key) {
            let object = self.build(dependency, &provider, &context)?;
            return Ok(Some(self.cache(key, object)));
        }

        match dependency.lookup() {
            Lookup::Optional => Ok(None),
            Lookup::NameThenType => {
                let type_key = Key::Type(dependency.target());
                match self.binding(&type_key) {
                    Some(provider) => {
                        trace!("{} is not bound, falling back to {}", key, type_key);
                        let object = self.build(dependency, &provider, &context)?;
                        Ok(Some(self.cache(key, object)))
                    }
                    None => Err(missing(dependency, &context)),
                }
            }
            Lookup::Exact | Lookup::Direct(_) => Err(missing(dependency, &context)),
        }
    }

    fn handle(
        &self,
        dependency: &Dependency,
        context: &CallContext<'_>,
    ) -> Result<Box<dyn Managed>, InjectorError> {
        check_type(dependency, TypeInfo::of::<Injector>(), context)?;
        match self.this.upgrade() {
            Some(core) => Ok(Box::new(Injector::from_core(core))),
            None => unreachable!("the core should be alive while it resolves"),
        }
    }

    fn build(
        &self,
        dependency: &Dependency,
        provider: &Rc<dyn Provider>,
        context: &CallContext<'_>,
    ) -> Result<Box<dyn Managed>, InjectorError> {
        check_type(dependency, provider.output(), context)?;

        let key = context.key();
        debug!(
            "{} = {}({})",
            key,
            provider.output(),
            provider.dyn_parameters().join(", ")
        );
        match provider.dyn_provide(self, context)? {
            Provided::Object(object) => Ok(object),
            Provided::Resource(mut resource) => {
                debug!("{}.acquire()", key);
                let object = resource
                    .dyn_acquire()
                    .map_err(|source| InjectorError::Acquisition {
                        key: key.clone(),
                        trace: context.outer_trace(),
                        source,
                    })?;
                self.push_resource(key.clone(), resource);
                Ok(object)
            }
        }
    }

    fn cached(&self, key: &Key) -> Option<Box<dyn Managed>> {
        let frames = self.frames.borrow();
        frames
            .last()
            .and_then(|frame| frame.objects.get(key))
            .map(|object| (**object).dyn_clone())
    }

    fn cache(&self, key: &Key, object: Box<dyn Managed>) -> Box<dyn Managed> {
        if let Some(frame) = self.frames.borrow_mut().last_mut() {
            frame.objects.insert(key.clone(), (*object).dyn_clone());
        }
        object
    }

    /// Looks `key` up in the sessions' extensions, innermost first, and then
    /// in the base context.
    fn binding(&self, key: &Key) -> Option<Rc<dyn Provider>> {
        let frames = self.frames.borrow();
        if let Some(provider) = frames.iter().rev().find_map(|frame| frame.extension.get(key)) {
            return Some(Rc::clone(provider));
        }
        self.context.borrow().get(key).cloned()
    }

    fn push_resource(&self, key: Key, resource: Box<dyn Resource>) {
        match self.frames.borrow_mut().last_mut() {
            Some(frame) => frame.resources.push((key, resource)),
            None => unreachable!("resources should only be acquired within a session"),
        }
    }
}

impl Resolve for InjectorCore {
    fn dyn_resolve(
        &self,
        dependency: &Dependency,
    ) -> Result<Option<Box<dyn Managed>>, InjectorError> {
        self.resolve(dependency, None)
    }

    fn dyn_resolve_dependency<'a>(
        &self,
        dependency: &Dependency,
        context: &'a CallContext<'a>,
    ) -> Result<Option<Box<dyn Managed>>, InjectorError> {
        self.resolve(dependency, Some(context))
    }
}

fn check_type(
    dependency: &Dependency,
    found: TypeInfo,
    context: &CallContext<'_>,
) -> Result<(), InjectorError> {
    let expected = dependency.target();
    if expected == found {
        Ok(())
    } else {
        Err(InjectorError::TypeMismatch {
            key: dependency.key().clone(),
            expected: expected.name(),
            found: found.name(),
            trace: context.outer_trace(),
        })
    }
}

/// Only a type fallback which reached a built-in type is an introspection
/// failure. Any other miss is a missing binding.
fn missing(dependency: &Dependency, context: &CallContext<'_>) -> InjectorError {
    let target = dependency.target();
    let fell_back = matches!(dependency.lookup(), Lookup::NameThenType);
    if fell_back && builtin::is_builtin(target.id()) {
        InjectorError::Introspection {
            key: dependency.key().clone(),
            type_name: target.name(),
            trace: context.outer_trace(),
        }
    } else {
        InjectorError::NotFound {
            key: dependency.key().clone(),
            trace: context.outer_trace(),
        }
    }
}

struct Frame {
    id: u64,
    objects: HashMap<Key, Box<dyn Managed>>,
    extension: ProviderMap,
    resources: Vec<(Key, Box<dyn Resource>)>,
}

impl Frame {
    fn new(id: u64, objects: HashMap<Key, Box<dyn Managed>>) -> Self {
        Self {
            id,
            objects,
            extension: ProviderMap::new(),
            resources: Vec::new(),
        }
    }

    fn release(self) -> Vec<InjectorError> {
        let mut errors = Vec::new();
        for (key, resource) in self.resources.into_iter().rev() {
            debug!("{}.release()", key);
            if let Err(source) = resource.dyn_release() {
                errors.push(InjectorError::Release { key, source });
            }
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use crate::container::injector::{Target, Trace, TypedResolve};
    use crate::container::registry::{ConfigurerImpl, TypedConfigurer};
    use crate::key;
    use crate::provider::closure::{ClosureProvider, RawClosureProvider};
    use crate::provider::instance::InstanceProvider;

    use super::*;

    fn core_with(register: impl FnOnce(&mut ConfigurerImpl)) -> Rc<InjectorCore> {
        let mut configurer = ConfigurerImpl::new();
        register(&mut configurer);
        let providers = configurer.finish().unwrap();
        InjectorCore::new(Context::from_providers(providers))
    }

    #[test]
    fn nested_frame_sees_parent_cache() {
        let core = core_with(|configurer| {
            configurer.register(
                key::named("id"),
                RawClosureProvider::new(|_: &dyn Resolve| {
                    Ok(Ok::<_, Infallible>(Rc::new(String::from("object"))))
                }),
            );
        });

        let outer = core.open_frame();
        let first: Rc<String> = core.get(Target::named("id")).unwrap();
        let inner = core.open_frame();
        let second: Rc<String> = core.get(Target::named("id")).unwrap();
        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(core.depth(), 2);

        assert!(core.close_frame(outer).is_empty());
        assert_eq!(core.depth(), 0);
        assert!(core.close_frame(inner).is_empty());
    }

    #[test]
    fn frame_cache_is_dropped_on_close() {
        let core = core_with(|configurer| {
            configurer.register(
                key::named("id"),
                RawClosureProvider::new(|_: &dyn Resolve| {
                    Ok(Ok::<_, Infallible>(Rc::new(0u8)))
                }),
            );
        });

        let frame = core.open_frame();
        let first: Rc<u8> = core.get(Target::named("id")).unwrap();
        core.close_frame(frame);

        let frame = core.open_frame();
        let second: Rc<u8> = core.get(Target::named("id")).unwrap();
        core.close_frame(frame);
        assert!(!Rc::ptr_eq(&first, &second));
    }

    #[test]
    fn type_fallback_is_cached_under_the_name() {
        let core = core_with(|configurer| {
            configurer.register(
                key::of::<Rc<u32>>(),
                ClosureProvider::new([], || Ok::<_, Infallible>(Rc::new(7u32))),
            );
        });

        let frame = core.open_frame();
        let by_name: Rc<u32> = core.param("counter").unwrap();
        assert!(core.contains(&key::named("counter")));
        let again: Rc<u32> = core.param("counter").unwrap();
        assert!(Rc::ptr_eq(&by_name, &again));
        core.close_frame(frame);
    }

    #[test]
    fn extend_rejects_existing_keys() {
        let core = core_with(|configurer| {
            configurer.register(key::named("a"), InstanceProvider::new(1u8));
        });

        let mut configurer = ConfigurerImpl::new();
        configurer.register(key::named("b"), InstanceProvider::new(2u8));
        configurer.register(key::named("a"), InstanceProvider::new(3u8));
        let providers = configurer.finish().unwrap();

        let err = core.extend(Context::from_providers(providers)).unwrap_err();
        let InjectorError::AlreadyExists { keys } = err else {
            panic!("`a` is already bound");
        };
        assert_eq!(keys, vec![key::named("a")]);
        assert!(!core.contains(&key::named("b")));
    }

    #[test]
    fn mismatched_binding_is_reported() {
        let core = core_with(|configurer| {
            configurer.register(key::named("port"), InstanceProvider::new("80"));
        });

        let frame = core.open_frame();
        let err = core.param::<u16>("port").unwrap_err();
        assert!(matches!(
            err,
            InjectorError::TypeMismatch {
                expected: "u16",
                found: "&str",
                ..
            }
        ));
        core.close_frame(frame);
    }

    #[test]
    fn missing_root_name_is_not_found_even_for_builtins() {
        let core = core_with(|_| {});

        let frame = core.open_frame();
        let err = core.get(Target::<String>::named("missing")).unwrap_err();
        assert!(matches!(err, InjectorError::NotFound { .. }));

        let err = core.param::<String>("missing").unwrap_err();
        assert!(matches!(err, InjectorError::Introspection { .. }));
        core.close_frame(frame);
    }

    #[test]
    fn missing_trace_excludes_the_missing_key() {
        let core = core_with(|configurer| {
            configurer.register(
                key::named("app"),
                ClosureProvider::new(["missing"], |value: Rc<u8>| {
                    Ok::<_, Infallible>(value)
                }),
            );
        });

        let frame = core.open_frame();
        let err = core.get(Target::<Rc<u8>>::named("app")).unwrap_err();
        assert_eq!(err.key(), Some(&key::named("missing")));
        assert_eq!(err.trace(), Some(&Trace::new(vec![key::named("app")])));
        core.close_frame(frame);
    }
}
