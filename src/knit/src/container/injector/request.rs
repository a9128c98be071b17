use std::collections::BTreeMap;

use crate::container::injector::{InjectorError, Target, TypedResolve};
use crate::container::Managed;

/// Something an [`Injector`] can be asked for in one session: a single
/// [`Target`], a list of targets, a map of aliased targets, or a tuple of
/// requests.
///
/// Tuples resolve their elements from left to right and keep that order in the
/// output. Maps resolve their entries in key order.
///
/// [`Injector`]: crate::container::Injector
pub trait Request {
    type Output;

    fn resolve<R>(self, resolver: &R) -> Result<Self::Output, InjectorError>
    where
        R: TypedResolve + ?Sized;
}

impl<T> Request for Target<T>
where
    T: Managed,
{
    type Output = T;

    fn resolve<R>(self, resolver: &R) -> Result<Self::Output, InjectorError>
    where
        R: TypedResolve + ?Sized,
    {
        resolver.get(self)
    }
}

impl<T> Request for Vec<Target<T>>
where
    T: Managed,
{
    type Output = Vec<T>;

    fn resolve<R>(self, resolver: &R) -> Result<Self::Output, InjectorError>
    where
        R: TypedResolve + ?Sized,
    {
        resolver.list(&self)
    }
}

impl<K, T> Request for BTreeMap<K, Target<T>>
where
    K: Ord,
    T: Managed,
{
    type Output = BTreeMap<K, T>;

    fn resolve<R>(self, resolver: &R) -> Result<Self::Output, InjectorError>
    where
        R: TypedResolve + ?Sized,
    {
        self.into_iter()
            .map(|(alias, target)| Ok((alias, resolver.get(target)?)))
            .collect()
    }
}

macro_rules! impl_request_for_tuples {
    ($($request:ident),+) => {
        #[allow(non_snake_case)]
        impl<$($request,)+> Request for ($($request,)+)
        where
            $($request: Request,)+
        {
            type Output = ($($request::Output,)+);

            fn resolve<R>(self, resolver: &R) -> Result<Self::Output, InjectorError>
            where
                R: TypedResolve + ?Sized,
            {
                let ($($request,)+) = self;
                $(
                    let $request = $request.resolve(resolver)?;
                )+
                Ok(($($request,)+))
            }
        }
    };
}

impl_request_for_tuples!(R1);
impl_request_for_tuples!(R1, R2);
impl_request_for_tuples!(R1, R2, R3);
impl_request_for_tuples!(R1, R2, R3, R4);
impl_request_for_tuples!(R1, R2, R3, R4, R5);
impl_request_for_tuples!(R1, R2, R3, R4, R5, R6);
impl_request_for_tuples!(R1, R2, R3, R4, R5, R6, R7);
impl_request_for_tuples!(R1, R2, R3, R4, R5, R6, R7, R8);

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::container::injector::MockResolve;

    use super::*;

    #[test]
    fn tuple_request_keeps_order() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut resolver = MockResolve::new();
        resolver.expect_dyn_resolve().returning_st({
            let order = Rc::clone(&order);
            move |dependency| {
                let name = dependency.key().name().unwrap_or_default().to_string();
                order.borrow_mut().push(name.clone());
                Ok(Some(Box::new(name)))
            }
        });

        let request = (
            Target::<String>::named("app1"),
            Target::<String>::named("app2"),
            vec![Target::<String>::named("a"), Target::named("b")],
        );
        let (app1, app2, list) = request.resolve(&resolver).unwrap();

        assert_eq!(app1, "app1");
        assert_eq!(app2, "app2");
        assert_eq!(list, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(*order.borrow(), vec!["app1", "app2", "a", "b"]);
    }

    #[test]
    fn map_request_resolves_in_key_order() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut resolver = MockResolve::new();
        resolver.expect_dyn_resolve().returning_st({
            let order = Rc::clone(&order);
            move |dependency| {
                let name = dependency.key().name().unwrap_or_default().to_string();
                order.borrow_mut().push(name.clone());
                Ok(Some(Box::new(name.to_uppercase())))
            }
        });

        let request = BTreeMap::from([
            ("primary", Target::<String>::named("postgres")),
            ("cache", Target::named("redis")),
        ]);
        let resolved = request.resolve(&resolver).unwrap();

        assert_eq!(resolved["primary"], "POSTGRES");
        assert_eq!(resolved["cache"], "REDIS");
        assert_eq!(*order.borrow(), vec!["redis", "postgres"]);
    }
}
