use std::any::{self, Any};
use std::ops::Deref;

pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;

    fn type_name(&self) -> &'static str;
}

impl<T: Any> AsAny for T {
    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }

    #[inline]
    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }

    #[inline]
    fn type_name(&self) -> &'static str {
        any::type_name::<T>()
    }
}

pub trait DowncastRef {
    fn is<T: Any>(&self) -> bool;

    fn downcast_ref<T: Any>(&self) -> Option<&T>;
}

impl<S> DowncastRef for S
where
    S: Deref<Target: AsAny>,
{
    #[inline]
    fn is<T: Any>(&self) -> bool {
        (**self).as_any().is::<T>()
    }

    #[inline]
    fn downcast_ref<T: Any>(&self) -> Option<&T> {
        (**self).as_any().downcast_ref::<T>()
    }
}

pub trait Downcast: DowncastRef + Sized {
    type Output<T>;

    fn downcast<T: Any>(self) -> Result<Self::Output<T>, Self>;
}

impl<S> Downcast for Box<S>
where
    S: AsAny + ?Sized,
{
    type Output<T> = Box<T>;

    fn downcast<T: Any>(self) -> Result<Self::Output<T>, Self> {
        if self.is::<T>() {
            let res = self
                .into_any()
                .downcast::<T>()
                .unwrap_or_else(|_| std::unreachable!("`self` should be `Box<T>`"));
            Ok(res)
        } else {
            Err(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::container::Managed;

    use super::*;

    #[test]
    fn downcast_succeeds_when_receiver_is_a_box() {
        let x: Box<dyn Managed> = Box::new(String::from("value"));

        assert!(x.is::<String>());
        assert_eq!(x.downcast_ref::<String>().map(String::as_str), Some("value"));

        let y = x.downcast::<String>().unwrap_or(Box::new(String::new()));
        assert_eq!(*y, "value");
    }

    #[test]
    fn downcast_fails_when_type_differs() {
        let x: Box<dyn Managed> = Box::new(42i32);

        assert!(!x.is::<i64>());
        assert!(x.downcast::<i64>().is_err());
    }

    #[test]
    fn type_name_reports_erased_type() {
        let x: Box<dyn Managed> = Box::new(42u8);
        assert_eq!((*x).type_name(), "u8");
    }
}
