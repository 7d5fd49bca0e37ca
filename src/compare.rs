//! Shallow change detection.
//!
//! Watchers and host bindings decide whether something changed by comparing
//! the previous and the next selected value with [`ShallowEq`]. Scalars and
//! strings compare by value; shared pointers compare by identity. Nothing is
//! ever compared structurally, so a freshly built `Rc<Vec<_>>` with the same
//! contents still counts as a change.

use std::rc::Rc;
use std::sync::Arc;

/// Identity-or-value equality used for change detection.
pub trait ShallowEq {
    /// Returns `true` when `self` and `other` are the same value.
    fn shallow_eq(&self, other: &Self) -> bool;
}

/// Implement [`ShallowEq`] for types that should be compared by value
/// through their `PartialEq`.
///
/// Use it for small enums and plain data that are selected out of the state
/// as owned values.
///
/// ```
/// use cubby::{shallow_eq_by_value, ShallowEq};
///
/// #[derive(Clone, Debug, PartialEq)]
/// enum Status {
///     Idle,
///     Loading(u8),
/// }
///
/// shallow_eq_by_value!(Status);
///
/// assert!(Status::Loading(1).shallow_eq(&Status::Loading(1)));
/// assert!(!Status::Idle.shallow_eq(&Status::Loading(1)));
/// ```
#[macro_export]
macro_rules! shallow_eq_by_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::ShallowEq for $ty {
                #[inline]
                fn shallow_eq(&self, other: &Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

crate::shallow_eq_by_value!(
    (), bool, char, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64,
    str, String,
);

impl<T: ShallowEq + ?Sized> ShallowEq for &T {
    fn shallow_eq(&self, other: &Self) -> bool {
        (**self).shallow_eq(*other)
    }
}

impl<T: ?Sized> ShallowEq for Rc<T> {
    fn shallow_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(self, other)
    }
}

impl<T: ?Sized> ShallowEq for Arc<T> {
    fn shallow_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other)
    }
}

impl<T: ShallowEq> ShallowEq for Option<T> {
    fn shallow_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.shallow_eq(b),
            (None, None) => true,
            _ => false,
        }
    }
}

macro_rules! impl_tuple {
    ($($name:ident : $idx:tt),+) => {
        impl<$($name: ShallowEq),+> ShallowEq for ($($name,)+) {
            fn shallow_eq(&self, other: &Self) -> bool {
                $(self.$idx.shallow_eq(&other.$idx))&&+
            }
        }
    };
}

impl_tuple!(A: 0);
impl_tuple!(A: 0, B: 1);
impl_tuple!(A: 0, B: 1, C: 2);
impl_tuple!(A: 0, B: 1, C: 2, D: 3);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalars_compare_by_value() {
        assert!(3_i32.shallow_eq(&3));
        assert!(!3_i32.shallow_eq(&4));
        assert!(String::from("a").shallow_eq(&String::from("a")));
        assert!(!f64::NAN.shallow_eq(&f64::NAN));
    }

    #[test]
    fn pointers_compare_by_identity() {
        let a = Rc::new(vec![1, 2]);
        let b = Rc::new(vec![1, 2]);
        assert!(a.shallow_eq(&Rc::clone(&a)));
        assert!(!a.shallow_eq(&b));

        let f: Arc<dyn Fn() -> u8> = Arc::new(|| 1);
        assert!(f.shallow_eq(&Arc::clone(&f)));
    }

    #[derive(Debug, PartialEq)]
    enum Phase {
        Text(String),
        Null,
    }

    crate::shallow_eq_by_value!(Phase);

    #[test]
    fn user_types_opt_into_value_comparison() {
        assert!(Phase::Text("a".into()).shallow_eq(&Phase::Text("a".into())));
        assert!(!Phase::Text("a".into()).shallow_eq(&Phase::Null));
        assert!(Some(Phase::Null).shallow_eq(&Some(Phase::Null)));
    }

    #[test]
    fn options_and_tuples() {
        let shared = Rc::new(1);
        assert!(Some(Rc::clone(&shared)).shallow_eq(&Some(Rc::clone(&shared))));
        assert!(!Some(1).shallow_eq(&None));
        assert!((1, "x").shallow_eq(&(1, "x")));
        assert!(!(1, Rc::new(0)).shallow_eq(&(1, Rc::new(0))));
    }
}
