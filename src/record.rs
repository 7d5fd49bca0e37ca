//! Record-like state and partial patches.
//!
//! A record store merges partial patches into a fresh copy of its state
//! instead of replacing it. Any `Clone` type can opt in by implementing
//! [`Record`]; the [`record!`](crate::record!) macro writes the patch type
//! and the impl for plain structs.

use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

/// State that accepts shallow partial updates.
pub trait Record: Clone {
    /// A partial of `Self`: any subset of its fields.
    type Patch;

    /// Overwrite the fields present in `patch`, keeping all others.
    fn merge(&mut self, patch: Self::Patch);
}

impl<K, V, S> Record for HashMap<K, V, S>
where
    K: Eq + Hash + Clone,
    V: Clone,
    S: BuildHasher + Clone,
{
    type Patch = HashMap<K, V, S>;

    fn merge(&mut self, patch: Self::Patch) {
        self.extend(patch);
    }
}

impl<K: Ord + Clone, V: Clone> Record for BTreeMap<K, V> {
    type Patch = BTreeMap<K, V>;

    fn merge(&mut self, patch: Self::Patch) {
        self.extend(patch);
    }
}

/// Declare a struct usable as record state, together with its patch type.
///
/// The patch holds every field as an `Option`, derives `Default`, and gets
/// one chainable setter per field.
///
/// ```
/// use cubby::{record, Record};
///
/// record! {
///     #[derive(Clone, Debug, PartialEq)]
///     pub struct Profile => ProfilePatch {
///         pub name: String,
///         pub age: u32,
///     }
/// }
///
/// let mut profile = Profile { name: "Ada".into(), age: 36 };
/// profile.merge(ProfilePatch::default().age(37));
/// assert_eq!(profile, Profile { name: "Ada".into(), age: 37 });
/// ```
#[macro_export]
macro_rules! record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident => $patch:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $ty,
            )*
        }

        #[doc = concat!("Partial update for [`", stringify!($name), "`].")]
        #[derive(Default)]
        $vis struct $patch {
            $(
                $field_vis $field: ::core::option::Option<$ty>,
            )*
        }

        #[allow(dead_code)]
        impl $patch {
            $(
                #[doc = concat!("Set `", stringify!($field), "` in this patch.")]
                #[must_use]
                pub fn $field(mut self, value: $ty) -> Self {
                    self.$field = ::core::option::Option::Some(value);
                    self
                }
            )*
        }

        impl $crate::Record for $name {
            type Patch = $patch;

            fn merge(&mut self, patch: Self::Patch) {
                $(
                    if let ::core::option::Option::Some(value) = patch.$field {
                        self.$field = value;
                    }
                )*
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::record! {
        #[derive(Clone, Debug, PartialEq)]
        struct Point => PointPatch {
            x: i32,
            y: i32,
        }
    }

    #[test]
    fn merge_overwrites_present_fields_only() {
        let mut point = Point { x: 1, y: 2 };
        point.merge(PointPatch::default().y(5));
        assert_eq!(point, Point { x: 1, y: 5 });

        point.merge(PointPatch::default());
        assert_eq!(point, Point { x: 1, y: 5 });
    }

    #[test]
    fn maps_insert_patch_entries() {
        let mut map = BTreeMap::from([("a", 1), ("b", 2)]);
        map.merge(BTreeMap::from([("b", 20), ("c", 30)]));
        assert_eq!(map, BTreeMap::from([("a", 1), ("b", 20), ("c", 30)]));

        let mut hashed: HashMap<String, u8> = HashMap::new();
        hashed.merge(HashMap::from([("k".to_string(), 1)]));
        assert_eq!(hashed.get("k"), Some(&1));
    }
}
