//! Generic container wiring for `List`/`Map` shapes.
//!
//! `Shape::List`/`Shape::Map` need more than an element `Shape` to be
//! useful to the plan builder: something has to know how to allocate a
//! concrete `Vec<T>`/`BTreeMap<K, V>`, push into it, and walk it back out
//! for the writer, without the plan builder itself ever naming `T`/`K`/`V`.
//! These closures are that "something", built once per concrete
//! instantiation via the generic constructors below -- the same accessor
//! abstraction `FieldSpec` uses for object fields, applied to containers.

extern crate alloc;

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::any::Any;

use crate::shape::Shape;

/// A scalar kind usable as a string-keyed map key: something that can be
/// parsed back out of the raw UTF-8 key bytes the lexer already collected,
/// and rendered back to a string for the writer side.
pub trait MapKey: Ord + Send + Sync + 'static {
    fn from_key_bytes(bytes: &[u8]) -> Option<Self>
    where
        Self: Sized;
    fn to_key_string(&self) -> String;
}

impl MapKey for String {
    fn from_key_bytes(bytes: &[u8]) -> Option<Self> {
        core::str::from_utf8(bytes).ok().map(str::to_string)
    }
    fn to_key_string(&self) -> String {
        self.clone()
    }
}

macro_rules! impl_map_key_for_int {
    ($($t:ty),*) => {
        $(
            impl MapKey for $t {
                fn from_key_bytes(bytes: &[u8]) -> Option<Self> {
                    core::str::from_utf8(bytes).ok()?.parse().ok()
                }
                fn to_key_string(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

impl_map_key_for_int!(i8, i16, i32, i64, u8, u16, u32, u64);

/// Construction, mutation, and traversal wiring for a `List` shape,
/// generic over the concrete element type `T`.
pub struct ListShape {
    pub elem: Box<Shape>,
    pub new_container: Box<dyn Fn() -> Box<dyn Any> + Send + Sync>,
    pub push: Box<dyn Fn(&mut dyn Any, Box<dyn Any>) + Send + Sync>,
    pub for_each: Box<dyn Fn(&dyn Any, &mut dyn FnMut(&dyn Any)) + Send + Sync>,
}

impl core::fmt::Debug for ListShape {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ListShape").field("elem", &self.elem).finish_non_exhaustive()
    }
}

impl ListShape {
    /// Wires a `List` shape backed by `Vec<T>`, the common case.
    #[must_use]
    pub fn for_vec<T: 'static>(elem: Shape) -> Self {
        ListShape {
            elem: Box::new(elem),
            new_container: Box::new(|| Box::new(Vec::<T>::new())),
            push: Box::new(|container, value| {
                let v = container.downcast_mut::<Vec<T>>().expect("list container type matches push");
                let item = *value.downcast::<T>().expect("list element type matches push");
                v.push(item);
            }),
            for_each: Box::new(|container, visit| {
                let v = container.downcast_ref::<Vec<T>>().expect("list container type matches for_each");
                for item in v {
                    visit(item as &dyn Any);
                }
            }),
        }
    }
}

/// Construction, mutation, and traversal wiring for a `Map` shape, generic
/// over the concrete key type `K` and value type `V`. Backed by
/// `BTreeMap<K, V>` (no_std-friendly; iteration order is key order, which
/// is irrelevant since the writer's field/iteration order guarantee only
/// covers `Object`, not `Map`).
pub struct MapShape {
    pub key: Box<Shape>,
    pub value: Box<Shape>,
    pub new_container: Box<dyn Fn() -> Box<dyn Any> + Send + Sync>,
    pub contains: Box<dyn Fn(&dyn Any, &[u8]) -> bool + Send + Sync>,
    pub insert: Box<dyn Fn(&mut dyn Any, &[u8], Box<dyn Any>) + Send + Sync>,
    pub for_each: Box<dyn Fn(&dyn Any, &mut dyn FnMut(&str, &dyn Any)) + Send + Sync>,
}

impl core::fmt::Debug for MapShape {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MapShape").field("key", &self.key).field("value", &self.value).finish_non_exhaustive()
    }
}

impl MapShape {
    #[must_use]
    pub fn for_btree_map<K: MapKey, V: 'static>(key: Shape, value: Shape) -> Self {
        MapShape {
            key: Box::new(key),
            value: Box::new(value),
            new_container: Box::new(|| Box::new(BTreeMap::<K, V>::new())),
            contains: Box::new(|container, key_bytes| {
                let Some(key) = K::from_key_bytes(key_bytes) else {
                    return false;
                };
                let map = container.downcast_ref::<BTreeMap<K, V>>().expect("map container type matches contains");
                map.contains_key(&key)
            }),
            insert: Box::new(|container, key_bytes, value| {
                let key = K::from_key_bytes(key_bytes).expect("key coercion checked by plan builder before insert");
                let v = *value.downcast::<V>().expect("map value type matches insert");
                let map = container.downcast_mut::<BTreeMap<K, V>>().expect("map container type matches insert");
                map.insert(key, v);
            }),
            for_each: Box::new(|container, visit| {
                let map = container.downcast_ref::<BTreeMap<K, V>>().expect("map container type matches for_each");
                for (k, v) in map {
                    visit(&k.to_key_string(), v as &dyn Any);
                }
            }),
        }
    }
}
