//! Static data-shape descriptors: the type-level vocabulary the codec plan
//! builder (`jcodec-plan`) compiles into parser state trees and writer
//! emission plans.
//!
//! `jcodec-shape` knows nothing about bytes, lexing, or JSON syntax -- it
//! only describes the *static form* of a target value and how to reach its
//! fields. That separation is what lets `jcodec-states` stay generic (it
//! only ever sees type-erased `Box<dyn Any>` values) while `jcodec-plan`
//! does the one-time work of binding a `Shape` to concrete Rust types.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod canonical_key;
mod container;
mod scalar_kind;
mod shape;

pub use canonical_key::canonical_key;
pub use container::{ListShape, MapKey, MapShape};
pub use scalar_kind::ScalarKind;
pub use shape::{FieldSpec, GetterRef, NamedShape, ObjectShape, SetterRef, Shape};
