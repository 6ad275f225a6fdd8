//! The `Shape` descriptor tree and its accessor types.

extern crate alloc;

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::any::Any;

use crate::container::{ListShape, MapShape};
use crate::scalar_kind::ScalarKind;

/// Opaque write accessor bound at plan-build time: writes a parsed child
/// value into the in-progress target. The core treats it as a callable
/// with no knowledge of the concrete target type.
pub type SetterRef = Box<dyn Fn(&mut dyn Any, Box<dyn Any>) + Send + Sync>;

/// Opaque read accessor bound at plan-build time: reads a field's current
/// value out of a fully constructed source, for the writer side.
pub type GetterRef = Box<dyn Fn(&dyn Any) -> Box<dyn Any> + Send + Sync>;

/// One field of an `Object` shape.
pub struct FieldSpec {
    pub name: String,
    pub shape: Shape,
    pub setter: SetterRef,
    pub getter: GetterRef,
    pub optional: bool,
}

impl core::fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FieldSpec")
            .field("name", &self.name)
            .field("shape", &self.shape)
            .field("optional", &self.optional)
            .finish_non_exhaustive()
    }
}

/// An `Object` shape: a fixed, statically known, ordered set of fields.
/// `type_name` feeds both the canonical key and `PlanBuildFailure`
/// diagnostics; it has no effect on parsing semantics. `new_target`
/// allocates the blank target instance field setters are applied to --
/// the same role `ListShape`/`MapShape`'s `new_container` play for
/// containers.
pub struct ObjectShape {
    pub type_name: &'static str,
    pub fields: Vec<FieldSpec>,
    pub new_target: Box<dyn Fn() -> Box<dyn Any> + Send + Sync>,
}

impl core::fmt::Debug for ObjectShape {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ObjectShape")
            .field("type_name", &self.type_name)
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

/// A self-referential or mutually-recursive shape, named so the plan
/// builder's memo can detect the cycle by name instead of the builder
/// having to fully materialize an infinite `Shape` tree.
///
/// `build` is only invoked by the plan builder the first time a given
/// name is encountered; the canonical key for a `Named` shape is derived
/// from `name` alone, without calling `build`, which is what lets a shape
/// refer to itself (directly or through a cycle of other `Named` shapes)
/// without infinite recursion at the `Shape`-construction level.
pub struct NamedShape {
    pub name: &'static str,
    pub build: fn() -> Shape,
}

impl core::fmt::Debug for NamedShape {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NamedShape").field("name", &self.name).finish_non_exhaustive()
    }
}

/// The static form of a value the codec can parse or write.
///
/// Mirrors the data model one-for-one: a tagged tree whose leaves are
/// scalars and whose branches are lists, string-keyed maps, fixed-field
/// objects, or fully dynamic `Any` values. `Named` is the one addition
/// beyond a literal tree: it is how a recursive shape (e.g. a tree node
/// whose child is itself a tree node) is expressed without an infinitely
/// deep `Shape` value.
#[derive(Debug)]
pub enum Shape {
    Scalar(ScalarKind),
    List(Box<ListShape>),
    Map(Box<MapShape>),
    Object(Box<ObjectShape>),
    Any,
    Named(NamedShape),
}

impl Shape {
    #[must_use]
    pub fn list(container: ListShape) -> Self {
        Shape::List(Box::new(container))
    }

    #[must_use]
    pub fn map(container: MapShape) -> Self {
        Shape::Map(Box::new(container))
    }

    #[must_use]
    pub fn object(
        type_name: &'static str,
        fields: Vec<FieldSpec>,
        new_target: impl Fn() -> Box<dyn Any> + Send + Sync + 'static,
    ) -> Self {
        Shape::Object(Box::new(ObjectShape { type_name, fields, new_target: Box::new(new_target) }))
    }

    #[must_use]
    pub fn named(name: &'static str, build: fn() -> Shape) -> Self {
        Shape::Named(NamedShape { name, build })
    }

    /// The map key shape must itself coerce from a JSON string key; the
    /// plan builder rejects anything else with `PlanBuildFailure`. This
    /// is a quick, shape-level check the builder can call before doing
    /// any heavier work.
    #[must_use]
    pub fn is_string_coercible_key(&self) -> bool {
        matches!(
            self,
            Shape::Scalar(ScalarKind::String)
                | Shape::Scalar(ScalarKind::I8)
                | Shape::Scalar(ScalarKind::I16)
                | Shape::Scalar(ScalarKind::I32)
                | Shape::Scalar(ScalarKind::I64)
                | Shape::Scalar(ScalarKind::U8)
                | Shape::Scalar(ScalarKind::U16)
                | Shape::Scalar(ScalarKind::U32)
                | Shape::Scalar(ScalarKind::U64)
        )
    }
}
