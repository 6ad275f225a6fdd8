//! Canonical type key derivation: a stable string identity for a `Shape`,
//! used both as the plan cache key and to detect already-generated
//! sub-shapes during a single plan build.

extern crate alloc;

use alloc::string::String;
use core::fmt::Write as _;

use crate::shape::Shape;

/// Derives the canonical key for a shape. Two shapes equal as trees
/// produce equal keys; shapes differing only in a generic parameter (e.g.
/// `List<Foo>` vs `List<Bar>`) produce different keys because the
/// parameter is written recursively.
///
/// `Named` shapes contribute only their name, not their (lazily built)
/// contents -- this is what lets the key terminate on cyclic shapes
/// instead of recursing forever.
#[must_use]
pub fn canonical_key(shape: &Shape) -> String {
    let mut out = String::new();
    write_key(shape, &mut out);
    out
}

fn write_key(shape: &Shape, out: &mut String) {
    match shape {
        Shape::Scalar(kind) => {
            out.push_str(kind.as_key_str());
        }
        Shape::List(list) => {
            out.push_str("list<");
            write_key(&list.elem, out);
            out.push('>');
        }
        Shape::Map(map) => {
            out.push_str("map<");
            write_key(&map.key, out);
            out.push(',');
            write_key(&map.value, out);
            out.push('>');
        }
        Shape::Object(obj) => {
            let _ = write!(out, "object#{}{{", obj.type_name);
            for (i, field) in obj.fields.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&field.name);
                out.push(':');
                write_key(&field.shape, out);
                if field.optional {
                    out.push('?');
                }
            }
            out.push('}');
        }
        Shape::Any => out.push_str("any"),
        Shape::Named(named) => {
            let _ = write!(out, "named#{}", named.name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FieldSpec, ListShape, ScalarKind};
    use alloc::boxed::Box;
    use alloc::vec;

    #[test]
    fn equal_trees_produce_equal_keys() {
        let a = Shape::list(ListShape::for_vec::<i32>(Shape::Scalar(ScalarKind::I32)));
        let b = Shape::list(ListShape::for_vec::<i32>(Shape::Scalar(ScalarKind::I32)));
        assert_eq!(canonical_key(&a), canonical_key(&b));
    }

    #[test]
    fn generic_parameter_changes_the_key() {
        let list_of_foo = Shape::list(ListShape::for_vec::<alloc::string::String>(Shape::Scalar(ScalarKind::String)));
        let list_of_bar = Shape::list(ListShape::for_vec::<i64>(Shape::Scalar(ScalarKind::I64)));
        assert_ne!(canonical_key(&list_of_foo), canonical_key(&list_of_bar));
    }

    #[test]
    fn object_key_reflects_field_order_and_optionality() {
        let shape = Shape::object(
            "Person",
            vec![
                FieldSpec {
                    name: "name".into(),
                    shape: Shape::Scalar(ScalarKind::String),
                    setter: Box::new(|_t, _v| {}),
                    getter: Box::new(|_t| Box::new(())),
                    optional: false,
                },
                FieldSpec {
                    name: "age".into(),
                    shape: Shape::Scalar(ScalarKind::I32),
                    setter: Box::new(|_t, _v| {}),
                    getter: Box::new(|_t| Box::new(())),
                    optional: true,
                },
            ],
            || Box::new(()),
        );
        assert_eq!(canonical_key(&shape), "object#Person{name:string,age:i32?}");
    }

    #[test]
    fn named_shape_key_does_not_recurse_into_build() {
        fn cyclic() -> Shape {
            Shape::named("Cyclic", cyclic)
        }
        // If `canonical_key` ever called `build`, this would overflow the
        // stack; it must terminate purely on the name.
        assert_eq!(canonical_key(&cyclic()), "named#Cyclic");
    }
}
