//! Structural classification of reflected values.
//!
//! Every value lands in exactly one [`Category`], decided by a fixed
//! priority order of capability probes on its shape, never by matching
//! concrete type names. A type that satisfies a capability (say, a
//! third-party ordered map exposing `Def::Map`) gets the corresponding
//! layout for free.

use facet::Facet;
use facet_core::{PointerType, StructKind, Type, UserType};
use facet_reflect::Peek;

/// The closed structural tag a value is classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Strings, numbers, booleans, and any value with no recognized
    /// structural capability.
    Scalar,
    /// Key-iterable containers: maps, and named-field structs whose field
    /// names act as keys.
    Mapping,
    /// Ordered homogeneous containers: vectors, arrays, slices.
    Sequence,
    /// Unordered unique containers.
    Set,
    /// Fixed-arity positional containers: tuples and tuple structs.
    Tuple,
    /// Invocable values (function pointers).
    Callable,
    /// Type descriptors ([`TypeRef`] handles).
    TypeRef,
}

/// A renderable handle to a type, captured from its [`Facet`] shape.
///
/// Rust has no first-class runtime type objects, so this is the crate's
/// type-descriptor value: it resolves the type's display name once, at
/// construction, and renders as that name alone.
///
/// ```
/// use aprint::{TypeRef, pformat};
///
/// assert_eq!(pformat(&TypeRef::of::<u32>())?, "u32");
/// # Ok::<(), aprint::RenderError>(())
/// ```
#[derive(Facet, Clone, Debug, PartialEq)]
pub struct TypeRef {
    name: String,
}

impl TypeRef {
    /// Capture a handle to `T`'s type.
    pub fn of<'a, T: Facet<'a> + ?Sized>() -> Self {
        Self {
            name: T::SHAPE.to_string(),
        }
    }

    /// The type's display name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A mapping entry's key.
pub(crate) enum MapKey<'mem, 'facet> {
    /// A real key value, rendered as its own sub-render.
    Value(Peek<'mem, 'facet>),
    /// A struct field name, rendered as a bare identifier.
    Field(&'static str),
}

/// Ephemeral classification result: a category plus the children the
/// renderer will descend into, in the container's own iteration order.
pub(crate) enum Node<'mem, 'facet> {
    Scalar(Peek<'mem, 'facet>),
    Optional(Option<Peek<'mem, 'facet>>),
    Mapping(Vec<(MapKey<'mem, 'facet>, Peek<'mem, 'facet>)>),
    Sequence(Vec<Peek<'mem, 'facet>>),
    Set(Vec<Peek<'mem, 'facet>>),
    Tuple(Vec<Peek<'mem, 'facet>>),
    Callable,
    TypeRef(&'mem TypeRef),
}

impl Node<'_, '_> {
    pub(crate) fn category(&self) -> Category {
        match self {
            Node::Scalar(_) | Node::Optional(_) => Category::Scalar,
            Node::Mapping(_) => Category::Mapping,
            Node::Sequence(_) => Category::Sequence,
            Node::Set(_) => Category::Set,
            Node::Tuple(_) => Category::Tuple,
            Node::Callable => Category::Callable,
            Node::TypeRef(_) => Category::TypeRef,
        }
    }
}

/// Classify a value and expose its children.
///
/// Deterministic, side-effect-free, and total: a value matching none of
/// the capability probes is a Scalar.
pub(crate) fn classify<'mem, 'facet>(value: Peek<'mem, 'facet>) -> Node<'mem, 'facet> {
    if let Ok(map) = value.into_map() {
        return Node::Mapping(map.iter().map(|(k, v)| (MapKey::Value(k), v)).collect());
    }
    if let Ok(list) = value.into_list_like() {
        return Node::Sequence(list.iter().collect());
    }
    if let Ok(set) = value.into_set() {
        return Node::Set(set.iter().collect());
    }
    if let Type::User(UserType::Struct(ty)) = value.shape().ty
        && matches!(ty.kind, StructKind::Tuple | StructKind::TupleStruct)
        && !ty.fields.is_empty()
    {
        let tuple = value.into_struct().unwrap();
        return Node::Tuple((0..ty.fields.len()).map(|i| tuple.field(i).unwrap()).collect());
    }
    if matches!(value.shape().ty, Type::Pointer(PointerType::Function(_))) {
        return Node::Callable;
    }
    if value.shape().is_type::<TypeRef>()
        && let Ok(type_ref) = value.get::<TypeRef>()
    {
        return Node::TypeRef(type_ref);
    }
    if let Ok(option) = value.into_option() {
        return Node::Optional(option.value());
    }
    // Named fields satisfy the key-iterable contract.
    if let Type::User(UserType::Struct(ty)) = value.shape().ty
        && ty.kind == StructKind::Struct
    {
        let st = value.into_struct().unwrap();
        let entries = ty
            .fields
            .iter()
            .enumerate()
            .map(|(i, field)| (MapKey::Field(field.name), st.field(i).unwrap()))
            .collect();
        return Node::Mapping(entries);
    }
    Node::Scalar(value)
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, BTreeSet};

    use super::*;

    fn category_of<'a, T: Facet<'a>>(value: &T) -> Category {
        classify(Peek::new(value)).category()
    }

    #[test]
    fn capability_probes_follow_the_priority_order() {
        assert_eq!(category_of(&BTreeMap::from([("k", 1)])), Category::Mapping);
        assert_eq!(category_of(&vec![1, 2]), Category::Sequence);
        assert_eq!(category_of(&[1u8, 2]), Category::Sequence);
        assert_eq!(category_of(&BTreeSet::from([1])), Category::Set);
        assert_eq!(category_of(&(1u8, 'x')), Category::Tuple);
        assert_eq!(category_of(&TypeRef::of::<bool>()), Category::TypeRef);
        assert_eq!(category_of(&42u64), Category::Scalar);
        assert_eq!(category_of(&"text"), Category::Scalar);
    }

    #[test]
    fn function_pointers_are_callable() {
        fn double(x: i32) -> i32 {
            x * 2
        }
        let f: fn(i32) -> i32 = double;
        assert_eq!(category_of(&f), Category::Callable);
    }

    #[test]
    fn named_field_structs_are_key_iterable() {
        #[derive(Facet)]
        struct Probe {
            a: u8,
            b: u8,
        }
        let node = classify(Peek::new(&Probe { a: 1, b: 2 }));
        assert_eq!(node.category(), Category::Mapping);
        let Node::Mapping(entries) = node else {
            unreachable!()
        };
        assert_eq!(entries.len(), 2);
        assert!(matches!(entries[0].0, MapKey::Field("a")));
    }

    #[test]
    fn type_ref_captures_the_display_name() {
        assert_eq!(TypeRef::of::<u32>().name(), "u32");
    }
}
