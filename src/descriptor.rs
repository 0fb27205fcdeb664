//! Type descriptors: the closed tagged union the validator dispatches on.
//!
//! Descriptors are immutable once constructed and are meant to be built once
//! (typically at definition time) and reused across many validation calls.
//! Composite descriptors own their children; every constructor produces a
//! finite tree.
//!
//! Construction is where misuse is caught: `shape` rejects duplicate field
//! names and `any_of` rejects an empty alternative list, both with
//! [`DescryError::InvalidDescriptor`]. Validation itself never fails to
//! construct anything.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::diagnostics::DescryError;
use crate::validator::MatchResult;
use crate::value::{ClassSpec, Value};

/// An escape-hatch matching function: `(path, value) -> MatchResult`.
pub type PredicateFn = Arc<dyn Fn(&str, &Value) -> MatchResult + Send + Sync>;

/// The built-in constructor checks, rendered backtick-quoted in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    String,
    Number,
    Boolean,
    Array,
    Object,
}

impl Builtin {
    pub fn name(self) -> &'static str {
        match self {
            Builtin::String => "String",
            Builtin::Number => "Number",
            Builtin::Boolean => "Boolean",
            Builtin::Array => "Array",
            Builtin::Object => "Object",
        }
    }

    /// Whether a value passes this built-in check. `Object` admits any keyed
    /// container, mirroring a dynamic `typeof x === "object"` test.
    pub fn admits(self, value: &Value) -> bool {
        match self {
            Builtin::String => matches!(value, Value::String(_)),
            Builtin::Number => matches!(value, Value::Number(_)),
            Builtin::Boolean => matches!(value, Value::Bool(_)),
            Builtin::Array => matches!(value, Value::List(_)),
            Builtin::Object => value.is_object_like(),
        }
    }
}

/// The specification of an expected type, one variant per descriptor kind.
#[derive(Clone)]
pub enum Descriptor {
    /// Dynamic-type tag comparison against [`Value::tag_name`].
    Tag(String),
    /// Built-in constructor check.
    Builtin(Builtin),
    /// Instance-of check via the class parent chain.
    Class(Arc<ClassSpec>),
    /// Named fields, each with its own descriptor, in declaration order.
    /// Subset semantics: fields the value has beyond these are ignored.
    Shape(Arc<Vec<(String, Descriptor)>>),
    /// Ordered union; the first alternative to pass wins.
    AnyOf(Arc<Vec<Descriptor>>),
    /// A sequence whose every element satisfies the inner descriptor.
    ArrayOf(Arc<Descriptor>),
    /// A keyed container whose every value satisfies the inner descriptor.
    ObjectOf(Arc<Descriptor>),
    /// Passes `Nil` trivially, otherwise delegates to the inner descriptor.
    Optional(Arc<Descriptor>),
    /// Passes any truthy value. Rejects `0`, `""`, and `false`; see
    /// [`any`] for why this quirk is kept.
    Any,
    /// User-supplied matching function with a human-readable type name.
    Predicate { name: String, test: PredicateFn },
}

impl Descriptor {
    /// The human-readable label used as the expected-name in diagnostics.
    ///
    /// Tags render as-is, built-ins backtick-quoted, classes by their
    /// declared name (`<Anonymous>` when empty), composites by a derived
    /// phrase such as ``array of `Number` ``.
    pub fn label(&self) -> String {
        match self {
            Descriptor::Tag(name) => name.clone(),
            Descriptor::Builtin(builtin) => format!("`{}`", builtin.name()),
            Descriptor::Class(spec) => {
                if spec.name().is_empty() {
                    "<Anonymous>".to_string()
                } else {
                    spec.name().to_string()
                }
            }
            Descriptor::Shape(_) => "a duck-typed object".to_string(),
            Descriptor::AnyOf(alternatives) => {
                let names: Vec<String> = alternatives.iter().map(Descriptor::label).collect();
                format!("any of ({})", names.join(", "))
            }
            Descriptor::ArrayOf(element) => format!("array of {}", element.label()),
            Descriptor::ObjectOf(member) => format!("object of {}", member.label()),
            Descriptor::Optional(inner) => format!("optional {}", inner.label()),
            Descriptor::Any => "any value".to_string(),
            Descriptor::Predicate { name, .. } => name.clone(),
        }
    }
}

impl PartialEq for Descriptor {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Descriptor::Tag(a), Descriptor::Tag(b)) => a == b,
            (Descriptor::Builtin(a), Descriptor::Builtin(b)) => a == b,
            (Descriptor::Class(a), Descriptor::Class(b)) => a == b,
            (Descriptor::Shape(a), Descriptor::Shape(b)) => a == b,
            (Descriptor::AnyOf(a), Descriptor::AnyOf(b)) => a == b,
            (Descriptor::ArrayOf(a), Descriptor::ArrayOf(b)) => a == b,
            (Descriptor::ObjectOf(a), Descriptor::ObjectOf(b)) => a == b,
            (Descriptor::Optional(a), Descriptor::Optional(b)) => a == b,
            (Descriptor::Any, Descriptor::Any) => true,
            (
                Descriptor::Predicate { name: a, test: fa },
                Descriptor::Predicate { name: b, test: fb },
            ) => a == b && Arc::ptr_eq(fa, fb),
            _ => false,
        }
    }
}

impl fmt::Debug for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Descriptor::Tag(name) => f.debug_tuple("Tag").field(name).finish(),
            Descriptor::Builtin(builtin) => f.debug_tuple("Builtin").field(builtin).finish(),
            Descriptor::Class(spec) => f.debug_tuple("Class").field(&spec.name()).finish(),
            Descriptor::Shape(fields) => f.debug_tuple("Shape").field(fields).finish(),
            Descriptor::AnyOf(alternatives) => f.debug_tuple("AnyOf").field(alternatives).finish(),
            Descriptor::ArrayOf(element) => f.debug_tuple("ArrayOf").field(element).finish(),
            Descriptor::ObjectOf(member) => f.debug_tuple("ObjectOf").field(member).finish(),
            Descriptor::Optional(inner) => f.debug_tuple("Optional").field(inner).finish(),
            Descriptor::Any => f.write_str("Any"),
            Descriptor::Predicate { name, .. } => {
                f.debug_struct("Predicate").field("name", name).finish_non_exhaustive()
            }
        }
    }
}

/// A dynamic-type tag check, e.g. `tag("string")`.
pub fn tag(name: impl Into<String>) -> Descriptor {
    Descriptor::Tag(name.into())
}

/// The built-in `String` check.
pub fn string() -> Descriptor {
    Descriptor::Builtin(Builtin::String)
}

/// The built-in `Number` check.
pub fn number() -> Descriptor {
    Descriptor::Builtin(Builtin::Number)
}

/// The built-in `Boolean` check.
pub fn boolean() -> Descriptor {
    Descriptor::Builtin(Builtin::Boolean)
}

/// The built-in `Array` check.
pub fn array() -> Descriptor {
    Descriptor::Builtin(Builtin::Array)
}

/// The built-in `Object` check: any keyed container.
pub fn object() -> Descriptor {
    Descriptor::Builtin(Builtin::Object)
}

/// An instance-of check against a declared class.
pub fn class(spec: &Arc<ClassSpec>) -> Descriptor {
    Descriptor::Class(Arc::clone(spec))
}

/// A shape check over named fields, validated in declaration order.
///
/// Fails with [`DescryError::InvalidDescriptor`] when two fields share a
/// name. Prefer the [`shape!`](crate::shape) literal macro in host code.
pub fn shape<K, I>(fields: I) -> Result<Descriptor, DescryError>
where
    K: Into<String>,
    I: IntoIterator<Item = (K, Descriptor)>,
{
    let fields: Vec<(String, Descriptor)> = fields
        .into_iter()
        .map(|(name, descriptor)| (name.into(), descriptor))
        .collect();

    let mut seen = HashSet::new();
    for (name, _) in &fields {
        if !seen.insert(name.as_str()) {
            return Err(DescryError::invalid_descriptor(format!(
                "shape declares field `{}` more than once",
                name
            )));
        }
    }

    Ok(Descriptor::Shape(Arc::new(fields)))
}

/// An ordered union of descriptors; the first one to pass wins.
///
/// Fails with [`DescryError::InvalidDescriptor`] when given no alternatives,
/// since an empty union could never pass anything.
pub fn any_of(alternatives: impl IntoIterator<Item = Descriptor>) -> Result<Descriptor, DescryError> {
    let alternatives: Vec<Descriptor> = alternatives.into_iter().collect();
    if alternatives.is_empty() {
        return Err(DescryError::invalid_descriptor(
            "any_of requires at least one alternative",
        ));
    }
    Ok(Descriptor::AnyOf(Arc::new(alternatives)))
}

/// Every element of a sequence must satisfy `element`.
pub fn array_of(element: Descriptor) -> Descriptor {
    Descriptor::ArrayOf(Arc::new(element))
}

/// Every value of a keyed container must satisfy `member`.
pub fn object_of(member: Descriptor) -> Descriptor {
    Descriptor::ObjectOf(Arc::new(member))
}

/// Passes `Nil` (missing and explicit null alike), otherwise delegates.
pub fn optional(inner: Descriptor) -> Descriptor {
    Descriptor::Optional(Arc::new(inner))
}

/// Passes any truthy value.
///
/// Falsy-but-valid values (`0`, `""`, `false`) are rejected. This matches
/// the long-standing behavior host code depends on; callers that want a
/// genuine wildcard should use `optional(any())` or a predicate.
pub fn any() -> Descriptor {
    Descriptor::Any
}

/// An escape hatch: a named matching function invoked with `(path, value)`.
pub fn predicate(
    name: impl Into<String>,
    test: impl Fn(&str, &Value) -> MatchResult + Send + Sync + 'static,
) -> Descriptor {
    Descriptor::Predicate {
        name: name.into(),
        test: Arc::new(test),
    }
}

/// Builds a [`Descriptor::Shape`] from field literals, in declaration order.
///
/// ```rust
/// use descry::descriptor::{number, string};
/// use descry::shape;
///
/// let person = shape! {
///     "name" => string(),
///     "age" => number(),
/// };
/// assert_eq!(person.label(), "a duck-typed object");
/// ```
///
/// Panics when a field name is repeated; shape literals are definition-time
/// code, so misuse fails fast like any other construction error.
#[macro_export]
macro_rules! shape {
    ($($field:expr => $descriptor:expr),* $(,)?) => {{
        let fields: ::std::vec::Vec<(::std::string::String, $crate::Descriptor)> =
            ::std::vec![$((::std::convert::Into::into($field), $descriptor)),*];
        $crate::descriptor::shape(fields).expect("shape literal with duplicate field")
    }};
}
