//! The recursive-descent matcher: `(path, value, descriptor) -> MatchResult`.
//!
//! Pure and synchronous. The walk short-circuits: the first failure found is
//! the only one reported, never a list. Recursion depth equals the nesting
//! depth of the descriptor and value; callers bound the shape of their input.

use crate::descriptor::Descriptor;
use crate::value::Value;

/// A failed match: the location, the descriptor that rejected it, and the
/// offending value. Produced fresh per validation call and consumed by the
/// caller to build an error message.
#[derive(Debug, Clone, PartialEq)]
pub struct Mismatch {
    path: String,
    expected: Descriptor,
    found: Value,
}

/// The outcome of a validation: `None` when the value satisfies the
/// descriptor, otherwise exactly one [`Mismatch`].
pub type MatchResult = Option<Mismatch>;

impl Mismatch {
    pub fn new(path: impl Into<String>, expected: Descriptor, found: Value) -> Self {
        Self {
            path: path.into(),
            expected,
            found,
        }
    }

    /// Dotted/bracketed location of the failure, e.g. `arg0.info.age` or
    /// `i[2]`.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The descriptor responsible for the failure.
    pub fn expected(&self) -> &Descriptor {
        &self.expected
    }

    /// The offending runtime value.
    pub fn found(&self) -> &Value {
        &self.found
    }

    /// One-line diagnostic in the canonical format:
    ///
    /// ```rust
    /// use descry::descriptor::number;
    /// use descry::validator::validate;
    /// use descry::value::Value;
    ///
    /// let mismatch = validate("i", &Value::from("asd"), &number()).unwrap();
    /// assert_eq!(mismatch.message(), "expected `i` to be `Number`, got `asd`");
    /// ```
    pub fn message(&self) -> String {
        format!(
            "expected `{}` to be {}, got `{}`",
            self.path,
            self.expected.label(),
            self.found.display_name()
        )
    }
}

/// Validates `value` against `descriptor`, reporting failures relative to
/// `path`. The sole entry point for the engine; every composite descriptor
/// recurses through here.
pub fn validate(path: &str, value: &Value, descriptor: &Descriptor) -> MatchResult {
    match descriptor {
        Descriptor::Predicate { test, .. } => test(path, value),
        Descriptor::Tag(tag) => {
            if value.tag_name() == tag {
                None
            } else {
                Some(Mismatch::new(path, descriptor.clone(), value.clone()))
            }
        }
        Descriptor::Builtin(builtin) => {
            if builtin.admits(value) {
                None
            } else {
                Some(Mismatch::new(path, descriptor.clone(), value.clone()))
            }
        }
        Descriptor::Class(spec) => {
            let is_instance = matches!(value, Value::Instance(instance) if instance.is_a(spec));
            if is_instance {
                None
            } else {
                Some(Mismatch::new(path, descriptor.clone(), value.clone()))
            }
        }
        Descriptor::Any => {
            if value.is_truthy() {
                None
            } else {
                Some(Mismatch::new(path, descriptor.clone(), value.clone()))
            }
        }
        Descriptor::Optional(inner) => {
            if value.is_nil() {
                None
            } else {
                validate(path, value, inner)
            }
        }
        Descriptor::Shape(fields) => validate_shape(path, value, descriptor, fields),
        Descriptor::ArrayOf(element) => validate_elements(path, value, descriptor, element),
        Descriptor::ObjectOf(member) => validate_members(path, value, descriptor, member),
        Descriptor::AnyOf(alternatives) => {
            for alternative in alternatives.iter() {
                if validate(path, value, alternative).is_none() {
                    return None;
                }
            }
            // No alternative matched; report the union itself, not any one
            // sub-mismatch.
            Some(Mismatch::new(path, descriptor.clone(), value.clone()))
        }
    }
}

fn validate_shape(
    path: &str,
    value: &Value,
    descriptor: &Descriptor,
    fields: &[(String, Descriptor)],
) -> MatchResult {
    if !value.is_object_like() {
        return Some(Mismatch::new(path, descriptor.clone(), value.clone()));
    }

    // A declared field the value lacks is validated as Nil, so "required
    // field missing" reports uniformly with "wrong type."
    const MISSING: Value = Value::Nil;
    for (name, field_descriptor) in fields {
        let field = value.field(name).unwrap_or(&MISSING);
        if let Some(mismatch) = validate(&format!("{path}.{name}"), field, field_descriptor) {
            return Some(mismatch);
        }
    }
    None
}

fn validate_elements(
    path: &str,
    value: &Value,
    descriptor: &Descriptor,
    element: &Descriptor,
) -> MatchResult {
    let Value::List(items) = value else {
        return Some(Mismatch::new(path, descriptor.clone(), value.clone()));
    };

    for (index, item) in items.iter().enumerate() {
        if let Some(mismatch) = validate(&format!("{path}[{index}]"), item, element) {
            return Some(mismatch);
        }
    }
    None
}

fn validate_members(
    path: &str,
    value: &Value,
    descriptor: &Descriptor,
    member: &Descriptor,
) -> MatchResult {
    let Some(entries) = value.entries() else {
        return Some(Mismatch::new(path, descriptor.clone(), value.clone()));
    };

    for (key, item) in entries {
        if let Some(mismatch) = validate(&format!("{path}.{key}"), item, member) {
            return Some(mismatch);
        }
    }
    None
}
