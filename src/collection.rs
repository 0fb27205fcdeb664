//! Descriptor factories for arbitrary collection classes: an instance-of
//! gate first, then the instance's fields checked as a shape or per member.

use std::sync::Arc;

use crate::descriptor::{predicate, Descriptor};
use crate::validator::{validate, Mismatch};
use crate::value::{ClassSpec, Value};

/// A collection whose fields, viewed as a plain map, must satisfy `fields`
/// (typically a shape). The instance-of failure reports the backticked
/// collection name rather than the generic class label.
pub fn keyed_collection(class: &Arc<ClassSpec>, fields: Descriptor) -> Descriptor {
    let class = Arc::clone(class);
    let name = format!("`{}`", class.name());
    let gate_name = name.clone();
    predicate(name, move |path, value| {
        let instance = match value {
            Value::Instance(instance) if instance.is_a(&class) => instance,
            _ => {
                return Some(Mismatch::new(
                    path,
                    Descriptor::Tag(gate_name.clone()),
                    value.clone(),
                ))
            }
        };
        validate(path, &Value::Map(instance.fields().clone()), &fields)
    })
}

/// A collection whose every member must satisfy `member`.
pub fn typed_collection(class: &Arc<ClassSpec>, member: Descriptor) -> Descriptor {
    let class = Arc::clone(class);
    let name = format!("`{}`", class.name());
    let gate_name = name.clone();
    predicate(name, move |path, value| {
        let instance = match value {
            Value::Instance(instance) if instance.is_a(&class) => instance,
            _ => {
                return Some(Mismatch::new(
                    path,
                    Descriptor::Tag(gate_name.clone()),
                    value.clone(),
                ))
            }
        };
        for (key, item) in instance.fields().iter() {
            if let Some(mismatch) = validate(&format!("{path}.{key}"), item, &member) {
                return Some(mismatch);
            }
        }
        None
    })
}
