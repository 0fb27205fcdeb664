use std::fmt;
use std::sync::Arc;

use im::HashMap;
use serde::{Deserialize, Serialize};

/// A named class handle used for instance-of checks.
///
/// Classes are declared once and shared by `Arc`; an optional parent forms a
/// single-inheritance chain that [`Instance::is_a`] walks.
///
/// # Examples
///
/// ```rust
/// use descry::value::ClassSpec;
/// let animal = ClassSpec::new("Animal");
/// let dog = ClassSpec::subclass(&animal, "Dog");
/// assert_eq!(dog.name(), "Dog");
/// assert_eq!(dog.parent().unwrap().name(), "Animal");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassSpec {
    name: String,
    parent: Option<Arc<ClassSpec>>,
}

impl ClassSpec {
    pub fn new(name: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            parent: None,
        })
    }

    pub fn subclass(parent: &Arc<ClassSpec>, name: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            parent: Some(Arc::clone(parent)),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<&Arc<ClassSpec>> {
        self.parent.as_ref()
    }
}

/// A class-tagged field map, the dynamic analogue of "an object produced by a
/// user constructor."
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    class: Arc<ClassSpec>,
    fields: HashMap<String, Value>,
}

impl Instance {
    pub fn new(class: Arc<ClassSpec>, fields: HashMap<String, Value>) -> Self {
        Self { class, fields }
    }

    pub fn class(&self) -> &Arc<ClassSpec> {
        &self.class
    }

    pub fn fields(&self) -> &HashMap<String, Value> {
        &self.fields
    }

    /// Walks the class chain, starting at this instance's own class.
    pub fn is_a(&self, spec: &ClassSpec) -> bool {
        let mut current = Some(self.class.as_ref());
        while let Some(class) = current {
            if class.name() == spec.name() {
                return true;
            }
            current = class.parent().map(Arc::as_ref);
        }
        false
    }
}

/// A dynamic value submitted for validation.
///
/// # Examples
///
/// ```rust
/// use descry::value::Value;
/// let n = Value::Number(3.14);
/// assert_eq!(n.type_name(), "Number");
/// let s = Value::String("hello".to_string());
/// assert_eq!(s.tag_name(), "string");
/// let nil = Value::default();
/// assert!(nil.is_nil());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum Value {
    #[default]
    Nil,
    Bool(bool),
    Number(f64),
    String(String),
    List(Vec<Value>),
    Map(HashMap<String, Value>),
    Instance(Instance),
}

impl Value {
    /// Convenience constructor for an instance value.
    pub fn instance<K, I>(class: &Arc<ClassSpec>, fields: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let fields = fields
            .into_iter()
            .map(|(key, value)| (key.into(), value))
            .collect();
        Value::Instance(Instance::new(Arc::clone(class), fields))
    }

    /// Returns the capitalized type name of the value. Instances report their
    /// class name.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use descry::value::Value;
    /// assert_eq!(Value::Bool(true).type_name(), "Bool");
    /// assert_eq!(Value::List(vec![]).type_name(), "List");
    /// ```
    pub fn type_name(&self) -> &str {
        match self {
            Value::Nil => "Nil",
            Value::Bool(_) => "Bool",
            Value::Number(_) => "Number",
            Value::String(_) => "String",
            Value::List(_) => "List",
            Value::Map(_) => "Map",
            Value::Instance(instance) => instance.class().name(),
        }
    }

    /// Returns the lowercase dynamic-type tag compared against
    /// `Descriptor::Tag`.
    pub fn tag_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Instance(_) => "instance",
        }
    }

    /// Returns the name used for this value in mismatch messages: the literal
    /// textual form for primitives, the type or class name for containers.
    pub fn display_name(&self) -> String {
        match self {
            Value::Nil | Value::Bool(_) | Value::Number(_) | Value::String(_) => self.to_string(),
            Value::List(_) => "List".to_string(),
            Value::Map(_) => "Map".to_string(),
            Value::Instance(instance) => {
                let name = instance.class().name();
                if name.is_empty() {
                    "<Anonymous>".to_string()
                } else {
                    name.to_string()
                }
            }
        }
    }

    /// Returns true if the value is Nil.
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// JS-style truthiness: `Nil`, `false`, `0`, `NaN`, and `""` are falsy;
    /// lists, maps, and instances are always truthy.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use descry::value::Value;
    /// assert!(!Value::Number(0.0).is_truthy());
    /// assert!(!Value::String(String::new()).is_truthy());
    /// assert!(Value::List(vec![]).is_truthy());
    /// ```
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Nil => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => !s.is_empty(),
            Value::List(_) | Value::Map(_) | Value::Instance(_) => true,
        }
    }

    /// Returns true if the value is a keyed container (map or instance).
    pub fn is_object_like(&self) -> bool {
        matches!(self, Value::Map(_) | Value::Instance(_))
    }

    /// Field lookup on maps and instances. Missing fields and non-containers
    /// both report `None`.
    pub fn field(&self, name: &str) -> Option<&Value> {
        match self {
            Value::Map(map) => map.get(name),
            Value::Instance(instance) => instance.fields().get(name),
            _ => None,
        }
    }

    /// Own-enumerable entries of a keyed container, in the container's
    /// natural iteration order.
    pub fn entries(&self) -> Option<impl Iterator<Item = (&String, &Value)>> {
        match self {
            Value::Map(map) => Some(map.iter()),
            Value::Instance(instance) => Some(instance.fields().iter()),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => {
                if n.fract() == 0.0 && n.is_finite() {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            Value::String(s) => write!(f, "{}", s),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Map(map) => {
                write!(f, "{{")?;
                let mut first = true;
                for (key, value) in map.iter() {
                    if !first {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                    first = false;
                }
                write!(f, "}}")
            }
            Value::Instance(instance) => write!(f, "{}", instance.class().name()),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Nil,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(entries) => Value::Map(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}
