use crate::builtins::BuiltinEntry;
use crate::token::BindingType;
use std::collections::BTreeMap;
use std::fmt;

/// Type identity of an [`Object`]. `Any` is the wildcard used by binding and
/// builtin contracts; no value has type `Any`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    Integer,
    Float,
    String,
    Boolean,
    Null,
    Array,
    Dictionary,
    Function,
    Builtin,
    Error,
    Any,
}

impl ObjectType {
    pub fn name(self) -> &'static str {
        match self {
            ObjectType::Integer => "INTEGER",
            ObjectType::Float => "FLOAT",
            ObjectType::String => "STRING",
            ObjectType::Boolean => "BOOLEAN",
            ObjectType::Null => "NULL",
            ObjectType::Array => "ARRAY",
            ObjectType::Dictionary => "DICTIONARY",
            ObjectType::Function => "FUNCTION",
            ObjectType::Builtin => "BUILTIN",
            ObjectType::Error => "ERROR",
            ObjectType::Any => "ANY",
        }
    }

    /// Whether a value of type `actual` satisfies this expected type.
    pub fn matches(self, actual: ObjectType) -> bool {
        self == ObjectType::Any || self == actual
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Dictionary key. Only integers, strings and booleans are hashable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HashKey {
    Integer(i64),
    Boolean(bool),
    String(String),
}

impl HashKey {
    pub fn to_object(&self) -> Object {
        match self {
            HashKey::Integer(n) => Object::Integer(*n),
            HashKey::Boolean(b) => Object::Boolean(*b),
            HashKey::String(s) => Object::String(s.clone()),
        }
    }
}

impl fmt::Display for HashKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            HashKey::Integer(n) => write!(f, "{}", n),
            HashKey::Boolean(b) => write!(f, "{}", b),
            HashKey::String(s) => write!(f, "\"{}\"", s),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub binding: BindingType,
}

/// A user-defined function as the evaluator hands it around. The body is
/// kept as source text; executing it is the evaluator's business.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub parameters: Vec<Parameter>,
    pub body: String,
}

#[derive(Debug, Clone)]
pub enum Object {
    Integer(i64),
    Float(f64),
    String(String),
    Boolean(bool),
    Null,
    Array(Vec<Object>),
    Dictionary(BTreeMap<HashKey, Object>),
    Function(Function),
    Builtin(&'static BuiltinEntry),
    Error(String),
}

/// The shared null value.
pub const NULL: Object = Object::Null;

impl Object {
    pub fn error(message: impl Into<String>) -> Self {
        Object::Error(message.into())
    }

    /// Builds a dictionary, or an `Error` naming the first unhashable key.
    /// Later pairs replace earlier ones with an equal key.
    pub fn dictionary(pairs: impl IntoIterator<Item = (Object, Object)>) -> Self {
        let mut map = BTreeMap::new();
        for (key, value) in pairs {
            match key.hash_key() {
                Some(hash_key) => {
                    map.insert(hash_key, value);
                }
                None => return Object::error(format!("unusable as dictionary key: {}", key.type_of())),
            }
        }
        Object::Dictionary(map)
    }

    pub fn type_of(&self) -> ObjectType {
        match self {
            Object::Integer(_) => ObjectType::Integer,
            Object::Float(_) => ObjectType::Float,
            Object::String(_) => ObjectType::String,
            Object::Boolean(_) => ObjectType::Boolean,
            Object::Null => ObjectType::Null,
            Object::Array(_) => ObjectType::Array,
            Object::Dictionary(_) => ObjectType::Dictionary,
            Object::Function(_) => ObjectType::Function,
            Object::Builtin(_) => ObjectType::Builtin,
            Object::Error(_) => ObjectType::Error,
        }
    }

    pub fn hash_key(&self) -> Option<HashKey> {
        match self {
            Object::Integer(n) => Some(HashKey::Integer(*n)),
            Object::Boolean(b) => Some(HashKey::Boolean(*b)),
            Object::String(s) => Some(HashKey::String(s.clone())),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Object]> {
        match self {
            Object::Array(elements) => Some(elements),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Object::Null)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Object::Error(_))
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Object::Null => false,
            Object::Boolean(b) => *b,
            Object::Integer(n) => *n != 0,
            Object::Float(n) => *n != 0.0,
            Object::String(s) => !s.is_empty(),
            Object::Array(a) => !a.is_empty(),
            Object::Dictionary(d) => !d.is_empty(),
            Object::Function(_) | Object::Builtin(_) => true,
            Object::Error(_) => false,
        }
    }

    /// Human-readable rendering, same as `Display`.
    pub fn inspect(&self) -> String {
        self.to_string()
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Object::Integer(l), Object::Integer(r)) => l == r,
            (Object::Float(l), Object::Float(r)) => l == r,
            (Object::Integer(l), Object::Float(r)) => integer_equals_float(*l, *r),
            (Object::Float(l), Object::Integer(r)) => integer_equals_float(*r, *l),
            (Object::String(l), Object::String(r)) => l == r,
            (Object::Boolean(l), Object::Boolean(r)) => l == r,
            (Object::Null, Object::Null) => true,
            (Object::Array(l), Object::Array(r)) => l == r,
            (Object::Dictionary(l), Object::Dictionary(r)) => l == r,
            (Object::Function(l), Object::Function(r)) => l == r,
            (Object::Builtin(l), Object::Builtin(r)) => l.name == r.name,
            (Object::Error(l), Object::Error(r)) => l == r,
            _ => false,
        }
    }
}

/// Exact comparison: the float must be integral and inside the `i64` range.
fn integer_equals_float(integer: i64, float: f64) -> bool {
    // 2^63, the first float past i64::MAX.
    const UPPER: f64 = 9_223_372_036_854_775_808.0;
    float.fract() == 0.0 && float >= i64::MIN as f64 && float < UPPER && float as i64 == integer
}

impl From<i64> for Object {
    fn from(value: i64) -> Self {
        Object::Integer(value)
    }
}

impl From<f64> for Object {
    fn from(value: f64) -> Self {
        Object::Float(value)
    }
}

impl From<bool> for Object {
    fn from(value: bool) -> Self {
        Object::Boolean(value)
    }
}

impl From<&str> for Object {
    fn from(value: &str) -> Self {
        Object::String(value.to_string())
    }
}

impl From<Vec<Object>> for Object {
    fn from(elements: Vec<Object>) -> Self {
        Object::Array(elements)
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Object::Integer(n) => write!(f, "{}", n),
            Object::Float(n) => {
                // Always show at least one decimal place for floats
                if n.fract() == 0.0 && n.is_finite() {
                    write!(f, "{:.1}", n)
                } else {
                    write!(f, "{}", n)
                }
            }
            Object::String(s) => write!(f, "{}", s),
            Object::Boolean(b) => write!(f, "{}", b),
            Object::Null => write!(f, "null"),
            Object::Array(elements) => {
                write!(f, "[")?;
                for (i, item) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Object::Dictionary(pairs) => {
                write!(f, "{{")?;
                for (i, (key, value)) in pairs.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                write!(f, "}}")
            }
            Object::Function(function) => {
                write!(f, "fn(")?;
                for (i, param) in function.parameters.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{} {}", param.binding, param.name)?;
                }
                write!(f, ") {{\n{}\n}}", function.body)
            }
            Object::Builtin(entry) => write!(f, "builtin function {}", entry.name),
            Object::Error(message) => write!(f, "ERROR: {}", message),
        }
    }
}
