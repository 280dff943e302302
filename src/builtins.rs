//! Builtin functions and the contracts that describe how they may be called.
//!
//! Every builtin carries an [`Attribute`]. Calls go through
//! [`BuiltinEntry::call`], which checks arity, nullability and argument types
//! against the contract before the implementation runs, so implementations
//! can take their arguments as given.

use crate::object::{Object, ObjectType, NULL};
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

pub type BuiltinFn = fn(&[Object]) -> Object;

/// Expected type of one argument and whether it may be null.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArgSpec {
    pub ty: ObjectType,
    pub nullable: bool,
}

impl ArgSpec {
    pub const fn required(ty: ObjectType) -> Self {
        Self { ty, nullable: false }
    }

    pub const fn nullable(ty: ObjectType) -> Self {
        Self { ty, nullable: true }
    }

    fn admits(&self, value: &Object) -> bool {
        match value {
            Object::Null => self.nullable,
            other => self.ty.matches(other.type_of()),
        }
    }
}

impl fmt::Display for ArgSpec {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.ty)?;
        if self.nullable {
            write!(f, "?")?;
        }
        Ok(())
    }
}

/// Call contract of a builtin.
///
/// `args` holds one spec per fixed parameter, in the order the
/// implementation reads them. `rest`, when present, applies to every
/// argument past the fixed ones and makes the builtin variadic.
#[derive(Debug, Clone, Copy)]
pub struct Attribute {
    pub return_type: ObjectType,
    pub return_nullable: bool,
    pub args: &'static [ArgSpec],
    pub rest: Option<ArgSpec>,
}

impl Attribute {
    /// Number of fixed parameters.
    pub fn arity(&self) -> usize {
        self.args.len()
    }

    pub fn is_variadic(&self) -> bool {
        self.rest.is_some()
    }

    pub fn arg_types(&self) -> impl Iterator<Item = ObjectType> + '_ {
        self.args.iter().map(|spec| spec.ty)
    }

    pub fn arg_nullable(&self) -> impl Iterator<Item = bool> + '_ {
        self.args.iter().map(|spec| spec.nullable)
    }

    /// Spec governing the argument at `index`, if any argument may sit there.
    pub fn spec_for(&self, index: usize) -> Option<ArgSpec> {
        self.args.get(index).copied().or(self.rest)
    }

    /// Validates a call site. The error is the message of the `Error` object
    /// handed back to the caller.
    pub fn check_args(&self, name: &str, args: &[Object]) -> Result<(), String> {
        let arity_ok = if self.is_variadic() {
            args.len() >= self.arity()
        } else {
            args.len() == self.arity()
        };
        if !arity_ok {
            let at_least = if self.is_variadic() { "at least " } else { "" };
            return Err(format!(
                "wrong number of arguments. got={}, want={}{}",
                args.len(),
                at_least,
                self.arity()
            ));
        }

        for (index, arg) in args.iter().enumerate() {
            let Some(spec) = self.spec_for(index) else {
                continue;
            };
            if spec.admits(arg) {
                continue;
            }
            if arg.is_null() {
                return Err(format!("argument {} to `{}` must not be null", index + 1, name));
            }
            return Err(format!(
                "argument to `{}` must be {}, got {}",
                name,
                spec.ty,
                arg.type_of()
            ));
        }

        Ok(())
    }

    /// Whether `result` is something this builtin may return. Errors are
    /// always admissible.
    pub fn admits_return(&self, result: &Object) -> bool {
        match result {
            Object::Error(_) => true,
            Object::Null => self.return_nullable || self.return_type == ObjectType::Null,
            other => self.return_type.matches(other.type_of()),
        }
    }
}

pub struct BuiltinEntry {
    pub name: &'static str,
    pub contract: Attribute,
    function: BuiltinFn,
}

impl BuiltinEntry {
    pub const fn new(name: &'static str, contract: Attribute, function: BuiltinFn) -> Self {
        Self {
            name,
            contract,
            function,
        }
    }

    /// Validates `args` against the contract, then invokes the builtin.
    pub fn call(&self, args: &[Object]) -> Object {
        if let Err(message) = self.contract.check_args(self.name, args) {
            tracing::debug!(builtin = self.name, %message, "call rejected by contract");
            return Object::error(message);
        }

        let result = (self.function)(args);
        if !self.contract.admits_return(&result) {
            tracing::error!(builtin = self.name, got = %result.type_of(), "builtin broke its return contract");
            return Object::error(format!(
                "builtin `{}` returned {}, declared {}",
                self.name,
                result.type_of(),
                self.contract.return_type
            ));
        }
        result
    }
}

impl fmt::Debug for BuiltinEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("BuiltinEntry")
            .field("name", &self.name)
            .field("contract", &self.contract)
            .finish_non_exhaustive()
    }
}

/// Renders the signature, e.g. `push(ARRAY, ANY) -> ARRAY`.
impl fmt::Display for BuiltinEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, spec) in self.contract.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", spec)?;
        }
        if let Some(rest) = self.contract.rest {
            if !self.contract.args.is_empty() {
                write!(f, ", ")?;
            }
            write!(f, "{}...", rest)?;
        }
        write!(f, ") -> {}", self.contract.return_type)?;
        if self.contract.return_nullable {
            write!(f, "?")?;
        }
        Ok(())
    }
}

/// Name-indexed set of builtins, kept in definition order.
pub struct Registry {
    entries: Vec<BuiltinEntry>,
    index: HashMap<&'static str, usize>,
}

impl Registry {
    /// # Panics
    /// On a duplicate name. The table is fixed at compile time, so this is a
    /// programming error rather than a runtime condition.
    pub fn new(entries: Vec<BuiltinEntry>) -> Self {
        let mut index = HashMap::with_capacity(entries.len());
        for (position, entry) in entries.iter().enumerate() {
            let previous = index.insert(entry.name, position);
            assert!(previous.is_none(), "builtin `{}` registered twice", entry.name);
        }
        Self { entries, index }
    }

    /// Exact, case-sensitive lookup.
    pub fn lookup(&self, name: &str) -> Option<&BuiltinEntry> {
        self.index.get(name).map(|&position| &self.entries[position])
    }

    /// The builtin as a runtime value.
    pub fn get(&'static self, name: &str) -> Option<Object> {
        self.lookup(name).map(Object::Builtin)
    }

    /// Looks up `name` and calls it; `None` when no such builtin exists.
    pub fn call(&self, name: &str, args: &[Object]) -> Option<Object> {
        self.lookup(name).map(|entry| entry.call(args))
    }

    pub fn iter(&self) -> impl Iterator<Item = &BuiltinEntry> {
        self.entries.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|entry| entry.name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The process-wide registry, built on first use and never changed after.
pub fn registry() -> &'static Registry {
    static REGISTRY: OnceLock<Registry> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let registry = Registry::new(standard_builtins());
        tracing::debug!(count = registry.len(), "builtin registry initialised");
        registry
    })
}

const ANY: ArgSpec = ArgSpec::required(ObjectType::Any);
const ANY_OR_NULL: ArgSpec = ArgSpec::nullable(ObjectType::Any);
const ARRAY: ArgSpec = ArgSpec::required(ObjectType::Array);

fn standard_builtins() -> Vec<BuiltinEntry> {
    vec![
        BuiltinEntry::new(
            "len",
            Attribute {
                return_type: ObjectType::Integer,
                return_nullable: false,
                args: &[ANY],
                rest: None,
            },
            builtin_len,
        ),
        BuiltinEntry::new(
            "print",
            Attribute {
                return_type: ObjectType::Null,
                return_nullable: true,
                args: &[],
                rest: Some(ANY_OR_NULL),
            },
            builtin_print,
        ),
        BuiltinEntry::new(
            "first",
            Attribute {
                return_type: ObjectType::Any,
                return_nullable: true,
                args: &[ARRAY],
                rest: None,
            },
            builtin_first,
        ),
        BuiltinEntry::new(
            "last",
            Attribute {
                return_type: ObjectType::Any,
                return_nullable: true,
                args: &[ARRAY],
                rest: None,
            },
            builtin_last,
        ),
        BuiltinEntry::new(
            "push",
            Attribute {
                return_type: ObjectType::Array,
                return_nullable: false,
                args: &[ARRAY, ANY],
                rest: None,
            },
            builtin_push,
        ),
        BuiltinEntry::new(
            "rest",
            Attribute {
                return_type: ObjectType::Array,
                return_nullable: true,
                args: &[ARRAY],
                rest: None,
            },
            builtin_rest,
        ),
        BuiltinEntry::new(
            "type",
            Attribute {
                return_type: ObjectType::String,
                return_nullable: false,
                args: &[ANY_OR_NULL],
                rest: None,
            },
            builtin_type,
        ),
    ]
}

// Implementations below only run after `BuiltinEntry::call` has checked
// their arguments against the contract.

fn builtin_len(args: &[Object]) -> Object {
    match &args[0] {
        Object::Array(elements) => Object::Integer(elements.len() as i64),
        Object::String(s) => Object::Integer(s.chars().count() as i64),
        other => Object::error(format!(
            "argument to `len` not supported, got {}",
            other.type_of()
        )),
    }
}

fn builtin_print(args: &[Object]) -> Object {
    for arg in args {
        println!("{}", arg);
    }
    NULL
}

fn builtin_first(args: &[Object]) -> Object {
    args[0]
        .as_array()
        .and_then(|elements| elements.first())
        .cloned()
        .unwrap_or(NULL)
}

fn builtin_last(args: &[Object]) -> Object {
    args[0]
        .as_array()
        .and_then(|elements| elements.last())
        .cloned()
        .unwrap_or(NULL)
}

fn builtin_rest(args: &[Object]) -> Object {
    match args[0].as_array() {
        Some([_, tail @ ..]) => Object::Array(tail.to_vec()),
        _ => NULL,
    }
}

fn builtin_push(args: &[Object]) -> Object {
    let mut elements = args[0].as_array().map(<[Object]>::to_vec).unwrap_or_default();
    elements.push(args[1].clone());
    Object::Array(elements)
}

fn builtin_type(args: &[Object]) -> Object {
    Object::String(args[0].type_of().name().to_string())
}
