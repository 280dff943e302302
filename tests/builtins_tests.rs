// Builtin Registry and Contract Tests

use gold::builtins::{registry, ArgSpec, Attribute, BuiltinEntry, Registry};
use gold::object::{Object, ObjectType};
use pretty_assertions::assert_eq;

fn call(name: &str, args: &[Object]) -> Object {
    registry()
        .call(name, args)
        .expect("builtin registered")
}

fn ints(values: &[i64]) -> Object {
    Object::Array(values.iter().copied().map(Object::Integer).collect())
}

fn error_message(result: Object) -> String {
    match result {
        Object::Error(message) => message,
        other => panic!("expected an error, got {}", other),
    }
}

#[test]
fn registry_lists_builtins_in_definition_order() {
    let names: Vec<&str> = registry().names().collect();
    assert_eq!(names, vec!["len", "print", "first", "last", "push", "rest", "type"]);
}

#[test]
fn lookup_is_exact_and_case_sensitive() {
    assert!(registry().lookup("len").is_some());
    assert!(registry().lookup("Len").is_none());
    assert!(registry().lookup("le").is_none());
    assert!(registry().lookup("length").is_none());
    assert!(registry().call("missing", &[]).is_none());
}

#[test]
fn builtin_values_compare_by_name() {
    let first = registry().get("first");
    assert_eq!(first, registry().get("first"));
    assert_ne!(first, registry().get("last"));
    assert_eq!(first.map(|f| f.to_string()), Some("builtin function first".to_string()));
}

#[test]
fn contracts_are_aligned() {
    for entry in registry().iter() {
        let contract = entry.contract;
        assert_eq!(contract.arg_types().count(), contract.arity(), "{}", entry.name);
        assert_eq!(contract.arg_nullable().count(), contract.arity(), "{}", entry.name);
    }
}

#[test]
fn declared_contracts() {
    let len = registry().lookup("len").map(|e| e.contract);
    let len = len.expect("len registered");
    assert_eq!(len.return_type, ObjectType::Integer);
    assert!(!len.return_nullable);
    assert_eq!(len.arg_types().collect::<Vec<_>>(), vec![ObjectType::Any]);
    assert_eq!(len.arg_nullable().collect::<Vec<_>>(), vec![false]);

    let signatures: Vec<String> = registry().iter().map(ToString::to_string).collect();
    assert_eq!(
        signatures,
        vec![
            "len(ANY) -> INTEGER",
            "print(ANY?...) -> NULL?",
            "first(ARRAY) -> ANY?",
            "last(ARRAY) -> ANY?",
            "push(ARRAY, ANY) -> ARRAY",
            "rest(ARRAY) -> ARRAY?",
            "type(ANY?) -> STRING",
        ]
    );
}

#[test]
fn len_of_strings_and_arrays() {
    assert_eq!(call("len", &["foobar".into()]), Object::Integer(6));
    assert_eq!(call("len", &["".into()]), Object::Integer(0));
    assert_eq!(call("len", &[ints(&[1, 2])]), Object::Integer(2));
}

#[test]
fn len_rejects_other_types() {
    assert_eq!(
        error_message(call("len", &[Object::Integer(42)])),
        "argument to `len` not supported, got INTEGER"
    );
}

#[test]
fn len_checks_arity_and_null() {
    assert_eq!(
        error_message(call("len", &[])),
        "wrong number of arguments. got=0, want=1"
    );
    assert_eq!(
        error_message(call("len", &["a".into(), "b".into()])),
        "wrong number of arguments. got=2, want=1"
    );
    assert_eq!(
        error_message(call("len", &[Object::Null])),
        "argument 1 to `len` must not be null"
    );
}

#[test]
fn first_and_last() {
    assert_eq!(call("first", &[ints(&[1, 2, 3])]), Object::Integer(1));
    assert_eq!(call("last", &[ints(&[1, 2, 3])]), Object::Integer(3));
    assert_eq!(call("first", &[ints(&[])]), Object::Null);
    assert_eq!(call("last", &[ints(&[])]), Object::Null);
}

#[test]
fn first_and_last_require_an_array() {
    assert_eq!(
        error_message(call("first", &[Object::Integer(1)])),
        "argument to `first` must be ARRAY, got INTEGER"
    );
    assert_eq!(
        error_message(call("last", &["abc".into()])),
        "argument to `last` must be ARRAY, got STRING"
    );
    assert!(call("first", &[ints(&[1]), ints(&[2])]).is_error());
}

#[test]
fn push_returns_a_new_array() {
    let original = ints(&[1, 2]);
    let pushed = call("push", &[original.clone(), Object::Integer(3)]);

    assert_eq!(pushed, ints(&[1, 2, 3]));
    assert_eq!(original, ints(&[1, 2]));
}

#[test]
fn push_accepts_heterogeneous_values() {
    let pushed = call("push", &[ints(&[1]), "two".into()]);
    assert_eq!(pushed.to_string(), "[1, two]");
}

#[test]
fn push_validates_arguments() {
    assert_eq!(
        error_message(call("push", &[ints(&[1])])),
        "wrong number of arguments. got=1, want=2"
    );
    assert_eq!(
        error_message(call("push", &[Object::Integer(1), Object::Integer(2)])),
        "argument to `push` must be ARRAY, got INTEGER"
    );
    assert_eq!(
        error_message(call("push", &[ints(&[1]), Object::Null])),
        "argument 2 to `push` must not be null"
    );
}

#[test]
fn print_is_variadic() {
    assert_eq!(call("print", &[]), Object::Null);
    assert_eq!(call("print", &[Object::Null]), Object::Null);
    assert_eq!(
        call("print", &[Object::Integer(1), "two".into(), ints(&[3])]),
        Object::Null
    );
}

#[test]
fn rest_drops_the_first_element() {
    assert_eq!(call("rest", &[ints(&[1, 2, 3])]), ints(&[2, 3]));
    assert_eq!(call("rest", &[ints(&[1])]), ints(&[]));
    assert_eq!(call("rest", &[ints(&[])]), Object::Null);
}

#[test]
fn type_names_the_object_type() {
    assert_eq!(call("type", &[Object::Float(1.5)]), Object::from("FLOAT"));
    assert_eq!(call("type", &[Object::Null]), Object::from("NULL"));
    assert_eq!(call("type", &[ints(&[])]), Object::from("ARRAY"));
}

fn always_string(_args: &[Object]) -> Object {
    Object::String("oops".to_string())
}

fn echo(args: &[Object]) -> Object {
    args.first().cloned().unwrap_or(Object::Null)
}

#[test]
fn dispatcher_rejects_a_broken_return() {
    let entry = BuiltinEntry::new(
        "broken",
        Attribute {
            return_type: ObjectType::Integer,
            return_nullable: false,
            args: &[],
            rest: None,
        },
        always_string,
    );
    assert_eq!(
        error_message(entry.call(&[])),
        "builtin `broken` returned STRING, declared INTEGER"
    );
}

#[test]
fn variadic_with_fixed_parameters() {
    const STRING: ArgSpec = ArgSpec::required(ObjectType::String);
    const INTEGER: ArgSpec = ArgSpec::required(ObjectType::Integer);
    let entry = BuiltinEntry::new(
        "format",
        Attribute {
            return_type: ObjectType::Any,
            return_nullable: true,
            args: &[STRING],
            rest: Some(INTEGER),
        },
        echo,
    );

    assert_eq!(
        error_message(entry.call(&[])),
        "wrong number of arguments. got=0, want=at least 1"
    );
    assert_eq!(entry.call(&["x".into()]), Object::from("x"));
    assert_eq!(entry.call(&["x".into(), Object::Integer(1)]), Object::from("x"));
    assert_eq!(
        error_message(entry.call(&["x".into(), Object::Integer(1), "y".into()])),
        "argument to `format` must be INTEGER, got STRING"
    );
}

#[test]
#[should_panic(expected = "registered twice")]
fn duplicate_names_are_a_construction_error() {
    let contract = Attribute {
        return_type: ObjectType::Any,
        return_nullable: true,
        args: &[],
        rest: None,
    };
    Registry::new(vec![
        BuiltinEntry::new("dup", contract, echo),
        BuiltinEntry::new("dup", contract, echo),
    ]);
}

#[test]
fn registry_is_shared_across_threads() {
    let handles: Vec<_> = (0..4)
        .map(|_| std::thread::spawn(|| registry().lookup("push").map(|e| e.name)))
        .collect();
    for handle in handles {
        assert_eq!(handle.join().ok().flatten(), Some("push"));
    }
}
