use descry::descriptor::{
    any, any_of, array_of, boolean, class, number, object_of, optional, predicate, string, tag,
};
use descry::validator::{validate, Mismatch};
use descry::value::{ClassSpec, Value};
use descry::shape;
use serde_json::json;

fn value(json: serde_json::Value) -> Value {
    Value::from(json)
}

// ---
// Tag and built-in checks
// ---

#[test]
fn tag_compares_the_dynamic_type_name() {
    assert_eq!(validate("x", &Value::from("hi"), &tag("string")), None);
    assert_eq!(validate("x", &Value::from(1.0), &tag("number")), None);

    let mismatch = validate("x", &Value::from(1.0), &tag("string")).unwrap();
    assert_eq!(mismatch.message(), "expected `x` to be string, got `1`");
}

#[test]
fn builtin_number_produces_the_canonical_message() {
    let mismatch = validate("i", &Value::from("asd"), &number()).unwrap();
    assert_eq!(mismatch.path(), "i");
    assert_eq!(mismatch.expected(), &number());
    assert_eq!(mismatch.found(), &Value::from("asd"));
    assert_eq!(mismatch.message(), "expected `i` to be `Number`, got `asd`");
}

#[test]
fn builtins_accept_their_own_primitives() {
    assert_eq!(validate("x", &Value::from("hi"), &string()), None);
    assert_eq!(validate("x", &Value::from(5.0), &number()), None);
    assert_eq!(validate("x", &Value::from(true), &boolean()), None);
    assert_eq!(
        validate("x", &value(json!({"a": 1})), &descry::descriptor::object()),
        None
    );
    assert_eq!(
        validate("x", &value(json!([1, 2])), &descry::descriptor::array()),
        None
    );
}

// ---
// Class checks
// ---

#[test]
fn class_check_accepts_instances_and_subclasses() {
    let animal = ClassSpec::new("Animal");
    let dog = ClassSpec::subclass(&animal, "Dog");

    let rex = Value::instance(&dog, [("name", Value::from("Rex"))]);
    assert_eq!(validate("pet", &rex, &class(&dog)), None);
    assert_eq!(validate("pet", &rex, &class(&animal)), None);

    let cat = ClassSpec::new("Cat");
    let mismatch = validate("pet", &rex, &class(&cat)).unwrap();
    assert_eq!(mismatch.message(), "expected `pet` to be Cat, got `Dog`");
}

#[test]
fn class_check_rejects_plain_values_with_their_type_name() {
    let widget = ClassSpec::new("Widget");
    let mismatch = validate("w", &value(json!({"a": 1})), &class(&widget)).unwrap();
    assert_eq!(mismatch.message(), "expected `w` to be Widget, got `Map`");
}

// ---
// Shape
// ---

#[test]
fn nested_shape_reports_the_inner_path() {
    let person = shape! {
        "name" => string(),
        "info" => shape! { "age" => number() },
    };
    let ok = value(json!({"name": "hi", "info": {"age": 50}}));
    assert_eq!(validate("arg0", &ok, &person), None);

    let bad = value(json!({"name": "hi", "info": {"age": "50"}}));
    let mismatch = validate("arg0", &bad, &person).unwrap();
    assert_eq!(mismatch.path(), "arg0.info.age");
    assert_eq!(mismatch.expected(), &number());
    assert_eq!(mismatch.found(), &Value::from("50"));
    assert_eq!(
        mismatch.message(),
        "expected `arg0.info.age` to be `Number`, got `50`"
    );
}

#[test]
fn shape_reports_the_first_declared_field_when_several_fail() {
    let both = shape! { "a" => number(), "b" => string() };
    let bad = value(json!({"a": "x", "b": 1}));
    let mismatch = validate("v", &bad, &both).unwrap();
    assert_eq!(mismatch.path(), "v.a");
}

#[test]
fn shape_treats_a_missing_field_as_nil() {
    let person = shape! { "name" => string() };
    let mismatch = validate("p", &value(json!({})), &person).unwrap();
    assert_eq!(mismatch.message(), "expected `p.name` to be `String`, got `nil`");
}

#[test]
fn shape_ignores_undeclared_fields() {
    let person = shape! { "name" => string() };
    let extra = value(json!({"name": "hi", "nickname": 5}));
    assert_eq!(validate("p", &extra, &person), None);
}

#[test]
fn shape_rejects_non_objects_outright() {
    let person = shape! { "name" => string() };
    let mismatch = validate("p", &Value::from(5.0), &person).unwrap();
    assert_eq!(
        mismatch.message(),
        "expected `p` to be a duck-typed object, got `5`"
    );
}

#[test]
fn shape_accepts_instance_fields() {
    let user = ClassSpec::new("User");
    let person = shape! { "name" => string() };
    let instance = Value::instance(&user, [("name", Value::from("hi"))]);
    assert_eq!(validate("p", &instance, &person), None);
}

// ---
// ArrayOf / ObjectOf
// ---

#[test]
fn array_of_reports_the_first_failing_index() {
    let numbers = array_of(number());
    let mismatch = validate("i", &value(json!([1, 2, "x"])), &numbers).unwrap();
    assert_eq!(mismatch.path(), "i[2]");
    assert_eq!(mismatch.expected(), &number());
    assert_eq!(mismatch.found(), &Value::from("x"));
}

#[test]
fn array_of_rejects_non_sequences_with_its_own_label() {
    let numbers = array_of(number());
    let mismatch = validate("i", &Value::from("nope"), &numbers).unwrap();
    assert_eq!(
        mismatch.message(),
        "expected `i` to be array of `Number`, got `nope`"
    );
}

#[test]
fn array_of_accepts_the_empty_sequence() {
    assert_eq!(validate("i", &value(json!([])), &array_of(number())), None);
}

#[test]
fn array_of_shapes_composes() {
    let people = array_of(shape! { "name" => string(), "age" => number() });
    let ok = value(json!([{"name": "a", "age": 1}, {"name": "b", "age": 2}]));
    assert_eq!(validate("xs", &ok, &people), None);

    let bad = value(json!([{"name": "a", "age": 1}, {"name": "b", "age": "2"}]));
    let mismatch = validate("xs", &bad, &people).unwrap();
    assert_eq!(mismatch.path(), "xs[1].age");
}

#[test]
fn object_of_checks_every_member_value() {
    let scores = object_of(number());
    assert_eq!(validate("s", &value(json!({"a": 1, "b": 2})), &scores), None);

    let mismatch = validate("s", &value(json!({"a": "x"})), &scores).unwrap();
    assert_eq!(mismatch.path(), "s.a");

    let mismatch = validate("s", &Value::from(5.0), &scores).unwrap();
    assert_eq!(
        mismatch.message(),
        "expected `s` to be object of `Number`, got `5`"
    );
}

// ---
// AnyOf
// ---

#[test]
fn any_of_passes_on_the_first_matching_alternative() {
    let either = any_of([string(), boolean()]).unwrap();
    assert_eq!(validate("x", &Value::from("ok"), &either), None);
    assert_eq!(validate("x", &Value::from(true), &either), None);
}

#[test]
fn any_of_failure_reports_the_joined_union_label() {
    let either = any_of([string(), boolean()]).unwrap();
    let mismatch = validate("x", &Value::from(5.0), &either).unwrap();
    assert_eq!(mismatch.expected(), &either);
    assert_eq!(
        mismatch.message(),
        "expected `x` to be any of (`String`, `Boolean`), got `5`"
    );
}

// ---
// Optional
// ---

#[test]
fn optional_passes_nil_and_missing_alike() {
    let maybe = optional(number());
    assert_eq!(validate("x", &Value::Nil, &maybe), None);

    let person = shape! { "age" => optional(number()) };
    assert_eq!(validate("p", &value(json!({})), &person), None);
    assert_eq!(validate("p", &value(json!({"age": null})), &person), None);
}

#[test]
fn optional_delegates_to_the_inner_descriptor_for_present_values() {
    let maybe = optional(number());
    let direct = validate("x", &Value::from("x"), &number()).unwrap();
    let through = validate("x", &Value::from("x"), &maybe).unwrap();
    assert_eq!(direct, through);
}

// ---
// Any: the documented falsy quirk
// ---

#[test]
fn any_accepts_truthy_values() {
    assert_eq!(validate("x", &Value::from("hi"), &any()), None);
    assert_eq!(validate("x", &Value::from(1.0), &any()), None);
    assert_eq!(validate("x", &value(json!([])), &any()), None);
    assert_eq!(validate("x", &value(json!({})), &any()), None);
}

#[test]
fn any_rejects_falsy_values_including_zero_empty_string_and_false() {
    // Long-standing quirk: falsy-but-valid values fail the wildcard check.
    for falsy in [
        Value::Nil,
        Value::from(0.0),
        Value::from(""),
        Value::from(false),
    ] {
        let mismatch = validate("x", &falsy, &any()).unwrap();
        assert_eq!(
            mismatch.message(),
            format!("expected `x` to be any value, got `{}`", falsy)
        );
    }
}

// ---
// Predicate escape hatch
// ---

#[test]
fn predicate_can_implement_arbitrary_checks() {
    let even = predicate("an even number", |path, value| match value {
        Value::Number(n) if n % 2.0 == 0.0 => None,
        _ => Some(Mismatch::new(path, tag("an even number"), value.clone())),
    });

    assert_eq!(validate("n", &Value::from(4.0), &even), None);
    let mismatch = validate("n", &Value::from(3.0), &even).unwrap();
    assert_eq!(mismatch.message(), "expected `n` to be an even number, got `3`");
}

// ---
// Purity
// ---

#[test]
fn validation_is_idempotent() {
    let person = shape! { "name" => string(), "info" => shape! { "age" => number() } };
    let bad = value(json!({"name": "hi", "info": {"age": "50"}}));

    let first = validate("arg0", &bad, &person);
    let second = validate("arg0", &bad, &person);
    assert_eq!(first, second);

    let ok = value(json!({"name": "hi", "info": {"age": 50}}));
    assert_eq!(validate("arg0", &ok, &person), validate("arg0", &ok, &person));
}
