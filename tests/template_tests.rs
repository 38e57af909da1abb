//! End-to-end template resolution: literal copy-through, span substitution,
//! stringification, and failure modes.

use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};
use templjs::{Bindings, TemplateError, resolve_template};

fn bindings_from(value: Value) -> Bindings {
    value.as_object().cloned().unwrap_or_default()
}

#[rstest]
#[case::simple_substitution(
    json!({"user": {"name": "Priya", "age": 31}}),
    "{{ user.name }} is {{ user.age }} years old.",
    "Priya is 31 years old."
)]
#[case::arithmetic(
    json!({"user": {"age": 31}}),
    "Next year, you will be {{ user.age + 1 }}.",
    "Next year, you will be 32."
)]
#[case::nested_access(
    json!({"user": {"profile": {"nickname": "Blue"}}}),
    "Your nickname is {{ user.profile.nickname }}.",
    "Your nickname is Blue."
)]
#[case::array_access(
    json!({"favorites": ["pizza", "ice cream"]}),
    "I love {{ favorites[0] }} and {{ favorites[1] }}.",
    "I love pizza and ice cream."
)]
#[case::no_bindings(json!({}), "The sum of 5 and 3 is {{ 5 + 3 }}.", "The sum of 5 and 3 is 8.")]
#[case::ternary_greeting(
    json!({"user": {"name": "Alice"}, "hour": 9}),
    "Good {{ hour < 12 ? 'morning' : 'afternoon' }}, {{ user.name }}!",
    "Good morning, Alice!"
)]
#[case::map_and_join(
    json!({"users": [{"name": "Alice"}, {"name": "Bob"}]}),
    "Users list: {{ users.map(u => u.name).join(', ') }}",
    "Users list: Alice, Bob"
)]
#[case::adjacent_spans(json!({}), "{{ 1 }}{{ 2 }}", "12")]
#[case::boolean_result(json!({}), "{{ 1 < 2 }}", "true")]
#[case::float_result(json!({}), "{{ 1 / 4 }}", "0.25")]
#[case::integral_division(json!({}), "{{ 10 / 5 }}", "2")]
#[case::array_result(json!({"list": [1, 2, 3]}), "{{ list }}", "[1,2,3]")]
#[case::object_result(
    json!({"flags": {"active": true}}),
    "flags: {{ flags }}",
    "flags: {\"active\":true}"
)]
fn resolves_templates(#[case] bindings: Value, #[case] template: &str, #[case] expected: &str) {
    let bindings = bindings_from(bindings);
    let output = resolve_template(&bindings, template).unwrap();
    assert_eq!(output, expected);
}

#[rstest]
#[case::empty("")]
#[case::plain("plain text, no spans at all")]
#[case::single_braces("single { brace and } brace survive")]
#[case::closers_only("}} closers before any opener are literal text")]
fn delimiter_free_templates_pass_through(#[case] template: &str) {
    let output = resolve_template(&Bindings::new(), template).unwrap();
    assert_eq!(output, template);
}

#[test]
fn unmatched_delimiter_fails_with_no_output() {
    let mut bindings = Bindings::new();
    bindings.insert("user".into(), json!({}));

    let err = resolve_template(&bindings, "{{ user.name is unmatched.").unwrap_err();
    assert!(
        matches!(err, TemplateError::UnmatchedDelimiter { .. }),
        "unexpected error: {err:?}"
    );
}

#[test]
fn unmatched_delimiter_reports_the_opener_position() {
    let err = resolve_template(&Bindings::new(), "Hello {{ name").unwrap_err();
    match err {
        TemplateError::UnmatchedDelimiter { position } => assert_eq!(position, 6),
        other => panic!("expected an unmatched delimiter error, got: {other:?}"),
    }
}

#[test]
fn one_failing_span_aborts_the_whole_template() {
    let err = resolve_template(
        &Bindings::new(),
        "fine: {{ 1 + 1 }}, broken: {{ nothingHere }}",
    )
    .unwrap_err();
    assert!(
        matches!(err, TemplateError::Evaluation { .. }),
        "unexpected error: {err:?}"
    );
}

#[test]
fn spans_see_the_same_bindings_in_order() {
    let mut bindings = Bindings::new();
    bindings.insert("n".into(), json!(3));

    // Each span evaluates in its own context against the same snapshot, so
    // a mutation attempted by one span is invisible to the next.
    let output = resolve_template(&bindings, "{{ n = n * 10 }} then {{ n }}").unwrap();
    assert_eq!(output, "30 then 3");
    assert_eq!(bindings.get("n"), Some(&json!(3)));
}
