use mathjson::{generate, parse, Expression, GenerateOptions, MetadataKey, NumberLiteral};
use num_rational::Rational64;

fn compact(expr: &Expression) -> String {
    generate(expr, &GenerateOptions::default())
}

fn expanded(expr: &Expression) -> String {
    generate(expr, &GenerateOptions::new().compact(false))
}

#[test]
fn end_to_end_examples() {
    assert_eq!(compact(&parse("[\"Add\", 1, 2]").unwrap()), "[\"Add\",1,2]");
    assert_eq!(
        compact(&parse("[\"Multiply\",[\"Add\",1,2],3]").unwrap()),
        "[\"Multiply\",[\"Add\",1,2],3]"
    );
}

#[test]
fn compact_forms() {
    let expr = Expression::function(
        "Equal",
        vec![Expression::symbol("x"), Expression::string("text"), Expression::number(2.5)],
    );
    assert_eq!(compact(&expr), r#"["Equal","x","'text'",2.5]"#);
}

#[test]
fn non_compact_uses_object_forms() {
    let expr = Expression::function(
        "Equal",
        vec![Expression::symbol("x"), Expression::string("text"), Expression::number(7)],
    );
    assert_eq!(
        expanded(&expr),
        r#"["Equal",{"sym":"x"},{"str":"text"},{"num":"7"}]"#
    );
    assert_eq!(expanded(&Expression::number(1.0)), r#"{"num":"1.0"}"#);
}

#[test]
fn raw_text_is_emitted_verbatim() {
    let n = Expression::Number(NumberLiteral::with_raw(3.14, "3.14159265358979323846"));
    let text = compact(&n);
    assert!(text.contains("\"3.14159265358979323846\""));
    assert_eq!(text, r#"{"num":"3.14159265358979323846"}"#);
    assert_eq!(expanded(&n), text);
}

#[test]
fn rationals_and_special_values() {
    assert_eq!(compact(&Expression::number(Rational64::new(37, 30))), r#"{"num":"1.2(3)"}"#);
    assert_eq!(compact(&Expression::number(Rational64::new(-1, 7))), r#"{"num":"-0.(142857)"}"#);
    assert_eq!(compact(&Expression::number(Rational64::new(3, 4))), r#"{"num":"0.75"}"#);
    assert_eq!(compact(&Expression::number(Rational64::new(8, 4))), r#"{"num":"2"}"#);
    assert_eq!(compact(&Expression::number(f64::NAN)), r#"{"num":"NaN"}"#);
    assert_eq!(compact(&Expression::number(f64::NEG_INFINITY)), r#"{"num":"-Infinity"}"#);
}

#[test]
fn metadata_forces_object_form() {
    let n = Expression::number(5).with_metadata(MetadataKey::Comment, "five");
    assert_eq!(compact(&n), r#"{"num":"5","comment":"five"}"#);

    let s = Expression::string("hi").with_metadata(MetadataKey::Documentation, "greeting");
    assert_eq!(compact(&s), r#"{"str":"hi","documentation":"greeting"}"#);

    let f = Expression::function("Add", vec![Expression::number(1)])
        .with_metadata(MetadataKey::Latex, "+1");
    assert_eq!(compact(&f), r#"{"fn":["Add",1],"latex":"+1"}"#);
}

#[test]
fn function_arrays_stay_arrays_without_metadata() {
    let f = Expression::function("Add", vec![Expression::symbol("x")]);
    assert_eq!(expanded(&f), r#"["Add",{"sym":"x"}]"#);
}

#[test]
fn pretty_changes_layout_only() {
    let expr = parse("[\"Add\", 1, {\"num\": \"NaN\"}]").unwrap();
    let pretty = generate(&expr, &GenerateOptions::new().pretty(true));
    assert_eq!(pretty, "[\n  \"Add\",\n  1,\n  {\n    \"num\": \"NaN\"\n  }\n]");
    assert_eq!(parse(&pretty).unwrap(), expr);
    let flat: serde_json::Value = serde_json::from_str(&compact(&expr)).unwrap();
    let indented: serde_json::Value = serde_json::from_str(&pretty).unwrap();
    assert_eq!(flat, indented);
}

#[test]
fn invalid_expressions_still_generate() {
    assert_eq!(compact(&Expression::symbol("")), "\"\"");
    assert_eq!(compact(&Expression::function("", vec![])), "[\"\"]");
    assert_eq!(compact(&Expression::function("", vec![])), compact(&Expression::function("", vec![])));
}
