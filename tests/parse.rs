use mathjson::{parse, Expression, MetadataKey, NumberValue};

fn num(expr: &Expression) -> &NumberValue {
    expr.as_number().map(|n| n.value()).expect("expected number")
}

#[test]
fn arrays_become_function_calls() {
    let expr = parse("[\"Multiply\",[\"Add\",1,2],3]").unwrap();
    let call = expr.as_function().unwrap();
    assert_eq!(call.operator(), "Multiply");
    assert_eq!(call.arity(), 2);
    assert_eq!(
        call.arguments()[0],
        Expression::function("Add", vec![Expression::number(1), Expression::number(2)])
    );
    assert_eq!(call.arguments()[1], Expression::number(3));
}

#[test]
fn operator_only_array_is_a_nullary_call() {
    let expr = parse("[\"Random\"]").unwrap();
    assert_eq!(expr, Expression::function("Random", vec![]));
}

#[test]
fn strings_and_symbols() {
    assert_eq!(parse("\"x\"").unwrap(), Expression::symbol("x"));
    assert_eq!(parse("\"'hello world'\"").unwrap(), Expression::string("hello world"));
    assert_eq!(parse(r#"{"sym": "Pi"}"#).unwrap(), Expression::symbol("Pi"));
    assert_eq!(parse(r#"{"str": "'kept'"}"#).unwrap(), Expression::string("'kept'"));
}

#[test]
fn symbol_names_are_normalized_on_parse() {
    let decomposed = parse("\"e\\u0301\"").unwrap();
    let composed = parse("\"\\u00e9\"").unwrap();
    assert_eq!(decomposed, composed);
    assert_eq!(decomposed.as_symbol().unwrap().name(), "\u{e9}");
}

#[test]
fn number_forms() {
    assert!(matches!(num(&parse("42").unwrap()), NumberValue::Integer(42)));
    assert!(matches!(num(&parse("-1.5").unwrap()), NumberValue::Float(f) if *f == -1.5));
    assert!(matches!(num(&parse("2E2").unwrap()), NumberValue::Float(f) if *f == 200.0));
    assert!(num(&parse(r#"{"num": "NaN"}"#).unwrap()).is_nan());
    assert!(num(&parse(r#"{"num": "-Infinity"}"#).unwrap()).is_infinite());
    assert!(matches!(num(&parse(r#"{"num": "12"}"#).unwrap()), NumberValue::Integer(12)));
    assert!(matches!(
        num(&parse("123456789012345678901234567890").unwrap()),
        NumberValue::Decimal(_)
    ));
    assert!(matches!(
        num(&parse(r#"{"num": "3.14159265358979323846"}"#).unwrap()),
        NumberValue::Decimal(_)
    ));
    assert!(matches!(num(&parse("0.1000000000000000000001").unwrap()), NumberValue::Decimal(_)));
}

#[test]
fn object_forms_collect_recognized_metadata() {
    let expr = parse(r#"{"fn": ["Add", 1, 2], "latex": "1+2", "color": "red"}"#).unwrap();
    let meta = expr.metadata().unwrap();
    assert_eq!(meta.len(), 1);
    assert_eq!(meta.get(MetadataKey::Latex).and_then(|v| v.as_str()), Some("1+2"));
    assert_eq!(expr, Expression::function("Add", vec![Expression::number(1), Expression::number(2)]));

    let bare = parse(r#"{"sym": "x", "color": "red"}"#).unwrap();
    assert!(bare.metadata().is_none());
}

#[test]
fn empty_array_fails() {
    let err = parse("[]").unwrap_err();
    assert_eq!(err.message, "Function array cannot be empty");
}

#[test]
fn non_string_operator_fails() {
    let err = parse("[1, 2]").unwrap_err();
    assert_eq!(err.message, "Function operator must be a string");
    assert!(parse("[[\"Add\"], 2]").is_err());
}

#[test]
fn unknown_object_fails() {
    let err = parse("{\"unknown\":\"value\"}").unwrap_err();
    assert_eq!(err.message, "Unknown object format");
    assert!(parse("{}").is_err());
}

#[test]
fn nested_errors_propagate() {
    assert!(parse("[\"Add\", 1, []]").is_err());
    assert!(parse("[\"Add\", {\"num\": \"1.(x)\"}]").is_err());
    let err = parse("[\"Add\", {\"num\": \"abc\"}]").unwrap_err();
    assert!(err.message.contains("abc"));
}

#[test]
fn invalid_json_reports_a_position() {
    let err = parse("[\"Add\", 1,").unwrap_err();
    assert!(err.message.starts_with("Invalid JSON"));
    assert!(err.position.is_some());

    let err = parse("[\"Add\" 1]").unwrap_err();
    assert_eq!(err.position, Some(7));
    assert!(err.to_string().ends_with("at position 7"));
}
