use crate::ast::{Expression, FunctionCall, NumberLiteral, StringLiteral, SymbolLiteral};
use crate::error::ParseError;
use crate::metadata::Metadata;
use crate::numeric;
use serde_json::{Map, Value};
use tracing::{debug, trace};

const DISCRIMINATORS: [&str; 4] = ["num", "sym", "str", "fn"];

/// Parse MathJSON text into an expression tree.
pub fn parse(input: &str) -> Result<Expression, ParseError> {
    let value: Value = serde_json::from_str(input).map_err(|e| {
        let err = ParseError::from_json(input, &e);
        debug!(error = %err, "rejected MathJSON text");
        err
    })?;
    parse_value(&value).map_err(|err| {
        debug!(error = %err, "rejected MathJSON structure");
        err
    })
}

/// Build an expression from an already-decoded JSON value.
pub fn parse_value(value: &Value) -> Result<Expression, ParseError> {
    let expr = match value {
        Value::Number(n) => Expression::Number(NumberLiteral::new(numeric::number_from_json(n)?)),
        Value::String(s) => parse_string(s),
        Value::Array(items) => Expression::Function(parse_function(items)?),
        Value::Object(object) => parse_object(object)?,
        Value::Null | Value::Bool(_) => {
            return Err(ParseError::new(format!("Unsupported JSON value: {}", value), None));
        }
    };
    trace!(kind = expr.kind(), "parsed node");
    Ok(expr)
}

// 'quoted' text is a string literal, anything else names a symbol
fn parse_string(s: &str) -> Expression {
    if s.len() >= 2 && s.starts_with('\'') && s.ends_with('\'') {
        Expression::String(StringLiteral::new(&s[1..s.len() - 1]))
    } else {
        Expression::Symbol(SymbolLiteral::new(s))
    }
}

fn parse_function(items: &[Value]) -> Result<FunctionCall, ParseError> {
    let (head, rest) = items
        .split_first()
        .ok_or_else(|| ParseError::new("Function array cannot be empty", None))?;
    let operator = match head {
        Value::String(name) => name.clone(),
        _ => return Err(ParseError::new("Function operator must be a string", None)),
    };
    let arguments = rest.iter().map(parse_value).collect::<Result<Vec<_>, _>>()?;
    Ok(FunctionCall::new(operator, arguments))
}

fn parse_object(object: &Map<String, Value>) -> Result<Expression, ParseError> {
    let mut present = DISCRIMINATORS.iter().filter(|key| object.contains_key(**key));
    let key = match (present.next(), present.next()) {
        (Some(key), None) => *key,
        _ => return Err(ParseError::new("Unknown object format", None)),
    };
    let metadata = Metadata::from_json_object(object);
    let payload = &object[key];

    let expr = match key {
        "num" => {
            let text = expect_string(key, payload)?;
            let value = numeric::parse_number_text(text)?;
            Expression::Number(NumberLiteral::with_raw(value, text).replace_metadata(metadata))
        }
        "sym" => {
            let name = expect_string(key, payload)?;
            Expression::Symbol(SymbolLiteral::new(name).replace_metadata(metadata))
        }
        "str" => {
            let text = expect_string(key, payload)?;
            Expression::String(StringLiteral::new(text).replace_metadata(metadata))
        }
        _ => match payload {
            Value::Array(items) => Expression::Function(parse_function(items)?.replace_metadata(metadata)),
            _ => return Err(ParseError::new("Value of \"fn\" must be an array", None)),
        },
    };
    Ok(expr)
}

fn expect_string<'v>(key: &str, value: &'v Value) -> Result<&'v str, ParseError> {
    value
        .as_str()
        .ok_or_else(|| ParseError::new(format!("Value of \"{}\" must be a string", key), None))
}
