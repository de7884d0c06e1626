use crate::ast::{Expression, FunctionCall, NumberLiteral, StringLiteral, SymbolLiteral};
use crate::metadata::Metadata;
use crate::numeric;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::trace;

/// Output options for [`generate`].
///
/// `compact` prefers bare JSON numbers and strings wherever no metadata or
/// extended precision forces the object form. `pretty` only changes the
/// layout of the text, never which form a node takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateOptions {
    pub compact: bool,
    pub pretty: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self { compact: true, pretty: false }
    }
}

impl GenerateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }

    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

/// Render an expression as MathJSON text. Never fails: every expression that
/// can be constructed has a wire form, valid or not.
pub fn generate(expr: &Expression, options: &GenerateOptions) -> String {
    trace!(kind = expr.kind(), compact = options.compact, pretty = options.pretty, "generating");
    let value = to_json_value(expr, options);
    if options.pretty {
        format!("{:#}", value)
    } else {
        value.to_string()
    }
}

/// The JSON value `generate` would serialize.
pub fn to_json_value(expr: &Expression, options: &GenerateOptions) -> Value {
    match expr {
        Expression::Number(n) => number_value(n, options),
        Expression::Symbol(s) => symbol_value(s, options),
        Expression::String(s) => string_value(s, options),
        Expression::Function(f) => function_value(f, options),
    }
}

fn number_value(n: &NumberLiteral, options: &GenerateOptions) -> Value {
    let value = n.value();
    let needs_object = value.is_nan()
        || value.is_infinite()
        || value.is_rational()
        || n.raw().is_some()
        || n.metadata().is_some();

    if !needs_object && options.compact {
        if let Some(native) = numeric::number_to_json(value) {
            return Value::Number(native);
        }
    }

    let text = match n.raw() {
        Some(raw) => raw.to_string(),
        None => numeric::format_number_text(value),
    };
    object_form("num", Value::String(text), n.metadata())
}

fn symbol_value(s: &SymbolLiteral, options: &GenerateOptions) -> Value {
    // A bare 'quoted' name would read back as a string literal
    let ambiguous = s.name().len() >= 2 && s.name().starts_with('\'') && s.name().ends_with('\'');
    if options.compact && s.metadata().is_none() && !ambiguous {
        Value::String(s.name().to_string())
    } else {
        object_form("sym", Value::String(s.name().to_string()), s.metadata())
    }
}

fn string_value(s: &StringLiteral, options: &GenerateOptions) -> Value {
    if options.compact && s.metadata().is_none() {
        Value::String(format!("'{}'", s.value()))
    } else {
        object_form("str", Value::String(s.value().to_string()), s.metadata())
    }
}

fn function_value(f: &FunctionCall, options: &GenerateOptions) -> Value {
    let mut items = Vec::with_capacity(f.arity() + 1);
    items.push(Value::String(f.operator().to_string()));
    items.extend(f.arguments().iter().map(|arg| to_json_value(arg, options)));
    let array = Value::Array(items);

    match f.metadata() {
        Some(_) => object_form("fn", array, f.metadata()),
        None => array,
    }
}

fn object_form(key: &str, payload: Value, metadata: Option<&Metadata>) -> Value {
    let mut object = Map::new();
    object.insert(key.to_string(), payload);
    if let Some(metadata) = metadata {
        metadata.write_into(&mut object);
    }
    Value::Object(object)
}
