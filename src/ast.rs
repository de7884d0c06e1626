use crate::error::ParseError;
use crate::generator::{self, GenerateOptions};
use crate::metadata::{Metadata, MetadataKey};
use crate::types::NumberValue;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use unicode_normalization::{is_nfc, UnicodeNormalization};

/// A MathJSON expression tree.
///
/// Equality is structural and ignores metadata (and the raw text of numbers).
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Number(NumberLiteral),
    Symbol(SymbolLiteral),
    String(StringLiteral),
    Function(FunctionCall),
}

#[derive(Debug, Clone)]
pub struct NumberLiteral {
    value: NumberValue,
    raw: Option<String>,
    metadata: Option<Metadata>,
}

#[derive(Debug, Clone)]
pub struct SymbolLiteral {
    name: String,
    metadata: Option<Metadata>,
}

#[derive(Debug, Clone)]
pub struct StringLiteral {
    value: String,
    metadata: Option<Metadata>,
}

#[derive(Debug, Clone)]
pub struct FunctionCall {
    operator: String,
    arguments: Vec<Expression>,
    metadata: Option<Metadata>,
}

impl NumberLiteral {
    pub fn new(value: impl Into<NumberValue>) -> Self {
        Self { value: value.into(), raw: None, metadata: None }
    }

    /// A number that remembers the author's text; `raw` is written back
    /// verbatim by the generator.
    pub fn with_raw(value: impl Into<NumberValue>, raw: impl Into<String>) -> Self {
        Self { value: value.into(), raw: Some(raw.into()), metadata: None }
    }

    pub fn value(&self) -> &NumberValue {
        &self.value
    }

    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    pub fn metadata(&self) -> Option<&Metadata> {
        self.metadata.as_ref()
    }

    pub fn replace_metadata(self, metadata: Option<Metadata>) -> Self {
        Self { metadata, ..self }
    }
}

impl PartialEq for NumberLiteral {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl SymbolLiteral {
    /// The name is stored in Unicode NFC.
    pub fn new(name: impl AsRef<str>) -> Self {
        let name = name.as_ref();
        let name = if is_nfc(name) { name.to_string() } else { name.nfc().collect() };
        Self { name, metadata: None }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn metadata(&self) -> Option<&Metadata> {
        self.metadata.as_ref()
    }

    pub fn replace_metadata(self, metadata: Option<Metadata>) -> Self {
        Self { metadata, ..self }
    }
}

impl PartialEq for SymbolLiteral {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl StringLiteral {
    pub fn new(value: impl Into<String>) -> Self {
        Self { value: value.into(), metadata: None }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn metadata(&self) -> Option<&Metadata> {
        self.metadata.as_ref()
    }

    pub fn replace_metadata(self, metadata: Option<Metadata>) -> Self {
        Self { metadata, ..self }
    }
}

impl PartialEq for StringLiteral {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl FunctionCall {
    pub fn new(operator: impl Into<String>, arguments: Vec<Expression>) -> Self {
        Self { operator: operator.into(), arguments, metadata: None }
    }

    pub fn operator(&self) -> &str {
        &self.operator
    }

    pub fn arguments(&self) -> &[Expression] {
        &self.arguments
    }

    pub fn arity(&self) -> usize {
        self.arguments.len()
    }

    pub fn metadata(&self) -> Option<&Metadata> {
        self.metadata.as_ref()
    }

    pub fn replace_metadata(self, metadata: Option<Metadata>) -> Self {
        Self { metadata, ..self }
    }
}

impl PartialEq for FunctionCall {
    fn eq(&self, other: &Self) -> bool {
        self.operator == other.operator && self.arguments == other.arguments
    }
}

impl Expression {
    pub fn number(value: impl Into<NumberValue>) -> Self {
        Expression::Number(NumberLiteral::new(value))
    }

    pub fn symbol(name: impl AsRef<str>) -> Self {
        Expression::Symbol(SymbolLiteral::new(name))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expression::String(StringLiteral::new(value))
    }

    pub fn function(operator: impl Into<String>, arguments: Vec<Expression>) -> Self {
        Expression::Function(FunctionCall::new(operator, arguments))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Expression::Number(_) => "number",
            Expression::Symbol(_) => "symbol",
            Expression::String(_) => "string",
            Expression::Function(_) => "function",
        }
    }

    pub fn metadata(&self) -> Option<&Metadata> {
        match self {
            Expression::Number(n) => n.metadata(),
            Expression::Symbol(s) => s.metadata(),
            Expression::String(s) => s.metadata(),
            Expression::Function(f) => f.metadata(),
        }
    }

    /// A copy of this expression with `key` merged into its metadata.
    pub fn with_metadata(&self, key: MetadataKey, value: impl Into<serde_json::Value>) -> Expression {
        let merged = match self.metadata() {
            Some(existing) => existing.with(key, value),
            None => Metadata::single(key, value),
        };
        self.with_metadata_map(Some(merged))
    }

    /// A copy of this expression whose metadata is replaced wholesale.
    pub fn with_metadata_map(&self, metadata: Option<Metadata>) -> Expression {
        match self.clone() {
            Expression::Number(n) => Expression::Number(n.replace_metadata(metadata)),
            Expression::Symbol(s) => Expression::Symbol(s.replace_metadata(metadata)),
            Expression::String(s) => Expression::String(s.replace_metadata(metadata)),
            Expression::Function(f) => Expression::Function(f.replace_metadata(metadata)),
        }
    }

    pub fn as_number(&self) -> Option<&NumberLiteral> {
        match self {
            Expression::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_symbol(&self) -> Option<&SymbolLiteral> {
        match self {
            Expression::Symbol(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&StringLiteral> {
        match self {
            Expression::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&FunctionCall> {
        match self {
            Expression::Function(f) => Some(f),
            _ => None,
        }
    }

    /// Number of nodes in the tree, this one included.
    pub fn node_count(&self) -> usize {
        match self {
            Expression::Function(f) => 1 + f.arguments.iter().map(Expression::node_count).sum::<usize>(),
            _ => 1,
        }
    }
}

impl From<NumberLiteral> for Expression {
    fn from(value: NumberLiteral) -> Self {
        Expression::Number(value)
    }
}

impl From<SymbolLiteral> for Expression {
    fn from(value: SymbolLiteral) -> Self {
        Expression::Symbol(value)
    }
}

impl From<StringLiteral> for Expression {
    fn from(value: StringLiteral) -> Self {
        Expression::String(value)
    }
}

impl From<FunctionCall> for Expression {
    fn from(value: FunctionCall) -> Self {
        Expression::Function(value)
    }
}

impl From<i64> for Expression {
    fn from(value: i64) -> Self {
        Expression::number(value)
    }
}

impl From<f64> for Expression {
    fn from(value: f64) -> Self {
        Expression::number(value)
    }
}

/// Compact wire text.
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&generator::generate(self, &GenerateOptions::default()))
    }
}

impl FromStr for Expression {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parser::parse(s)
    }
}

impl Serialize for Expression {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        generator::to_json_value(self, &GenerateOptions::default()).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Expression {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        crate::parser::parse_value(&value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_are_nfc_normalized() {
        let decomposed = SymbolLiteral::new("e\u{301}");
        let composed = SymbolLiteral::new("\u{e9}");
        assert_eq!(decomposed.name(), "\u{e9}");
        assert_eq!(decomposed, composed);
    }

    #[test]
    fn equality_ignores_metadata_and_raw() {
        let plain = Expression::number(3);
        let annotated = Expression::Number(NumberLiteral::with_raw(3, "3"))
            .with_metadata(MetadataKey::Comment, "three");
        assert_eq!(plain, annotated);
        assert_eq!(
            Expression::symbol("x"),
            Expression::symbol("x").with_metadata(MetadataKey::Latex, "x")
        );
    }

    #[test]
    fn function_equality_is_ordered() {
        let a = Expression::function("Subtract", vec![Expression::number(1), Expression::number(2)]);
        let b = Expression::function("Subtract", vec![Expression::number(2), Expression::number(1)]);
        let c = Expression::function("Subtract", vec![Expression::number(1)]);
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn with_metadata_is_copy_on_write() {
        let original = Expression::string("hello");
        let updated = original.with_metadata(MetadataKey::Comment, "greeting");
        assert!(original.metadata().is_none());
        assert_eq!(
            updated.metadata().and_then(|m| m.get(MetadataKey::Comment)),
            Some(&serde_json::json!("greeting"))
        );
        assert_eq!(updated.as_string().map(StringLiteral::value), Some("hello"));

        let merged = updated.with_metadata(MetadataKey::Latex, "\\text{hello}");
        assert_eq!(merged.metadata().map(Metadata::len), Some(2));
        let cleared = merged.with_metadata_map(None);
        assert!(cleared.metadata().is_none());
    }

    #[test]
    fn node_count_walks_arguments() {
        let expr = Expression::function(
            "Multiply",
            vec![
                Expression::function("Add", vec![Expression::number(1), Expression::number(2)]),
                Expression::symbol("x"),
            ],
        );
        assert_eq!(expr.node_count(), 5);
    }
}
