//! MathJSON expression trees.
//!
//! Parse JSON-encoded mathematical expressions into an [`Expression`] tree,
//! write trees back out, and validate them:
//!
//! ```rust
//! use mathjson::{generate, parse, validate, GenerateOptions};
//!
//! let expr = parse(r#"["Multiply", ["Add", 1, 2], {"num": "0.(3)"}]"#).unwrap();
//! assert_eq!(
//!     generate(&expr, &GenerateOptions::default()),
//!     r#"["Multiply",["Add",1,2],{"num":"0.(3)"}]"#
//! );
//! assert!(validate(&expr, true).is_valid());
//! ```

pub mod ast;
pub mod error;
pub mod generator;
pub mod metadata;
pub mod numeric;
pub mod parser;
pub mod registry;
pub mod types;
pub mod validator;

pub use ast::{Expression, FunctionCall, NumberLiteral, StringLiteral, SymbolLiteral};
pub use error::ParseError;
pub use generator::{to_json_value, GenerateOptions};
pub use metadata::{Metadata, MetadataKey};
pub use numeric::{format_number_text, parse_number_text};
pub use parser::parse_value;
pub use registry::{standard_operators, OperatorRegistry, OperatorTable};
pub use types::NumberValue;
pub use validator::{ValidationResult, Validator};

/// Parse MathJSON text into an expression tree.
pub fn parse(input: &str) -> Result<Expression, ParseError> {
    parser::parse(input)
}

/// Render an expression as MathJSON text.
pub fn generate(expr: &Expression, options: &GenerateOptions) -> String {
    generator::generate(expr, options)
}

/// Validate against the standard operator table.
pub fn validate(expr: &Expression, strict: bool) -> ValidationResult {
    let registry = standard_operators();
    validate_with(expr, strict, registry.as_ref())
}

/// Validate, resolving operator names through `registry` in strict mode.
pub fn validate_with(expr: &Expression, strict: bool, registry: &dyn OperatorRegistry) -> ValidationResult {
    Validator::new(registry).strict(strict).validate(expr)
}
