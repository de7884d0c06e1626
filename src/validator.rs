use crate::ast::{Expression, FunctionCall, SymbolLiteral};
use crate::registry::OperatorRegistry;
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Outcome of validating a tree: every problem found, in traversal order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub errors: Vec<String>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn into_parts(self) -> (bool, Vec<String>) {
        (self.is_valid(), self.errors)
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            return f.write_str("valid");
        }
        write!(f, "{} error(s): {}", self.errors.len(), self.errors.join("; "))
    }
}

/// Structural checker. Strict mode adds symbol-name rules and asks the
/// registry about every operator, at every depth.
pub struct Validator<'a> {
    registry: &'a dyn OperatorRegistry,
    strict: bool,
}

impl<'a> Validator<'a> {
    pub fn new(registry: &'a dyn OperatorRegistry) -> Self {
        Self { registry, strict: false }
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Walk the whole tree; never stops at the first error.
    pub fn validate(&self, expr: &Expression) -> ValidationResult {
        let mut errors = Vec::new();
        self.visit(expr, &mut errors);
        debug!(
            nodes = expr.node_count(),
            errors = errors.len(),
            strict = self.strict,
            "validated expression"
        );
        ValidationResult { errors }
    }

    fn visit(&self, expr: &Expression, errors: &mut Vec<String>) {
        match expr {
            Expression::Number(_) | Expression::String(_) => {}
            Expression::Symbol(s) => self.check_symbol(s, errors),
            Expression::Function(f) => {
                self.check_function(f, errors);
                for arg in f.arguments() {
                    self.visit(arg, errors);
                }
            }
        }
    }

    fn check_symbol(&self, symbol: &SymbolLiteral, errors: &mut Vec<String>) {
        let name = symbol.name();
        if name.is_empty() {
            errors.push("symbol name cannot be empty".to_string());
            return;
        }
        if !self.strict {
            return;
        }
        if name.len() >= 2 && name.starts_with('`') && name.ends_with('`') {
            return;
        }
        if let Some(rest) = name.strip_prefix('_') {
            if rest.is_empty() {
                errors.push("wildcard must have a name after the underscore".to_string());
            }
            return;
        }
        // Casing carries no rule of its own: "x" and "Pi" are both fine.
        let mut chars = name.chars();
        let valid = chars.next().is_some_and(char::is_alphabetic)
            && chars.all(|c| c.is_alphanumeric() || c == '_');
        if !valid {
            errors.push(format!("invalid symbol name: `{}`", name));
        }
    }

    fn check_function(&self, function: &FunctionCall, errors: &mut Vec<String>) {
        let operator = function.operator();
        if operator.is_empty() {
            errors.push("function operator cannot be empty".to_string());
        } else if self.strict && !self.registry.is_known_operator(operator) {
            errors.push(format!("unknown operator: `{}`", operator));
        }
    }
}
