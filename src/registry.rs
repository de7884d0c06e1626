use std::collections::HashSet;
use std::sync::Arc;

/// Lookup the validator uses in strict mode to decide whether an operator
/// name is known. Implementations are read-only once built.
pub trait OperatorRegistry: Send + Sync {
    fn is_known_operator(&self, name: &str) -> bool;
}

/// A fixed set of operator names. Names are case-sensitive.
#[derive(Debug, Clone, Default)]
pub struct OperatorTable {
    operators: HashSet<String>,
}

impl OperatorTable {
    pub fn new() -> Self {
        Self { operators: HashSet::new() }
    }

    /// Add a name while building the table.
    pub fn with(mut self, name: impl Into<String>) -> Self {
        self.operators.insert(name.into());
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.operators.contains(name)
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.operators.iter().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.operators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for OperatorTable {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self { operators: iter.into_iter().map(Into::into).collect() }
    }
}

impl OperatorRegistry for OperatorTable {
    fn is_known_operator(&self, name: &str) -> bool {
        self.contains(name)
    }
}

impl<R: OperatorRegistry + ?Sized> OperatorRegistry for Arc<R> {
    fn is_known_operator(&self, name: &str) -> bool {
        (**self).is_known_operator(name)
    }
}

impl<R: OperatorRegistry + ?Sized> OperatorRegistry for &R {
    fn is_known_operator(&self, name: &str) -> bool {
        (**self).is_known_operator(name)
    }
}

/// Operators of the standard MathJSON library.
pub const STANDARD_OPERATOR_NAMES: &[&str] = &[
    // arithmetic
    "Add", "Subtract", "Negate", "Multiply", "Divide", "Power", "Square", "Sqrt", "Root",
    "Exp", "Ln", "Log", "Lb", "Lg", "Abs", "Sign", "Floor", "Ceil", "Round", "Truncate",
    "Mod", "Rational", "Factorial", "Gcd", "Lcm", "Max", "Min", "Half", "Random",
    // trigonometry
    "Sin", "Cos", "Tan", "Cot", "Sec", "Csc", "Arcsin", "Arccos", "Arctan", "Arctan2",
    "Sinh", "Cosh", "Tanh", "Arsinh", "Arcosh", "Artanh",
    // relations and logic
    "Equal", "NotEqual", "Less", "LessEqual", "Greater", "GreaterEqual",
    "And", "Or", "Not", "Implies", "Equivalent",
    // collections
    "List", "Tuple", "Sequence", "Set", "Range", "Interval", "Matrix", "Vector",
    "Element", "NotElement", "Union", "Intersection", "Subset",
    // calculus
    "Sum", "Product", "Integrate", "D", "Derivative", "Limit",
    // core
    "Complex", "Real", "Imaginary", "Function", "Hold", "Block", "Assign", "Declare",
    "If", "Delimiter", "Error",
];

lazy_static::lazy_static! {
    static ref STANDARD_OPERATORS: Arc<OperatorTable> =
        Arc::new(STANDARD_OPERATOR_NAMES.iter().copied().collect());
}

/// The standard table, built on first use and shared afterwards.
pub fn standard_operators() -> Arc<OperatorTable> {
    Arc::clone(&STANDARD_OPERATORS)
}
