use serde::Deserialize;

use crate::error::ConfigError;

/// Every infix token `grammar.pest` can lex
pub const GRAMMAR_OPERATORS: &[&str] = &[
    "is", "div", ">=", "=<", "\\=", "==", ">", "<", "+", "-", "*", "/", "\\",
];

/// The default check order and renames: `(token, name in the tree)`
const STANDARD_OPERATORS: &[(&str, &str)] = &[
    ("is", "is"),
    (">", ">"),
    ("<", "<"),
    (">=", ">="),
    ("=<", "=<"),
    ("\\=", "\\="),
    ("==", "=="),
    ("+", "+"),
    ("-", "-"),
    ("*", "*"),
    ("/", "/"),
    ("\\", "\\"),
    // integer division collapses into `/`
    ("div", "/"),
];

/// An infix operator and the predicate name it is rewritten into
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Operator {
    pub token: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl Operator {
    pub fn new(token: &str, name: &str) -> Operator {
        Operator { token: token.to_string(), name: Some(name.to_string()) }
    }
    /// The functor name used in the tree
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(self.token.as_str())
    }
}

/// Operators in check order. When an expression contains several operators,
/// it is split at the one that comes first in this table, not the leftmost one
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Vec<Operator>")]
pub struct OperatorTable {
    operators: Vec<Operator>,
}

impl OperatorTable {
    /// Build a table, checking that every token is one the grammar lexes
    pub fn new(operators: Vec<Operator>) -> Result<OperatorTable, ConfigError> {
        for (i, op) in operators.iter().enumerate() {
            if !GRAMMAR_OPERATORS.contains(&op.token.as_str()) {
                return Err(ConfigError::UnknownOperator(op.token.clone()));
            }
            if operators[..i].iter().any(|prev| prev.token == op.token) {
                return Err(ConfigError::DuplicateOperator(op.token.clone()));
            }
        }
        Ok(OperatorTable { operators })
    }
    /// Look up an operator by the text the grammar lexed for it
    pub fn get(&self, token: &str) -> Option<&Operator> {
        self.operators.iter().find(|op| op.token == token)
    }
    /// Position in the check order, lower is checked first
    pub fn priority(&self, token: &str) -> Option<usize> {
        self.operators.iter().position(|op| op.token == token)
    }
    pub fn iter(&self) -> impl Iterator<Item = &Operator> {
        self.operators.iter()
    }
    pub fn len(&self) -> usize {
        self.operators.len()
    }
    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }
}

impl Default for OperatorTable {
    fn default() -> Self {
        let operators = STANDARD_OPERATORS.iter()
            .map(|(token, name)| Operator::new(token, name))
            .collect();
        OperatorTable { operators }
    }
}

impl std::convert::TryFrom<Vec<Operator>> for OperatorTable {
    type Error = ConfigError;

    fn try_from(operators: Vec<Operator>) -> Result<Self, Self::Error> {
        OperatorTable::new(operators)
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{Operator, OperatorTable};
    use crate::error::ConfigError;

    #[test]
    fn standard_table_0() {
        let table = OperatorTable::default();
        assert_eq!(table.len(), 13);
        assert_eq!(table.get("div").map(Operator::name), Some("/"));
        assert_eq!(table.get("is").map(Operator::name), Some("is"));
        assert!(table.priority("+") < table.priority("*"));
        assert!(table.priority(">") < table.priority(">="));
    }
    #[test]
    fn custom_table_0() {
        let table = OperatorTable::new(vec![
            Operator { token: "*".to_string(), name: None },
            Operator { token: "+".to_string(), name: Some("plus".to_string()) },
        ]).expect("known operators");
        assert_eq!(table.priority("*"), Some(0));
        assert_eq!(table.get("+").map(Operator::name), Some("plus"));
        assert_eq!(table.get("-"), None);
    }
    #[test]
    fn custom_table_failure_0() {
        let result = OperatorTable::new(vec![Operator { token: "=".to_string(), name: None }]);
        match result {
            Err(ConfigError::UnknownOperator(op)) => assert_eq!(op, "="),
            other => panic!("expected an unknown operator error, got {:?}", other),
        }
    }
    #[test]
    fn custom_table_failure_1() {
        let result = OperatorTable::new(vec![
            Operator { token: "+".to_string(), name: None },
            Operator { token: "+".to_string(), name: None },
        ]);
        assert!(matches!(result, Err(ConfigError::DuplicateOperator(_))));
    }
}
