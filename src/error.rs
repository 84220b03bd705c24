use std::fmt;
use std::fmt::Formatter;
use std::io;

use crate::ast::Rule;

#[macro_export]
macro_rules! internal_error {
    () => {
        Err($crate::error::ParseError::Internal {
            file: file!(),
            line: line!()
        })
    };
}

/// Everything that can go wrong while turning source text into clauses
#[derive(Debug)]
pub enum ParseError {
    /// The clause does not split into a usable head and body
    MalformedClause { text: String, reason: &'static str },
    /// A `(` or `[` was never closed, or a closer has no matching opener
    UnmatchedBracket { text: String, offset: usize, bracket: char },
    /// The left side of the chosen operator is itself an operator expression
    AmbiguousOperatorMatch { text: String, operator: String, nested: String },
    /// An operator is missing one of its operands
    MalformedExpression { text: String, operator: Option<String> },
    /// The grammar lexed an operator that the operator table does not carry
    UnsupportedOperator { text: String, operator: String },
    /// pest rejected the text
    Syntax { text: String, error: Box<pest::error::Error<Rule>> },
    /// Wraps the error of one clause while reading a whole program
    InClause { index: usize, line: usize, error: Box<ParseError> },
    Internal { file: &'static str, line: u32 },
}

impl ParseError {
    /// The clause index this error was raised in, if it came out of a program
    pub fn clause_index(&self) -> Option<usize> {
        match self {
            ParseError::InClause { index, .. } => Some(*index),
            _ => None,
        }
    }
    /// Strip any clause context, returning the error raised by the grammar
    pub fn root(&self) -> &ParseError {
        match self {
            ParseError::InClause { error, .. } => error.root(),
            other => other,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        use ParseError::*;
        match self {
            MalformedClause { text, reason } => {
                write!(f, "malformed clause `{}`: {}", text, reason)
            }
            UnmatchedBracket { text, offset, bracket } => {
                write!(f, "unmatched `{}` at offset {} in `{}`", bracket, offset, text)
            }
            AmbiguousOperatorMatch { text, operator, nested } => {
                write!(f, "left operand of `{}` contains operator `{}` in `{}`; try splitting the goal",
                       operator, nested, text)
            }
            MalformedExpression { text, operator: Some(operator) } => {
                write!(f, "operator `{}` is missing an operand in `{}`", operator, text)
            }
            MalformedExpression { text, operator: None } => {
                write!(f, "empty term in `{}`", text)
            }
            UnsupportedOperator { text, operator } => {
                write!(f, "operator `{}` is not in the operator table (in `{}`)", operator, text)
            }
            Syntax { text, error } => {
                write!(f, "could not parse `{}`:\n{}", text, error)
            }
            InClause { index, line, error } => {
                write!(f, "in clause {} (line {}): {}", index, line, error)
            }
            Internal { file, line } => {
                write!(f, "internal error originated at {}:{}", file, line)
            }
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::InClause { error, .. } => Some(&**error),
            ParseError::Syntax { error, .. } => Some(&**error),
            _ => None,
        }
    }
}

/// Raised while encoding a term against a symbol table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    UnknownSymbol(String),
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            EncodeError::UnknownSymbol(name) => write!(f, "unknown symbol `{}`", name),
        }
    }
}

impl std::error::Error for EncodeError {}

/// Raised while loading a configuration or symbol table file
#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Toml(toml::de::Error),
    UnknownOperator(String),
    DuplicateOperator(String),
}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Toml(e)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "could not read configuration: {}", e),
            ConfigError::Toml(e) => write!(f, "invalid configuration: {}", e),
            ConfigError::UnknownOperator(op) => {
                write!(f, "`{}` is not an operator the grammar can read", op)
            }
            ConfigError::DuplicateOperator(op) => {
                write!(f, "operator `{}` is listed more than once", op)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Toml(e) => Some(e),
            _ => None,
        }
    }
}

pub type BoxedErrorTrait = Box<(dyn std::error::Error + 'static)>;
