#[macro_use]
mod error;
pub mod ast;
pub mod reader;

#[macro_use] extern crate log;

pub use ast::{Clause, ListEncoding, Operator, OperatorTable, Predicate, Rule, SymbolTable, Term};
pub use error::{BoxedErrorTrait, ConfigError, EncodeError, ParseError};
pub use reader::{preprocess, split_predicates, Reader, ReaderOptions};

/// Parse a whole program with the standard operators, stopping at the first bad clause
pub fn parse_program(source: &str) -> Result<Vec<Clause>, ParseError> {
    Reader::default().parse_program(source)
}

/// Parse a single clause string such as `p(X) :- q(X).`
pub fn parse_clause(text: &str) -> Result<Clause, ParseError> {
    Reader::default().parse_clause(text)
}

pub fn parse_predicate(text: &str) -> Result<Predicate, ParseError> {
    Reader::default().parse_predicate(text)
}

pub fn parse_terms(text: &str) -> Result<Vec<Term>, ParseError> {
    Reader::default().parse_terms(text)
}

pub fn parse_term(text: &str) -> Result<Term, ParseError> {
    Reader::default().parse_term(text)
}
