mod preprocess;
pub use preprocess::*;

mod clause;
pub use clause::*;

use std::fs;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::ast::{Clause, ListEncoding, OperatorTable, Predicate, Term, TermParser};
use crate::error::{ConfigError, ParseError};

/// Everything about the grammar that can be changed without touching `grammar.pest`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReaderOptions {
    pub lists: ListEncoding,
    pub operators: OperatorTable,
}

impl ReaderOptions {
    pub fn load(path: impl AsRef<Path>) -> Result<ReaderOptions, ConfigError> {
        let mut file = fs::File::open(path)?;
        let mut buf = String::new();
        file.read_to_string(&mut buf)?;
        ReaderOptions::from_toml(buf.as_str())
    }
    pub fn from_toml(source: &str) -> Result<ReaderOptions, ConfigError> {
        let options = toml::from_str(source)?;
        Ok(options)
    }
}

/// Reads whole programs, clause by clause
#[derive(Debug, Clone, Default)]
pub struct Reader {
    options: ReaderOptions,
}

impl Reader {
    pub fn new(options: ReaderOptions) -> Reader {
        Reader { options }
    }
    pub fn options(&self) -> &ReaderOptions {
        &self.options
    }
    fn terms(&self) -> TermParser<'_> {
        TermParser::new(&self.options.operators, self.options.lists)
    }
    /// Parse every clause, stopping at the first one that fails
    pub fn parse_program(&self, source: &str) -> Result<Vec<Clause>, ParseError> {
        self.clauses(source).collect()
    }
    /// Parse the clauses one at a time, so a caller can skip the bad ones.
    /// Errors are wrapped with the index and line of their clause
    pub fn clauses(&self, source: &str) -> impl Iterator<Item = Result<Clause, ParseError>> + '_ {
        let terms = self.terms();
        segment(source).into_iter()
            .enumerate()
            .map(move |(index, clause)| {
                assemble(&terms, clause.text.as_str()).map_err(|error| {
                    debug!("clause {} on line {} failed: {}", index, clause.line, error);
                    ParseError::InClause { index, line: clause.line, error: Box::new(error) }
                })
            })
    }
    pub fn parse_clause(&self, text: &str) -> Result<Clause, ParseError> {
        assemble(&self.terms(), text)
    }
    pub fn parse_predicate(&self, text: &str) -> Result<Predicate, ParseError> {
        self.terms().parse_predicate(text)
    }
    pub fn parse_terms(&self, text: &str) -> Result<Vec<Term>, ParseError> {
        self.terms().parse_terms(text)
    }
    pub fn parse_term(&self, text: &str) -> Result<Term, ParseError> {
        self.terms().parse_term(text)
    }
}
