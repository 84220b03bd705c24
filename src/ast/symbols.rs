use std::collections::HashMap;
use std::{fs, iter};
use std::io::Read;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::ast::{Clause, Predicate, Term};
use crate::error::{ConfigError, EncodeError};

/// Maps symbol names (atoms, variables, and functors) to integer ids.
/// The table is built by the caller; encoding never adds to it
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "IndexMap<String, u32>")]
pub struct SymbolTable {
    ids: IndexMap<String, u32>, // map names --> ids, in insertion order
    demangle: HashMap<u32, String>, // maps ids --> names
}

impl SymbolTable {
    pub fn new() -> SymbolTable {
        SymbolTable::default()
    }
    /// Assign consecutive ids, starting from zero, to each distinct name in order
    pub fn from_names<I, S>(names: I) -> SymbolTable
        where I: IntoIterator<Item = S>,
              S: Into<String>,
    {
        let mut table = SymbolTable::new();
        for name in names {
            let name = name.into();
            if !table.ids.contains_key(&name) {
                let id = table.ids.len() as u32;
                table.insert(name, id);
            }
        }
        table
    }
    /// Read a table from a TOML file of `name = id` pairs
    pub fn load(path: impl AsRef<Path>) -> Result<SymbolTable, ConfigError> {
        let mut file = fs::File::open(path)?;
        let mut buf = String::new();
        file.read_to_string(&mut buf)?;
        SymbolTable::from_toml(buf.as_str())
    }
    pub fn from_toml(source: &str) -> Result<SymbolTable, ConfigError> {
        let table = toml::from_str(source)?;
        Ok(table)
    }
    /// Bind `name` to `id`, returning the id it was previously bound to
    pub fn insert(&mut self, name: impl Into<String>, id: u32) -> Option<u32> {
        let name = name.into();
        let prev = self.ids.insert(name.clone(), id);
        if let Some(prev) = prev {
            if self.demangle.get(&prev) == Some(&name) {
                self.demangle.remove(&prev);
            }
        }
        self.demangle.insert(id, name);
        prev
    }
    /// Return the id associated with `name`, if any
    pub fn id(&self, name: &str) -> Option<u32> {
        self.ids.get(name).copied()
    }
    /// Return the name bound to `id`, if any
    pub fn name(&self, id: u32) -> Option<&str> {
        self.demangle.get(&id).map(String::as_str)
    }
    /// A count of how many symbols there are
    pub fn len(&self) -> usize {
        self.ids.len()
    }
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
    /// Iterate over all the symbols in the table, in insertion order
    pub fn symbols(&self) -> impl Iterator<Item = (&str, u32)> {
        self.ids.iter().map(|(name, id)| (name.as_str(), *id))
    }
    /// Encode a term, see `Term::encode`
    pub fn encode(&self, term: &Term) -> Result<Vec<u32>, EncodeError> {
        term.encode(self)
    }
    /// Encode several terms, one sequence per term
    pub fn encode_all<'t, I>(&self, terms: I) -> Result<Vec<Vec<u32>>, EncodeError>
        where I: IntoIterator<Item = &'t Term>
    {
        terms.into_iter()
            .map(|term| term.encode(self))
            .collect()
    }
}

impl From<IndexMap<String, u32>> for SymbolTable {
    fn from(ids: IndexMap<String, u32>) -> Self {
        let mut table = SymbolTable::new();
        for (name, id) in ids {
            table.insert(name, id);
        }
        table
    }
}

impl Term {
    /// Emit the id of every node, parents before children, arguments in order.
    /// Fails on the first name the table does not know
    pub fn encode(&self, symbols: &SymbolTable) -> Result<Vec<u32>, EncodeError> {
        let mut out = Vec::new();
        self.encode_into(symbols, &mut out)?;
        Ok(out)
    }
    pub fn encode_into(&self, symbols: &SymbolTable, out: &mut Vec<u32>) -> Result<(), EncodeError> {
        for term in self.subterms() {
            out.push(lookup(symbols, term.name())?);
        }
        Ok(())
    }
}

impl Predicate {
    /// Same encoding as the equivalent `Term::Predicate`
    pub fn encode(&self, symbols: &SymbolTable) -> Result<Vec<u32>, EncodeError> {
        let mut out = vec![lookup(symbols, self.name())?];
        for arg in self.args() {
            arg.encode_into(symbols, &mut out)?;
        }
        Ok(out)
    }
    /// The predicate name followed by the names of all its sub terms, in encoding order
    pub fn symbol_names(&self) -> impl Iterator<Item = &str> {
        iter::once(self.name())
            .chain(self.args().iter().flat_map(|arg| arg.subterms().map(Term::name)))
    }
}

impl Clause {
    /// Every name in the head and then the body, duplicates included.
    /// Useful for building a `SymbolTable` over a whole program
    pub fn symbol_names(&self) -> impl Iterator<Item = &str> {
        self.head.symbol_names()
            .chain(self.body.iter().flat_map(|p| p.symbol_names()))
    }
}

fn lookup(symbols: &SymbolTable, name: &str) -> Result<u32, EncodeError> {
    symbols.id(name).ok_or_else(|| EncodeError::UnknownSymbol(name.to_string()))
}
