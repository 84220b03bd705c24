use std::{fmt, iter};

use itertools::Itertools;

/// Name of the cons cell functor that lists desugar into
pub const CONS: &str = ".";
/// Name of the functor that tuples desugar into
pub const TUPLE: &str = ",";

/// A node of the syntax tree
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Term {
    /// Constant symbolic names and number literals
    Atom(String),
    /// Names that start with an upper case letter or an underscore.
    /// They are never bound to anything, the parser only records them
    Variable(String),
    /// Compound terms, including the desugared lists and tuples
    Predicate(Predicate),
}

/// A name applied to an ordered list of arguments
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Predicate {
    name: String,
    args: Vec<Term>,
}

/// A head predicate with an (optionally empty) conjunction of body predicates
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Clause {
    pub head: Predicate,
    pub body: Vec<Predicate>,
}

/// Iterates over a term and all of its sub terms, parents before children,
/// in the order the encoder emits them
#[derive(Debug, Clone)]
pub struct SubTermIterator<'t> {
    stack: Vec<&'t Term>,
}

const EMPTY_TERM_SLICE: &[Term] = &[];

impl Term {
    pub fn atom(name: impl Into<String>) -> Term {
        Term::Atom(name.into())
    }
    pub fn variable(name: impl Into<String>) -> Term {
        Term::Variable(name.into())
    }
    pub fn predicate(name: impl Into<String>, args: Vec<Term>) -> Term {
        Term::Predicate(Predicate::new(name, args))
    }
    /// The empty list, `[]`
    pub fn nil() -> Term {
        Term::Predicate(Predicate::nil())
    }
    /// A list cell with the given arguments (one or two of them)
    pub fn cons(args: Vec<Term>) -> Term {
        Term::predicate(CONS, args)
    }
    pub fn name(&self) -> &str {
        match self {
            Term::Atom(name) | Term::Variable(name) => name.as_str(),
            Term::Predicate(p) => p.name(),
        }
    }
    pub fn args(&self) -> &[Term] {
        match self {
            Term::Predicate(p) => p.args(),
            _ => EMPTY_TERM_SLICE,
        }
    }
    pub fn arity(&self) -> usize {
        self.args().len()
    }
    /// A list cell or the empty list
    pub fn is_cons(&self) -> bool {
        match self {
            Term::Predicate(p) => p.is_cons(),
            _ => false,
        }
    }
    pub fn subterms(&self) -> SubTermIterator<'_> {
        SubTermIterator { stack: vec![self] }
    }
}

impl From<Predicate> for Term {
    fn from(p: Predicate) -> Self {
        Term::Predicate(p)
    }
}

impl Predicate {
    pub fn new(name: impl Into<String>, args: Vec<Term>) -> Predicate {
        Predicate { name: name.into(), args }
    }
    /// A predicate with no arguments, like the `t` in `t.`
    pub fn atom(name: impl Into<String>) -> Predicate {
        Predicate::new(name, vec![])
    }
    pub fn nil() -> Predicate {
        Predicate::new(CONS, vec![])
    }
    pub fn name(&self) -> &str {
        self.name.as_str()
    }
    pub fn args(&self) -> &[Term] {
        self.args.as_slice()
    }
    pub fn arity(&self) -> usize {
        self.args.len()
    }
    pub fn is_cons(&self) -> bool {
        self.name == CONS
    }
}

impl Clause {
    pub fn new(head: Predicate, body: Vec<Predicate>) -> Clause {
        Clause { head, body }
    }
    pub fn fact(head: Predicate) -> Clause {
        Clause { head, body: vec![] }
    }
    pub fn is_fact(&self) -> bool {
        self.body.is_empty()
    }
}

impl<'t> iter::Iterator for SubTermIterator<'t> {
    type Item = &'t Term;

    fn next(&mut self) -> Option<Self::Item> {
        let term = self.stack.pop()?;
        // pushed in reverse so the first argument is yielded first
        for child in term.args().iter().rev() {
            self.stack.push(child);
        }
        Some(term)
    }
    /// We know that there are at least some number of terms waiting to be yielded,
    /// and we don't have an upper bound
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.stack.len(), None)
    }
}

impl fmt::Debug for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Atom(name) => write!(f, "{}", name),
            Term::Variable(name) => write!(f, "${}", name),
            Term::Predicate(p) => write!(f, "{:?}", p),
        }
    }
}

impl fmt::Debug for Predicate {
    /// Writes the raw tree, `.(a, .(b))`, without any list or operator sugar
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        let mut first = true;
        for arg in self.args.iter() {
            if !first {
                write!(f, ", ")?;
            }
            first = false;
            write!(f, "{:?}", arg)?;
        }
        write!(f, ")")
    }
}

impl fmt::Debug for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.head)?;
        if !self.body.is_empty() {
            write!(f, " :- {:?}", self.body)?;
        }
        Ok(())
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Atom(name) | Term::Variable(name) => write!(f, "{}", name),
            Term::Predicate(p) => write!(f, "{}", p),
        }
    }
}

impl fmt::Display for Predicate {
    /// Writes the term back in surface syntax: lists, tuples, and infix operators
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_cons() {
            return write_list(self, f);
        }
        match self.args.as_slice() {
            [] => write!(f, "{}", self.name),
            [left, right] if self.name == TUPLE => write!(f, "({}, {})", left, right),
            [left, right] if is_infix(self) => {
                // operator chains nest to the right, so a left operand needs parentheses
                match left {
                    Term::Predicate(inner) if is_infix(inner) => write!(f, "({})", inner)?,
                    _ => write!(f, "{}", left)?,
                }
                write!(f, " {} {}", self.name, right)
            }
            args => write!(f, "{}({})", self.name, args.iter().join(", ")),
        }
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.head)?;
        if !self.body.is_empty() {
            write!(f, " :- {}", self.body.iter().join(", "))?;
        }
        write!(f, ".")
    }
}

fn is_infix(p: &Predicate) -> bool {
    let symbolic = !p.name.is_empty() && p.name.chars().all(|c| "+-*/\\<>=".contains(c));
    p.args.len() == 2 && (symbolic || p.name == "is")
}

/// Walks down the cons chain, collecting elements until the chain ends
fn write_list(cell: &Predicate, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut elements = vec![];
    let mut tail = None;
    let mut current = cell;
    loop {
        match current.args() {
            [] => break,
            [last] => {
                elements.push(last);
                break;
            }
            [head, Term::Predicate(rest)] if rest.is_cons() => {
                elements.push(head);
                current = rest;
            }
            [head, rest] => {
                elements.push(head);
                tail = Some(rest);
                break;
            }
            _ => return write!(f, "{}({})", current.name, current.args.iter().join(", ")),
        }
    }
    write!(f, "[{}", elements.iter().join(", "))?;
    if let Some(tail) = tail {
        write!(f, " | {}", tail)?;
    }
    write!(f, "]")
}
