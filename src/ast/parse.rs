use pest::Parser;
use pest::iterators::Pair;
use serde::Deserialize;

use pest_derive::*;
use crate::ast::{OperatorTable, Predicate, Term, TUPLE};
use crate::error::ParseError;

#[derive(Parser)]
#[grammar = "grammar.pest"]
struct Grammar;

/// How a list literal ends when it has no `| Tail`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListEncoding {
    /// `[a, b]` is `.(a, .(b))`: the last cell has a single argument, and a
    /// last element that is itself a list is used as the last cell
    Legacy,
    /// `[a, b]` is `.(a, .(b, .()))`
    Canonical,
}

impl Default for ListEncoding {
    fn default() -> Self {
        ListEncoding::Legacy
    }
}

/// Parses predicates and terms, borrowing the operator table it was configured with
#[derive(Debug, Clone, Copy)]
pub struct TermParser<'o> {
    operators: &'o OperatorTable,
    lists: ListEncoding,
}

impl<'o> TermParser<'o> {
    pub fn new(operators: &'o OperatorTable, lists: ListEncoding) -> TermParser<'o> {
        TermParser { operators, lists }
    }

    /// Parse a goal or clause head, e.g. `p(a, X)`, `t`, or `X is 1 + 2`.
    /// A single trailing period is ignored
    pub fn parse_predicate(&self, text: &str) -> Result<Predicate, ParseError> {
        let trimmed = text.trim();
        let trimmed = trimmed.strip_suffix('.').unwrap_or(trimmed).trim_end();
        if trimmed.is_empty() {
            return Err(ParseError::MalformedClause {
                text: text.to_string(),
                reason: "empty predicate",
            });
        }
        match self.parse_term(trimmed)? {
            Term::Predicate(p) => Ok(p),
            // `t` on its own is the zero argument predicate `t()`
            Term::Atom(name) => Ok(Predicate::atom(name)),
            Term::Variable(_) => Err(ParseError::MalformedClause {
                text: text.to_string(),
                reason: "a variable is not a predicate",
            }),
        }
    }

    /// Parse a comma separated sequence of terms; commas inside brackets stay put
    pub fn parse_terms(&self, text: &str) -> Result<Vec<Term>, ParseError> {
        if text.trim().is_empty() {
            return Ok(vec![]);
        }
        check_brackets(text)?;
        let args = top_level_pair(Rule::sequence, text)?;
        self.parse_args(text, args)
    }

    /// Parse a single term, including operator expressions
    pub fn parse_term(&self, text: &str) -> Result<Term, ParseError> {
        check_brackets(text)?;
        let expr = top_level_pair(Rule::source, text)?;
        self.parse_expr(text, expr)
    }

    fn parse_args(&self, source: &str, pair: Pair<Rule>) -> Result<Vec<Term>, ParseError> {
        pair.into_inner()
            .map(|expr| self.parse_expr(source, expr))
            .collect()
    }

    /// Collect the operands and operators of a chain and resolve them into one term
    fn parse_expr(&self, source: &str, pair: Pair<Rule>) -> Result<Term, ParseError> {
        let text = pair.as_str();
        let mut operands = vec![];
        let mut operators = vec![];
        let mut expect_operand = true;
        for inner in pair.into_inner() {
            if inner.as_rule() == Rule::infix {
                if expect_operand {
                    operands.push(None);
                }
                operators.push(inner.as_str());
                expect_operand = true;
            } else {
                operands.push(Some(self.parse_operand(source, inner)?));
                expect_operand = false;
            }
        }
        if expect_operand {
            operands.push(None);
        }
        self.resolve_chain(source, text, operands, &operators)
    }

    /// Split `o0 op1 o1 ... opn on` into nested binary predicates.
    ///
    /// The chain is split at the first occurrence of whichever operator comes
    /// first in the table, the left side has to be a single operand, and the
    /// right side is resolved the same way. So every split lands on the
    /// leftmost remaining operator, or the chain is rejected.
    fn resolve_chain(&self, source: &str, text: &str, operands: Vec<Option<Term>>, operators: &[&str])
        -> Result<Term, ParseError>
    {
        let mut names = Vec::with_capacity(operators.len());
        let mut priorities = Vec::with_capacity(operators.len());
        for token in operators {
            let op = self.operators.get(token).ok_or_else(|| ParseError::UnsupportedOperator {
                text: text.to_string(),
                operator: token.to_string(),
            })?;
            names.push(op.name());
            priorities.push(self.operators.priority(token).unwrap_or(usize::MAX));
        }
        for i in 0..operators.len() {
            let chosen = (i..operators.len())
                .min_by_key(|&j| (priorities[j], j))
                .unwrap_or(i);
            if chosen != i {
                return Err(ParseError::AmbiguousOperatorMatch {
                    text: text.to_string(),
                    operator: operators[chosen].to_string(),
                    nested: operators[i].to_string(),
                });
            }
        }

        let mut terms = Vec::with_capacity(operands.len());
        for (i, operand) in operands.into_iter().enumerate() {
            match operand {
                Some(term) => terms.push(term),
                None => {
                    // blame the operator on either side of the hole
                    let operator = i.checked_sub(1)
                        .and_then(|left| operators.get(left))
                        .or_else(|| operators.get(i))
                        .map(|op| op.to_string());
                    return Err(ParseError::MalformedExpression {
                        text: source.trim().to_string(),
                        operator,
                    });
                }
            }
        }

        let mut term = match terms.pop() {
            Some(term) => term,
            None => return internal_error!(),
        };
        for name in names.into_iter().rev() {
            let left = match terms.pop() {
                Some(left) => left,
                None => return internal_error!(),
            };
            term = Term::predicate(name, vec![left, term]);
        }
        if !operators.is_empty() {
            trace!("resolved `{}` into {:?}", text, term);
        }
        Ok(term)
    }

    fn parse_operand(&self, source: &str, pair: Pair<Rule>) -> Result<Term, ParseError> {
        let term = match pair.as_rule() {
            Rule::name | Rule::number | Rule::symbol => Term::atom(pair.as_str()),
            Rule::variable => Term::variable(pair.as_str()),
            Rule::compound => {
                let mut inner = pair.into_inner();
                let (name, args) = match (inner.next(), inner.next()) {
                    (Some(name), Some(args)) => (name.as_str(), args),
                    _ => return internal_error!(),
                };
                Term::predicate(name, self.parse_args(source, args)?)
            }
            Rule::list => {
                let mut elements = vec![];
                let mut tail = None;
                for inner in pair.into_inner() {
                    match inner.as_rule() {
                        Rule::elements => elements = self.parse_args(source, inner)?,
                        Rule::tail => {
                            let expr = match inner.into_inner().next() {
                                Some(expr) => expr,
                                None => return internal_error!(),
                            };
                            tail = Some(self.parse_expr(source, expr)?);
                        }
                        _ => return internal_error!(),
                    }
                }
                self.build_list(elements, tail)
            }
            Rule::tuple => {
                let elements = match pair.into_inner().next() {
                    Some(elements) => self.parse_args(source, elements)?,
                    None => return internal_error!(),
                };
                build_tuple(elements)
            }
            // only operands are expected here, the chain is handled by `parse_expr`
            _ => return internal_error!(),
        };
        Ok(term)
    }

    /// Chain the elements into cons cells, innermost cell last
    pub fn build_list(&self, elements: Vec<Term>, tail: Option<Term>) -> Term {
        let mut elements = elements.into_iter().rev();
        let last = match elements.next() {
            Some(last) => last,
            None => return Term::nil(),
        };
        let mut list = match (tail, self.lists) {
            (Some(tail), _) => Term::cons(vec![last, tail]),
            (None, ListEncoding::Canonical) => Term::cons(vec![last, Term::nil()]),
            (None, ListEncoding::Legacy) if last.is_cons() => last,
            (None, ListEncoding::Legacy) => Term::cons(vec![last]),
        };
        for head in elements {
            list = Term::cons(vec![head, list]);
        }
        list
    }
}

/// `(a, b, c)` is `,(a, ,(b, c))`, and `(a)` is just `a`
fn build_tuple(elements: Vec<Term>) -> Term {
    let mut elements = elements.into_iter().rev();
    let mut tuple = match elements.next() {
        Some(last) => last,
        None => return Term::predicate(TUPLE, vec![]),
    };
    for left in elements {
        tuple = Term::predicate(TUPLE, vec![left, tuple]);
    }
    tuple
}

/// Run `rule` over the whole text and return the pair it wraps between `SOI` and `EOI`
fn top_level_pair(rule: Rule, text: &str) -> Result<Pair<'_, Rule>, ParseError> {
    let mut pairs = Grammar::parse(rule, text).map_err(|error| ParseError::Syntax {
        text: text.to_string(),
        error: Box::new(error),
    })?;
    match pairs.next().and_then(|outer| outer.into_inner().next()) {
        Some(inner) => Ok(inner),
        None => internal_error!(),
    }
}

/// Split `text` at every `separator` that is outside all parentheses and brackets.
/// The pieces are trimmed. Fails on a closer with no opener, a closer of the wrong
/// kind, or an opener that is never closed
pub fn split_top_level(text: &str, separator: char) -> Result<Vec<&str>, ParseError> {
    let mut pieces = vec![];
    let mut open: Vec<(usize, char)> = vec![];
    let mut start = 0;
    for (idx, c) in text.char_indices() {
        match c {
            '(' | '[' => open.push((idx, c)),
            ')' | ']' => match open.pop() {
                Some((_, opener)) if closer_of(opener) == c => {}
                _ => {
                    return Err(ParseError::UnmatchedBracket {
                        text: text.to_string(),
                        offset: idx,
                        bracket: c,
                    });
                }
            },
            c if c == separator && open.is_empty() => {
                pieces.push(text[start..idx].trim());
                start = idx + c.len_utf8();
            }
            _ => {}
        }
    }
    if let Some(&(offset, bracket)) = open.first() {
        return Err(ParseError::UnmatchedBracket { text: text.to_string(), offset, bracket });
    }
    pieces.push(text[start..].trim());
    Ok(pieces)
}

fn check_brackets(text: &str) -> Result<(), ParseError> {
    // `\0` never shows up, so this only scans the nesting
    split_top_level(text, '\0').map(|_| ())
}

fn closer_of(opener: char) -> char {
    match opener {
        '(' => ')',
        _ => ']',
    }
}
