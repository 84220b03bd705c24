use crate::ast::{split_top_level, Clause, TermParser};
use crate::error::ParseError;

/// Split a clause body at the commas between goals, leaving the commas inside
/// argument lists and list literals alone
pub fn split_predicates(body: &str) -> Result<Vec<&str>, ParseError> {
    split_top_level(body, ',')
}

/// Turn one clause string (`head :- goal, goal.` or `head.`) into a `Clause`
pub fn assemble(terms: &TermParser<'_>, text: &str) -> Result<Clause, ParseError> {
    let malformed = |reason| ParseError::MalformedClause { text: text.trim().to_string(), reason };

    let trimmed = text.trim();
    let trimmed = trimmed.strip_suffix('.').unwrap_or(trimmed);
    let (head, body) = match trimmed.find(":-") {
        Some(idx) => (&trimmed[..idx], Some(&trimmed[idx + 2..])),
        None => (trimmed, None),
    };

    let head = head.trim();
    if head.is_empty() {
        return Err(malformed("empty head"));
    }
    if split_top_level(head, ',')?.len() > 1 {
        return Err(malformed("the head is a conjunction"));
    }
    let head = terms.parse_predicate(head)?;

    let body = match body {
        None => vec![],
        Some(body) if body.trim().is_empty() => return Err(malformed("empty body")),
        Some(body) => {
            let mut goals = vec![];
            for goal in split_predicates(body)? {
                if goal.is_empty() {
                    return Err(malformed("empty goal in the body"));
                }
                goals.push(terms.parse_predicate(goal)?);
            }
            goals
        }
    };
    let clause = Clause::new(head, body);
    debug!("assembled {:?}", clause);
    Ok(clause)
}
