use std::mem;

/// One clause worth of source text, with the line it started on (1 based)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceClause {
    pub line: usize,
    pub text: String,
}

/// Strip `%` comments and join continuation lines, producing one string per clause
pub fn preprocess(source: &str) -> Vec<String> {
    segment(source).into_iter()
        .map(|clause| clause.text)
        .collect()
}

/// Same as `preprocess`, but remembers where each clause started
pub fn segment(source: &str) -> Vec<SourceClause> {
    let mut clauses = vec![];
    let mut current = String::new();
    let mut first_line = 0;
    for (number, line) in source.lines().enumerate() {
        // everything from the first `%` on is a comment, including whole comment lines
        let code = match line.find('%') {
            Some(idx) => &line[..idx],
            None => line,
        }.trim();
        if code.is_empty() {
            continue;
        }
        if current.is_empty() {
            first_line = number + 1;
        } else {
            current.push(' ');
        }
        current.push_str(code);
        if code.ends_with('.') {
            trace!("clause on line {}: `{}`", first_line, current);
            clauses.push(SourceClause { line: first_line, text: mem::take(&mut current) });
        }
    }
    if !current.is_empty() {
        debug!("clause on line {} is missing its period", first_line);
        clauses.push(SourceClause { line: first_line, text: current });
    }
    clauses
}
