use prolog_encoder::{parse_program, Clause, ParseError, Predicate, SymbolTable, Term};

fn a(name: &str) -> Term {
    Term::atom(name)
}
fn v(name: &str) -> Term {
    Term::variable(name)
}
fn p(name: &str, args: Vec<Term>) -> Predicate {
    Predicate::new(name, args)
}
fn f(name: &str, args: Vec<Term>) -> Term {
    Term::predicate(name, args)
}
fn cons(args: Vec<Term>) -> Term {
    Term::cons(args)
}

fn five_clauses() -> Vec<Clause> {
    vec![
        Clause::new(p("p", vec![a("a"), v("X")]), vec![
            p("q", vec![v("X"), v("Y")]),
            p("r", vec![v("Y")]),
        ]),
        Clause::new(p("q", vec![v("X"), v("Y")]), vec![
            p("s", vec![v("X"), v("Y")]),
        ]),
        Clause::new(p("r", vec![v("Y")]), vec![
            p("t", vec![v("Y")]),
        ]),
        Clause::fact(p("s", vec![a("a"), a("b")])),
        Clause::fact(p("t", vec![a("b")])),
    ]
}

#[test]
fn program_0() {
    let source = "p(a,X) :- q(X,Y), r(Y).\nq(X,Y) :- s(X,Y).\nr(Y) :- t(Y).\ns(a,b).\nt(b).";
    let clauses = parse_program(source).expect("should not error");
    assert_eq!(clauses, five_clauses());
}

#[test]
fn program_1() {
    let source = "
        p(a, X) :- q(X, Y), r(Y).
        q(X, Y) :- s(X, Y).
        r(Y) :- t(Y).
        s(a, b).
        t(b).
    ";
    let clauses = parse_program(source).expect("should not error");
    assert_eq!(clauses, five_clauses());
}

#[test]
fn program_comments_0() {
    let source = "
        % This is a comment
        p(a, X) :- q(X, Y), r(Y). % This is another comment
        q(X, Y) :- s(X, Y).
        r(Y) :- t(Y).
        s(a, b).
        t(b).
    ";
    let clauses = parse_program(source).expect("should not error");
    assert_eq!(clauses, five_clauses());
}

#[test]
fn program_arithmetic_0() {
    let source = "
        p(X) :- X is 1 + 2.
        q(X) :- X is 1 - 2.
        w(X,Y) :- X \\= Y.
        d1(X) :- X is 1 / 2.
        d2(X) :- X is 1 div 2.
    ";
    let clauses = parse_program(source).expect("should not error");
    let is = |right: Term| vec![p("is", vec![v("X"), right])];
    assert_eq!(clauses, vec![
        Clause::new(p("p", vec![v("X")]), is(f("+", vec![a("1"), a("2")]))),
        Clause::new(p("q", vec![v("X")]), is(f("-", vec![a("1"), a("2")]))),
        Clause::new(p("w", vec![v("X"), v("Y")]), vec![p("\\=", vec![v("X"), v("Y")])]),
        Clause::new(p("d1", vec![v("X")]), is(f("/", vec![a("1"), a("2")]))),
        Clause::new(p("d2", vec![v("X")]), is(f("/", vec![a("1"), a("2")]))),
    ]);
}

#[test]
fn program_lists_0() {
    let source = "
        p([a, b, c]).
        q([a, b, c | X]).
        r([a, b, c | X]) :- s(X).
        s([a, b, c],d).
        t([a, b], [c, d]).
        u([a, b | X]) :- u(X).
        u([]).
    ";
    let clauses = parse_program(source).expect("should not error");
    let abc = cons(vec![a("a"), cons(vec![a("b"), cons(vec![a("c")])])]);
    let abc_x = cons(vec![a("a"), cons(vec![a("b"), cons(vec![a("c"), v("X")])])]);
    assert_eq!(clauses, vec![
        Clause::fact(p("p", vec![abc.clone()])),
        Clause::fact(p("q", vec![abc_x.clone()])),
        Clause::new(p("r", vec![abc_x]), vec![p("s", vec![v("X")])]),
        Clause::fact(p("s", vec![abc, a("d")])),
        Clause::fact(p("t", vec![
            cons(vec![a("a"), cons(vec![a("b")])]),
            cons(vec![a("c"), cons(vec![a("d")])]),
        ])),
        Clause::new(p("u", vec![cons(vec![a("a"), cons(vec![a("b"), v("X")])])]),
                    vec![p("u", vec![v("X")])]),
        Clause::fact(p("u", vec![Term::nil()])),
    ]);
}

#[test]
fn program_tuples_0() {
    let source = "
        p((a,b)).
        q((a, b), c).
        r((a, b), (c, d)).
        s((_, b), c).
    ";
    let clauses = parse_program(source).expect("should not error");
    let tuple = |left: Term, right: Term| f(",", vec![left, right]);
    assert_eq!(clauses, vec![
        Clause::fact(p("p", vec![tuple(a("a"), a("b"))])),
        Clause::fact(p("q", vec![tuple(a("a"), a("b")), a("c")])),
        Clause::fact(p("r", vec![tuple(a("a"), a("b")), tuple(a("c"), a("d"))])),
        Clause::fact(p("s", vec![tuple(v("_"), a("b")), a("c")])),
    ]);
}

#[test]
fn program_multiline_0() {
    let source = "
        append([], L, L).
        append([H|T], L,
               [H|R]) :-   % the recursive case
            append(T, L, R).
    ";
    let clauses = parse_program(source).expect("should not error");
    assert_eq!(clauses.len(), 2);
    assert_eq!(clauses[0], Clause::fact(p("append", vec![Term::nil(), v("L"), v("L")])));
    assert_eq!(clauses[1].head, p("append", vec![
        cons(vec![v("H"), v("T")]),
        v("L"),
        cons(vec![v("H"), v("R")]),
    ]));
    assert_eq!(clauses[1].body, vec![p("append", vec![v("T"), v("L"), v("R")])]);
}

#[test]
fn program_failure_0() {
    let source = "p(a).\nq(X) :- X is 2 * Y + 1.\n";
    match parse_program(source) {
        Err(error) => {
            assert_eq!(error.clause_index(), Some(1));
            assert!(matches!(error.root(), ParseError::AmbiguousOperatorMatch { .. }));
        }
        Ok(clauses) => panic!("expected an error, got {:?}", clauses),
    }
}

#[test]
fn program_empty_0() {
    assert_eq!(parse_program("").expect("should not error"), vec![]);
    assert_eq!(parse_program("% only a comment\n").expect("should not error"), vec![]);
}

#[test]
fn encode_program_0() {
    let clauses = parse_program("p(X) :- X is 1 + 2.").expect("should not error");
    let symbols = SymbolTable::from_names(clauses[0].symbol_names());
    // p X is X + 1 2
    assert_eq!(clauses[0].head.encode(&symbols), Ok(vec![0, 1]));
    assert_eq!(clauses[0].body[0].encode(&symbols), Ok(vec![2, 1, 3, 4, 5]));
}

#[test]
fn display_round_trip_0() {
    let source = "
        q([a, b, c | X]) :- s(X), (a, b) == T.
        d2(X) :- X is 1 / 2.
        u([]).
    ";
    let clauses = parse_program(source).expect("should not error");
    let rendered = clauses.iter().map(|c| c.to_string()).collect::<Vec<_>>().join("\n");
    assert_eq!(parse_program(&rendered).expect("rendered program should parse"), clauses);
}
