use criterion::{black_box, criterion_group, criterion_main, Criterion, BenchmarkId};
use prolog_encoder::{parse_program, SymbolTable};

const PROGRAMS: &[(&str, &str)] = &[
    ("facts", "s(a, b).\nt(b).\nu([]).\n"),
    ("rules", "p(a, X) :- q(X, Y), r(Y).\nq(X, Y) :- s(X, Y).\nr(Y) :- t(Y).\n"),
    ("lists", "append([], L, L).\nappend([H|T], L, [H|R]) :- append(T, L, R).\n"),
    ("arithmetic", "len([], 0).\nlen([_|T], N) :- len(T, M), N is M + 1.\n"),
];

pub fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse program");
    for (name, source) in PROGRAMS.iter() {
        group.bench_with_input(BenchmarkId::new("parse", name), source,
            |b, source| {
                b.iter(|| parse_program(black_box(source)))
            });
    }
    group.finish();
}

pub fn bench_encode(c: &mut Criterion) {
    let clauses = PROGRAMS.iter()
        .flat_map(|(_, source)| parse_program(source).expect("benchmark programs parse"))
        .collect::<Vec<_>>();
    let symbols = SymbolTable::from_names(clauses.iter().flat_map(|c| c.symbol_names()));
    c.bench_function("encode clauses", |b| b.iter(|| {
        for clause in clauses.iter() {
            let _ = black_box(clause.head.encode(&symbols));
            for goal in clause.body.iter() {
                let _ = black_box(goal.encode(&symbols));
            }
        }
    }));
}

criterion_group!(benches, bench_parse, bench_encode);
criterion_main!(benches);
