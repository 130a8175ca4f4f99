use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use lookql::{Parser, Scanner};
use std::hint::black_box;

const CASES: [(&str, &str); 3] = [
    (
        "simple",
        "LOOK (a'int): CONDITION [a.f1 GT 100] AT [2018.01.01:00.00.00 - 2018.01.02:00.00.00]",
    ),
    (
        "medium",
        r#"LOOK (a'int, b-2018'str): CONDITION [a.f1 GT 100, b-2018.name PF "ab", a.f2 EQ 3] AT [2018.01.01:00.00.00 - 2018.01.02:00.00.00]"#,
    ),
    (
        "complex",
        r#"LOOK (indexname1'typename, indexname2'typename2, indexname3'typename3):
           CONDITION [indexName1.field1 GT 100, indexName1.field1 NEQ "a32bd", indexName2.field3 NEQ 123.123,
                      indexName2.field2 LT 100, index2.field2 EQ 123, index3.field4 SF "ab2c32",
                      index3.field2 GTE 1000, index4.file4 LTE 120]
           AT [2018.14.23:12.23.45 - 2018.12.13:12.12.12]"#,
    ),
];

fn benchmark_scanner(c: &mut Criterion) {
    let mut group = c.benchmark_group("scanner_performance");

    for (name, query) in CASES {
        group.bench_with_input(BenchmarkId::new("scan", name), &query, |b, &query| {
            b.iter(|| {
                let tokens: Vec<_> = Scanner::new(black_box(query)).collect();
                black_box(tokens)
            })
        });
    }

    group.finish();
}

fn benchmark_parser(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_performance");

    for (name, query) in CASES {
        group.bench_with_input(BenchmarkId::new("parse", name), &query, |b, &query| {
            b.iter(|| match Parser::new(black_box(query)).parse() {
                Ok(stmt) => black_box(stmt),
                Err(e) => panic!("parse failed: {e}"),
            })
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_scanner, benchmark_parser);
criterion_main!(benches);
