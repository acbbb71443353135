//! Benchmarks for parsing and compiling generated stepsheets.
//!
//! Run with: cargo bench -p stepsheet-compiler

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use stepsheet_compiler::compile;
use stepsheet_parser::{parse, RowSource};

/// A sheet with `functions` chained functions and `cases` test cases that
/// each call the head of the chain.
fn generate_sheet(functions: usize, cases: usize) -> String {
    let mut text = String::new();

    for i in 0..functions {
        text.push_str(&format!("function\tstep_{}\n", i));
        text.push_str("\tuser\t\n");
        text.push_str(&format!("steps\tdo thing {} as {{user}}\tthing {} done\n", i, i));
        text.push_str("\tcheck result\tresult ok\n");
        if i + 1 < functions {
            text.push_str(&format!("call\tstep_{}\n", i + 1));
            text.push_str("\tuser\tnext\n");
        }
    }

    text.push_str("test suite\tGenerated\tPriority\n");
    for i in 0..cases {
        text.push_str(&format!("test case\tcase {}\thigh\n", i));
        text.push_str("steps\topen app\tapp open\n");
        text.push_str("call\tstep_0\n");
        text.push_str(&format!("\tuser\tuser{}\n", i));
    }
    text
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for size in [10, 100, 500] {
        let text = generate_sheet(size, size);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| {
                let source = RowSource::from_tsv(black_box(text)).unwrap();
                parse(&source).unwrap()
            })
        });
    }

    group.finish();
}

fn bench_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile");

    for (functions, cases) in [(5, 100), (20, 100), (50, 50)] {
        let text = generate_sheet(functions, cases);
        let tree = parse(&RowSource::from_tsv(&text).unwrap()).unwrap();
        group.bench_with_input(
            BenchmarkId::new("chain", format!("{}x{}", functions, cases)),
            &tree,
            |b, tree| b.iter(|| compile(black_box(tree)).unwrap()),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_parse, bench_compile);
criterion_main!(benches);
