#![allow(missing_docs)]

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use jsonfront::{DefaultConfig, Minified, ParseConfig, Parser, Validated, Value};

/// Deterministically build an array of `records` small objects.
fn make_json_payload(records: usize, pretty: bool) -> String {
    let sep = if pretty { "\n  " } else { "" };
    let mut s = String::from("[");
    for i in 0..records {
        if i > 0 {
            s.push(',');
        }
        s.push_str(sep);
        s.push_str(&format!(
            r#"{{"id":{i},"name":"item {i}","tags":["a","b\n"],"score":{}.5,"ok":true}}"#,
            i % 97
        ));
    }
    s.push_str(sep);
    s.push(']');
    s
}

fn run<C: ParseConfig>(parser: &mut Parser, target: &mut Value, payload: &str) -> bool {
    parser.parse_into::<C, _>(target, black_box(payload))
}

fn bench_configs(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_value");
    for records in [10usize, 1_000] {
        let pretty = make_json_payload(records, true);
        let compact = make_json_payload(records, false);
        group.throughput(Throughput::Bytes(compact.len() as u64));

        let mut parser = Parser::new();
        let mut target = Value::Null;
        group.bench_with_input(BenchmarkId::new("default", records), &pretty, |b, p| {
            b.iter(|| run::<DefaultConfig>(&mut parser, &mut target, p));
        });
        group.bench_with_input(BenchmarkId::new("validated", records), &pretty, |b, p| {
            b.iter(|| run::<Validated>(&mut parser, &mut target, p));
        });
        group.bench_with_input(BenchmarkId::new("minified", records), &compact, |b, p| {
            b.iter(|| run::<Minified>(&mut parser, &mut target, p));
        });
    }
    group.finish();
}

fn bench_typed(c: &mut Criterion) {
    let numbers = format!(
        "[{}]",
        (0..10_000).map(|i| (i * 7 % 1013).to_string()).collect::<Vec<_>>().join(",")
    );
    let mut parser = Parser::new();
    let mut target: Vec<u32> = Vec::new();
    c.bench_function("parse_vec_u32_10k", |b| {
        b.iter(|| parser.parse_into::<DefaultConfig, _>(&mut target, black_box(&numbers)));
    });
}

criterion_group!(benches, bench_configs, bench_typed);
criterion_main!(benches);
