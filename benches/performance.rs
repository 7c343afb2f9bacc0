//! Performance benchmarks for plainsh
//!
//! Line interpretation has to stay well below human typing speed; these
//! benchmarks cover the parts that run on every line.

use criterion::{criterion_group, criterion_main, Criterion};
use plainsh::intent::IntentMatcher;
use plainsh::parser::{parse_command, split_pipeline, tokenize};
use std::hint::black_box;

/// Benchmark tokenizing a quoted line
fn bench_tokenize(c: &mut Criterion) {
    let line = r#"grep -rn "needle in a haystack" 'src dir' --include=*.rs"#;

    c.bench_function("tokenize", |b| {
        b.iter(|| {
            let _ = tokenize(black_box(line));
        });
    });
}

/// Benchmark full command parsing with redirections
fn bench_parse_command(c: &mut Criterion) {
    let line = "sort -u < names.txt >> sorted.txt &";

    c.bench_function("parse_command", |b| {
        b.iter(|| {
            let _ = parse_command(black_box(line));
        });
    });
}

/// Benchmark pipeline splitting
fn bench_split_pipeline(c: &mut Criterion) {
    let line = "ps aux | grep \"a|b\" | sort | uniq -c | head -n 5";

    c.bench_function("split_pipeline", |b| {
        b.iter(|| {
            let _ = split_pipeline(black_box(line));
        });
    });
}

/// Benchmark building the matcher (regex compilation)
fn bench_matcher_construction(c: &mut Criterion) {
    c.bench_function("matcher_construction", |b| {
        b.iter(|| {
            black_box(IntentMatcher::new());
        });
    });
}

/// Benchmark resolving requests, including one that matches nothing
fn bench_intent_resolution(c: &mut Criterion) {
    let matcher = IntentMatcher::new();
    let queries = [
        "show me the files in this directory",
        "create a new folder called projects",
        "what processes are running",
        "this request matches no rule at all",
    ];

    c.bench_function("intent_resolution", |b| {
        b.iter(|| {
            for query in &queries {
                let _ = matcher.resolve(black_box(query));
            }
        });
    });
}

/// Benchmark the natural-language gate
fn bench_natural_language_gate(c: &mut Criterion) {
    let matcher = IntentMatcher::new();

    c.bench_function("natural_language_gate", |b| {
        b.iter(|| {
            let _ = matcher.is_likely_natural_language(black_box("ls -la /tmp"));
            let _ = matcher.is_likely_natural_language(black_box("where am i?"));
        });
    });
}

criterion_group!(
    benches,
    bench_tokenize,
    bench_parse_command,
    bench_split_pipeline,
    bench_matcher_construction,
    bench_intent_resolution,
    bench_natural_language_gate
);
criterion_main!(benches);
