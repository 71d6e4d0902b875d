//! Line counting throughput over a synthetic source file, with and without the default
//! noise patterns.
use criterion::{criterion_group, criterion_main, Criterion};
use linelog::lines::count_significant_lines;
use linelog::ScanConfig;
use std::hint::black_box;

fn synthetic_source(functions: usize) -> String {
    let mut source = String::from("/* generated\n * for benchmarking\n */\nuse std::fmt;\n\n");
    for i in 0..functions {
        source.push_str(&format!(
            "// function {i}\nfn f{i}(x: u32) -> u32 {{\n    let y = x + {i};\n    y * 2\n}}\n\n"
        ));
    }
    source
}

fn bench_line_count(c: &mut Criterion) {
    let config = ScanConfig::embedded().unwrap();
    let source = synthetic_source(2_000);
    let bytes = source.as_bytes();

    c.bench_function("count_plain", |b| {
        b.iter(|| count_significant_lines(black_box(bytes), std::iter::empty::<&regex::Regex>(), 2))
    });

    c.bench_function("count_rust_noise", |b| {
        b.iter(|| {
            count_significant_lines(
                black_box(bytes),
                config.rules.noise_for("Rust"),
                config.rules.min_chars(),
            )
        })
    });
}

criterion_group!(benches, bench_line_count);
criterion_main!(benches);
