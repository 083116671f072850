//! Performance benchmarks for autoscan
//!
//! **Benchmarks Included:**
//! - `text_analysis`: vocabulary, fragment and topic extraction over generated prose
//! - `full_scan`: first-pass scan of a generated tree at 10, 100 and 500 files
//! - `rescan_unchanged`: second pass over an unchanged tree (fingerprint-only path)
//!
//! **Run benchmarks:**
//! ```bash
//! cargo bench                     # Run all benchmarks
//! cargo bench -- full_scan        # Full scan only
//! ```

use std::fs;
use std::path::Path;

use autoscan::knowledge::KnowledgeStore;
use autoscan::watcher::{detect_topics, sentence_fragments, vocabulary, Scanner};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use tempfile::TempDir;

const PARAGRAPH: &str = "The research team studied market data for the company. \
    A new Python program will analyze the experiment! Does the story need a stronger character? \
    Contact: test@example.com or +1-555-0123.";

/// Populate `root` with `count` files spread over text, JSON and Python.
fn generate_tree(root: &Path, count: usize) {
    for i in 0..count {
        let dir = root.join(format!("batch_{}", i % 10));
        fs::create_dir_all(&dir).expect("failed to create dir");

        let written = match i % 3 {
            0 => fs::write(dir.join(format!("doc_{i}.txt")), format!("{PARAGRAPH} Entry {i}.")),
            1 => fs::write(
                dir.join(format!("record_{i}.json")),
                format!(r#"{{"title": "generated record {i}", "id": {i}}}"#),
            ),
            _ => fs::write(
                dir.join(format!("module_{i}.py")),
                format!("class Model{i}:\n    def fit_{i}(self):\n        pass\n"),
            ),
        };
        written.expect("failed to write file");
    }
}

fn bench_text_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("text_analysis");
    group.sample_size(10);
    group.measurement_time(std::time::Duration::from_secs(5));

    let text = PARAGRAPH.repeat(200);

    group.bench_function("vocabulary", |b| b.iter(|| vocabulary(black_box(&text))));
    group.bench_function("sentence_fragments", |b| {
        b.iter(|| sentence_fragments(black_box(&text)));
    });
    group.bench_function("detect_topics", |b| b.iter(|| detect_topics(black_box(&text))));

    group.finish();
}

fn bench_full_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_scan");
    group.sample_size(10);
    group.measurement_time(std::time::Duration::from_secs(5));

    let rt = tokio::runtime::Runtime::new().expect("failed to build runtime");

    for count in &[10usize, 100, 500] {
        let tmp = TempDir::new().expect("failed to create temp dir");
        generate_tree(tmp.path(), *count);

        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, _| {
            b.iter_batched(
                || Scanner::new(tmp.path(), KnowledgeStore::new()),
                |scanner| {
                    let report = rt.block_on(scanner.scan()).expect("scan failed");
                    black_box(report)
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_rescan_unchanged(c: &mut Criterion) {
    let mut group = c.benchmark_group("rescan_unchanged");
    group.sample_size(10);
    group.measurement_time(std::time::Duration::from_secs(5));

    let rt = tokio::runtime::Runtime::new().expect("failed to build runtime");
    let tmp = TempDir::new().expect("failed to create temp dir");
    generate_tree(tmp.path(), 100);

    let scanner = Scanner::new(tmp.path(), KnowledgeStore::new());
    rt.block_on(scanner.scan()).expect("initial scan failed");

    group.bench_function("100_files", |b| {
        b.iter(|| {
            let report = rt.block_on(scanner.scan()).expect("scan failed");
            assert_eq!(report.new_files, 0);
            black_box(report)
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_text_analysis,
    bench_full_scan,
    bench_rescan_unchanged
);
criterion_main!(benches);
