//! Benchmarks for instance parsing and directory packing

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use instpack::pack::{pack, parse_instance, PackOptions};
use std::fs;
use std::hint::black_box;
use tempfile::TempDir;

fn instance_content(payload_lines: usize) -> String {
    let mut content = String::from("120\n4\n");
    for i in 0..payload_lines {
        content.push_str(&format!("{} {} {}\n", i, i * 3 % 17, i * 7 % 101));
    }
    content
}

/// Benchmark header parsing against payload size
fn bench_parse_instance(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_instance");

    for lines in [10, 1_000, 100_000] {
        let content = instance_content(lines);
        group.bench_with_input(BenchmarkId::from_parameter(lines), &content, |b, content| {
            b.iter(|| black_box(parse_instance(content.as_bytes())).ok());
        });
    }

    group.finish();
}

/// Benchmark a full pack run over directories of increasing size
fn bench_pack_directory(c: &mut Criterion) {
    let mut group = c.benchmark_group("pack_directory");
    group.sample_size(20);

    for files in [10, 200] {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("bench");
        fs::create_dir(&root).unwrap();
        fs::write(root.join("script.py"), "").unwrap();
        let content = instance_content(500);
        for i in 0..files {
            fs::write(root.join(format!("inst{i:04}.txt")), &content).unwrap();
        }

        let opts = PackOptions::new(&root);
        group.bench_with_input(BenchmarkId::from_parameter(files), &opts, |b, opts| {
            b.iter(|| black_box(pack(opts).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse_instance, bench_pack_directory);
criterion_main!(benches);
