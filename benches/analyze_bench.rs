//! Benchmarks for the Stepwise analysis pipeline.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use stepwise::application::AnalyzeUsecase;
use stepwise::infrastructure::{CppAnalyzer, JsonExporter};

/// Synthetic C++ translation unit with `functions` recursive functions,
/// each with a loop, a branch, a heap allocation and a pointer write.
fn synthetic_source(functions: usize) -> String {
    let mut src = String::from("struct Node { int val; Node* next; };\n\n");
    for i in 0..functions {
        src.push_str(&format!(
            "int f{i}(int n, Node* head) {{\n\
             \x20   int acc = 0;\n\
             \x20   int arr[] = {{1, 2, 3, {i}}};\n\
             \x20   for (int k = 0; k < n; k++) {{\n\
             \x20       acc = acc + arr[k % 4];\n\
             \x20   }}\n\
             \x20   if (n <= 1) return acc;\n\
             \x20   Node* fresh = new Node({i});\n\
             \x20   fresh->next = head;\n\
             \x20   return f{i}(n - 1, fresh);\n\
             }}\n\n",
            i = i
        ));
    }
    src
}

fn bench_analyze(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze");
    let analyzer = CppAnalyzer::default();

    for &functions in &[10usize, 100, 1000] {
        let src = synthetic_source(functions);
        group.throughput(Throughput::Bytes(src.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(functions), &src, |b, src| {
            b.iter(|| analyzer.analyze(black_box(src)).unwrap())
        });
    }
    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let analyzer = CppAnalyzer::default();
    let usecase = AnalyzeUsecase { analyzer: &analyzer, exporter: &JsonExporter };
    let sources: Vec<(String, String)> = (0..32)
        .map(|i| (format!("file_{}.cpp", i), synthetic_source(50)))
        .collect();

    c.bench_function("analyze_all_32_files", |b| {
        b.iter(|| usecase.analyze_all(black_box(&sources)))
    });
}

criterion_group!(benches, bench_analyze, bench_batch);
criterion_main!(benches);
