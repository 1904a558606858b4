//! Pipeline throughput benchmarks
//!
//! The pipeline must keep up with sensor rate with a wide margin; these
//! benchmarks measure the per-record cost of decoding and full processing.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glove_bridge::pipeline::{decode_line, SensorPipeline};

const MOTION_RECORD: &str = "0.01,-0.02,1.9,0.1,0.2,0.3,0.0,0.0,1.0,0.5,5.25,-3.5";

fn bench_decode_line(c: &mut Criterion) {
    c.bench_function("decode_line", |b| {
        b.iter(|| decode_line(black_box(MOTION_RECORD)))
    });

    c.bench_function("decode_line_malformed", |b| {
        b.iter(|| decode_line(black_box("0.01,nope,1.9")))
    });
}

fn bench_process_line(c: &mut Criterion) {
    c.bench_function("process_line_motion", |b| {
        let mut pipeline = SensorPipeline::new();
        pipeline.process_line("0,0,0,0,0,0,0,0,0,0,0,0");
        b.iter(|| pipeline.process_line(black_box(MOTION_RECORD)))
    });
}

criterion_group!(benches, bench_decode_line, bench_process_line);
criterion_main!(benches);
