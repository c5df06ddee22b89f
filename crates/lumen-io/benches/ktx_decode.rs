use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use lumen_core::gl_enums;
use lumen_io::read_ktx;

#[path = "../tests/common/mod.rs"]
mod common;

use common::KtxBuilder;

fn bench_read_ktx(c: &mut Criterion) {
    let mut group = c.benchmark_group("read_ktx");
    for size in [64u32, 256, 512] {
        let levels = 32 - size.leading_zeros();
        let bytes = KtxBuilder::new(gl_enums::HALF_FLOAT, gl_enums::RGBA, size, size)
            .faces(6)
            .levels(levels)
            .key_value(b"sh\00.1 0.2 0.3\0")
            .build();
        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_with_input(BenchmarkId::new("cubemap_rgba16f", size), &bytes, |b, bytes| {
            b.iter(|| read_ktx(black_box(bytes)).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_read_ktx);
criterion_main!(benches);
