//! Benchmarks for movebuf.
//!
//! Run with:
//!     cargo bench

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use movebuf::{BulkConfig, OwningBuffer, run_bulk, run_bulk_with_moves};

fn bench_swaps(c: &mut Criterion) {
    let mut group = c.benchmark_group("swap");

    for len in [16usize, 1024, 64 * 1024] {
        group.throughput(Throughput::Elements(len as u64));

        group.bench_with_input(BenchmarkId::new("copy_swap", len), &len, |b, &len| {
            let mut x = OwningBuffer::sized(len).unwrap();
            let mut y = OwningBuffer::sized(len / 2).unwrap();
            b.iter(|| {
                x.copy_swap(black_box(&mut y)).unwrap();
                black_box(x.len())
            });
        });

        group.bench_with_input(BenchmarkId::new("move_swap", len), &len, |b, &len| {
            let mut x = OwningBuffer::sized(len).unwrap();
            let mut y = OwningBuffer::sized(len / 2).unwrap();
            b.iter(|| {
                x.move_swap(black_box(&mut y));
                black_box(x.len())
            });
        });
    }

    group.finish();
}

fn bench_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("construction");
    let len = 1000;
    let source = OwningBuffer::sized(len).unwrap();

    group.bench_function("sized", |b| {
        b.iter(|| black_box(OwningBuffer::sized(black_box(len)).unwrap()))
    });

    group.bench_function("try_clone", |b| {
        b.iter(|| black_box(source.try_clone().unwrap()))
    });

    group.bench_function("take", |b| {
        let mut holder = source.try_clone().unwrap();
        b.iter(|| {
            let moved = holder.take();
            holder.move_assign(&mut black_box(moved));
        })
    });

    group.finish();
}

fn bench_bulk(c: &mut Criterion) {
    let mut group = c.benchmark_group("bulk");
    group.sample_size(10);

    // Scaled down from the default 1_100_000 x 1000 run.
    let config = BulkConfig::new(10_000, 1000).unwrap();
    group.throughput(Throughput::Elements(config.count() as u64));

    group.bench_function("fill", |b| {
        b.iter(|| black_box(run_bulk(&config).unwrap().instances))
    });

    group.bench_function("fill_with_moves", |b| {
        b.iter(|| black_box(run_bulk_with_moves(&config).unwrap().instances))
    });

    group.finish();
}

criterion_group!(benches, bench_swaps, bench_construction, bench_bulk);
criterion_main!(benches);
