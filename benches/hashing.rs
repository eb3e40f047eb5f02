use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use murmur3_stream::{hash128, hash128_x86, hash_chunks_parallel, Murmur3x64, StreamHasher};

fn bench_hashing(c: &mut Criterion) {
    let data: Vec<u8> = (0..1024 * 1024).map(|i| (i % 256) as u8).collect();

    let mut group = c.benchmark_group("hashing");
    group.throughput(Throughput::Bytes(data.len() as u64));

    group.bench_function("x64-128-1mb", |b| b.iter(|| hash128(black_box(&data))));

    group.bench_function("x86-128-1mb", |b| b.iter(|| hash128_x86(black_box(&data))));

    // Streaming in 64KB pieces, the file-hashing access pattern.
    group.bench_function("x64-128-streamed-64kb", |b| {
        b.iter(|| {
            let mut hasher = Murmur3x64::new();
            for chunk in black_box(&data).chunks(64 * 1024) {
                hasher.update(chunk);
            }
            hasher.finish128()
        })
    });

    // Parallel hashing of independent buffers
    let chunks: Vec<&[u8]> = data.chunks(64 * 1024).collect(); // 64KB chunks
    group.bench_function("x64-128-parallel-16x64kb", |b| {
        b.iter(|| hash_chunks_parallel(black_box(&chunks), 0))
    });

    group.finish();
}

criterion_group!(benches, bench_hashing);
criterion_main!(benches);
