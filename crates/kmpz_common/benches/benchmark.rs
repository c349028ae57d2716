use criterion::{
    criterion_group,
    criterion_main,
    BenchmarkId,
    Criterion,
    Throughput,
};
use kmpz_common::{
    kmp_match,
    z_match,
    DynamicNeedle,
    Needle as _,
};
use std::hint;

fn haystack() -> Vec<u8> {
    include_str!("../../../data/jabberwocky.txt")
        .as_bytes()
        .repeat(64)
}

fn bench_find_iter(c: &mut Criterion) {
    let haystack = haystack();
    let needles = [
        "74 68 65",
        "4A 61 62 62 65 72 77 6F 63 6B",
        "76 6F 72 70 61 6C",
        "6F 75 67 68",
        "21",
        "48 65 20",
        "73 6E 69 63 6B 65 72 2D 73 6E 61 63 6B",
        "61 6E 64 20 74 68 65",
    ];

    let mut group = c.benchmark_group("Needle::find_iter");
    group.throughput(Throughput::Bytes(haystack.len() as u64));
    for pattern in needles {
        let needle = DynamicNeedle::from_hex(pattern).unwrap();
        group.bench_with_input(
            BenchmarkId::from_parameter(pattern),
            &needle,
            |b, needle| {
                b.iter(|| {
                    let count = needle.find_iter(&haystack).count();
                    hint::black_box(count);
                });
            },
        );
    }
}

fn bench_match_arrays(c: &mut Criterion) {
    let haystack = haystack();
    let pattern = b"Jabberwock";

    let mut group = c.benchmark_group("match_arrays");
    group.throughput(Throughput::Bytes(haystack.len() as u64));
    group.bench_function("kmp_match", |b| {
        b.iter(|| hint::black_box(kmp_match(&haystack, pattern)));
    });
    group.bench_function("z_match", |b| {
        b.iter(|| hint::black_box(z_match(&haystack, pattern)));
    });
}

criterion_group!(benches, bench_find_iter, bench_match_arrays);
criterion_main!(benches);
