// benches/roundtrip.rs
//! Round-trip (encrypt → decrypt) benchmarks over in-memory containers

use filecryption::{decrypt, derive_key, encrypt};

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use secure_gate::Dynamic;
use std::hint::black_box;
use std::io::Cursor;

const KB: usize = 1024;
const MB: usize = 1024 * 1024;

fn format_size(bytes: usize) -> String {
    if bytes >= MB {
        format!("{} MiB", bytes / MB)
    } else if bytes >= KB {
        format!("{} KiB", bytes / KB)
    } else {
        format!("{bytes} B")
    }
}

fn bench_roundtrip(c: &mut Criterion) {
    let mut group = c.benchmark_group("roundtrip");

    let password: Dynamic<String> = Dynamic::new("benchmark-password".to_string());
    let key = derive_key(&password).unwrap();

    for size in [KB, 64 * KB, MB, 10 * MB] {
        let input = vec![0x41u8; size];

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(
            BenchmarkId::new("size", format_size(size)),
            &size,
            |b, _| {
                b.iter(|| {
                    let mut encrypted = Vec::with_capacity(size + 32);
                    encrypt(Cursor::new(black_box(&input)), &mut encrypted, &key).unwrap();

                    let mut decrypted = Vec::with_capacity(size);
                    decrypt(Cursor::new(black_box(&encrypted)), &mut decrypted, &key).unwrap();

                    black_box(decrypted);
                });
            },
        );
    }

    group.finish();
}

fn bench_key_derivation(c: &mut Criterion) {
    let password: Dynamic<String> = Dynamic::new("benchmark-password".to_string());
    c.bench_function("derive_key", |b| {
        b.iter(|| derive_key(black_box(&password)).unwrap());
    });
}

criterion_group!(benches, bench_roundtrip, bench_key_derivation);
criterion_main!(benches);
