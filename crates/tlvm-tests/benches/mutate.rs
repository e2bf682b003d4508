use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use tlvm_codec::TlvEncoder;
use tlvm_mutator::{BlockCollection, MutatorConfig, SeededByteMutator, TlvMutator};
use tlvm_types::{Record, TypeRegistry, tlv_type};

fn http_exchange() -> Vec<u8> {
    TlvEncoder::encode_to_vec(&[
        Record::new(tlv_type::URL, b"http://127.0.0.1/index.html".to_vec()),
        Record::new(tlv_type::HEADER, b"Accept: */*".to_vec()),
        Record::new(tlv_type::NOBODY, vec![0, 0, 0, 0]),
        Record::new(
            tlv_type::RESPONSE0,
            b"HTTP/1.1 200 OK\r\nContent-Length: 5\r\n\r\nhello".to_vec(),
        ),
    ])
    .unwrap()
}

fn bench_mutate(c: &mut Criterion) {
    let registry = TypeRegistry::standard();
    let mutator = TlvMutator::new(&registry);
    let input = http_exchange();
    let mut group = c.benchmark_group("mutate");

    for max_size in [256usize, 4096, 65_536] {
        group.bench_with_input(BenchmarkId::from_parameter(max_size), &max_size, |b, &max| {
            let mut seed = 0u32;
            let mut buf = vec![0u8; input.len().max(max)];
            b.iter(|| {
                seed = seed.wrapping_add(1);
                buf[..input.len()].copy_from_slice(&input);
                let mut bytes = SeededByteMutator::new(u64::from(seed));
                mutator.mutate(&mut buf, input.len(), max, seed, &mut bytes)
            });
        });
    }

    group.finish();
}

fn bench_crossover(c: &mut Criterion) {
    let registry = TypeRegistry::standard();
    let mutator = TlvMutator::new(&registry);
    let a = http_exchange();
    let b_input = TlvEncoder::encode_to_vec(&[
        Record::new(tlv_type::COOKIE, b"sid=1".to_vec()),
        Record::new(tlv_type::RESPONSE1, b"HTTP/1.1 302 Found\r\n\r\n".to_vec()),
    ])
    .unwrap();
    let mut out = vec![0u8; 4096];

    c.bench_function("crossover", |b| {
        let mut seed = 0u32;
        b.iter(|| {
            seed = seed.wrapping_add(1);
            mutator.crossover(&a, &b_input, seed, &mut out, 4096)
        });
    });
}

fn bench_bootstrap(c: &mut Criterion) {
    let registry = TypeRegistry::standard();

    c.bench_function("bootstrap_4k", |b| {
        let mut seed = 0u64;
        b.iter(|| {
            seed += 1;
            let mut collection = BlockCollection::new(&registry, MutatorConfig::default(), seed);
            collection.bootstrap(4096);
            collection.len()
        });
    });
}

criterion_group!(benches, bench_mutate, bench_crossover, bench_bootstrap);
criterion_main!(benches);
