use criterion::{criterion_group, criterion_main, Criterion};
use estate_gen::{generate_city, GeneratorConfig};
use rand::SeedableRng;

fn bench_generate(c: &mut Criterion) {
    let city = estate_core::heavenly_city();
    let fixed = GeneratorConfig::default();
    let packed = GeneratorConfig::packed();
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(42);
    c.bench_function("generate_city_fixed_rows", |b| {
        b.iter(|| generate_city(&city, &fixed, &mut rng).len())
    });
    c.bench_function("generate_city_packed_rows", |b| {
        b.iter(|| generate_city(&city, &packed, &mut rng).len())
    });
}

criterion_group!(benches, bench_generate);
criterion_main!(benches);
