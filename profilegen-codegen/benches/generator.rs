//! Whole-profile generation benchmarks.

use criterion::{Criterion, criterion_group, criterion_main};
use profilegen_codegen::{GenerationOptions, Generator};
use std::hint::black_box;

const PROFILE: &[u8] = include_bytes!("../tests/testdata/profile.xml");

fn benchmark_generate_profile(c: &mut Criterion) {
    c.bench_function("generate_profile", |b| {
        b.iter(|| {
            Generator::new("profile.xml", black_box(PROFILE), GenerationOptions::new())
                .generate_profile()
        })
    });
}

fn benchmark_generate_profile_parallel(c: &mut Criterion) {
    let options = GenerationOptions::new().with_parallel_normalize(true);

    c.bench_function("generate_profile_parallel", |b| {
        b.iter(|| {
            Generator::new("profile.xml", black_box(PROFILE), options.clone()).generate_profile()
        })
    });
}

fn benchmark_render(c: &mut Criterion) {
    let profile = Generator::new("profile.xml", PROFILE, GenerationOptions::new())
        .generate_profile()
        .expect("Failed to generate profile");

    c.bench_function("render_profile", |b| b.iter(|| black_box(&profile).render()));
}

criterion_group!(
    benches,
    benchmark_generate_profile,
    benchmark_generate_profile_parallel,
    benchmark_render
);
criterion_main!(benches);
