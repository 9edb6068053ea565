use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use techvisit::validators;

const CPFS: &[&str] = &[
    "93541134780",
    "935.411.347-80",
    "123.456.789-09",
    "11111111111",
    "abc12345678900xyz",
    "123",
];

fn bench_validators(c: &mut Criterion) {
    let mut group = c.benchmark_group("validators");

    group.bench_function("cpf_checksum", |b| {
        b.iter(|| {
            let mut valid = 0usize;
            for s in CPFS {
                if validators::is_valid_cpf(black_box(s)) {
                    valid += 1;
                }
            }
            black_box(valid);
        });
    });

    group.bench_function("cpf_mask", |b| {
        b.iter(|| black_box(validators::format_cpf(black_box("12345678900"))));
    });

    for (name, input) in [("digits", "11912345678"), ("masked", "(11) 91234-5678")] {
        group.bench_with_input(BenchmarkId::new("phone_mask", name), &input, |b, s| {
            b.iter(|| black_box(validators::format_phone(black_box(s))));
        });
    }

    group.bench_function("cep_mask", |b| {
        b.iter(|| black_box(validators::format_cep(black_box("12345678"))));
    });

    group.bench_function("password_strength", |b| {
        b.iter(|| {
            black_box(validators::is_strong_password(black_box("Aa1!aaaa")));
            black_box(validators::is_strong_password(black_box("correct horse battery")));
        });
    });

    group.finish();
}

criterion_group!(benches, bench_validators);
criterion_main!(benches);
