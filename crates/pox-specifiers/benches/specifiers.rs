use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pox_specifiers::{SpecifierSet, Version};

fn bench_parse_version(c: &mut Criterion) {
    let versions = [
        "1.2.3",
        "v2.4.0",
        "2.4.0a1",
        "2.1.0.dev3",
        "1!1.0.post2",
        "1.0.0-RC1",
        "3.0+ubuntu.1",
    ];

    c.bench_function("parse_version", |b| {
        b.iter(|| {
            for version in versions {
                black_box(Version::parse(black_box(version)).ok());
            }
        })
    });
}

fn bench_parse_specifiers(c: &mut Criterion) {
    let specifiers = [
        ">=1.2",
        ">=1.2,<2.0",
        "~=1.4.5",
        "==1.2.*",
        "!=1.5.0, !=1.5.1, >=1.0",
        "===1.0",
    ];

    c.bench_function("parse_specifier_set", |b| {
        b.iter(|| {
            for specifier in specifiers {
                black_box(SpecifierSet::parse(black_box(specifier)).ok());
            }
        })
    });
}

fn bench_contains(c: &mut Criterion) {
    let cases = [
        ("1.2.3", ">=1.2.0,<2.0"),
        ("1.2.3b1", "~=1.2"),
        ("2.4.5", "==2.4.*"),
        ("1.9999.9999", "<2.0.0"),
        ("1.0", "===1.0"),
    ];
    let parsed: Vec<(&str, SpecifierSet)> = cases
        .iter()
        .map(|(version, set)| (*version, SpecifierSet::parse(set).expect("parse specifiers")))
        .collect();

    c.bench_function("specifier_set_contains", |b| {
        b.iter(|| {
            for (version, set) in &parsed {
                black_box(set.contains(black_box(version)).ok());
            }
        })
    });
}

fn bench_filter(c: &mut Criterion) {
    let versions = vec![
        "1.0",
        "0.1",
        "0.1.1",
        "3.2.1",
        "2.4.0a1",
        "2.4.0",
        "not-a-version",
        "50.2",
        "1.2.3",
        "2.4.5",
        "2.4.5rc1",
    ];
    let set = SpecifierSet::parse(">=1.0,<3.0").expect("parse specifiers");

    c.bench_function("specifier_set_filter", |b| {
        b.iter(|| {
            black_box(set.filter(black_box(&versions), None).count());
        })
    });
}

criterion_group!(
    benches,
    bench_parse_version,
    bench_parse_specifiers,
    bench_contains,
    bench_filter
);
criterion_main!(benches);
