use std::path::Path;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use rolequiz_core::parser::{parse_quiz_str, render_quiz, validate_quiz};
use rolequiz_core::reference;

fn bench_parse_quiz(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_quiz");

    let reference_toml = render_quiz(&reference::quiz()).unwrap();

    let large = {
        let mut s = String::from("[quiz]\nid = \"large\"\nname = \"Large\"\n");
        for q in 1..=64 {
            s.push_str(&format!("\n[[questions]]\nid = {q}\ntext = \"Question {q}?\"\n"));
        }
        for r in 0..32 {
            s.push_str(&format!("\n[[roles]]\nid = \"role_{r}\"\n[roles.weights]\n"));
            for q in 1..=64 {
                s.push_str(&format!("{q} = {{ no = {}, yes = {} }}\n", q % 8, 8 - q % 8));
            }
        }
        s
    };

    group.bench_function("reference", |b| {
        b.iter(|| parse_quiz_str(black_box(&reference_toml), Path::new("reference.toml")))
    });

    group.bench_function("64q_32r", |b| {
        b.iter(|| parse_quiz_str(black_box(&large), Path::new("large.toml")))
    });

    group.finish();
}

fn bench_validate(c: &mut Criterion) {
    let quiz = reference::quiz();
    c.bench_function("validate_reference", |b| {
        b.iter(|| validate_quiz(black_box(&quiz)))
    });
}

criterion_group!(benches, bench_parse_quiz, bench_validate);
criterion_main!(benches);
