use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use rolequiz_core::model::Answer;
use rolequiz_core::reference;
use rolequiz_core::selection::choose_role;
use rolequiz_core::session::{QuizSession, ScoreBoard};
use rolequiz_core::Role;

fn bench_full_session(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_session");
    let weights = Arc::new(reference::weight_table());
    let questions = reference::questions();

    for (name, pattern) in [
        ("all_no", [false; 8]),
        ("all_yes", [true; 8]),
        ("alternating", [false, true, false, true, false, true, false, true]),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| {
                let mut session = QuizSession::new(questions.clone(), Arc::clone(&weights));
                for (q, yes) in questions.iter().zip(pattern) {
                    session
                        .submit_answer(q.id, Answer::from(black_box(yes)))
                        .unwrap();
                }
                session.into_result().unwrap()
            })
        });
    }

    group.finish();
}

fn bench_choose_role(c: &mut Criterion) {
    let mut group = c.benchmark_group("choose_role");

    let tied = ScoreBoard::from_scores((0..8).map(|i| (Role::new(format!("role_{i}")), 32)));
    let spread = ScoreBoard::from_scores((0..8).map(|i| (Role::new(format!("role_{i}")), i * 3)));
    let wide = ScoreBoard::from_scores((0..256).map(|i| (Role::new(format!("role_{i}")), i % 17)));

    group.bench_function("tied", |b| b.iter(|| choose_role(black_box(&tied))));
    group.bench_function("spread", |b| b.iter(|| choose_role(black_box(&spread))));
    group.bench_function("256_roles", |b| b.iter(|| choose_role(black_box(&wide))));

    group.finish();
}

criterion_group!(benches, bench_full_session, bench_choose_role);
criterion_main!(benches);
