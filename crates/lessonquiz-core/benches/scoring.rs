use criterion::{black_box, criterion_group, criterion_main, Criterion};

use lessonquiz_core::model::{Question, QuizDefinition};
use lessonquiz_core::parser::parse_quiz_records;
use lessonquiz_core::scoring::{rounded_percent, ScoreResult};
use lessonquiz_core::session::AnswerSet;

fn make_quiz(questions: usize) -> QuizDefinition {
    QuizDefinition {
        course_id: 1,
        module_id: 1,
        questions: (0..questions)
            .map(|i| Question {
                text: format!("Question {i}"),
                options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
                correct_option_index: i % 4,
            })
            .collect(),
    }
}

fn make_answers(questions: usize) -> AnswerSet {
    let mut answers = AnswerSet::new(questions);
    for q in (0..questions).step_by(2) {
        answers.select(q, q % 3);
    }
    answers
}

fn bench_score_compute(c: &mut Criterion) {
    let mut group = c.benchmark_group("score_compute");

    for size in [3usize, 20, 200] {
        let quiz = make_quiz(size);
        let answers = make_answers(size);
        group.bench_function(format!("questions={size}"), |b| {
            b.iter(|| ScoreResult::compute(black_box(&quiz), black_box(&answers)))
        });
    }

    group.bench_function("rounded_percent", |b| {
        b.iter(|| rounded_percent(black_box(1), black_box(3)))
    });

    group.finish();
}

fn bench_parse_records(c: &mut Criterion) {
    let records: Vec<_> = (0..50)
        .map(|i| {
            serde_json::json!({
                "question": format!("Question {i}"),
                "options": ["alpha", "beta", "gamma", "delta"],
                "answer": if i % 2 == 0 { serde_json::json!(i % 4) } else { serde_json::json!("gamma") },
            })
        })
        .collect();
    let raw = serde_json::to_string(&records).unwrap();

    c.bench_function("parse_quiz_records/50", |b| {
        b.iter(|| parse_quiz_records(black_box(&raw)).unwrap())
    });
}

criterion_group!(benches, bench_score_compute, bench_parse_records);
criterion_main!(benches);
