use chrono::{Duration, NaiveDate};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use workout_charts::models::{aggregate_weekly, fill_empty_weeks, Workout};
use workout_charts::services::{ChartProducer, DescriptionChart, ImageChart};

/// Roughly five years of near-daily training.
fn synthetic_workouts(count: usize) -> Vec<Workout> {
    let start = NaiveDate::from_ymd_opt(2020, 1, 1).expect("valid date");
    (0..count)
        .map(|i| Workout {
            user_id: "bench-user".to_string(),
            name: format!("Workout {i}"),
            muscle_groups: vec!["legs".to_string()],
            // Skip every seventh day so some weeks are sparse
            date: (start + Duration::days((i + i / 6) as i64))
                .format("%Y-%m-%d")
                .to_string(),
            description: String::new(),
        })
        .collect()
}

fn benchmark_weekly(c: &mut Criterion) {
    let workouts = synthetic_workouts(1500);
    let series = aggregate_weekly(&workouts);
    let image = ImageChart::new();

    let mut group = c.benchmark_group("weekly_chart");

    group.bench_function("aggregate_weekly", |b| {
        b.iter(|| aggregate_weekly(black_box(&workouts)))
    });

    group.bench_function("fill_empty_weeks", |b| {
        b.iter(|| fill_empty_weeks(black_box(&series)))
    });

    group.bench_function("description_chart", |b| {
        b.iter(|| DescriptionChart.produce(black_box(&series)))
    });

    group.bench_function("image_chart", |b| {
        b.iter(|| image.produce(black_box(&series)))
    });

    group.finish();
}

criterion_group!(benches, benchmark_weekly);
criterion_main!(benches);
