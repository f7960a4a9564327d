use chart_compose::compose::{ChartComposer, ChartConfig, LayoutExtent};
use chart_compose::core::layout_math::{self, Axis, Extremum};
use chart_compose::core::scale::tick_values;
use chart_compose::core::{DataPoint, Series, SeriesKind, SeriesParams};
use criterion::{Criterion, criterion_group, criterion_main};
use indexmap::IndexMap;
use std::hint::black_box;

fn sample_series(points: usize) -> Series {
    let params = SeriesParams {
        kind: Some("lines".to_owned()),
        curve: 1,
        view_dots: 0,
    };
    let data = (0..points)
        .map(|i| DataPoint::new(i as f64, (i as f64 * 0.7).sin() * 50.0 + 60.0))
        .collect();
    Series::new("bench", SeriesKind::Lines, params, IndexMap::new(), IndexMap::new())
        .expect("valid series")
        .with_data(data)
}

fn bench_min_max_10k(c: &mut Criterion) {
    let series = vec![sample_series(10_000)];

    c.bench_function("min_max_10k", |b| {
        b.iter(|| {
            let _ = layout_math::min_max(black_box(&series), Axis::Y, 100.0, Extremum::Max);
        })
    });
}

fn bench_tick_values(c: &mut Criterion) {
    c.bench_function("tick_values_15", |b| {
        b.iter(|| {
            let _ = tick_values(black_box(0.001), black_box(1234.5), black_box(15));
        })
    });
}

fn bench_table_column_widths(c: &mut Criterion) {
    let headers: Vec<String> = (0..12).map(|i| format!("column-{i}")).collect();
    let rows: Vec<Vec<serde_json::Value>> = (0..200)
        .map(|r| (0..12).map(|c| serde_json::json!(r * c)).collect())
        .collect();

    c.bench_function("table_column_widths_200x12", |b| {
        b.iter(|| {
            let _ = layout_math::table_column_widths(
                black_box(&headers),
                black_box(&rows),
                black_box(7.7),
            );
        })
    });
}

fn bench_full_chart_layout(c: &mut Criterion) {
    let mut composer = ChartComposer::new(ChartConfig::default());
    composer.lines.push(sample_series(2_000));

    c.bench_function("chart_layout_2k_points", |b| {
        b.iter(|| {
            let mut extent = LayoutExtent::default();
            let _ = composer
                .layout(black_box(0.0), &mut extent)
                .expect("layout should succeed");
        })
    });
}

criterion_group!(
    benches,
    bench_min_max_10k,
    bench_tick_values,
    bench_table_column_widths,
    bench_full_chart_layout
);
criterion_main!(benches);
