use std::time::Instant;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use plume::animation::easing::EasingFunction;
use plume::animation::{Channel, Timeline, Tween};
use plume::page::{ElementRef, Property};
use plume::scroll::{ScrollTrigger, Scrub};

fn easing_benchmark(c: &mut Criterion) {
    let f = EasingFunction::CubicHermite { c1: 0.33, c2: 1.0 };
    c.bench_function("cubic_hermite_easing", |b| {
        b.iter(|| black_box(f.evaluate(black_box(0.5))))
    });

    let elastic = EasingFunction::ElasticOut {
        amplitude: 1.0,
        period: 0.5,
    };
    c.bench_function("elastic_out_easing", |b| {
        b.iter(|| black_box(elastic.evaluate(black_box(0.5))))
    });
}

fn timeline_update_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("timeline_update");

    for count in [10, 50, 100, 500].iter() {
        let start = Instant::now();
        let mut timeline = Timeline::new();
        for i in 0..*count {
            timeline.add(
                Tween::new(
                    Channel::Element(
                        ElementRef::EditorialChild(i),
                        Property::Opacity,
                    ),
                    0.0,
                    1.0,
                    1000.0,
                ),
                start,
            );
        }

        group.bench_function(format!("{count}_tweens"), |b| {
            b.iter(|| black_box(timeline.update(Instant::now())))
        });
    }
    group.finish();
}

fn trigger_benchmark(c: &mut Criterion) {
    let mut trigger = ScrollTrigger::new(0.0, 4200.0, Scrub::Damped(1.0));
    c.bench_function("damped_trigger_update", |b| {
        b.iter(|| {
            black_box(trigger.update(black_box(2100.0), black_box(1.0 / 60.0)))
        })
    });
}

criterion_group!(
    benches,
    easing_benchmark,
    timeline_update_benchmark,
    trigger_benchmark
);
criterion_main!(benches);
