use aspectarian::{AspectCalculator, AspectKind, ChartObject, ObjectId};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_get_aspect(c: &mut Criterion) {
    let calculator = AspectCalculator::new();
    let sun = ChartObject::planet(ObjectId::Sun, 100.0, 0.98);
    let moon = ChartObject::planet(ObjectId::Moon, 188.0, 13.1);

    c.bench_function("get_aspect", |b| {
        b.iter(|| {
            calculator.get_aspect(
                black_box(&sun),
                black_box(&moon),
                black_box(&AspectKind::ALL),
            )
        })
    });
}

fn bench_get_all_aspects(c: &mut Criterion) {
    let calculator = AspectCalculator::new();

    let ids = [
        ObjectId::Sun,
        ObjectId::Moon,
        ObjectId::Mercury,
        ObjectId::Venus,
        ObjectId::Mars,
        ObjectId::Jupiter,
        ObjectId::Saturn,
        ObjectId::Uranus,
        ObjectId::Neptune,
        ObjectId::Pluto,
    ];
    let objects: Vec<ChartObject> = ids
        .iter()
        .enumerate()
        .map(|(i, id)| ChartObject::planet(id.clone(), (i as f64) * 30.0, 1.0 - i as f64 * 0.1))
        .collect();

    c.bench_function("get_all_aspects", |b| {
        b.iter(|| {
            calculator.get_all_aspects(black_box(&objects), black_box(&AspectKind::ALL))
        })
    });
}

criterion_group!(benches, bench_get_aspect, bench_get_all_aspects);
criterion_main!(benches);
