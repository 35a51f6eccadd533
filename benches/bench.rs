use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use delaunay_sweep::{Point, SortAxis, Sweeper, SweeperBuilder};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_points(count: usize, seed: u64) -> Vec<Point> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| Point::new(rng.gen_range(0.0..1000.), rng.gen_range(0.0..1000.)))
        .collect()
}

/// 400 interior points, a focal point and the image corners
fn shatter_points(seed: u64) -> Vec<Point> {
    let (width, height) = (800., 600.);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut points = (0..400)
        .map(|_| Point::new(rng.gen_range(0.0..width), rng.gen_range(0.0..height)))
        .collect::<Vec<_>>();
    points.push(Point::new(width / 2., height / 2.));
    points.extend([
        Point::new(0., 0.),
        Point::new(width, 0.),
        Point::new(width, height),
        Point::new(0., height),
    ]);
    points
}

fn bench_uniform(c: &mut Criterion) {
    let mut group = c.benchmark_group("uniform");

    for count in [100, 1000, 10000] {
        let points = random_points(count, 12345);
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("sort_x", count), &points, |b, points| {
            b.iter(|| Sweeper::new(black_box(points.as_slice())).triangulate())
        });
    }

    group.finish();
}

fn bench_shatter(c: &mut Criterion) {
    let points = shatter_points(7);

    c.bench_function("shatter_405", |b| {
        b.iter(|| Sweeper::new(black_box(points.as_slice())).triangulate())
    });

    c.bench_function("shatter_405_sort_y_no_hull", |b| {
        let sweeper = SweeperBuilder::new(points.as_slice())
            .sort_axis(SortAxis::Y)
            .close_hull(false)
            .build()
            .unwrap();
        b.iter(|| black_box(&sweeper).triangulate())
    });
}

criterion_group!(benches, bench_uniform, bench_shatter);
criterion_main!(benches);
