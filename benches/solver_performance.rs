use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use stablefluid::solver::{advect, diffuse, project};
use stablefluid::{Boundary, Fluid, SolverParams};

fn seeded(size: usize) -> Fluid {
    let mut fluid = Fluid::new(size);
    let c = size as i32 / 2;
    fluid.add_density(c, c, 1000.0);
    fluid.add_velocity(c, c, 5.0, -3.0);
    for _ in 0..5 {
        fluid.update(0.016);
    }
    fluid
}

fn benchmark_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("update");

    for size in [60, 120, 240].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let mut fluid = seeded(size);
            b.iter(|| {
                fluid.add_density(size as i32 / 2, size as i32 / 2, 1000.0);
                fluid.update(black_box(0.016));
            });
        });
    }
    group.finish();
}

fn benchmark_iteration_budget(c: &mut Criterion) {
    let mut group = c.benchmark_group("iterations");

    for iterations in [4, 16, 32].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(iterations),
            iterations,
            |b, &iterations| {
                let params = SolverParams {
                    iterations,
                    ..SolverParams::default()
                };
                let mut fluid = Fluid::with_params(120, params);
                fluid.add_velocity(60, 60, 5.0, 0.0);
                b.iter(|| fluid.update(black_box(0.016)));
            },
        );
    }
    group.finish();
}

fn benchmark_stages(c: &mut Criterion) {
    let mut group = c.benchmark_group("stages");
    let n = 120;
    let fluid = seeded(n);
    let vx = fluid.velocity_x().to_vec();
    let vy = fluid.velocity_y().to_vec();
    let density = fluid.density().to_vec();

    group.bench_function("diffuse", |b| {
        let mut dest = vec![0.0; n * n];
        b.iter(|| diffuse(n, Boundary::Scalar, &mut dest, black_box(&density), 1e-6, 0.112, 5.0, 32));
    });

    group.bench_function("project", |b| {
        let mut vx = vx.clone();
        let mut vy = vy.clone();
        let mut p = vec![0.0; n * n];
        let mut div = vec![0.0; n * n];
        b.iter(|| project(n, &mut vx, &mut vy, &mut p, &mut div, 32));
    });

    group.bench_function("advect", |b| {
        let mut dest = vec![0.0; n * n];
        b.iter(|| advect(n, Boundary::Scalar, &mut dest, black_box(&density), &vx, &vy, 0.112));
    });

    group.finish();
}

criterion_group!(benches, benchmark_update, benchmark_iteration_budget, benchmark_stages);
criterion_main!(benches);
