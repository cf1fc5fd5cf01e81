use criterion::{Criterion, criterion_group, criterion_main};
use dp_dpll::sat::cnf::Cnf;
use dp_dpll::sat::dp::Dp;
use dp_dpll::sat::dpll::Dpll;
use dp_dpll::sat::solver::{PureLiteralMode, Solver, SolverOptions};
use dp_dpll::sat::variable_selection::VariableSelectionType;
use std::hint::black_box;
use std::time::Duration;

fn random_3sat(seed: u64, vars: i32, clauses: usize) -> Cnf {
    let mut rng = fastrand::Rng::with_seed(seed);
    let clauses: Vec<Vec<i32>> = (0..clauses)
        .map(|_| {
            (0..3)
                .map(|_| {
                    let var = rng.i32(1..=vars);
                    if rng.bool() { var } else { -var }
                })
                .collect()
        })
        .collect();
    Cnf::new(clauses).unwrap()
}

fn pigeonhole(n: i32) -> Cnf {
    let var = |pigeon: i32, hole: i32| pigeon * n + hole + 1;
    let mut clauses: Vec<Vec<i32>> = (0..=n)
        .map(|p| (0..n).map(|h| var(p, h)).collect())
        .collect();
    for h in 0..n {
        for p in 0..=n {
            for q in (p + 1)..=n {
                clauses.push(vec![-var(p, h), -var(q, h)]);
            }
        }
    }
    Cnf::new(clauses).unwrap()
}

fn uf20() -> Vec<Cnf> {
    (0..20).map(|seed| random_3sat(seed, 20, 91)).collect()
}

fn solve_all<S: Solver>(cnfs: &[Cnf], options: SolverOptions) {
    for cnf in cnfs {
        let mut solver = S::new(cnf.clone(), options);
        let verdict = solver.solve();
        black_box(verdict);
    }
}

fn bench_engines(c: &mut Criterion) {
    let small: Vec<Cnf> = (0..20).map(|seed| random_3sat(seed, 10, 43)).collect();

    let mut group = c.benchmark_group("3sat-10 - engine");
    group.sample_size(50);
    group.measurement_time(Duration::from_secs(10));

    group.bench_function("DP", |b| {
        b.iter(|| solve_all::<Dp>(&small, SolverOptions::default()));
    });

    group.bench_function("DPLL", |b| {
        b.iter(|| solve_all::<Dpll>(&small, SolverOptions::default()));
    });

    group.finish();
}

fn bench_variable_selection(c: &mut Criterion) {
    let cnfs = uf20();

    let mut group = c.benchmark_group("3sat-20 - variable selection");
    group.sample_size(50);
    group.measurement_time(Duration::from_secs(10));

    for selection in [
        VariableSelectionType::First,
        VariableSelectionType::Fixed,
        VariableSelectionType::Random,
    ] {
        let options = SolverOptions::default().with_selection(selection);
        group.bench_function(selection.to_string(), |b| {
            b.iter(|| solve_all::<Dpll>(&cnfs, options));
        });
    }

    group.finish();
}

fn bench_pure_literals(c: &mut Criterion) {
    let cnfs = uf20();

    let mut group = c.benchmark_group("3sat-20 - pure literals");
    group.sample_size(50);
    group.measurement_time(Duration::from_secs(10));

    for mode in [PureLiteralMode::Once, PureLiteralMode::FixedPoint] {
        let options = SolverOptions::default().with_pure_literals(mode);
        group.bench_function(mode.to_string(), |b| {
            b.iter(|| solve_all::<Dpll>(&cnfs, options));
        });
    }

    group.finish();
}

fn bench_pigeonhole(c: &mut Criterion) {
    let cnf = pigeonhole(5);

    c.bench_function("pigeonhole(5) - DPLL", |b| {
        b.iter(|| {
            let mut solver = Dpll::new(cnf.clone(), SolverOptions::default());
            black_box(solver.solve())
        });
    });
}

criterion_group!(
    benches,
    bench_engines,
    bench_variable_selection,
    bench_pure_literals,
    bench_pigeonhole
);
criterion_main!(benches);
