use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use adcst::eval::{self, Env};
use adcst::{minimize, parser, Ad, AdVec, NewtonOptions};

const ROSENBROCK_SRC: &str = "100*(y - x^2)^2 + (1 - x)^2";

fn rosenbrock(v: &[Ad]) -> Ad {
    let (x, y) = (&v[0], &v[1]);
    let residual = y - &(x * x);
    let bias = 1.0 - x;
    &(&residual * &residual) * 100.0 + &bias * &bias
}

fn bench_second_order(c: &mut Criterion) {
    let mut group = c.benchmark_group("second_order");

    group.bench_function("rosenbrock_grad_hess", |b| {
        b.iter(|| {
            let vars = AdVec::new(black_box(&[-1.2, 1.0]));
            rosenbrock(vars.vars())
        });
    });

    group.bench_function("trig_chain", |b| {
        b.iter(|| {
            let vars = AdVec::new(black_box(&[0.7, 0.3]));
            let (x, y) = (vars.var(0), vars.var(1));
            (&(x * y).sin() + &x.cosh().ln()).tan()
        });
    });

    group.finish();
}

fn bench_taylor(c: &mut Criterion) {
    let mut group = c.benchmark_group("taylor");

    for order in [4usize, 8, 16] {
        group.bench_with_input(
            BenchmarkId::new("sin_of_square", order),
            &order,
            |b, &order| {
                b.iter(|| {
                    let vars = AdVec::with_order(black_box(&[0.7]), order).expect("single var");
                    let x = vars.var(0);
                    (x * x).sin()
                });
            },
        );
    }

    group.finish();
}

fn bench_parse_and_eval(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_eval");

    group.bench_function("parse", |b| {
        b.iter(|| parser::parse(black_box(ROSENBROCK_SRC)).expect("parse"));
    });

    group.bench_function("parse_compile_eval", |b| {
        b.iter(|| {
            let node = parser::parse(black_box(ROSENBROCK_SRC)).expect("parse");
            let env = Env::seed(&[("x".into(), 2.0), ("y".into(), 1.0)], 2).expect("seed");
            eval::eval(&node, &env).expect("eval")
        });
    });

    group.finish();
}

fn bench_newton(c: &mut Criterion) {
    let mut group = c.benchmark_group("newton");

    group.bench_function("rosenbrock_minimize", |b| {
        b.iter(|| {
            minimize(
                |v| Ok(rosenbrock(v)),
                black_box(&[2.0, 1.0]),
                &NewtonOptions::default(),
            )
            .expect("converges")
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_second_order,
    bench_taylor,
    bench_parse_and_eval,
    bench_newton
);

criterion_main!(benches);
