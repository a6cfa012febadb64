use adcst::eval::{self, Env, EvalError};
use adcst::parser;
use pretty_assertions::assert_eq;

fn eval_closed(src: &str) -> f64 {
    let node = parser::parse(src).unwrap();
    let env = Env::seed(&[], 2).unwrap();
    eval::eval(&node, &env).unwrap().value()
}

fn env_at(bindings: &[(&str, f64)]) -> Env {
    let owned: Vec<(String, f64)> = bindings
        .iter()
        .map(|&(n, v)| (n.to_string(), v))
        .collect();
    Env::seed(&owned, 2).unwrap()
}

#[test]
fn arithmetic_precedence() {
    assert_eq!(eval_closed("2 + 3 * 4"), 14.0);
    assert_eq!(eval_closed("(2 + 3) * 4"), 20.0);
    assert_eq!(eval_closed("8 / 4 / 2"), 1.0);
    assert_eq!(eval_closed("7 - 2 - 1"), 4.0);
}

#[test]
fn power_is_right_associative() {
    assert_eq!(eval_closed("2 ^ 3 ^ 2"), 512.0);
    assert_eq!(eval_closed("2 ^ -1"), 0.5);
    assert_eq!(eval_closed("2 * 3 ^ 2"), 18.0);
}

#[test]
fn unary_minus_binds_looser_than_power() {
    let node = parser::parse("-x^2").unwrap();
    let env = env_at(&[("x", 3.0)]);
    let f = eval::eval(&node, &env).unwrap();
    assert_eq!(f.value(), -9.0);
    assert_eq!(f.diff(0).unwrap(), -6.0);
}

#[test]
fn float_literals() {
    assert_eq!(eval_closed("0.5 + 1.25"), 1.75);
    assert_eq!(eval_closed("10.0 / 4"), 2.5);
}

#[test]
fn calls_feed_the_derivative_rules() {
    let node = parser::parse("sin(x) * y + 2").unwrap();
    let env = env_at(&[("x", 0.5), ("y", 2.0)]);
    let f = eval::eval(&node, &env).unwrap();

    assert!((f.value() - (0.5f64.sin() * 2.0 + 2.0)).abs() < 1e-12);
    assert!((f.diff(0).unwrap() - 2.0 * 0.5f64.cos()).abs() < 1e-12);
    assert!((f.diff(1).unwrap() - 0.5f64.sin()).abs() < 1e-12);
}

#[test]
fn two_argument_pow() {
    let node = parser::parse("pow(x, 3)").unwrap();
    let env = env_at(&[("x", 3.0)]);
    let f = eval::eval(&node, &env).unwrap();
    assert_eq!(f.value(), 27.0);
    assert_eq!(f.diff(0).unwrap(), 27.0);
}

#[test]
fn caret_with_variable_exponent() {
    let node = parser::parse("x ^ y").unwrap();
    let env = env_at(&[("x", 3.0), ("y", 2.0)]);
    let f = eval::eval(&node, &env).unwrap();
    assert!((f.value() - 9.0).abs() < 1e-9);
    assert!((f.diff(0).unwrap() - 6.0).abs() < 1e-9);
    assert!((f.diff(1).unwrap() - 9.0 * 3.0f64.ln()).abs() < 1e-9);
}

#[test]
fn log_and_ln_are_synonyms() {
    let a = parser::parse("log(x)").unwrap();
    let b = parser::parse("ln(x)").unwrap();
    let env = env_at(&[("x", 2.0)]);
    assert_eq!(
        eval::eval(&a, &env).unwrap().diff(0).unwrap(),
        eval::eval(&b, &env).unwrap().diff(0).unwrap()
    );
}

#[test]
fn unknown_names_are_reported() {
    let env = env_at(&[("x", 1.0)]);

    let node = parser::parse("x + z").unwrap();
    assert!(matches!(
        eval::eval(&node, &env).unwrap_err(),
        EvalError::UnknownVariable { .. }
    ));

    let node = parser::parse("frob(x)").unwrap();
    assert!(matches!(
        eval::eval(&node, &env).unwrap_err(),
        EvalError::UnknownFunction { .. }
    ));
}

#[test]
fn arity_is_checked() {
    let env = env_at(&[("x", 1.0)]);

    let node = parser::parse("sin(x, x)").unwrap();
    assert!(matches!(
        eval::eval(&node, &env).unwrap_err(),
        EvalError::BadArity {
            expected: 1,
            got: 2,
            ..
        }
    ));

    let node = parser::parse("pow(x)").unwrap();
    assert!(matches!(
        eval::eval(&node, &env).unwrap_err(),
        EvalError::BadArity {
            expected: 2,
            got: 1,
            ..
        }
    ));
}

#[test]
fn domain_errors_surface_as_math_errors() {
    let node = parser::parse("asec(x)").unwrap();
    let env = env_at(&[("x", 0.5)]);
    assert!(matches!(
        eval::eval(&node, &env).unwrap_err(),
        EvalError::Math(_)
    ));
}

#[test]
fn parse_failures_render_caret_diagnostics() {
    let source = "1 + ";
    let diags = parser::parse_with_diagnostics(source).unwrap_err();
    assert!(!diags.is_empty());
    let rendered = adcst::diagnostics::render(source, &diags[0]);
    assert!(rendered.contains('^'), "{rendered}");
    assert!(rendered.contains("line 1"), "{rendered}");
}

#[test]
fn taylor_mode_through_the_evaluator() {
    let node = parser::parse("2 * x^4 - 1").unwrap();
    let owned = vec![("x".to_string(), 2.0)];
    let env = Env::seed(&owned, 4).unwrap();
    let f = eval::eval(&node, &env).unwrap();
    assert_eq!(f.higher_diff(4).unwrap(), 48.0); // 2 * 4!
}

#[test]
fn programs_re_evaluate_at_new_points() {
    let node = parser::parse("x * x").unwrap();
    let names = vec!["x".to_string()];
    let program = eval::compile(&node, &names).unwrap();

    for v in [1.0, 2.0, 3.5] {
        let vars = adcst::AdVec::new(&[v]);
        let f = program.eval(vars.vars()).unwrap();
        assert_eq!(f.value(), v * v);
        assert_eq!(f.diff(0).unwrap(), 2.0 * v);
    }
}
