//! adcst command line: evaluate scalar expressions together with their
//! gradients, Hessians, and higher-order derivatives, or minimize them with
//! Newton's method.

use std::process;

use anyhow::{bail, Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use adcst::ast::Node;
use adcst::eval::{self, Env};
use adcst::newton::{self, NewtonOptions};
use adcst::{diagnostics, parser};

#[derive(Parser, Debug)]
#[command(name = "adcst")]
#[command(about = "Forward-mode automatic differentiation toolkit", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate an expression and print its derivatives
    Eval {
        /// Expression over named variables, e.g. "sin(x) * y"
        expr: String,

        /// Variable bindings, e.g. "x=1.5,y=2" (binding order fixes the
        /// gradient order)
        #[arg(long, value_name = "BINDINGS", default_value = "")]
        at: String,

        /// Highest derivative order to track; orders above 2 need exactly
        /// one variable
        #[arg(long, default_value = "2")]
        order: usize,

        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Minimize an expression with Newton's method
    Newton {
        /// Expression over named variables, e.g. "100*(y-x^2)^2 + (1-x)^2"
        expr: String,

        /// Starting point, e.g. "x=2,y=1"
        #[arg(long, value_name = "BINDINGS")]
        start: String,

        /// Stop once the step norm falls below this tolerance
        #[arg(long, default_value = "1e-8")]
        tol: f64,

        /// Iteration cap
        #[arg(long, default_value = "100")]
        max_iter: usize,

        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let outcome = match cli.command {
        Some(Commands::Eval {
            expr,
            at,
            order,
            json,
        }) => run_eval(&expr, &at, order, json),
        Some(Commands::Newton {
            expr,
            start,
            tol,
            max_iter,
            json,
        }) => run_newton(&expr, &start, tol, max_iter, json),
        None => {
            // No subcommand: show help and exit 0
            let _ = Cli::command().print_help();
            println!();
            return;
        }
    };

    if let Err(err) = outcome {
        eprintln!("error: {err:#}");
        process::exit(1);
    }
}

fn parse_expr(expr: &str) -> Node {
    match parser::parse_with_diagnostics(expr) {
        Ok(node) => node,
        Err(diags) => {
            for diag in &diags {
                eprintln!("{}", diagnostics::render(expr, diag));
            }
            process::exit(1);
        }
    }
}

fn parse_bindings(raw: &str) -> Result<Vec<(String, f64)>> {
    let mut bindings = Vec::new();
    for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (name, value) = part
            .split_once('=')
            .with_context(|| format!("expected NAME=VALUE, got `{part}`"))?;
        let value: f64 = value
            .trim()
            .parse()
            .with_context(|| format!("invalid number in `{part}`"))?;
        bindings.push((name.trim().to_string(), value));
    }
    Ok(bindings)
}

#[derive(Serialize)]
struct EvalReport {
    value: f64,
    variables: Vec<String>,
    gradient: Vec<f64>,
    hessian: Vec<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    higher: Option<Vec<f64>>,
}

fn run_eval(expr: &str, at: &str, order: usize, json: bool) -> Result<()> {
    let node = parse_expr(expr);
    let bindings = parse_bindings(at)?;
    let env = Env::seed(&bindings, order)?;
    let result = eval::eval(&node, &env)?;

    let higher = if order > 2 {
        Some(
            (1..=order)
                .map(|n| result.higher_diff(n))
                .collect::<Result<Vec<_>, _>>()?,
        )
    } else {
        None
    };

    if json {
        let report = EvalReport {
            value: result.value(),
            variables: env.names().to_vec(),
            gradient: result.gradient().to_vec(),
            hessian: result
                .hessian()
                .outer_iter()
                .map(|row| row.to_vec())
                .collect(),
            higher,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("value: {}", result.value());
    if !env.names().is_empty() {
        println!("variables: [{}]", env.names().join(", "));
        println!("gradient: {}", result.gradient());
        println!("hessian:\n{}", result.hessian());
    }
    if let Some(higher) = higher {
        for (n, d) in higher.iter().enumerate() {
            println!("order {}: {}", n + 1, d);
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct NewtonReport {
    variables: Vec<String>,
    x: Vec<f64>,
    value: f64,
    iterations: usize,
}

fn run_newton(expr: &str, start: &str, tol: f64, max_iter: usize, json: bool) -> Result<()> {
    let node = parse_expr(expr);
    let bindings = parse_bindings(start)?;
    if bindings.is_empty() {
        bail!("newton requires at least one starting binding, e.g. --start x=1");
    }

    let names: Vec<String> = bindings.iter().map(|(n, _)| n.clone()).collect();
    let start_values: Vec<f64> = bindings.iter().map(|&(_, v)| v).collect();
    let program = eval::compile(&node, &names)?;

    let opts = NewtonOptions { tol, max_iter };
    let result = newton::minimize(|vars| program.eval(vars), &start_values, &opts)?;

    if json {
        let report = NewtonReport {
            variables: names,
            x: result.x.to_vec(),
            value: result.value,
            iterations: result.iterations,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("variables: [{}]", names.join(", "));
    println!("x: {}", result.x);
    println!("value: {}", result.value);
    println!("iterations: {}", result.iterations);
    Ok(())
}
