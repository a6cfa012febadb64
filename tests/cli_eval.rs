// Copyright 2026 the ADCST developers.
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at:
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

// Part of the ADCST project (automatic differentiation with second-order and
// Taylor-mode derivatives).

use std::process::Command;

fn adcst(args: &[&str]) -> std::process::Output {
    Command::new("cargo")
        .args(["run", "--quiet", "--"])
        .args(args)
        .output()
        .expect("run")
}

#[test]
fn eval_prints_value_and_gradient() {
    let output = adcst(&["eval", "x*y", "--at", "x=5,y=3"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("value: 15"), "{stdout}");
    assert!(stdout.contains("gradient"), "{stdout}");
    assert!(stdout.contains("hessian"), "{stdout}");
}

#[test]
fn eval_json_report_is_machine_readable() {
    let output = adcst(&["eval", "x*y", "--at", "x=5,y=3", "--json"]);

    assert!(output.status.success());
    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("valid JSON report");
    assert_eq!(report["value"], 15.0);
    assert_eq!(report["gradient"][0], 3.0);
    assert_eq!(report["gradient"][1], 5.0);
    assert_eq!(report["hessian"][0][1], 1.0);
}

#[test]
fn eval_taylor_orders_are_printed() {
    let output = adcst(&["eval", "x^5", "--at", "x=3", "--order", "6"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("order 5: 120"), "{stdout}");
    assert!(stdout.contains("order 6: 0"), "{stdout}");
}

#[test]
fn newton_reports_the_minimum() {
    let output = adcst(&[
        "newton",
        "100*(y - x^2)^2 + (1 - x)^2",
        "--start",
        "x=2,y=1",
    ]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("iterations:"), "{stdout}");
    assert!(stdout.contains("value: 0"), "{stdout}");
}

#[test]
fn parse_errors_exit_nonzero_with_a_caret() {
    let output = adcst(&["eval", "1 +"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains('^'), "{stderr}");
}
