//! Integration Test Harness
//!
//! Runs every integration test category and prints a summary.
//!
//! # Usage
//!
//! Run all tests:
//! ```text
//! cargo run -p integration-tests
//! ```
//!
//! Run specific test categories:
//! ```text
//! cargo test -p integration-tests --test wire_conformance_tests
//! cargo test -p integration-tests --test truncation_tests
//! cargo test -p integration-tests --test fault_table_tests
//! cargo test -p integration-tests --test client_flow_tests
//! ```
//!
//! Run with increased logging:
//! ```text
//! RUST_LOG=debug cargo run -p integration-tests
//! ```

use std::process::Command;
use std::time::{Duration, Instant};

/// Test category
#[derive(Debug, Clone)]
struct TestCategory {
    name: &'static str,
    description: &'static str,
    test_name: &'static str,
}

const TEST_CATEGORIES: &[TestCategory] = &[
    TestCategory {
        name: "Wire Conformance",
        description: "Byte-exact SAMR stubs and request PDUs",
        test_name: "wire_conformance_tests",
    },
    TestCategory {
        name: "Truncation",
        description: "Every short or over-long response is rejected",
        test_name: "truncation_tests",
    },
    TestCategory {
        name: "Fault Table",
        description: "Total classification of fault and reject codes",
        test_name: "fault_table_tests",
    },
    TestCategory {
        name: "Client Flows",
        description: "SamrClient against an in-memory SAM peer",
        test_name: "client_flow_tests",
    },
];

fn print_banner() {
    println!("{}", "=".repeat(80));
    println!("  MS-SAMR / DCE RPC integration test suite");
    println!("{}", "=".repeat(80));
    println!();
}

fn print_test_categories() {
    for (i, category) in TEST_CATEGORIES.iter().enumerate() {
        println!("  {}. {:<18} {}", i + 1, category.name, category.description);
    }
    println!();
}

/// Outcome of one `cargo test --test <name>` run
struct CategoryResult {
    name: &'static str,
    passed: bool,
    duration: Duration,
    detail: String,
}

fn run_test_category(category: &TestCategory) -> CategoryResult {
    println!("--- {} ({})", category.name, category.test_name);

    let start = Instant::now();
    let output = Command::new("cargo")
        .args(["test", "-p", "integration-tests", "--test", category.test_name])
        .output();
    let duration = start.elapsed();

    let (passed, detail) = match output {
        Ok(output) => {
            print!("{}", String::from_utf8_lossy(&output.stdout));
            if !output.status.success() {
                eprint!("{}", String::from_utf8_lossy(&output.stderr));
            }
            match output.status.code() {
                Some(0) => (true, "ok".to_string()),
                code => (false, format!("exit code {:?}", code)),
            }
        }
        Err(e) => (false, format!("failed to launch cargo: {}", e)),
    };

    CategoryResult {
        name: category.name,
        passed,
        duration,
        detail,
    }
}

fn main() {
    print_banner();
    print_test_categories();

    let results: Vec<CategoryResult> = TEST_CATEGORIES.iter().map(run_test_category).collect();
    let failed = results.iter().filter(|r| !r.passed).count();

    println!("\n{:<20} {:<6} {:<12} Details", "Category", "Status", "Duration");
    println!("{}", "-".repeat(80));
    for result in &results {
        let status = if result.passed { "PASS" } else { "FAIL" };
        println!("{:<20} {:<6} {:<12?} {}", result.name, status, result.duration, result.detail);
    }

    if failed > 0 {
        println!("\n{} of {} categories failed", failed, results.len());
        std::process::exit(1);
    }
    println!("\nAll {} categories passed", results.len());
}
