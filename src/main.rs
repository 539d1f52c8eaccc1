// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::env;
use std::time::Duration;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use millwright::config::{load_options, RunnerOptions};
use millwright::engine::BuildRunner;
use millwright::errors::BuildError;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <target>", args[0]);
        eprintln!("       {} --listTargets | -lt", args[0]);
        eprintln!("Example: {} All", args[0]);
        eprintln!();
        eprintln!("Environment:");
        eprintln!("  parallel-jobs=N       worker pool size (N>1 enables parallel mode)");
        eprintln!("  single-target=1       run only the named target");
        eprintln!("  MILLWRIGHT_OPTIONS=F  load runner options from YAML file F");
        std::process::exit(1);
    }
    let target = &args[1];

    let runner = match demo_build() {
        Ok(runner) => runner,
        Err(error) => {
            eprintln!("Failed to assemble the demo build: {:#}", error);
            std::process::exit(1);
        }
    };

    match runner.run(target).await {
        Ok(report) => std::process::exit(report.exit_code),
        Err(error) => {
            eprintln!("Build configuration error: {}", error);
            std::process::exit(1);
        }
    }
}

/// A small demonstration build: clean, compile, test, and package a
/// fictional project, with one hook of each lifecycle kind.
fn demo_build() -> anyhow::Result<BuildRunner> {
    let options = match env::var("MILLWRIGHT_OPTIONS") {
        Ok(path) => load_options(&path).context("loading runner options")?,
        Err(_) => RunnerOptions::default(),
    };

    let mut runner = BuildRunner::new().with_options(options);

    runner.describe("Removes previous build output")?;
    runner.define("Clean", || {
        simulate_work(30);
        Ok(())
    })?;

    runner.describe("Compiles the sources")?;
    runner.define("Compile", || {
        simulate_work(120);
        Ok(())
    })?;

    runner.describe("Runs the test suite")?;
    runner.define("Test", || {
        simulate_work(80);
        if env::var("DEMO_FAIL_TESTS").is_ok() {
            return Err(BuildError::test_failure("2 of 14 tests failed"));
        }
        Ok(())
    })?;

    runner.describe("Builds the distributable archive")?;
    runner.define("Package", || {
        simulate_work(60);
        Ok(())
    })?;

    runner.describe("Runs the full pipeline")?;
    runner.define("All", || Ok(()))?;

    runner.depend_on("Compile", "Clean")?;
    runner.depend_on("Test", "Compile")?;
    runner.depend_on("Package", "Compile")?;
    runner.depend_on("All", "Test")?;
    runner.depend_on("All", "Package")?;

    runner.register_build_failure_target("CollectLogs", || {
        tracing::info!("Collecting logs from the failed build");
        Ok(())
    })?;
    runner.activate_build_failure_target("CollectLogs")?;

    runner.register_final_target("Summary", || {
        tracing::info!("Demo build finished");
        Ok(())
    })?;
    runner.activate_final_target("Summary")?;

    Ok(runner)
}

fn simulate_work(millis: u64) {
    std::thread::sleep(Duration::from_millis(millis));
}
