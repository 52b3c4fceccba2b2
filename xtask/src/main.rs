use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::Command;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "wordsync workspace automation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the test suite under every backend configuration
    Verify {
        /// Skip the loom model-checking pass
        #[arg(long, default_value_t = false)]
        skip_loom: bool,
    },
    /// Benchmark both backends and write a comparison report
    Bench {
        /// Run quickly (lower sample size/time)
        #[arg(long, default_value_t = false)]
        quick: bool,

        /// Generate report only (skip running benchmarks)
        #[arg(long, default_value_t = false)]
        report_only: bool,
    },
}

/// One build configuration of the test matrix.
struct Config {
    name: &'static str,
    args: &'static [&'static str],
    rustflags: Option<&'static str>,
}

const MATRIX: &[Config] = &[
    Config {
        name: "native (default features)",
        args: &["test"],
        rustflags: None,
    },
    Config {
        name: "emulated (threaded, forced)",
        args: &["test", "--features", "emulated"],
        rustflags: None,
    },
    Config {
        name: "emulated (single-threaded)",
        args: &["test", "--no-default-features"],
        rustflags: None,
    },
    Config {
        name: "stress, release",
        args: &["test", "--release", "--test", "stress_tests"],
        rustflags: None,
    },
];

const LOOM: Config = Config {
    name: "loom models",
    args: &["test", "--release", "--test", "loom"],
    rustflags: Some("--cfg loom"),
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Verify { skip_loom } => verify(skip_loom)?,
        Commands::Bench { quick, report_only } => {
            if !report_only {
                run_benchmarks(quick)?;
            }
            generate_report()?;
        }
    }

    Ok(())
}

fn verify(skip_loom: bool) -> Result<()> {
    let mut configs: Vec<&Config> = MATRIX.iter().collect();
    if !skip_loom {
        configs.push(&LOOM);
    }

    for config in configs {
        println!("\n>>> {}", config.name);
        let start = Instant::now();

        let mut cmd = Command::new("cargo");
        cmd.args(config.args);
        if let Some(flags) = config.rustflags {
            cmd.env("RUSTFLAGS", flags);
            // Keep loom artifacts apart so the normal build cache survives.
            cmd.env("CARGO_TARGET_DIR", "target/loom");
            cmd.env("LOOM_MAX_PREEMPTIONS", "3");
        }

        let status = cmd
            .status()
            .with_context(|| format!("Failed to launch cargo for {}", config.name))?;
        if !status.success() {
            bail!("{} failed ({status})", config.name);
        }
        println!("Finished {} in {:.2?}", config.name, start.elapsed());
    }

    println!("\nAll backend configurations passed.");
    Ok(())
}

fn run_benchmarks(quick: bool) -> Result<()> {
    println!("Running backend benchmarks...");

    let mut cmd = Command::new("cargo");
    cmd.env("CARGO_INCREMENTAL", "0");
    cmd.args(["bench", "--bench", "ordering_benchmark"]);

    // Args for the test runner (Criterion) go after --
    cmd.arg("--");
    if quick {
        cmd.arg("--measurement-time").arg("0.1");
        cmd.arg("--noplot");
        cmd.arg("--sample-size").arg("10");
    }

    let status = cmd.status().context("Failed to run ordering_benchmark")?;
    if !status.success() {
        bail!("Benchmark run failed ({status})");
    }
    Ok(())
}

/// The fields of criterion's `benchmark.json` the report needs.
#[derive(Deserialize)]
struct BenchmarkInfo {
    group_id: String,
    function_id: Option<String>,
    value_str: Option<String>,
    throughput: Option<Throughput>,
}

#[derive(Deserialize)]
struct Throughput {
    #[serde(rename = "Elements")]
    elements: Option<f64>,
}

#[derive(Deserialize)]
struct Estimates {
    mean: Estimate,
}

#[derive(Deserialize)]
struct Estimate {
    point_estimate: f64,
}

/// Ops/s keyed by workload, then backend.
type Results = BTreeMap<String, BTreeMap<String, f64>>;

fn generate_report() -> Result<()> {
    println!("\n>>> Generating Report...");

    let criterion_dir = Path::new("target/criterion");
    if !criterion_dir.exists() {
        eprintln!("No criterion output found at {}", criterion_dir.display());
        return Ok(());
    }

    let mut results = Results::new();
    collect_results(criterion_dir, &mut results)?;

    let report_path = Path::new("benchmark_results/report.md");
    if let Some(parent) = report_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = fs::File::create(report_path)
        .with_context(|| format!("Failed to create {}", report_path.display()))?;

    writeln!(file, "# Backend Comparison Report")?;
    writeln!(file)?;
    writeln!(file, "| Workload | native (Ops/s) | emulated (Ops/s) | emulated vs native |")?;
    writeln!(file, "|---|---|---|---|")?;

    for (workload, by_backend) in &results {
        let native = by_backend.get("native").copied();
        let emulated = by_backend.get("emulated").copied();

        let ratio = match (native, emulated) {
            (Some(n), Some(e)) if n > 0.0 => format!("**{:.2}x**", e / n),
            _ => "-".to_string(),
        };

        writeln!(
            file,
            "| {} | {} | {} | {} |",
            workload,
            native.map_or_else(|| "N/A".to_string(), format_ops),
            emulated.map_or_else(|| "N/A".to_string(), format_ops),
            ratio
        )?;
    }

    println!("Report written to {}", report_path.display());
    Ok(())
}

fn format_ops(ops: f64) -> String {
    if ops > 1_000_000.0 {
        format!("{:.2}M", ops / 1_000_000.0)
    } else if ops > 1_000.0 {
        format!("{:.2}K", ops / 1_000.0)
    } else {
        format!("{ops:.0}")
    }
}

/// Walks criterion's output tree; every `new/` directory holding both
/// `benchmark.json` and `estimates.json` is one measurement.
fn collect_results(dir: &Path, results: &mut Results) -> Result<()> {
    let entries = match fs::read_dir(dir) {
        Ok(e) => e,
        Err(_) => return Ok(()),
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        if path.file_name().and_then(|s| s.to_str()) != Some("new") {
            collect_results(&path, results)?;
            continue;
        }

        let info_path = path.join("benchmark.json");
        let estimates_path = path.join("estimates.json");
        let (Ok(info), Ok(estimates)) = (
            fs::read_to_string(&info_path),
            fs::read_to_string(&estimates_path),
        ) else {
            continue;
        };

        let info: BenchmarkInfo = serde_json::from_str(&info)
            .with_context(|| format!("Malformed {}", info_path.display()))?;
        let estimates: Estimates = serde_json::from_str(&estimates)
            .with_context(|| format!("Malformed {}", estimates_path.display()))?;

        // Benchmarks are registered as group / operation / backend.
        let (Some(function), Some(backend)) = (info.function_id, info.value_str) else {
            continue;
        };

        let time_ns = estimates.mean.point_estimate;
        if time_ns <= 0.0 {
            continue;
        }
        let elements = info
            .throughput
            .and_then(|t| t.elements)
            .unwrap_or(1.0);

        results
            .entry(format!("{}/{}", info.group_id, function))
            .or_default()
            .insert(backend, elements * 1e9 / time_ns);
    }

    Ok(())
}
