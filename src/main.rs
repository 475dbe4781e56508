use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use coloracle::generator::config::{DEFAULT_OUTPUT_DIR, DEFAULT_QUERIES, DEFAULT_SEED};
use coloracle::{ExperimentConfig, Generator, GeneratorConfig};

#[derive(Parser)]
#[command(author, version, about = "Generate DSL test scripts and their expected output")]
struct Cli {
    /// Rows in the four-column table (db1.tbl2)
    table_two_rows: usize,

    /// Seed for the four-column table and every sampled range
    #[arg(default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Directory the generated files are written to
    #[arg(default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Data directory written into load(...) commands [default: OUTPUT_DIR]
    script_data_dir: Option<String>,

    /// Also regenerate tests 1-2 over growing tables
    #[arg(short, long)]
    experiment: bool,

    /// Base directory of the experiment sweep [default: OUTPUT_DIR/experiment]
    #[arg(long)]
    experiment_dir: Option<PathBuf>,

    /// Queries per group in the select + fetch test
    #[arg(short, long, default_value_t = DEFAULT_QUERIES)]
    queries: usize,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = GeneratorConfig::new(cli.table_two_rows)
        .with_output_dir(&cli.output_dir)
        .with_seed(cli.seed);
    config.queries_per_select_test = cli.queries;

    if let Some(dir) = cli.script_data_dir {
        config = config.with_script_data_dir(dir);
    }
    if cli.experiment {
        let base = cli
            .experiment_dir
            .unwrap_or_else(|| cli.output_dir.join("experiment"));
        config = config.with_experiment(ExperimentConfig::new(base));
    }

    let generator = Generator::new(config).context("Invalid generator configuration")?;
    let manifest = generator
        .run()
        .with_context(|| format!("Failed to generate tests in {}", cli.output_dir.display()))?;

    let failed = manifest.failures().count();
    println!(
        "Generated {} test cases in {} ({} failed)",
        manifest.cases.len() - failed,
        cli.output_dir.display(),
        failed
    );
    for case in manifest.failures() {
        eprintln!(
            "  test {:02} ({}): {}",
            case.number,
            case.title,
            case.error.as_deref().unwrap_or("unknown error")
        );
    }

    Ok(())
}
