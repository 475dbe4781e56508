//! Generator configuration
//!
//! One value threaded through the generator and its sinks. Nothing here is
//! process-wide state; experiment mode gets its own directories through
//! [`ExperimentConfig`] instead of rewriting a shared base path.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::query::executor::result::{OracleError, OracleResult};

/// Where generated files go when no directory is given
pub const DEFAULT_OUTPUT_DIR: &str = "/cs165/generated_data";

/// Rows in the two-column table
pub const TABLE_ONE_ROWS: usize = 1000;

/// Shuffle seed of the two-column table; the server side uses the same one
pub const TABLE_ONE_SEED: u64 = 47;

/// Run seed when none is given
pub const DEFAULT_SEED: u64 = 47;

/// Queries per group in the select + fetch test
pub const DEFAULT_QUERIES: usize = 2;

/// Configuration for one generator run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Directory the `.dsl`, `.exp`, data and manifest files are written to
    pub output_dir: PathBuf,
    /// Directory written into `load(...)` commands, as seen by the engine
    pub script_data_dir: String,
    pub table_one_rows: usize,
    pub table_one_seed: u64,
    pub table_two_rows: usize,
    /// Seed for the four-column table and every sampled range
    pub seed: u64,
    pub queries_per_select_test: usize,
    pub experiment: Option<ExperimentConfig>,
}

impl GeneratorConfig {
    /// Defaults for everything but the size of the four-column table
    pub fn new(table_two_rows: usize) -> Self {
        GeneratorConfig {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            script_data_dir: DEFAULT_OUTPUT_DIR.to_string(),
            table_one_rows: TABLE_ONE_ROWS,
            table_one_seed: TABLE_ONE_SEED,
            table_two_rows,
            seed: DEFAULT_SEED,
            queries_per_select_test: DEFAULT_QUERIES,
            experiment: None,
        }
    }

    /// Set the output directory; the script data directory follows it
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self.script_data_dir = self.output_dir.display().to_string();
        self
    }

    pub fn with_script_data_dir(mut self, dir: impl Into<String>) -> Self {
        self.script_data_dir = dir.into();
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_experiment(mut self, experiment: ExperimentConfig) -> Self {
        self.experiment = Some(experiment);
        self
    }

    pub fn validate(&self) -> OracleResult<()> {
        if self.table_one_rows == 0 || self.table_two_rows == 0 {
            return Err(OracleError::InvalidParameters(
                "table sizes must be positive".to_string(),
            ));
        }
        if self.queries_per_select_test == 0 {
            return Err(OracleError::InvalidParameters(
                "queries per select test must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Extra sweep that regenerates the first tests over growing tables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentConfig {
    /// One subdirectory per size is created under this directory
    pub base_dir: PathBuf,
    /// Row counts of the two-column table
    pub sizes: Vec<usize>,
}

impl ExperimentConfig {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        ExperimentConfig {
            base_dir: base_dir.into(),
            sizes: (15..26).map(|p| 1usize << p).collect(),
        }
    }

    pub fn with_sizes(mut self, sizes: Vec<usize>) -> Self {
        self.sizes = sizes;
        self
    }

    pub fn size_dir(&self, size: usize) -> PathBuf {
        self.base_dir.join(size.to_string())
    }
}
