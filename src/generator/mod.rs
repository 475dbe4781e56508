//! Fixture Generator
//!
//! Drives one run: builds the base tables, writes their data files, samples
//! range parameters, assembles every test case, and writes each script next
//! to its oracle-computed expected output.
//!
//! A case whose plan violates a precondition (for example MIN over an empty
//! selection) is logged and recorded as failed in the manifest; the other
//! cases are still generated. I/O failures abort the run.

pub mod cases;
pub mod config;
pub mod data;
pub mod sampler;
pub mod writer;

pub use cases::TestCase;
pub use config::{ExperimentConfig, GeneratorConfig};
pub use writer::{CaseRecord, CaseStatus, CaseWriter, Manifest};

use log::{error, info, warn};
use thiserror::Error;

use crate::catalog::Catalog;
use crate::query::executor::result::{OracleError, OracleResult};
use sampler::{SeededSampler, offset_for_selectivity, sample_range};

#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Manifest error: {0}")]
    Manifest(#[from] serde_json::Error),
    #[error("Oracle error: {0}")]
    Oracle(#[from] OracleError),
}

/// Selectivity of the summation range
const SUMMATION_SELECTIVITY: f64 = 0.8;
/// Width of the addition and subtraction ranges, in values
const ARITHMETIC_WIDTH: i64 = 20;
/// Selectivity of the min/max range and of the whole boss predicate
const MIN_MAX_SELECTIVITY: f64 = 0.1;

pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Result<Self, GeneratorError> {
        config.validate()?;
        Ok(Generator { config })
    }

    /// Generate every test case and the manifest
    pub fn run(&self) -> Result<Manifest, GeneratorError> {
        let config = &self.config;
        let writer = CaseWriter::new(&config.output_dir)?;
        let data_dir = config.script_data_dir.as_str();
        let mut records = Vec::new();

        let table_one = data::table_one(config.table_one_rows, config.table_one_seed)?;
        let path = writer.dir().join(data::TABLE_ONE_FILE);
        data::write_csv(&table_one, &path)?;
        info!("Wrote {} rows to {}", table_one.row_count(), path.display());

        let mut catalog = Catalog::new();
        catalog.register(table_one);

        for case in [
            cases::load_table_one(data_dir),
            cases::select_fetch(config.queries_per_select_test, false),
            cases::average_range(),
        ] {
            self.emit(&writer, Ok(case), &catalog, &mut records)?;
        }

        // Table two and every sampled range share one seeded stream
        let mut sampler = SeededSampler::new(config.seed);
        let table_two = data::table_two(&mut sampler, config.table_two_rows)?;
        let path = writer.dir().join(data::TABLE_TWO_FILE);
        data::write_csv(&table_two, &path)?;
        info!("Wrote {} rows to {}", table_two.row_count(), path.display());
        catalog.register(table_two);

        // Later cases query the table as left by the inserts
        let load_two = cases::load_table_two(data_dir);
        if let Some(after) = self.emit(&writer, Ok(load_two), &catalog, &mut records)? {
            catalog = after;
        }

        let n = config.table_two_rows;
        let planned: Vec<(u32, &str, OracleResult<TestCase>)> = vec![
            (
                5,
                "Summation",
                sample_range(&mut sampler, n, offset_for_selectivity(n, SUMMATION_SELECTIVITY))
                    .map(cases::summation),
            ),
            (
                6,
                "Addition",
                sample_range(&mut sampler, n, ARITHMETIC_WIDTH).map(cases::addition),
            ),
            (
                7,
                "Subtraction",
                sample_range(&mut sampler, n, ARITHMETIC_WIDTH).map(cases::subtraction),
            ),
            (
                8,
                "Min,Max",
                sample_range(&mut sampler, n, offset_for_selectivity(n, MIN_MAX_SELECTIVITY))
                    .map(cases::min_max),
            ),
            (9, "Big Bad Boss Test", {
                // Each of the two clauses keeps sqrt(selectivity)
                let offset = offset_for_selectivity(n, MIN_MAX_SELECTIVITY.sqrt());
                let first = sample_range(&mut sampler, n, offset);
                let second = sample_range(&mut sampler, n, offset);
                first.and_then(|a| second.map(|b| cases::boss(a, b)))
            }),
        ];

        for (number, title, case) in planned {
            let case = case.map_err(|e| (number, title, e));
            self.emit(&writer, case, &catalog, &mut records)?;
        }

        if let Some(experiment) = &config.experiment {
            for &size in &experiment.sizes {
                if size <= cases::SELECT_AT_LEAST as usize {
                    warn!(
                        "Skipping experiment size {}: too small for the select + fetch test",
                        size
                    );
                    continue;
                }

                let dir = experiment.size_dir(size);
                let size_writer = CaseWriter::new(&dir)?;
                let table = data::table_one(size, config.table_one_seed)?;
                data::write_csv(&table, &dir.join(data::TABLE_ONE_FILE))?;

                let mut size_catalog = Catalog::new();
                size_catalog.register(table);
                let size_data_dir = dir.display().to_string();

                for case in [
                    cases::load_table_one(&size_data_dir),
                    cases::select_fetch(config.queries_per_select_test, true),
                ] {
                    self.emit(&size_writer, Ok(case), &size_catalog, &mut records)?;
                }
                info!("Done generating data and tests for size {}", size);
            }
        }

        let manifest = Manifest {
            config: config.clone(),
            cases: records,
        };
        let path = writer.write_manifest(&manifest)?;
        info!("Wrote manifest to {}", path.display());
        Ok(manifest)
    }

    /// Evaluate and write one case. Returns the post-run catalog on success.
    fn emit(
        &self,
        writer: &CaseWriter,
        case: Result<TestCase, (u32, &str, OracleError)>,
        catalog: &Catalog,
        records: &mut Vec<CaseRecord>,
    ) -> Result<Option<Catalog>, GeneratorError> {
        let directory = writer.dir().to_path_buf();

        let case = match case {
            Ok(case) => case,
            Err((number, title, e)) => {
                error!("Test {} ({}) not generated: {}", number, title, e);
                records.push(CaseRecord {
                    number,
                    title: title.to_string(),
                    directory,
                    ranges: Vec::new(),
                    status: CaseStatus::Failed,
                    error: Some(e.to_string()),
                });
                return Ok(None);
            }
        };

        let (status, error, after) = match case.evaluate(catalog.clone()) {
            Ok((expected, after)) => {
                writer.write_case(&case, &expected)?;
                info!(
                    "Generated test {:02} ({}) in {}",
                    case.number,
                    case.title,
                    directory.display()
                );
                (CaseStatus::Ok, None, Some(after))
            }
            Err(e) => {
                error!("Test {} ({}) not generated: {}", case.number, case.title, e);
                (CaseStatus::Failed, Some(e.to_string()), None)
            }
        };

        records.push(CaseRecord {
            number: case.number,
            title: case.title.clone(),
            directory,
            ranges: case.ranges.clone(),
            status,
            error,
        });
        Ok(after)
    }
}
