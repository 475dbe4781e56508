// Output Sinks
//
// Writes each test case as a `testNNgen.dsl` script and `testNNgen.exp`
// expected output, and the run manifest as JSON.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::cases::TestCase;
use super::config::GeneratorConfig;
use super::sampler::RangeParams;
use super::GeneratorError;

pub const MANIFEST_FILE: &str = "manifest.json";

/// Outcome of one test case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    Ok,
    Failed,
}

/// Manifest entry for one test case
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseRecord {
    pub number: u32,
    pub title: String,
    pub directory: PathBuf,
    pub ranges: Vec<RangeParams>,
    pub status: CaseStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Everything a run produced, in generation order
#[derive(Debug, Clone, Serialize)]
pub struct Manifest {
    pub config: GeneratorConfig,
    pub cases: Vec<CaseRecord>,
}

impl Manifest {
    pub fn failures(&self) -> impl Iterator<Item = &CaseRecord> {
        self.cases
            .iter()
            .filter(|c| c.status == CaseStatus::Failed)
    }
}

/// File stem shared by the script and expected-output files
pub fn case_stem(number: u32) -> String {
    format!("test{:02}gen", number)
}

/// Writes test-case file pairs into one directory
pub struct CaseWriter {
    dir: PathBuf,
}

impl CaseWriter {
    /// Create the writer, creating `dir` if needed
    pub fn new(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(CaseWriter { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn script_path(&self, number: u32) -> PathBuf {
        self.dir.join(format!("{}.dsl", case_stem(number)))
    }

    pub fn expected_path(&self, number: u32) -> PathBuf {
        self.dir.join(format!("{}.exp", case_stem(number)))
    }

    /// Write both files of a case
    pub fn write_case(&self, case: &TestCase, expected: &str) -> io::Result<()> {
        fs::write(self.script_path(case.number), case.script())?;
        fs::write(self.expected_path(case.number), expected)
    }

    pub fn write_manifest(&self, manifest: &Manifest) -> Result<PathBuf, GeneratorError> {
        let path = self.dir.join(MANIFEST_FILE);
        let json = serde_json::to_string_pretty(manifest)?;
        fs::write(&path, json + "\n")?;
        Ok(path)
    }
}
