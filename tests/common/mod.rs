#![allow(dead_code)]

use std::fs;
use std::path::Path;

use anyhow::Result;
use tempfile::TempDir;

use coloracle::catalog::{Catalog, Column, Table};
use coloracle::generator::writer::case_stem;
use coloracle::{Generator, GeneratorConfig, Manifest};

// Build a column of integers
pub fn int_column(name: &str, values: &[i64]) -> Column {
    Column::from_ints(name, values.iter().copied())
}

// Catalog holding a single table
pub fn catalog_with(name: &str, columns: Vec<Column>) -> Result<Catalog> {
    let mut catalog = Catalog::new();
    catalog.register(Table::new(name, columns)?);
    Ok(catalog)
}

// Run the generator into a fresh temporary directory
pub fn generate(table_two_rows: usize, seed: u64) -> Result<(TempDir, Manifest)> {
    let dir = tempfile::tempdir()?;
    let config = GeneratorConfig::new(table_two_rows)
        .with_output_dir(dir.path())
        .with_seed(seed);
    let manifest = Generator::new(config)?.run()?;
    Ok((dir, manifest))
}

// Script and expected output of one generated case
pub fn read_case(dir: &Path, number: u32) -> Result<(String, String)> {
    let stem = case_stem(number);
    let script = fs::read_to_string(dir.join(format!("{}.dsl", stem)))?;
    let expected = fs::read_to_string(dir.join(format!("{}.exp", stem)))?;
    Ok((script, expected))
}
