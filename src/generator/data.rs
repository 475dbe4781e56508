// Fixture Data
//
// Builds the two base tables and writes them as the CSV files the engine
// under test loads.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::catalog::{Column, Table};
use crate::common::Value;
use crate::query::executor::result::OracleResult;
use super::sampler::SeededSampler;

pub const DB_NAME: &str = "db1";
pub const TABLE_ONE: &str = "db1.tbl1";
pub const TABLE_TWO: &str = "db1.tbl2";
pub const TABLE_ONE_FILE: &str = "data1_generated.csv";
pub const TABLE_TWO_FILE: &str = "data2_generated.csv";

/// Rows appended to the four-column table by `relational_insert`
pub const INSERT_ROWS: [[i64; 4]; 10] = [
    [-1, -11, -111, -1111],
    [-2, -22, -222, -2222],
    [-3, -33, -333, -2222],
    [-4, -44, -444, -2222],
    [-5, -55, -555, -2222],
    [-6, -66, -666, -2222],
    [-7, -77, -777, -2222],
    [-8, -88, -888, -2222],
    [-9, -99, -999, -2222],
    [-10, -11, 0, -34],
];

const COL4_LOW: i64 = (1 << 31) - 10_000;
const COL4_HIGH: i64 = 1 << 31;

/// `INSERT_ROWS` as value rows
pub fn insert_rows() -> Vec<Vec<Value>> {
    INSERT_ROWS
        .iter()
        .map(|row| row.iter().copied().map(Value::Int).collect())
        .collect()
}

/// Two-column table: `col1 = 0..rows`, `col2 = 10..rows+10` shuffled
pub fn table_one(rows: usize, shuffle_seed: u64) -> OracleResult<Table> {
    let mut col2: Vec<i64> = (10..rows as i64 + 10).collect();
    SeededSampler::new(shuffle_seed).shuffle(&mut col2);

    Table::new(
        TABLE_ONE,
        vec![
            Column::from_ints("col1", 0..rows as i64),
            Column::from_ints("col2", col2),
        ],
    )
}

/// Four-column table drawn from `sampler`:
/// - `col1` uniform in `[-rows/2, rows/2)`
/// - `col2` uniform in the same interval, plus `col1`
/// - `col3` uniform in `[0, 100)`, so heavily duplicated
/// - `col4` uniform in `[2^31 - 10000, 2^31)`
pub fn table_two(sampler: &mut SeededSampler, rows: usize) -> OracleResult<Table> {
    let half = rows as i64 / 2;

    // Row-major draw of the initial rows x 4 block
    let block = sampler.uniform_column(-half, half.max(-half + 1), rows * 4)?;
    let col1: Vec<i64> = block.chunks(4).map(|r| r[0]).collect();
    let col2: Vec<i64> = block.chunks(4).zip(&col1).map(|(r, c1)| r[1] + c1).collect();
    let col3 = sampler.uniform_column(0, 100, rows)?;
    let col4 = sampler.uniform_column(COL4_LOW, COL4_HIGH, rows)?;

    Table::new(
        TABLE_TWO,
        vec![
            Column::from_ints("col1", col1),
            Column::from_ints("col2", col2),
            Column::from_ints("col3", col3),
            Column::from_ints("col4", col4),
        ],
    )
}

/// Header of a data file: the qualified name of every column
pub fn header_line(table: &Table) -> String {
    table
        .columns()
        .iter()
        .map(|c| format!("{}.{}", table.name(), c.name()))
        .collect::<Vec<_>>()
        .join(",")
}

/// Write `table` as comma separated rows with a qualified-name header
pub fn write_csv(table: &Table, path: &Path) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    writeln!(out, "{}", header_line(table))?;

    for row in 0..table.row_count() {
        for (i, col) in table.columns().iter().enumerate() {
            if i > 0 {
                out.write_all(b",")?;
            }
            if let Some(v) = col.get(row) {
                write!(out, "{}", v)?;
            }
        }
        out.write_all(b"\n")?;
    }
    out.flush()
}
