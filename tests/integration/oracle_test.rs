use anyhow::Result;

#[path = "../common/mod.rs"]
mod common;
use common::{catalog_with, int_column};

use coloracle::common::{Bound, Value};
use coloracle::generator::cases::{self, AVERAGE_RANGE};
use coloracle::generator::data;
use coloracle::generator::sampler::RangeParams;
use coloracle::query::executor::operators::{AggregateType, ArithmeticOp};
use coloracle::query::script;
use coloracle::{Catalog, Command, OracleEngine, OracleError};

fn table_one_catalog() -> Result<Catalog> {
    let mut catalog = Catalog::new();
    catalog.register(data::table_one(1000, 47)?);
    Ok(catalog)
}

fn ints(catalog: &Catalog, column: &str) -> Result<Vec<i64>> {
    Ok(catalog
        .resolve_column(column)?
        .values()
        .iter()
        .map(|v| match v {
            Value::Int(i) => *i,
            Value::Float(f) => *f as i64,
        })
        .collect())
}

#[test]
fn test_select_below_twenty() -> Result<()> {
    let commands = vec![
        Command::select("s1", "db1.tbl1.col1", Bound::Unbounded, Bound::at(20)),
        Command::fetch("f1", "db1.tbl1.col1", "s1"),
        Command::print(&["f1"]),
    ];

    let mut engine = OracleEngine::new(table_one_catalog()?);
    let output = engine.run(&commands)?;

    let expected: String = (0..20).map(|i| format!("{}\n", i)).collect();
    assert_eq!(output, expected);
    assert_eq!(
        script::render(&commands),
        "s1=select(db1.tbl1.col1,null,20)\nf1=fetch(db1.tbl1.col1,s1)\nprint(f1)\n"
    );
    Ok(())
}

#[test]
fn test_fetch_col2_where_col1_below_twenty() -> Result<()> {
    let catalog = table_one_catalog()?;
    let col2 = ints(&catalog, "db1.tbl1.col2")?;

    let mut engine = OracleEngine::new(catalog);
    let output = engine.run(&[
        Command::select("s1", "db1.tbl1.col1", Bound::Unbounded, Bound::at(20)),
        Command::fetch("f1", "db1.tbl1.col2", "s1"),
        Command::print(&["f1"]),
    ])?;

    // col1 is 0..n, so the first 20 rows qualify in order
    let expected: String = col2[..20].iter().map(|v| format!("{}\n", v)).collect();
    assert_eq!(output, expected);
    Ok(())
}

#[test]
fn test_average_over_fixed_range() -> Result<()> {
    let catalog = table_one_catalog()?;
    let col2 = ints(&catalog, "db1.tbl1.col2")?;

    let RangeParams { low, high } = AVERAGE_RANGE;
    let picked = &col2[low as usize..high as usize];
    let mean = picked.iter().sum::<i64>() as f64 / picked.len() as f64;
    let rounded = (mean * 100.0).round_ties_even() / 100.0;

    let (output, _) = cases::average_range().evaluate(catalog)?;
    assert_eq!(output, format!("{:.2}\n", rounded));
    Ok(())
}

#[test]
fn test_empty_selection_prints_defaults() -> Result<()> {
    let catalog = catalog_with("db1.tbl2", vec![int_column("col1", &[1, 2, 3])])?;
    let mut engine = OracleEngine::new(catalog);

    let output = engine.run(&[
        Command::select("s1", "db1.tbl2.col1", Bound::at(100), Bound::at(200)),
        Command::fetch("f1", "db1.tbl2.col1", "s1"),
        Command::aggregate("a1", AggregateType::Avg, "f1"),
        Command::aggregate("a2", AggregateType::Sum, "f1"),
        Command::print(&["a1", "a2"]),
        Command::print(&["f1"]),
    ])?;
    assert_eq!(output, "0.00,0\n");

    let err = engine
        .execute(&Command::aggregate("m", AggregateType::Min, "f1"))
        .unwrap_err();
    assert_eq!(err, OracleError::EmptyAggregate(AggregateType::Min));
    Ok(())
}

#[test]
fn test_variable_reassignment() -> Result<()> {
    let catalog = catalog_with(
        "db1.tbl2",
        vec![int_column("col1", &[0, 1, 2]), int_column("col2", &[5, 6, 7])],
    )?;
    let mut engine = OracleEngine::new(catalog);

    // s21 is first a position set, then a value vector
    let output = engine.run(&[
        Command::select("s21", "db1.tbl2.col1", Bound::at(1), Bound::Unbounded),
        Command::fetch("f21", "db1.tbl2.col1", "s21"),
        Command::fetch("f22", "db1.tbl2.col2", "s21"),
        Command::arithmetic("s21", ArithmeticOp::Sub, "f22", "f21"),
        Command::print(&["s21"]),
    ])?;
    assert_eq!(output, "5\n5\n");
    Ok(())
}

#[test]
fn test_inserted_rows_are_queried() -> Result<()> {
    let catalog = catalog_with(
        "db1.tbl2",
        vec![
            int_column("col1", &[0, 1]),
            int_column("col2", &[10, 11]),
            int_column("col3", &[20, 21]),
            int_column("col4", &[30, 31]),
        ],
    )?;

    let (_, after) = cases::load_table_two("/data").evaluate(catalog)?;
    assert_eq!(after.table(data::TABLE_TWO)?.row_count(), 12);

    // col1 over [-10, 0) holds exactly the ten inserted rows
    let (output, _) = cases::summation(RangeParams { low: -10, high: 0 }).evaluate(after)?;
    let inserted_col3: i64 = data::INSERT_ROWS.iter().map(|r| r[2]).sum();
    let whole_col1: i64 = data::INSERT_ROWS.iter().map(|r| r[0]).sum::<i64>() + 1;
    assert_eq!(output, format!("{}\n{}\n", inserted_col3, whole_col1));
    Ok(())
}

#[test]
fn test_boss_lines_agree() -> Result<()> {
    let catalog = catalog_with(
        "db1.tbl2",
        vec![
            int_column("col1", &[-3, -1, 0, 2, 4, 8]),
            int_column("col2", &[7, -2, 3, 5, 1, 4]),
            int_column("col3", &[10, 20, 30, 40, 50, 60]),
            int_column("col4", &[0, 0, 0, 0, 0, 0]),
        ],
    )?;

    // col1 in [-1, 5) -> rows 1..=4; col2 in [1, 6) -> rows 2, 3, 4
    let case = cases::boss(RangeParams { low: -1, high: 5 }, RangeParams { low: 1, high: 6 });
    let (output, _) = case.evaluate(catalog)?;

    // col1+col2 = 3, 7, 5; col3-col2 = 27, 35, 49
    assert_eq!(output, "1,50,111\n5.00,1,50,37.00,111\n");
    assert!(case.script().contains("s2=select(s1,sf1,1,6)\n"));
    Ok(())
}
