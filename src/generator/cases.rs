//! Test-Case Oracle Assembler
//!
//! Each builder returns the command plan of one numbered test case from
//! already-resolved parameters. The same plan is rendered as the script and
//! evaluated by [`OracleEngine`] for the expected output, so the two files
//! are paired line for line by construction.

use crate::catalog::Catalog;
use crate::common::Bound;
use crate::query::executor::OracleEngine;
use crate::query::executor::operators::{AggregateType, ArithmeticOp};
use crate::query::executor::result::OracleResult;
use crate::query::script::{self, Command};
use super::data::{self, DB_NAME, TABLE_ONE, TABLE_TWO};
use super::sampler::RangeParams;

/// Upper bound of the first select + fetch group (`col1 < 20`)
pub const SELECT_LESS_THAN: i64 = 20;
/// Lower bound of the second select + fetch group (`col1 >= 987`)
pub const SELECT_AT_LEAST: i64 = 987;
/// Range of the average test
pub const AVERAGE_RANGE: RangeParams = RangeParams { low: 956, high: 972 };

/// One numbered test case
#[derive(Debug, Clone, PartialEq)]
pub struct TestCase {
    pub number: u32,
    pub title: String,
    pub commands: Vec<Command>,
    /// Sampled ranges the plan was built from, in sampling order
    pub ranges: Vec<RangeParams>,
}

impl TestCase {
    fn new(number: u32, title: &str) -> Self {
        TestCase {
            number,
            title: title.to_string(),
            commands: Vec::new(),
            ranges: Vec::new(),
        }
    }

    fn push(&mut self, cmd: Command) -> &mut Self {
        self.commands.push(cmd);
        self
    }

    fn comment(&mut self, text: impl Into<String>) -> &mut Self {
        self.push(Command::comment(text))
    }

    /// Script text sent to the engine under test
    pub fn script(&self) -> String {
        script::render(&self.commands)
    }

    /// Expected output, plus the catalog as left by any inserts in the plan
    pub fn evaluate(&self, catalog: Catalog) -> OracleResult<(String, Catalog)> {
        let mut engine = OracleEngine::new(catalog);
        let expected = engine.run(&self.commands)?;
        Ok((expected, engine.into_catalog()))
    }
}

fn column(table: &str, name: &str) -> String {
    format!("{}.{}", table, name)
}

fn create_table(case: &mut TestCase, table: &str, columns: &[&str], file: &str, data_dir: &str) {
    let short = table.rsplit_once('.').map(|(_, t)| t).unwrap_or(table);
    case.push(Command::CreateTable {
        name: short.to_string(),
        db: DB_NAME.to_string(),
        columns: columns.len(),
    });
    for col in columns {
        case.push(Command::CreateColumn {
            name: col.to_string(),
            table: table.to_string(),
        });
    }
    case.push(Command::Load {
        path: format!("{}/{}", data_dir, file),
    });
}

fn all_aggregates(case: &mut TestCase, i: usize, source: &str) {
    case.push(Command::aggregate(&format!("a{}", i), AggregateType::Avg, source))
        .push(Command::aggregate(&format!("sum{}", i), AggregateType::Sum, source))
        .push(Command::aggregate(&format!("min{}", i), AggregateType::Min, source))
        .push(Command::aggregate(&format!("max{}", i), AggregateType::Max, source))
        .comment("");
}

/// Test 1: create and load the two-column table
pub fn load_table_one(data_dir: &str) -> TestCase {
    let mut case = TestCase::new(1, "Load+create tbl1");
    case.comment("Load+create Data and shut down of tbl1 which has 1 attribute only")
        .push(Command::CreateDb {
            name: DB_NAME.to_string(),
        });
    create_table(&mut case, TABLE_ONE, &["col1", "col2"], data::TABLE_ONE_FILE, data_dir);
    case.push(Command::Shutdown);
    case
}

/// Test 2: select + fetch, `queries` times per group.
/// With `experiment` each fetch is also aggregated and the second group
/// prints nothing.
pub fn select_fetch(queries: usize, experiment: bool) -> TestCase {
    let mut case = TestCase::new(2, "Select + Fetch");
    case.comment("Test Select + Fetch").comment("");

    let col1 = column(TABLE_ONE, "col1");
    let col2 = column(TABLE_ONE, "col2");

    for i in 1..=queries {
        let (s, f) = (format!("s{}", i), format!("f{}", i));
        case.comment(format!("SELECT col1 FROM tbl1 WHERE col1 < {};", SELECT_LESS_THAN))
            .push(Command::select(&s, &col1, Bound::Unbounded, Bound::at(SELECT_LESS_THAN)))
            .push(Command::fetch(&f, &col1, &s));
        if experiment {
            all_aggregates(&mut case, i, &f);
        }
        case.push(Command::print(&[f.as_str()]));
    }

    for i in queries + 1..=2 * queries {
        let (s, f) = (format!("s{}", i), format!("f{}", i));
        case.comment(format!("SELECT col2 FROM tbl1 WHERE col1 >= {};", SELECT_AT_LEAST))
            .push(Command::select(&s, &col1, Bound::at(SELECT_AT_LEAST), Bound::Unbounded))
            .push(Command::fetch(&f, &col2, &s));
        if experiment {
            all_aggregates(&mut case, i, &f);
        } else {
            case.push(Command::print(&[f.as_str()]));
        }
    }
    case
}

/// Test 3: average over a fixed range
pub fn average_range() -> TestCase {
    let mut case = TestCase::new(3, "Multiple Selects + Average");
    let RangeParams { low, high } = AVERAGE_RANGE;
    case.comment("Test Multiple Selects + Average")
        .comment("")
        .comment(format!(
            "SELECT avg(col2) FROM tbl1 WHERE col1 >= {} and col1 < {};",
            low, high
        ))
        .push(Command::select("s1", &column(TABLE_ONE, "col1"), Bound::at(low), Bound::at(high)))
        .push(Command::fetch("f1", &column(TABLE_ONE, "col2"), "s1"))
        .push(Command::aggregate("a1", AggregateType::Avg, "f1"))
        .push(Command::print(&["a1"]));
    case
}

/// Test 4: create, load and insert into the four-column table
pub fn load_table_two(data_dir: &str) -> TestCase {
    let mut case = TestCase::new(4, "Load+create+insert tbl2");
    case.comment("Load Test Data 2")
        .comment("")
        .comment("Load+create+insert Data and shut down of tbl2 which has 4 attributes");
    create_table(
        &mut case,
        TABLE_TWO,
        &["col1", "col2", "col3", "col4"],
        data::TABLE_TWO_FILE,
        data_dir,
    );
    for row in data::insert_rows() {
        case.push(Command::RelationalInsert {
            table: TABLE_TWO.to_string(),
            values: row,
        });
    }
    case.push(Command::Shutdown);
    case
}

fn range_comment(select: &str, r: &RangeParams) -> String {
    format!("{} FROM tbl2 WHERE col1 >= {} AND col1 < {};", select, r.low, r.high)
}

/// Test 5: sum over a range, then over the whole column
pub fn summation(range: RangeParams) -> TestCase {
    let mut case = TestCase::new(5, "Summation");
    case.ranges.push(range);
    case.comment("Summation")
        .comment("")
        .comment(range_comment("SELECT SUM(col3)", &range))
        .push(Command::select(
            "s1",
            &column(TABLE_TWO, "col1"),
            range.low_bound(),
            range.high_bound(),
        ))
        .push(Command::fetch("f1", &column(TABLE_TWO, "col3"), "s1"))
        .push(Command::aggregate("a1", AggregateType::Sum, "f1"))
        .push(Command::print(&["a1"]))
        .comment("")
        .comment("SELECT SUM(col1) FROM tbl2;")
        .push(Command::aggregate_column("a2", AggregateType::Sum, &column(TABLE_TWO, "col1")))
        .push(Command::print(&["a2"]));
    case
}

/// Test 6: `col2 + col3` over a range
pub fn addition(range: RangeParams) -> TestCase {
    let mut case = TestCase::new(6, "Addition");
    case.ranges.push(range);
    case.comment("Addition")
        .comment("")
        .comment(range_comment("SELECT col2+col3", &range))
        .push(Command::select(
            "s11",
            &column(TABLE_TWO, "col1"),
            range.low_bound(),
            range.high_bound(),
        ))
        .push(Command::fetch("f11", &column(TABLE_TWO, "col2"), "s11"))
        .push(Command::fetch("f12", &column(TABLE_TWO, "col3"), "s11"))
        .push(Command::arithmetic("a11", ArithmeticOp::Add, "f11", "f12"))
        .push(Command::print(&["a11"]));
    case
}

/// Test 7: `col3 - col2` over a range
pub fn subtraction(range: RangeParams) -> TestCase {
    let mut case = TestCase::new(7, "Subtraction");
    case.ranges.push(range);
    case.comment("Subtraction")
        .comment("")
        .comment(range_comment("SELECT col3-col2", &range))
        .push(Command::select(
            "s21",
            &column(TABLE_TWO, "col1"),
            range.low_bound(),
            range.high_bound(),
        ))
        .push(Command::fetch("f21", &column(TABLE_TWO, "col2"), "s21"))
        .push(Command::fetch("f22", &column(TABLE_TWO, "col3"), "s21"))
        .push(Command::arithmetic("s21", ArithmeticOp::Sub, "f22", "f21"))
        .push(Command::print(&["s21"]));
    case
}

/// Test 8: min and max over the whole column and over a range
pub fn min_max(range: RangeParams) -> TestCase {
    let mut case = TestCase::new(8, "Min,Max");
    case.ranges.push(range);
    let col1 = column(TABLE_TWO, "col1");
    let col2 = column(TABLE_TWO, "col2");

    case.comment("Min,Max").comment("");

    for (function, label, whole, s, fa, ma, fb, mb) in [
        (AggregateType::Min, "Min", "a1", "s1", "f1", "m1", "f2", "m2"),
        (AggregateType::Max, "Max", "a2", "s21", "f21", "m21", "f22", "m22"),
    ] {
        let name = function.name();
        if function == AggregateType::Max {
            case.comment("").comment("");
        }
        case.comment(label)
            .comment(format!("SELECT {}(col1) FROM tbl2;", name))
            .push(Command::aggregate_column(whole, function, &col1))
            .push(Command::print(&[whole]))
            .comment("")
            .comment("")
            .comment(range_comment(&format!("SELECT {}(col1)", name), &range))
            .push(Command::select(s, &col1, range.low_bound(), range.high_bound()))
            .push(Command::fetch(fa, &col1, s))
            .push(Command::aggregate(ma, function, fa))
            .push(Command::print(&[ma]))
            .comment("")
            .comment(range_comment(&format!("SELECT {}(col2)", name), &range))
            .push(Command::fetch(fb, &col2, s))
            .push(Command::aggregate(mb, function, fb))
            .push(Command::print(&[mb]));
    }
    case
}

/// Test 9: conjunctive range on `col1` and `col2` feeding several outputs
pub fn boss(first: RangeParams, second: RangeParams) -> TestCase {
    let mut case = TestCase::new(9, "Big Bad Boss Test");
    case.ranges.extend([first, second]);

    let col1 = column(TABLE_TWO, "col1");
    let col2 = column(TABLE_TWO, "col2");
    let col3 = column(TABLE_TWO, "col3");
    let predicate = format!(
        "(col1 >= {} AND col1 < {}) AND (col2 >= {} AND col2 < {});",
        first.low, first.high, second.low, second.high
    );

    let chained_select = |case: &mut TestCase| {
        case.push(Command::select("s1", &col1, first.low_bound(), first.high_bound()))
            .push(Command::fetch("sf1", &col2, "s1"))
            .push(Command::select_from("s2", "s1", "sf1", second.low_bound(), second.high_bound()));
    };

    case.comment("Big Bad Boss Test! Milestone 1")
        .comment("It's basically just the previous tests put together")
        .comment("But also, its.... Boss test!")
        .push(Command::Blank)
        .comment(format!(
            "SELECT min(col2), max(col3), sum(col3-col2) FROM tbl2 WHERE {}",
            predicate
        ));
    chained_select(&mut case);
    case.push(Command::fetch("f2", &col2, "s2"))
        .push(Command::fetch("f3", &col3, "s2"))
        .push(Command::aggregate("out11", AggregateType::Min, "f2"))
        .push(Command::aggregate("out12", AggregateType::Max, "f3"))
        .push(Command::arithmetic("sub32", ArithmeticOp::Sub, "f3", "f2"))
        .push(Command::aggregate("out13", AggregateType::Sum, "sub32"))
        .push(Command::print(&["out11", "out12", "out13"]))
        .push(Command::Blank)
        .push(Command::Blank);

    case.comment(format!(
        "SELECT avg(col1+col2), min(col2), max(col3), avg(col3-col2), sum(col3-col2) \
         FROM tbl2 WHERE {}",
        predicate
    ));
    chained_select(&mut case);
    case.push(Command::fetch("f1", &col1, "s2"))
        .push(Command::fetch("f2", &col2, "s2"))
        .push(Command::fetch("f3", &col3, "s2"))
        .push(Command::arithmetic("add12", ArithmeticOp::Add, "f1", "f2"))
        .push(Command::aggregate("out1", AggregateType::Avg, "add12"))
        .push(Command::aggregate("out2", AggregateType::Min, "f2"))
        .push(Command::aggregate("out3", AggregateType::Max, "f3"))
        .push(Command::arithmetic("sub32", ArithmeticOp::Sub, "f3", "f2"))
        .push(Command::aggregate("out4", AggregateType::Avg, "sub32"))
        .push(Command::aggregate("out5", AggregateType::Sum, "sub32"))
        .push(Command::print(&["out1", "out2", "out3", "out4", "out5"]));
    case
}
