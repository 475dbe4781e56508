// Command Script Module
//
// The command language of the engine under test. A test case is a list of
// `Command`s; `Display` renders the script text and the oracle engine
// evaluates the same list, so script and expected output cannot drift apart.

use std::fmt;

use crate::common::{Bound, Value};
use crate::query::executor::operators::{AggregateType, ArithmeticOp};

/// Source of an aggregate: a stored column or a previously assigned variable
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// Fully qualified column reference (`db1.tbl2.col1`)
    Column(String),
    Variable(String),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Column(name) | Operand::Variable(name) => write!(f, "{}", name),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Comment(String),
    Blank,
    CreateDb {
        name: String,
    },
    CreateTable {
        name: String,
        db: String,
        columns: usize,
    },
    CreateColumn {
        name: String,
        /// Qualified table name (`db1.tbl1`)
        table: String,
    },
    Load {
        path: String,
    },
    RelationalInsert {
        table: String,
        values: Vec<Value>,
    },
    /// `target=select(column,low,high)`
    Select {
        target: String,
        column: String,
        low: Bound,
        high: Bound,
    },
    /// `target=select(positions,values,low,high)`
    SelectFrom {
        target: String,
        positions: String,
        values: String,
        low: Bound,
        high: Bound,
    },
    Fetch {
        target: String,
        column: String,
        positions: String,
    },
    Aggregate {
        target: String,
        function: AggregateType,
        source: Operand,
    },
    Arithmetic {
        target: String,
        op: ArithmeticOp,
        left: String,
        right: String,
    },
    Print {
        variables: Vec<String>,
    },
    Shutdown,
}

impl Command {
    pub fn comment(text: impl Into<String>) -> Self {
        Command::Comment(text.into())
    }

    pub fn select(target: &str, column: &str, low: Bound, high: Bound) -> Self {
        Command::Select {
            target: target.to_string(),
            column: column.to_string(),
            low,
            high,
        }
    }

    pub fn select_from(
        target: &str,
        positions: &str,
        values: &str,
        low: Bound,
        high: Bound,
    ) -> Self {
        Command::SelectFrom {
            target: target.to_string(),
            positions: positions.to_string(),
            values: values.to_string(),
            low,
            high,
        }
    }

    pub fn fetch(target: &str, column: &str, positions: &str) -> Self {
        Command::Fetch {
            target: target.to_string(),
            column: column.to_string(),
            positions: positions.to_string(),
        }
    }

    /// Aggregate over a variable
    pub fn aggregate(target: &str, function: AggregateType, source: &str) -> Self {
        Command::Aggregate {
            target: target.to_string(),
            function,
            source: Operand::Variable(source.to_string()),
        }
    }

    /// Aggregate over a whole stored column
    pub fn aggregate_column(target: &str, function: AggregateType, column: &str) -> Self {
        Command::Aggregate {
            target: target.to_string(),
            function,
            source: Operand::Column(column.to_string()),
        }
    }

    pub fn arithmetic(target: &str, op: ArithmeticOp, left: &str, right: &str) -> Self {
        Command::Arithmetic {
            target: target.to_string(),
            op,
            left: left.to_string(),
            right: right.to_string(),
        }
    }

    pub fn print(variables: &[&str]) -> Self {
        Command::Print {
            variables: variables.iter().map(|v| v.to_string()).collect(),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Comment(text) if text.is_empty() => write!(f, "--"),
            Command::Comment(text) => write!(f, "-- {}", text),
            Command::Blank => Ok(()),
            Command::CreateDb { name } => write!(f, "create(db,\"{}\")", name),
            Command::CreateTable { name, db, columns } => {
                write!(f, "create(tbl,\"{}\",{},{})", name, db, columns)
            }
            Command::CreateColumn { name, table } => {
                write!(f, "create(col,\"{}\",{})", name, table)
            }
            Command::Load { path } => write!(f, "load(\"{}\")", path),
            Command::RelationalInsert { table, values } => {
                write!(f, "relational_insert({}", table)?;
                for v in values {
                    write!(f, ",{}", v)?;
                }
                write!(f, ")")
            }
            Command::Select { target, column, low, high } => {
                write!(f, "{}=select({},{},{})", target, column, low, high)
            }
            Command::SelectFrom { target, positions, values, low, high } => {
                write!(f, "{}=select({},{},{},{})", target, positions, values, low, high)
            }
            Command::Fetch { target, column, positions } => {
                write!(f, "{}=fetch({},{})", target, column, positions)
            }
            Command::Aggregate { target, function, source } => {
                write!(f, "{}={}({})", target, function.name(), source)
            }
            Command::Arithmetic { target, op, left, right } => {
                write!(f, "{}={}({},{})", target, op.name(), left, right)
            }
            Command::Print { variables } => write!(f, "print({})", variables.join(",")),
            Command::Shutdown => write!(f, "shutdown"),
        }
    }
}

/// Render a full script, one command per line
pub fn render(commands: &[Command]) -> String {
    let mut out = String::new();
    for cmd in commands {
        out.push_str(&cmd.to_string());
        out.push('\n');
    }
    out
}
