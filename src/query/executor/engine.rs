// Oracle Execution Engine
//
// Evaluates a command plan against a catalog, independently of the engine
// under test, and produces the text that engine must print.

use std::collections::HashMap;

use log::debug;

use crate::catalog::Catalog;
use crate::common::{PositionSet, ValueVector};
use crate::query::executor::fetch::{fetch, scan};
use crate::query::executor::operators::{Scalar, aggregate, elementwise};
use crate::query::executor::result::{OracleError, OracleResult};
use crate::query::executor::select::{select, select_fetched};
use crate::query::format::{PrintArg, format_print};
use crate::query::script::{Command, Operand};

/// Where a fetched vector came from
#[derive(Debug, Clone)]
struct Origin {
    column: String,
    positions: PositionSet,
}

/// A value bound to a script variable
#[derive(Debug, Clone)]
enum Variable {
    Positions {
        set: PositionSet,
        table: String,
        generation: u64,
    },
    Values {
        values: ValueVector,
        origin: Option<Origin>,
    },
    Scalar(Scalar),
}

fn split_column(qualified: &str) -> OracleResult<(&str, &str)> {
    qualified
        .rsplit_once('.')
        .ok_or_else(|| OracleError::ColumnNotFound(qualified.to_string()))
}

pub struct OracleEngine {
    catalog: Catalog,
    /// Bumped on every insert so stale position sets are detected
    generations: HashMap<String, u64>,
    variables: HashMap<String, Variable>,
}

impl OracleEngine {
    pub fn new(catalog: Catalog) -> Self {
        OracleEngine {
            catalog,
            generations: HashMap::new(),
            variables: HashMap::new(),
        }
    }

    /// The catalog as modified by any inserts executed so far
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn into_catalog(self) -> Catalog {
        self.catalog
    }

    /// Execute every command in order and return the expected output
    pub fn run(&mut self, commands: &[Command]) -> OracleResult<String> {
        let mut output = String::new();
        for cmd in commands {
            if let Some(text) = self.execute(cmd)? {
                output.push_str(&text);
            }
        }
        Ok(output)
    }

    /// Execute one command. Returns printed text for `print`, `None` otherwise.
    pub fn execute(&mut self, cmd: &Command) -> OracleResult<Option<String>> {
        debug!("oracle: {}", cmd);

        match cmd {
            Command::Comment(_)
            | Command::Blank
            | Command::CreateDb { .. }
            | Command::Load { .. }
            | Command::Shutdown => {}
            Command::CreateTable { name, db, columns } => {
                let qualified = format!("{}.{}", db, name);
                let table = self.catalog.table(&qualified)?;
                if table.columns().len() != *columns {
                    return Err(OracleError::SchemaMismatch(format!(
                        "{} declared with {} columns, fixture has {}",
                        qualified,
                        columns,
                        table.columns().len()
                    )));
                }
            }
            Command::CreateColumn { name, table } => {
                self.catalog.table(table)?.column(name)?;
            }
            Command::RelationalInsert { table, values } => {
                let grown = self.catalog.table(table)?.with_row(values)?;
                self.catalog.register(grown);
                *self.generations.entry(table.clone()).or_insert(0) += 1;
            }
            Command::Select { target, column, low, high } => {
                let (table, _) = split_column(column)?;
                let set = select(self.catalog.resolve_column(column)?, *low, *high, None)?;
                let var = Variable::Positions {
                    set,
                    table: table.to_string(),
                    generation: self.generation(table),
                };
                self.assign(target, var);
            }
            Command::SelectFrom { target, positions, values, low, high } => {
                let (input, table, generation) = self.positions(positions)?;
                let (vals, origin) = self.values(values)?;

                let set = match origin {
                    Some(origin) if origin.positions == input => {
                        let column = self.catalog.resolve_column(&origin.column)?;
                        select(column, *low, *high, Some(&input))?
                    }
                    _ => select_fetched(&input, &vals, *low, *high)?,
                };
                self.assign(target, Variable::Positions { set, table, generation });
            }
            Command::Fetch { target, column, positions } => {
                let (set, table, generation) = self.positions(positions)?;
                let (col_table, _) = split_column(column)?;
                if col_table != table || generation != self.generation(&table) {
                    return Err(OracleError::SchemaMismatch(format!(
                        "{} was computed against a different table state than {}",
                        positions, column
                    )));
                }
                let values = fetch(self.catalog.resolve_column(column)?, &set)?;
                let origin = Origin {
                    column: column.clone(),
                    positions: set,
                };
                self.assign(target, Variable::Values { values, origin: Some(origin) });
            }
            Command::Aggregate { target, function, source } => {
                let values = match source {
                    Operand::Column(column) => scan(self.catalog.resolve_column(column)?),
                    Operand::Variable(name) => self.values(name)?.0,
                };
                let scalar = aggregate(*function, &values)?;
                self.assign(target, Variable::Scalar(scalar));
            }
            Command::Arithmetic { target, op, left, right } => {
                let (left, _) = self.values(left)?;
                let (right, _) = self.values(right)?;
                let values = elementwise(*op, &left, &right)?;
                self.assign(target, Variable::Values { values, origin: None });
            }
            Command::Print { variables } => {
                let args = variables
                    .iter()
                    .map(|name| self.print_arg(name))
                    .collect::<OracleResult<Vec<_>>>()?;
                return format_print(&args).map(Some);
            }
        }

        Ok(None)
    }

    fn generation(&self, table: &str) -> u64 {
        self.generations.get(table).copied().unwrap_or(0)
    }

    fn assign(&mut self, name: &str, var: Variable) {
        self.variables.insert(name.to_string(), var);
    }

    fn lookup(&self, name: &str) -> OracleResult<&Variable> {
        self.variables
            .get(name)
            .ok_or_else(|| OracleError::UnknownVariable(name.to_string()))
    }

    fn positions(&self, name: &str) -> OracleResult<(PositionSet, String, u64)> {
        match self.lookup(name)? {
            Variable::Positions { set, table, generation } => {
                Ok((set.clone(), table.clone(), *generation))
            }
            _ => Err(OracleError::VariableKind {
                name: name.to_string(),
                expected: "position set",
            }),
        }
    }

    fn values(&self, name: &str) -> OracleResult<(ValueVector, Option<Origin>)> {
        match self.lookup(name)? {
            Variable::Values { values, origin } => Ok((values.clone(), origin.clone())),
            _ => Err(OracleError::VariableKind {
                name: name.to_string(),
                expected: "value vector",
            }),
        }
    }

    fn print_arg(&self, name: &str) -> OracleResult<PrintArg> {
        match self.lookup(name)? {
            Variable::Values { values, .. } => Ok(PrintArg::Vector(values.clone())),
            Variable::Scalar(s) => Ok(PrintArg::Scalar(*s)),
            Variable::Positions { .. } => Err(OracleError::VariableKind {
                name: name.to_string(),
                expected: "printable result",
            }),
        }
    }
}
