//! Result Formatter
//!
//! Renders oracle results with the textual conventions of the engine under
//! test:
//!
//! - integer scalars print without a decimal point
//! - averages print with exactly two decimals; an undefined (empty) average
//!   prints as `0.00`
//! - a vector prints one value per line
//! - a multi-argument `print` joins the i-th item of every argument with `,`
//! - every emitted line ends with a single `\n`; an empty vector emits nothing
//!
//! Negative zero is normalized to zero so `-0.00` never appears.

use crate::common::{Value, ValueVector};
use crate::query::executor::operators::Scalar;
use crate::query::executor::operators::aggregate::AVG_DECIMAL_PLACES;
use crate::query::executor::result::{OracleError, OracleResult};

/// One argument of a `print` command
#[derive(Debug, Clone, PartialEq)]
pub enum PrintArg {
    Scalar(Scalar),
    Vector(ValueVector),
}

impl PrintArg {
    fn rendered(&self) -> Vec<String> {
        match self {
            PrintArg::Scalar(s) => vec![format_scalar(s)],
            PrintArg::Vector(v) => v.iter().map(format_value).collect(),
        }
    }
}

fn normalize_zero(f: f64) -> f64 {
    if f == 0.0 { 0.0 } else { f }
}

pub fn format_value(v: &Value) -> String {
    match v {
        Value::Int(i) => i.to_string(),
        Value::Float(f) => normalize_zero(*f).to_string(),
    }
}

pub fn format_average(mean: f64) -> String {
    let places = AVG_DECIMAL_PLACES as usize;
    if mean.is_nan() {
        return format!("{:.*}", places, 0.0);
    }
    format!("{:.*}", places, normalize_zero(mean))
}

pub fn format_scalar(s: &Scalar) -> String {
    match s {
        Scalar::Value(v) => format_value(v),
        Scalar::Average(mean) => format_average(*mean),
    }
}

/// One value per line, each line `\n` terminated
pub fn format_vector(v: &ValueVector) -> String {
    let mut out = String::new();
    for value in v.iter() {
        out.push_str(&format_value(value));
        out.push('\n');
    }
    out
}

/// Render the output of one `print` command
pub fn format_print(args: &[PrintArg]) -> OracleResult<String> {
    if let [PrintArg::Vector(v)] = args {
        return Ok(format_vector(v));
    }

    let columns: Vec<Vec<String>> = args.iter().map(PrintArg::rendered).collect();
    let rows = columns.first().map(Vec::len).unwrap_or(0);

    for col in &columns {
        if col.len() != rows {
            return Err(OracleError::LengthMismatch {
                left: rows,
                right: col.len(),
            });
        }
    }

    let mut out = String::new();
    for i in 0..rows {
        let line: Vec<&str> = columns.iter().map(|c| c[i].as_str()).collect();
        out.push_str(&line.join(","));
        out.push('\n');
    }
    Ok(out)
}
