use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Row position within a table (0-based)
pub type Position = usize;

/// A numeric cell value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Float(f64),
}

impl Value {
    pub fn as_f64(&self) -> f64 {
        match self {
            Value::Int(i) => *i as f64,
            Value::Float(f) => *f,
        }
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Value::Float(_))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a.partial_cmp(b),
            (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
            (Value::Int(a), Value::Float(b)) => (*a as f64).partial_cmp(b),
            (Value::Float(a), Value::Int(b)) => a.partial_cmp(&(*b as f64)),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(fl) => write!(f, "{}", fl),
        }
    }
}

/// One side of a range predicate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Bound {
    /// No constraint on this side (`null` in the command language)
    Unbounded,
    At(Value),
}

impl Bound {
    pub fn at(v: impl Into<Value>) -> Self {
        Bound::At(v.into())
    }

    /// `v >= self` for a lower bound
    pub fn admits_from_below(&self, v: &Value) -> bool {
        match self {
            Bound::Unbounded => true,
            Bound::At(low) => matches!(
                v.partial_cmp(low),
                Some(Ordering::Greater) | Some(Ordering::Equal)
            ),
        }
    }

    /// `v < self` for an upper bound
    pub fn admits_from_above(&self, v: &Value) -> bool {
        match self {
            Bound::Unbounded => true,
            Bound::At(high) => matches!(v.partial_cmp(high), Some(Ordering::Less)),
        }
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Unbounded => write!(f, "null"),
            Bound::At(v) => write!(f, "{}", v),
        }
    }
}

/// Ascending, duplicate-free row positions produced by a selection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionSet {
    positions: Vec<Position>,
}

impl PositionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every position of an `n`-row table
    pub fn all(n: usize) -> Self {
        PositionSet {
            positions: (0..n).collect(),
        }
    }

    /// Build from positions that are already strictly ascending.
    /// Returns `None` if the ordering invariant does not hold.
    pub fn from_sorted(positions: Vec<Position>) -> Option<Self> {
        if positions.windows(2).all(|w| w[0] < w[1]) {
            Some(PositionSet { positions })
        } else {
            None
        }
    }

    /// Callers must push in strictly ascending order.
    pub(crate) fn push(&mut self, pos: Position) {
        debug_assert!(self.positions.last().is_none_or(|&last| last < pos));
        self.positions.push(pos);
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn as_slice(&self) -> &[Position] {
        &self.positions
    }

    pub fn iter(&self) -> impl Iterator<Item = Position> + '_ {
        self.positions.iter().copied()
    }

    /// Largest position, if any
    pub fn last(&self) -> Option<Position> {
        self.positions.last().copied()
    }

    /// Merge-intersect two ascending sets
    pub fn intersect(&self, other: &PositionSet) -> PositionSet {
        let (a, b) = (&self.positions, &other.positions);
        let mut out = PositionSet::new();
        let (mut i, mut j) = (0, 0);
        while i < a.len() && j < b.len() {
            match a[i].cmp(&b[j]) {
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
                Ordering::Equal => {
                    out.push(a[i]);
                    i += 1;
                    j += 1;
                }
            }
        }
        out
    }
}

/// Values detached from row identity
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueVector {
    values: Vec<Value>,
}

impl ValueVector {
    pub fn new(values: Vec<Value>) -> Self {
        ValueVector { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.values.iter()
    }
}

impl FromIterator<Value> for ValueVector {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        ValueVector {
            values: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<i64>> for ValueVector {
    fn from(values: Vec<i64>) -> Self {
        values.into_iter().map(Value::Int).collect()
    }
}
