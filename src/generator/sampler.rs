// Parameter Sampler
//
// Seeded randomness for fixture data and range bounds. The oracle itself is
// deterministic; everything random is resolved here before it runs.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::common::Bound;
use crate::query::executor::result::{OracleError, OracleResult};

/// Source of uniform integers
pub trait ParameterSampler {
    /// Uniform integer in `[low, high)`
    fn uniform(&mut self, low: i64, high: i64) -> OracleResult<i64>;
}

/// `ParameterSampler` backed by a seeded `ChaCha8Rng`.
/// The stream is fixed per seed across platforms and library releases.
pub struct SeededSampler {
    rng: ChaCha8Rng,
}

impl SeededSampler {
    pub fn new(seed: u64) -> Self {
        SeededSampler {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// `count` uniform draws in `[low, high)`
    pub fn uniform_column(&mut self, low: i64, high: i64, count: usize) -> OracleResult<Vec<i64>> {
        (0..count).map(|_| self.uniform(low, high)).collect()
    }

    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }
}

impl ParameterSampler for SeededSampler {
    fn uniform(&mut self, low: i64, high: i64) -> OracleResult<i64> {
        if low >= high {
            return Err(OracleError::InvalidParameters(format!(
                "empty sampling interval [{}, {})",
                low, high
            )));
        }
        Ok(self.rng.gen_range(low..high))
    }
}

/// A sampled half-open range `[low, high)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeParams {
    pub low: i64,
    pub high: i64,
}

impl RangeParams {
    pub fn low_bound(&self) -> Bound {
        Bound::at(self.low)
    }

    pub fn high_bound(&self) -> Bound {
        Bound::at(self.high)
    }
}

/// Range width retaining roughly `selectivity` of a uniform column of `rows`
pub fn offset_for_selectivity(rows: usize, selectivity: f64) -> i64 {
    (selectivity * rows as f64) as i64
}

/// Sample `[low, low + offset)` with `low` uniform in
/// `[trunc(-rows/2), trunc(rows/2 - offset))`, so the range stays inside the
/// value domain of a column drawn from `[-rows/2, rows/2)`.
pub fn sample_range<S: ParameterSampler + ?Sized>(
    sampler: &mut S,
    rows: usize,
    offset: i64,
) -> OracleResult<RangeParams> {
    let half = rows as f64 / 2.0;
    let lowest = (-half) as i64;
    let highest = (half - offset as f64) as i64;
    let low = sampler.uniform(lowest, highest)?;
    Ok(RangeParams {
        low,
        high: low + offset,
    })
}
