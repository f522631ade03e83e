use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

use crate::error::{GenError, Result};

/// Bounded discrete distribution with unnormalized mass `x^a` over an
/// inclusive integer range.
#[derive(Debug)]
pub struct DiscretePowerLaw {
    min_v: u32,
    table: WeightedIndex<f64>,
}

impl DiscretePowerLaw {
    /// Build the normalized pmf over `[min_v, max_v]`.
    ///
    /// Fails when the range is empty or when any mass is non-finite. A
    /// negative exponent therefore requires `min_v >= 1`, since `0^a`
    /// diverges there.
    pub fn new(exponent: f64, min_v: u32, max_v: u32) -> Result<DiscretePowerLaw> {
        if min_v > max_v {
            return Err(GenError::InvalidRange {
                min: min_v,
                max: max_v,
                exponent,
                reason: "empty value range".to_string(),
            });
        }
        let mut pmf = Vec::with_capacity((max_v - min_v + 1) as usize);
        for x in min_v..=max_v {
            let mass = (x as f64).powf(exponent);
            if !mass.is_finite() {
                return Err(GenError::InvalidRange {
                    min: min_v,
                    max: max_v,
                    exponent,
                    reason: format!("mass of value {x} is not finite"),
                });
            }
            pmf.push(mass);
        }
        let table = WeightedIndex::new(&pmf).map_err(|_| GenError::InvalidRange {
            min: min_v,
            max: max_v,
            exponent,
            reason: "masses do not normalize to a pmf".to_string(),
        })?;
        Ok(DiscretePowerLaw { min_v, table })
    }

    /// Draw one value.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> u32 {
        self.min_v + self.table.sample(rng) as u32
    }

    /// Draw `n` independent values.
    pub fn sample_n<R: Rng>(&self, rng: &mut R, n: usize) -> Vec<u32> {
        (0..n).map(|_| self.sample(rng)).collect()
    }
}
