use crate::error::{GenError, Result};
use crate::graph::VInt;
use crate::membership::block_counts;

/// Unnormalized edge propensities between blocks, dense row major.
///
/// The matrix is not symmetric since the generated graphs are directed.
/// Absolute magnitude carries no meaning, the synthesizer rescales the
/// whole matrix against its target edge count; only relative proportions
/// matter.
pub struct Blockmodel {
    size: usize,
    data: Vec<f64>,
}

impl Blockmodel {
    /// Build the propensity matrix for a partition.
    ///
    /// Within-block strength is 1. Between-block strength divides the
    /// average within-block population by the average remaining population
    /// and the overlap knob. The averages stay averages on purpose, the
    /// actual pair populations only enter through the occupancy scaling.
    pub fn fill(
        num_vertices: u32,
        num_blocks: u32,
        overlap: f64,
        membership: &[VInt],
    ) -> Blockmodel {
        let size = num_blocks as usize;
        let counts = block_counts(membership, num_blocks);
        let avg_within = num_vertices as f64 / num_blocks as f64;
        let avg_between = num_vertices as f64 - avg_within;
        let mut data = vec![0.0f64; size * size];
        for row in 0..size {
            for col in 0..size {
                let strength = if row == col {
                    1.0
                } else {
                    avg_within / avg_between / overlap
                };
                data[row * size + col] = strength * counts[row] as f64 * counts[col] as f64;
            }
        }
        Blockmodel { size, data }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.size + col]
    }

    /// Sum of every entry.
    pub fn total(&self) -> f64 {
        self.data.iter().sum()
    }

    /// Rescale all entries so the total mass matches `target`.
    pub fn rescale_to(&mut self, target: f64) {
        let total = self.total();
        if total > 0.0 {
            let factor = target / total;
            for value in &mut self.data {
                *value *= factor;
            }
        }
    }

    /// Reject any entry unusable as an edge propensity.
    pub fn validate(&self) -> Result<()> {
        for row in 0..self.size {
            for col in 0..self.size {
                let value = self.get(row, col);
                if !value.is_finite() || value < 0.0 {
                    return Err(GenError::InvalidModel { row, col, value });
                }
            }
        }
        Ok(())
    }
}
