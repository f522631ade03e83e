use itertools::Itertools;
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use rand_distr::Dirichlet;

use crate::graph::VInt;

/// Concentration scale of the block size prior.
const DIRICHLET_SCALE: f64 = 10.0;

/// Draw a partition of `num_vertices` vertices into at most `num_blocks`
/// blocks.
///
/// Block sizes follow a symmetric Dirichlet prior with concentration
/// `10 / heterogeneity` per component, so a larger heterogeneity knob skews
/// the sizes harder. Each vertex then draws its label from the resulting
/// probability vector. Labels are renumbered densely in ascending order of
/// the original label, and blocks that drew no vertex disappear, so the
/// returned block count may be below the requested one. Callers must size
/// everything downstream off the returned count.
pub fn generate_block_membership<R: Rng>(
    num_blocks: u32,
    num_vertices: u32,
    heterogeneity: f64,
    rng: &mut R,
) -> (u32, Vec<VInt>) {
    if num_blocks <= 1 {
        // A single block needs no prior at all.
        return (1, vec![0; num_vertices as usize]);
    }
    let concentration = DIRICHLET_SCALE / heterogeneity;
    let prior = Dirichlet::new_with_size(concentration, num_blocks as usize)
        .expect("concentration is positive and the prior has at least two components");
    let block_distribution = prior.sample(rng);
    let table = WeightedIndex::new(&block_distribution)
        .expect("Dirichlet draws are positive and sum to one");
    let mut labels: Vec<VInt> = (0..num_vertices)
        .map(|_| table.sample(rng) as VInt)
        .collect();
    let used = renumber_dense(&mut labels);
    (used, labels)
}

/// Renumber labels so the used values cover `0..K'` densely, keeping the
/// ascending order of the original labels. Returns the distinct count.
pub(crate) fn renumber_dense(labels: &mut [VInt]) -> u32 {
    let used: Vec<VInt> = labels.iter().copied().sorted().dedup().collect();
    let Some(&max_used) = used.last() else {
        return 0;
    };
    let mut remap = vec![0 as VInt; max_used as usize + 1];
    for (dense, &original) in used.iter().enumerate() {
        remap[original as usize] = dense as VInt;
    }
    for label in labels.iter_mut() {
        *label = remap[*label as usize];
    }
    used.len() as u32
}

/// Occupancy count of every block in a dense partition.
pub fn block_counts(membership: &[VInt], num_blocks: u32) -> Vec<u32> {
    let mut counts = vec![0u32; num_blocks as usize];
    for &label in membership {
        counts[label as usize] += 1;
    }
    counts
}
