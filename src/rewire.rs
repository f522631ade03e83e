use rand::seq::SliceRandom;
use rand::Rng;

use crate::blockmodel::Blockmodel;
use crate::graph::{Graph, VInt};

/// Bookkeeping of one rewiring run. The rejection count is part of the
/// observable output, diagnostics and tests read it.
pub struct RewireOutcome {
    pub proposals: usize,
    pub rejected: usize,
}

/// Drive the edge set toward a new blockmodel without touching any degree.
///
/// Each pass visits the edges in random order and proposes swapping the
/// visited edge's target with the target of a uniformly drawn partner
/// edge. Sources never move and targets only trade places, so every in
/// and out degree is identical before and after any number of proposals.
/// A proposal is accepted by the Metropolis rule on the ratio of
/// blockmodel propensities between the proposed and the current block
/// pair placements.
pub fn rewire_to_blockmodel<R: Rng>(
    graph: &mut Graph,
    membership: &[VInt],
    model: &Blockmodel,
    sweeps: usize,
    rng: &mut R,
) -> RewireOutcome {
    let edge_total = graph.edge_count() as usize;
    let mut outcome = RewireOutcome {
        proposals: 0,
        rejected: 0,
    };
    if edge_total < 2 {
        return outcome;
    }
    let block = |v: VInt| membership[v as usize] as usize;
    let mut order: Vec<usize> = (0..edge_total).collect();
    for _ in 0..sweeps {
        order.shuffle(rng);
        for &i in &order {
            let j = rng.gen_range(0..edge_total);
            if j == i {
                // Swapping an edge with itself changes nothing.
                continue;
            }
            outcome.proposals += 1;
            let (u1, v1) = graph.edge(i);
            let (u2, v2) = graph.edge(j);
            let current = model.get(block(u1), block(v1)) * model.get(block(u2), block(v2));
            let proposed = model.get(block(u1), block(v2)) * model.get(block(u2), block(v1));
            let accept = if proposed >= current {
                true
            } else if current > 0.0 {
                rng.gen::<f64>() < proposed / current
            } else {
                proposed > 0.0
            };
            if accept {
                graph.swap_targets(i, j);
            } else {
                outcome.rejected += 1;
            }
        }
    }
    outcome
}
