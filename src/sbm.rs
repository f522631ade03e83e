use log::debug;
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use rand_distr::Poisson;

use crate::blockmodel::Blockmodel;
use crate::error::{GenError, Result};
use crate::graph::{Graph, VInt};

/// Per vertex degree propensities feeding the synthesizer.
pub struct DegreeSequence {
    pub out_deg: Vec<f64>,
    pub in_deg: Vec<f64>,
}

impl DegreeSequence {
    /// Split integer total degree draws into out and in components. The
    /// out share is a uniform fraction of the total, rounded, the in share
    /// is the remainder.
    pub fn from_totals<R: Rng>(totals: &[u32], rng: &mut R) -> DegreeSequence {
        let mut out_deg = Vec::with_capacity(totals.len());
        let mut in_deg = Vec::with_capacity(totals.len());
        for &total in totals {
            let out = (rng.gen::<f64>() * total as f64).round();
            out_deg.push(out);
            in_deg.push(total as f64 - out);
        }
        DegreeSequence { out_deg, in_deg }
    }

    pub fn len(&self) -> usize {
        self.out_deg.len()
    }

    pub fn is_empty(&self) -> bool {
        self.out_deg.is_empty()
    }

    pub fn out_range(&self) -> (f64, f64) {
        range_of(&self.out_deg)
    }

    pub fn in_range(&self) -> (f64, f64) {
        range_of(&self.in_deg)
    }
}

fn range_of(values: &[f64]) -> (f64, f64) {
    values.iter().fold((f64::MAX, f64::MIN), |(lo, hi), &v| {
        (lo.min(v), hi.max(v))
    })
}

/// The synthesized multigraph plus the edge mass accounting used.
#[derive(Debug)]
pub struct SbmOutcome {
    pub graph: Graph,
    pub expected_edges: f64,
}

/// Sample a directed multigraph from the degree corrected blockmodel.
///
/// The blockmodel is rescaled so its total mass equals `expected_edges`,
/// then every ordered block pair draws a Poisson edge count around its
/// entry and places each edge by drawing the source from the row block
/// weighted by out propensity and the target from the column block
/// weighted by in propensity. Sampling is soft on both sides: neither the
/// realized pair counts nor the vertex degrees match their targets
/// exactly. Self loops and parallel edges are kept.
pub fn generate_sbm<R: Rng>(
    membership: &[VInt],
    num_blocks: u32,
    mut model: Blockmodel,
    degrees: &DegreeSequence,
    expected_edges: f64,
    rng: &mut R,
) -> Result<SbmOutcome> {
    let out_total: f64 = degrees.out_deg.iter().sum();
    let in_total: f64 = degrees.in_deg.iter().sum();
    if out_total <= 0.0 || in_total <= 0.0 {
        return Err(GenError::InvalidDegreeSequence);
    }

    model.rescale_to(expected_edges);
    model.validate()?;

    // Group the vertices and their propensity tables per block.
    let k = num_blocks as usize;
    let mut members: Vec<Vec<VInt>> = vec![Vec::new(); k];
    for (vertex, &block) in membership.iter().enumerate() {
        members[block as usize].push(vertex as VInt);
    }
    let mut out_tables: Vec<Option<WeightedIndex<f64>>> = Vec::with_capacity(k);
    let mut in_tables: Vec<Option<WeightedIndex<f64>>> = Vec::with_capacity(k);
    for block in &members {
        let out_weights: Vec<f64> = block.iter().map(|&v| degrees.out_deg[v as usize]).collect();
        let in_weights: Vec<f64> = block.iter().map(|&v| degrees.in_deg[v as usize]).collect();
        out_tables.push(WeightedIndex::new(out_weights).ok());
        in_tables.push(WeightedIndex::new(in_weights).ok());
    }

    let mut graph = Graph::with_edge_capacity(membership.len() as u32, expected_edges as usize);
    for row in 0..k {
        for col in 0..k {
            let mass = model.get(row, col);
            if mass <= 0.0 {
                continue;
            }
            let draw = Poisson::new(mass)
                .expect("pair mass is positive and finite")
                .sample(rng) as u64;
            if draw == 0 {
                continue;
            }
            let (Some(out_table), Some(in_table)) = (&out_tables[row], &in_tables[col]) else {
                // No propensity mass on one side, nothing to place here.
                debug!("skipping {draw} edges for block pair ({row}, {col}) without propensity mass");
                continue;
            };
            for _ in 0..draw {
                let source = members[row][out_table.sample(rng)];
                let target = members[col][in_table.sample(rng)];
                graph.insert_edge(source, target);
            }
        }
    }

    Ok(SbmOutcome {
        graph,
        expected_edges,
    })
}
