use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::blockmodel::Blockmodel;
use crate::config::{GenArgs, SweepConfig, MIN_DEGREE, REWIRE_SWEEPS, VERTEX_ADJUSTMENT};
use crate::error::{GenError, Result};
use crate::graph::{Graph, VInt};
use crate::membership::{generate_block_membership, renumber_dense};
use crate::output::{prepare_basename, save_graph, SnapshotName};
use crate::power_law::DiscretePowerLaw;
use crate::rewire::rewire_to_blockmodel;
use crate::sbm::{generate_sbm, DegreeSequence};
use crate::sink::BlobSink;
use crate::stats::GraphStats;

/// Build the shared random source, seeded for reproducible runs on demand.
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Derive a block count from the vertex count and a growth exponent.
fn block_count_for(num_vertices: u32, exponent: f64) -> u32 {
    let raw = (num_vertices as f64).powf(exponent).round();
    (raw as u32).max(1)
}

/// Check that the partition still covers the vertex set exactly. A
/// mismatch is a bug in the generator, not a recoverable condition.
fn check_partition(graph: &Graph, membership: &[VInt]) -> Result<()> {
    if membership.len() != graph.vertex_count() as usize {
        return Err(GenError::PartitionInvariant {
            partition_len: membership.len(),
            vertex_count: graph.vertex_count() as usize,
        });
    }
    Ok(())
}

/// Run one whole generation request against a sink.
///
/// The base graph is synthesized once, thinned once, pruned once, and then
/// carried mutably through the resolution sweep. Each sweep combination
/// draws a fresh partition and blockmodel, rewires the current edge set
/// toward it without touching any degree, and emits a snapshot.
pub fn generate(
    args: &GenArgs,
    sweep: &SweepConfig,
    sink: &mut dyn BlobSink,
    rng: &mut StdRng,
) -> Result<()> {
    // Ask for a surplus of vertices, pruning takes a bite later.
    let adjusted = (args.num_vertices as f64 * VERTEX_ADJUSTMENT) as u32;
    let max_degree = (args.max_degree * adjusted as f64) as u32;
    let base_blocks = block_count_for(adjusted, args.community_exponent);
    info!("Number of blocks: {base_blocks}");
    info!("Expected degrees: [{MIN_DEGREE},{max_degree}]");

    let degree_law = DiscretePowerLaw::new(args.power_law_exponent, MIN_DEGREE, max_degree)?;
    let totals = degree_law.sample_n(rng, adjusted as usize);
    let sum_degrees: u64 = totals.iter().map(|&d| d as u64).sum();
    info!("Sum of drawn degrees: {sum_degrees}");

    let (base_block_count, base_membership) =
        generate_block_membership(base_blocks, adjusted, args.block_size_variation, rng);
    let degrees = DegreeSequence::from_totals(&totals, rng);
    let (out_lo, out_hi) = degrees.out_range();
    let (in_lo, in_hi) = degrees.in_range();
    info!("Out propensities: [{out_lo},{out_hi}]");
    info!("In propensities: [{in_lo},{in_hi}]");

    let model = Blockmodel::fill(adjusted, base_block_count, args.overlap, &base_membership);
    let outcome = generate_sbm(
        &base_membership,
        base_block_count,
        model,
        &degrees,
        sum_degrees as f64,
        rng,
    )?;
    let mut graph = outcome.graph;
    info!(
        "Synthesized {} edges against an expected {}",
        graph.edge_count(),
        outcome.expected_edges
    );

    // One time density thinning of the freshly synthesized graph.
    let removed = graph.thin_edges(args.density, rng);
    info!("Density thinning removed {removed} edges");

    // Drop island vertices and keep the partition aligned with the
    // survivors, renumbered dense.
    info!("Filtering out zero degree vertices");
    let keep = graph.prune_isolated();
    let mut membership: Vec<VInt> = base_membership
        .iter()
        .zip(keep.iter())
        .filter_map(|(&label, &kept)| kept.then_some(label))
        .collect();
    let block_count = renumber_dense(&mut membership);
    check_partition(&graph, &membership)?;

    GraphStats::collect(&graph, &membership, block_count).report();

    for &block_exponent in &sweep.block_exponents {
        for &size_variation in &sweep.size_variations {
            for &overlap in &sweep.overlaps {
                let target_blocks = block_count_for(graph.vertex_count(), block_exponent);
                let (num_blocks, new_membership) = generate_block_membership(
                    target_blocks,
                    graph.vertex_count(),
                    size_variation,
                    rng,
                );
                let model =
                    Blockmodel::fill(graph.vertex_count(), num_blocks, overlap, &new_membership);
                model.validate()?;

                let rewired =
                    rewire_to_blockmodel(&mut graph, &new_membership, &model, REWIRE_SWEEPS, rng);
                info!(
                    "Num rejected edge moves: {} of {}",
                    rewired.rejected, rewired.proposals
                );
                check_partition(&graph, &new_membership)?;
                GraphStats::collect(&graph, &new_membership, num_blocks).report();

                let basename = prepare_basename(
                    sink,
                    &SnapshotName {
                        directory: &args.directory,
                        num_vertices: graph.vertex_count(),
                        num_blocks,
                        max_degree: args.max_degree,
                        power_law_exponent: args.power_law_exponent,
                        overlap,
                        block_size_variation: size_variation,
                        density: args.density,
                    },
                )?;
                info!("Saving snapshot {basename}");
                save_graph(sink, &basename, &graph, &new_membership)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod test_generator {
    use clap::Parser;

    use crate::config::{GenArgs, SweepConfig};
    use crate::generator::{block_count_for, generate, make_rng};
    use crate::sink::testing::MemSink;

    fn default_args() -> GenArgs {
        GenArgs::parse_from(["sbm_bench"])
    }

    #[test]
    fn block_count_rounds_and_stays_positive() {
        assert_eq!(block_count_for(226, 0.35), 7);
        assert_eq!(block_count_for(1, 0.35), 1);
        assert_eq!(block_count_for(10, -1.0), 1);
    }

    #[test]
    fn default_run_emits_one_pair_per_combination() {
        let args = default_args();
        let sweep = SweepConfig::default();
        let mut sink = MemSink::default();
        let mut rng = make_rng(Some(1234));
        generate(&args, &sweep, &mut sink, &mut rng).unwrap();

        let edge_blobs: Vec<_> = sink
            .blobs
            .keys()
            .filter(|name| name.ends_with("_nodes.tsv"))
            .collect();
        let partition_blobs: Vec<_> = sink
            .blobs
            .keys()
            .filter(|name| name.ends_with("_truePartition.tsv"))
            .collect();
        assert_eq!(edge_blobs.len(), sweep.combination_count());
        assert_eq!(partition_blobs.len(), sweep.combination_count());

        // The loop never prunes, so every partition covers the same
        // surviving vertex set.
        let sizes: Vec<usize> = partition_blobs
            .iter()
            .map(|name| {
                std::str::from_utf8(&sink.blobs[name.as_str()])
                    .unwrap()
                    .lines()
                    .count()
            })
            .collect();
        assert!(sizes.iter().all(|&s| s == sizes[0]));
        // Pruning only ever removes the adjusted surplus.
        assert!(sizes[0] <= 226);
        assert!(sizes[0] > 0);
    }

    #[test]
    fn trimmed_sweep_emits_a_single_pair() {
        let mut args = default_args();
        args.num_vertices = 80;
        let sweep = SweepConfig {
            block_exponents: vec![0.35],
            size_variations: vec![1.0],
            overlaps: vec![5.0],
        };
        let mut sink = MemSink::default();
        let mut rng = make_rng(Some(7));
        generate(&args, &sweep, &mut sink, &mut rng).unwrap();
        assert_eq!(sink.blobs.len(), 2);
    }
}
