use crate::error::Result;
use crate::graph::{Graph, VInt};
use crate::sink::BlobSink;

/// Parameters naming one emitted snapshot.
pub struct SnapshotName<'a> {
    pub directory: &'a str,
    pub num_vertices: u32,
    pub num_blocks: u32,
    pub max_degree: f64,
    pub power_law_exponent: f64,
    pub overlap: f64,
    pub block_size_variation: f64,
    pub density: f64,
}

/// Build the nested basename for a snapshot and make sure its directory
/// exists on the sink side. The difficulty tag folds the shape knobs into
/// the path so sweeps over different settings never collide.
pub fn prepare_basename(sink: &mut dyn BlobSink, name: &SnapshotName) -> Result<String> {
    let tag = format!(
        "difficulty_{}_{:?}_{:?}_{:?}",
        name.num_blocks, name.max_degree, name.power_law_exponent, name.density
    );
    let dir = format!(
        "{}/{}/{:?}Overlap_{:?}BlockSizeVar",
        name.directory, tag, name.overlap, name.block_size_variation
    );
    sink.ensure_dir(&dir)?;
    Ok(format!(
        "{}/{}_{:?}Overlap_{:?}BlockSizeVar_{}_nodes",
        dir, tag, name.overlap, name.block_size_variation, name.num_vertices
    ))
}

/// Render the edge list as TSV, one `source target weight` line per edge.
/// Vertex ids start at 1 in the standard format, all weights are 1.
pub fn encode_edge_tsv(graph: &Graph) -> Vec<u8> {
    let mut out = String::with_capacity(graph.edge_count() as usize * 12);
    for &(u, v) in graph.edges() {
        out.push_str(&format!("{}\t{}\t1\n", u + 1, v + 1));
    }
    out.into_bytes()
}

/// Render the ground truth partition as TSV, both columns 1-indexed.
pub fn encode_partition_tsv(membership: &[VInt]) -> Vec<u8> {
    let mut out = String::with_capacity(membership.len() * 8);
    for (vertex, &block) in membership.iter().enumerate() {
        out.push_str(&format!("{}\t{}\n", vertex + 1, block + 1));
    }
    out.into_bytes()
}

/// Emit one graph and partition pair under the prepared basename, with
/// the two fixed suffixes appended on the sink side of the call.
pub fn save_graph(
    sink: &mut dyn BlobSink,
    basename: &str,
    graph: &Graph,
    membership: &[VInt],
) -> Result<()> {
    sink.write(&format!("{basename}.tsv"), &encode_edge_tsv(graph))?;
    sink.write(
        &format!("{basename}_truePartition.tsv"),
        &encode_partition_tsv(membership),
    )
}

#[cfg(test)]
mod test_output {
    use crate::graph::Graph;
    use crate::output::{
        encode_edge_tsv, encode_partition_tsv, prepare_basename, save_graph, SnapshotName,
    };
    use crate::sink::testing::MemSink;

    #[test]
    fn edge_lines_are_one_indexed_with_unit_weight() {
        let mut graph = Graph::new(3);
        graph.insert_edge(0, 2);
        graph.insert_edge(2, 1);
        let tsv = String::from_utf8(encode_edge_tsv(&graph)).unwrap();
        assert_eq!(tsv, "1\t3\t1\n3\t2\t1\n");
    }

    #[test]
    fn partition_lines_are_one_indexed() {
        let tsv = String::from_utf8(encode_partition_tsv(&[1, 0, 1])).unwrap();
        assert_eq!(tsv, "1\t2\n2\t1\n3\t2\n");
    }

    #[test]
    fn basename_carries_the_difficulty_tag() {
        let mut sink = MemSink::default();
        let basename = prepare_basename(
            &mut sink,
            &SnapshotName {
                directory: "out",
                num_vertices: 226,
                num_blocks: 7,
                max_degree: 0.05,
                power_law_exponent: -2.1,
                overlap: 5.0,
                block_size_variation: 1.0,
                density: 1.0,
            },
        )
        .unwrap();
        assert_eq!(
            basename,
            "out/difficulty_7_0.05_-2.1_1.0/5.0Overlap_1.0BlockSizeVar/\
             difficulty_7_0.05_-2.1_1.0_5.0Overlap_1.0BlockSizeVar_226_nodes"
        );
        assert_eq!(sink.dirs.len(), 1);
    }

    #[test]
    fn save_emits_both_suffixed_blobs() {
        let mut sink = MemSink::default();
        let mut graph = Graph::new(2);
        graph.insert_edge(0, 1);
        save_graph(&mut sink, "base", &graph, &[0, 0]).unwrap();
        assert!(sink.blobs.contains_key("base.tsv"));
        assert!(sink.blobs.contains_key("base_truePartition.tsv"));
    }
}
