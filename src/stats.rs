use itertools::Itertools;
use log::info;

use crate::graph::{Graph, VInt};

/// Aggregate diagnostics for a graph and its partition.
///
/// Collecting is a pure read, running it twice on an unmodified pair
/// yields identical numbers. Nothing downstream feeds off these values.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphStats {
    pub vertex_count: u32,
    pub edge_count: u32,
    pub min_degree: u32,
    pub mean_degree: f64,
    pub max_degree: u32,
    /// Up to 20 distinct total degree values, most frequent first.
    pub degree_histogram: Vec<(u32, usize)>,
    pub avg_vertices_per_block: f64,
    /// Within over between block edge counts, infinite when nothing
    /// crosses a block boundary.
    pub within_between_ratio: f64,
}

impl GraphStats {
    /// Collect every aggregate in one read pass over the graph.
    pub fn collect(graph: &Graph, membership: &[VInt], num_blocks: u32) -> GraphStats {
        let degrees = graph.total_degrees();
        let min_degree = degrees.iter().copied().min().unwrap_or(0);
        let max_degree = degrees.iter().copied().max().unwrap_or(0);
        let mean_degree = if degrees.is_empty() {
            0.0
        } else {
            degrees.iter().map(|&d| d as f64).sum::<f64>() / degrees.len() as f64
        };

        let degree_histogram: Vec<(u32, usize)> = degrees
            .iter()
            .copied()
            .counts()
            .into_iter()
            .sorted_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)))
            .take(20)
            .collect();

        // Collapse the graph onto its blocks: diagonal mass is the within
        // count, everything else crosses a boundary.
        let mut within = 0u64;
        for &(u, v) in graph.edges() {
            if membership[u as usize] == membership[v as usize] {
                within += 1;
            }
        }
        let between = graph.edge_count() as u64 - within;
        let within_between_ratio = if between == 0 {
            f64::INFINITY
        } else {
            within as f64 / between as f64
        };

        GraphStats {
            vertex_count: graph.vertex_count(),
            edge_count: graph.edge_count(),
            min_degree,
            mean_degree,
            max_degree,
            degree_histogram,
            avg_vertices_per_block: graph.vertex_count() as f64 / num_blocks as f64,
            within_between_ratio,
        }
    }

    /// Log the collected aggregates.
    pub fn report(&self) {
        info!(
            "Number of nodes: {} Number of edges: {}",
            self.vertex_count, self.edge_count
        );
        info!(
            "Vertex degrees: [{},{},{}]",
            self.min_degree, self.mean_degree, self.max_degree
        );
        let rendered = self
            .degree_histogram
            .iter()
            .map(|(degree, count)| format!("{degree}x{count}"))
            .join(" ");
        info!(
            "Degree histogram (top {}): {}",
            self.degree_histogram.len(),
            rendered
        );
        info!(
            "Avg. number of nodes per block: {}",
            self.avg_vertices_per_block
        );
        info!(
            "Within-block / between-block edges: {}",
            self.within_between_ratio
        );
    }
}
