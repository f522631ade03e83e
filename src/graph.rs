use rand::Rng;

/// Vertex ID, contiguous from zero, usually plenty at 32 bits.
pub type VInt = u32;

/// A directed multigraph over contiguous vertex ids.
///
/// Edges live in an index-based arena so the rewiring pass can swap
/// endpoints in place without disturbing the identity of any other edge.
/// Self loops and parallel edges are allowed. In and out degree counters
/// are maintained on every mutation.
#[derive(Debug)]
pub struct Graph {
    edges: Vec<(VInt, VInt)>,
    out_deg: Vec<u32>,
    in_deg: Vec<u32>,
    v_size: u32,
}

impl Graph {
    pub fn new(v_size: u32) -> Graph {
        Graph::with_edge_capacity(v_size, 0)
    }

    pub fn with_edge_capacity(v_size: u32, capacity: usize) -> Graph {
        Graph {
            edges: Vec::with_capacity(capacity),
            out_deg: vec![0; v_size as usize],
            in_deg: vec![0; v_size as usize],
            v_size,
        }
    }

    pub fn vertex_count(&self) -> u32 {
        self.v_size
    }

    pub fn edge_count(&self) -> u32 {
        self.edges.len() as u32
    }

    /// Append a directed edge to the arena.
    pub fn insert_edge(&mut self, u: VInt, v: VInt) {
        self.out_deg[u as usize] += 1;
        self.in_deg[v as usize] += 1;
        self.edges.push((u, v));
    }

    pub fn edge(&self, index: usize) -> (VInt, VInt) {
        self.edges[index]
    }

    pub fn edges(&self) -> &[(VInt, VInt)] {
        &self.edges
    }

    pub fn out_degree(&self, u: VInt) -> u32 {
        self.out_deg[u as usize]
    }

    pub fn in_degree(&self, v: VInt) -> u32 {
        self.in_deg[v as usize]
    }

    pub fn total_degree(&self, u: VInt) -> u32 {
        self.out_deg[u as usize] + self.in_deg[u as usize]
    }

    /// Total degree of every vertex, indexed by vertex id.
    pub fn total_degrees(&self) -> Vec<u32> {
        (0..self.v_size).map(|v| self.total_degree(v)).collect()
    }

    pub fn out_degrees(&self) -> &[u32] {
        &self.out_deg
    }

    pub fn in_degrees(&self) -> &[u32] {
        &self.in_deg
    }

    /// Swap the targets of two edges. Sources stay put and targets only
    /// trade places, so no in or out degree changes.
    pub fn swap_targets(&mut self, i: usize, j: usize) {
        let target = self.edges[i].1;
        self.edges[i].1 = self.edges[j].1;
        self.edges[j].1 = target;
    }

    /// Keep each edge independently with probability `density`, a Bernoulli
    /// trial per edge. Returns the number of removed edges.
    pub fn thin_edges<R: Rng>(&mut self, density: f64, rng: &mut R) -> u32 {
        let mut kept = Vec::with_capacity(self.edges.len());
        let mut removed = 0u32;
        for &(u, v) in &self.edges {
            if rng.gen::<f64>() < density {
                kept.push((u, v));
            } else {
                self.out_deg[u as usize] -= 1;
                self.in_deg[v as usize] -= 1;
                removed += 1;
            }
        }
        self.edges = kept;
        removed
    }

    /// Drop every vertex whose total degree is zero and compact the
    /// surviving ids to a contiguous range, preserving relative order.
    ///
    /// Returns one flag per old vertex telling whether it survived, so
    /// callers can filter companion vectors in lock step.
    pub fn prune_isolated(&mut self) -> Vec<bool> {
        let keep: Vec<bool> = (0..self.v_size).map(|v| self.total_degree(v) > 0).collect();
        let mut remap = vec![VInt::MAX; self.v_size as usize];
        let mut next = 0u32;
        for (old, &kept) in keep.iter().enumerate() {
            if kept {
                remap[old] = next;
                next += 1;
            }
        }
        // Every edge endpoint has degree at least one, so remaps are total.
        for edge in &mut self.edges {
            edge.0 = remap[edge.0 as usize];
            edge.1 = remap[edge.1 as usize];
        }
        self.out_deg = self
            .out_deg
            .iter()
            .zip(keep.iter())
            .filter_map(|(&deg, &kept)| kept.then_some(deg))
            .collect();
        self.in_deg = self
            .in_deg
            .iter()
            .zip(keep.iter())
            .filter_map(|(&deg, &kept)| kept.then_some(deg))
            .collect();
        self.v_size = next;
        keep
    }
}

#[cfg(test)]
mod test_graph {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::graph::Graph;

    #[test]
    fn insert_and_count() {
        let mut g = Graph::new(4);
        g.insert_edge(0, 1);
        g.insert_edge(1, 2);
        g.insert_edge(2, 0);
        g.insert_edge(2, 0);
        assert_eq!(g.vertex_count(), 4);
        assert_eq!(g.edge_count(), 4);
        assert_eq!(g.out_degree(2), 2);
        assert_eq!(g.in_degree(0), 2);
        assert_eq!(g.total_degree(3), 0);
    }

    #[test]
    fn swap_targets_preserves_every_degree() {
        let mut g = Graph::new(4);
        g.insert_edge(0, 1);
        g.insert_edge(2, 3);
        let out_before = g.out_degrees().to_vec();
        let in_before = g.in_degrees().to_vec();
        g.swap_targets(0, 1);
        assert_eq!(g.edge(0), (0, 3));
        assert_eq!(g.edge(1), (2, 1));
        assert_eq!(g.out_degrees(), &out_before[..]);
        assert_eq!(g.in_degrees(), &in_before[..]);
    }

    #[test]
    fn prune_compacts_ids_in_order() {
        let mut g = Graph::new(5);
        // Vertices 1 and 3 stay isolated.
        g.insert_edge(0, 2);
        g.insert_edge(4, 0);
        let keep = g.prune_isolated();
        assert_eq!(keep, vec![true, false, true, false, true]);
        assert_eq!(g.vertex_count(), 3);
        // Old 0 -> 0, old 2 -> 1, old 4 -> 2.
        assert_eq!(g.edges(), &[(0, 1), (2, 0)]);
        for v in 0..g.vertex_count() {
            assert!(g.total_degree(v) > 0);
        }
    }

    #[test]
    fn thinning_converges_to_density() {
        let mut g = Graph::with_edge_capacity(2, 100_000);
        for _ in 0..100_000 {
            g.insert_edge(0, 1);
        }
        let mut rng = StdRng::seed_from_u64(11);
        g.thin_edges(0.5, &mut rng);
        let retained = g.edge_count() as f64 / 100_000.0;
        assert!((retained - 0.5).abs() <= 0.01, "retained {retained}");
    }

    #[test]
    fn thinning_with_full_density_keeps_everything() {
        let mut g = Graph::new(2);
        for _ in 0..1000 {
            g.insert_edge(0, 1);
        }
        let mut rng = StdRng::seed_from_u64(3);
        let removed = g.thin_edges(1.0, &mut rng);
        assert_eq!(removed, 0);
        assert_eq!(g.edge_count(), 1000);
    }
}
