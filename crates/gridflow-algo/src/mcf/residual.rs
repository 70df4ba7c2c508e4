//! Residual graph with paired forward/reverse arcs.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// One residual arc. Arcs are stored in pairs: arc `2k` is a forward arc and
/// arc `2k + 1` its reverse, so `a ^ 1` is always the partner of `a`.
#[derive(Debug, Clone)]
struct Arc {
    to: usize,
    residual: f64,
    cost: f64,
}

#[derive(Debug, Clone)]
pub(crate) struct ResidualGraph {
    arcs: Vec<Arc>,
    adjacency: Vec<Vec<usize>>,
}

/// Dijkstra output: reduced-cost distances and the arc used to reach each node
pub(crate) struct ShortestPaths {
    dist: Vec<Option<f64>>,
    via: Vec<Option<usize>>,
}

impl ShortestPaths {
    pub(crate) fn distance(&self, node: usize) -> Option<f64> {
        self.dist[node]
    }
}

#[derive(Copy, Clone)]
struct State {
    dist: f64,
    node: usize,
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for State {}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // min-heap on distance, lower node number first on ties
        other
            .dist
            .total_cmp(&self.dist)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl ResidualGraph {
    pub(crate) fn with_nodes(count: usize) -> Self {
        Self {
            arcs: Vec::new(),
            adjacency: vec![Vec::new(); count],
        }
    }

    pub(crate) fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Add a forward arc with `capacity` and its empty reverse arc.
    /// Returns the index of the forward arc.
    pub(crate) fn add_arc(&mut self, from: usize, to: usize, capacity: f64, cost: f64) -> usize {
        let forward = self.arcs.len();
        self.arcs.push(Arc {
            to,
            residual: capacity,
            cost,
        });
        self.arcs.push(Arc {
            to: from,
            residual: 0.0,
            cost: -cost,
        });
        self.adjacency[from].push(forward);
        self.adjacency[to].push(forward + 1);
        forward
    }

    /// Move `amount` along `arc`
    pub(crate) fn push(&mut self, arc: usize, amount: f64) {
        self.arcs[arc].residual -= amount;
        self.arcs[arc ^ 1].residual += amount;
    }

    pub(crate) fn residual(&self, arc: usize) -> f64 {
        self.arcs[arc].residual
    }

    /// Flow carried by a forward arc
    pub(crate) fn flow(&self, arc: usize) -> f64 {
        self.arcs[arc ^ 1].residual
    }

    fn tail(&self, arc: usize) -> usize {
        self.arcs[arc ^ 1].to
    }

    /// Dijkstra over arcs with more than `epsilon` residual capacity, using
    /// reduced costs `cost + π(u) - π(v)`.
    ///
    /// Reduced costs are clamped at zero; with valid potentials they are only
    /// ever negative by rounding error.
    pub(crate) fn shortest_paths(
        &self,
        source: usize,
        potentials: &[f64],
        epsilon: f64,
    ) -> ShortestPaths {
        let n = self.node_count();
        let mut dist: Vec<Option<f64>> = vec![None; n];
        let mut via: Vec<Option<usize>> = vec![None; n];
        let mut done = vec![false; n];
        let mut heap = BinaryHeap::new();

        dist[source] = Some(0.0);
        heap.push(State {
            dist: 0.0,
            node: source,
        });

        while let Some(State { dist: d, node: u }) = heap.pop() {
            if done[u] {
                continue;
            }
            done[u] = true;

            for &a in &self.adjacency[u] {
                let arc = &self.arcs[a];
                if arc.residual <= epsilon || done[arc.to] {
                    continue;
                }
                let reduced = (arc.cost + potentials[u] - potentials[arc.to]).max(0.0);
                let candidate = d + reduced;
                let improves = match dist[arc.to] {
                    Some(current) => candidate < current,
                    None => true,
                };
                if improves {
                    dist[arc.to] = Some(candidate);
                    via[arc.to] = Some(a);
                    heap.push(State {
                        dist: candidate,
                        node: arc.to,
                    });
                }
            }
        }

        ShortestPaths { dist, via }
    }

    /// Arcs on the shortest path from the search source to `target`, in
    /// travel order. Empty if `target` is the source or unreachable.
    pub(crate) fn path_to(&self, paths: &ShortestPaths, target: usize) -> Vec<usize> {
        let mut arcs = Vec::new();
        let mut node = target;
        while let Some(a) = paths.via[node] {
            arcs.push(a);
            node = self.tail(a);
        }
        arcs.reverse();
        arcs
    }
}
