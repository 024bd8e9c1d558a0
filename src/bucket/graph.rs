//! Bipartite key-sharing graph and its connected components.
//!
//! Nodes are left and right record keys. An edge joins a left record and a
//! right record that share at least one value in a paired join field. Edges
//! form a set: a value repeated within one record, or shared through several
//! fields, still yields one edge.

use std::collections::VecDeque;

use crate::dataset::{FieldId, FieldIndex, RowKey, TableDataset};

/// One left join field and the right-side index it is matched against.
#[derive(Debug, Clone, Copy)]
pub struct JoinField<'a> {
    pub left: FieldId,
    pub right: &'a FieldIndex,
}

/// Adjacency lists for both sides, built once.
#[derive(Debug, Clone, Default)]
pub struct Adjacency {
    left: Vec<Vec<RowKey>>,
    right: Vec<Vec<RowKey>>,
}

/// A connected component, keys in discovery order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub left: Vec<RowKey>,
    pub right: Vec<RowKey>,
}

#[derive(Debug, Clone, Copy)]
enum Node {
    Left(usize),
    Right(usize),
}

impl Adjacency {
    /// Probe the right-side indexes with every left join value, then invert
    /// the result for the right side.
    pub fn build(left: &TableDataset, joins: &[JoinField<'_>], right_len: usize) -> Self {
        let mut left_adj = Vec::with_capacity(left.len());
        for record in left.records() {
            let mut neighbors: Vec<RowKey> = Vec::new();
            for join in joins {
                for value in record.list(join.left) {
                    if let Some(keys) = join.right.get(value) {
                        neighbors.extend_from_slice(keys);
                    }
                }
            }
            neighbors.sort_unstable();
            neighbors.dedup();
            left_adj.push(neighbors);
        }

        let mut right_adj = vec![Vec::new(); right_len];
        for (idx, neighbors) in left_adj.iter().enumerate() {
            for key in neighbors {
                right_adj[key.0].push(RowKey(idx));
            }
        }

        Self {
            left: left_adj,
            right: right_adj,
        }
    }

    pub fn left_neighbors(&self, key: RowKey) -> &[RowKey] {
        &self.left[key.0]
    }

    pub fn right_neighbors(&self, key: RowKey) -> &[RowKey] {
        &self.right[key.0]
    }

    /// Number of distinct left-right edges.
    pub fn edge_count(&self) -> usize {
        self.left.iter().map(Vec::len).sum()
    }

    /// Label components with a breadth-first pass.
    ///
    /// Seeds are taken left `0..n` then right `0..m`; a node is marked when
    /// enqueued, so each node lands in exactly one component.
    pub fn components(&self) -> Vec<Component> {
        let mut seen_left = vec![false; self.left.len()];
        let mut seen_right = vec![false; self.right.len()];
        let mut queue = VecDeque::new();
        let mut components = Vec::new();

        let seeds = (0..self.left.len())
            .map(Node::Left)
            .chain((0..self.right.len()).map(Node::Right));

        for seed in seeds {
            match seed {
                Node::Left(idx) if seen_left[idx] => continue,
                Node::Right(idx) if seen_right[idx] => continue,
                Node::Left(idx) => seen_left[idx] = true,
                Node::Right(idx) => seen_right[idx] = true,
            }
            queue.push_back(seed);

            let mut component = Component {
                left: Vec::new(),
                right: Vec::new(),
            };
            while let Some(node) = queue.pop_front() {
                match node {
                    Node::Left(idx) => {
                        component.left.push(RowKey(idx));
                        for key in &self.left[idx] {
                            if !seen_right[key.0] {
                                seen_right[key.0] = true;
                                queue.push_back(Node::Right(key.0));
                            }
                        }
                    }
                    Node::Right(idx) => {
                        component.right.push(RowKey(idx));
                        for key in &self.right[idx] {
                            if !seen_left[key.0] {
                                seen_left[key.0] = true;
                                queue.push_back(Node::Left(key.0));
                            }
                        }
                    }
                }
            }
            components.push(component);
        }

        components
    }
}
