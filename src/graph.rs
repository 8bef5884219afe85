//! Knowledge graph: directed graph of entities connected by labeled relations.
//!
//! Built once from the full triplet slice and read-only afterward. Backed by
//! `petgraph` with a node-name side map for O(1) entity lookups, plus an
//! auxiliary (head, tail) → relation map.
//!
//! A later triplet with the same (head, tail) pair overwrites the earlier
//! edge's relation label (last-write-wins). The graph edge and the lookup map
//! are updated together so they cannot disagree.

use std::collections::HashMap;

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::triplet::Triplet;

/// In-memory knowledge graph over entity-name nodes.
pub struct KnowledgeGraph {
    /// The directed graph: nodes are entity names, edges carry relation labels.
    graph: DiGraph<String, String>,
    /// Entity name → NodeIndex mapping.
    node_index: HashMap<String, NodeIndex>,
    /// (head, tail) → relation lookup.
    relations: HashMap<(String, String), String>,
}

impl KnowledgeGraph {
    /// Build a knowledge graph from a triplet slice, in order.
    pub fn build(triplets: &[Triplet]) -> Self {
        let mut kg = Self {
            graph: DiGraph::new(),
            node_index: HashMap::new(),
            relations: HashMap::new(),
        };
        for triplet in triplets {
            kg.insert(triplet);
        }
        tracing::info!(
            nodes = kg.node_count(),
            edges = kg.edge_count(),
            "knowledge graph built"
        );
        kg
    }

    /// Ensure a node exists for the given entity, returning its NodeIndex.
    fn ensure_node(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.node_index.get(name) {
            return idx;
        }
        let idx = self.graph.add_node(name.to_string());
        self.node_index.insert(name.to_string(), idx);
        idx
    }

    /// Insert one triplet: add an edge head → tail labeled with the relation.
    ///
    /// If the (head, tail) edge already exists its label is overwritten.
    fn insert(&mut self, triplet: &Triplet) {
        let head = self.ensure_node(&triplet.head);
        let tail = self.ensure_node(&triplet.tail);
        self.graph.update_edge(head, tail, triplet.relation.clone());
        self.relations.insert(
            (triplet.head.clone(), triplet.tail.clone()),
            triplet.relation.clone(),
        );
    }

    /// The relation label on the (head, tail) edge, if present.
    pub fn relation_of(&self, head: &str, tail: &str) -> Option<&str> {
        self.relations
            .get(&(head.to_string(), tail.to_string()))
            .map(String::as_str)
    }

    /// All outgoing (relation, tail) pairs for a head entity.
    pub fn objects_of(&self, head: &str) -> Vec<(&str, &str)> {
        let Some(&idx) = self.node_index.get(head) else {
            return Vec::new();
        };
        self.graph
            .edges_directed(idx, Direction::Outgoing)
            .map(|e| {
                (
                    e.weight().as_str(),
                    self.graph[e.target()].as_str(),
                )
            })
            .collect()
    }

    /// Whether an entity appears as a node.
    pub fn contains_entity(&self, name: &str) -> bool {
        self.node_index.contains_key(name)
    }

    /// Number of entity nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of relation edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

impl std::fmt::Debug for KnowledgeGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KnowledgeGraph")
            .field("nodes", &self.node_count())
            .field("edges", &self.edge_count())
            .finish()
    }
}
