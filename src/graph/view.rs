//! petgraph-based directed view over built elements.

use std::collections::HashMap;

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use super::types::{EdgeData, Graph};

pub struct ElementGraph<'g> {
    pub graph: DiGraph<&'g str, &'g EdgeData>,
    pub node_indices: HashMap<&'g str, NodeIndex>,
    /// Edges whose source or target is not a node of the element graph.
    pub dangling: Vec<&'g EdgeData>,
}

impl<'g> ElementGraph<'g> {
    pub fn build(elements: &'g Graph) -> Self {
        let mut graph = DiGraph::new();
        let mut node_indices = HashMap::new();
        let mut dangling = Vec::new();

        for node in &elements.nodes {
            let id = node.id();
            // First occurrence wins; duplicates are reported by validation.
            node_indices
                .entry(id)
                .or_insert_with(|| graph.add_node(id));
        }

        for edge in &elements.edges {
            let data = &edge.data;
            match (
                node_indices.get(data.source.as_str()),
                node_indices.get(data.target.as_str()),
            ) {
                (Some(&s), Some(&t)) => {
                    graph.add_edge(s, t, data);
                }
                _ => dangling.push(data),
            }
        }

        ElementGraph {
            graph,
            node_indices,
            dangling,
        }
    }

    pub fn successors(&self, node_id: &str) -> Vec<&'g str> {
        self.neighbors(node_id, petgraph::Direction::Outgoing)
    }

    pub fn predecessors(&self, node_id: &str) -> Vec<&'g str> {
        self.neighbors(node_id, petgraph::Direction::Incoming)
    }

    pub fn incoming_count(&self, node_id: &str) -> usize {
        self.predecessors(node_id).len()
    }

    pub fn outgoing_count(&self, node_id: &str) -> usize {
        self.successors(node_id).len()
    }

    /// Node ids in dependency order, or the id of a node on a cycle.
    pub fn topo_order(&self) -> Result<Vec<&'g str>, &'g str> {
        toposort(&self.graph, None)
            .map(|indices| indices.into_iter().map(|idx| self.graph[idx]).collect())
            .map_err(|cycle| self.graph[cycle.node_id()])
    }

    fn neighbors(&self, node_id: &str, direction: petgraph::Direction) -> Vec<&'g str> {
        let Some(&idx) = self.node_indices.get(node_id) else {
            return vec![];
        };
        // One entry per edge, so parallel edges count separately.
        self.graph
            .edges_directed(idx, direction)
            .map(|edge| {
                let other = match direction {
                    petgraph::Direction::Outgoing => edge.target(),
                    petgraph::Direction::Incoming => edge.source(),
                };
                self.graph[other]
            })
            .collect()
    }
}
