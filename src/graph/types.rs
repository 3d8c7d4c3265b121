//! Cytoscape element types produced by the builder.
//!
//! Serialized as `{ "nodes": [...], "edges": [...] }`, each element carrying
//! a `group` tag and a `data` record, which is what Cytoscape.js consumes.

use serde::Serialize;

/// Id of the synthetic node every entry step is connected from.
pub const BEGIN_ID: &str = "UniqueBeginKey";
/// Id of the synthetic node every terminal step is connected to.
pub const END_ID: &str = "UniqueEndKey";

/// Value of node fields reserved for downstream consumers.
pub const TBD: &str = "TBD";

#[derive(Debug, Clone, Default, Serialize)]
pub struct Graph {
    pub nodes: Vec<NodeElement>,
    pub edges: Vec<EdgeElement>,
}

impl Graph {
    pub fn node(&self, id: &str) -> Option<&NodeElement> {
        self.nodes.iter().find(|n| n.id() == id)
    }

    pub fn edge(&self, id: &str) -> Option<&EdgeElement> {
        self.edges.iter().find(|e| e.data.id == id)
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.node(id).is_some()
    }

    /// Nodes derived from workflow steps, i.e. everything but the sentinels.
    pub fn step_nodes(&self) -> impl Iterator<Item = &NodeElement> {
        self.nodes.iter().filter(|n| !n.is_sentinel())
    }

    pub fn edges_from<'a>(&'a self, source: &'a str) -> impl Iterator<Item = &'a EdgeElement> + 'a {
        self.edges.iter().filter(move |e| e.data.source == source)
    }

    pub fn edges_to<'a>(&'a self, target: &'a str) -> impl Iterator<Item = &'a EdgeElement> + 'a {
        self.edges.iter().filter(move |e| e.data.target == target)
    }

    pub fn has_edge(&self, source: &str, target: &str) -> bool {
        self.edges
            .iter()
            .any(|e| e.data.source == source && e.data.target == target)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Group {
    Nodes,
    Edges,
}

// =============================================================================
// NODES
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct NodeElement {
    pub group: Group,
    pub data: NodeData,
    /// Absent on sentinel nodes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classes: Option<Vec<String>>,
    /// Absent on sentinel nodes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum NodeData {
    Sentinel(SentinelData),
    Step(StepData),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SentinelData {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepData {
    pub id: String,
    pub label: Option<String>,
    /// Same value as `label`; Dockstore reads `name`.
    pub name: Option<String>,
    pub docker: String,
    pub run: String,
    /// Tool id as declared, toolshed prefix included.
    pub tool_id: Option<String>,
    pub doc: Option<String>,
    pub repo_link: Option<String>,
    pub step_type: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    pub x: i64,
    pub y: i64,
}

impl NodeElement {
    pub fn sentinel(id: &str) -> Self {
        NodeElement {
            group: Group::Nodes,
            data: NodeData::Sentinel(SentinelData {
                id: id.to_string(),
                name: id.to_string(),
            }),
            classes: None,
            position: None,
        }
    }

    pub fn id(&self) -> &str {
        match &self.data {
            NodeData::Sentinel(d) => &d.id,
            NodeData::Step(d) => &d.id,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        matches!(self.data, NodeData::Sentinel(_))
    }

    pub fn step_data(&self) -> Option<&StepData> {
        match &self.data {
            NodeData::Step(d) => Some(d),
            NodeData::Sentinel(_) => None,
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes
            .as_ref()
            .is_some_and(|classes| classes.iter().any(|c| c == class))
    }
}

// =============================================================================
// EDGES
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct EdgeElement {
    pub group: Group,
    pub data: EdgeData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EdgeData {
    pub id: String,
    pub source: String,
    pub target: String,
    /// Consuming input name; absent on sentinel edges.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    /// Producing output name; absent on sentinel edges.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

impl EdgeElement {
    pub fn new(data: EdgeData) -> Self {
        EdgeElement {
            group: Group::Edges,
            data,
        }
    }

    pub fn is_connection(&self) -> bool {
        self.data.input.is_some()
    }
}
