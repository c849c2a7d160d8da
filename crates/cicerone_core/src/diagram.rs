//! Read-only diagram snapshot types.
//!
//! The playback engine never mutates diagram content; it only reads node
//! geometry to compute highlight overlays and fit cameras. The canvas store
//! owning the live diagram is an external collaborator.

use serde::{Deserialize, Serialize};

/// One diagram node, as seen by the playback engine.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct DiagramNode {
    /// Stable node identifier
    id: String,
    /// Display label
    #[serde(default)]
    #[builder(default)]
    label: String,
    /// Left edge in canvas coordinates
    #[serde(default)]
    #[builder(default)]
    x: f64,
    /// Top edge in canvas coordinates
    #[serde(default)]
    #[builder(default)]
    y: f64,
    /// Node width
    #[serde(default = "default_node_width")]
    #[builder(default = "default_node_width()")]
    width: f64,
    /// Node height
    #[serde(default = "default_node_height")]
    #[builder(default = "default_node_height()")]
    height: f64,
}

fn default_node_width() -> f64 {
    160.0
}

fn default_node_height() -> f64 {
    60.0
}

/// One diagram edge, as seen by the playback engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct DiagramEdge {
    /// Stable edge identifier
    id: String,
    /// Source node id
    source: String,
    /// Target node id
    target: String,
}

impl DiagramEdge {
    /// Create an edge between two nodes.
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
        }
    }
}

/// An owned, read-only snapshot of the diagram's nodes and edges.
///
/// The static replayer is constructed purely from a snapshot so public
/// replay has no dependency on a live mutable store.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, derive_getters::Getters)]
pub struct DiagramSnapshot {
    /// All diagram nodes
    nodes: Vec<DiagramNode>,
    /// All diagram edges
    edges: Vec<DiagramEdge>,
}

impl DiagramSnapshot {
    /// Create a snapshot from node and edge lists.
    pub fn new(nodes: Vec<DiagramNode>, edges: Vec<DiagramEdge>) -> Self {
        Self { nodes, edges }
    }

    /// Look up a node by id.
    pub fn node(&self, node_id: &str) -> Option<&DiagramNode> {
        self.nodes.iter().find(|node| node.id() == node_id)
    }

    /// Whether a node id resolves in this snapshot.
    pub fn contains_node(&self, node_id: &str) -> bool {
        self.node(node_id).is_some()
    }
}
