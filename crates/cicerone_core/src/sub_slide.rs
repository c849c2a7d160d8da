//! The flattened playback unit and transient branch markers.

use serde::{Deserialize, Serialize};

/// One unit of the flattened playback sequence.
///
/// A closed tagged union: every consumer matches exhaustively so that a
/// future slide kind is a compile-time-visible change everywhere it is
/// consumed. Serialized as a plain tagged JSON object (`"type": "title" |
/// "overview" | "node"`) so recorded paths round-trip losslessly.
///
/// # Examples
///
/// ```
/// use cicerone_core::SubSlide;
///
/// let slide = SubSlide::Node {
///     scenario_id: "auth".to_string(),
///     step_id: "login".to_string(),
///     node_id: "session-store".to_string(),
/// };
///
/// let json = serde_json::to_string(&slide).unwrap();
/// assert!(json.contains("\"type\":\"node\""));
/// let back: SubSlide = serde_json::from_str(&json).unwrap();
/// assert_eq!(back, slide);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SubSlide {
    /// Scenario introduction screen, shown as an interstitial
    Title {
        /// Owning scenario
        scenario_id: String,
        /// Scenario display name at flattening time
        scenario_name: String,
        /// Scenario description at flattening time
        #[serde(default)]
        scenario_description: Option<String>,
    },
    /// One step rendered as "highlight its nodes, apply its camera"
    Overview {
        /// Owning scenario
        scenario_id: String,
        /// Owning step
        step_id: String,
    },
    /// A deep-dive on one specific node within a step
    Node {
        /// Owning scenario
        scenario_id: String,
        /// Owning step
        step_id: String,
        /// The node this slide focuses on
        node_id: String,
    },
}

impl SubSlide {
    /// The scenario this slide belongs to.
    pub fn scenario_id(&self) -> &str {
        match self {
            SubSlide::Title { scenario_id, .. }
            | SubSlide::Overview { scenario_id, .. }
            | SubSlide::Node { scenario_id, .. } => scenario_id,
        }
    }

    /// The step this slide belongs to, if any (titles have none).
    pub fn step_id(&self) -> Option<&str> {
        match self {
            SubSlide::Title { .. } => None,
            SubSlide::Overview { step_id, .. } | SubSlide::Node { step_id, .. } => Some(step_id),
        }
    }

    /// The focused node id for node slides.
    pub fn focused_node_id(&self) -> Option<&str> {
        match self {
            SubSlide::Node { node_id, .. } => Some(node_id),
            SubSlide::Title { .. } | SubSlide::Overview { .. } => None,
        }
    }

    /// Whether this is a title interstitial.
    pub fn is_title(&self) -> bool {
        matches!(self, SubSlide::Title { .. })
    }
}

/// A transient suspension point where the viewer must choose among multiple
/// next targets.
///
/// Branch points are computed at a sequence position, never persisted; a
/// frozen recorded path is always linear.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct BranchPoint {
    /// The decision step that produced this branch point
    step_id: String,
    /// Node ids the viewer may jump to
    target_node_ids: Vec<String>,
    /// Labels for UI presentation, parallel to `target_node_ids`
    target_labels: Vec<String>,
}

impl BranchPoint {
    /// Create a branch point for a decision step.
    pub fn new(
        step_id: impl Into<String>,
        target_node_ids: Vec<String>,
        target_labels: Vec<String>,
    ) -> Self {
        Self {
            step_id: step_id.into(),
            target_node_ids,
            target_labels,
        }
    }

    /// Whether the given node id is a valid choice at this branch.
    pub fn accepts(&self, node_id: &str) -> bool {
        self.target_node_ids.iter().any(|id| id == node_id)
    }
}
