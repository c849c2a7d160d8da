//! Authored narrative structure: scenarios, steps, and step-level metadata.

use cicerone_error::{PresentationError, PresentationErrorKind};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Whether a step's visible-node set accumulates or replaces prior steps.
///
/// # Examples
///
/// ```
/// use cicerone_core::StepMode;
/// use std::str::FromStr;
///
/// assert_eq!(StepMode::from_str("cumulative").unwrap(), StepMode::Cumulative);
/// assert_eq!(format!("{}", StepMode::Independent), "independent");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StepMode {
    /// The step highlights exactly its own node set
    #[default]
    Independent,
    /// The step's highlight set is unioned with every earlier step's
    Cumulative,
}

/// A saved pan/zoom camera transform.
///
/// When a step has no saved viewport, consumers compute a fit-to-visible-nodes
/// camera through the diagram collaborator instead.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct Viewport {
    /// Horizontal pan offset in canvas coordinates
    x: f64,
    /// Vertical pan offset in canvas coordinates
    y: f64,
    /// Zoom factor (1.0 is unscaled)
    zoom: f64,
}

impl Viewport {
    /// Create a viewport from pan offsets and a zoom factor.
    pub fn new(x: f64, y: f64, zoom: f64) -> Self {
        Self { x, y, zoom }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            zoom: 1.0,
        }
    }
}

/// Branch targets declared on a decision step.
///
/// `target_node_ids` and `target_labels` are parallel lists; the labels are
/// what the viewer sees when navigation suspends at the decision.
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters, Default,
)]
pub struct BranchTargets {
    /// Node ids the viewer may jump to
    target_node_ids: Vec<String>,
    /// Human-readable labels, parallel to `target_node_ids`
    target_labels: Vec<String>,
}

impl BranchTargets {
    /// Create branch targets from parallel id/label lists.
    pub fn new(target_node_ids: Vec<String>, target_labels: Vec<String>) -> Self {
        Self {
            target_node_ids,
            target_labels,
        }
    }

    /// Number of declared targets.
    pub fn len(&self) -> usize {
        self.target_node_ids.len()
    }

    /// True when no targets are declared.
    pub fn is_empty(&self) -> bool {
        self.target_node_ids.is_empty()
    }

    /// True when the declaration is an actual decision (two or more targets).
    pub fn is_decision(&self) -> bool {
        self.target_node_ids.len() > 1
    }

    /// Whether the given node id is one of the declared targets.
    pub fn contains(&self, node_id: &str) -> bool {
        self.target_node_ids.iter().any(|id| id == node_id)
    }
}

/// One narrative beat within a scenario.
///
/// Sequencing uses the `order` field, never array position. `node_ids` is the
/// highlight set; `sub_slide_node_ids` is the designated subset that becomes
/// standalone node sub-slides during flattening.
///
/// # Examples
///
/// ```
/// use cicerone_core::{StepBuilder, StepMode};
///
/// let step = StepBuilder::default()
///     .id("step-1".to_string())
///     .name("Request arrives".to_string())
///     .order(0u32)
///     .node_ids(vec!["gateway".to_string()])
///     .build()
///     .unwrap();
///
/// assert_eq!(*step.mode(), StepMode::Independent);
/// assert!(step.viewport().is_none());
/// ```
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
pub struct Step {
    /// Stable step identifier
    id: String,
    /// Display name
    name: String,
    /// Narrative description shown alongside the highlighted nodes
    #[serde(default)]
    #[builder(default)]
    description: String,
    /// Sort key within the owning scenario (dense, ascending)
    order: u32,
    /// Highlight accumulation mode
    #[serde(default)]
    #[builder(default)]
    mode: StepMode,
    /// Diagram nodes highlighted by this step
    #[serde(default)]
    #[builder(default)]
    node_ids: Vec<String>,
    /// Subset of `node_ids` that become standalone node sub-slides
    #[serde(default)]
    #[builder(default)]
    sub_slide_node_ids: Vec<String>,
    /// Declared decision targets, if this step branches
    #[serde(default)]
    #[builder(default)]
    branch_targets: Option<BranchTargets>,
    /// Saved camera transform; absent means fit-to-visible-nodes
    #[serde(default)]
    #[builder(default)]
    viewport: Option<Viewport>,
}

impl Step {
    /// The step's decision targets, when it declares a real branch
    /// (two or more targets). Single-target declarations are linear.
    pub fn decision(&self) -> Option<&BranchTargets> {
        self.branch_targets
            .as_ref()
            .filter(|targets| targets.is_decision())
    }

    /// Whether this step highlights the given node.
    pub fn highlights(&self, node_id: &str) -> bool {
        self.node_ids.iter().any(|id| id == node_id)
    }
}

/// An authored path through the diagram: an ordered list of steps.
///
/// Scenario identity is immutable once a presentation references it; a
/// presentation holding an id with no matching scenario is a blocking
/// missing-scenario condition, never a silent removal.
///
/// # Examples
///
/// ```
/// use cicerone_core::{ScenarioBuilder, StepBuilder};
///
/// let scenario = ScenarioBuilder::default()
///     .id("happy-path".to_string())
///     .name("Happy path".to_string())
///     .color("#2563eb".to_string())
///     .steps(vec![
///         StepBuilder::default()
///             .id("s2".to_string())
///             .name("Second".to_string())
///             .order(1u32)
///             .build()
///             .unwrap(),
///         StepBuilder::default()
///             .id("s1".to_string())
///             .name("First".to_string())
///             .order(0u32)
///             .build()
///             .unwrap(),
///     ])
///     .build()
///     .unwrap();
///
/// let sorted: Vec<_> = scenario.sorted_steps().iter().map(|s| s.id().as_str()).collect();
/// assert_eq!(sorted, vec!["s1", "s2"]);
/// ```
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
pub struct Scenario {
    /// Stable scenario identifier
    id: String,
    /// Display name
    name: String,
    /// Optional longer description shown on the title sub-slide
    #[serde(default)]
    #[builder(default)]
    description: Option<String>,
    /// Visual tag color
    #[serde(default)]
    #[builder(default)]
    color: String,
    /// Narrative beats, sequenced by their `order` field
    #[serde(default)]
    #[builder(default)]
    steps: Vec<Step>,
}

impl Scenario {
    /// Steps sorted ascending by their `order` field.
    ///
    /// Sequencing always goes through this method; array position is
    /// an authoring artifact, not an ordering.
    pub fn sorted_steps(&self) -> Vec<&Step> {
        let mut steps: Vec<&Step> = self.steps.iter().collect();
        steps.sort_by_key(|step| *step.order());
        steps
    }

    /// Look up a step by id.
    pub fn step(&self, step_id: &str) -> Option<&Step> {
        self.steps.iter().find(|step| step.id() == step_id)
    }

    /// Whether the scenario has no steps at all.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Check authoring invariants: unique step orders, sub-slide node ids
    /// drawn from the step's own node set, and branch labels pairing up with
    /// their target ids.
    ///
    /// Intended for the authoring layer at save time; playback assumes
    /// scenarios it receives are already valid.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant as a [`PresentationError`].
    pub fn validate(&self) -> Result<(), PresentationError> {
        let mut orders = HashSet::new();
        for step in &self.steps {
            if !orders.insert(*step.order()) {
                return Err(PresentationError::new(
                    PresentationErrorKind::DuplicateStepOrder {
                        scenario: self.id.clone(),
                        order: *step.order(),
                    },
                ));
            }
            if let Some(node) = step
                .sub_slide_node_ids()
                .iter()
                .find(|node_id| !step.highlights(node_id))
            {
                return Err(PresentationError::new(
                    PresentationErrorKind::UnknownSubSlideNode {
                        step: step.id().clone(),
                        node: node.clone(),
                    },
                ));
            }
            if let Some(targets) = step.branch_targets()
                && targets.target_node_ids().len() != targets.target_labels().len()
            {
                return Err(PresentationError::new(
                    PresentationErrorKind::MismatchedBranchLabels {
                        step: step.id().clone(),
                        targets: targets.target_node_ids().len(),
                        labels: targets.target_labels().len(),
                    },
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cicerone_error::PresentationErrorKind;

    fn step(id: &str, order: u32) -> StepBuilder {
        let mut builder = StepBuilder::default();
        builder
            .id(id.to_string())
            .name(id.to_string())
            .order(order);
        builder
    }

    fn scenario(steps: Vec<Step>) -> Scenario {
        ScenarioBuilder::default()
            .id("a".to_string())
            .name("a".to_string())
            .steps(steps)
            .build()
            .unwrap()
    }

    #[test]
    fn duplicate_step_order_is_rejected() {
        let scenario = scenario(vec![
            step("s1", 0).build().unwrap(),
            step("s2", 0).build().unwrap(),
        ]);
        let err = scenario.validate().unwrap_err();
        assert!(matches!(
            err.kind,
            PresentationErrorKind::DuplicateStepOrder { order: 0, .. }
        ));
    }

    #[test]
    fn sub_slide_node_must_be_in_the_step_node_set() {
        let scenario = scenario(vec![
            step("s1", 0)
                .node_ids(vec!["n1".to_string()])
                .sub_slide_node_ids(vec!["n2".to_string()])
                .build()
                .unwrap(),
        ]);
        let err = scenario.validate().unwrap_err();
        assert!(matches!(
            err.kind,
            PresentationErrorKind::UnknownSubSlideNode { .. }
        ));
    }

    #[test]
    fn branch_labels_must_pair_with_target_ids() {
        let scenario = scenario(vec![
            step("s1", 0)
                .branch_targets(Some(BranchTargets::new(
                    vec!["cache".to_string(), "db".to_string()],
                    vec!["Cache hit".to_string()],
                )))
                .build()
                .unwrap(),
        ]);
        let err = scenario.validate().unwrap_err();
        assert!(matches!(
            err.kind,
            PresentationErrorKind::MismatchedBranchLabels {
                targets: 2,
                labels: 1,
                ..
            }
        ));
    }

    #[test]
    fn a_well_formed_scenario_validates() {
        let scenario = scenario(vec![
            step("s1", 0)
                .node_ids(vec!["n1".to_string()])
                .sub_slide_node_ids(vec!["n1".to_string()])
                .build()
                .unwrap(),
            step("s2", 1).build().unwrap(),
        ]);
        assert!(scenario.validate().is_ok());
    }
}
