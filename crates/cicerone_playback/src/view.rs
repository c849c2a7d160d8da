//! Derived per-position view computation.
//!
//! Everything the rendering layer needs at one playback position is
//! recomputed from the flattened sequence; nothing is cached between
//! positions. Nodes outside the visible set are dimmed, never removed, so
//! spatial context is preserved.

use cicerone_core::{
    BranchPoint, DiagramSnapshot, Scenario, SlideNote, StepMode, SubSlide, Viewport,
};
use cicerone_interface::DiagramView;
use std::collections::{HashMap, HashSet};

/// Opacity applied to nodes outside the visible set.
pub(crate) const DIMMED_OPACITY: f32 = 0.2;

/// Display overlay for one diagram node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeHighlight {
    /// The node this entry applies to
    pub node_id: String,
    /// Whether the node is in the current visible set
    pub highlighted: bool,
    /// Opacity the rendering layer should apply
    pub opacity: f32,
}

/// Snapshot of everything the UI layer reads at one playback position.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackView {
    /// Position in the flattened sequence
    pub current_index: usize,
    /// Length of the flattened sequence
    pub total_sub_slides: usize,
    /// The sub-slide at the current position
    pub current_slide: SubSlide,
    /// Whether a title interstitial is currently showing
    pub showing_title: bool,
    /// Scenario owning the current slide
    pub active_scenario_id: String,
    /// Step owning the current slide, absent on titles
    pub active_step_id: Option<String>,
    /// Focused node for node slides
    pub focused_node_id: Option<String>,
    /// Node ids highlighted at this position
    pub visible_node_ids: Vec<String>,
    /// Target camera for this position
    pub viewport: Viewport,
    /// Full-canvas opacity overlay
    pub overlay: Vec<NodeHighlight>,
    /// Presenter note for the current slide, when one exists
    pub note: Option<SlideNote>,
    /// Pending decision, present only while navigation is suspended
    pub current_branch_point: Option<BranchPoint>,
    /// Whether autoplay is engaged
    pub is_autoplay_active: bool,
    /// Fraction of the autoplay interval elapsed, 0-100
    pub autoplay_progress: f64,
    /// Wall-clock seconds since playback started, pause-aware
    pub elapsed_seconds: u64,
}

/// The position-derived portion of a view, shared between the live
/// navigator and the static replayer.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SlideView {
    pub(crate) active_scenario_id: String,
    pub(crate) active_step_id: Option<String>,
    pub(crate) focused_node_id: Option<String>,
    pub(crate) visible_node_ids: Vec<String>,
    pub(crate) viewport: Viewport,
    pub(crate) overlay: Vec<NodeHighlight>,
}

/// Compute the derived view for `slides[index]`.
///
/// Step node ids that no longer resolve in the diagram are tolerated: they
/// stay in the visible list but simply have no overlay entry to light up.
pub(crate) fn derive_slide_view(
    slides: &[SubSlide],
    index: usize,
    scenarios: &HashMap<String, Scenario>,
    diagram: &DiagramSnapshot,
) -> SlideView {
    let slide = &slides[index];
    let active_scenario_id = slide.scenario_id().to_string();
    let active_step_id = slide.step_id().map(str::to_string);
    let focused_node_id = slide.focused_node_id().map(str::to_string);

    let current_step = active_step_id.as_deref().and_then(|step_id| {
        scenarios
            .get(slide.scenario_id())
            .and_then(|scenario| scenario.step(step_id))
    });

    let visible_node_ids = match current_step {
        None => Vec::new(),
        Some(step) if *step.mode() == StepMode::Independent => step.node_ids().clone(),
        Some(_) => cumulative_visible(slides, index, scenarios),
    };

    let viewport = current_step
        .and_then(|step| *step.viewport())
        .unwrap_or_else(|| diagram.fit_viewport(&visible_node_ids));

    let overlay = overlay_for(&visible_node_ids, diagram, current_step.is_some());

    SlideView {
        active_scenario_id,
        active_step_id,
        focused_node_id,
        visible_node_ids,
        viewport,
        overlay,
    }
}

/// Union of step node ids across slides `0..=index`, first-seen order.
fn cumulative_visible(
    slides: &[SubSlide],
    index: usize,
    scenarios: &HashMap<String, Scenario>,
) -> Vec<String> {
    let mut seen_steps = HashSet::new();
    let mut seen_nodes = HashSet::new();
    let mut visible = Vec::new();

    for slide in &slides[..=index] {
        let Some(step_id) = slide.step_id() else {
            continue;
        };
        if !seen_steps.insert((slide.scenario_id().to_string(), step_id.to_string())) {
            continue;
        }
        let Some(step) = scenarios
            .get(slide.scenario_id())
            .and_then(|scenario| scenario.step(step_id))
        else {
            continue;
        };
        for node_id in step.node_ids() {
            if seen_nodes.insert(node_id.clone()) {
                visible.push(node_id.clone());
            }
        }
    }

    visible
}

/// Build the full-canvas overlay. Title interstitials (`dim` false) leave
/// every node at full opacity.
fn overlay_for(visible: &[String], diagram: &DiagramSnapshot, dim: bool) -> Vec<NodeHighlight> {
    diagram
        .nodes()
        .iter()
        .map(|node| {
            let highlighted = dim && visible.iter().any(|id| id == node.id());
            NodeHighlight {
                node_id: node.id().clone(),
                highlighted,
                opacity: if !dim || highlighted {
                    1.0
                } else {
                    DIMMED_OPACITY
                },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cicerone_core::{DiagramNodeBuilder, ScenarioBuilder, StepBuilder};

    fn diagram(ids: &[&str]) -> DiagramSnapshot {
        let nodes = ids
            .iter()
            .enumerate()
            .map(|(i, id)| {
                DiagramNodeBuilder::default()
                    .id(id.to_string())
                    .x(i as f64 * 200.0)
                    .y(0.0)
                    .build()
                    .unwrap()
            })
            .collect();
        DiagramSnapshot::new(nodes, Vec::new())
    }

    fn scenario_with_modes(mode: StepMode) -> (HashMap<String, Scenario>, Vec<SubSlide>) {
        let steps = vec![
            StepBuilder::default()
                .id("s1".to_string())
                .name("s1".to_string())
                .order(0u32)
                .mode(mode)
                .node_ids(vec!["n1".to_string()])
                .build()
                .unwrap(),
            StepBuilder::default()
                .id("s2".to_string())
                .name("s2".to_string())
                .order(1u32)
                .mode(mode)
                .node_ids(vec!["n2".to_string(), "n3".to_string()])
                .build()
                .unwrap(),
        ];
        let scenario = ScenarioBuilder::default()
            .id("a".to_string())
            .name("a".to_string())
            .steps(steps)
            .build()
            .unwrap();
        let slides = crate::flatten(std::slice::from_ref(&scenario));
        let mut scenarios = HashMap::new();
        scenarios.insert(scenario.id().clone(), scenario);
        (scenarios, slides)
    }

    #[test]
    fn independent_mode_shows_exactly_the_current_step() {
        let (scenarios, slides) = scenario_with_modes(StepMode::Independent);
        let view = derive_slide_view(&slides, 2, &scenarios, &diagram(&["n1", "n2", "n3"]));
        assert_eq!(view.visible_node_ids, vec!["n2", "n3"]);
    }

    #[test]
    fn cumulative_mode_unions_prior_steps() {
        let (scenarios, slides) = scenario_with_modes(StepMode::Cumulative);
        let view = derive_slide_view(&slides, 2, &scenarios, &diagram(&["n1", "n2", "n3"]));
        assert_eq!(view.visible_node_ids, vec!["n1", "n2", "n3"]);
    }

    #[test]
    fn nodes_outside_the_visible_set_are_dimmed_not_removed() {
        let (scenarios, slides) = scenario_with_modes(StepMode::Independent);
        let view = derive_slide_view(&slides, 1, &scenarios, &diagram(&["n1", "n2", "n3"]));
        assert_eq!(view.overlay.len(), 3);
        let by_id: HashMap<&str, &NodeHighlight> = view
            .overlay
            .iter()
            .map(|h| (h.node_id.as_str(), h))
            .collect();
        assert!(by_id["n1"].highlighted);
        assert_eq!(by_id["n2"].opacity, DIMMED_OPACITY);
        assert_eq!(by_id["n3"].opacity, DIMMED_OPACITY);
    }

    #[test]
    fn title_slides_leave_the_canvas_undimmed() {
        let (scenarios, slides) = scenario_with_modes(StepMode::Independent);
        let view = derive_slide_view(&slides, 0, &scenarios, &diagram(&["n1", "n2"]));
        assert!(view.visible_node_ids.is_empty());
        assert!(view.overlay.iter().all(|h| h.opacity == 1.0));
    }

    #[test]
    fn stale_node_ids_are_tolerated_in_the_visible_set() {
        let (scenarios, slides) = scenario_with_modes(StepMode::Independent);
        // Diagram no longer contains n3.
        let view = derive_slide_view(&slides, 2, &scenarios, &diagram(&["n1", "n2"]));
        assert_eq!(view.visible_node_ids, vec!["n2", "n3"]);
        assert!(view.overlay.iter().all(|h| h.node_id != "n3"));
    }

    #[test]
    fn saved_viewport_wins_over_fit() {
        let step = StepBuilder::default()
            .id("s1".to_string())
            .name("s1".to_string())
            .order(0u32)
            .node_ids(vec!["n1".to_string()])
            .viewport(Some(Viewport::new(10.0, 20.0, 1.5)))
            .build()
            .unwrap();
        let scenario = ScenarioBuilder::default()
            .id("a".to_string())
            .name("a".to_string())
            .steps(vec![step])
            .build()
            .unwrap();
        let slides = crate::flatten(std::slice::from_ref(&scenario));
        let mut scenarios = HashMap::new();
        scenarios.insert(scenario.id().clone(), scenario);
        let view = derive_slide_view(&slides, 1, &scenarios, &diagram(&["n1"]));
        assert_eq!(view.viewport, Viewport::new(10.0, 20.0, 1.5));
    }
}
