//! Store-independent static replay of a frozen walkthrough.
//!
//! The public replay surface is built only from a snapshot (nodes, edges,
//! the presentation, and a scenario snapshot for resolving step data) with
//! no dependency on any live mutable store. A recorded path is the primary
//! input; re-flattening the scenarios is an explicit legacy fallback with
//! materially weaker guarantees (title/overview slides only, no node slides,
//! no branches, since branch resolution requires the original recording).

use crate::flatten::resolve_scenarios;
use crate::view::{NodeHighlight, derive_slide_view};
use cicerone_core::{
    DiagramSnapshot, NoteKey, Presentation, Scenario, SlideNote, SubSlide, Viewport,
};
use cicerone_error::{CiceroneResult, ReplayError, ReplayErrorKind};
use std::collections::HashMap;
use tracing::debug;

/// Everything a public page needs to replay a presentation.
#[derive(Debug, Clone)]
pub struct ReplaySnapshot {
    /// Diagram content at replay time
    pub diagram: DiagramSnapshot,
    /// The presentation, including its recorded path if one exists
    pub presentation: Presentation,
    /// Scenario data frozen alongside the presentation, used to resolve
    /// step highlight sets and for the legacy fallback
    pub scenarios: Vec<Scenario>,
}

/// Outcome of opening a static replay.
pub enum ReplayLaunch {
    /// Replay can proceed
    Ready(StaticReplayer),
    /// Nothing to present
    Empty,
    /// The recorded path references nodes that no longer exist; the
    /// presentation is being updated and must not render partially
    Stale {
        /// Node ids that failed to resolve
        missing_node_ids: Vec<String>,
    },
}

impl ReplayLaunch {
    /// Convert the launch outcome into a `Result`, for callers that treat a
    /// stale or empty replay as a hard error rather than a renderable state.
    ///
    /// # Errors
    ///
    /// [`ReplayErrorKind::StaleNodes`] for [`ReplayLaunch::Stale`],
    /// [`ReplayErrorKind::EmptyRecordedPath`] for [`ReplayLaunch::Empty`].
    pub fn into_result(self) -> Result<StaticReplayer, ReplayError> {
        match self {
            ReplayLaunch::Ready(replayer) => Ok(replayer),
            ReplayLaunch::Empty => Err(ReplayError::new(ReplayErrorKind::EmptyRecordedPath)),
            ReplayLaunch::Stale { missing_node_ids } => Err(ReplayError::new(
                ReplayErrorKind::StaleNodes(missing_node_ids.join(", ")),
            )),
        }
    }
}

/// What the public page reads at one replay position.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayView {
    /// Position in the frozen sequence
    pub current_index: usize,
    /// Length of the frozen sequence
    pub total_sub_slides: usize,
    /// The sub-slide at the current position
    pub current_slide: SubSlide,
    /// Whether a title interstitial is showing
    pub showing_title: bool,
    /// Focused node for node slides
    pub focused_node_id: Option<String>,
    /// Node ids highlighted at this position
    pub visible_node_ids: Vec<String>,
    /// Target camera for this position
    pub viewport: Viewport,
    /// Full-canvas opacity overlay
    pub overlay: Vec<NodeHighlight>,
    /// Caption/speaker note for the current slide, when one exists
    pub note: Option<SlideNote>,
}

/// A reduced, read-only navigator over a frozen sequence.
///
/// Same `go_next`/`go_prev` semantics as the live navigator (titles are
/// interstitials and are skipped going backward), but no timers, no branch
/// points, and no store access.
#[derive(Debug)]
pub struct StaticReplayer {
    slides: Vec<SubSlide>,
    scenarios: HashMap<String, Scenario>,
    notes: HashMap<NoteKey, SlideNote>,
    diagram: DiagramSnapshot,
    current_index: usize,
    showing_title: bool,
}

impl StaticReplayer {
    /// Open a static replay from a snapshot.
    ///
    /// With a recorded path, every node-typed entry is validated against the
    /// snapshot's nodes before the first render; unresolved ids yield
    /// [`ReplayLaunch::Stale`] rather than broken playback. Without one, the
    /// legacy fallback re-flattens the scenarios into overview-only slides.
    ///
    /// # Errors
    ///
    /// Returns a missing-scenarios error when the fallback path cannot
    /// resolve the presentation's scenario references.
    #[tracing::instrument(skip_all, fields(presentation = %snapshot.presentation.id()))]
    pub fn open(snapshot: ReplaySnapshot) -> CiceroneResult<ReplayLaunch> {
        let ReplaySnapshot {
            diagram,
            presentation,
            scenarios,
        } = snapshot;

        let slides = match presentation.recorded_path() {
            Some(path) => {
                let mut missing: Vec<String> = Vec::new();
                for node_id in path.referenced_node_ids() {
                    if !diagram.contains_node(node_id) && !missing.iter().any(|m| m == node_id) {
                        missing.push(node_id.to_string());
                    }
                }
                if !missing.is_empty() {
                    debug!(?missing, "Recorded path is stale");
                    return Ok(ReplayLaunch::Stale {
                        missing_node_ids: missing,
                    });
                }
                path.sub_slide_sequence().clone()
            }
            None => {
                let resolved = resolve_scenarios(&presentation, &scenarios)?;
                flatten_overview(&resolved)
            }
        };

        if slides.is_empty() {
            return Ok(ReplayLaunch::Empty);
        }

        let scenarios_by_id = scenarios
            .into_iter()
            .map(|scenario| (scenario.id().clone(), scenario))
            .collect();
        let showing_title = slides[0].is_title();

        Ok(ReplayLaunch::Ready(Self {
            slides,
            scenarios: scenarios_by_id,
            notes: presentation.notes().clone(),
            diagram,
            current_index: 0,
            showing_title,
        }))
    }

    /// Advance one position; dismisses a showing title first, saturates at
    /// the end.
    pub fn go_next(&mut self) {
        if self.showing_title {
            self.showing_title = false;
            return;
        }
        let next = self.current_index + 1;
        if next >= self.slides.len() {
            return;
        }
        self.enter(next);
    }

    /// Move one position back, skipping title entries; a no-op at index 0.
    pub fn go_prev(&mut self) {
        self.showing_title = false;
        let mut index = self.current_index;
        while index > 0 {
            index -= 1;
            if !self.slides[index].is_title() {
                self.enter(index);
                return;
            }
        }
    }

    /// Jump directly to a position, clamped to bounds.
    pub fn go_to_index(&mut self, index: usize) {
        self.enter(index.min(self.slides.len() - 1));
    }

    fn enter(&mut self, index: usize) {
        self.current_index = index;
        self.showing_title = self.slides[index].is_title();
    }

    /// Derived view for the current position.
    pub fn view(&self) -> ReplayView {
        let slide_view = derive_slide_view(
            &self.slides,
            self.current_index,
            &self.scenarios,
            &self.diagram,
        );
        let current_slide = self.slides[self.current_index].clone();
        let note =
            NoteKey::for_sub_slide(&current_slide).and_then(|key| self.notes.get(&key).cloned());
        ReplayView {
            current_index: self.current_index,
            total_sub_slides: self.slides.len(),
            current_slide,
            showing_title: self.showing_title,
            focused_node_id: slide_view.focused_node_id,
            visible_node_ids: slide_view.visible_node_ids,
            viewport: slide_view.viewport,
            overlay: slide_view.overlay,
            note,
        }
    }
}

/// Legacy fallback flattening: titles and overviews only.
///
/// Deliberately a separate code path from [`crate::flatten`]: it can never
/// emit node slides or reach a branch, and that gap is the documented
/// difference between recorded and fallback replay.
fn flatten_overview(scenarios: &[Scenario]) -> Vec<SubSlide> {
    let mut slides = Vec::new();
    for scenario in scenarios {
        if scenario.is_empty() {
            continue;
        }
        slides.push(SubSlide::Title {
            scenario_id: scenario.id().clone(),
            scenario_name: scenario.name().clone(),
            scenario_description: scenario.description().clone(),
        });
        for step in scenario.sorted_steps() {
            slides.push(SubSlide::Overview {
                scenario_id: scenario.id().clone(),
                step_id: step.id().clone(),
            });
        }
    }
    slides
}

#[cfg(test)]
mod tests {
    use super::*;
    use cicerone_core::{ScenarioBuilder, StepBuilder};

    #[test]
    fn fallback_never_emits_node_slides() {
        let scenario = ScenarioBuilder::default()
            .id("a".to_string())
            .name("a".to_string())
            .steps(vec![StepBuilder::default()
                .id("s1".to_string())
                .name("s1".to_string())
                .order(0u32)
                .node_ids(vec!["n1".to_string()])
                .sub_slide_node_ids(vec!["n1".to_string()])
                .build()
                .unwrap()])
            .build()
            .unwrap();
        let slides = flatten_overview(std::slice::from_ref(&scenario));
        assert_eq!(slides.len(), 2);
        assert!(slides.iter().all(|slide| slide.focused_node_id().is_none()));
    }
}
