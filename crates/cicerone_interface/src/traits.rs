//! Trait definitions for external collaborators.

use async_trait::async_trait;
use cicerone_core::{DiagramEdge, DiagramNode, DiagramSnapshot, NoteKey, SlideNote, Viewport};
use cicerone_error::CiceroneResult;
use std::time::Duration;

/// Logical canvas extent used by the default fit-camera computation.
const FIT_CANVAS_WIDTH: f64 = 1200.0;
const FIT_CANVAS_HEIGHT: f64 = 800.0;
const FIT_PADDING: f64 = 0.12;
const FIT_MIN_ZOOM: f64 = 0.2;
const FIT_MAX_ZOOM: f64 = 1.75;

/// Read-only view of the diagram, provided by the canvas store.
///
/// The engine only reads: it computes highlight overlays and cameras, never
/// node or edge content. Missing node ids are tolerated here: a step whose
/// node was deleted simply has nothing to highlight. Only the static
/// replayer treats unresolvable ids as a hard staleness condition.
pub trait DiagramView {
    /// Current nodes, as a read-only snapshot.
    fn nodes(&self) -> &[DiagramNode];

    /// Current edges, as a read-only snapshot.
    fn edges(&self) -> &[DiagramEdge];

    /// Look up a node by id.
    fn node(&self, node_id: &str) -> Option<&DiagramNode> {
        self.nodes().iter().find(|node| node.id() == node_id)
    }

    /// Compute a fit-to-nodes camera for the given node ids.
    ///
    /// The default implementation is a padded bounding-box fit over the ids
    /// that resolve; real layout collaborators may override it with their own
    /// camera logic. Returns the identity viewport when none of the ids
    /// resolve.
    fn fit_viewport(&self, node_ids: &[String]) -> Viewport {
        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        let mut matched = false;

        for id in node_ids {
            if let Some(node) = self.node(id) {
                matched = true;
                min_x = min_x.min(*node.x());
                min_y = min_y.min(*node.y());
                max_x = max_x.max(node.x() + node.width());
                max_y = max_y.max(node.y() + node.height());
            }
        }

        if !matched {
            return Viewport::default();
        }

        let bounds_width = (max_x - min_x).max(1.0);
        let bounds_height = (max_y - min_y).max(1.0);
        let zoom = ((FIT_CANVAS_WIDTH / bounds_width).min(FIT_CANVAS_HEIGHT / bounds_height)
            * (1.0 - FIT_PADDING))
            .clamp(FIT_MIN_ZOOM, FIT_MAX_ZOOM);

        let center_x = min_x + bounds_width / 2.0;
        let center_y = min_y + bounds_height / 2.0;
        Viewport::new(
            FIT_CANVAS_WIDTH / 2.0 - center_x * zoom,
            FIT_CANVAS_HEIGHT / 2.0 - center_y * zoom,
            zoom,
        )
    }
}

impl DiagramView for DiagramSnapshot {
    fn nodes(&self) -> &[DiagramNode] {
        self.nodes()
    }

    fn edges(&self) -> &[DiagramEdge] {
        self.edges()
    }

    fn node(&self, node_id: &str) -> Option<&DiagramNode> {
        DiagramSnapshot::node(self, node_id)
    }
}

/// Camera command receiver, implemented by the rendering layer.
///
/// Viewport transitions are fire-and-forget: navigation never awaits them,
/// and a command issued while a previous transition is still animating must
/// supersede it, not queue behind it.
pub trait ViewportSink {
    /// Move the camera, optionally animating over `transition`.
    fn set_viewport(&mut self, viewport: Viewport, transition: Option<Duration>);
}

/// AI caption/speaker-note generation, keyed the same way as
/// [`cicerone_core::Presentation`] notes.
///
/// Failures must never block playback: callers log and skip, rendering
/// absent notes as empty rather than as an error state.
#[async_trait]
pub trait NoteComposer: Send + Sync {
    /// Generate a caption and speaker notes for one sub-slide.
    async fn compose(&self, key: &NoteKey, step_description: &str) -> CiceroneResult<SlideNote>;
}
