//! Cicerone: guided walkthroughs over architecture diagrams.
//!
//! Cicerone turns a node/edge architecture diagram into a navigable
//! presentation: authors write **scenarios** (ordered **steps** that
//! highlight nodes and position the camera), stitch them into a
//! **presentation**, and play the result back live with autoplay, title
//! interstitials, branch decisions, and presenter notes, or record one
//! specific walkthrough and publish it for read-only static replay.
//!
//! # Architecture
//!
//! The workspace is organized as focused crates:
//!
//! - `cicerone_core`: the narrative data model (scenarios, steps,
//!   sub-slides, presentations, recorded paths) and diagram snapshot types
//! - `cicerone_interface`: traits at the seams to external collaborators
//!   (canvas store, layout, AI note generation)
//! - `cicerone_playback`: the engine, covering the flattener, live
//!   navigator, recorder, and static replayer
//! - `cicerone_error`: the shared error taxonomy
//!
//! This crate re-exports everything for convenience.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use cicerone::{DiagramSnapshot, Navigator, PlaybackLaunch};
//!
//! let launch = Navigator::open(&presentation, &scenarios, diagram)?;
//! if let PlaybackLaunch::Ready(navigator) = launch {
//!     navigator.go_next();
//!     let view = navigator.view();
//!     println!("{} of {}", view.current_index + 1, view.total_sub_slides);
//!     navigator.close();
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub use cicerone_core::{
    AutoplayInterval, BranchPoint, BranchTargets, DiagramEdge, DiagramNode, DiagramNodeBuilder,
    DiagramSnapshot, NoteKey, Presentation, PresentationBuilder, PresentationSettings,
    RecordedPath, Scenario, ScenarioBuilder, SlideNote, Step, StepBuilder, StepMode, SubSlide,
    Viewport,
};
pub use cicerone_error::{
    CiceroneError, CiceroneErrorKind, CiceroneResult, JsonError, PresentationError,
    PresentationErrorKind, ReplayError, ReplayErrorKind,
};
pub use cicerone_interface::{DiagramView, NoteComposer, ViewportSink};
pub use cicerone_playback::{
    Navigator, NodeHighlight, PlaybackLaunch, PlaybackView, Recorder, ReplayLaunch,
    ReplaySnapshot, ReplayView, StaticReplayer, compose_missing_notes, flatten,
    resolve_scenarios,
};
