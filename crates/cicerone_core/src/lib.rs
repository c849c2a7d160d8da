//! Core data types for the Cicerone walkthrough engine.
//!
//! This crate provides the narrative data model shared across the Cicerone
//! workspace: authored [`Scenario`]s and their [`Step`]s, the flattened
//! [`SubSlide`] playback unit, the [`Presentation`] bundle that stitches
//! scenarios together, the frozen [`RecordedPath`], and read-only diagram
//! snapshot types. Everything here is pure schema; behavior lives in
//! `cicerone_playback`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod diagram;
mod presentation;
mod scenario;
mod sub_slide;

pub use diagram::{DiagramEdge, DiagramNode, DiagramNodeBuilder, DiagramSnapshot};
pub use presentation::{
    AutoplayInterval, NoteKey, Presentation, PresentationBuilder, PresentationSettings,
    RecordedPath, SlideNote,
};
pub use scenario::{
    BranchTargets, Scenario, ScenarioBuilder, Step, StepBuilder, StepMode, Viewport,
};
pub use sub_slide::{BranchPoint, SubSlide};
