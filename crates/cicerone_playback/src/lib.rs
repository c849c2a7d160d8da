//! Playback engine for Cicerone.
//!
//! This crate turns authored scenarios into a playable walkthrough:
//!
//! - **Flattening**: [`flatten`] converts a presentation's scenarios into the
//!   linear sub-slide sequence, after [`resolve_scenarios`] gates on missing
//!   scenario references.
//! - **Live navigation**: [`Navigator`] owns the playback position, autoplay
//!   and title timers, branch suspension, and the derived per-position view.
//! - **Recording**: [`Recorder`] taps the navigator's visited-slide stream
//!   and freezes the literal click-through into a
//!   [`cicerone_core::RecordedPath`].
//! - **Static replay**: [`StaticReplayer`] walks a frozen recorded path (or
//!   the legacy overview-only fallback) from a store-independent snapshot.
//!
//! # Example
//!
//! ```
//! use cicerone_core::{DiagramSnapshot, PresentationBuilder, ScenarioBuilder, StepBuilder};
//! use cicerone_playback::{Navigator, PlaybackLaunch};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> cicerone_error::CiceroneResult<()> {
//! let scenario = ScenarioBuilder::default()
//!     .id("ingress".to_string())
//!     .name("Ingress".to_string())
//!     .steps(vec![StepBuilder::default()
//!         .id("s1".to_string())
//!         .name("Request arrives".to_string())
//!         .order(0u32)
//!         .build()
//!         .unwrap()])
//!     .build()
//!     .unwrap();
//! let presentation = PresentationBuilder::default()
//!     .id("p1".to_string())
//!     .name("Tour".to_string())
//!     .scenario_ids(vec!["ingress".to_string()])
//!     .build()
//!     .unwrap();
//!
//! let launch = Navigator::open(&presentation, &[scenario], DiagramSnapshot::default())?;
//! let navigator = match launch {
//!     PlaybackLaunch::Ready(navigator) => navigator,
//!     PlaybackLaunch::Empty => unreachable!("one scenario with one step"),
//! };
//! assert_eq!(navigator.view().total_sub_slides, 2); // title + overview
//! navigator.close();
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod flatten;
mod navigator;
mod notes;
mod recorder;
mod replay;
mod timer;
mod view;

pub use flatten::{flatten, resolve_scenarios};
pub use navigator::{Navigator, PlaybackLaunch};
pub use notes::compose_missing_notes;
pub use recorder::Recorder;
pub use replay::{ReplayLaunch, ReplaySnapshot, ReplayView, StaticReplayer};
pub use view::{NodeHighlight, PlaybackView};
