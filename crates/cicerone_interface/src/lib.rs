//! Collaborator traits for the Cicerone walkthrough engine.
//!
//! The playback engine consumes its external collaborators (the canvas
//! store, the layout algorithms, and AI note generation) only through the
//! narrow contracts defined here. Rendering layers implement
//! [`ViewportSink`]; canvas stores implement [`DiagramView`]; note services
//! implement [`NoteComposer`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;

pub use traits::{DiagramView, NoteComposer, ViewportSink};
