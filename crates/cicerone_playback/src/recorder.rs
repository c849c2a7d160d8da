//! Recording a walkthrough session into a frozen path.

use crate::navigator::Navigator;
use cicerone_core::{Presentation, RecordedPath, SubSlide};
use cicerone_error::CiceroneResult;
use tokio::sync::mpsc;
use tracing::debug;

/// Captures the literal click-through of an authoring session.
///
/// The recorder taps the navigator's visited-slide stream and appends every
/// entry as-is: backward jumps and revisits are not deduplicated, so the
/// frozen path replays exactly as the author walked it. Dropping the
/// recorder without [`Recorder::save_recorded_path`] discards the buffer;
/// the discard-or-save decision happens exactly once.
pub struct Recorder {
    rx: mpsc::UnboundedReceiver<SubSlide>,
    buffer: Vec<SubSlide>,
}

impl Recorder {
    /// Start recording against a live navigator.
    ///
    /// The current position counts as visited, so a session that never
    /// navigates still freezes a one-slide path.
    pub fn start(navigator: &Navigator) -> Self {
        let rx = navigator.tap();
        let buffer = vec![navigator.current_slide()];
        debug!("Recording session started");
        Self { rx, buffer }
    }

    fn drain(&mut self) {
        while let Ok(slide) = self.rx.try_recv() {
            self.buffer.push(slide);
        }
    }

    /// Number of slides captured so far.
    pub fn recorded_len(&mut self) -> usize {
        self.drain();
        self.buffer.len()
    }

    /// Freeze the captured sequence onto the presentation.
    ///
    /// Consumes the recorder; afterwards the path is immutable. Publishing
    /// (slug minting, `is_public`) stays with the caller on
    /// [`Presentation`]; the recorder never picks slugs.
    ///
    /// # Errors
    ///
    /// Fails if the presentation already carries a frozen recorded path.
    pub fn save_recorded_path(mut self, presentation: &mut Presentation) -> CiceroneResult<()> {
        self.drain();
        let length = self.buffer.len();
        presentation.attach_recorded_path(RecordedPath::freeze(self.buffer))?;
        debug!(presentation = %presentation.id(), length, "Recorded path saved");
        Ok(())
    }

    /// Discard the buffer without saving.
    pub fn stop_recording(mut self) {
        self.drain();
        debug!(discarded = self.buffer.len(), "Recording session discarded");
    }
}
