//! AI-assisted note generation, isolated from the navigation engine.

use crate::flatten::{flatten, resolve_scenarios};
use cicerone_core::{NoteKey, Presentation, Scenario};
use cicerone_error::CiceroneResult;
use cicerone_interface::NoteComposer;
use tracing::{debug, warn};

/// Fill in captions and speaker notes for every sub-slide of a presentation
/// that does not have one yet.
///
/// Failures are isolated per call: a slide whose composition fails is logged
/// and skipped, and playback renders its note as absent. Generation
/// problems never propagate into the navigation state machine. Returns the
/// number of notes added.
///
/// # Errors
///
/// Only the missing-scenario gate can fail; composer errors never do.
pub async fn compose_missing_notes(
    presentation: &mut Presentation,
    scenarios: &[Scenario],
    composer: &dyn NoteComposer,
) -> CiceroneResult<usize> {
    let resolved = resolve_scenarios(presentation, scenarios)?;
    let slides = flatten(&resolved);
    let mut added = 0;

    for slide in &slides {
        let Some(key) = NoteKey::for_sub_slide(slide) else {
            continue;
        };
        if presentation.note(&key).is_some() {
            continue;
        }
        let description = resolved
            .iter()
            .find(|scenario| scenario.id() == key.scenario_id())
            .and_then(|scenario| scenario.step(key.step_id()))
            .map(|step| step.description().clone())
            .unwrap_or_default();

        match composer.compose(&key, &description).await {
            Ok(note) => {
                presentation.set_note(key, note);
                added += 1;
            }
            Err(error) => {
                warn!(key = %key, %error, "Note composition failed; skipping slide");
            }
        }
    }

    debug!(added, "Composed missing notes");
    Ok(added)
}
