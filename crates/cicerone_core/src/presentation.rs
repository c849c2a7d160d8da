//! Presentation bundles, presenter notes, and frozen recorded paths.

use crate::SubSlide;
use chrono::{DateTime, Utc};
use cicerone_error::{CiceroneResult, JsonError, PresentationError, PresentationErrorKind};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Composite key addressing presenter notes.
///
/// Serialized as the colon-joined composite form, `scenario:step` or
/// `scenario:step:node`, matching the keys used by note-generation services.
///
/// # Examples
///
/// ```
/// use cicerone_core::NoteKey;
/// use std::str::FromStr;
///
/// let key = NoteKey::for_node("auth", "login", "session-store");
/// assert_eq!(key.to_string(), "auth:login:session-store");
/// assert_eq!(NoteKey::from_str("auth:login:session-store").unwrap(), key);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NoteKey {
    scenario_id: String,
    step_id: String,
    node_id: Option<String>,
}

impl NoteKey {
    /// Key for a step-level (overview) note.
    pub fn for_step(scenario_id: impl Into<String>, step_id: impl Into<String>) -> Self {
        Self {
            scenario_id: scenario_id.into(),
            step_id: step_id.into(),
            node_id: None,
        }
    }

    /// Key for a node-level (deep-dive) note.
    pub fn for_node(
        scenario_id: impl Into<String>,
        step_id: impl Into<String>,
        node_id: impl Into<String>,
    ) -> Self {
        Self {
            scenario_id: scenario_id.into(),
            step_id: step_id.into(),
            node_id: Some(node_id.into()),
        }
    }

    /// Key addressing the notes of a given sub-slide, if it can carry notes
    /// (titles cannot).
    pub fn for_sub_slide(slide: &SubSlide) -> Option<Self> {
        match slide {
            SubSlide::Title { .. } => None,
            SubSlide::Overview {
                scenario_id,
                step_id,
            } => Some(Self::for_step(scenario_id, step_id)),
            SubSlide::Node {
                scenario_id,
                step_id,
                node_id,
            } => Some(Self::for_node(scenario_id, step_id, node_id)),
        }
    }

    /// The scenario component of the key.
    pub fn scenario_id(&self) -> &str {
        &self.scenario_id
    }

    /// The step component of the key.
    pub fn step_id(&self) -> &str {
        &self.step_id
    }

    /// The node component, present only for node-level keys.
    pub fn node_id(&self) -> Option<&str> {
        self.node_id.as_deref()
    }
}

impl std::fmt::Display for NoteKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.node_id {
            Some(node) => write!(f, "{}:{}:{}", self.scenario_id, self.step_id, node),
            None => write!(f, "{}:{}", self.scenario_id, self.step_id),
        }
    }
}

impl std::str::FromStr for NoteKey {
    type Err = PresentationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        match parts.as_slice() {
            [scenario, step] if !scenario.is_empty() && !step.is_empty() => {
                Ok(Self::for_step(*scenario, *step))
            }
            [scenario, step, node]
                if !scenario.is_empty() && !step.is_empty() && !node.is_empty() =>
            {
                Ok(Self::for_node(*scenario, *step, *node))
            }
            _ => Err(PresentationError::new(
                PresentationErrorKind::MalformedNoteKey(s.to_string()),
            )),
        }
    }
}

impl TryFrom<String> for NoteKey {
    type Error = PresentationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<NoteKey> for String {
    fn from(key: NoteKey) -> Self {
        key.to_string()
    }
}

/// Caption and speaker notes attached to one sub-slide.
#[derive(
    Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, derive_getters::Getters,
)]
pub struct SlideNote {
    /// Short on-screen caption
    #[serde(default)]
    caption: String,
    /// Longer presenter-only notes
    #[serde(default)]
    speaker_notes: String,
}

impl SlideNote {
    /// Create a note from a caption and speaker notes.
    pub fn new(caption: impl Into<String>, speaker_notes: impl Into<String>) -> Self {
        Self {
            caption: caption.into(),
            speaker_notes: speaker_notes.into(),
        }
    }
}

/// The closed set of autoplay intervals, serialized as milliseconds.
///
/// # Examples
///
/// ```
/// use cicerone_core::AutoplayInterval;
///
/// let interval: AutoplayInterval = serde_json::from_str("10000").unwrap();
/// assert_eq!(interval, AutoplayInterval::TenSeconds);
/// assert_eq!(interval.as_millis(), 10_000);
/// assert!(serde_json::from_str::<AutoplayInterval>("7000").is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "u64", into = "u64")]
pub enum AutoplayInterval {
    /// Advance every 5 seconds
    #[default]
    FiveSeconds,
    /// Advance every 10 seconds
    TenSeconds,
    /// Advance every 15 seconds
    FifteenSeconds,
}

impl AutoplayInterval {
    /// The interval in milliseconds.
    pub fn as_millis(self) -> u64 {
        match self {
            AutoplayInterval::FiveSeconds => 5_000,
            AutoplayInterval::TenSeconds => 10_000,
            AutoplayInterval::FifteenSeconds => 15_000,
        }
    }

    /// The interval as a [`Duration`].
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.as_millis())
    }
}

impl TryFrom<u64> for AutoplayInterval {
    type Error = String;

    fn try_from(millis: u64) -> Result<Self, Self::Error> {
        match millis {
            5_000 => Ok(AutoplayInterval::FiveSeconds),
            10_000 => Ok(AutoplayInterval::TenSeconds),
            15_000 => Ok(AutoplayInterval::FifteenSeconds),
            other => Err(format!(
                "autoplay interval must be 5000, 10000 or 15000 ms, got {other}"
            )),
        }
    }
}

impl From<AutoplayInterval> for u64 {
    fn from(interval: AutoplayInterval) -> Self {
        interval.as_millis()
    }
}

/// Playback settings carried by a presentation.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_setters::Setters,
)]
#[setters(prefix = "with_")]
pub struct PresentationSettings {
    /// Start autoplay as soon as playback opens
    #[serde(default)]
    autoplay: bool,
    /// Autoplay advance interval
    #[serde(default)]
    autoplay_interval: AutoplayInterval,
}

/// A frozen, ordered sub-slide sequence captured from one walkthrough.
///
/// Always linear: branch choices are baked in as consecutive entries and no
/// branch point survives freezing. Immutable after it is saved onto a
/// presentation; consumed read-only by the static replayer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct RecordedPath {
    /// The literal visited-slide sequence, in click-through order
    sub_slide_sequence: Vec<SubSlide>,
    /// When the recording session was saved
    recorded_at: DateTime<Utc>,
}

impl RecordedPath {
    /// Freeze a visited-slide sequence, stamping the save time.
    pub fn freeze(sub_slide_sequence: Vec<SubSlide>) -> Self {
        Self {
            sub_slide_sequence,
            recorded_at: Utc::now(),
        }
    }

    /// Number of recorded sub-slides.
    pub fn len(&self) -> usize {
        self.sub_slide_sequence.len()
    }

    /// True when nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.sub_slide_sequence.is_empty()
    }

    /// Every node id referenced by a node-typed entry, in sequence order.
    pub fn referenced_node_ids(&self) -> impl Iterator<Item = &str> {
        self.sub_slide_sequence
            .iter()
            .filter_map(|slide| slide.focused_node_id())
    }
}

/// A named, user-created bundle stitching scenarios into a walkthrough.
///
/// # Examples
///
/// ```
/// use cicerone_core::PresentationBuilder;
///
/// let mut presentation = PresentationBuilder::default()
///     .id("p-1".to_string())
///     .name("Request lifecycle".to_string())
///     .scenario_ids(vec!["ingress".to_string(), "storage".to_string()])
///     .build()
///     .unwrap();
///
/// assert!(!*presentation.is_public());
/// let slug = presentation.publish().to_string();
/// assert!(*presentation.is_public());
/// assert_eq!(presentation.public_slug().as_deref(), Some(slug.as_str()));
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
pub struct Presentation {
    /// Stable presentation identifier
    id: String,
    /// Display name
    name: String,
    /// Referenced scenarios, in stitch order
    #[serde(default)]
    #[builder(default)]
    scenario_ids: Vec<String>,
    /// Autoplay settings
    #[serde(default)]
    #[builder(default)]
    settings: PresentationSettings,
    /// Presenter notes keyed by composite note key
    #[serde(default)]
    #[builder(default)]
    notes: HashMap<NoteKey, SlideNote>,
    /// Whether the presentation is publicly replayable
    #[serde(default)]
    #[builder(default)]
    is_public: bool,
    /// Collision-resistant public identifier, present only when published
    #[serde(default)]
    #[builder(default)]
    public_slug: Option<String>,
    /// Frozen walkthrough, populated only by an explicit recording session
    #[serde(default)]
    #[builder(default)]
    recorded_path: Option<RecordedPath>,
}

impl Presentation {
    /// Look up the note for a composite key.
    pub fn note(&self, key: &NoteKey) -> Option<&SlideNote> {
        self.notes.get(key)
    }

    /// Attach or replace the note for a composite key.
    pub fn set_note(&mut self, key: NoteKey, note: SlideNote) {
        self.notes.insert(key, note);
    }

    /// Freeze a recorded path onto this presentation.
    ///
    /// # Errors
    ///
    /// Returns [`PresentationErrorKind::RecordedPathFrozen`] if a recorded
    /// path already exists; a frozen path is immutable and must be cleared
    /// explicitly before re-recording.
    pub fn attach_recorded_path(&mut self, path: RecordedPath) -> Result<(), PresentationError> {
        if self.recorded_path.is_some() {
            return Err(PresentationError::new(
                PresentationErrorKind::RecordedPathFrozen(self.id.clone()),
            ));
        }
        self.recorded_path = Some(path);
        Ok(())
    }

    /// Discard the frozen recorded path so a new session can be recorded.
    pub fn clear_recorded_path(&mut self) -> Option<RecordedPath> {
        self.recorded_path.take()
    }

    /// Mark the presentation public, minting a slug if none exists yet.
    ///
    /// Re-publishing after [`Self::unpublish`] reuses the existing slug so
    /// shared links keep working.
    pub fn publish(&mut self) -> &str {
        self.is_public = true;
        self.public_slug
            .get_or_insert_with(|| uuid::Uuid::new_v4().to_string())
    }

    /// Take the presentation private.
    ///
    /// The recorded path and slug are kept so it can be re-published.
    pub fn unpublish(&mut self) {
        self.is_public = false;
    }

    /// Serialize the whole presentation, including notes and any recorded
    /// path, to a JSON string.
    ///
    /// # Errors
    ///
    /// Returns a [`JsonError`] when serialization fails.
    pub fn to_json(&self) -> CiceroneResult<String> {
        Ok(serde_json::to_string(self)
            .map_err(|err| JsonError::new(err.to_string(), "presentation"))?)
    }

    /// Deserialize a presentation from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns a [`JsonError`] for malformed input, including a note map
    /// whose keys do not parse as composite note keys.
    pub fn from_json(json: &str) -> CiceroneResult<Self> {
        Ok(serde_json::from_str(json)
            .map_err(|err| JsonError::new(err.to_string(), "presentation"))?)
    }
}
