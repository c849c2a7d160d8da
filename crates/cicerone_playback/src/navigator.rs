//! The live playback navigation state machine.
//!
//! A [`Navigator`] is an explicit object constructed from its inputs (the
//! flattened sequence, settings, a diagram snapshot); it owns only its own
//! state, so independent playback sessions cannot cross-contaminate. All
//! position changes happen synchronously under one lock: no observer (taps,
//! the viewport sink, or a `view()` caller) ever sees an intermediate state.

use crate::flatten::{flatten, resolve_scenarios};
use crate::timer::TimerHandle;
use crate::view::{PlaybackView, derive_slide_view};
use cicerone_core::{
    BranchPoint, DiagramSnapshot, NoteKey, Presentation, PresentationSettings, Scenario, SlideNote,
    SubSlide,
};
use cicerone_error::CiceroneResult;
use cicerone_interface::ViewportSink;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, warn};

/// How long a title interstitial stays up before auto-advancing.
const TITLE_INTERSTITIAL: Duration = Duration::from_millis(3_000);
/// Animation duration passed to the viewport sink.
const VIEWPORT_TRANSITION: Duration = Duration::from_millis(600);

/// Outcome of opening playback.
///
/// A presentation that flattens to zero sub-slides is a distinct
/// nothing-to-present state, not an error; missing scenario references are a
/// blocking error raised before this enum is ever produced.
pub enum PlaybackLaunch {
    /// Playback can proceed
    Ready(Navigator),
    /// Nothing to present: no scenarios, or every scenario is empty
    Empty,
}

/// The live playback engine.
///
/// Construct with [`Navigator::open`] inside a tokio runtime (the autoplay
/// and title timers are spawned tasks). Always call [`Navigator::close`]
/// when the playback overlay goes away so no timer outlives the session.
pub struct Navigator {
    inner: Arc<Mutex<NavigatorInner>>,
}

struct NavigatorInner {
    slides: Vec<SubSlide>,
    scenarios: HashMap<String, Scenario>,
    notes: HashMap<NoteKey, SlideNote>,
    settings: PresentationSettings,
    diagram: DiagramSnapshot,

    current_index: usize,
    showing_title: bool,
    branch_point: Option<BranchPoint>,

    autoplay_engaged: bool,
    autoplay_timer: Option<TimerHandle>,
    autoplay_generation: u64,
    cycle_started: Instant,

    title_timer: Option<TimerHandle>,
    title_generation: u64,

    clock_accumulated: Duration,
    clock_running_since: Option<Instant>,

    viewport_sink: Option<Box<dyn ViewportSink + Send>>,
    taps: Vec<mpsc::UnboundedSender<SubSlide>>,
    closed: bool,
}

fn lock(inner: &Arc<Mutex<NavigatorInner>>) -> MutexGuard<'_, NavigatorInner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Navigator {
    /// Open playback for a presentation.
    ///
    /// Resolves scenario references (all-or-nothing), flattens them, and
    /// positions the navigator at index 0. If the presentation's settings
    /// request autoplay it is engaged immediately.
    ///
    /// # Errors
    ///
    /// Returns a missing-scenarios error when any referenced scenario id has
    /// no match; in that case nothing is played at all.
    #[tracing::instrument(skip_all, fields(presentation = %presentation.id()))]
    pub fn open(
        presentation: &Presentation,
        scenarios: &[Scenario],
        diagram: DiagramSnapshot,
    ) -> CiceroneResult<PlaybackLaunch> {
        let resolved = resolve_scenarios(presentation, scenarios)?;
        let slides = flatten(&resolved);
        if slides.is_empty() {
            debug!("Nothing to present");
            return Ok(PlaybackLaunch::Empty);
        }

        let scenarios_by_id: HashMap<String, Scenario> = resolved
            .into_iter()
            .map(|scenario| (scenario.id().clone(), scenario))
            .collect();

        let inner = Arc::new(Mutex::new(NavigatorInner {
            slides,
            scenarios: scenarios_by_id,
            notes: presentation.notes().clone(),
            settings: *presentation.settings(),
            diagram,
            current_index: 0,
            showing_title: false,
            branch_point: None,
            autoplay_engaged: *presentation.settings().autoplay(),
            autoplay_timer: None,
            autoplay_generation: 0,
            cycle_started: Instant::now(),
            title_timer: None,
            title_generation: 0,
            clock_accumulated: Duration::ZERO,
            clock_running_since: Some(Instant::now()),
            viewport_sink: None,
            taps: Vec::new(),
            closed: false,
        }));

        {
            let mut guard = lock(&inner);
            enter_index(&inner, &mut guard, 0);
        }

        Ok(PlaybackLaunch::Ready(Self { inner }))
    }

    /// Advance one position.
    ///
    /// A showing title interstitial is dismissed instead (no index change);
    /// a pending branch point suspends forward motion until
    /// [`Navigator::select_branch`]; the last index saturates.
    pub fn go_next(&self) {
        let mut inner = lock(&self.inner);
        if inner.closed {
            return;
        }
        if inner.showing_title {
            inner.cancel_title_timer();
            inner.showing_title = false;
            if inner.autoplay_engaged && inner.branch_point.is_none() {
                spawn_autoplay_timer(&self.inner, &mut inner);
            }
            return;
        }
        if inner.branch_point.is_some() {
            debug!("go_next ignored: suspended at branch point");
            return;
        }
        let next = inner.current_index + 1;
        if next >= inner.slides.len() {
            return;
        }
        enter_index(&self.inner, &mut inner, next);
    }

    /// Move one position back, skipping title entries (titles are not
    /// independently revisitable). A no-op at index 0.
    pub fn go_prev(&self) {
        let mut inner = lock(&self.inner);
        if inner.closed {
            return;
        }
        if inner.showing_title {
            inner.cancel_title_timer();
            inner.showing_title = false;
        }
        let mut index = inner.current_index;
        while index > 0 {
            index -= 1;
            if !inner.slides[index].is_title() {
                enter_index(&self.inner, &mut inner, index);
                return;
            }
        }
    }

    /// Jump directly to a position (progress-dot or node-click navigation).
    ///
    /// Clamps to bounds and clears any pending branch point.
    pub fn go_to_index(&self, index: usize) {
        let mut inner = lock(&self.inner);
        if inner.closed {
            return;
        }
        let clamped = index.min(inner.slides.len() - 1);
        enter_index(&self.inner, &mut inner, clamped);
    }

    /// Engage or disengage autoplay.
    ///
    /// Autoplay advances once per the presentation's interval, but never
    /// while a title interstitial is showing or a branch point is pending;
    /// it never auto-resolves a decision.
    pub fn toggle_autoplay(&self) {
        let mut inner = lock(&self.inner);
        if inner.closed {
            return;
        }
        if inner.autoplay_engaged {
            inner.autoplay_engaged = false;
            inner.cancel_autoplay_timer();
            debug!("Autoplay disengaged");
        } else {
            inner.autoplay_engaged = true;
            if !inner.showing_title && inner.branch_point.is_none() {
                spawn_autoplay_timer(&self.inner, &mut inner);
            }
            debug!("Autoplay engaged");
        }
    }

    /// Resolve the pending branch point by choosing one of its targets.
    ///
    /// Jumps to the first later sub-slide focused on the chosen node, else
    /// the first later slide of a step highlighting it. A target that is not
    /// offered by the branch point is caller misuse and is ignored.
    pub fn select_branch(&self, target_node_id: &str) {
        let mut inner = lock(&self.inner);
        if inner.closed {
            return;
        }
        let Some(branch_point) = inner.branch_point.clone() else {
            warn!(target = target_node_id, "select_branch without a pending branch point");
            return;
        };
        if !branch_point.accepts(target_node_id) {
            warn!(target = target_node_id, "select_branch target not offered; ignoring");
            return;
        }

        let start = inner.current_index + 1;
        let destination = find_branch_destination(
            &inner.slides,
            &inner.scenarios,
            start,
            target_node_id,
        );
        match destination {
            Some(index) => enter_index(&self.inner, &mut inner, index),
            None if start < inner.slides.len() => {
                warn!(target = target_node_id, "no slide for branch target; advancing linearly");
                enter_index(&self.inner, &mut inner, start);
            }
            None => {
                inner.branch_point = None;
            }
        }
    }

    /// Snapshot of everything the UI reads at the current position.
    pub fn view(&self) -> PlaybackView {
        let inner = lock(&self.inner);
        let slide_view = derive_slide_view(
            &inner.slides,
            inner.current_index,
            &inner.scenarios,
            &inner.diagram,
        );
        let current_slide = inner.slides[inner.current_index].clone();
        let note = NoteKey::for_sub_slide(&current_slide)
            .and_then(|key| inner.notes.get(&key).cloned());
        PlaybackView {
            current_index: inner.current_index,
            total_sub_slides: inner.slides.len(),
            current_slide,
            showing_title: inner.showing_title,
            active_scenario_id: slide_view.active_scenario_id,
            active_step_id: slide_view.active_step_id,
            focused_node_id: slide_view.focused_node_id,
            visible_node_ids: slide_view.visible_node_ids,
            viewport: slide_view.viewport,
            overlay: slide_view.overlay,
            note,
            current_branch_point: inner.branch_point.clone(),
            is_autoplay_active: inner.autoplay_engaged,
            autoplay_progress: inner.autoplay_progress(),
            elapsed_seconds: inner.elapsed().as_secs(),
        }
    }

    /// Attach the rendering layer's camera receiver and push the current
    /// target viewport immediately.
    pub fn set_viewport_sink(&self, sink: Box<dyn ViewportSink + Send>) {
        let mut inner = lock(&self.inner);
        inner.viewport_sink = Some(sink);
        let index = inner.current_index;
        inner.push_viewport(index);
    }

    /// Suspend playback while the overlay is hidden: stops the elapsed clock
    /// and cancels pending timers.
    pub fn pause(&self) {
        let mut inner = lock(&self.inner);
        if inner.closed {
            return;
        }
        if let Some(since) = inner.clock_running_since.take() {
            inner.clock_accumulated += since.elapsed();
        }
        inner.cancel_autoplay_timer();
        inner.cancel_title_timer();
        debug!("Playback paused");
    }

    /// Resume after [`Navigator::pause`]: restarts the clock and re-arms
    /// whichever timer the current position calls for.
    pub fn resume(&self) {
        let mut inner = lock(&self.inner);
        if inner.closed {
            return;
        }
        if inner.clock_running_since.is_none() {
            inner.clock_running_since = Some(Instant::now());
        }
        if inner.showing_title {
            spawn_title_timer(&self.inner, &mut inner);
        } else if inner.autoplay_engaged && inner.branch_point.is_none() {
            spawn_autoplay_timer(&self.inner, &mut inner);
        }
        debug!("Playback resumed");
    }

    /// Tear the session down: cancels every timer atomically (none fires
    /// afterwards), stops the clock, and closes all visited-slide taps.
    pub fn close(&self) {
        let mut inner = lock(&self.inner);
        if inner.closed {
            return;
        }
        inner.closed = true;
        inner.cancel_autoplay_timer();
        inner.cancel_title_timer();
        if let Some(since) = inner.clock_running_since.take() {
            inner.clock_accumulated += since.elapsed();
        }
        inner.taps.clear();
        debug!("Playback closed");
    }

    /// Register a visited-slide tap. Every subsequent position change sends
    /// the entered sub-slide; the recorder is the primary consumer.
    pub(crate) fn tap(&self) -> mpsc::UnboundedReceiver<SubSlide> {
        let (tx, rx) = mpsc::unbounded_channel();
        lock(&self.inner).taps.push(tx);
        rx
    }

    /// The sub-slide at the current position.
    pub(crate) fn current_slide(&self) -> SubSlide {
        let inner = lock(&self.inner);
        inner.slides[inner.current_index].clone()
    }
}

impl NavigatorInner {
    fn cancel_autoplay_timer(&mut self) {
        self.autoplay_generation += 1;
        if let Some(timer) = self.autoplay_timer.take() {
            timer.cancel();
        }
    }

    fn cancel_title_timer(&mut self) {
        self.title_generation += 1;
        if let Some(timer) = self.title_timer.take() {
            timer.cancel();
        }
    }

    fn autoplay_progress(&self) -> f64 {
        if self.autoplay_timer.is_none() {
            return 0.0;
        }
        let interval = self.settings.autoplay_interval().as_duration();
        let elapsed = self.cycle_started.elapsed().as_secs_f64();
        (elapsed / interval.as_secs_f64() * 100.0).clamp(0.0, 100.0)
    }

    fn elapsed(&self) -> Duration {
        self.clock_accumulated
            + self
                .clock_running_since
                .map(|since| since.elapsed())
                .unwrap_or(Duration::ZERO)
    }

    fn push_viewport(&mut self, index: usize) {
        let slide_view = derive_slide_view(&self.slides, index, &self.scenarios, &self.diagram);
        if let Some(sink) = self.viewport_sink.as_mut() {
            // Fire-and-forget: a newer command supersedes any in-flight
            // transition on the sink side.
            sink.set_viewport(slide_view.viewport, Some(VIEWPORT_TRANSITION));
        }
    }
}

/// Apply a position change: index, branch state, interstitial state, tap
/// emission, timer re-arming, and the camera push, all under the caller's
/// lock.
fn enter_index(arc: &Arc<Mutex<NavigatorInner>>, inner: &mut NavigatorInner, index: usize) {
    inner.current_index = index;
    inner.branch_point = None;
    inner.cancel_title_timer();

    let slide = inner.slides[index].clone();
    inner.taps.retain(|tap| tap.send(slide.clone()).is_ok());
    debug!(index, slide = ?slide, "Entered sub-slide");

    if slide.is_title() {
        inner.showing_title = true;
        // Autoplay holds while the interstitial is up.
        inner.cancel_autoplay_timer();
        spawn_title_timer(arc, inner);
    } else {
        inner.showing_title = false;
        inner.branch_point = branch_point_at(&inner.slides, &inner.scenarios, index);
        if inner.branch_point.is_some() {
            debug!(index, "Suspended at branch point");
            inner.cancel_autoplay_timer();
        } else if inner.autoplay_engaged {
            // Manual navigation resets the interval.
            spawn_autoplay_timer(arc, inner);
        }
    }

    inner.push_viewport(index);
}

/// One-shot autoplay timer; each advance re-arms through `enter_index`.
fn spawn_autoplay_timer(arc: &Arc<Mutex<NavigatorInner>>, inner: &mut NavigatorInner) {
    inner.autoplay_generation += 1;
    let generation = inner.autoplay_generation;
    let period = inner.settings.autoplay_interval().as_duration();
    inner.cycle_started = Instant::now();

    let weak: Weak<Mutex<NavigatorInner>> = Arc::downgrade(arc);
    inner.autoplay_timer = Some(TimerHandle::spawn(async move {
        tokio::time::sleep(period).await;
        let Some(arc) = weak.upgrade() else {
            return;
        };
        let mut inner = lock(&arc);
        if inner.closed
            || inner.autoplay_generation != generation
            || !inner.autoplay_engaged
            || inner.showing_title
            || inner.branch_point.is_some()
        {
            return;
        }
        let next = inner.current_index + 1;
        if next >= inner.slides.len() {
            // Reached the end of the sequence.
            inner.autoplay_engaged = false;
            inner.autoplay_timer = None;
            debug!("Autoplay finished the sequence");
            return;
        }
        enter_index(&arc, &mut inner, next);
    }));
}

/// Auto-dismiss timer for a title interstitial; fires once, then advances.
fn spawn_title_timer(arc: &Arc<Mutex<NavigatorInner>>, inner: &mut NavigatorInner) {
    inner.title_generation += 1;
    let generation = inner.title_generation;

    let weak: Weak<Mutex<NavigatorInner>> = Arc::downgrade(arc);
    inner.title_timer = Some(TimerHandle::spawn(async move {
        tokio::time::sleep(TITLE_INTERSTITIAL).await;
        let Some(arc) = weak.upgrade() else {
            return;
        };
        let mut inner = lock(&arc);
        if inner.closed || !inner.showing_title || inner.title_generation != generation {
            return;
        }
        inner.showing_title = false;
        inner.title_timer = None;
        let next = inner.current_index + 1;
        if next < inner.slides.len() {
            enter_index(&arc, &mut inner, next);
        } else if inner.autoplay_engaged && inner.branch_point.is_none() {
            spawn_autoplay_timer(&arc, &mut inner);
        }
    }));
}

/// A branch point arises at the last flattened slide of a step declaring a
/// real decision (two or more targets); that is the position where forward
/// motion would leave the step.
fn branch_point_at(
    slides: &[SubSlide],
    scenarios: &HashMap<String, Scenario>,
    index: usize,
) -> Option<BranchPoint> {
    let slide = &slides[index];
    let step_id = slide.step_id()?;
    let step = scenarios.get(slide.scenario_id())?.step(step_id)?;
    let decision = step.decision()?;

    let last_of_step = match slides.get(index + 1) {
        None => true,
        Some(next) => next.step_id() != Some(step_id) || next.scenario_id() != slide.scenario_id(),
    };
    if !last_of_step {
        return None;
    }

    Some(BranchPoint::new(
        step_id,
        decision.target_node_ids().clone(),
        decision.target_labels().clone(),
    ))
}

/// Destination lookup for `select_branch`: prefer a node slide focused on
/// the target, else any later slide of a step that highlights it.
fn find_branch_destination(
    slides: &[SubSlide],
    scenarios: &HashMap<String, Scenario>,
    start: usize,
    target_node_id: &str,
) -> Option<usize> {
    if start >= slides.len() {
        return None;
    }
    let focused = slides[start..]
        .iter()
        .position(|slide| slide.focused_node_id() == Some(target_node_id))
        .map(|offset| start + offset);
    if focused.is_some() {
        return focused;
    }
    slides[start..]
        .iter()
        .position(|slide| {
            slide
                .step_id()
                .and_then(|step_id| {
                    scenarios
                        .get(slide.scenario_id())
                        .and_then(|scenario| scenario.step(step_id))
                })
                .is_some_and(|step| step.highlights(target_node_id))
        })
        .map(|offset| start + offset)
}
