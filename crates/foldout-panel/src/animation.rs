//! Animated expand/collapse of a group's content height.
//!
//! # State machine
//!
//! ```text
//!             toggle / expand                 tick, progress >= 1
//! Collapsed ─────────────────► Animating(Expanding) ─────────────► Expanded
//!     ▲                              │   ▲                              │
//!     │                      toggle  │   │ toggle                       │
//!     │  tick, progress >= 1         ▼   │                              │
//!     └──────────────────── Animating(Collapsing) ◄─────────────────────┘
//!                                         toggle / collapse
//! ```
//!
//! A new run always starts from the current, possibly partial, height.
//! Runs are never queued: starting one supersedes whatever was in flight.
//! [`HeightAnimation::set_expanded`] bypasses the animation entirely.
//!
//! # Invariants
//!
//! - Progress is always in [0.0, 1.0]
//! - Height stays between the run's start and target heights
//! - A settled animation holds exactly 0 or the full content height

use parking_lot::Mutex;
use std::fmt;
use std::sync::{Arc, Weak};
use std::time::{Duration, Instant};

use foldout_core::{CoreError, CoreResult, ExpandCollapseConfig};

use crate::scheduler::{Scheduler, TaskControl, TimerHandle};

/// Cubic ease-in-out: slow start, fast middle, slow finish.
#[inline]
pub fn ease_in_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

// =============================================================================
// Settings
// =============================================================================

/// Animation tuning taken from the expand/collapse options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationSettings {
    enabled: bool,
    duration: Duration,
    tick_interval: Duration,
}

impl AnimationSettings {
    pub fn new(enabled: bool, duration: Duration, tick_interval: Duration) -> CoreResult<Self> {
        if duration.is_zero() {
            return Err(CoreError::NonPositiveDuration);
        }
        if tick_interval.is_zero() {
            return Err(CoreError::NonPositiveTickInterval);
        }
        Ok(Self {
            enabled,
            duration,
            tick_interval,
        })
    }

    /// Settings from an options record.
    pub fn from_config(config: &ExpandCollapseConfig) -> CoreResult<Self> {
        Self::new(
            config.animation_enabled,
            config.duration(),
            config.tick_interval(),
        )
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            duration: Duration::from_millis(200),
            tick_interval: Duration::from_millis(10),
        }
    }
}

// =============================================================================
// Height Animation
// =============================================================================

/// Direction of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Expanding,
    Collapsing,
}

/// Where the animation is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationPhase {
    Collapsed,
    Expanded,
    Animating(Direction),
}

impl AnimationPhase {
    #[inline]
    pub fn is_animating(self) -> bool {
        matches!(self, Self::Animating(_))
    }

    /// The state this phase is at or heading to.
    pub fn heads_expanded(self) -> bool {
        matches!(
            self,
            Self::Expanded | Self::Animating(Direction::Expanding)
        )
    }
}

/// Result of a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Not animating; nothing changed.
    Idle,
    /// Still running at this height.
    Running(f32),
    /// Reached the target and settled.
    Settled(f32),
}

/// Pure height interpolation for one group. Time is always passed in.
#[derive(Debug, Clone)]
pub struct HeightAnimation {
    phase: AnimationPhase,
    full_height: f32,
    current_height: f32,
    start_height: f32,
    target_height: f32,
    started_at: Option<Instant>,
    settings: AnimationSettings,
}

impl HeightAnimation {
    /// A settled animation at the given state.
    pub fn new(expanded: bool, full_height: f32, settings: AnimationSettings) -> Self {
        let full_height = full_height.max(0.0);
        let height = if expanded { full_height } else { 0.0 };
        Self {
            phase: settled_phase(expanded),
            full_height,
            current_height: height,
            start_height: height,
            target_height: height,
            started_at: None,
            settings,
        }
    }

    pub fn phase(&self) -> AnimationPhase {
        self.phase
    }

    pub fn current_height(&self) -> f32 {
        self.current_height
    }

    pub fn target_height(&self) -> f32 {
        self.target_height
    }

    pub fn full_height(&self) -> f32 {
        self.full_height
    }

    pub fn settings(&self) -> AnimationSettings {
        self.settings
    }

    pub fn is_running(&self) -> bool {
        self.phase.is_animating()
    }

    /// Flip direction. Returns `true` if a timed run started and needs ticks.
    pub fn toggle(&mut self, now: Instant) -> bool {
        let expand = !self.phase.heads_expanded();
        self.animate_to(expand, now)
    }

    /// Start expanding. Returns `true` if a timed run started.
    pub fn expand(&mut self, now: Instant) -> bool {
        self.animate_to(true, now)
    }

    /// Start collapsing. Returns `true` if a timed run started.
    pub fn collapse(&mut self, now: Instant) -> bool {
        self.animate_to(false, now)
    }

    /// Jump to a terminal state without animating.
    pub fn set_expanded(&mut self, expanded: bool) {
        self.settle(if expanded { self.full_height } else { 0.0 }, expanded);
    }

    fn animate_to(&mut self, expand: bool, now: Instant) -> bool {
        let target = if expand { self.full_height } else { 0.0 };

        if !self.settings.enabled {
            self.settle(target, expand);
            return false;
        }

        if !self.phase.is_animating() && self.current_height == target {
            // Already there
            self.phase = settled_phase(expand);
            return false;
        }

        self.start_height = self.current_height;
        self.target_height = target;
        self.started_at = Some(now);
        self.phase = AnimationPhase::Animating(if expand {
            Direction::Expanding
        } else {
            Direction::Collapsing
        });
        true
    }

    /// Linear progress of the current run at `now`, in [0.0, 1.0].
    pub fn progress(&self, now: Instant) -> f32 {
        match self.started_at {
            Some(start) if self.phase.is_animating() => {
                let elapsed = now.saturating_duration_since(start).as_secs_f32();
                (elapsed / self.settings.duration.as_secs_f32()).clamp(0.0, 1.0)
            }
            _ => 1.0,
        }
    }

    /// Advance to `now`.
    pub fn tick(&mut self, now: Instant) -> TickOutcome {
        let AnimationPhase::Animating(direction) = self.phase else {
            return TickOutcome::Idle;
        };

        let progress = self.progress(now);
        if progress >= 1.0 {
            self.settle(self.target_height, direction == Direction::Expanding);
            return TickOutcome::Settled(self.current_height);
        }

        let eased = ease_in_out_cubic(progress);
        self.current_height =
            self.start_height + (self.target_height - self.start_height) * eased;
        TickOutcome::Running(self.current_height)
    }

    fn settle(&mut self, height: f32, expanded: bool) {
        self.current_height = height;
        self.start_height = height;
        self.target_height = height;
        self.started_at = None;
        self.phase = settled_phase(expanded);
    }
}

fn settled_phase(expanded: bool) -> AnimationPhase {
    if expanded {
        AnimationPhase::Expanded
    } else {
        AnimationPhase::Collapsed
    }
}

// =============================================================================
// Group Animation (timer-driven handle)
// =============================================================================

/// Called with `(group_name, height)` whenever an animated height changes,
/// so the host can repaint.
pub type FrameCallback = Arc<dyn Fn(&str, f32) + Send + Sync>;

struct AnimationInner {
    group: String,
    state: Mutex<HeightAnimation>,
    timer: Mutex<Option<TimerHandle>>,
    scheduler: Arc<dyn Scheduler>,
    on_frame: Option<FrameCallback>,
}

/// A [`HeightAnimation`] ticked by a [`Scheduler`].
///
/// Each rebuild creates a fresh handle per rendered group and cancels the
/// previous one. Clones share the same animation.
#[derive(Clone)]
pub struct GroupAnimation {
    inner: Arc<AnimationInner>,
}

impl GroupAnimation {
    pub fn new(
        group: impl Into<String>,
        animation: HeightAnimation,
        scheduler: Arc<dyn Scheduler>,
        on_frame: Option<FrameCallback>,
    ) -> Self {
        Self {
            inner: Arc::new(AnimationInner {
                group: group.into(),
                state: Mutex::new(animation),
                timer: Mutex::new(None),
                scheduler,
                on_frame,
            }),
        }
    }

    pub fn group(&self) -> &str {
        &self.inner.group
    }

    pub fn height(&self) -> f32 {
        self.inner.state.lock().current_height()
    }

    pub fn phase(&self) -> AnimationPhase {
        self.inner.state.lock().phase()
    }

    /// Copy of the underlying state.
    pub fn snapshot(&self) -> HeightAnimation {
        self.inner.state.lock().clone()
    }

    /// Check if a timer is armed.
    pub fn is_running(&self) -> bool {
        self.inner.timer.lock().is_some()
    }

    /// Interactive toggle.
    pub fn toggle(&self) {
        self.start(|state, now| state.toggle(now));
    }

    pub fn expand(&self) {
        self.start(|state, now| state.expand(now));
    }

    pub fn collapse(&self) {
        self.start(|state, now| state.collapse(now));
    }

    /// Programmatic change: stop any run and jump to the terminal state.
    pub fn set_expanded(&self, expanded: bool) {
        self.cancel();
        let height = {
            let mut state = self.inner.state.lock();
            state.set_expanded(expanded);
            state.current_height()
        };
        self.inner.emit_frame(height);
    }

    /// Stop the timer, leaving the height where it is. Safe to call any
    /// number of times.
    pub fn cancel(&self) {
        if let Some(timer) = self.inner.timer.lock().take() {
            timer.cancel();
        }
    }

    fn start(&self, begin: impl FnOnce(&mut HeightAnimation, Instant) -> bool) {
        // Supersede any run in flight
        self.cancel();

        let now = self.inner.scheduler.now();
        let (started, height, interval) = {
            let mut state = self.inner.state.lock();
            let started = begin(&mut *state, now);
            (
                started,
                state.current_height(),
                state.settings().tick_interval(),
            )
        };

        if !started {
            self.inner.emit_frame(height);
            return;
        }

        tracing::debug!("Animating group '{}' from height {}", self.inner.group, height);
        let weak: Weak<AnimationInner> = Arc::downgrade(&self.inner);
        let timer = self.inner.scheduler.schedule_repeating(
            interval,
            Box::new(move || match weak.upgrade() {
                Some(inner) => inner.tick(),
                None => TaskControl::Stop,
            }),
        );
        *self.inner.timer.lock() = Some(timer);
    }
}

impl AnimationInner {
    fn tick(&self) -> TaskControl {
        let now = self.scheduler.now();
        let outcome = self.state.lock().tick(now);
        match outcome {
            TickOutcome::Idle => {
                self.timer.lock().take();
                TaskControl::Stop
            }
            TickOutcome::Running(height) => {
                self.emit_frame(height);
                TaskControl::Continue
            }
            TickOutcome::Settled(height) => {
                self.timer.lock().take();
                tracing::debug!("Group '{}' settled at height {}", self.group, height);
                self.emit_frame(height);
                TaskControl::Stop
            }
        }
    }

    fn emit_frame(&self, height: f32) {
        if let Some(on_frame) = &self.on_frame {
            on_frame(&self.group, height);
        }
    }
}

impl fmt::Debug for GroupAnimation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroupAnimation")
            .field("group", &self.inner.group)
            .field("state", &*self.inner.state.lock())
            .field("running", &self.is_running())
            .finish()
    }
}
