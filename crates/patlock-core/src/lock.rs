#![forbid(unsafe_code)]

//! The pattern lock: grid, path, state machine, and stages wired together.
//!
//! [`PatternLock`] is the single object a host widget talks to. It consumes
//! the normalized pointer stream, drives the recognition state machine, and
//! exposes everything a renderer needs (ordered selection, stroke polyline,
//! rubber-band segment) without doing any drawing itself.
//!
//! # Event flow
//!
//! - `Down` resets the previous attempt (cancelling a pending error reset),
//!   then starts a gesture if the touch lands on a node. A `Down` while the
//!   lock shows `Success` is ignored entirely; the host clears explicitly.
//! - `Move` samples extend the selection while the gesture is `Started` and
//!   the selection is under its cap.
//! - `Up` settles the gesture: too short is an `Error`; otherwise the
//!   pattern is committed to the active stage and judged there.
//! - [`tick`](PatternLock::tick) fires the pending `Error → Initial`
//!   auto-reset once its deadline passes.
//!
//! Every actual state change is reported to the observer installed with
//! [`set_on_state_change`](PatternLock::set_on_state_change), carrying the
//! state tag only; colors and animation are the observer's business.

use std::time::Duration;

use web_time::Instant;

use crate::event::PointerEvent;
use crate::geometry::{Point, Rect};
use crate::grid::{GridLayout, GridNode};
use crate::path::PathBuilder;
use crate::stage::{Pattern, Stage, StageStore};
use crate::state::{LockState, StateMachine};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Grid dimensions and recognition thresholds.
#[derive(Debug, Clone)]
pub struct LockConfig {
    /// Grid rows (default: 3).
    pub rows: u16,
    /// Grid columns (default: 3).
    pub cols: u16,
    /// Minimum accepted selection length (default: 4).
    pub min_count: usize,
    /// Selection cap; conventionally the node count (default: 9).
    pub max_count: usize,
    /// How long `Error` is held before reverting on its own (default: 1s).
    pub error_reset_delay: Duration,
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            rows: 3,
            cols: 3,
            min_count: 4,
            max_count: 9,
            error_reset_delay: Duration::from_millis(1000),
        }
    }
}

impl LockConfig {
    /// Defaults for a rows×cols grid, with the cap at the node count.
    #[must_use]
    pub fn for_grid(rows: u16, cols: u16) -> Self {
        Self {
            rows,
            cols,
            max_count: rows as usize * cols as usize,
            ..Self::default()
        }
    }
}

// ---------------------------------------------------------------------------
// PatternLock
// ---------------------------------------------------------------------------

type StateListener = Box<dyn FnMut(LockState)>;

/// Two-stage pattern lock recognizer.
pub struct PatternLock {
    config: LockConfig,
    grid: GridLayout,
    path: PathBuilder,
    machine: StateMachine,
    store: StageStore,
    stage: Stage,
    /// Latest pointer position while a gesture is live; feeds the
    /// rubber-band segment.
    last_point: Option<Point>,
    listener: Option<StateListener>,
}

impl std::fmt::Debug for PatternLock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatternLock")
            .field("state", &self.machine.state())
            .field("stage", &self.stage)
            .field("selected", &self.path.len())
            .field("has_listener", &self.listener.is_some())
            .finish_non_exhaustive()
    }
}

impl Default for PatternLock {
    fn default() -> Self {
        Self::new(LockConfig::default())
    }
}

impl PatternLock {
    /// Create a lock with the given configuration. The grid still needs a
    /// layout pass before any touch can resolve.
    #[must_use]
    pub fn new(config: LockConfig) -> Self {
        let grid = GridLayout::new(config.rows, config.cols);
        let path = PathBuilder::new(config.max_count);
        let machine = StateMachine::new(config.error_reset_delay);
        Self {
            config,
            grid,
            path,
            machine,
            store: StageStore::new(),
            stage: Stage::First,
            last_point: None,
            listener: None,
        }
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &LockConfig {
        &self.config
    }

    /// The current recognition state.
    #[must_use]
    pub const fn state(&self) -> LockState {
        self.machine.state()
    }

    /// The active stage.
    #[must_use]
    pub const fn stage(&self) -> Stage {
        self.stage
    }

    /// The grid model (for hit geometry and node metadata).
    #[must_use]
    pub const fn grid(&self) -> &GridLayout {
        &self.grid
    }

    /// Install the state-change observer. Invoked on every transition with
    /// the new state.
    pub fn set_on_state_change(&mut self, listener: impl FnMut(LockState) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    // --- layout plumbing ---------------------------------------------------

    /// Lay the grid out over `area` with full-cell hit regions.
    pub fn layout(&mut self, area: Rect) {
        self.grid.layout(area);
    }

    /// Lay the grid out over `area`, keeping the central `keep` fraction of
    /// each cell as the hit region.
    pub fn layout_inset(&mut self, area: Rect, keep: f32) {
        self.grid.layout_inset(area, keep);
    }

    /// Lay the grid out from measured per-node rectangles, row-major.
    pub fn layout_cells(&mut self, cells: Vec<Rect>) -> bool {
        self.grid.layout_cells(cells)
    }

    /// Install custom display keys, row-major.
    pub fn set_keys(&mut self, keys: Vec<String>) -> bool {
        self.grid.set_keys(keys)
    }

    // --- pointer input -----------------------------------------------------

    /// Handle a pointer-down.
    ///
    /// Ignored while `Success` is showing. Otherwise the previous attempt is
    /// implicitly reset (cancelling any pending auto-reset), and the gesture
    /// starts if the touch resolves to a node.
    pub fn on_pointer_down(&mut self, pos: Point) -> LockState {
        if self.machine.state() == LockState::Success {
            return LockState::Success;
        }

        // A fresh touch discards the previous attempt.
        let was_reset = self.machine.reset();
        self.path.reset();
        self.last_point = Some(pos);
        if was_reset {
            self.notify(LockState::Initial);
        }

        if self.path.feed(&self.grid, pos) && self.machine.begin() {
            self.notify(LockState::Started);
        }
        self.machine.state()
    }

    /// Handle a pointer-move sample.
    ///
    /// No-op unless a gesture is `Started`; appends stop once the selection
    /// reaches its cap, though the rubber-band anchor keeps following the
    /// pointer.
    pub fn on_pointer_move(&mut self, pos: Point) -> LockState {
        if self.machine.state() != LockState::Started {
            return self.machine.state();
        }
        self.last_point = Some(pos);
        if !self.path.is_full() {
            self.path.feed(&self.grid, pos);
        }
        LockState::Started
    }

    /// Handle the pointer release and settle the gesture.
    ///
    /// A release with no live gesture (the touch never resolved a node)
    /// leaves the lock in `Initial` and records no attempt.
    pub fn on_pointer_up(&mut self, now: Instant) -> LockState {
        if self.machine.state() != LockState::Started {
            return self.machine.state();
        }

        let accepted = if self.path.len() < self.config.min_count {
            // Too short: an attempt, but never a stage capture.
            false
        } else {
            self.store.commit(self.stage, self.path.pattern())
        };

        let state = self.machine.settle(accepted, now);
        self.notify(state);
        state
    }

    /// Unified dispatch for hosts that forward [`PointerEvent`]s directly.
    pub fn process(&mut self, event: &PointerEvent, now: Instant) -> LockState {
        match *event {
            PointerEvent::Down(pos) => self.on_pointer_down(pos),
            PointerEvent::Move(pos) => self.on_pointer_move(pos),
            PointerEvent::Up => self.on_pointer_up(now),
        }
    }

    /// Fire the pending error auto-reset if its deadline has passed.
    ///
    /// Call periodically (e.g. on frame tick), or schedule a single wakeup
    /// from [`StateMachine::deadline`] via [`deadline`](Self::deadline).
    /// Returns the new state when the transition fired.
    pub fn tick(&mut self, now: Instant) -> Option<LockState> {
        if self.machine.tick(now) {
            self.path.reset();
            self.last_point = None;
            self.notify(LockState::Initial);
            return Some(LockState::Initial);
        }
        None
    }

    /// The pending auto-reset deadline, if armed.
    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        self.machine.deadline()
    }

    // --- resets and stages -------------------------------------------------

    /// Discard the current attempt: clears the selection and returns to
    /// `Initial`, cancelling any pending auto-reset. Captured stage patterns
    /// are kept. Idempotent.
    pub fn reset(&mut self) {
        self.path.reset();
        self.last_point = None;
        if self.machine.reset() {
            self.notify(LockState::Initial);
        }
    }

    /// Move to the confirm stage, resetting the attempt state while keeping
    /// the first-stage capture. On the second stage already, this just
    /// resets.
    pub fn advance_stage(&mut self) {
        self.stage = Stage::Second;
        self.reset();
    }

    /// Start the whole flow over: forget both stage captures and return to
    /// the first stage in `Initial`.
    pub fn clear(&mut self) {
        self.store.clear();
        self.stage = Stage::First;
        self.reset();
    }

    // --- queries -----------------------------------------------------------

    /// The ordered selection of the current (or just-settled) gesture.
    #[must_use]
    pub fn current_selection(&self) -> &[GridNode] {
        self.path.selection()
    }

    /// The captured pattern for `stage`, if that stage ever completed.
    #[must_use]
    pub fn pattern(&self, stage: Stage) -> Option<&Pattern> {
        self.store.get(stage)
    }

    /// Centers of the selected nodes, in selection order, for stroke
    /// rendering.
    #[must_use]
    pub fn polyline(&self) -> Vec<Point> {
        self.path.selection().iter().map(GridNode::center).collect()
    }

    /// The segment from the last selected node to the live pointer, while a
    /// gesture is in progress.
    #[must_use]
    pub fn rubber_band(&self) -> Option<(Point, Point)> {
        if self.machine.state() != LockState::Started {
            return None;
        }
        let anchor = self.path.selection().last()?.center();
        Some((anchor, self.last_point?))
    }

    fn notify(&mut self, state: LockState) {
        #[cfg(feature = "tracing")]
        tracing::debug!(state = state.as_str(), stage = ?self.stage, "lock state changed");
        if let Some(listener) = self.listener.as_mut() {
            listener(state);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
