#![forbid(unsafe_code)]

//! Recognition state machine with a timed error reset.
//!
//! [`LockState`] is a pure tagged union: no colors, no view references.
//! Presentation decisions (which color a Success stroke gets, whether dots
//! animate) belong entirely to the observing collaborator.
//!
//! # State Machine
//!
//! - `Initial --begin--> Started`
//! - `Started --settle(accepted)--> Success | Error`
//! - `Error --deadline reached on tick--> Initial` (automatic)
//! - `any --reset--> Initial` (immediate, cancels the deadline)
//!
//! The auto-reset is an owned deadline on the machine instance, polled via
//! [`tick`](StateMachine::tick), never a shared or global timer. Cancelling
//! it is idempotent: resetting with no deadline pending, or after it fired,
//! is a no-op.

use std::time::Duration;

use web_time::Instant;

// ---------------------------------------------------------------------------
// LockState
// ---------------------------------------------------------------------------

/// Recognition state of the lock. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LockState {
    /// Nothing drawn; waiting for a touch on a node.
    #[default]
    Initial,
    /// A gesture is in progress.
    Started,
    /// The released gesture was accepted.
    Success,
    /// The released gesture was rejected (too short or mismatched).
    Error,
}

impl LockState {
    /// Whether this is a post-release verdict (`Success` or `Error`).
    #[must_use]
    pub const fn is_settled(self) -> bool {
        matches!(self, Self::Success | Self::Error)
    }

    /// Stable name, for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Initial => "initial",
            Self::Started => "started",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

// ---------------------------------------------------------------------------
// StateMachine
// ---------------------------------------------------------------------------

/// Drives [`LockState`] transitions and owns the error-reset deadline.
#[derive(Debug, Clone)]
pub struct StateMachine {
    state: LockState,
    error_reset_delay: Duration,
    deadline: Option<Instant>,
}

impl StateMachine {
    /// Create a machine in `Initial` that holds `Error` for
    /// `error_reset_delay` before reverting on its own.
    #[must_use]
    pub fn new(error_reset_delay: Duration) -> Self {
        Self {
            state: LockState::Initial,
            error_reset_delay,
            deadline: None,
        }
    }

    /// The current state.
    #[must_use]
    pub const fn state(&self) -> LockState {
        self.state
    }

    /// The pending auto-reset deadline, if one is armed.
    ///
    /// Hosts with their own schedulers can use this to decide when to call
    /// [`tick`](Self::tick) instead of polling every frame.
    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// `Initial → Started`. Returns `false` (without transitioning) from any
    /// other state.
    pub fn begin(&mut self) -> bool {
        if self.state != LockState::Initial {
            return false;
        }
        self.state = LockState::Started;
        true
    }

    /// Settle a released gesture: `Started → Success` if `accepted`,
    /// `Started → Error` otherwise, arming the auto-reset deadline.
    ///
    /// From any state but `Started` this is a no-op. Returns the state after
    /// the call.
    pub fn settle(&mut self, accepted: bool, now: Instant) -> LockState {
        if self.state != LockState::Started {
            return self.state;
        }
        if accepted {
            self.state = LockState::Success;
        } else {
            self.state = LockState::Error;
            self.deadline = Some(now + self.error_reset_delay);
        }
        self.state
    }

    /// Immediate transition to `Initial`, cancelling any pending deadline.
    ///
    /// Returns `true` iff the state actually changed; resetting an `Initial`
    /// machine is a no-op.
    pub fn reset(&mut self) -> bool {
        self.deadline = None;
        if self.state == LockState::Initial {
            return false;
        }
        self.state = LockState::Initial;
        true
    }

    /// Fire the auto-reset if its deadline has been reached.
    ///
    /// Returns `true` iff `Error → Initial` happened on this call; the
    /// deadline is consumed, so the transition fires at most once.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.state == LockState::Error
            && let Some(deadline) = self.deadline
            && now >= deadline
        {
            self.deadline = None;
            self.state = LockState::Initial;
            return true;
        }
        false
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
