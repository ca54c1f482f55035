#![cfg_attr(not(test), forbid(unsafe_code))]
#![cfg_attr(test, deny(unsafe_code))]

//! Core: grid geometry, pointer gestures, and two-stage pattern
//! recognition for PatLock.
//!
//! # Role in PatLock
//! `patlock-core` is the logic layer of the pattern-lock widget. It owns the
//! grid model, the gesture-to-selection path builder, the recognition state
//! machine with its timed error reset, and the set-then-confirm stage flow.
//! It draws nothing and blocks on nothing.
//!
//! # Primary responsibilities
//! - **GridLayout**: node identities plus cached per-layout hit geometry.
//! - **PathBuilder**: pointer stream → ordered, de-duplicated selection
//!   with implicit midpoint insertion.
//! - **StateMachine**: `Initial → Started → Success | Error` with an owned,
//!   cancellable auto-reset deadline.
//! - **StageStore**: captures per-stage patterns and judges the confirm
//!   stage by ordered key-sequence equality.
//! - **PatternLock**: the façade a host widget drives with pointer events
//!   and observes for state changes.
//!
//! # How it fits in the system
//! A host widget normalizes its toolkit's touch events into
//! [`event::PointerEvent`]s, feeds them to [`lock::PatternLock`], and renders
//! from the lock's selection, polyline, and rubber-band data. All color,
//! animation, and dialog decisions stay on the host side.

pub mod event;
pub mod geometry;
pub mod grid;
pub mod lock;
pub mod path;
pub mod stage;
pub mod state;

pub use event::PointerEvent;
pub use geometry::{Point, Rect};
pub use grid::{GridLayout, GridNode};
pub use lock::{LockConfig, PatternLock};
pub use path::PathBuilder;
pub use stage::{Pattern, Stage, StageStore};
pub use state::{LockState, StateMachine};
