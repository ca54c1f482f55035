//! End-to-end flows through the public façade: set, confirm, fail, retry.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use patlock_core::{LockConfig, LockState, PatternLock, Point, Rect, Stage};
use web_time::Instant;

const DELAY: Duration = Duration::from_millis(1000);

fn lock() -> PatternLock {
    let mut lock = PatternLock::default();
    lock.layout(Rect::new(0.0, 0.0, 300.0, 300.0));
    lock
}

fn center(row: u16, col: u16) -> Point {
    Point::new(f32::from(col) * 100.0 + 50.0, f32::from(row) * 100.0 + 50.0)
}

fn swipe(lock: &mut PatternLock, cells: &[(u16, u16)], now: Instant) -> LockState {
    let mut iter = cells.iter();
    let &(row, col) = iter.next().expect("swipe needs at least one cell");
    lock.on_pointer_down(center(row, col));
    for &(row, col) in iter {
        lock.on_pointer_move(center(row, col));
    }
    lock.on_pointer_up(now)
}

#[test]
fn set_then_confirm_happy_path() {
    let mut lock = lock();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    lock.set_on_state_change(move |state| sink.borrow_mut().push(state));

    // Stage one: an L-shape down the left edge and across the bottom.
    let l_shape = [(0, 0), (1, 0), (2, 0), (2, 1), (2, 2)];
    assert_eq!(swipe(&mut lock, &l_shape, Instant::now()), LockState::Success);
    assert_eq!(lock.pattern(Stage::First).unwrap().joined(), "14789");

    lock.advance_stage();

    // Stage two: same shape confirms.
    assert_eq!(swipe(&mut lock, &l_shape, Instant::now()), LockState::Success);

    assert_eq!(
        seen.borrow().as_slice(),
        [
            LockState::Started,
            LockState::Success,
            LockState::Initial, // advance_stage
            LockState::Started,
            LockState::Success,
        ]
    );
}

#[test]
fn diagonal_swipe_confirms_with_implicit_center() {
    let mut lock = lock();

    // Drawn slowly through all four cells on stage one...
    swipe(&mut lock, &[(0, 0), (1, 1), (2, 2), (2, 1)], Instant::now());
    assert_eq!(lock.pattern(Stage::First).unwrap().joined(), "1598");

    lock.advance_stage();

    // ...and confirmed with a fast diagonal whose samples skip the center.
    let state = swipe(&mut lock, &[(0, 0), (2, 2), (2, 1)], Instant::now());
    assert_eq!(state, LockState::Success);
}

#[test]
fn failed_confirm_then_auto_reset_then_retry() {
    let mut lock = lock();
    let secret = [(0, 0), (0, 1), (0, 2), (1, 1)];
    swipe(&mut lock, &secret, Instant::now());
    lock.advance_stage();

    let t = Instant::now();
    assert_eq!(
        swipe(&mut lock, &[(2, 0), (2, 1), (2, 2), (1, 1)], t),
        LockState::Error
    );

    // The error holds its selection until the delay elapses.
    assert_eq!(lock.current_selection().len(), 4);
    assert_eq!(lock.tick(t + DELAY), Some(LockState::Initial));
    assert!(lock.current_selection().is_empty());

    // The stored captures survive the failed attempt.
    assert_eq!(lock.pattern(Stage::First).unwrap().joined(), "1235");
    assert_eq!(lock.pattern(Stage::Second).unwrap().joined(), "7895");

    assert_eq!(swipe(&mut lock, &secret, Instant::now()), LockState::Success);
}

#[test]
fn success_locks_input_until_explicit_reset() {
    let mut lock = lock();
    swipe(&mut lock, &[(0, 0), (0, 1), (0, 2), (1, 1)], Instant::now());
    assert_eq!(lock.state(), LockState::Success);

    // Further gestures bounce off.
    assert_eq!(lock.on_pointer_down(center(2, 2)), LockState::Success);
    assert_eq!(lock.on_pointer_up(Instant::now()), LockState::Success);

    // The click-to-clear affordance goes through reset().
    lock.reset();
    assert_eq!(lock.on_pointer_down(center(2, 2)), LockState::Started);
}

#[test]
fn custom_keys_flow_into_patterns() {
    let mut lock = lock();
    let keys: Vec<String> = ["a", "b", "c", "d", "e", "f", "g", "h", "i"]
        .into_iter()
        .map(String::from)
        .collect();
    assert!(lock.set_keys(keys));
    lock.layout(Rect::new(0.0, 0.0, 300.0, 300.0));

    swipe(&mut lock, &[(0, 0), (0, 1), (0, 2), (1, 1)], Instant::now());
    assert_eq!(lock.pattern(Stage::First).unwrap().joined(), "abce");
}

#[test]
fn relayout_mid_flow_keeps_captures() {
    let mut lock = lock();
    swipe(&mut lock, &[(0, 0), (0, 1), (0, 2), (1, 1)], Instant::now());
    lock.advance_stage();

    // The widget is resized between stages.
    lock.layout(Rect::new(0.0, 0.0, 600.0, 600.0));
    let mut gesture = |cells: &[(u16, u16)]| {
        let mut iter = cells.iter();
        let &(row, col) = iter.next().unwrap();
        let at = |row: u16, col: u16| {
            Point::new(
                f32::from(col) * 200.0 + 100.0,
                f32::from(row) * 200.0 + 100.0,
            )
        };
        lock.on_pointer_down(at(row, col));
        for &(row, col) in iter {
            lock.on_pointer_move(at(row, col));
        }
        lock.on_pointer_up(Instant::now())
    };
    assert_eq!(
        gesture(&[(0, 0), (0, 1), (0, 2), (1, 1)]),
        LockState::Success
    );
}

#[test]
fn confirm_without_a_set_pattern_errors() {
    let mut lock = PatternLock::new(LockConfig::default());
    lock.layout(Rect::new(0.0, 0.0, 300.0, 300.0));
    lock.advance_stage();
    let state = swipe(&mut lock, &[(0, 0), (0, 1), (0, 2), (1, 1)], Instant::now());
    assert_eq!(state, LockState::Error);
}
