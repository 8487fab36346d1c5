// Host-side tests for the idle / attract-mode timer.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod idle {
    include!("../src/idle.rs");
}

use idle::*;
use std::time::Duration;

fn secs(s: u64) -> Duration {
    Duration::from_secs(s)
}

#[test]
fn unarmed_timer_never_fires() {
    let mut t = IdleTimer::default();
    assert!(t.poll(secs(1_000)).is_empty());
    assert!(!t.is_idle());
}

#[test]
fn countdown_starts_at_limit_minus_countdown() {
    let mut t = IdleTimer::default();
    t.reset(secs(0), true);
    assert!(t.is_armed());
    assert_eq!(t.countdown_lead(), secs(3));
    assert!(t.poll(Duration::from_millis(2_999)).is_empty());
    assert_eq!(t.poll(secs(3)).as_slice(), &[IdleEvent::CountdownStarted(5)]);
    assert!(t.is_counting_down());
}

#[test]
fn countdown_ticks_down_then_enters_idle() {
    let mut t = IdleTimer::default();
    t.reset(secs(0), true);
    t.poll(secs(3));
    assert_eq!(t.poll(secs(4)).as_slice(), &[IdleEvent::CountdownTick(4)]);
    assert_eq!(t.poll(secs(5)).as_slice(), &[IdleEvent::CountdownTick(3)]);
    assert_eq!(t.poll(secs(6)).as_slice(), &[IdleEvent::CountdownTick(2)]);
    assert_eq!(t.poll(secs(7)).as_slice(), &[IdleEvent::CountdownTick(1)]);
    assert_eq!(t.poll(secs(8)).as_slice(), &[IdleEvent::EnteredIdle]);
    assert!(t.is_idle());
    // stays idle until reset
    assert!(t.poll(secs(60)).is_empty());
    assert!(t.is_idle());
}

#[test]
fn late_poll_catches_up_on_every_transition() {
    let mut t = IdleTimer::default();
    t.reset(secs(0), true);
    let events = t.poll(secs(20));
    assert_eq!(
        events.as_slice(),
        &[
            IdleEvent::CountdownStarted(5),
            IdleEvent::CountdownTick(4),
            IdleEvent::CountdownTick(3),
            IdleEvent::CountdownTick(2),
            IdleEvent::CountdownTick(1),
            IdleEvent::EnteredIdle,
        ]
    );
}

#[test]
fn reset_without_arm_cancels_everything() {
    let mut t = IdleTimer::default();
    t.reset(secs(0), true);
    t.poll(secs(4));
    assert!(t.is_counting_down());
    t.reset(secs(4), false);
    assert_eq!(t.phase(), IdlePhase::Active { countdown_at: None });
    assert!(t.poll(secs(100)).is_empty());
}

#[test]
fn rearm_moves_the_deadline() {
    let mut t = IdleTimer::default();
    t.reset(secs(0), true);
    t.reset(secs(2), true);
    assert!(t.poll(Duration::from_millis(4_999)).is_empty());
    assert_eq!(t.poll(secs(5)).as_slice(), &[IdleEvent::CountdownStarted(5)]);
}

#[test]
fn zero_countdown_goes_straight_to_idle() {
    let mut t = IdleTimer::new(secs(2), 0);
    t.reset(secs(0), true);
    assert_eq!(t.poll(secs(2)).as_slice(), &[IdleEvent::EnteredIdle]);
    assert!(t.is_idle());
}

#[test]
fn countdown_longer_than_limit_starts_immediately() {
    let mut t = IdleTimer::new(secs(2), 5);
    assert_eq!(t.countdown_lead(), Duration::ZERO);
    t.reset(secs(10), true);
    assert_eq!(t.poll(secs(10)).as_slice(), &[IdleEvent::CountdownStarted(5)]);
}
