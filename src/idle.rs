use crate::constants::{IDLE_COUNTDOWN_SECS, IDLE_COUNTDOWN_TICK_MS, IDLE_TIME_LIMIT_MS};
use smallvec::SmallVec;
use std::time::Duration;

/// Where the attract-mode timer currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdlePhase {
    /// User is interacting. `countdown_at` is set when the countdown is armed.
    Active { countdown_at: Option<Duration> },
    /// Countdown is visible and showing `remaining` seconds.
    Countdown { remaining: u32, next_tick_at: Duration },
    /// Attract mode is running until the next interaction.
    Idle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdleEvent {
    CountdownStarted(u32),
    CountdownTick(u32),
    EnteredIdle,
}

pub type IdleEvents = SmallVec<[IdleEvent; 2]>;

/// Idle/countdown state machine driven by an external monotonic clock.
///
/// `now` values are durations since an arbitrary fixed origin; the frame loop
/// calls [`IdleTimer::poll`] once per frame.
#[derive(Clone, Debug)]
pub struct IdleTimer {
    phase: IdlePhase,
    time_limit: Duration,
    countdown_secs: u32,
    tick: Duration,
}

impl Default for IdleTimer {
    fn default() -> Self {
        Self::new(
            Duration::from_millis(IDLE_TIME_LIMIT_MS),
            IDLE_COUNTDOWN_SECS,
        )
    }
}

impl IdleTimer {
    pub fn new(time_limit: Duration, countdown_secs: u32) -> Self {
        Self {
            phase: IdlePhase::Active { countdown_at: None },
            time_limit,
            countdown_secs,
            tick: Duration::from_millis(IDLE_COUNTDOWN_TICK_MS),
        }
    }

    pub fn phase(&self) -> IdlePhase {
        self.phase
    }

    pub fn is_idle(&self) -> bool {
        self.phase == IdlePhase::Idle
    }

    pub fn is_counting_down(&self) -> bool {
        matches!(self.phase, IdlePhase::Countdown { .. })
    }

    pub fn is_armed(&self) -> bool {
        matches!(
            self.phase,
            IdlePhase::Active {
                countdown_at: Some(_)
            }
        )
    }

    /// Delay between the last interaction and the first countdown frame.
    pub fn countdown_lead(&self) -> Duration {
        self.time_limit
            .saturating_sub(self.tick * self.countdown_secs)
    }

    /// Cancel any pending countdown or idle state.
    pub fn cancel(&mut self) {
        self.phase = IdlePhase::Active { countdown_at: None };
    }

    /// Cancel, then optionally re-arm relative to `now`.
    pub fn reset(&mut self, now: Duration, arm: bool) {
        self.cancel();
        if arm {
            self.phase = IdlePhase::Active {
                countdown_at: Some(now + self.countdown_lead()),
            };
        }
    }

    /// Advance to `now`, returning every transition that became due.
    pub fn poll(&mut self, now: Duration) -> IdleEvents {
        let mut events = IdleEvents::new();
        loop {
            match self.phase {
                IdlePhase::Active {
                    countdown_at: Some(at),
                } if now >= at => {
                    if self.countdown_secs == 0 {
                        self.phase = IdlePhase::Idle;
                        events.push(IdleEvent::EnteredIdle);
                        break;
                    }
                    self.phase = IdlePhase::Countdown {
                        remaining: self.countdown_secs,
                        next_tick_at: at + self.tick,
                    };
                    events.push(IdleEvent::CountdownStarted(self.countdown_secs));
                }
                IdlePhase::Countdown {
                    remaining,
                    next_tick_at,
                } if now >= next_tick_at => {
                    let remaining = remaining.saturating_sub(1);
                    if remaining == 0 {
                        self.phase = IdlePhase::Idle;
                        events.push(IdleEvent::EnteredIdle);
                        break;
                    }
                    self.phase = IdlePhase::Countdown {
                        remaining,
                        next_tick_at: next_tick_at + self.tick,
                    };
                    events.push(IdleEvent::CountdownTick(remaining));
                }
                _ => break,
            }
        }
        events
    }
}
