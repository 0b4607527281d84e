//! Module: engine
//!
//! Purpose: Throttle-driven engine sound state machine.
//!
//! Pure logic, no hardware dependencies: consumes link events and
//! throttle/horn input, produces committed [`ControlSnapshot`]s for the
//! mixer. Fully testable on host.
//!
//! Runs in the control loop only. The interrupt side never calls in
//! here; it reports back through the completion flags on
//! [`SharedEngineState`].
//!
//! # Phases
//!
//! OFF → STARTING → IDLE ⇄ REVVING, with the horn as an orthogonal
//! overlay. STARTING waits for the start one-shot to exhaust — throttle
//! input cannot cut the start recording short.

use crate::config::{
    IDLE_END_POINT, IDLE_VOLUME_AT_FULL, IDLE_VOLUME_AT_IDLE, IDLE_WEIGHT_FLOOR, IDLE_WEIGHT_FULL,
    IDLE_WEIGHT_PROPORTION, REV_PHASE_THRESHOLD, REV_SWITCH_POINT, REV_VOLUME_AT_FULL,
    REV_WEIGHT_FLOOR, REV_WEIGHT_FULL, THROTTLE_FADE_DOWN_STEP, THROTTLE_FADE_INTERVAL_MS,
    THROTTLE_FADE_UP_STEP,
};
use crate::profiles::VehicleProfile;
use crate::shared::{ControlSnapshot, EnginePhase, SharedEngineState};

/// Linear map of `x` from `[in_min, in_max]` onto `[out_min, out_max]`.
#[inline]
fn map_range(x: i32, in_min: i32, in_max: i32, out_min: i32, out_max: i32) -> i32 {
    out_min + (x - in_min) * (out_max - out_min) / (in_max - in_min)
}

/// Idle/rev crossfade weights for one tick.
///
/// Non-negative; the mixer divides the weighted sum by `idle + rev`, so
/// the weights need not sum to a fixed base.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MixWeights {
    pub idle: i32,
    pub rev: i32,
}

impl MixWeights {
    /// Piecewise-linear weights from the faded throttle (0-100).
    ///
    /// Below the switch point the rev layer is out of the blend
    /// entirely. Across the ramp both weights interpolate to floors
    /// rather than zero: the rev layer enters at its floor weight and
    /// the idle layer never fully leaves, keeping a base tone and
    /// avoiding a pop at either boundary.
    pub fn at(throttle_faded: u8) -> Self {
        let t = throttle_faded as i32;
        let switch = REV_SWITCH_POINT as i32;
        let end = IDLE_END_POINT as i32;

        if t <= switch {
            Self {
                idle: IDLE_WEIGHT_FULL,
                rev: 0,
            }
        } else if t < end {
            Self {
                idle: map_range(t, switch, end, IDLE_WEIGHT_PROPORTION, IDLE_WEIGHT_FLOOR),
                rev: map_range(t, switch, end, REV_WEIGHT_FLOOR, REV_WEIGHT_FULL),
            }
        } else {
            Self {
                idle: IDLE_WEIGHT_FLOOR,
                rev: REV_WEIGHT_FULL,
            }
        }
    }
}

/// Engine sound controller: one per vehicle.
pub struct EngineSoundController<'a> {
    shared: &'a SharedEngineState,
    profile: &'static VehicleProfile,

    phase: EnginePhase,
    throttle_raw: u8,
    throttle_faded: u8,
    last_fade_ms: u32,
    master_volume: u8,

    horn_button: bool,
    started_this_connection: bool,

    committed: ControlSnapshot,
}

impl<'a> EngineSoundController<'a> {
    pub fn new(
        shared: &'a SharedEngineState,
        profile: &'static VehicleProfile,
        master_volume: u8,
    ) -> Self {
        let mut committed = ControlSnapshot::initial();
        committed.master_volume = master_volume;
        shared.commit(&committed);

        Self {
            shared,
            profile,
            phase: EnginePhase::Off,
            throttle_raw: 0,
            throttle_faded: 0,
            last_fade_ms: 0,
            master_volume,
            horn_button: false,
            started_this_connection: false,
            committed,
        }
    }

    /// Current phase, as last committed.
    pub fn phase(&self) -> EnginePhase {
        self.phase
    }

    /// Smoothed throttle (0-100).
    pub fn throttle_faded(&self) -> u8 {
        self.throttle_faded
    }

    /// Connection established: start the engine once per connection.
    pub fn on_connected(&mut self, now_ms: u32) {
        self.last_fade_ms = now_ms;
        if self.phase == EnginePhase::Off && !self.started_this_connection {
            self.shared.take_start_done();
            self.phase = EnginePhase::Starting;
            self.started_this_connection = true;
            self.commit_if_changed();
        }
    }

    /// Connection lost or explicit stop: everything off, immediately.
    ///
    /// Idempotent; safe to call on every timeout poll.
    pub fn on_connection_lost(&mut self) {
        self.shared.cancel_horn_request();
        self.phase = EnginePhase::Off;
        self.throttle_raw = 0;
        self.throttle_faded = 0;
        self.started_this_connection = false;
        self.commit_if_changed();
    }

    /// Per-frame input: throttle (already mapped to 0-100) and the raw
    /// horn button level.
    pub fn on_input(&mut self, throttle: u8, horn_button: bool) {
        self.throttle_raw = throttle.min(100);

        // Horn fires on the rising edge only; repeats are ignored while
        // a request is pending or the horn voice still plays. A request
        // during STARTING is dropped: the start recording is never
        // interrupted or followed by a stale horn.
        let rising = horn_button && !self.horn_button;
        self.horn_button = horn_button;
        if rising && self.phase != EnginePhase::Starting && !self.shared.horn_busy() {
            self.shared.request_horn();
        }
    }

    /// Periodic update: throttle fade, start completion, phase changes.
    ///
    /// Call from the control loop at least every fade interval.
    pub fn poll(&mut self, now_ms: u32) {
        self.step_throttle_fade(now_ms);

        if self.phase == EnginePhase::Starting && self.shared.take_start_done() {
            self.phase = EnginePhase::Idle;
        }

        match self.phase {
            EnginePhase::Idle => {
                let w = MixWeights::at(self.throttle_faded);
                if self.throttle_faded > REV_SWITCH_POINT && w.rev >= REV_PHASE_THRESHOLD {
                    self.phase = EnginePhase::Revving;
                }
            }
            EnginePhase::Revving => {
                if self.throttle_faded <= REV_SWITCH_POINT {
                    self.phase = EnginePhase::Idle;
                }
            }
            EnginePhase::Off | EnginePhase::Starting => {}
        }

        self.commit_if_changed();
    }

    /// Asymmetric throttle smoothing: fast attack, slow release.
    fn step_throttle_fade(&mut self, now_ms: u32) {
        // Resync after a long gap (startup, stalled loop) instead of
        // replaying thousands of fade steps.
        const MAX_CATCHUP_MS: u32 = 20 * THROTTLE_FADE_INTERVAL_MS;
        if now_ms.wrapping_sub(self.last_fade_ms) > MAX_CATCHUP_MS {
            self.last_fade_ms = now_ms.wrapping_sub(MAX_CATCHUP_MS);
        }

        while now_ms.wrapping_sub(self.last_fade_ms) >= THROTTLE_FADE_INTERVAL_MS {
            self.last_fade_ms = self.last_fade_ms.wrapping_add(THROTTLE_FADE_INTERVAL_MS);

            if self.throttle_faded < self.throttle_raw && self.throttle_faded < 99 {
                self.throttle_faded = (self.throttle_faded + THROTTLE_FADE_UP_STEP).min(100);
            } else if self.throttle_faded > self.throttle_raw && self.throttle_faded > 1 {
                self.throttle_faded -= THROTTLE_FADE_DOWN_STEP;
            }
        }
    }

    fn commit_if_changed(&mut self) {
        let snap = ControlSnapshot {
            phase: self.phase,
            throttle_faded: self.throttle_faded,
            idle_volume: map_range(
                self.throttle_faded as i32,
                0,
                100,
                IDLE_VOLUME_AT_IDLE as i32,
                IDLE_VOLUME_AT_FULL as i32,
            ) as u8,
            rev_volume: map_range(
                self.throttle_faded as i32,
                0,
                100,
                self.profile.volumes.engine_rev as i32,
                REV_VOLUME_AT_FULL as i32,
            ) as u8,
            master_volume: self.master_volume,
        };

        if snap != self.committed {
            self.shared.commit(&snap);
            self.committed = snap;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{IDLE_END_POINT, REV_SWITCH_POINT};

    #[test]
    fn test_weights_below_switch_point() {
        let w = MixWeights::at(0);
        assert_eq!(w.idle, 100);
        assert_eq!(w.rev, 0);

        let w = MixWeights::at(REV_SWITCH_POINT);
        assert_eq!(w.rev, 0);
    }

    #[test]
    fn test_rev_weight_enters_at_floor() {
        let w = MixWeights::at(REV_SWITCH_POINT + 1);
        assert!(w.rev >= REV_WEIGHT_FLOOR);
        assert!(w.rev < REV_WEIGHT_FULL);
    }

    #[test]
    fn test_idle_weight_never_zero() {
        for t in 0..=100u8 {
            let w = MixWeights::at(t);
            assert!(w.idle >= IDLE_WEIGHT_FLOOR, "idle weight zero at t={}", t);
        }
    }

    #[test]
    fn test_weights_continuous_at_end_point() {
        let just_below = MixWeights::at(IDLE_END_POINT - 1);
        let at_end = MixWeights::at(IDLE_END_POINT);

        assert!((at_end.rev - just_below.rev).abs() <= 2);
        assert!((at_end.idle - just_below.idle).abs() <= 2);
        assert_eq!(at_end.rev, REV_WEIGHT_FULL);
        assert_eq!(at_end.idle, IDLE_WEIGHT_FLOOR);
    }
}
