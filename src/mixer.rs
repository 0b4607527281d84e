//! Module: mixer
//!
//! Purpose: Interrupt-context mixing of the active voices into one
//! output amplitude per tick.
//!
//! `tick()` runs once per sound timer interrupt and must finish well
//! inside one sample period (~45 µs at 22 050 Hz). Everything in here
//! is bounded O(1): no allocation, no blocking, no logging. The only
//! inputs are the committed [`ControlSnapshot`] and the voices the
//! mixer owns; the only outputs are the DAC value and the completion
//! flags on [`SharedEngineState`].
//!
//! # Scaling
//!
//! Each layer keeps its own divisor: profile volume over 100, idle
//! throttle volume over 255, rev throttle volume over 180, horn weight
//! over 255. The asymmetry is deliberate and matches the recordings'
//! relative loudness; do not unify the divisors.

use crate::bank::Slot;
use crate::config::{DAC_SILENCE, HORN_MIX_WEIGHT, REV_SWITCH_POINT};
use crate::engine::MixWeights;
use crate::profiles::VehicleProfile;
use crate::shared::{ControlSnapshot, EnginePhase, SharedEngineState};
use crate::voice::Voice;

/// Mixes the engine layers and the horn overlay for one vehicle.
pub struct Mixer<'a> {
    shared: &'a SharedEngineState,

    start: Voice,
    idle: Voice,
    rev: Voice,
    horn: Voice,

    snap: ControlSnapshot,
    prev_phase: EnginePhase,
}

impl<'a> Mixer<'a> {
    /// Build the voices from a profile's bank and volume multipliers.
    pub fn new(shared: &'a SharedEngineState, profile: &'static VehicleProfile) -> Self {
        let bank = &profile.bank;
        let vols = &profile.volumes;
        Self {
            shared,
            start: Voice::new(bank.get(Slot::Start), vols.start),
            idle: Voice::new(bank.get(Slot::Idle), vols.idle),
            rev: Voice::new(bank.get(Slot::Rev), vols.rev),
            horn: Voice::new(bank.get(Slot::Horn), vols.horn),
            snap: ControlSnapshot::initial(),
            prev_phase: EnginePhase::Off,
        }
    }

    /// Produce one output sample. Interrupt context only.
    ///
    /// Returns the DAC value (0-255, 128 = silence).
    #[inline]
    pub fn tick(&mut self) -> u8 {
        // Keep the previous snapshot if a commit is mid-flight.
        self.shared.try_snapshot(&mut self.snap);
        let snap = self.snap;

        if snap.phase != self.prev_phase {
            self.apply_phase_change(snap.phase);
            self.prev_phase = snap.phase;
        }

        let mut engine: i32 = 0;
        let mut engine_active = false;

        match snap.phase {
            EnginePhase::Off => {}

            EnginePhase::Starting => {
                if self.start.is_active() {
                    engine = self.start.advance() as i32 * self.start.volume_percent() as i32 / 100;
                    engine_active = true;
                    if !self.start.is_active() {
                        self.shared.set_start_done();
                    }
                }
            }

            EnginePhase::Idle | EnginePhase::Revving => {
                self.track_rev_activation(snap.throttle_faded);

                let idle_sample = if self.idle.is_active() {
                    let scaled =
                        self.idle.advance() as i32 * self.idle.volume_percent() as i32 / 100;
                    scaled * snap.idle_volume as i32 / 255
                } else {
                    0
                };

                if self.rev.is_active() {
                    let scaled = self.rev.advance() as i32 * self.rev.volume_percent() as i32 / 100;
                    let rev_sample = scaled * snap.rev_volume as i32 / 180;

                    let w = MixWeights::at(snap.throttle_faded);
                    engine = if self.idle.is_active() {
                        (idle_sample * w.idle + rev_sample * w.rev) / (w.idle + w.rev)
                    } else {
                        rev_sample
                    };
                } else {
                    engine = idle_sample;
                }
                engine_active = self.idle.is_active() || self.rev.is_active();
            }
        }

        // Horn overlay. The start recording is never interrupted: a
        // request that is still pending when STARTING begins is dropped,
        // not queued. A phase change to OFF has already silenced the
        // horn voice above.
        if snap.phase == EnginePhase::Starting {
            self.shared.take_horn_request();
        } else if self.shared.take_horn_request() {
            self.horn.activate(false);
            self.shared.set_horn_active(true);
        }

        let mut out = engine;
        if self.horn.is_active() {
            let scaled = self.horn.advance() as i32 * self.horn.volume_percent() as i32 / 100;
            let horn_sample = scaled * HORN_MIX_WEIGHT / 255;

            out = if engine_active {
                (engine + 2 * horn_sample) / 3
            } else {
                horn_sample
            };

            if !self.horn.is_active() {
                self.shared.set_horn_active(false);
            }
        }

        out = out * snap.master_volume as i32 / 100;

        (out + DAC_SILENCE as i32).clamp(0, 255) as u8
    }

    /// Voice activation edges on a committed phase change.
    fn apply_phase_change(&mut self, phase: EnginePhase) {
        match phase {
            EnginePhase::Off => {
                self.start.deactivate();
                self.idle.deactivate();
                self.rev.deactivate();
                self.horn.deactivate();
                self.shared.set_horn_active(false);
            }
            EnginePhase::Starting => {
                self.start.activate(false);
            }
            EnginePhase::Idle | EnginePhase::Revving => {
                if !self.idle.is_active() {
                    self.idle.activate(true);
                }
            }
        }
    }

    /// The rev voice joins the blend above the switch point and leaves
    /// below it. Cursor resets happen here, in interrupt context, so
    /// the control loop never touches a cursor.
    #[inline]
    fn track_rev_activation(&mut self, throttle_faded: u8) {
        if throttle_faded > REV_SWITCH_POINT {
            if !self.rev.is_active() {
                self.rev.activate(true);
            }
        } else if self.rev.is_active() {
            self.rev.deactivate();
        }
    }
}
