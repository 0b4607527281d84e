//! Module: shared
//!
//! Purpose: The single piece of mutable state shared between the
//! control loop and the sound timer interrupt.
//!
//! Ownership is strictly one-directional per field group:
//! - Control loop writes the engine snapshot (phase, faded throttle,
//!   volumes) and the horn request; the interrupt only reads them.
//! - The interrupt writes the completion flags (`start_done`,
//!   `horn_active`); the control loop only reads/clears them.
//! - Voice cursors never appear here: they are interrupt-private.
//!
//! Multi-field snapshot commits use a generation counter (odd while a
//! write is in flight) so the interrupt never observes a torn
//! combination such as a new phase paired with stale volumes. The
//! reader retries a bounded number of times and otherwise keeps its
//! previous snapshot; nothing on either side blocks.

use core::sync::atomic::{AtomicBool, AtomicU32, AtomicU8, Ordering};

use crate::config::{DEFAULT_MASTER_VOLUME, IDLE_VOLUME_AT_IDLE};

/// Engine sound phase.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnginePhase {
    /// Silent; no engine voices active.
    Off = 0,
    /// Start recording playing as a one-shot.
    Starting = 1,
    /// Idle loop, rev layer mixed in above the switch point.
    Idle = 2,
    /// Rev layer dominates the blend.
    Revving = 3,
}

impl EnginePhase {
    /// Convert from raw u8 (unknown values fall back to Off).
    #[inline]
    pub fn from_u8(v: u8) -> Self {
        match v {
            1 => Self::Starting,
            2 => Self::Idle,
            3 => Self::Revving,
            _ => Self::Off,
        }
    }
}

/// Committed engine state, as seen by the mixer on one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlSnapshot {
    /// Current engine phase.
    pub phase: EnginePhase,
    /// Smoothed throttle, 0-100.
    pub throttle_faded: u8,
    /// Throttle-dependent idle layer volume (divisor 255).
    pub idle_volume: u8,
    /// Throttle-dependent rev layer volume (divisor 180).
    pub rev_volume: u8,
    /// Master volume percent.
    pub master_volume: u8,
}

impl ControlSnapshot {
    /// Snapshot at power-on: engine off, throttle idle.
    pub const fn initial() -> Self {
        Self {
            phase: EnginePhase::Off,
            throttle_faded: 0,
            idle_volume: IDLE_VOLUME_AT_IDLE,
            rev_volume: 0,
            master_volume: DEFAULT_MASTER_VOLUME,
        }
    }
}

/// Bounded snapshot-read retries before keeping the previous snapshot.
const SNAPSHOT_RETRIES: u32 = 3;

/// Shared engine state across the control-loop/interrupt boundary.
///
/// Statically allocatable (`const fn new`), all access through atomics.
pub struct SharedEngineState {
    phase: AtomicU8,
    throttle_faded: AtomicU8,
    idle_volume: AtomicU8,
    rev_volume: AtomicU8,
    master_volume: AtomicU8,

    /// Odd while a commit is in flight.
    generation: AtomicU32,

    /// Set by the control loop, consumed (cleared) by the interrupt.
    horn_request: AtomicBool,
    /// Set by the interrupt while the horn voice plays.
    horn_active: AtomicBool,
    /// Set by the interrupt when the start one-shot exhausts.
    start_done: AtomicBool,
}

impl SharedEngineState {
    pub const fn new() -> Self {
        let initial = ControlSnapshot::initial();
        Self {
            phase: AtomicU8::new(initial.phase as u8),
            throttle_faded: AtomicU8::new(initial.throttle_faded),
            idle_volume: AtomicU8::new(initial.idle_volume),
            rev_volume: AtomicU8::new(initial.rev_volume),
            master_volume: AtomicU8::new(initial.master_volume),
            generation: AtomicU32::new(0),
            horn_request: AtomicBool::new(false),
            horn_active: AtomicBool::new(false),
            start_done: AtomicBool::new(false),
        }
    }

    /// Commit a full snapshot. Control loop only, single writer.
    ///
    /// The generation goes odd before the field stores and even after,
    /// so a concurrent reader can detect a mid-flight commit.
    pub fn commit(&self, snap: &ControlSnapshot) {
        let g = self.generation.load(Ordering::Relaxed);
        self.generation.store(g.wrapping_add(1), Ordering::Release);

        self.phase.store(snap.phase as u8, Ordering::Relaxed);
        self.throttle_faded
            .store(snap.throttle_faded, Ordering::Relaxed);
        self.idle_volume.store(snap.idle_volume, Ordering::Relaxed);
        self.rev_volume.store(snap.rev_volume, Ordering::Relaxed);
        self.master_volume
            .store(snap.master_volume, Ordering::Relaxed);

        self.generation.store(g.wrapping_add(2), Ordering::Release);
    }

    /// Read the most recently committed snapshot into `out`.
    ///
    /// Returns `false` (leaving `out` untouched) if a commit was in
    /// flight for all retries; the caller keeps mixing with its
    /// previous snapshot for this tick. Bounded, never spins open-ended.
    #[inline]
    pub fn try_snapshot(&self, out: &mut ControlSnapshot) -> bool {
        for _ in 0..SNAPSHOT_RETRIES {
            let g1 = self.generation.load(Ordering::Acquire);
            if g1 & 1 != 0 {
                continue;
            }

            let snap = ControlSnapshot {
                phase: EnginePhase::from_u8(self.phase.load(Ordering::Relaxed)),
                throttle_faded: self.throttle_faded.load(Ordering::Relaxed),
                idle_volume: self.idle_volume.load(Ordering::Relaxed),
                rev_volume: self.rev_volume.load(Ordering::Relaxed),
                master_volume: self.master_volume.load(Ordering::Relaxed),
            };

            let g2 = self.generation.load(Ordering::Acquire);
            if g1 == g2 {
                *out = snap;
                return true;
            }
        }
        false
    }

    /// Request horn playback. Control loop only; returns immediately.
    ///
    /// Completion is observed through [`horn_busy`](Self::horn_busy)
    /// going false, never by waiting.
    #[inline]
    pub fn request_horn(&self) {
        self.horn_request.store(true, Ordering::Release);
    }

    /// Withdraw a pending horn request (connection loss).
    #[inline]
    pub fn cancel_horn_request(&self) {
        self.horn_request.store(false, Ordering::Release);
    }

    /// Consume a pending horn request. Interrupt only.
    #[inline]
    pub fn take_horn_request(&self) -> bool {
        self.horn_request.swap(false, Ordering::AcqRel)
    }

    /// Mark the horn voice playing/stopped. Interrupt only.
    #[inline]
    pub fn set_horn_active(&self, active: bool) {
        self.horn_active.store(active, Ordering::Release);
    }

    /// True while a horn request is pending or the horn voice plays.
    /// Drives the control-loop debounce.
    #[inline]
    pub fn horn_busy(&self) -> bool {
        self.horn_request.load(Ordering::Acquire) || self.horn_active.load(Ordering::Acquire)
    }

    /// Mark the start one-shot exhausted. Interrupt only.
    #[inline]
    pub fn set_start_done(&self) {
        self.start_done.store(true, Ordering::Release);
    }

    /// Consume the start-completion flag. Control loop only.
    #[inline]
    pub fn take_start_done(&self) -> bool {
        self.start_done.swap(false, Ordering::AcqRel)
    }
}

impl Default for SharedEngineState {
    fn default() -> Self {
        Self::new()
    }
}
