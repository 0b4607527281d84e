//! Module: config
//!
//! Purpose: Compile-time tunables for the vehicle sound core.
//!
//! Every constant that shapes the audio output lives here so the mixer,
//! the engine state machine and the link decoder never carry magic
//! numbers. Per-vehicle values (sample data, volume multipliers) live in
//! [`crate::profiles`] instead.

/// Authoritative mixer tick rate in Hz.
///
/// The idle/rev recordings drive the tick clock; layers recorded at a
/// different native rate are played at this rate uncorrected.
pub const SAMPLE_RATE_HZ: u32 = 22_050;

/// Reference clock feeding the sound timer (80 MHz APB / prescaler 20).
pub const TIMER_CLOCK_HZ: u32 = 4_000_000;

/// Link is considered lost after this long without an accepted frame.
pub const CONNECTION_TIMEOUT_MS: u32 = 3_000;

/// Throttle smoothing step interval.
pub const THROTTLE_FADE_INTERVAL_MS: u32 = 5;

/// Faded throttle rises by this much per fade interval.
pub const THROTTLE_FADE_UP_STEP: u8 = 2;

/// Faded throttle falls by this much per fade interval.
///
/// Smaller than the attack step: release is slower, like engine inertia.
pub const THROTTLE_FADE_DOWN_STEP: u8 = 1;

/// Faded throttle above this point mixes the rev layer in (0-100 scale).
pub const REV_SWITCH_POINT: u8 = 10;

/// Faded throttle at which the rev layer reaches full weight.
///
/// Must differ from [`REV_SWITCH_POINT`] or the idle/rev transition
/// chatters at the boundary.
pub const IDLE_END_POINT: u8 = 70;

/// Idle weight below the switch point.
pub const IDLE_WEIGHT_FULL: i32 = 100;

/// Idle weight at the start of the idle-to-rev ramp.
pub const IDLE_WEIGHT_PROPORTION: i32 = 75;

/// Idle weight floor above the idle end point. Never zero: a trace of
/// the idle layer stays in as a base tone.
pub const IDLE_WEIGHT_FLOOR: i32 = 10;

/// Rev weight at the start of the ramp. Never zero while the rev voice
/// is active, so the layer does not enter through a silent seam.
pub const REV_WEIGHT_FLOOR: i32 = 20;

/// Rev weight at and above the idle end point.
pub const REV_WEIGHT_FULL: i32 = 100;

/// Engine phase leaves IDLE for REVVING once the rev weight reaches
/// this share of the blend.
pub const REV_PHASE_THRESHOLD: i32 = 80;

/// Fixed horn weight, applied over a 255 divisor.
pub const HORN_MIX_WEIGHT: i32 = 180;

/// Idle layer throttle-dependent volume at zero throttle (divisor 255).
pub const IDLE_VOLUME_AT_IDLE: u8 = 120;

/// Idle layer throttle-dependent volume at full throttle.
pub const IDLE_VOLUME_AT_FULL: u8 = 60;

/// Rev layer throttle-dependent volume ceiling (divisor 180). The floor
/// at zero throttle comes from the vehicle profile.
pub const REV_VOLUME_AT_FULL: u8 = 180;

/// Default master volume percentage.
pub const DEFAULT_MASTER_VOLUME: u8 = 80;

/// DAC output midpoint, i.e. silence.
pub const DAC_SILENCE: u8 = 128;

/// Gamepad throttle axis: values at or below this are idle.
pub const THROTTLE_AXIS_DEADZONE: i32 = 50;

/// Gamepad throttle axis magnitude mapped to full throttle.
pub const THROTTLE_AXIS_MAX: i32 = 600;
