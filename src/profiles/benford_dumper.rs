//! Benford 3-tonne dumper sound profile.
//!
//! PCM placeholders are synthesized at compile time until the recorded
//! Benford sample set is converted; the buffer shapes (lengths, loop
//! region, layer character) match the recordings they stand in for.
//! Volume multipliers and switch points are the tuned values from the
//! original vehicle.

use crate::bank::{SampleBuffer, SoundBank};
use crate::config::SAMPLE_RATE_HZ;

use super::{ProfileVolumes, VehicleProfile};

/// Const-compatible sine via Taylor series (enough terms for i8 output).
const fn const_sin(x: f64) -> f64 {
    // Normalize to [-π, π]
    let mut x = x;
    while x > core::f64::consts::PI {
        x -= 2.0 * core::f64::consts::PI;
    }
    while x < -core::f64::consts::PI {
        x += 2.0 * core::f64::consts::PI;
    }

    let x2 = x * x;
    let x3 = x2 * x;
    let x5 = x3 * x2;
    let x7 = x5 * x2;
    let x9 = x7 * x2;

    x - x3 / 6.0 + x5 / 120.0 - x7 / 5040.0 + x9 / 362880.0
}

/// Looping engine texture: fundamental plus second harmonic.
///
/// `period` must divide `N` so the loop closes without a click.
const fn engine_loop<const N: usize>(period: f64, amp: f64) -> [i8; N] {
    let mut buf = [0i8; N];
    let mut i = 0;
    while i < N {
        let phase = (i as f64) * 2.0 * core::f64::consts::PI / period;
        let v = const_sin(phase) * 0.7 + const_sin(phase * 2.0) * 0.3;
        buf[i] = (v * amp) as i8;
        i += 1;
    }
    buf
}

/// Start one-shot: pitch sweeps up while the level ramps in.
const fn start_sweep<const N: usize>(amp: f64) -> [i8; N] {
    let mut buf = [0i8; N];
    let mut phase = 0.0f64;
    let mut i = 0;
    while i < N {
        let progress = (i as f64) / (N as f64);
        // Cranking at a long period, settling toward the idle period.
        let period = 256.0 - 160.0 * progress;
        phase += 2.0 * core::f64::consts::PI / period;
        let envelope = if progress < 0.25 { progress * 4.0 } else { 1.0 };
        buf[i] = (const_sin(phase) * amp * envelope) as i8;
        i += 1;
    }
    buf
}

/// Two-tone horn.
const fn horn_tone<const N: usize>(amp: f64) -> [i8; N] {
    let mut buf = [0i8; N];
    let mut i = 0;
    while i < N {
        let t = i as f64;
        let v = const_sin(t * 2.0 * core::f64::consts::PI / 50.0) * 0.6
            + const_sin(t * 2.0 * core::f64::consts::PI / 63.0) * 0.4;
        buf[i] = (v * amp) as i8;
        i += 1;
    }
    buf
}

/// Decaying knock burst.
const fn knock_burst<const N: usize>(amp: f64) -> [i8; N] {
    let mut buf = [0i8; N];
    let mut i = 0;
    while i < N {
        let decay = 1.0 - (i as f64) / (N as f64);
        let phase = (i as f64) * 2.0 * core::f64::consts::PI / 24.0;
        buf[i] = (const_sin(phase) * amp * decay * decay) as i8;
        i += 1;
    }
    buf
}

static START_PCM: [i8; 4096] = start_sweep(96.0);
static IDLE_PCM: [i8; 1024] = engine_loop(128.0, 90.0);
static REV_PCM: [i8; 1024] = engine_loop(64.0, 100.0);
static HORN_PCM: [i8; 1600] = horn_tone(110.0);
static KNOCK_PCM: [i8; 256] = knock_burst(120.0);
static BEEP_PCM: [i8; 512] = engine_loop(22.0, 80.0);

static START: SampleBuffer = SampleBuffer::new(&START_PCM, SAMPLE_RATE_HZ);
static IDLE: SampleBuffer = SampleBuffer::new(&IDLE_PCM, SAMPLE_RATE_HZ);
static REV: SampleBuffer = SampleBuffer::new(&REV_PCM, SAMPLE_RATE_HZ);
// The horn recording sustains over its middle section.
static HORN: SampleBuffer = SampleBuffer::with_loop(&HORN_PCM, SAMPLE_RATE_HZ, 200, 1400);
static KNOCK: SampleBuffer = SampleBuffer::new(&KNOCK_PCM, SAMPLE_RATE_HZ);
static BEEP: SampleBuffer = SampleBuffer::new(&BEEP_PCM, SAMPLE_RATE_HZ);

pub static PROFILE: VehicleProfile = VehicleProfile {
    name: "benford_dumper",
    bank: SoundBank::new(&START, &IDLE, &REV, &HORN, &KNOCK, &BEEP),
    volumes: ProfileVolumes {
        start: 210,
        idle: 100,
        rev: 120,
        horn: 160,
        knock: 400,
        reversing_beep: 50,
        engine_idle: 70,
        full_throttle: 180,
        engine_rev: 70,
        knock_idle: 20,
    },
};
