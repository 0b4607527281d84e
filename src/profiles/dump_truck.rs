//! Dump truck placeholder profile.
//!
//! Short hand-written PCM stubs standing in for a recorded sample set;
//! useful for bring-up on hardware without flashing the full Benford
//! data. Volumes are the generic defaults rather than tuned values.

use crate::bank::{SampleBuffer, SoundBank};
use crate::config::SAMPLE_RATE_HZ;

use super::{ProfileVolumes, VehicleProfile};

static START_PCM: [i8; 32] = [
    0, 2, 7, 12, 17, 22, 27, 32, 37, 42, 47, 52, 57, 62, 67, 72, 72, 67, 62, 57, 52, 47, 42, 37,
    32, 27, 22, 17, 12, 7, 2, 0,
];

static IDLE_PCM: [i8; 32] = [
    0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25,
    26, 27, 28, 29, 30, 31,
];

static REV_PCM: [i8; 32] = [
    0, 7, 14, 21, 28, 35, 42, 49, 56, 63, 70, 77, 84, 91, 98, 105, 105, 98, 91, 84, 77, 70, 63,
    56, 49, 42, 35, 28, 21, 14, 7, 0,
];

static HORN_PCM: [i8; 32] = [
    0, 30, 60, 90, 120, 90, 60, 30, 0, -30, -60, -90, -120, -90, -60, -30, 0, 30, 60, 90, 120, 90,
    60, 30, 0, -30, -60, -90, -120, -90, -60, -30,
];

static KNOCK_PCM: [i8; 16] = [0, 40, 80, 40, 0, -40, -80, -40, 0, 20, 40, 20, 0, -20, -40, -20];

static BEEP_PCM: [i8; 16] = [0, 60, 90, 60, 0, -60, -90, -60, 0, 60, 90, 60, 0, -60, -90, -60];

static START: SampleBuffer = SampleBuffer::new(&START_PCM, SAMPLE_RATE_HZ);
static IDLE: SampleBuffer = SampleBuffer::new(&IDLE_PCM, SAMPLE_RATE_HZ);
static REV: SampleBuffer = SampleBuffer::new(&REV_PCM, SAMPLE_RATE_HZ);
static HORN: SampleBuffer = SampleBuffer::new(&HORN_PCM, SAMPLE_RATE_HZ);
static KNOCK: SampleBuffer = SampleBuffer::new(&KNOCK_PCM, SAMPLE_RATE_HZ);
static BEEP: SampleBuffer = SampleBuffer::new(&BEEP_PCM, SAMPLE_RATE_HZ);

pub static PROFILE: VehicleProfile = VehicleProfile {
    name: "dump_truck",
    bank: SoundBank::new(&START, &IDLE, &REV, &HORN, &KNOCK, &BEEP),
    volumes: ProfileVolumes {
        start: 140,
        idle: 80,
        rev: 100,
        horn: 140,
        knock: 100,
        reversing_beep: 50,
        engine_idle: 70,
        full_throttle: 150,
        engine_rev: 70,
        knock_idle: 20,
    },
};
