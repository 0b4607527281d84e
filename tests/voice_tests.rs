//! Voice playback cursor tests

use rc_vehicle_sound::bank::SampleBuffer;
use rc_vehicle_sound::voice::Voice;

static DATA: [i8; 10] = [5, 10, 15, 20, 25, 30, 35, 40, 45, 50];
static ONE_SHOT: SampleBuffer = SampleBuffer::new(&DATA, 22_050);
static LOOPED: SampleBuffer = SampleBuffer::with_loop(&DATA, 22_050, 3, 7);

#[test]
fn test_one_shot_exact_length_then_silence() {
    let mut v = Voice::new(&ONE_SHOT, 100);
    v.activate(false);

    for i in 0..10 {
        assert_eq!(v.advance(), DATA[i] as i16, "sample {}", i);
    }
    assert!(!v.is_active(), "one-shot must deactivate at end");

    // Silence from here on, no matter how often we ask.
    for _ in 0..50 {
        assert_eq!(v.advance(), 0);
    }
}

#[test]
fn test_one_shot_reactivation_restarts() {
    let mut v = Voice::new(&ONE_SHOT, 100);
    v.activate(false);
    for _ in 0..10 {
        v.advance();
    }

    v.activate(false);
    assert!(v.is_active());
    assert_eq!(v.advance(), 5);
    assert_eq!(v.advance(), 10);
}

#[test]
fn test_whole_buffer_loop_wraps_to_start() {
    let mut v = Voice::new(&ONE_SHOT, 100);
    v.activate(true);

    // Two full passes: wrap lands exactly on sample 0, no skip.
    for pass in 0..2 {
        for i in 0..10 {
            assert_eq!(v.advance(), DATA[i] as i16, "pass {} sample {}", pass, i);
        }
    }
    assert!(v.is_active());
}

#[test]
fn test_loop_region_sequence_has_no_boundary_artifacts() {
    let mut v = Voice::new(&LOOPED, 100);
    v.activate(true);

    // Region [3, 7): 20, 25, 30, 35 repeating, starting at loop start.
    let expected = [20i16, 25, 30, 35];
    for n in 0..20 {
        assert_eq!(v.advance(), expected[n % 4], "tick {}", n);
    }
}

#[test]
fn test_one_shot_ignores_loop_region() {
    // A one-shot over a buffer with a region plays front to back once.
    let mut v = Voice::new(&LOOPED, 100);
    v.activate(false);

    for i in 0..10 {
        assert_eq!(v.advance(), DATA[i] as i16);
    }
    assert!(!v.is_active());
}

#[test]
fn test_deactivate_silences_immediately() {
    let mut v = Voice::new(&ONE_SHOT, 100);
    v.activate(true);
    v.advance();

    v.deactivate();
    assert!(!v.is_active());
    assert_eq!(v.advance(), 0);
}

#[test]
fn test_volume_percent_can_exceed_100() {
    let v = Voice::new(&ONE_SHOT, 210);
    assert_eq!(v.volume_percent(), 210);
}
