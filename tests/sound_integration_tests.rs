//! End-to-end tests: link events through the state machine into the
//! interrupt-side mixer, both contexts simulated in one thread.
//!
//! The control loop runs at a 5 ms cadence; between control steps the
//! mixer ticks as the timer interrupt would. Communication happens only
//! through the shared engine state, as on hardware.

use rc_vehicle_sound::bank::{SampleBuffer, SoundBank};
use rc_vehicle_sound::engine::EngineSoundController;
use rc_vehicle_sound::link::{InputFrame, LinkEvent, LinkMonitor};
use rc_vehicle_sound::mixer::Mixer;
use rc_vehicle_sound::profiles::{ProfileVolumes, VehicleProfile};
use rc_vehicle_sound::shared::{EnginePhase, SharedEngineState};

static START_DATA: [i8; 8] = [10, 20, 30, 40, 50, 60, 70, 80];
static IDLE_DATA: [i8; 4] = [40, -40, 20, -20];
static REV_DATA: [i8; 4] = [90, -90, 90, -90];
static HORN_DATA: [i8; 4] = [120, -120, 120, -120];
static STUB_DATA: [i8; 2] = [0, 0];

static START_BUF: SampleBuffer = SampleBuffer::new(&START_DATA, 22_050);
static IDLE_BUF: SampleBuffer = SampleBuffer::new(&IDLE_DATA, 22_050);
static REV_BUF: SampleBuffer = SampleBuffer::new(&REV_DATA, 22_050);
static HORN_BUF: SampleBuffer = SampleBuffer::new(&HORN_DATA, 22_050);
static STUB_BUF: SampleBuffer = SampleBuffer::new(&STUB_DATA, 22_050);

static PROFILE: VehicleProfile = VehicleProfile {
    name: "bench",
    bank: SoundBank::new(
        &START_BUF, &IDLE_BUF, &REV_BUF, &HORN_BUF, &STUB_BUF, &STUB_BUF,
    ),
    volumes: ProfileVolumes {
        start: 100,
        idle: 100,
        rev: 100,
        horn: 100,
        knock: 100,
        reversing_beep: 50,
        engine_idle: 70,
        full_throttle: 150,
        engine_rev: 70,
        knock_idle: 20,
    },
};

const RECEIVER: u32 = 4;

fn frame(axis_y: i32, horn: bool) -> InputFrame {
    InputFrame {
        receiver_index: RECEIVER,
        buttons: 0,
        dpad: 0,
        axis_x: 0,
        axis_y,
        axis_rx: 0,
        axis_ry: 0,
        brake: 0,
        throttle: 0,
        misc_buttons: 0,
        thumb_r: 0,
        thumb_l: horn as u8,
        r1: 0,
        l1: 0,
        r2: 0,
        l2: 0,
    }
}

struct Bench<'a> {
    monitor: LinkMonitor,
    engine: EngineSoundController<'a>,
    mixer: Mixer<'a>,
    now_ms: u32,
}

impl<'a> Bench<'a> {
    fn new(shared: &'a SharedEngineState) -> Self {
        Self {
            monitor: LinkMonitor::new(RECEIVER),
            engine: EngineSoundController::new(shared, &PROFILE, 100),
            mixer: Mixer::new(shared, &PROFILE),
            now_ms: 0,
        }
    }

    /// One 5 ms control step followed by `ticks` interrupt ticks.
    fn step(&mut self, input: Option<InputFrame>, ticks: usize) -> Vec<u8> {
        self.now_ms += 5;

        if let Some(f) = input {
            if let Some(LinkEvent::Connected) = self.monitor.accept(self.now_ms, &f) {
                self.engine.on_connected(self.now_ms);
            }
            if self.monitor.is_connected() {
                let throttle = rc_vehicle_sound::link::throttle_from_axis(f.axis_y);
                self.engine.on_input(throttle, f.horn_button());
            }
        }
        if let Some(LinkEvent::Lost) = self.monitor.poll(self.now_ms) {
            self.engine.on_connection_lost();
        }
        self.engine.poll(self.now_ms);

        (0..ticks).map(|_| self.mixer.tick()).collect()
    }
}

#[test]
fn test_boot_is_silent_until_connection() {
    let shared = SharedEngineState::new();
    let mut bench = Bench::new(&shared);

    let out = bench.step(None, 50);
    assert!(out.iter().all(|&s| s == 128), "no connection, no sound");
}

#[test]
fn test_connection_plays_start_then_idles() {
    let shared = SharedEngineState::new();
    let mut bench = Bench::new(&shared);

    // First frame: connection established, start one-shot scheduled.
    let out = bench.step(Some(frame(0, false)), START_DATA.len());
    let expected_start: Vec<u8> = START_DATA
        .iter()
        .map(|&s| (s as i32 + 128).clamp(0, 255) as u8)
        .collect();
    assert_eq!(out, expected_start, "start recording plays verbatim");
    assert_eq!(bench.engine.phase(), EnginePhase::Starting);

    // Next control step observes completion and idles.
    let out = bench.step(Some(frame(0, false)), 4);
    assert_eq!(bench.engine.phase(), EnginePhase::Idle);
    let expected_idle: Vec<u8> = IDLE_DATA
        .iter()
        .map(|&s| ((s as i32 * 120 / 255) + 128).clamp(0, 255) as u8)
        .collect();
    assert_eq!(out, expected_idle, "idle loop follows the start");
}

#[test]
fn test_throttle_input_cannot_cut_start_short() {
    let shared = SharedEngineState::new();
    let mut bench = Bench::new(&shared);

    // Connect, then slam the throttle while the start is mid-play.
    bench.step(Some(frame(0, false)), 3);
    let out = bench.step(Some(frame(600, false)), 2);

    assert_eq!(bench.engine.phase(), EnginePhase::Starting);
    assert_eq!(
        out,
        vec![
            (START_DATA[3] as i32 + 128) as u8,
            (START_DATA[4] as i32 + 128) as u8
        ],
        "start keeps playing from where it was"
    );
}

#[test]
fn test_full_throttle_reaches_revving_with_faded_ramp() {
    let shared = SharedEngineState::new();
    let mut bench = Bench::new(&shared);

    bench.step(Some(frame(0, false)), START_DATA.len());
    bench.step(Some(frame(0, false)), 1);
    assert_eq!(bench.engine.phase(), EnginePhase::Idle);

    // Full stick. Faded throttle climbs +2 per step; phase flips to
    // REVVING only after the blend crosses the threshold.
    let mut steps_to_rev = 0;
    for _ in 0..100 {
        bench.step(Some(frame(600, false)), 1);
        steps_to_rev += 1;
        if bench.engine.phase() == EnginePhase::Revving {
            break;
        }
    }
    assert_eq!(bench.engine.phase(), EnginePhase::Revving);
    assert!(
        steps_to_rev > 20,
        "throttle fade must delay the transition, took {} steps",
        steps_to_rev
    );

    // Output now differs from the pure idle pattern.
    let out = bench.step(Some(frame(600, false)), 4);
    let pure_idle: Vec<u8> = IDLE_DATA
        .iter()
        .map(|&s| ((s as i32 * 120 / 255) + 128).clamp(0, 255) as u8)
        .collect();
    assert_ne!(out, pure_idle);
}

#[test]
fn test_horn_overlays_and_completes_async() {
    let shared = SharedEngineState::new();
    let mut bench = Bench::new(&shared);

    bench.step(Some(frame(0, false)), START_DATA.len());
    bench.step(Some(frame(0, false)), 1);

    // Horn press: the control loop never blocks; the overlay appears in
    // the very next ticks and the busy flag clears on exhaustion.
    bench.step(Some(frame(0, true)), 0);
    assert!(shared.horn_busy());

    let with_horn = bench.step(Some(frame(0, true)), HORN_DATA.len());
    assert!(!shared.horn_busy(), "completion signalled by the mixer");

    // Overlay altered the idle-only output.
    let idle_only: Vec<u8> = (0..HORN_DATA.len())
        .map(|_| 0u8) // placeholder, compared by inequality below
        .collect();
    assert_ne!(with_horn, idle_only);
    assert!(with_horn.iter().any(|&s| s != 128));
}

#[test]
fn test_link_timeout_silences_everything_once() {
    let shared = SharedEngineState::new();
    let mut bench = Bench::new(&shared);

    bench.step(Some(frame(0, false)), START_DATA.len());
    bench.step(Some(frame(600, false)), 8);
    assert_ne!(bench.engine.phase(), EnginePhase::Off);

    // Silence on the channel: step the clock past the timeout.
    let mut out = Vec::new();
    for _ in 0..700 {
        out = bench.step(None, 2);
    }
    assert_eq!(bench.engine.phase(), EnginePhase::Off);
    assert!(out.iter().all(|&s| s == 128), "OFF means DAC silence");

    // A returning controller starts the engine again.
    bench.step(Some(frame(0, false)), 1);
    assert_eq!(bench.engine.phase(), EnginePhase::Starting);
}

#[test]
fn test_frames_for_other_vehicles_do_not_wake_engine() {
    let shared = SharedEngineState::new();
    let mut bench = Bench::new(&shared);

    let mut foreign = frame(600, true);
    foreign.receiver_index = RECEIVER + 1;

    let out = bench.step(Some(foreign), 20);
    assert_eq!(bench.engine.phase(), EnginePhase::Off);
    assert!(out.iter().all(|&s| s == 128));
}
