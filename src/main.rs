//! RcFleetLink vehicle - Main entry point
//!
//! This is a placeholder. The actual implementation will:
//! 1. Initialize hardware (DAC, sound timer, ESP-NOW receive)
//! 2. Attach the mixer to the timer interrupt
//! 3. Run the control loop (frame decode, engine state machine)
//! 4. Drain the log ring in the background

#![no_std]
#![no_main]

use esp_idf_svc::sys as esp_idf_sys;

use rc_vehicle_sound::{
    engine::EngineSoundController,
    link::{LinkEvent, LinkMonitor},
    logging::LogStream,
    mixer::Mixer,
    profiles::load_profile,
    rt_error, rt_info,
    shared::SharedEngineState,
};

/// This vehicle's address on the fleet channel.
const RECEIVER_INDEX: u32 = 4;

/// Profile baked into this build.
const PROFILE_NAME: &str = "benford_dumper";

// Static allocations: the one shared boundary object and the log ring.
static SHARED: SharedEngineState = SharedEngineState::new();
static LOG_STREAM: LogStream = LogStream::new();

#[no_mangle]
fn main() {
    // Initialize ESP-IDF
    esp_idf_sys::link_patches();

    let now = timestamp_ms();
    rt_info!(LOG_STREAM, now, "{}", env!("VERSION_STRING"));

    // Unknown profile is a fatal startup condition: halt rather than
    // boot into undefined buffers.
    let profile = match load_profile(PROFILE_NAME) {
        Ok(p) => p,
        Err(e) => {
            rt_error!(LOG_STREAM, now, "profile '{}': {}", PROFILE_NAME, e);
            halt();
        }
    };
    rt_info!(LOG_STREAM, now, "profile '{}' loaded", profile.name);

    // TODO: Initialize hardware
    // - DAC channels (hal::DacConfig::default())
    // - Sound timer at hal::TimerConfig::default().alarm_ticks(),
    //   interrupt calling Mixer::tick and dac_output_voltage
    // - ESP-NOW receive callback feeding the control loop

    // TODO: control_task() on the main core, log drain in background

    loop {
        unsafe {
            esp_idf_sys::vTaskDelay(1000);
        }
    }
}

/// Control loop: frame decode, liveness, engine state machine.
///
/// Non-real-time context. Never waits on the interrupt; horn and start
/// completion arrive through flags on SHARED.
#[allow(dead_code)]
fn control_task() -> ! {
    let profile = load_profile(PROFILE_NAME).unwrap_or_else(|_| halt());
    let mut monitor = LinkMonitor::new(RECEIVER_INDEX);
    let mut engine = EngineSoundController::new(
        &SHARED,
        profile,
        rc_vehicle_sound::config::DEFAULT_MASTER_VOLUME,
    );

    loop {
        let now = timestamp_ms();

        // 1. Drain received frames (filled in by the ESP-NOW callback)
        while let Some(frame) = next_frame() {
            if let Some(LinkEvent::Connected) = monitor.accept(now, &frame) {
                rt_info!(LOG_STREAM, now, "controller connected");
                engine.on_connected(now);
            }
            if monitor.is_connected() {
                let throttle = rc_vehicle_sound::link::throttle_from_axis(frame.axis_y);
                engine.on_input(throttle, frame.horn_button());
            }
        }

        // 2. Liveness: timeout forces everything off, exactly once
        if let Some(LinkEvent::Lost) = monitor.poll(now) {
            rt_info!(LOG_STREAM, now, "controller disconnected");
            engine.on_connection_lost();
        }

        // 3. Fade steps, phase transitions, snapshot commit
        engine.poll(now);

        unsafe {
            esp_idf_sys::vTaskDelay(1);
        }
    }
}

/// Sound timer interrupt body.
///
/// The whole budget is one tick period (~45 µs). Nothing else happens
/// here: no logging, no allocation, no waiting.
#[allow(dead_code)]
fn sound_isr(mixer: &mut Mixer<'_>) {
    let dac_value = mixer.tick();
    write_dac(dac_value);
}

// --- Placeholder functions (to be implemented with real HAL) ---

#[allow(dead_code)]
fn timestamp_ms() -> u32 {
    unsafe { (esp_idf_sys::esp_timer_get_time() / 1000) as u32 }
}

#[allow(dead_code)]
fn next_frame() -> Option<rc_vehicle_sound::link::InputFrame> {
    // TODO: pop from the ESP-NOW receive queue
    None
}

#[allow(dead_code)]
fn write_dac(_value: u8) {
    // TODO: dac_output_voltage on both channels
}

fn halt() -> ! {
    loop {
        unsafe {
            esp_idf_sys::vTaskDelay(1000);
        }
    }
}
