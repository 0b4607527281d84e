//! Sound timer HAL: fixed-rate tick source for the mixer.
//!
//! The interrupt must call `Mixer::tick()` and write the DAC within
//! one tick period; any overrun is audible glitching and cannot be
//! detected in-band, so the handler does nothing else.

// TODO: attach to a hardware timer via esp-idf-hal::timer

use crate::config::{SAMPLE_RATE_HZ, TIMER_CLOCK_HZ};

/// Sound timer configuration.
///
/// One authoritative tick rate drives all layers. The idle/rev
/// recordings' rate wins; a layer authored at a different native rate
/// plays at the tick rate uncorrected (known pitch/speed distortion,
/// kept pending a product decision).
#[derive(Clone, Copy, Debug)]
pub struct TimerConfig {
    /// Reference clock after prescaling, Hz.
    pub clock_hz: u32,
    /// Driving sample rate, Hz.
    pub sample_rate: u32,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            clock_hz: TIMER_CLOCK_HZ,
            sample_rate: SAMPLE_RATE_HZ,
        }
    }
}

impl TimerConfig {
    /// Timer alarm value: reference clock ticks per sample.
    #[inline]
    pub const fn alarm_ticks(&self) -> u32 {
        self.clock_hz / self.sample_rate
    }

    /// Tick period in microseconds (the interrupt's whole budget).
    #[inline]
    pub const fn tick_period_us(&self) -> u32 {
        1_000_000 / self.sample_rate
    }
}
