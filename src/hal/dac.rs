//! DAC output HAL.
//!
//! The mixer produces one 0-255 amplitude per tick (128 = silence);
//! this adapter writes it to the on-chip 8-bit DAC(s). Write-only.

// TODO: drive the DAC channels via esp-idf-sys dac_output_voltage

/// DAC channel configuration.
///
/// Classic ESP32: DAC1 on GPIO25, DAC2 on GPIO26. The second channel
/// mirrors the first when populated (both speaker terminals driven).
#[derive(Clone, Copy, Debug)]
pub struct DacConfig {
    pub primary_pin: i32,
    pub secondary_pin: Option<i32>,
}

impl Default for DacConfig {
    fn default() -> Self {
        Self {
            primary_pin: 25,
            secondary_pin: Some(26),
        }
    }
}
