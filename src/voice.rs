//! Module: voice
//!
//! Purpose: One playback cursor over one [`SampleBuffer`].
//!
//! A voice is the only thing that moves during playback; the buffer
//! itself is immutable. `advance()` runs inside the sound timer
//! interrupt with a hard deadline of one sample period (~45 µs at
//! 22 050 Hz), so it is bounded O(1): no allocation, no blocking, no
//! logging.
//!
//! Cursors are owned by the interrupt context. The control loop never
//! touches them; it drives activation indirectly through the committed
//! engine state (see [`crate::shared`]).

use crate::bank::SampleBuffer;

/// One independent sample-playback cursor.
pub struct Voice {
    buffer: &'static SampleBuffer,
    cursor: usize,
    active: bool,
    looping: bool,
    volume_percent: u16,
}

impl Voice {
    /// Create an inactive voice over a buffer.
    ///
    /// `volume_percent` is the profile's multiplier for this layer. It
    /// may exceed 100 to boost a quiet recording.
    pub const fn new(buffer: &'static SampleBuffer, volume_percent: u16) -> Self {
        Self {
            buffer,
            cursor: 0,
            active: false,
            looping: false,
            volume_percent,
        }
    }

    /// (Re)start playback from the beginning.
    ///
    /// A looping voice with a loop region starts at the region start;
    /// everything else starts at sample zero.
    pub fn activate(&mut self, looping: bool) {
        self.looping = looping;
        self.cursor = match (looping, self.buffer.loop_region()) {
            (true, Some((start, _))) => start,
            _ => 0,
        };
        self.active = !self.buffer.is_empty();
    }

    /// Stop playback and rewind.
    pub fn deactivate(&mut self) {
        self.active = false;
        self.cursor = 0;
    }

    /// Current amplitude; advances the cursor by one sample.
    ///
    /// Returns 0 while inactive. A one-shot voice deactivates itself
    /// when the cursor reaches the end of the buffer and returns 0 from
    /// then on until reactivated. A looping voice wraps exactly to the
    /// loop start (or sample zero without a region): no skip, no
    /// double-read at the boundary.
    #[inline]
    pub fn advance(&mut self) -> i16 {
        if !self.active {
            return 0;
        }

        let data = self.buffer.data();
        let sample = data[self.cursor] as i16;
        self.cursor += 1;

        let end = match (self.looping, self.buffer.loop_region()) {
            (true, Some((_, loop_end))) => loop_end,
            _ => data.len(),
        };

        if self.cursor >= end {
            if self.looping {
                self.cursor = match self.buffer.loop_region() {
                    Some((loop_start, _)) => loop_start,
                    None => 0,
                };
            } else {
                self.active = false;
                self.cursor = 0;
            }
        }

        sample
    }

    /// Whether the voice is currently playing.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Profile volume multiplier for this layer (percent).
    #[inline]
    pub fn volume_percent(&self) -> u16 {
        self.volume_percent
    }

    /// Buffer this voice plays.
    #[inline]
    pub fn buffer(&self) -> &'static SampleBuffer {
        self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static RAMP: [i8; 6] = [10, 20, 30, 40, 50, 60];
    static RAMP_BUF: SampleBuffer = SampleBuffer::new(&RAMP, 22_050);
    static LOOPED_BUF: SampleBuffer = SampleBuffer::with_loop(&RAMP, 22_050, 2, 5);

    #[test]
    fn test_inactive_voice_is_silent() {
        let mut v = Voice::new(&RAMP_BUF, 100);
        assert_eq!(v.advance(), 0);
        assert!(!v.is_active());
    }

    #[test]
    fn test_one_shot_plays_once_then_silence() {
        let mut v = Voice::new(&RAMP_BUF, 100);
        v.activate(false);

        let played: [i16; 6] = core::array::from_fn(|_| v.advance());
        assert_eq!(played, [10, 20, 30, 40, 50, 60]);
        assert!(!v.is_active());

        // Exhausted: silence until reactivated.
        assert_eq!(v.advance(), 0);
        assert_eq!(v.advance(), 0);

        v.activate(false);
        assert_eq!(v.advance(), 10);
    }

    #[test]
    fn test_loop_without_region_wraps_to_zero() {
        let mut v = Voice::new(&RAMP_BUF, 100);
        v.activate(true);

        for _ in 0..6 {
            v.advance();
        }
        assert_eq!(v.advance(), 10);
        assert!(v.is_active());
    }

    #[test]
    fn test_loop_region_boundary_is_exact() {
        let mut v = Voice::new(&LOOPED_BUF, 100);
        v.activate(true);

        // Starts at loop start, runs to loop end, wraps to loop start.
        // Region is [2, 5): samples 30, 40, 50 repeating.
        let seq: [i16; 8] = core::array::from_fn(|_| v.advance());
        assert_eq!(seq, [30, 40, 50, 30, 40, 50, 30, 40]);
    }
}
