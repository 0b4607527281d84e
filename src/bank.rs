//! Module: bank
//!
//! Purpose: Immutable registry of PCM sample buffers for one vehicle.
//!
//! Buffers are built at compile time, live in flash for the process
//! lifetime and are never mutated, so both the control loop and the
//! sound interrupt read them without synchronization. Only [`Voice`]
//! cursors move (interrupt context only).
//!
//! [`Voice`]: crate::voice::Voice

/// One immutable PCM recording.
///
/// Samples are natively signed 8-bit amplitudes (no bias). An optional
/// loop region marks the sustain section used by looping voices; voices
/// without a region loop over the whole buffer.
#[derive(Clone, Copy, Debug)]
pub struct SampleBuffer {
    data: &'static [i8],
    sample_rate: u32,
    loop_region: Option<(usize, usize)>,
}

impl SampleBuffer {
    /// Create a buffer with no loop region.
    pub const fn new(data: &'static [i8], sample_rate: u32) -> Self {
        Self {
            data,
            sample_rate,
            loop_region: None,
        }
    }

    /// Create a buffer with a sustain loop region `[loop_start, loop_end)`.
    pub const fn with_loop(
        data: &'static [i8],
        sample_rate: u32,
        loop_start: usize,
        loop_end: usize,
    ) -> Self {
        assert!(loop_start < loop_end, "empty loop region");
        assert!(loop_end <= data.len(), "loop region past end of data");
        Self {
            data,
            sample_rate,
            loop_region: Some((loop_start, loop_end)),
        }
    }

    /// Raw sample data.
    #[inline]
    pub const fn data(&self) -> &'static [i8] {
        self.data
    }

    /// Number of samples.
    #[inline]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// True if the buffer holds no samples.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Native recording rate in Hz.
    ///
    /// Informational: the mixer ticks at one authoritative rate and does
    /// not resample layers recorded at a different rate.
    #[inline]
    pub const fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Sustain loop region, if the recording has one.
    #[inline]
    pub const fn loop_region(&self) -> Option<(usize, usize)> {
        self.loop_region
    }
}

/// Named logical slots a vehicle profile binds buffers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slot {
    /// Engine start, played once per connection.
    Start,
    /// Engine idle loop.
    Idle,
    /// Engine rev loop, crossfaded with idle by throttle.
    Rev,
    /// Horn, one-shot overlay.
    Horn,
    /// Diesel knock accent.
    Knock,
    /// Reversing warning beep.
    ReversingBeep,
}

/// Registry of the sample buffers for one vehicle.
///
/// Bound once at initialization by [`crate::profiles::load_profile`];
/// lookups never fail at runtime because every slot is statically
/// present.
#[derive(Clone, Copy, Debug)]
pub struct SoundBank {
    start: &'static SampleBuffer,
    idle: &'static SampleBuffer,
    rev: &'static SampleBuffer,
    horn: &'static SampleBuffer,
    knock: &'static SampleBuffer,
    reversing_beep: &'static SampleBuffer,
}

impl SoundBank {
    pub const fn new(
        start: &'static SampleBuffer,
        idle: &'static SampleBuffer,
        rev: &'static SampleBuffer,
        horn: &'static SampleBuffer,
        knock: &'static SampleBuffer,
        reversing_beep: &'static SampleBuffer,
    ) -> Self {
        Self {
            start,
            idle,
            rev,
            horn,
            knock,
            reversing_beep,
        }
    }

    /// Look up the buffer bound to a slot.
    #[inline]
    pub const fn get(&self, slot: Slot) -> &'static SampleBuffer {
        match slot {
            Slot::Start => self.start,
            Slot::Idle => self.idle,
            Slot::Rev => self.rev,
            Slot::Horn => self.horn,
            Slot::Knock => self.knock,
            Slot::ReversingBeep => self.reversing_beep,
        }
    }
}
