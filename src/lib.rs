//! # RcFleetLink vehicle firmware
//!
//! One base station relays gamepad input over a point-to-multipoint
//! datagram channel to several addressable vehicle receivers. This
//! crate is the receiver side: it decodes the link, drives the engine
//! sound state machine and mixes PCM layers in a hardware timer
//! interrupt.
//!
//! ## Architecture
//!
//! Two execution contexts, one shared boundary:
//! - The cooperative control loop decodes frames, runs the
//!   [`EngineSoundController`] and commits engine state snapshots.
//! - The timer interrupt runs [`Mixer::tick`] once per sample and
//!   writes the result to the DAC. Bounded O(1), no allocation, no
//!   blocking, no logging.
//! - [`SharedEngineState`] is the only mutable state crossing the
//!   boundary; everything else is owned by exactly one side.
//!
//! [`EngineSoundController`]: engine::EngineSoundController
//! [`Mixer::tick`]: mixer::Mixer::tick
//! [`SharedEngineState`]: shared::SharedEngineState

#![cfg_attr(not(test), no_std)]

pub mod bank;
pub mod config;
pub mod engine;
pub mod hal;
pub mod link;
pub mod logging;
pub mod mixer;
pub mod profiles;
pub mod shared;
pub mod voice;

pub use bank::{SampleBuffer, Slot, SoundBank};
pub use engine::{EngineSoundController, MixWeights};
pub use link::{InputFrame, LinkEvent, LinkMonitor};
pub use mixer::Mixer;
pub use profiles::{load_profile, ProfileError, VehicleProfile};
pub use shared::{ControlSnapshot, EnginePhase, SharedEngineState};
pub use voice::Voice;
