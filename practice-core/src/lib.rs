// practice-core/src/lib.rs

//! The core logic for the guitar practice tracker.
//! This crate is responsible for the music theory model (pitch classes,
//! fretboard lookup, scale generation), the static scale/technique catalog,
//! and the learner progression engine (XP, streaks, achievements, daily
//! challenges). It is completely headless and contains no GUI code.

pub mod achievements;
pub mod catalog;
pub mod challenge;
pub mod clock;
pub mod engine;
pub mod error;
pub mod progress;
pub mod store;
pub mod theory;

pub use engine::{PracticeEngine, Updated};
pub use error::{PracticeError, Result};
pub use progress::Progress;
