//! # Music Theory Module
//!
//! This module models the 12-tone equal-tempered pitch-class space used by
//! the fretboard and scale screens. Notes are integers modulo 12 rather than
//! strings, which keeps enharmonic spelling out of the comparison logic and
//! makes every membership test O(1).
//!
//! ## Features
//! - Pitch classes with canonical sharp spellings (no flats)
//! - Standard six-string tuning constant
//! - Fretboard note lookup via modular arithmetic
//! - Scale note-set generation and membership tests

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::Scale;
use crate::error::{PracticeError, Result};

/// One of the 12 equal-tempered pitch classes, octave-independent.
///
/// The discriminant is the semitone offset from C, so `PitchClass` values
/// can be moved through the cyclic group with plain integer arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PitchClass {
    C = 0,
    CSharp = 1,
    D = 2,
    DSharp = 3,
    E = 4,
    F = 5,
    FSharp = 6,
    G = 7,
    GSharp = 8,
    A = 9,
    ASharp = 10,
    B = 11,
}

/// All 12 pitch classes in ascending semitone order.
pub const PITCH_CLASSES: [PitchClass; 12] = [
    PitchClass::C,
    PitchClass::CSharp,
    PitchClass::D,
    PitchClass::DSharp,
    PitchClass::E,
    PitchClass::F,
    PitchClass::FSharp,
    PitchClass::G,
    PitchClass::GSharp,
    PitchClass::A,
    PitchClass::ASharp,
    PitchClass::B,
];

/// Standard tuning, lowest-pitched string first (E A D G B E).
pub const STANDARD_TUNING: [PitchClass; 6] = [
    PitchClass::E,
    PitchClass::A,
    PitchClass::D,
    PitchClass::G,
    PitchClass::B,
    PitchClass::E,
];

/// Number of frets the app displays. A display convention only; the note
/// math itself has no upper bound.
pub const NUM_FRETS: u8 = 22;

impl PitchClass {
    /// Semitone offset from C (0-11).
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Pitch class for a semitone index, wrapping modulo 12.
    pub fn from_index(index: u8) -> Self {
        PITCH_CLASSES[(index % 12) as usize]
    }

    /// Canonical sharp spelling ("C", "C#", ... "B").
    pub fn name(self) -> &'static str {
        const NAMES: [&str; 12] = [
            "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
        ];
        NAMES[self.index() as usize]
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PitchClass {
    type Err = PracticeError;

    /// Parses the canonical sharp spellings only; flats are rejected so a
    /// stored note never has two spellings.
    fn from_str(s: &str) -> Result<Self> {
        PITCH_CLASSES
            .iter()
            .copied()
            .find(|pc| pc.name() == s)
            .ok_or_else(|| PracticeError::InvalidInput(format!("unknown note name: {s:?}")))
    }
}

/// A position on the fretboard. The sounding note is always derived from
/// the tuning, never stored alongside the position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FretPosition {
    /// String index, 0 = lowest-pitched string.
    pub string: u8,
    /// Fret number, 0 = open string.
    pub fret: u8,
}

impl FretPosition {
    /// The pitch class sounding at this position for the given tuning.
    pub fn note_in(self, tuning: &[PitchClass; 6]) -> Result<PitchClass> {
        if self.string > 5 {
            return Err(PracticeError::InvalidInput(format!(
                "string index {} out of range 0-5",
                self.string
            )));
        }
        note_at_fret(tuning[self.string as usize], i32::from(self.fret))
    }
}

/// The pitch class sounding at `fret` on a string tuned to `string_pitch`.
///
/// Fret 0 is the open string. Negative frets are rejected; there is no
/// upper bound here because the fretboard length is a display concern.
pub fn note_at_fret(string_pitch: PitchClass, fret: i32) -> Result<PitchClass> {
    if fret < 0 {
        return Err(PracticeError::InvalidInput(format!(
            "fret must be non-negative, got {fret}"
        )));
    }
    Ok(PitchClass::from_index(
        ((i32::from(string_pitch.index()) + fret) % 12) as u8,
    ))
}

/// The ordered notes of `scale` built on `root`.
///
/// Output length equals the interval count and index 0 is always the root
/// itself, since every catalog scale starts its interval list at 0.
pub fn scale_notes(root: PitchClass, scale: &Scale) -> Vec<PitchClass> {
    scale
        .intervals
        .iter()
        .map(|&interval| PitchClass::from_index(root.index() + interval))
        .collect()
}

/// Whether `note` occurs in a scale's note set.
pub fn is_in_scale(note: PitchClass, notes: &[PitchClass]) -> bool {
    notes.contains(&note)
}
