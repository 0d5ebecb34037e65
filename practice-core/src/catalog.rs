//! # Catalog Module
//!
//! Static, versioned content: the scale library and the technique library.
//! The engine reads this data but never mutates or persists it; changing
//! the catalog is a content/deployment concern, not a code change elsewhere.
//!
//! ## Features
//! - 12 scales (major/minor families, pentatonics, the seven-mode subset)
//! - 8 playing techniques with step-by-step instructions and tips
//! - O(log n) id lookups backed by statically built index maps

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::{PracticeError, Result};

/// Broad grouping used by the scale browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleCategory {
    Major,
    Minor,
    Pentatonic,
    Modes,
    Other,
}

/// An immutable scale catalog entry.
///
/// `intervals` are the semitone offsets from the root, unique, sorted
/// ascending, always starting at 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scale {
    pub id: String,
    pub name: String,
    pub intervals: Vec<u8>,
    pub description: String,
    pub category: ScaleCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TechniqueCategory {
    Articulation,
    Picking,
    Tapping,
    Other,
}

/// An immutable technique catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Technique {
    pub id: String,
    pub name: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub category: TechniqueCategory,
    pub instructions: Vec<String>,
    pub tips: Vec<String>,
}

fn scale(
    id: &str,
    name: &str,
    intervals: &[u8],
    description: &str,
    category: ScaleCategory,
) -> Scale {
    Scale {
        id: id.to_string(),
        name: name.to_string(),
        intervals: intervals.to_vec(),
        description: description.to_string(),
        category,
    }
}

/// Statically built scale library.
///
/// Computed once at startup; the rest of the crate hands out `&'static`
/// references into this table.
static SCALES: Lazy<Vec<Scale>> = Lazy::new(|| {
    use ScaleCategory::*;
    vec![
        scale(
            "major",
            "Major",
            &[0, 2, 4, 5, 7, 9, 11],
            "The major scale - bright, happy sound",
            Major,
        ),
        scale(
            "minor",
            "Natural Minor",
            &[0, 2, 3, 5, 7, 8, 10],
            "The natural minor scale - melancholic sound",
            Minor,
        ),
        scale(
            "minor-harmonic",
            "Harmonic Minor",
            &[0, 2, 3, 5, 7, 8, 11],
            "The harmonic minor scale - exotic sound",
            Minor,
        ),
        scale(
            "minor-melodic",
            "Melodic Minor",
            &[0, 2, 3, 5, 7, 9, 11],
            "The melodic minor scale - versatile for jazz",
            Minor,
        ),
        scale(
            "pentatonic-major",
            "Major Pentatonic",
            &[0, 2, 4, 7, 9],
            "The major pentatonic - ideal for rock and blues",
            Pentatonic,
        ),
        scale(
            "pentatonic-minor",
            "Minor Pentatonic",
            &[0, 3, 5, 7, 10],
            "The minor pentatonic - the most used scale in rock",
            Pentatonic,
        ),
        scale(
            "blues",
            "Blues",
            &[0, 3, 5, 6, 7, 10],
            "The blues scale - with its characteristic blue note",
            Pentatonic,
        ),
        scale(
            "dorian",
            "Dorian",
            &[0, 2, 3, 5, 7, 9, 10],
            "The dorian mode - jazzy, funky sound",
            Modes,
        ),
        scale(
            "phrygian",
            "Phrygian",
            &[0, 1, 3, 5, 7, 8, 10],
            "The phrygian mode - Spanish, flamenco sound",
            Modes,
        ),
        scale(
            "lydian",
            "Lydian",
            &[0, 2, 4, 6, 7, 9, 11],
            "The lydian mode - dreamy, ethereal sound",
            Modes,
        ),
        scale(
            "mixolydian",
            "Mixolydian",
            &[0, 2, 4, 5, 7, 9, 10],
            "The mixolydian mode - perfect for rock and blues",
            Modes,
        ),
        scale(
            "locrian",
            "Locrian",
            &[0, 1, 3, 5, 6, 8, 10],
            "The locrian mode - tense, dissonant sound",
            Modes,
        ),
    ]
});

/// Static map for quick scale id to table index lookups.
static SCALE_MAP: Lazy<BTreeMap<String, usize>> = Lazy::new(|| {
    SCALES
        .iter()
        .enumerate()
        .map(|(i, s)| (s.id.clone(), i))
        .collect()
});

fn technique(
    id: &str,
    name: &str,
    description: &str,
    difficulty: Difficulty,
    category: TechniqueCategory,
    instructions: &[&str],
    tips: &[&str],
) -> Technique {
    Technique {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        difficulty,
        category,
        instructions: instructions.iter().map(|s| s.to_string()).collect(),
        tips: tips.iter().map(|s| s.to_string()).collect(),
    }
}

/// Statically built technique library.
static TECHNIQUES: Lazy<Vec<Technique>> = Lazy::new(|| {
    use Difficulty::*;
    use TechniqueCategory::*;
    vec![
        technique(
            "bending",
            "Bending",
            "Raising the pitch of a note by pushing the string up or down",
            Intermediate,
            Articulation,
            &[
                "Place your finger on the target fret",
                "Push the string up (high strings) or down (low strings)",
                "Keep steady pressure to sustain the bend",
                "Practice half-step, whole-step and step-and-a-half bends",
            ],
            &[
                "Use several fingers for extra strength",
                "Hear the target pitch before you bend",
                "Check your intonation against a tuner",
            ],
        ),
        technique(
            "slide",
            "Slide",
            "Sliding a fretting finger between frets while keeping pressure",
            Beginner,
            Articulation,
            &[
                "Play the starting note with firm pressure",
                "Slide the finger to the target fret without lifting",
                "Keep the pressure constant through the slide",
                "Slides work both ascending and descending",
            ],
            &[
                "Do not press too hard",
                "Keep the rhythm steady",
                "Practice slides over different distances",
            ],
        ),
        technique(
            "hammer-on",
            "Hammer-on",
            "Sounding a higher note with finger strength alone, no pick",
            Beginner,
            Articulation,
            &[
                "Pick the first note",
                "Hammer a higher fret firmly with another finger",
                "Do not pick the second note",
                "The hammer must be quick and precise",
            ],
            &[
                "Use wrist motion, not just the finger",
                "Practice slowly at first",
                "Combine with pull-offs for legato lines",
            ],
        ),
        technique(
            "pull-off",
            "Pull-off",
            "Sounding a lower note by pulling the fretting finger off the string",
            Beginner,
            Articulation,
            &[
                "Place two fingers on two different frets",
                "Pick the higher note",
                "Pull the upper finger downward to sound the lower note",
                "The motion must be quick and downward",
            ],
            &[
                "Do not lift the finger straight up",
                "Keep the lower finger pressed",
                "Build up the strength of the pull",
            ],
        ),
        technique(
            "legato",
            "Legato",
            "Fluid chains of hammer-ons and pull-offs played without the pick",
            Intermediate,
            Articulation,
            &[
                "Chain hammer-ons and pull-offs in sequence",
                "Use a single pick stroke per string",
                "Keep the flow constant between notes",
                "Practice ascending and descending patterns",
            ],
            &[
                "Develop strength in every finger",
                "Practice with a metronome",
                "Start slow and raise the tempo gradually",
            ],
        ),
        technique(
            "tapping",
            "Tapping",
            "Striking the fretboard with picking-hand fingers",
            Advanced,
            Tapping,
            &[
                "Tap the fret with the picking-hand index finger",
                "Combine with fretting-hand hammer-ons and pull-offs",
                "Keep the rhythm steady between both hands",
                "Practice three-note patterns (tap-hammer-pull)",
            ],
            &[
                "Mute the strings you are not using",
                "Tap with the fingertip, not the nail",
                "Practice each hand separately first",
            ],
        ),
        technique(
            "vibrato",
            "Vibrato",
            "Rapid pitch oscillation that adds expression to held notes",
            Intermediate,
            Articulation,
            &[
                "Play and hold a note",
                "Move the finger up and down rapidly",
                "Keep the motion controlled and rhythmic",
                "Vary speed and width to suit the style",
            ],
            &[
                "Drive the motion from the wrist",
                "Practice both slow and fast vibrato",
                "Listen to players like B.B. King and Clapton",
            ],
        ),
        technique(
            "alternate-picking",
            "Alternate Picking",
            "Strict alternation of downstrokes and upstrokes",
            Intermediate,
            Picking,
            &[
                "Alternate consistently: down-up-down-up",
                "Keep the motion small and controlled",
                "Drive the pick mostly from the wrist",
                "Practice with a metronome, raising the tempo",
            ],
            &[
                "Start very slow (60 BPM)",
                "Keep the pick at a slight angle",
                "Run scales with strict alternation",
                "Do not tense the hand",
            ],
        ),
    ]
});

/// Static map for quick technique id to table index lookups.
static TECHNIQUE_MAP: Lazy<BTreeMap<String, usize>> = Lazy::new(|| {
    TECHNIQUES
        .iter()
        .enumerate()
        .map(|(i, t)| (t.id.clone(), i))
        .collect()
});

/// The full scale library, in catalog order.
pub fn scales() -> &'static [Scale] {
    &SCALES
}

/// The full technique library, in catalog order.
pub fn techniques() -> &'static [Technique] {
    &TECHNIQUES
}

/// Looks a scale up by id.
pub fn scale_by_id(id: &str) -> Result<&'static Scale> {
    SCALE_MAP
        .get(id)
        .map(|&i| &SCALES[i])
        .ok_or_else(|| PracticeError::NotFound(format!("scale {id:?}")))
}

/// Looks a technique up by id.
pub fn technique_by_id(id: &str) -> Result<&'static Technique> {
    TECHNIQUE_MAP
        .get(id)
        .map(|&i| &TECHNIQUES[i])
        .ok_or_else(|| PracticeError::NotFound(format!("technique {id:?}")))
}
