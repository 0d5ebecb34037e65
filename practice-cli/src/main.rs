//! # Practice CLI - Guitar Practice Tracker Host
//!
//! A thin command-line host around `practice-core`. All the logic lives in
//! the core crate; this binary only parses arguments, forwards events to
//! the engine and formats the returned snapshots.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use practice_core::catalog;
use practice_core::clock::{Clock, SystemClock};
use practice_core::engine::{CHALLENGE_XP, PracticeEngine, Updated};
use practice_core::store::JsonFileStore;
use practice_core::theory::{self, PitchClass};

#[derive(Parser)]
#[command(name = "practice", about = "Guitar practice tracker", version)]
struct Cli {
    /// Progress file location (defaults to the user data directory)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List all scales in the library
    Scales,
    /// Show the notes of a scale
    Scale {
        /// Scale id, e.g. "pentatonic-minor"
        id: String,
        /// Root note, e.g. "A" or "F#"
        #[arg(long, default_value = "A")]
        root: String,
    },
    /// List all techniques in the library
    Techniques,
    /// Show a technique's instructions and tips
    Technique {
        /// Technique id, e.g. "hammer-on"
        id: String,
    },
    /// Log a practice session for today
    Practice {
        /// Session length in minutes
        minutes: u32,
    },
    /// Mark a scale as completed
    CompleteScale { id: String },
    /// Mark a technique as completed
    CompleteTechnique { id: String },
    /// Show today's challenge, optionally completing it
    Challenge {
        #[arg(long)]
        complete: bool,
    },
    /// Print the current progress summary
    Status,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let data_path = match cli.data {
        Some(path) => path,
        None => default_data_path(),
    };

    let store = JsonFileStore::new(&data_path);
    let clock = SystemClock;
    let mut engine = PracticeEngine::new(store, clock)
        .with_context(|| format!("failed to load progress from {}", data_path.display()))?;

    match cli.command {
        Command::Scales => {
            for scale in catalog::scales() {
                println!("{:<18} {} - {}", scale.id, scale.name, scale.description);
            }
        }
        Command::Scale { id, root } => {
            let scale = catalog::scale_by_id(&id)?;
            let root: PitchClass = root.parse()?;
            let notes = theory::scale_notes(root, scale);
            let rendered: Vec<String> = notes.iter().map(|n| n.to_string()).collect();
            println!("{} {}: {}", root, scale.name, rendered.join(" "));
        }
        Command::Techniques => {
            for technique in catalog::techniques() {
                println!(
                    "{:<18} {} ({:?}) - {}",
                    technique.id, technique.name, technique.difficulty, technique.description
                );
            }
        }
        Command::Technique { id } => {
            let technique = catalog::technique_by_id(&id)?;
            println!("{} - {}", technique.name, technique.description);
            println!("\nInstructions:");
            for (i, step) in technique.instructions.iter().enumerate() {
                println!("  {}. {}", i + 1, step);
            }
            println!("\nTips:");
            for tip in &technique.tips {
                println!("  - {tip}");
            }
        }
        Command::Practice { minutes } => {
            let unlocked_before = engine.progress().achievements.len();
            let updated = engine.record_practice_session(minutes, clock.today())?;
            report_save(&updated);
            println!(
                "Logged {minutes} min. Streak: {} day(s), total: {} min",
                updated.progress.practice_streak, updated.progress.total_practice_time
            );
            report_new_achievements(&updated, unlocked_before);
        }
        Command::CompleteScale { id } => {
            let unlocked_before = engine.progress().achievements.len();
            let updated = engine.complete_scale(&id)?;
            report_save(&updated);
            println!("Completed scale '{id}'. XP: {}", updated.progress.xp);
            report_new_achievements(&updated, unlocked_before);
        }
        Command::CompleteTechnique { id } => {
            let unlocked_before = engine.progress().achievements.len();
            let updated = engine.complete_technique(&id)?;
            report_save(&updated);
            println!("Completed technique '{id}'. XP: {}", updated.progress.xp);
            report_new_achievements(&updated, unlocked_before);
        }
        Command::Challenge { complete } => {
            let updated = engine.check_daily_challenge(clock.today());
            report_save(&updated);
            if complete {
                let updated = engine.complete_daily_challenge()?;
                report_save(&updated);
                println!("Challenge completed! +{CHALLENGE_XP} XP");
            }
            if let Some(challenge) = &engine.progress().daily_challenge {
                let state = if challenge.completed { "done" } else { "open" };
                println!(
                    "[{state}] {} - {}",
                    challenge.title, challenge.description
                );
            }
        }
        Command::Status => {
            let p = engine.progress();
            println!("Level {} ({} XP, {} to next)", p.level, p.xp, 100 - p.xp % 100);
            println!("Streak: {} day(s)", p.practice_streak);
            println!(
                "Practice time: {}h {:02}m",
                p.total_practice_time / 60,
                p.total_practice_time % 60
            );
            println!(
                "Scales: {}/{}  Techniques: {}/{}",
                p.completed_scales.len(),
                catalog::scales().len(),
                p.completed_techniques.len(),
                catalog::techniques().len()
            );
            println!("Achievements:");
            if p.achievements.is_empty() {
                println!("  (none yet)");
            }
            for achievement in &p.achievements {
                println!(
                    "  {} - {} ({})",
                    achievement.title,
                    achievement.description,
                    achievement.unlocked_at.format("%Y-%m-%d")
                );
            }
        }
    }

    Ok(())
}

fn default_data_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("practice-tracker")
        .join("progress.json")
}

/// Durability warnings are recoverable: the in-memory progress is already
/// updated, so surface the problem without failing the command.
fn report_save(updated: &Updated) {
    if let Some(err) = &updated.save_error {
        eprintln!("warning: progress not saved: {err}");
    }
}

/// Announces any achievements this particular operation unlocked.
fn report_new_achievements(updated: &Updated, unlocked_before: usize) {
    for achievement in &updated.progress.achievements[unlocked_before..] {
        println!(
            "Achievement unlocked: {} - {}",
            achievement.title, achievement.description
        );
    }
}
