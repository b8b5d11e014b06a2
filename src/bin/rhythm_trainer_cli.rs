//! Rhythm Trainer - text front-end
//!
//! Picks (or asks for) an exercise, offers its backing track and asks how it
//! went, until the player answers `q`.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

use rhythm_trainer::audio::{apply_detected_track_settings, play_backing_track, SystemPlayer};
use rhythm_trainer::exercises::Feedback;
use rhythm_trainer::input::{prompt_choice, prompt_number, wait_for_enter};
use rhythm_trainer::session::{PracticeMode, TrainingSession};
use rhythm_trainer::storage::config::{self, AppConfig};
use rhythm_trainer::t;

fn main() -> Result<()> {
    rhythm_trainer::logging::init(io::stderr);

    tracing::info!("Starting Rhythm Trainer CLI v{}", env!("CARGO_PKG_VERSION"));

    let mut config = config::load_config().context("Failed to load configuration")?;
    rhythm_trainer::i18n::init(config.language.as_deref());

    if apply_detected_track_settings(&mut config).context("Failed to inspect backing tracks")? {
        config::save_config(&config).context("Failed to save detected track settings")?;
    }

    let session = TrainingSession::start(&config).context("Failed to start session")?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    run(session, &config, &mut stdin.lock(), &mut stdout.lock())
}

fn run<R: BufRead, W: Write>(
    mut session: TrainingSession,
    config: &AppConfig,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    let player = SystemPlayer::default();
    let (first, last) = session.range();

    loop {
        let exercise = match session.mode() {
            PracticeMode::Random => {
                let pick = session.next_random_with_reset()?;
                if pick.buffer_reset {
                    writeln!(output, "{}", t!("selection-reset"))?;
                }
                pick.exercise
            }
            PracticeMode::Manual => {
                let Some(exercise) = until_eof(prompt_number(
                    input,
                    output,
                    &t!("cli-number-prompt"),
                    Some(first),
                    Some(last),
                ))?
                else {
                    return quit(session, output);
                };
                session.select_manual(exercise)?;
                writeln!(output)?;
                exercise
            }
        };

        writeln!(output, "{}", t!("cli-play-exercise", "number" => exercise))?;

        if config.backing_tracks_dir.is_some() {
            if until_eof(wait_for_enter(input, output, &t!("cli-track-prompt")))?.is_none() {
                return quit(session, output);
            }
            if let Err(e) = play_backing_track(exercise, config, &player) {
                tracing::error!("Failed to play backing track: {}", e);
                writeln!(output, "{}", e)?;
            }
        }

        let answer = until_eof(prompt_choice(
            input,
            output,
            &t!("cli-feedback-prompt"),
            &["y", "n", "q"],
        ))?;
        let feedback = match answer.as_deref() {
            Some("y") => Feedback::Good,
            Some("n") => Feedback::Bad,
            _ => return quit(session, output),
        };

        writeln!(output)?;
        session.record(feedback)?;
    }
}

/// Save and stop.
fn quit<W: Write>(session: TrainingSession, output: &mut W) -> Result<()> {
    writeln!(
        output,
        "{}",
        t!("cli-saving", "path" => session.store().path().display())
    )?;
    session.finish()?;
    Ok(())
}

/// Closed input ends the session like `q` does.
fn until_eof<T>(result: io::Result<T>) -> io::Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rhythm_trainer::exercises::ExerciseStore;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn config(dir: &TempDir, random_mode: bool) -> AppConfig {
        let mut config = AppConfig::with_csv_path(dir.path().join("exercises.csv"));
        config.first_exercise = 1;
        config.last_exercise = 3;
        config.total_exercises = 3;
        config.random_mode = random_mode;
        config
    }

    fn play(config: &AppConfig, script: &str) -> String {
        let session = TrainingSession::start(config).unwrap();
        let mut output = Vec::new();
        run(session, config, &mut Cursor::new(script), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    fn weights(config: &AppConfig) -> Vec<u32> {
        ExerciseStore::new(&config.csv_path)
            .load_or_default(1, 3)
            .unwrap()
            .weights
    }

    #[test]
    fn test_manual_rounds_then_quit() {
        let dir = TempDir::new().unwrap();
        let cfg = config(&dir, false);

        let output = play(&cfg, "2\nn\n3\ny\n2\nq\n");

        assert!(output.contains(&t!("cli-play-exercise", "number" => 3)));
        assert!(output.contains(&cfg.csv_path.display().to_string()));
        assert_eq!(weights(&cfg), vec![1, 2, 1]);
    }

    #[test]
    fn test_invalid_answers_are_asked_again() {
        let dir = TempDir::new().unwrap();
        let cfg = config(&dir, false);

        play(&cfg, "7\nabc\n1\nmaybe\nN\nq\n");

        // The stray `q` lands on the number prompt; end of input then quits
        assert_eq!(weights(&cfg), vec![2, 1, 1]);
    }

    #[test]
    fn test_end_of_input_quits_and_saves() {
        let dir = TempDir::new().unwrap();
        let mut cfg = config(&dir, false);
        cfg.save_every_round = false;

        play(&cfg, "3\nn\n");

        assert_eq!(weights(&cfg), vec![1, 1, 2]);
    }

    #[test]
    fn test_random_round_then_quit() {
        let dir = TempDir::new().unwrap();
        let mut cfg = config(&dir, true);
        cfg.last_exercise = 1;

        let output = play(&cfg, "n\nn\nq\n");

        assert!(output.contains(&t!("selection-reset")));
        assert_eq!(weights(&cfg), vec![3, 1, 1]);
    }
}
