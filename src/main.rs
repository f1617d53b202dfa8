//! Headless host that replays a scripted editing session.
//!
//! Usage: `annotator-replay <script.json>`
//!
//! Each emitted effect is printed to stdout as one JSON line.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use bbox_annotator::{
    Editor, EditorConfig, EditorInput, Effect, Event, RecordingSink, Size, logging,
};
use serde::Deserialize;

/// A recorded session: the editor input, the image layout and the events.
#[derive(Debug, Deserialize)]
struct ReplayScript {
    #[serde(default)]
    input: EditorInput,
    /// Natural image size
    image: Size,
    /// Size of the editor container
    container: Size,
    #[serde(default)]
    steps: Vec<ReplayStep>,
}

#[derive(Debug, Deserialize)]
struct ReplayStep {
    event: Event,
    /// Zoom factor at the time of the event
    #[serde(default = "default_scale")]
    scale: f32,
}

fn default_scale() -> f32 {
    1.0
}

#[derive(Debug, thiserror::Error)]
enum ReplayError {
    #[error("usage: annotator-replay <script.json>")]
    Usage,

    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse script: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

fn main() -> ExitCode {
    let config = load_config();
    logging::init(config.preferences.log_level);

    let Some(path) = std::env::args_os().nth(1).map(PathBuf::from) else {
        eprintln!("{}", ReplayError::Usage);
        return ExitCode::from(2);
    };

    match replay(&path, &config) {
        Ok(count) => {
            log::info!("Replayed {} effects from {:?}", count, path);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Replay error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn load_config() -> EditorConfig {
    EditorConfig::load_from_default_path().unwrap_or_default()
}

#[cfg(target_arch = "wasm32")]
fn load_config() -> EditorConfig {
    EditorConfig::default()
}

fn replay(path: &Path, config: &EditorConfig) -> Result<usize, ReplayError> {
    let json = std::fs::read_to_string(path).map_err(|source| ReplayError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let script: ReplayScript = serde_json::from_str(&json)?;

    let mut editor = Editor::with_config(script.input, config);
    let mut sink = RecordingSink::default();
    editor.handle(
        &Event::ImageLoaded {
            natural: script.image,
            container: script.container,
        },
        &1.0_f32,
        &mut sink,
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut count = 0;
    for (index, step) in script.steps.iter().enumerate() {
        log::debug!("Step {}: {:?} at scale {}", index, step.event, step.scale);
        editor.handle(&step.event, &step.scale, &mut sink);
        for effect in sink.effects.drain(..) {
            print_effect(&mut out, &effect)?;
            count += 1;
        }
    }

    log::info!(
        "Final state: {} boxes, {} false positives, mode {}",
        editor.store().len(),
        editor.store().false_positives().len(),
        editor.mode().name()
    );
    Ok(count)
}

fn print_effect(out: &mut impl Write, effect: &Effect) -> Result<(), ReplayError> {
    serde_json::to_writer(&mut *out, effect).map_err(|e| ReplayError::Output(e.into()))?;
    writeln!(out)?;
    Ok(())
}
