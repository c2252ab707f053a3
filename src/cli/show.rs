//! Show command implementation.

use super::output::JsonSnapshot;
use super::{CliError, OutputFormat, seed_or_clock};
use tunti::game::{EngineConfig, GameState};
use tunti::render::render_text;

/// Execute the show command.
///
/// # Errors
///
/// Returns an error if the map cannot be serialized.
pub(crate) fn execute(seed: Option<u64>, format: OutputFormat) -> Result<(), CliError> {
    let seed = seed_or_clock(seed);
    let state = GameState::new(EngineConfig {
        seed,
        ..EngineConfig::default()
    });

    match format {
        OutputFormat::Text => {
            println!("Map for seed {seed}");
            println!();
            print!("{}", render_text(&state));
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&JsonSnapshot::new(seed, &state))?;
            println!("{json}");
        }
    }

    Ok(())
}
