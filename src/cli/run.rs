//! Run command implementation.

use super::output::{JsonGameResult, format_text};
use super::{CliError, OutputFormat, seed_or_clock};
use tunti::render::render_text;
use tunti::tournament::{TournamentConfig, run_game_with_state};

/// Execute the run command.
///
/// # Errors
///
/// Returns an error if the result cannot be serialized.
pub(crate) fn execute(
    seed: Option<u64>,
    turns: u32,
    format: OutputFormat,
    show_map: bool,
    quiet: bool,
) -> Result<(), CliError> {
    let seed = seed_or_clock(seed);
    let config = TournamentConfig { max_turns: turns };

    if !quiet && format == OutputFormat::Text {
        println!("Running game with seed {seed}...");
        println!();
    }

    let (result, final_state) = run_game_with_state(seed, &config);

    match format {
        OutputFormat::Text => {
            print!("{}", format_text(&result));
            if show_map {
                println!();
                print!("{}", render_text(&final_state));
            }
        }
        OutputFormat::Json => {
            let json_result = JsonGameResult::from_game_result(&result);
            let json = serde_json::to_string_pretty(&json_result)?;
            println!("{json}");
        }
    }

    Ok(())
}
