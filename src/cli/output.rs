//! Output formatting utilities for CLI.

// Averages over game counts are reported as floats
#![allow(clippy::cast_precision_loss)]

use serde::Serialize;
use tunti::game::{FACTION_COUNT, Faction, FactionId, GameState, Tile};
use tunti::tournament::{FactionStats, GameResult};

/// Display label for a faction id.
fn label(id: FactionId) -> &'static str {
    Faction::new(id).label
}

/// JSON-serializable game result.
#[derive(Debug, Serialize)]
pub(super) struct JsonGameResult<'a> {
    /// Random seed used.
    pub(super) seed: u64,
    /// Winner faction ID (null if draw).
    pub(super) winner: Option<FactionId>,
    /// Total turns played.
    pub(super) turns_played: u32,
    /// Per-faction results.
    pub(super) factions: &'a [FactionStats; FACTION_COUNT],
}

impl<'a> JsonGameResult<'a> {
    /// Create from a `GameResult`.
    pub(super) fn from_game_result(result: &'a GameResult) -> Self {
        Self {
            seed: result.seed,
            winner: result.winner,
            turns_played: result.turns_played,
            factions: &result.faction_stats,
        }
    }
}

/// JSON-serializable view of a game: tiles and factions.
#[derive(Debug, Serialize)]
pub(super) struct JsonSnapshot<'a> {
    seed: u64,
    width: u16,
    height: u16,
    turn: u32,
    factions: &'a [Faction; FACTION_COUNT],
    tiles: &'a [Tile],
}

impl<'a> JsonSnapshot<'a> {
    pub(super) fn new(seed: u64, state: &'a GameState) -> Self {
        Self {
            seed,
            width: state.map().width(),
            height: state.map().height(),
            turn: state.turn(),
            factions: state.factions(),
            tiles: state.tiles(),
        }
    }
}

/// Format a game result as human-readable text.
pub(super) fn format_text(result: &GameResult) -> String {
    let mut output = String::new();

    output.push_str(&format!("Game Result (seed: {})\n", result.seed));
    if let Some(winner) = result.winner {
        output.push_str(&format!("  Winner: {} [{winner}]\n", label(winner)));
    } else {
        output.push_str("  Winner: Draw\n");
    }
    output.push_str(&format!("  Turns: {}\n\n", result.turns_played));

    for stats in &result.faction_stats {
        output.push_str(&format!(
            "  {} [{}]: capital {}/5, territory {}, units {} ({} trained), {} buildings\n",
            label(stats.faction_id),
            stats.faction_id,
            stats.capital_hp,
            stats.territory,
            stats.units,
            stats.units_trained,
            stats.buildings_built
        ));
        output.push_str(&format!("    {}\n", stats.resources));
    }

    output
}

/// Tournament statistics for aggregated results.
#[derive(Debug, Default, Clone, PartialEq)]
pub(super) struct TournamentStats {
    /// Total games played.
    pub(super) games_played: u64,
    /// Win count per faction.
    pub(super) wins: [u64; FACTION_COUNT],
    /// Draw count.
    pub(super) draws: u64,
    /// Total turns across all games.
    total_turns: u64,
    /// Final territory summed per faction.
    total_territory: [u64; FACTION_COUNT],
    /// Units trained summed per faction.
    total_trained: [u64; FACTION_COUNT],
}

impl TournamentStats {
    /// Add a game result to the stats.
    pub(super) fn add_result(&mut self, result: &GameResult) {
        self.games_played += 1;
        self.total_turns += u64::from(result.turns_played);

        match result.winner {
            Some(winner) => {
                if let Some(wins) = self.wins.get_mut(usize::from(winner)) {
                    *wins += 1;
                }
            }
            None => self.draws += 1,
        }

        for (i, stats) in result.faction_stats.iter().enumerate() {
            self.total_territory[i] += u64::from(stats.territory);
            self.total_trained[i] += u64::from(stats.units_trained);
        }
    }

    /// Merge another thread's stats into this one.
    pub(super) fn merge(&mut self, other: &Self) {
        self.games_played += other.games_played;
        self.draws += other.draws;
        self.total_turns += other.total_turns;
        for i in 0..FACTION_COUNT {
            self.wins[i] += other.wins[i];
            self.total_territory[i] += other.total_territory[i];
            self.total_trained[i] += other.total_trained[i];
        }
    }

    fn per_game(&self, total: u64) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        total as f64 / self.games_played as f64
    }

    /// Get win rate for a faction (0.0-1.0).
    pub(super) fn win_rate(&self, faction: usize) -> f64 {
        self.per_game(self.wins.get(faction).copied().unwrap_or(0))
    }

    /// Get draw rate (0.0-1.0).
    pub(super) fn draw_rate(&self) -> f64 {
        self.per_game(self.draws)
    }

    /// Get average final territory for a faction.
    pub(super) fn avg_territory(&self, faction: usize) -> f64 {
        self.per_game(self.total_territory.get(faction).copied().unwrap_or(0))
    }

    /// Get average number of units trained by a faction.
    pub(super) fn avg_trained(&self, faction: usize) -> f64 {
        self.per_game(self.total_trained.get(faction).copied().unwrap_or(0))
    }

    /// Get average game length.
    pub(super) fn avg_turns(&self) -> f64 {
        self.per_game(self.total_turns)
    }
}

/// JSON-serializable tournament result.
#[derive(Debug, Serialize)]
pub(super) struct JsonTournamentResult {
    /// Total games played.
    games_played: u64,
    /// Per-faction statistics.
    factions: Vec<JsonTournamentFaction>,
    /// Number of draws.
    draws: u64,
    /// Average game length in turns.
    avg_turns: f64,
}

/// JSON-serializable per-faction tournament stats.
#[derive(Debug, Serialize)]
pub(super) struct JsonTournamentFaction {
    /// Faction id.
    faction: usize,
    /// Faction label.
    label: &'static str,
    /// Number of wins.
    wins: u64,
    /// Win rate (0.0-1.0).
    win_rate: f64,
    /// Average final territory.
    avg_territory: f64,
    /// Average units trained.
    avg_trained: f64,
}

impl JsonTournamentResult {
    /// Create from stats.
    pub(super) fn from_stats(stats: &TournamentStats) -> Self {
        let factions = (0..FACTION_COUNT)
            .zip(FactionId::MIN..)
            .map(|(i, id)| JsonTournamentFaction {
                faction: i,
                label: label(id),
                wins: stats.wins[i],
                win_rate: stats.win_rate(i),
                avg_territory: stats.avg_territory(i),
                avg_trained: stats.avg_trained(i),
            })
            .collect();

        Self {
            games_played: stats.games_played,
            factions,
            draws: stats.draws,
            avg_turns: stats.avg_turns(),
        }
    }
}

/// Format tournament stats as human-readable text.
pub(super) fn format_tournament_text(stats: &TournamentStats) -> String {
    let mut output = String::new();

    output.push_str(&format!("Tournament Results ({} games)\n", stats.games_played));
    output.push_str("========================================\n\n");

    output.push_str("Win Rates:\n");
    for (i, id) in (0..FACTION_COUNT).zip(FactionId::MIN..) {
        output.push_str(&format!(
            "  {} [{i}]: {:.1}% ({} wins)\n",
            label(id),
            stats.win_rate(i) * 100.0,
            stats.wins[i]
        ));
    }
    output.push_str(&format!(
        "  Draws: {} ({:.1}%)\n\n",
        stats.draws,
        stats.draw_rate() * 100.0
    ));

    output.push_str("Averages per game:\n");
    for (i, id) in (0..FACTION_COUNT).zip(FactionId::MIN..) {
        output.push_str(&format!(
            "  {} [{i}]: territory {:.1}, units trained {:.1}\n",
            label(id),
            stats.avg_territory(i),
            stats.avg_trained(i)
        ));
    }

    output.push_str(&format!("\nAverage Game Length: {:.0} turns\n", stats.avg_turns()));

    output
}

/// Format tournament stats as CSV.
pub(super) fn format_tournament_csv(stats: &TournamentStats) -> String {
    let mut output = String::new();

    output.push_str("faction,label,wins,win_rate,avg_territory,avg_trained\n");

    for (i, id) in (0..FACTION_COUNT).zip(FactionId::MIN..) {
        output.push_str(&format!(
            "{i},{},{},{:.4},{:.2},{:.2}\n",
            label(id),
            stats.wins[i],
            stats.win_rate(i),
            stats.avg_territory(i),
            stats.avg_trained(i)
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use tunti::tournament::{TournamentConfig, run_game};

    #[test]
    fn test_stats_merge_matches_sequential() {
        let config = TournamentConfig { max_turns: 20 };
        let results: Vec<_> = (0..4).map(|seed| run_game(seed, &config)).collect();

        let mut sequential = TournamentStats::default();
        for r in &results {
            sequential.add_result(r);
        }

        let mut left = TournamentStats::default();
        let mut right = TournamentStats::default();
        left.add_result(&results[0]);
        left.add_result(&results[1]);
        right.add_result(&results[2]);
        right.add_result(&results[3]);
        left.merge(&right);

        assert_eq!(left, sequential);
        assert_eq!(left.games_played, 4);
    }

    #[test]
    fn test_empty_stats_have_zero_rates() {
        let stats = TournamentStats::default();
        assert!(stats.win_rate(0).abs() < f64::EPSILON);
        assert!(stats.avg_turns().abs() < f64::EPSILON);
        assert!(format_tournament_csv(&stats).starts_with("faction,label"));
    }

    #[test]
    fn test_format_text_names_factions() {
        let result = run_game(2, &TournamentConfig { max_turns: 3 });
        let text = format_text(&result);
        assert!(text.contains("Myanmar [0]"));
        assert!(text.contains("Thailand [1]"));
    }
}
