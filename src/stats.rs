//! Play statistics
//!
//! Persisted to LocalStorage, updated once per finished match.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::consts::SCORE_LIMITS;
use crate::persistence;
use crate::sim::{Difficulty, MatchSummary};

/// Games played/won in one bucket
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub played: u32,
    pub won: u32,
}

impl Record {
    fn add(&mut self, won: bool) {
        self.played += 1;
        if won {
            self.won += 1;
        }
    }

    /// Rounded percentage, 0 when nothing played
    pub fn win_rate(&self) -> u32 {
        percent(self.won, self.played)
    }
}

/// Per-difficulty records
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyRecords {
    pub easy: Record,
    pub medium: Record,
    pub hard: Record,
}

impl DifficultyRecords {
    pub fn get(&self, difficulty: Difficulty) -> &Record {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard => &self.hard,
        }
    }

    fn get_mut(&mut self, difficulty: Difficulty) -> &mut Record {
        match difficulty {
            Difficulty::Easy => &mut self.easy,
            Difficulty::Medium => &mut self.medium,
            Difficulty::Hard => &mut self.hard,
        }
    }
}

/// Lifetime statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayStats {
    pub games_played: u32,
    pub games_won: u32,
    pub games_lost: u32,
    /// Milliseconds across all finished games
    pub total_play_time: u64,
    pub best_win_streak: u32,
    pub current_win_streak: u32,
    pub difficulty_stats: DifficultyRecords,
    /// Keyed by score limit
    pub score_limit_stats: BTreeMap<u32, Record>,
}

impl Default for PlayStats {
    fn default() -> Self {
        Self {
            games_played: 0,
            games_won: 0,
            games_lost: 0,
            total_play_time: 0,
            best_win_streak: 0,
            current_win_streak: 0,
            difficulty_stats: DifficultyRecords::default(),
            score_limit_stats: SCORE_LIMITS.iter().map(|&l| (l, Record::default())).collect(),
        }
    }
}

impl PlayStats {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "pongStats";

    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a finished match into the totals
    pub fn record_game(&mut self, game: &MatchSummary) {
        self.games_played += 1;
        self.total_play_time += game.duration_ms;

        self.difficulty_stats
            .get_mut(game.difficulty)
            .add(game.player_won);
        // Only the limits offered on the setup screen get a bucket
        if let Some(record) = self.score_limit_stats.get_mut(&game.score_limit) {
            record.add(game.player_won);
        }

        if game.player_won {
            self.games_won += 1;
            self.current_win_streak += 1;
            self.best_win_streak = self.best_win_streak.max(self.current_win_streak);
        } else {
            self.games_lost += 1;
            self.current_win_streak = 0;
        }

        log::info!(
            "Recorded {} ({}-{}), {} games played",
            if game.player_won { "win" } else { "loss" },
            game.player_score,
            game.ai_score,
            self.games_played
        );
    }

    /// Overall win percentage, rounded
    pub fn win_rate(&self) -> u32 {
        percent(self.games_won, self.games_played)
    }

    /// Mean game length in whole seconds, rounded
    pub fn average_game_time_secs(&self) -> u64 {
        if self.games_played == 0 {
            return 0;
        }
        (self.total_play_time as f64 / self.games_played as f64 / 1000.0).round() as u64
    }

    pub fn difficulty_win_rate(&self, difficulty: Difficulty) -> u32 {
        self.difficulty_stats.get(difficulty).win_rate()
    }

    pub fn score_limit_record(&self, limit: u32) -> Option<&Record> {
        self.score_limit_stats.get(&limit)
    }

    /// Rows for the stats screen
    pub fn stats_lines(&self) -> Vec<(String, String)> {
        let mut lines = vec![
            ("Games Played".to_string(), self.games_played.to_string()),
            ("Games Won".to_string(), self.games_won.to_string()),
            ("Games Lost".to_string(), self.games_lost.to_string()),
            ("Win Rate".to_string(), format!("{}%", self.win_rate())),
            ("Current Win Streak".to_string(), self.current_win_streak.to_string()),
            ("Best Win Streak".to_string(), self.best_win_streak.to_string()),
            ("Total Play Time".to_string(), format_time(self.total_play_time)),
            (
                "Average Game Time".to_string(),
                format!("{}s", self.average_game_time_secs()),
            ),
        ];
        for difficulty in Difficulty::ALL {
            let record = self.difficulty_stats.get(difficulty);
            lines.push((
                format!("{} Win Rate", difficulty.label()),
                format!("{}% ({}/{})", record.win_rate(), record.won, record.played),
            ));
        }
        lines
    }

    /// Load stats from storage, starting fresh if missing or corrupt
    pub fn load() -> Self {
        match persistence::load_json::<PlayStats>(Self::STORAGE_KEY) {
            Some(mut stats) => {
                // Older saves may lack some buckets
                for limit in SCORE_LIMITS {
                    stats.score_limit_stats.entry(limit).or_default();
                }
                log::info!("Loaded stats ({} games)", stats.games_played);
                stats
            }
            None => {
                log::info!("No stats found, starting fresh");
                Self::new()
            }
        }
    }

    pub fn save(&self) {
        if persistence::save_json(Self::STORAGE_KEY, self) {
            log::info!("Stats saved ({} games)", self.games_played);
        }
    }
}

fn percent(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    (part as f64 / whole as f64 * 100.0).round() as u32
}

/// Format milliseconds as `m:ss`
pub fn format_time(ms: u64) -> String {
    let seconds = ms / 1000;
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
