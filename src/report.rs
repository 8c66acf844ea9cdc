use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use log::info;
use serde::Serialize;

use crate::game::Session;
use crate::maze::Item;

/// `report_<Name_With_Underscores>.json`; runs of whitespace collapse to a
/// single underscore.
pub fn report_file_name(player: &str) -> String {
    let name = player.split_whitespace().collect::<Vec<_>>().join("_");
    format!("report_{}.json", name)
}

#[derive(Debug, Clone, Serialize)]
pub struct MissionReport {
    pub player: String,
    pub date: String,
    pub map: Option<String>,
    pub result: &'static str,
    pub final_room: String,
    pub path_taken: Vec<String>,
    pub final_health: i64,
    pub moves: u32,
    pub total_cost: f64,
    pub riddles_solved: Vec<String>,
    pub effects_applied: Vec<String>,
    pub events_encountered: Vec<String>,
    pub inventory: Vec<Item>,
}

impl MissionReport {
    /// Report for the player whose turn it is, or who ended the game.
    pub fn from_session(session: &Session) -> Self {
        Self::for_seat(session, session.active_seat())
    }

    /// One report per player, in seating order.
    pub fn for_every_player(session: &Session) -> Vec<Self> {
        (0..session.players().len())
            .map(|seat| Self::for_seat(session, seat))
            .collect()
    }

    fn for_seat(session: &Session, seat: usize) -> Self {
        let player = &session.players()[seat];
        MissionReport {
            player: player.name().to_string(),
            date: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            map: session.maze().name().map(str::to_string),
            result: session.outcome_for(seat).code(),
            final_room: player.current_room().to_string(),
            path_taken: player.path_taken(),
            final_health: player.health(),
            moves: player.moves(),
            total_cost: player.distance(),
            riddles_solved: player.solved_riddles().iter().cloned().collect(),
            effects_applied: player.applied_effects().iter().cloned().collect(),
            events_encountered: player.encountered_events().iter().cloned().collect(),
            inventory: player.inventory().iter().cloned().collect(),
        }
    }

    pub fn file_name(&self) -> String {
        report_file_name(&self.player)
    }
}

/// Writes `report` into `dir` and returns the file it went to.
pub fn export(report: &MissionReport, dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).with_context(|| format!("cannot create {}", dir.display()))?;
    let path = dir.join(report.file_name());
    let json = serde_json::to_string_pretty(report).context("cannot serialize mission report")?;
    std::fs::write(&path, json).with_context(|| format!("cannot write {}", path.display()))?;
    info!("mission report for {} written to {}", report.player, path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::DEFAULT_HEALTH;
    use crate::maze::{Maze, Room};

    #[test]
    fn file_name_replaces_whitespace() {
        assert_eq!(report_file_name("Bot With Spaces"), "report_Bot_With_Spaces.json");
        assert_eq!(report_file_name("  Ana\t Maria "), "report_Ana_Maria.json");
        assert_eq!(report_file_name("Solo"), "report_Solo.json");
    }

    #[test]
    fn exported_report_carries_outcome_and_final_room() {
        let mut maze = Maze::named("tiny");
        maze.add_room(Room::entrance("E1", "Entrada")).unwrap();
        maze.add_room(Room::treasure("C1", "Tesouro")).unwrap();
        maze.add_corridor("E1", "C1", 4.0, None).unwrap();
        let mut session = Session::new(maze, "Ana Maria", DEFAULT_HEALTH).unwrap();
        session.move_to("C1").unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = export(&MissionReport::from_session(&session), dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), "report_Ana_Maria.json");

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["result"], "VICTORY");
        assert_eq!(written["final_room"], "C1");
        assert_eq!(written["path_taken"], serde_json::json!(["E1", "C1"]));
        assert_eq!(written["total_cost"], 4.0);
    }

    #[test]
    fn only_the_finder_wins_a_shared_game() {
        let mut maze = Maze::named("tiny");
        maze.add_room(Room::entrance("E1", "Entrada")).unwrap();
        maze.add_room(Room::treasure("C1", "Tesouro")).unwrap();
        maze.add_corridor("E1", "C1", 1.0, None).unwrap();
        let mut session = Session::with_players(maze, &["Ana", "Rui"], DEFAULT_HEALTH).unwrap();
        session.move_to("C1").unwrap();

        let reports = MissionReport::for_every_player(&session);
        let results: Vec<(&str, &str)> = reports
            .iter()
            .map(|report| (report.player.as_str(), report.result))
            .collect();
        assert_eq!(results, vec![("Ana", "VICTORY"), ("Rui", "DEFEAT")]);
        assert_eq!(reports[1].final_room, "E1");
        assert_eq!(reports[1].moves, 0);
    }
}
