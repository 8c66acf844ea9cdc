use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use log::{info, warn};

use crate::game::{Outcome, Session};

/// Append-only game log. Every line is `[YYYY-mm-dd HH:MM:SS] message`.
pub struct Journal {
    writer: BufWriter<File>,
}

impl Journal {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("cannot create {}", parent.display()))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("cannot open journal {}", path.display()))?;
        Ok(Journal {
            writer: BufWriter::new(file),
        })
    }

    pub fn record(&mut self, message: &str) -> Result<()> {
        let stamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        writeln!(self.writer, "[{}] {}", stamp, message).context("cannot write to journal")?;
        self.writer.flush().context("cannot flush journal")?;
        info!("{}", message);
        Ok(())
    }

    pub fn record_victory(&mut self, player: &str, moves: u32) -> Result<()> {
        self.record(&format!("VICTORY: {} reached the treasure in {} moves", player, moves))
    }

    /// One line per player with where they ended, then the victory line
    /// for whoever found the treasure.
    pub fn record_session_end(&mut self, session: &Session, map: &str) -> Result<()> {
        for (seat, player) in session.players().iter().enumerate() {
            self.record(&format!(
                "{} finished '{}': {} in room {} with {} health",
                player.name(),
                map,
                session.outcome_for(seat).code(),
                player.current_room(),
                player.health()
            ))?;
        }
        if session.outcome() == Outcome::Victory {
            let winner = session.player();
            self.record_victory(winner.name(), winner.moves())?;
        }
        Ok(())
    }

    pub fn close(mut self) -> Result<()> {
        self.writer.flush().context("cannot flush journal")
    }
}

/// Runs `write` against the journal, if there still is one. A failure is
/// logged and the journal is set aside for the rest of the game.
pub fn write_or_warn<F>(journal: &mut Option<Journal>, write: F)
where
    F: FnOnce(&mut Journal) -> Result<()>,
{
    let Some(open) = journal.as_mut() else { return };
    if let Err(e) = write(open) {
        warn!("journal disabled: {:#}", e);
        *journal = None;
    }
}

pub fn close_or_warn(journal: Option<Journal>) {
    if let Some(Err(e)) = journal.map(Journal::close) {
        warn!("journal not flushed: {:#}", e);
    }
}
