use std::collections::HashSet;

use log::{debug, info};
use thiserror::Error;

use super::player::Player;
use super::turns::TurnOrder;
use crate::maze::{Effect, Item, Maze, RandomEvent, Riddle, Room, RoomKind};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlayError {
    #[error("the maze has no entrance")]
    NoEntrance,

    #[error("a game needs at least one player")]
    NoPlayers,

    #[error("the game is already over")]
    GameOver,

    #[error("the riddle in {0} must be solved before leaving")]
    RiddleUnsolved(String),

    #[error("there is no way from {from} to {target}")]
    NoSuchExit { from: String, target: String },

    #[error("there is no riddle to answer in {0}")]
    NoRiddle(String),

    #[error("no item called '{0}' in the inventory")]
    NoSuchItem(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    InProgress,
    Victory,
    Defeat,
    Abandoned,
}

impl Outcome {
    pub fn code(self) -> &'static str {
        match self {
            Outcome::InProgress => "IN_PROGRESS",
            Outcome::Victory => "VICTORY",
            Outcome::Defeat => "DEFEAT",
            Outcome::Abandoned => "ABANDONED",
        }
    }

    pub fn is_finished(self) -> bool {
        self != Outcome::InProgress
    }
}

/// What happened during a single move.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveReport {
    /// Who made the move.
    pub player: String,
    pub from: String,
    pub to: String,
    /// Room the player actually stands in afterwards; differs from `to`
    /// when an event pushed them back or swapped them elsewhere.
    pub arrived: String,
    pub cost: f64,
    pub event: Option<RandomEvent>,
    pub outcome: Outcome,
}

/// A run through a maze by one or more players taking turns at the same
/// keyboard.
///
/// The maze itself is never mutated; which corridor events have already
/// fired and which riddles are solved is tracked here and shared by every
/// player. Each move ends the mover's turn; answering riddles and using
/// items do not.
#[derive(Debug)]
pub struct Session {
    maze: Maze,
    players: Vec<Player>,
    turns: TurnOrder,
    fired_events: HashSet<(String, String)>,
    solved_rooms: HashSet<String>,
    outcome: Outcome,
}

impl Session {
    pub fn new(maze: Maze, player_name: &str, health: i64) -> Result<Self, PlayError> {
        Self::with_players(maze, &[player_name], health)
    }

    /// Seats `names` at the entrance in turn order.
    pub fn with_players<S: AsRef<str>>(
        maze: Maze,
        names: &[S],
        health: i64,
    ) -> Result<Self, PlayError> {
        let entrance = maze.entrance().ok_or(PlayError::NoEntrance)?;
        let turns = TurnOrder::new(names.len()).ok_or(PlayError::NoPlayers)?;
        let players: Vec<Player> = names
            .iter()
            .map(|name| Player::new(name.as_ref(), entrance.id.clone(), health))
            .collect();
        for player in &players {
            info!("{} enters the maze at {}", player.name(), entrance.id);
        }
        Ok(Session {
            maze,
            players,
            turns,
            fired_events: HashSet::new(),
            solved_rooms: HashSet::new(),
            outcome: Outcome::InProgress,
        })
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    /// The player whose turn it is. Once the game is over this is the
    /// player who made the deciding move.
    pub fn player(&self) -> &Player {
        &self.players[self.turns.active()]
    }

    /// Seat of the player returned by [`Session::player`].
    pub fn active_seat(&self) -> usize {
        self.turns.active()
    }

    /// Every player in seating order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Players waiting for their turn, next first.
    pub fn upcoming(&self) -> Vec<&Player> {
        self.turns
            .upcoming()
            .map(|seat| &self.players[seat])
            .collect()
    }

    pub fn turn(&self) -> u32 {
        self.turns.turn()
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// The outcome as seen from `seat`: once someone finds the treasure,
    /// everyone else has lost.
    pub fn outcome_for(&self, seat: usize) -> Outcome {
        match self.outcome {
            Outcome::Victory if seat != self.turns.active() => Outcome::Defeat,
            outcome => outcome,
        }
    }

    pub fn current_room(&self) -> Option<&Room> {
        self.maze.room(self.player().current_room())
    }

    /// Distinct rooms reachable in one move, in corridor order.
    pub fn exits(&self) -> Vec<&Room> {
        let mut exits: Vec<&Room> = Vec::new();
        for room in self.maze.neighbors(self.player().current_room()) {
            if !exits.iter().any(|seen| seen.id == room.id) {
                exits.push(room);
            }
        }
        exits
    }

    /// The riddle blocking the current room, if it is still unsolved.
    pub fn pending_riddle(&self) -> Option<&Riddle> {
        let room = self.current_room()?;
        let riddle = room.riddle_ref()?;
        if self.solved_rooms.contains(&room.id) {
            None
        } else {
            Some(riddle)
        }
    }

    pub fn move_to(&mut self, target: &str) -> Result<MoveReport, PlayError> {
        if self.outcome.is_finished() {
            return Err(PlayError::GameOver);
        }
        let active = self.turns.active();
        let from = self.players[active].current_room().to_string();
        if self.pending_riddle().is_some() {
            return Err(PlayError::RiddleUnsolved(from));
        }

        let destination = self
            .maze
            .neighbors(&from)
            .find(|room| room.id.eq_ignore_ascii_case(target))
            .map(|room| room.id.clone())
            .ok_or_else(|| PlayError::NoSuchExit {
                from: from.clone(),
                target: target.to_string(),
            })?;
        let (cost, event) = self
            .maze
            .corridor_between(&from, &destination)
            .map(|corridor| (corridor.weight(), corridor.event().cloned()))
            .unwrap_or((0.0, None));

        self.players[active].record_walk(cost);
        let fired = event.filter(|_| self.fired_events.insert(corridor_key(&from, &destination)));

        let mut displaced = false;
        if let Some(event) = &fired {
            let player = &mut self.players[active];
            info!("{} triggers '{}' between {} and {}", player.name(), event.description, from, destination);
            player.record_event(&event.description);
            if let Some(item) = event.item() {
                player.take_item(item.clone());
            }
            displaced = self.apply_effect(event.effect);
        }
        if !displaced {
            self.players[active].enter(&destination);
        }
        self.refresh_outcome();

        let mover = &self.players[active];
        let report = MoveReport {
            player: mover.name().to_string(),
            from,
            to: destination,
            arrived: mover.current_room().to_string(),
            cost,
            event: fired,
            outcome: self.outcome,
        };
        if !self.outcome.is_finished() {
            let next = self.turns.pass();
            debug!("turn {}: {}", self.turns.turn(), self.players[next].name());
        }
        Ok(report)
    }

    /// Checks `candidate` against the riddle in the current room. Rooms whose
    /// riddle is already solved accept anything.
    pub fn answer_riddle(&mut self, candidate: &str) -> Result<bool, PlayError> {
        if self.outcome.is_finished() {
            return Err(PlayError::GameOver);
        }
        let active = self.turns.active();
        let room = self.players[active].current_room().to_string();
        let riddle = self
            .maze
            .room(&room)
            .and_then(Room::riddle_ref)
            .ok_or_else(|| PlayError::NoRiddle(room.clone()))?;
        if self.solved_rooms.contains(&room) {
            return Ok(true);
        }
        if !riddle.check_answer(candidate) {
            debug!("wrong answer in {}", room);
            return Ok(false);
        }
        let question = riddle.question().to_string();
        self.players[active].record_riddle(&question);
        self.solved_rooms.insert(room);
        Ok(true)
    }

    /// Consumes an inventory item and applies its effect.
    pub fn use_item(&mut self, name: &str) -> Result<Item, PlayError> {
        if self.outcome.is_finished() {
            return Err(PlayError::GameOver);
        }
        let item = self.players[self.turns.active()]
            .drop_item(name)
            .ok_or_else(|| PlayError::NoSuchItem(name.to_string()))?;
        self.apply_effect(item.effect);
        self.refresh_outcome();
        Ok(item)
    }

    pub fn abandon(&mut self) {
        if !self.outcome.is_finished() {
            self.outcome = Outcome::Abandoned;
        }
    }

    /// Applies `effect` to the active player and returns whether it moved
    /// them out of the room they were in. Effects that change nothing are
    /// not recorded.
    fn apply_effect(&mut self, effect: Effect) -> bool {
        let active = self.turns.active();
        let (applied, displaced) = match effect {
            Effect::None => (false, false),
            Effect::Heal | Effect::BonusPower | Effect::Damage | Effect::Trap => {
                let player = &mut self.players[active];
                let health = player.adjust_health(effect.health_delta());
                debug!("{} health now {}", player.name(), health);
                (true, false)
            }
            Effect::Recede => {
                let steps = effect.magnitude() as usize;
                let moved = self.players[active].recede(steps).is_some();
                (moved, moved)
            }
            Effect::SkipTurn => {
                self.turns.skip_next(active);
                (true, false)
            }
            Effect::ExtraTurn => {
                self.turns.grant_extra(active);
                (true, false)
            }
            Effect::SwapPosition => {
                let moved = self.swap_with_next(active);
                (moved, moved)
            }
            Effect::SwapAll => {
                let moved = self.rotate_positions();
                (moved, moved)
            }
        };
        if applied {
            self.players[active].record_effect(effect.code());
        }
        displaced
    }

    /// Trades rooms with the player whose turn comes next.
    fn swap_with_next(&mut self, active: usize) -> bool {
        let Some(other) = self.turns.upcoming().next() else {
            debug!("nobody to swap places with");
            return false;
        };
        let mine = self.players[active].current_room().to_string();
        let theirs = self.players[other].current_room().to_string();
        self.players[active].enter(&theirs);
        self.players[other].enter(&mine);
        info!(
            "{} swaps places with {}",
            self.players[active].name(),
            self.players[other].name()
        );
        true
    }

    /// Every player moves to the room of the next player in seating order.
    fn rotate_positions(&mut self) -> bool {
        if self.players.len() < 2 {
            debug!("nobody to swap places with");
            return false;
        }
        let rooms: Vec<String> = self
            .players
            .iter()
            .map(|player| player.current_room().to_string())
            .collect();
        for (seat, player) in self.players.iter_mut().enumerate() {
            player.enter(&rooms[(seat + 1) % rooms.len()]);
        }
        info!("all players swap places");
        true
    }

    fn refresh_outcome(&mut self) {
        if self.outcome.is_finished() {
            return;
        }
        let player = self.player();
        if !player.is_alive() {
            info!("{} has fallen", player.name());
            self.outcome = Outcome::Defeat;
        } else if self
            .current_room()
            .is_some_and(|room| matches!(room.kind, RoomKind::Treasure))
        {
            info!("{} found the treasure", player.name());
            self.outcome = Outcome::Victory;
        }
    }
}

fn corridor_key(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}
