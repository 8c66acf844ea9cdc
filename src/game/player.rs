use crate::collections::{LinkedStack, Stack, UnorderedList};
use crate::maze::Item;

pub const DEFAULT_HEALTH: i64 = 100;

#[derive(Debug, Clone)]
pub struct Player {
    name: String,
    current_room: String,
    health: i64,
    history: LinkedStack<String>,
    inventory: UnorderedList<Item>,
    solved_riddles: UnorderedList<String>,
    applied_effects: UnorderedList<String>,
    encountered_events: UnorderedList<String>,
    moves: u32,
    distance: f64,
}

impl Player {
    pub fn new(name: impl Into<String>, start_room: impl Into<String>, health: i64) -> Self {
        let start_room = start_room.into();
        let mut history = LinkedStack::new();
        history.push(start_room.clone());
        Player {
            name: name.into(),
            current_room: start_room,
            health: health.max(0),
            history,
            inventory: UnorderedList::new(),
            solved_riddles: UnorderedList::new(),
            applied_effects: UnorderedList::new(),
            encountered_events: UnorderedList::new(),
            moves: 0,
            distance: 0.0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn current_room(&self) -> &str {
        &self.current_room
    }

    pub fn health(&self) -> i64 {
        self.health
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Summed weight of every corridor walked.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn inventory(&self) -> &UnorderedList<Item> {
        &self.inventory
    }

    pub fn solved_riddles(&self) -> &UnorderedList<String> {
        &self.solved_riddles
    }

    pub fn applied_effects(&self) -> &UnorderedList<String> {
        &self.applied_effects
    }

    pub fn encountered_events(&self) -> &UnorderedList<String> {
        &self.encountered_events
    }

    /// Rooms visited, most recent first.
    pub fn history(&self) -> &LinkedStack<String> {
        &self.history
    }

    /// Rooms visited, oldest first.
    pub fn path_taken(&self) -> Vec<String> {
        let mut path: Vec<String> = self.history.iter().cloned().collect();
        path.reverse();
        path
    }

    pub(crate) fn enter(&mut self, room: &str) {
        self.current_room = room.to_string();
        self.history.push(room.to_string());
    }

    pub(crate) fn record_walk(&mut self, weight: f64) {
        self.moves += 1;
        self.distance += weight;
    }

    /// Applies `delta` and returns the new health, never below zero.
    pub(crate) fn adjust_health(&mut self, delta: i64) -> i64 {
        self.health = (self.health + delta).max(0);
        self.health
    }

    /// Walks back up to `steps` rooms along the history. Returns the room the
    /// player ends up in, or `None` when there is nowhere to go back to.
    pub(crate) fn recede(&mut self, steps: usize) -> Option<&str> {
        if steps == 0 || self.history.len() <= 1 {
            return None;
        }
        let _ = self.history.pop();
        let mut target = None;
        for _ in 0..steps {
            match self.history.pop() {
                Ok(room) => target = Some(room),
                Err(_) => break,
            }
        }
        let target = target?;
        self.enter(&target);
        Some(self.current_room.as_str())
    }

    pub(crate) fn take_item(&mut self, item: Item) {
        self.inventory.add_to_rear(item);
    }

    pub(crate) fn drop_item(&mut self, name: &str) -> Option<Item> {
        let found = self
            .inventory
            .iter()
            .find(|item| item.name.eq_ignore_ascii_case(name))
            .cloned()?;
        self.inventory.remove(&found).ok()
    }

    pub(crate) fn record_riddle(&mut self, question: &str) {
        self.solved_riddles.add_to_rear(question.to_string());
    }

    pub(crate) fn record_effect(&mut self, effect: &str) {
        self.applied_effects.add_to_rear(effect.to_string());
    }

    pub(crate) fn record_event(&mut self, description: &str) {
        self.encountered_events.add_to_rear(description.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::Effect;

    fn walked(rooms: &[&str]) -> Player {
        let mut player = Player::new("Ana", rooms[0], DEFAULT_HEALTH);
        for room in &rooms[1..] {
            player.enter(room);
        }
        player
    }

    #[test]
    fn health_never_drops_below_zero() {
        let mut player = Player::new("Ana", "E1", 10);
        assert_eq!(player.adjust_health(-25), 0);
        assert!(!player.is_alive());
        assert_eq!(player.adjust_health(20), 20);
    }

    #[test]
    fn recede_walks_back_along_history() {
        let mut player = walked(&["E1", "S1", "S2", "S3"]);
        assert_eq!(player.recede(2), Some("S1"));
        assert_eq!(player.path_taken(), vec!["E1", "S1"]);
        assert_eq!(player.recede(5), Some("E1"));
        assert_eq!(player.current_room(), "E1");
        assert_eq!(player.recede(1), None);
    }

    #[test]
    fn history_renders_most_recent_first() {
        let player = walked(&["E1", "S1", "C1"]);
        assert_eq!(player.history().to_string(), "[C1, S1, E1]");
    }

    #[test]
    fn items_can_be_dropped_by_name() {
        let mut player = Player::new("Ana", "E1", DEFAULT_HEALTH);
        player.take_item(Item::new("Pocao", Effect::Heal));
        assert!(player.drop_item("pocao").is_some());
        assert!(player.drop_item("Pocao").is_none());
        assert!(player.inventory().is_empty());
    }
}
