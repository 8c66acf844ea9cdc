use log::debug;

use crate::collections::LinkedQueue;

/// Hot-seat rotation over player positions.
///
/// The active player is held apart from the queue of players waiting for
/// their turn. Passing the turn puts the active player at the back and
/// takes the next one from the front, honouring pending skips and extra
/// turns.
#[derive(Debug)]
pub struct TurnOrder {
    active: usize,
    waiting: LinkedQueue<usize>,
    skipping: Vec<bool>,
    extra: Vec<u32>,
    turn: u32,
}

impl TurnOrder {
    /// Rotation for `players` seats, starting with seat 0. A table needs at
    /// least one seat.
    pub fn new(players: usize) -> Option<Self> {
        if players == 0 {
            return None;
        }
        Some(TurnOrder {
            active: 0,
            waiting: (1..players).collect(),
            skipping: vec![false; players],
            extra: vec![0; players],
            turn: 1,
        })
    }

    pub fn active(&self) -> usize {
        self.active
    }

    /// Turns started so far, counting the first.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Seats in the order they will play after the active one.
    pub fn upcoming(&self) -> impl Iterator<Item = usize> + '_ {
        self.waiting.iter().copied()
    }

    /// `player` loses their next turn.
    pub fn skip_next(&mut self, player: usize) {
        if let Some(flag) = self.skipping.get_mut(player) {
            *flag = true;
        }
    }

    /// `player` plays again once the current turn ends.
    pub fn grant_extra(&mut self, player: usize) {
        if let Some(extra) = self.extra.get_mut(player) {
            *extra += 1;
        }
    }

    pub fn is_skipping(&self, player: usize) -> bool {
        self.skipping.get(player).copied().unwrap_or(false)
    }

    /// Ends the active turn and returns the seat that plays next.
    ///
    /// An extra turn keeps the active player in place. A player marked to
    /// skip goes straight to the back of the queue and the mark is cleared,
    /// so the loop always settles on someone.
    pub fn pass(&mut self) -> usize {
        self.turn += 1;
        if self.extra[self.active] > 0 {
            self.extra[self.active] -= 1;
            debug!("seat {} takes an extra turn", self.active);
            return self.active;
        }
        self.waiting.enqueue(self.active);
        while let Ok(next) = self.waiting.dequeue() {
            if self.skipping[next] {
                self.skipping[next] = false;
                debug!("seat {} skips this turn", next);
                self.waiting.enqueue(next);
                continue;
            }
            self.active = next;
            break;
        }
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order_of(turns: &mut TurnOrder, passes: usize) -> Vec<usize> {
        let mut seen = vec![turns.active()];
        for _ in 0..passes {
            seen.push(turns.pass());
        }
        seen
    }

    #[test]
    fn seats_rotate_in_order() {
        let mut turns = TurnOrder::new(3).unwrap();
        assert_eq!(turns.upcoming().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(order_of(&mut turns, 6), vec![0, 1, 2, 0, 1, 2, 0]);
        assert_eq!(turns.turn(), 7);
    }

    #[test]
    fn empty_table_has_no_rotation() {
        assert!(TurnOrder::new(0).is_none());
    }

    #[test]
    fn skipped_seat_loses_one_turn() {
        let mut turns = TurnOrder::new(3).unwrap();
        turns.skip_next(1);
        assert!(turns.is_skipping(1));
        assert_eq!(order_of(&mut turns, 4), vec![0, 2, 0, 1, 2]);
        assert!(!turns.is_skipping(1));
    }

    #[test]
    fn extra_turn_repeats_the_active_seat() {
        let mut turns = TurnOrder::new(2).unwrap();
        turns.grant_extra(0);
        assert_eq!(order_of(&mut turns, 4), vec![0, 0, 1, 0, 1]);
    }

    #[test]
    fn lone_player_always_plays() {
        let mut turns = TurnOrder::new(1).unwrap();
        turns.skip_next(0);
        assert_eq!(order_of(&mut turns, 2), vec![0, 0, 0]);
        assert!(turns.upcoming().next().is_none());
    }
}
