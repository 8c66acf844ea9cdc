//! Searches over the maze graph.
//!
//! Every search visits neighbours in corridor-insertion order, so results
//! are reproducible for identical maps.

use log::debug;

use super::{Maze, MazeError, Room};
use crate::collections::{ArrayStack, LinkedQueue, LinkedStack, Stack};

/// A walk through the maze together with the summed corridor weights.
#[derive(Debug, Clone, PartialEq)]
pub struct MazePath<'a> {
    pub rooms: Vec<&'a Room>,
    pub cost: f64,
}

impl MazePath<'_> {
    pub fn ids(&self) -> Vec<&str> {
        self.rooms.iter().map(|room| room.id.as_str()).collect()
    }

    /// Number of corridors walked.
    pub fn steps(&self) -> usize {
        self.rooms.len().saturating_sub(1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    pub has_entrance: bool,
    pub has_treasure: bool,
    pub treasure_reachable: bool,
    /// Rooms no walk from the entrance can reach.
    pub unreachable_rooms: Vec<String>,
}

impl Validation {
    pub fn is_playable(&self) -> bool {
        self.has_entrance && self.has_treasure && self.treasure_reachable
    }
}

impl Maze {
    /// Rooms reachable from `start` in breadth-first order.
    pub fn breadth_first(&self, start: &str) -> Result<Vec<&Room>, MazeError> {
        let start = self.position(start)?;
        Ok(self
            .bfs_positions(start)
            .into_iter()
            .map(|position| self.room_at(position))
            .collect())
    }

    /// Rooms reachable from `start` in depth-first order.
    pub fn depth_first(&self, start: &str) -> Result<Vec<&Room>, MazeError> {
        let start = self.position(start)?;
        let mut visited = vec![false; self.room_count()];
        let mut order = Vec::new();
        let mut stack = LinkedStack::new();

        stack.push(start);
        visited[start] = true;
        order.push(self.room_at(start));

        while let Ok(&current) = stack.peek() {
            let next = self
                .neighbor_positions(current)
                .map(|(position, _)| position)
                .find(|&position| !visited[position]);
            match next {
                Some(position) => {
                    visited[position] = true;
                    order.push(self.room_at(position));
                    stack.push(position);
                }
                None => {
                    let _ = stack.pop();
                }
            }
        }
        Ok(order)
    }

    /// Whether the treasure room can be reached from the entrance. A maze
    /// without either room is never solvable.
    pub fn is_treasure_reachable(&self) -> bool {
        match (self.entrance(), self.treasure_room()) {
            (Some(entrance), Some(treasure)) => self.is_reachable(&entrance.id, &treasure.id),
            _ => false,
        }
    }

    pub fn is_reachable(&self, from: &str, to: &str) -> bool {
        match (self.position(from), self.position(to)) {
            (Ok(from), Ok(to)) => self.bfs_positions(from).contains(&to),
            _ => false,
        }
    }

    /// First path from `from` to `to` found by backtracking depth-first
    /// search. Not necessarily the cheapest; see [`Maze::shortest_path`].
    pub fn find_path(&self, from: &str, to: &str) -> Result<Option<MazePath<'_>>, MazeError> {
        let start = self.position(from)?;
        let goal = self.position(to)?;

        let mut on_path = vec![false; self.room_count()];
        let mut dead = vec![false; self.room_count()];
        // Each frame: room position, how many of its corridors were tried,
        // and the weight of the corridor that led here.
        let mut path: ArrayStack<(usize, usize, f64)> = ArrayStack::new();
        path.push((start, 0, 0.0));
        on_path[start] = true;

        while let Ok(&(current, tried, _)) = path.peek() {
            if current == goal {
                break;
            }
            let candidate = self
                .neighbor_positions(current)
                .enumerate()
                .skip(tried)
                .find(|(_, (position, _))| !on_path[*position] && !dead[*position]);

            match candidate {
                Some((slot, (position, weight))) => {
                    if let Ok(frame) = path.peek_mut() {
                        frame.1 = slot + 1;
                    }
                    path.push((position, 0, weight));
                    on_path[position] = true;
                }
                None => {
                    let Ok((room, _, _)) = path.pop() else { break };
                    debug!("dead end at {}, backtracking", self.room_at(room).id);
                    on_path[room] = false;
                    dead[room] = true;
                }
            }
        }

        if path.is_empty() {
            return Ok(None);
        }
        let rooms = path
            .iter_from_bottom()
            .map(|&(position, _, _)| self.room_at(position))
            .collect();
        let cost = path.iter_from_bottom().map(|&(_, _, weight)| weight).sum();
        Ok(Some(MazePath { rooms, cost }))
    }

    /// Cheapest path by summed corridor weight (Dijkstra). Ties keep the
    /// room that was added first.
    pub fn shortest_path(&self, from: &str, to: &str) -> Result<Option<MazePath<'_>>, MazeError> {
        let start = self.position(from)?;
        let goal = self.position(to)?;
        let count = self.room_count();

        let mut distance = vec![f64::INFINITY; count];
        let mut settled = vec![false; count];
        let mut predecessor: Vec<Option<usize>> = vec![None; count];
        distance[start] = 0.0;

        for _ in 0..count {
            let next = (0..count)
                .filter(|&i| !settled[i] && distance[i].is_finite())
                .fold(None, |best: Option<usize>, i| match best {
                    Some(b) if distance[b] <= distance[i] => Some(b),
                    _ => Some(i),
                });
            let Some(current) = next else { break };
            settled[current] = true;
            if current == goal {
                break;
            }
            for (neighbor, weight) in self.neighbor_positions(current) {
                if !settled[neighbor] && distance[current] + weight < distance[neighbor] {
                    distance[neighbor] = distance[current] + weight;
                    predecessor[neighbor] = Some(current);
                }
            }
        }

        if !distance[goal].is_finite() {
            return Ok(None);
        }

        let mut route = LinkedStack::new();
        let mut current = Some(goal);
        while let Some(position) = current {
            route.push(position);
            current = predecessor[position];
        }
        let mut rooms = Vec::with_capacity(route.len());
        while let Ok(position) = route.pop() {
            rooms.push(self.room_at(position));
        }
        Ok(Some(MazePath {
            rooms,
            cost: distance[goal],
        }))
    }

    /// Solvability report run before play starts.
    pub fn validate(&self) -> Validation {
        let entrance = self.entrance();
        let reached = entrance
            .and_then(|room| self.position(&room.id).ok())
            .map(|start| self.bfs_positions(start))
            .unwrap_or_default();

        let mut seen = vec![false; self.room_count()];
        for &position in &reached {
            seen[position] = true;
        }
        let unreachable_rooms = self
            .rooms()
            .zip(seen)
            .filter(|(_, seen)| !seen)
            .map(|(room, _)| room.id.clone())
            .collect();

        Validation {
            has_entrance: entrance.is_some(),
            has_treasure: self.treasure_room().is_some(),
            treasure_reachable: self.is_treasure_reachable(),
            unreachable_rooms,
        }
    }

    fn bfs_positions(&self, start: usize) -> Vec<usize> {
        let mut visited = vec![false; self.room_count()];
        let mut frontier = LinkedQueue::new();
        let mut order = Vec::new();

        frontier.enqueue(start);
        visited[start] = true;
        while let Ok(current) = frontier.dequeue() {
            order.push(current);
            for (neighbor, _) in self.neighbor_positions(current) {
                if !visited[neighbor] {
                    visited[neighbor] = true;
                    frontier.enqueue(neighbor);
                }
            }
        }
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(rooms: &[&Room]) -> Vec<String> {
        rooms.iter().map(|room| room.id.clone()).collect()
    }

    //   E --1-- A --1-- T
    //   |               |
    //   5       D       1
    //   |               |
    //   B ------1------ C
    fn diamond() -> Maze {
        let mut maze = Maze::new();
        maze.add_room(Room::entrance("E", "start")).unwrap();
        maze.add_room(Room::standard("A", "a")).unwrap();
        maze.add_room(Room::standard("B", "b")).unwrap();
        maze.add_room(Room::standard("C", "c")).unwrap();
        maze.add_room(Room::treasure("T", "goal")).unwrap();
        maze.add_room(Room::standard("D", "detached")).unwrap();
        maze.add_corridor("E", "B", 5.0, None).unwrap();
        maze.add_corridor("E", "A", 1.0, None).unwrap();
        maze.add_corridor("B", "C", 1.0, None).unwrap();
        maze.add_corridor("C", "T", 1.0, None).unwrap();
        maze.add_corridor("A", "T", 1.0, None).unwrap();
        maze
    }

    #[test]
    fn breadth_first_visits_in_corridor_order() {
        let maze = diamond();
        let order = maze.breadth_first("E").unwrap();
        assert_eq!(ids(&order), vec!["E", "B", "A", "C", "T"]);
    }

    #[test]
    fn depth_first_goes_deep_before_wide() {
        let maze = diamond();
        let order = maze.depth_first("E").unwrap();
        assert_eq!(ids(&order), vec!["E", "B", "C", "T", "A"]);
    }

    #[test]
    fn unknown_start_is_an_error() {
        let maze = diamond();
        assert_eq!(
            maze.breadth_first("Z").unwrap_err(),
            MazeError::UnknownRoom("Z".into())
        );
    }

    #[test]
    fn treasure_reachability() {
        let maze = diamond();
        assert!(maze.is_treasure_reachable());
        assert!(!maze.is_reachable("E", "D"));

        let mut split = Maze::new();
        split.add_room(Room::entrance("E", "start")).unwrap();
        split.add_room(Room::standard("S", "side")).unwrap();
        split.add_room(Room::treasure("T", "goal")).unwrap();
        split.add_corridor("E", "S", 1.0, None).unwrap();
        assert!(!split.is_treasure_reachable());
        assert!(!Maze::new().is_treasure_reachable());
    }

    #[test]
    fn find_path_backtracks_in_insertion_order() {
        let maze = diamond();
        let path = maze.find_path("E", "T").unwrap().unwrap();
        assert_eq!(path.ids(), vec!["E", "B", "C", "T"]);
        assert_eq!(path.cost, 7.0);
        assert_eq!(path.steps(), 3);
    }

    #[test]
    fn find_path_recovers_from_dead_ends() {
        let mut maze = Maze::new();
        for id in ["E", "X", "Y", "T"] {
            maze.add_room(Room::standard(id, id)).unwrap();
        }
        maze.add_corridor("E", "X", 1.0, None).unwrap();
        maze.add_corridor("X", "Y", 1.0, None).unwrap();
        maze.add_corridor("E", "T", 4.0, None).unwrap();
        let path = maze.find_path("E", "T").unwrap().unwrap();
        assert_eq!(path.ids(), vec!["E", "T"]);
        assert_eq!(path.cost, 4.0);
    }

    #[test]
    fn find_path_to_detached_room_is_none() {
        let maze = diamond();
        assert!(maze.find_path("E", "D").unwrap().is_none());
        let same = maze.find_path("E", "E").unwrap().unwrap();
        assert_eq!(same.ids(), vec!["E"]);
        assert_eq!(same.cost, 0.0);
    }

    #[test]
    fn shortest_path_prefers_cheaper_route() {
        let maze = diamond();
        let path = maze.shortest_path("E", "T").unwrap().unwrap();
        assert_eq!(path.ids(), vec!["E", "A", "T"]);
        assert_eq!(path.cost, 2.0);
        assert!(maze.shortest_path("E", "D").unwrap().is_none());
    }

    #[test]
    fn validation_lists_unreachable_rooms() {
        let report = diamond().validate();
        assert!(report.is_playable());
        assert_eq!(report.unreachable_rooms, vec!["D".to_string()]);

        let empty = Maze::new().validate();
        assert!(!empty.is_playable());
        assert!(!empty.has_entrance);
        assert!(empty.unreachable_rooms.is_empty());
    }
}
