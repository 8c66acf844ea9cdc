use std::collections::HashMap;
use std::fmt;

use log::debug;

use super::{Corridor, MazeError, RandomEvent, Room};

/// Weighted, undirected graph of rooms for one play session.
///
/// Rooms keep their insertion order, and every room's corridor list keeps
/// the order corridors were added, so traversals over identical input maps
/// always visit rooms in the same order.
#[derive(Debug, Clone, Default)]
pub struct Maze {
    name: Option<String>,
    rooms: Vec<Room>,
    index: HashMap<String, usize>,
    corridors: Vec<Corridor>,
    adjacency: Vec<Vec<usize>>,
}

impl Maze {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(name: impl Into<String>) -> Self {
        Maze {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    pub fn add_room(&mut self, room: Room) -> Result<(), MazeError> {
        if self.index.contains_key(&room.id) {
            return Err(MazeError::DuplicateRoom(room.id));
        }
        debug!("adding room {} ({})", room.id, room.kind.label());
        self.index.insert(room.id.clone(), self.rooms.len());
        self.rooms.push(room);
        self.adjacency.push(Vec::new());
        Ok(())
    }

    pub fn add_corridor(
        &mut self,
        from: &str,
        to: &str,
        weight: f64,
        event: Option<RandomEvent>,
    ) -> Result<(), MazeError> {
        let a = self.position(from)?;
        let b = self.position(to)?;
        let corridor = Corridor::new(from, to, weight, event)?;

        debug!("adding corridor {}", corridor);
        let slot = self.corridors.len();
        self.corridors.push(corridor);
        self.adjacency[a].push(slot);
        if a != b {
            self.adjacency[b].push(slot);
        }
        Ok(())
    }

    pub fn room(&self, id: &str) -> Option<&Room> {
        self.index.get(id).map(|&i| &self.rooms[i])
    }

    pub fn contains_room(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// All rooms in insertion order.
    pub fn rooms(&self) -> impl Iterator<Item = &Room> + '_ {
        self.rooms.iter()
    }

    /// All corridors in insertion order.
    pub fn corridors(&self) -> impl Iterator<Item = &Corridor> + '_ {
        self.corridors.iter()
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn corridor_count(&self) -> usize {
        self.corridors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Rooms one corridor away from `id`, in corridor order. Unknown rooms
    /// have no neighbours. Clone the iterator to walk the list again.
    pub fn neighbors<'a>(&'a self, id: &str) -> Neighbors<'a> {
        let slots = self
            .index
            .get(id)
            .map(|&i| self.adjacency[i].as_slice())
            .unwrap_or(&[]);
        Neighbors {
            maze: self,
            origin: self.index.get(id).copied(),
            slots: slots.iter(),
        }
    }

    /// Corridors leaving `id`, in the order they were added.
    pub fn corridors_from<'a>(&'a self, id: &str) -> impl Iterator<Item = &'a Corridor> + 'a {
        let slots = self
            .index
            .get(id)
            .map(|&i| self.adjacency[i].as_slice())
            .unwrap_or(&[]);
        slots.iter().map(move |&slot| &self.corridors[slot])
    }

    /// First corridor joining `a` and `b`, whichever way round they are given.
    pub fn corridor_between(&self, a: &str, b: &str) -> Option<&Corridor> {
        self.corridors_from(a).find(|corridor| corridor.connects(a, b))
    }

    pub fn entrance(&self) -> Option<&Room> {
        self.rooms.iter().find(|room| room.is_entrance())
    }

    pub fn treasure_room(&self) -> Option<&Room> {
        self.rooms.iter().find(|room| room.is_treasure())
    }

    /// Exit list for the console, e.g. `S1 | R2 | `.
    pub fn available_exits(&self, id: &str) -> String {
        if !self.contains_room(id) {
            return String::from("none");
        }
        let mut exits = String::new();
        for room in self.neighbors(id) {
            exits.push_str(&room.id);
            exits.push_str(" | ");
        }
        if exits.is_empty() {
            return String::from("no exits (dead end)");
        }
        exits
    }

    pub(crate) fn position(&self, id: &str) -> Result<usize, MazeError> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| MazeError::UnknownRoom(id.to_string()))
    }

    pub(crate) fn room_at(&self, position: usize) -> &Room {
        &self.rooms[position]
    }

    /// `(neighbour position, corridor weight)` pairs in corridor order.
    pub(crate) fn neighbor_positions(&self, position: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.adjacency[position]
            .iter()
            .map(move |&slot| self.edge_target(position, slot))
    }

    fn edge_target(&self, origin: usize, slot: usize) -> (usize, f64) {
        let corridor = &self.corridors[slot];
        let other = corridor
            .other_end(&self.rooms[origin].id)
            .unwrap_or(corridor.to());
        (self.index[other], corridor.weight())
    }
}

#[derive(Clone)]
pub struct Neighbors<'a> {
    maze: &'a Maze,
    origin: Option<usize>,
    slots: std::slice::Iter<'a, usize>,
}

impl<'a> Iterator for Neighbors<'a> {
    type Item = &'a Room;

    fn next(&mut self) -> Option<Self::Item> {
        let origin = self.origin?;
        let slot = *self.slots.next()?;
        let (position, _) = self.maze.edge_target(origin, slot);
        Some(&self.maze.rooms[position])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.slots.size_hint()
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Maze {}:", self.name.as_deref().unwrap_or("(unnamed)"))?;
        for (position, room) in self.rooms.iter().enumerate() {
            write!(f, "  {} {} ->", room.id, room.kind.label())?;
            for &slot in &self.adjacency[position] {
                let (target, weight) = self.edge_target(position, slot);
                write!(f, " {}({})", self.rooms[target].id, weight)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
