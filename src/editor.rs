use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use log::warn;

use crate::loader::save_maze;
use crate::maze::{Effect, Item, Maze, RandomEvent, Room, RoomKind};
use crate::menu::Console;

/// Interactive map builder. Mistakes are reported and the menu comes back.
pub struct MapEditor<'c, R, W> {
    console: &'c mut Console<R, W>,
    maze: Maze,
    maps_dir: PathBuf,
}

impl<'c, R: BufRead, W: Write> MapEditor<'c, R, W> {
    pub fn new(console: &'c mut Console<R, W>, maps_dir: impl Into<PathBuf>) -> Self {
        MapEditor {
            console,
            maze: Maze::new(),
            maps_dir: maps_dir.into(),
        }
    }

    /// Runs the menu until the user exits or input ends, and hands back the
    /// maze as it was left.
    pub fn run(mut self) -> io::Result<Maze> {
        loop {
            self.console.say("\n1. Add room")?;
            self.console.say("2. Add corridor")?;
            self.console.say("3. List rooms")?;
            self.console.say("4. Save map")?;
            self.console.say("5. Add corridor with event")?;
            self.console.say("0. Exit")?;
            let choice = self.console.read_choice("\nChoose an option: ", 5)?;
            let keep_going = match choice {
                Some(1) => self.add_room()?,
                Some(2) => self.add_corridor(false)?,
                Some(3) => {
                    let listing = self.maze.to_string();
                    self.console.say(&listing)?;
                    true
                }
                Some(4) => self.save()?,
                Some(5) => self.add_corridor(true)?,
                _ => false,
            };
            if !keep_going {
                return Ok(self.maze);
            }
        }
    }

    fn add_room(&mut self) -> io::Result<bool> {
        let Some(id) = self.console.read_line("ID: ")? else {
            return Ok(false);
        };
        let Some(code) = self.console.read_line("Type (ENTRADA, TESOURO, ENIGMA, NORMAL): ")? else {
            return Ok(false);
        };
        let Some(description) = self.console.read_line("Description: ")? else {
            return Ok(false);
        };
        if id.is_empty() {
            self.console.say("A room needs an id.")?;
            return Ok(true);
        }

        let kind = match code.to_uppercase().as_str() {
            "ENTRADA" => RoomKind::Entrance,
            "TESOURO" | "CENTER" => RoomKind::Treasure,
            "ENIGMA" => RoomKind::Riddle(None),
            _ => RoomKind::Standard,
        };
        match self.maze.add_room(Room::new(id, description, kind)) {
            Ok(()) => self.console.say("Room added.")?,
            Err(e) => self.console.say(&format!("Cannot add room: {}", e))?,
        }
        Ok(true)
    }

    fn add_corridor(&mut self, with_event: bool) -> io::Result<bool> {
        let Some(from) = self.console.read_line("From (ID): ")? else {
            return Ok(false);
        };
        let Some(to) = self.console.read_line("To (ID): ")? else {
            return Ok(false);
        };
        let Some(cost) = self.console.read_number("Cost: ")? else {
            return Ok(false);
        };
        let event = if with_event { Some(self.prompt_event()?) } else { None };

        match self.maze.add_corridor(&from, &to, cost, event) {
            Ok(()) => self.console.say("Corridor added.")?,
            Err(e) => self.console.say(&format!("Cannot add corridor: {}", e))?,
        }
        Ok(true)
    }

    fn prompt_event(&mut self) -> io::Result<RandomEvent> {
        let description = self
            .console
            .read_line("Event description: ")?
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| "A mysterious event".to_string());

        let codes: Vec<&str> = Effect::ALL.iter().map(|effect| effect.code()).collect();
        self.console.say(&format!("Effects: {}", codes.join(", ")))?;
        let effect = self.read_effect("Effect (empty for none): ")?;

        let item = match self.console.read_line("Item name (empty for none): ")? {
            Some(name) if !name.is_empty() => {
                let item_effect = self.read_effect("Item effect: ")?;
                Some(Item::new(name, item_effect))
            }
            _ => None,
        };
        Ok(RandomEvent::new(description, effect, item))
    }

    fn read_effect(&mut self, prompt: &str) -> io::Result<Effect> {
        let raw = self.console.read_line(prompt)?.unwrap_or_default();
        if raw.is_empty() {
            return Ok(Effect::None);
        }
        match Effect::from_code(&raw) {
            Some(effect) => Ok(effect),
            None => {
                self.console.say("Unknown effect, the event will only be descriptive.")?;
                Ok(Effect::None)
            }
        }
    }

    fn save(&mut self) -> io::Result<bool> {
        let Some(name) = self.console.read_line("File name (without .json): ")? else {
            return Ok(false);
        };
        let name = name.trim_end_matches(".json");
        if name.is_empty() {
            self.console.say("A file name is required.")?;
            return Ok(true);
        }
        self.maze.set_name(name);
        let path = self.maps_dir.join(format!("{}.json", name));
        match save_maze(&self.maze, &path) {
            Ok(()) => self.console.say(&format!("Map saved as {}", path.display()))?,
            Err(e) => {
                warn!("saving {} failed: {:#}", path.display(), e);
                self.console.say(&format!("Could not save the map: {:#}", e))?;
            }
        }
        Ok(true)
    }
}
