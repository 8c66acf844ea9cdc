use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, info, warn};

use super::types::{CorridorEntry, EventEntry, ItemEntry, MapDocument, RoomEntry};
use crate::collections::UnorderedList;
use crate::maze::{Effect, Item, Maze, RandomEvent, Riddle, Room, RoomKind};

const UNKNOWN_MAP: &str = "Unknown map";

/// Loads a map file. A missing or malformed file gives an empty maze, and
/// individual rooms or corridors that don't fit are skipped.
pub fn load_maze(path: &Path, riddles: UnorderedList<Riddle>) -> Maze {
    match read_maze(path, riddles) {
        Ok(maze) => maze,
        Err(e) => {
            warn!("map not loaded, starting with an empty maze: {:#}", e);
            Maze::new()
        }
    }
}

fn read_maze(path: &Path, riddles: UnorderedList<Riddle>) -> Result<Maze> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read map file {}", path.display()))?;
    let document: MapDocument = serde_json::from_str(&content)
        .with_context(|| format!("invalid map file {}", path.display()))?;
    Ok(build_maze(document, riddles))
}

/// Builds a maze from an already parsed document.
pub fn build_maze(document: MapDocument, riddles: UnorderedList<Riddle>) -> Maze {
    let name = document.nome.unwrap_or_else(|| {
        warn!("map has no 'nome', using '{}'", UNKNOWN_MAP);
        UNKNOWN_MAP.to_string()
    });
    let mut maze = Maze::named(name);
    let mut pool = RiddlePool::new(riddles);

    for raw in document.salas {
        let entry: RoomEntry = match serde_json::from_value(raw) {
            Ok(entry) => entry,
            Err(e) => {
                warn!("skipping room entry: {}", e);
                continue;
            }
        };
        if entry.id.trim().is_empty() {
            warn!("skipping room without an id");
            continue;
        }
        let kind = room_kind(entry.tipo.as_deref(), &mut pool);
        if let Err(e) = maze.add_room(Room::new(entry.id, entry.descricao, kind)) {
            warn!("skipping room: {}", e);
        }
    }

    for raw in document.ligacoes {
        let entry: CorridorEntry = match serde_json::from_value(raw) {
            Ok(entry) => entry,
            Err(e) => {
                warn!("skipping corridor entry: {}", e);
                continue;
            }
        };
        let event = entry.evento.map(event_from_entry);
        if let Err(e) = maze.add_corridor(&entry.de, &entry.para, entry.custo, event) {
            warn!("skipping corridor: {}", e);
        }
    }

    info!(
        "loaded map '{}': {} rooms, {} corridors",
        maze.name().unwrap_or(UNKNOWN_MAP),
        maze.room_count(),
        maze.corridor_count()
    );
    maze
}

fn room_kind(code: Option<&str>, pool: &mut RiddlePool) -> RoomKind {
    let Some(code) = code else {
        return RoomKind::Standard;
    };
    match code.trim().to_uppercase().as_str() {
        "ENTRADA" => RoomKind::Entrance,
        "TESOURO" | "CENTER" => RoomKind::Treasure,
        "ENIGMA" => RoomKind::Riddle(pool.draw()),
        "NORMAL" => RoomKind::Standard,
        other => {
            debug!("unknown room type '{}', treating as standard", other);
            RoomKind::Standard
        }
    }
}

fn parse_effect(code: Option<&str>) -> Effect {
    match code.filter(|code| !code.trim().is_empty()) {
        None => Effect::None,
        Some(code) => Effect::from_code(code).unwrap_or_else(|| {
            warn!("unknown effect '{}', event will only be descriptive", code);
            Effect::None
        }),
    }
}

fn event_from_entry(entry: EventEntry) -> RandomEvent {
    let description = entry
        .descricao
        .unwrap_or_else(|| "A mysterious event".to_string());
    let item = entry
        .item
        .map(|item| Item::new(item.nome, parse_effect(item.efeito.as_deref())));
    RandomEvent::new(description, parse_effect(entry.efeito.as_deref()), item)
}

/// Hands riddles out in file order and starts over once all have been used.
struct RiddlePool {
    available: UnorderedList<Riddle>,
    used: UnorderedList<Riddle>,
}

impl RiddlePool {
    fn new(available: UnorderedList<Riddle>) -> Self {
        RiddlePool {
            available,
            used: UnorderedList::new(),
        }
    }

    fn draw(&mut self) -> Option<Riddle> {
        if self.available.is_empty() && !self.used.is_empty() {
            debug!("all riddles handed out, recycling the pool");
            while let Ok(riddle) = self.used.remove_first() {
                self.available.add_to_rear(riddle);
            }
        }
        let riddle = self.available.remove_first().ok()?;
        self.used.add_to_rear(riddle.clone());
        Some(riddle)
    }
}

/// Writes `maze` in the same layout [`load_maze`] reads.
pub fn save_maze(maze: &Maze, path: &Path) -> Result<()> {
    let mut document = MapDocument {
        nome: maze.name().map(str::to_string),
        ..MapDocument::default()
    };
    for room in maze.rooms() {
        let entry = RoomEntry {
            id: room.id.clone(),
            tipo: Some(room.kind.code().to_string()),
            descricao: room.description.clone(),
        };
        document.salas.push(serde_json::to_value(entry)?);
    }
    for corridor in maze.corridors() {
        let entry = CorridorEntry {
            de: corridor.from().to_string(),
            para: corridor.to().to_string(),
            custo: corridor.weight(),
            evento: corridor.event().map(|event| EventEntry {
                descricao: Some(event.description.clone()),
                efeito: Some(event.effect.code().to_string()),
                item: event.item().map(|item| ItemEntry {
                    nome: item.name.clone(),
                    efeito: Some(item.effect.code().to_string()),
                }),
            }),
        };
        document.ligacoes.push(serde_json::to_value(entry)?);
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("cannot create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(&document)?;
    std::fs::write(path, json).with_context(|| format!("cannot write {}", path.display()))?;
    info!("saved map to {}", path.display());
    Ok(())
}

/// Map files in `dir`, sorted by file name.
pub fn list_maps(dir: &Path) -> Vec<PathBuf> {
    let pattern = dir.join("*.json");
    let Some(pattern) = pattern.to_str() else {
        return Vec::new();
    };
    let mut maps: Vec<PathBuf> = match glob::glob(pattern) {
        Ok(paths) => paths.filter_map(|entry| entry.ok()).collect(),
        Err(e) => {
            warn!("bad map pattern {}: {}", pattern, e);
            Vec::new()
        }
    };
    maps.sort();
    maps
}

#[cfg(test)]
mod tests {
    use super::*;

    fn riddles(n: usize) -> UnorderedList<Riddle> {
        (1..=n)
            .map(|i| Riddle::new(format!("Q{}", i), i.to_string()))
            .collect()
    }

    #[test]
    fn riddle_pool_recycles() {
        let mut pool = RiddlePool::new(riddles(2));
        let drawn: Vec<_> = (0..5)
            .map(|_| pool.draw().unwrap().question().to_string())
            .collect();
        assert_eq!(drawn, vec!["Q1", "Q2", "Q1", "Q2", "Q1"]);
        assert!(RiddlePool::new(UnorderedList::new()).draw().is_none());
    }

    #[test]
    fn bad_entries_are_skipped() {
        let document: MapDocument = serde_json::from_str(
            r#"{
                "salas": [
                    {"id": "E1", "tipo": "ENTRADA", "descricao": "porta"},
                    {"id": "", "tipo": "NORMAL"},
                    {"tipo": "NORMAL"},
                    {"id": "E1", "tipo": "NORMAL", "descricao": "dup"},
                    {"id": "X", "tipo": "ALAVANCA", "descricao": "lever"},
                    {"id": "R1", "tipo": "enigma", "descricao": "esfinge"}
                ],
                "ligacoes": [
                    {"de": "E1", "para": "X", "custo": 3},
                    {"origem": "X", "destino": "R1"},
                    {"de": "E1", "para": "nowhere", "custo": 1},
                    {"de": "E1", "para": "R1", "custo": -2},
                    {"de": "R1", "para": "E1", "custo": "abc"},
                    {"de": "E1"}
                ]
            }"#,
        )
        .unwrap();
        let maze = build_maze(document, riddles(1));
        assert_eq!(maze.name(), Some(UNKNOWN_MAP));
        assert_eq!(maze.room_count(), 3);
        assert_eq!(maze.corridor_count(), 3);
        assert_eq!(maze.corridor_between("E1", "R1").unwrap().weight(), 1.0);
        assert_eq!(maze.room("X").unwrap().kind, RoomKind::Standard);
        assert_eq!(maze.corridor_between("R1", "X").unwrap().weight(), 1.0);
        assert_eq!(maze.room("R1").unwrap().riddle_ref().unwrap().question(), "Q1");
    }

    #[test]
    fn event_effects_are_parsed_leniently() {
        let event = event_from_entry(EventEntry {
            descricao: None,
            efeito: Some("teleport".into()),
            item: Some(ItemEntry {
                nome: "Escudo".into(),
                efeito: Some("bonus_power".into()),
            }),
        });
        assert_eq!(event.effect, Effect::None);
        assert_eq!(event.description, "A mysterious event");
        assert_eq!(event.item().unwrap().effect, Effect::BonusPower);
    }

    #[test]
    fn saved_map_loads_back_the_same_graph() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("maps").join("saved.json");

        let mut maze = Maze::named("saved");
        maze.add_room(Room::entrance("E1", "Entrada")).unwrap();
        maze.add_room(Room::riddle("R1", "Esfinge", None)).unwrap();
        maze.add_room(Room::treasure("C1", "Tesouro")).unwrap();
        let event = RandomEvent::new("Armadilha", Effect::Trap, None);
        maze.add_corridor("E1", "R1", 2.5, Some(event)).unwrap();
        maze.add_corridor("R1", "C1", 1.0, None).unwrap();
        save_maze(&maze, &path).unwrap();

        let loaded = load_maze(&path, UnorderedList::new());
        assert_eq!(loaded.name(), Some("saved"));
        let ids: Vec<_> = loaded.rooms().map(|r| r.kind.code()).collect();
        assert_eq!(ids, vec!["ENTRADA", "ENIGMA", "TESOURO"]);
        let corridor = loaded.corridor_between("R1", "E1").unwrap();
        assert_eq!(corridor.weight(), 2.5);
        assert_eq!(corridor.event().unwrap().effect, Effect::Trap);
        assert_eq!(list_maps(&dir.path().join("maps")), vec![path]);
    }
}
