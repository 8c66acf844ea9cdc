use std::io::Write;
use std::path::Path;

use labyrinth::collections::UnorderedList;
use labyrinth::loader::{load_maze, load_riddles};
use labyrinth::maze::{Effect, RoomKind};
use tempfile::NamedTempFile;

const SAMPLE_MAP: &str = r#"{
    "nome": "Mapa de Teste",
    "salas": [
        {"id": "E1", "tipo": "ENTRADA", "descricao": "Portao de entrada"},
        {"id": "S1", "tipo": "NORMAL", "descricao": "Sala vazia"},
        {"id": "R1", "tipo": "ENIGMA", "descricao": "Camara da esfinge"},
        {"id": "C1", "tipo": "TESOURO", "descricao": "Camara do tesouro"}
    ],
    "ligacoes": [
        {"de": "E1", "para": "S1", "custo": 2.0,
         "evento": {"descricao": "Uma fonte", "efeito": "HEAL",
                    "item": {"nome": "Pocao", "efeito": "HEAL"}}},
        {"de": "S1", "para": "R1", "custo": 1.5},
        {"de": "R1", "para": "C1", "custo": 3}
    ]
}"#;

const SAMPLE_RIDDLES: &str = r#"[
    {"pergunta": "Quanto e 3 x 3?", "resposta": 9}
]"#;

fn write_temp(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn well_formed_map_reproduces_its_graph() {
    let riddles = write_temp(SAMPLE_RIDDLES);
    let map = write_temp(SAMPLE_MAP);
    let maze = load_maze(map.path(), load_riddles(riddles.path()));

    assert_eq!(maze.name(), Some("Mapa de Teste"));
    assert_eq!(maze.room_count(), 4);
    assert_eq!(maze.corridor_count(), 3);
    assert_eq!(maze.entrance().map(|r| r.id.as_str()), Some("E1"));
    assert_eq!(maze.treasure_room().map(|r| r.id.as_str()), Some("C1"));

    let first = maze.neighbors("E1").next().unwrap();
    assert_eq!(first.id, "S1");

    let corridor = maze.corridor_between("E1", "S1").unwrap();
    assert_eq!(corridor.weight(), 2.0);
    let event = corridor.event().unwrap();
    assert_eq!(event.effect, Effect::Heal);
    assert_eq!(event.item().unwrap().name, "Pocao");

    match &maze.room("R1").unwrap().kind {
        RoomKind::Riddle(Some(riddle)) => assert!(riddle.check_answer("9")),
        other => panic!("expected an assigned riddle, got {:?}", other),
    }
    assert!(maze.is_treasure_reachable());
}

#[test]
fn missing_files_degrade_to_empty_results() {
    let riddles = load_riddles(Path::new("nowhere/enigmas.json"));
    assert!(riddles.is_empty());

    let maze = load_maze(Path::new("nowhere/mapa.json"), riddles);
    assert!(maze.is_empty());
    assert!(maze.entrance().is_none());
    assert!(maze.treasure_room().is_none());
    assert!(!maze.is_treasure_reachable());
}

#[test]
fn malformed_map_is_an_empty_maze() {
    let map = write_temp("{ \"salas\": [ oops");
    let maze = load_maze(map.path(), UnorderedList::new());
    assert!(maze.entrance().is_none());
}

#[test]
fn disconnected_treasure_is_reported() {
    let map = write_temp(
        r#"{
            "nome": "Ilhas",
            "salas": [
                {"id": "E1", "tipo": "ENTRADA", "descricao": "a"},
                {"id": "S1", "tipo": "NORMAL", "descricao": "b"},
                {"id": "S2", "tipo": "NORMAL", "descricao": "c"},
                {"id": "C1", "tipo": "TESOURO", "descricao": "d"}
            ],
            "ligacoes": [
                {"de": "E1", "para": "S1", "custo": 1},
                {"de": "S2", "para": "C1", "custo": 1}
            ]
        }"#,
    );
    let maze = load_maze(map.path(), UnorderedList::new());
    assert!(!maze.is_treasure_reachable());

    let validation = maze.validate();
    assert!(validation.has_entrance && validation.has_treasure);
    assert!(!validation.is_playable());
    assert_eq!(validation.unreachable_rooms, vec!["S2".to_string(), "C1".to_string()]);
    assert_eq!(maze.find_path("E1", "C1").unwrap(), None);
}

#[test]
fn long_path_is_still_reachable() {
    let mut salas = vec![r#"{"id": "R0", "tipo": "ENTRADA", "descricao": "start"}"#.to_string()];
    let mut ligacoes = Vec::new();
    for i in 1..=60 {
        let tipo = if i == 60 { "TESOURO" } else { "NORMAL" };
        salas.push(format!(r#"{{"id": "R{}", "tipo": "{}", "descricao": "room"}}"#, i, tipo));
        ligacoes.push(format!(r#"{{"de": "R{}", "para": "R{}", "custo": 0.5}}"#, i - 1, i));
    }
    let map = write_temp(&format!(
        r#"{{"nome": "Corredor", "salas": [{}], "ligacoes": [{}]}}"#,
        salas.join(","),
        ligacoes.join(",")
    ));
    let maze = load_maze(map.path(), UnorderedList::new());
    assert!(maze.is_treasure_reachable());

    let path = maze.shortest_path("R0", "R60").unwrap().unwrap();
    assert_eq!(path.steps(), 60);
    assert_eq!(path.cost, 30.0);
}
