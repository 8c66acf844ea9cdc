use std::path::Path;

use anyhow::{Context, Result};
use log::{info, warn};
use serde_json::Value;

use super::types::{RiddleDocument, RiddleEntry};
use crate::collections::UnorderedList;
use crate::maze::Riddle;

/// Loads every valid riddle in `path`. A missing or malformed file gives an
/// empty list.
pub fn load_riddles(path: &Path) -> UnorderedList<Riddle> {
    match read_riddles(path) {
        Ok(riddles) => {
            info!("loaded {} riddles from {}", riddles.len(), path.display());
            riddles
        }
        Err(e) => {
            warn!("no riddles loaded: {:#}", e);
            UnorderedList::new()
        }
    }
}

fn read_riddles(path: &Path) -> Result<UnorderedList<Riddle>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read riddle file {}", path.display()))?;
    let document: RiddleDocument = serde_json::from_str(&content)
        .with_context(|| format!("invalid riddle file {}", path.display()))?;

    let mut riddles = UnorderedList::new();
    for raw in document.into_entries() {
        match parse_riddle(raw) {
            Some(riddle) => riddles.add_to_rear(riddle),
            None => warn!("skipping riddle entry without a usable question and answer"),
        }
    }
    Ok(riddles)
}

fn parse_riddle(raw: Value) -> Option<Riddle> {
    let entry: RiddleEntry = serde_json::from_value(raw).ok()?;
    if entry.pergunta.trim().is_empty() {
        return None;
    }
    if let Some(correct) = entry.correta {
        if !entry.opcoes.is_empty() {
            return Riddle::with_options(entry.pergunta, entry.opcoes, correct);
        }
    }
    let answer = match entry.resposta? {
        Value::String(text) if !text.trim().is_empty() => text,
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        _ => return None,
    };
    Some(Riddle::new(entry.pergunta, answer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn bare_array_with_text_and_numbers() {
        let file = write_temp(
            r#"[
                {"pergunta": "Quanto e 2+2?", "resposta": 4},
                {"pergunta": "Cor do ceu?", "resposta": "azul"},
                {"pergunta": "", "resposta": "ignored"},
                {"pergunta": "Sem resposta"}
            ]"#,
        );
        let riddles = load_riddles(file.path());
        assert_eq!(riddles.len(), 2);
        let first = riddles.first().unwrap();
        assert_eq!(first.question(), "Quanto e 2+2?");
        assert!(first.check_answer("4"));
        assert!(riddles.get(1).unwrap().check_answer("Azul"));
    }

    #[test]
    fn wrapped_multiple_choice_layout() {
        let file = write_temp(
            r#"{"enigmas": [
                {"pergunta": "Maior planeta?", "opcoes": ["Terra", "Jupiter"], "correta": 1},
                {"pergunta": "Fora do intervalo", "opcoes": ["a"], "correta": 3}
            ]}"#,
        );
        let riddles = load_riddles(file.path());
        assert_eq!(riddles.len(), 1);
        let riddle = riddles.first().unwrap();
        assert!(riddle.check_answer("2"));
        assert!(riddle.check_answer("jupiter"));
        assert_eq!(riddle.options().len(), 2);
    }

    #[test]
    fn missing_or_broken_file_is_empty() {
        assert!(load_riddles(Path::new("definitely/not/here.json")).is_empty());
        let file = write_temp("{ not json");
        assert!(load_riddles(file.path()).is_empty());
    }
}
