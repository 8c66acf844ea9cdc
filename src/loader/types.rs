use log::warn;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Top-level map document. Entries stay as raw JSON so one bad room or
/// corridor can be skipped without losing the rest of the file.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct MapDocument {
    #[serde(default)]
    pub nome: Option<String>,
    #[serde(default)]
    pub salas: Vec<Value>,
    #[serde(default)]
    pub ligacoes: Vec<Value>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct RoomEntry {
    pub id: String,
    #[serde(default)]
    pub tipo: Option<String>,
    #[serde(default)]
    pub descricao: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CorridorEntry {
    #[serde(alias = "origem")]
    pub de: String,
    #[serde(alias = "destino")]
    pub para: String,
    #[serde(default = "default_cost", deserialize_with = "lenient_cost")]
    pub custo: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evento: Option<EventEntry>,
}

fn default_cost() -> f64 {
    1.0
}

/// Numbers and numeric strings are taken as they are; anything else falls
/// back to the default cost instead of dropping the corridor.
fn lenient_cost<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    let cost = match &raw {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().replace(',', ".").parse().ok(),
        _ => None,
    };
    Ok(cost.unwrap_or_else(|| {
        warn!("corridor cost {} is not a number, using {}", raw, default_cost());
        default_cost()
    }))
}

#[derive(Debug, Deserialize, Serialize)]
pub struct EventEntry {
    #[serde(default)]
    pub descricao: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub efeito: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<ItemEntry>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ItemEntry {
    pub nome: String,
    #[serde(default)]
    pub efeito: Option<String>,
}

/// Riddle files come either as a bare array or wrapped in `"enigmas"`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RiddleDocument {
    Bare(Vec<Value>),
    Wrapped { enigmas: Vec<Value> },
}

impl RiddleDocument {
    pub fn into_entries(self) -> Vec<Value> {
        match self {
            RiddleDocument::Bare(entries) => entries,
            RiddleDocument::Wrapped { enigmas } => enigmas,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RiddleEntry {
    pub pergunta: String,
    #[serde(default)]
    pub resposta: Option<Value>,
    #[serde(default)]
    pub opcoes: Vec<String>,
    #[serde(default)]
    pub correta: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cost_of(entry: &str) -> f64 {
        serde_json::from_str::<CorridorEntry>(entry).unwrap().custo
    }

    #[test]
    fn corridor_cost_is_read_leniently() {
        assert_eq!(cost_of(r#"{"de": "E1", "para": "S1", "custo": 2.5}"#), 2.5);
        assert_eq!(cost_of(r#"{"de": "E1", "para": "S1", "custo": " 3 "}"#), 3.0);
        assert_eq!(cost_of(r#"{"de": "E1", "para": "S1", "custo": "1,5"}"#), 1.5);
        assert_eq!(cost_of(r#"{"de": "E1", "para": "S1", "custo": "abc"}"#), 1.0);
        assert_eq!(cost_of(r#"{"de": "E1", "para": "S1", "custo": null}"#), 1.0);
        assert_eq!(cost_of(r#"{"de": "E1", "para": "S1"}"#), 1.0);
    }
}
