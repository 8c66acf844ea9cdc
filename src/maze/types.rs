use std::fmt;

use serde::{Deserialize, Serialize};

use super::MazeError;

/// What a corridor event or an item does to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Effect {
    None,
    Heal,
    Damage,
    BonusPower,
    Trap,
    Recede,
    SkipTurn,
    ExtraTurn,
    SwapPosition,
    SwapAll,
}

impl Effect {
    pub const ALL: [Effect; 10] = [
        Effect::None,
        Effect::Heal,
        Effect::Damage,
        Effect::BonusPower,
        Effect::Trap,
        Effect::Recede,
        Effect::SkipTurn,
        Effect::ExtraTurn,
        Effect::SwapPosition,
        Effect::SwapAll,
    ];

    /// Health change for health effects, rooms pushed back for `Recede`.
    /// Turn and swap effects have no magnitude.
    pub fn magnitude(self) -> i64 {
        match self {
            Effect::Heal => 20,
            Effect::Damage => 25,
            Effect::BonusPower => 15,
            Effect::Trap => 30,
            Effect::Recede => 2,
            _ => 0,
        }
    }

    pub fn health_delta(self) -> i64 {
        match self {
            Effect::Heal | Effect::BonusPower => self.magnitude(),
            Effect::Damage | Effect::Trap => -self.magnitude(),
            _ => 0,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Effect::None => "NONE",
            Effect::Heal => "HEAL",
            Effect::Damage => "DAMAGE",
            Effect::BonusPower => "BONUS_POWER",
            Effect::Trap => "TRAP",
            Effect::Recede => "RECEDE",
            Effect::SkipTurn => "SKIP_TURN",
            Effect::ExtraTurn => "EXTRA_TURN",
            Effect::SwapPosition => "SWAP_POSITION",
            Effect::SwapAll => "SWAP_ALL",
        }
    }

    pub fn from_code(code: &str) -> Option<Effect> {
        let code = code.trim();
        Effect::ALL
            .into_iter()
            .find(|effect| effect.code().eq_ignore_ascii_case(code))
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item {
    pub name: String,
    pub effect: Effect,
}

impl Item {
    pub fn new(name: impl Into<String>, effect: Effect) -> Self {
        Item {
            name: name.into(),
            effect,
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.effect)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RandomEvent {
    pub description: String,
    pub effect: Effect,
    pub item: Option<Item>,
}

impl RandomEvent {
    pub fn new(description: impl Into<String>, effect: Effect, item: Option<Item>) -> Self {
        RandomEvent {
            description: description.into(),
            effect,
            item,
        }
    }

    pub fn item(&self) -> Option<&Item> {
        self.item.as_ref()
    }
}

/// A question whose answer stays private; callers can only ask whether a
/// candidate answer is right.
#[derive(Clone, PartialEq)]
pub struct Riddle {
    question: String,
    options: Vec<String>,
    answer: String,
}

impl Riddle {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Riddle {
            question: question.into(),
            options: Vec::new(),
            answer: answer.into(),
        }
    }

    /// Multiple-choice riddle; `correct` is a 0-based index into `options`.
    pub fn with_options(question: impl Into<String>, options: Vec<String>, correct: usize) -> Option<Self> {
        let answer = options.get(correct)?.clone();
        Some(Riddle {
            question: question.into(),
            options,
            answer,
        })
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// A 1-based option number picks that option; anything else is compared
    /// to the answer ignoring case, or numerically when both sides are numbers.
    pub fn check_answer(&self, candidate: &str) -> bool {
        let candidate = candidate.trim();
        if candidate.is_empty() {
            return false;
        }
        if let Ok(choice) = candidate.parse::<usize>() {
            if choice >= 1 && choice <= self.options.len() {
                return answers_match(&self.options[choice - 1], &self.answer);
            }
        }
        answers_match(candidate, &self.answer)
    }
}

fn answers_match(candidate: &str, answer: &str) -> bool {
    let (candidate, answer) = (candidate.trim(), answer.trim());
    if candidate.to_lowercase() == answer.to_lowercase() {
        return true;
    }
    match (candidate.parse::<f64>(), answer.parse::<f64>()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

// Keeps the answer out of debug output.
impl fmt::Debug for Riddle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Riddle")
            .field("question", &self.question)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RoomKind {
    Entrance,
    Treasure,
    Riddle(Option<Riddle>),
    Standard,
}

impl RoomKind {
    /// Code used by map files.
    pub fn code(&self) -> &'static str {
        match self {
            RoomKind::Entrance => "ENTRADA",
            RoomKind::Treasure => "TESOURO",
            RoomKind::Riddle(_) => "ENIGMA",
            RoomKind::Standard => "NORMAL",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RoomKind::Entrance => "entrance",
            RoomKind::Treasure => "treasure",
            RoomKind::Riddle(_) => "riddle",
            RoomKind::Standard => "standard",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub id: String,
    pub description: String,
    pub kind: RoomKind,
}

impl Room {
    pub fn new(id: impl Into<String>, description: impl Into<String>, kind: RoomKind) -> Self {
        Room {
            id: id.into(),
            description: description.into(),
            kind,
        }
    }

    pub fn entrance(id: impl Into<String>, description: impl Into<String>) -> Self {
        Room::new(id, description, RoomKind::Entrance)
    }

    pub fn treasure(id: impl Into<String>, description: impl Into<String>) -> Self {
        Room::new(id, description, RoomKind::Treasure)
    }

    pub fn standard(id: impl Into<String>, description: impl Into<String>) -> Self {
        Room::new(id, description, RoomKind::Standard)
    }

    pub fn riddle(id: impl Into<String>, description: impl Into<String>, riddle: Option<Riddle>) -> Self {
        Room::new(id, description, RoomKind::Riddle(riddle))
    }

    pub fn is_entrance(&self) -> bool {
        matches!(self.kind, RoomKind::Entrance)
    }

    pub fn is_treasure(&self) -> bool {
        matches!(self.kind, RoomKind::Treasure)
    }

    pub fn riddle_ref(&self) -> Option<&Riddle> {
        match &self.kind {
            RoomKind::Riddle(riddle) => riddle.as_ref(),
            _ => None,
        }
    }
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}: {}]", self.id, self.description)
    }
}

/// Weighted edge between two rooms.
#[derive(Debug, Clone, PartialEq)]
pub struct Corridor {
    from: String,
    to: String,
    weight: f64,
    event: Option<RandomEvent>,
}

impl Corridor {
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        weight: f64,
        event: Option<RandomEvent>,
    ) -> Result<Self, MazeError> {
        let (from, to) = (from.into(), to.into());
        if !weight.is_finite() || weight < 0.0 {
            return Err(MazeError::InvalidCorridor { from, to, weight });
        }
        Ok(Corridor {
            from,
            to,
            weight,
            event,
        })
    }

    pub fn from(&self) -> &str {
        &self.from
    }

    pub fn to(&self) -> &str {
        &self.to
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn event(&self) -> Option<&RandomEvent> {
        self.event.as_ref()
    }

    pub fn connects(&self, a: &str, b: &str) -> bool {
        (self.from == a && self.to == b) || (self.from == b && self.to == a)
    }

    /// The endpoint opposite `id`, if `id` is an endpoint at all.
    pub fn other_end(&self, id: &str) -> Option<&str> {
        if self.from == id {
            Some(&self.to)
        } else if self.to == id {
            Some(&self.from)
        } else {
            None
        }
    }
}

impl fmt::Display for Corridor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} --({})-- {}", self.from, self.weight, self.to)?;
        if self.event.is_some() {
            write!(f, " [event]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_or_nan_weight_is_rejected() {
        assert!(matches!(
            Corridor::new("A", "B", -1.0, None),
            Err(MazeError::InvalidCorridor { .. })
        ));
        assert!(Corridor::new("A", "B", f64::NAN, None).is_err());
        assert!(Corridor::new("A", "B", 0.0, None).is_ok());
    }

    #[test]
    fn other_end_works_from_both_sides() {
        let corridor = Corridor::new("A", "B", 1.5, None).unwrap();
        assert_eq!(corridor.other_end("A"), Some("B"));
        assert_eq!(corridor.other_end("B"), Some("A"));
        assert_eq!(corridor.other_end("C"), None);
        assert!(corridor.connects("B", "A"));
    }

    #[test]
    fn riddle_accepts_text_number_and_option_index() {
        let text = Riddle::new("Capital de Portugal?", "Lisboa");
        assert!(text.check_answer("  lisboa "));
        assert!(!text.check_answer("Porto"));
        assert!(!text.check_answer(""));

        let numeric = Riddle::new("6 x 7?", "42");
        assert!(numeric.check_answer("42.0"));
        assert!(!numeric.check_answer("41"));

        let choice = Riddle::with_options(
            "Qual e par?",
            vec!["3".into(), "7".into(), "8".into()],
            2,
        )
        .unwrap();
        assert!(choice.check_answer("3"));
        assert!(choice.check_answer("8"));
        assert!(!choice.check_answer("1"));
        assert!(Riddle::with_options("?", vec![], 0).is_none());
    }

    #[test]
    fn riddle_debug_hides_answer() {
        let riddle = Riddle::new("Segredo?", "abracadabra");
        assert!(!format!("{:?}", riddle).contains("abracadabra"));
    }

    #[test]
    fn effects_round_trip_their_codes() {
        for effect in Effect::ALL {
            assert_eq!(Effect::from_code(effect.code()), Some(effect));
        }
        assert_eq!(Effect::from_code("heal"), Some(Effect::Heal));
        assert_eq!(Effect::from_code(" swap_all "), Some(Effect::SwapAll));
        assert_eq!(Effect::from_code("TELEPORT"), None);
        assert_eq!(Effect::Trap.health_delta(), -30);
    }
}
