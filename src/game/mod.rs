pub mod player;
pub mod session;
pub mod turns;

pub use player::{Player, DEFAULT_HEALTH};
pub use session::{MoveReport, Outcome, PlayError, Session};
pub use turns::TurnOrder;
