pub mod error;
pub mod graph;
pub mod traversal;
pub mod types;

pub use error::MazeError;
pub use graph::{Maze, Neighbors};
pub use traversal::{MazePath, Validation};
pub use types::{Corridor, Effect, Item, RandomEvent, Riddle, Room, RoomKind};
