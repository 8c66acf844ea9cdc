pub mod map;
pub mod riddles;
pub mod types;

pub use map::{build_maze, list_maps, load_maze, save_maze};
pub use riddles::load_riddles;
pub use types::MapDocument;
