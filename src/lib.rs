//! A maze crawler over a weighted graph of rooms.
//!
//! [`collections`] holds the stacks, queue and list everything else is built
//! on; [`maze`] is the room graph and its traversals; [`game`] walks a player
//! through it. The remaining modules are the file formats and console
//! surfaces around that core.

pub mod collections;
pub mod config;
pub mod editor;
pub mod game;
pub mod journal;
pub mod loader;
pub mod maze;
pub mod menu;
pub mod report;
pub mod tui;
