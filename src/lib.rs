//! Terminal Snake built around a fixed-interval tick.
//!
//! Input runs on its own thread and only talks to the simulation through a
//! bounded turn queue and a quit signal, see [`queue`].

pub mod config;
pub mod error;
pub mod food;
pub mod game;
pub mod grid;
pub mod input;
pub mod logging;
pub mod queue;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod snake;
pub mod terminal;
