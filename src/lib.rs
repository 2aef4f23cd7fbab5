//! Grid invaders: a column-shooter played on a fixed grid.
//!
//! The library is the whole game engine. `entities` holds the plain data,
//! `layout` the grid placement rules, and `compute` every state transition.
//! Front ends (see `src/main.rs`) only call into `compute` and read the
//! resulting [`entities::RenderState`].

pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod layout;

pub use error::{GameError, Result};
