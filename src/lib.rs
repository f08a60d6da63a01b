//! Runtime core of a terminal game engine.
//!
//! - [`graphics`] turns animated images into [`types::RenderFrame`]s and
//!   plays them back cyclically through [`graphics::Animation`].
//! - [`input`] matches keys and mouse positions against declarative
//!   [`input::InputCondition`]s.
//! - [`color`] holds the packed RGB [`color::GameColor`] and the console
//!   palette.
//! - [`renderer`] and [`player`] draw frames and drive a tick loop in a real
//!   terminal.

pub mod color;
pub mod config;
pub mod error;
pub mod graphics;
pub mod input;
pub mod player;
pub mod renderer;
pub mod types;

pub use error::{Error, Result};
