//! `h2r-bridge` - H2R Graphics to control-panel bridge.
//!
//! Mirrors an H2R Graphics project into panel variables, actions, presets
//! and feedbacks, keeps timer displays ticking, and sends operator commands
//! back to the graphics server.

pub mod actions;
pub mod clock;
pub mod color;
pub mod config;
pub mod constants;
pub mod cue;
pub mod error;
pub mod feedback;
pub mod h2r;
pub mod host;
pub mod logging;
pub mod presets;
pub mod project;
pub mod sync;
pub mod timefmt;
pub mod types;
pub mod variables;
