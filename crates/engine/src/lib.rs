//! Mirefell Engine library.
//!
//! This crate contains all server-side code for the Mirefell game engine.
//!
//! ## Structure
//!
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `use_cases/` - Player story orchestration across the ports
//! - `app` - Application composition

pub mod app;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
