//! Megami - progression and resource core for an idle party RPG
//!
//! Members level up from experience, parties farm areas once per simulated
//! second, and time spent away is paid out as a treasure chest. The crate has
//! no clock and no renderer: callers drive [`core::CoreGame`] and persist its
//! state through [`save_manager::SaveManager`].

pub mod character;
pub mod core;
pub mod items;
pub mod party;
pub mod save_manager;
pub mod simulator;
pub mod world;
