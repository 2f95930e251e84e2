//! Configuration management for scout.
//!
//! User preferences ([`settings::Config`]), colors ([`theme::Theme`]) and key
//! bindings ([`keymap::Keymap`]) are stored as TOML files and loaded once at
//! startup.

pub mod keymap;
pub mod settings;
pub mod theme;
