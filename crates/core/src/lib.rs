//! Domain logic for the game catalog.
//!
//! Pure types and validation rules shared by the database and API crates.
//! Nothing in here touches the network or the database.

pub mod catalog;
pub mod error;
pub mod tags;
pub mod types;
