//! Row structs and read views.
//!
//! - `tag`: reference rows (genres, platforms) and link rows joined to names
//! - `game`: the scalar game row and the assembled [`game::GameView`]

pub mod game;
pub mod tag;
