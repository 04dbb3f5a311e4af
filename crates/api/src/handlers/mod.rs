pub mod games;
pub mod tags;
