pub mod active;
pub mod game;
pub mod sets;
