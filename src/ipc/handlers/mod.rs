pub mod core;
pub mod roster;
