pub mod classify;
pub mod open;
pub mod tree;
