pub mod config;
pub mod input;
pub mod log;
pub mod order;
pub mod parse;
pub mod restore;
