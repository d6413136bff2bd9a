//! Restore journal: a small SQLite file recording what every run did.

pub mod log;
pub mod migrate;
pub mod pool;
pub mod runs;
