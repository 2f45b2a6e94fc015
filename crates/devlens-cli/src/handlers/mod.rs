pub mod crates;
pub mod serve;
pub mod tables;
pub mod trace;
