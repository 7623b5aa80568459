pub mod clocks;
pub mod config;
pub mod runner;
pub mod stats;
pub mod time;
pub mod util;
