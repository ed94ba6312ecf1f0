//! Works out how much of the workday is left from the clock-in and clock-out times shown by an
//! attendance portal.
//!
//! [engine] holds the time accounting and never touches the network. [portal] fetches and reads
//! the attendance page, [cli] glues the two together.

pub mod cli;
pub mod engine;
pub mod portal;
pub mod utils;
