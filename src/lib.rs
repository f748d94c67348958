pub mod cli;
pub mod engine;
pub mod errors;
pub mod orders;
pub mod simulate;
pub mod state;
pub mod utils;
