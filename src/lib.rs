pub mod cli;
pub mod config;
pub mod git;
pub mod shell_exec;
pub mod state;
pub mod styling;
pub mod sync;
