pub mod commands;
pub mod shell;
pub mod trace_init;
