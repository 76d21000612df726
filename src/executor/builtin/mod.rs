mod commands;
mod manager;

pub use manager::Builtin;
