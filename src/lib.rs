pub mod repl;
pub mod lexer;
pub mod parser;
pub mod completion;
pub mod executor;
pub mod environment;
pub mod config;
pub mod prompt;
pub mod error;
pub mod io;
