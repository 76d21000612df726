mod lexer;

pub use lexer::{Lexer, tokenize};
