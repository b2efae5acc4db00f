pub mod tokenizer;
pub use tokenizer::*;

pub mod values_parser;
pub use values_parser::*;

pub mod clause;
pub use clause::*;

pub mod command;
pub use command::*;
