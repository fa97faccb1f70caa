//! Message handling - Turns raw chat lines into command invocations

pub mod parser;

pub use parser::MessageParser;
