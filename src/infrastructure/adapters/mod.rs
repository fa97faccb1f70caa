//! Chat host adapters

pub mod console;

pub use console::ConsoleAdapter;
