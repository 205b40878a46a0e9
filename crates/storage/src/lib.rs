#![warn(clippy::pedantic)]

pub mod memory;
pub mod records;

#[cfg(test)]
mod tests;

pub use memory::InMemoryStorage;
