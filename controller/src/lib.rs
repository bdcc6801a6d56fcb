pub mod error;
pub mod executive;

#[cfg(test)]
mod executive_tests;
