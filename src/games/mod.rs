//! Game implementations.

pub mod word_hunt;
