#![warn(clippy::pedantic)]

pub mod byte_mutator;
pub mod collection;
pub mod config;
pub mod engine;
pub mod generate;
pub mod selection;

mod mutate;
mod splice;

pub use byte_mutator::{ByteMutator, SeededByteMutator};
pub use collection::BlockCollection;
pub use config::MutatorConfig;
pub use engine::TlvMutator;
pub use generate::Alphabet;
pub use mutate::Strategy;
pub use selection::Selection;
