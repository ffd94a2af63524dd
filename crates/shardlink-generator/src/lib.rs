//! Short code generators.

pub mod random;
pub mod seq;

pub use random::{RandomGenerator, RandomGeneratorSettings};
pub use seq::SeqGenerator;
pub use shardlink_core::Generator;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid code length {length}; expected 1..={max}")]
    InvalidLength { length: usize, max: usize },
}
