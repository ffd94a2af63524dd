use shardlink_core::{Generator, ShortCode};
use std::sync::atomic::{AtomicU64, Ordering};

/// A short code generator using a sequential counter.
///
/// Produces codes like "sl000000", "sl000001", etc. Codes are unique within a
/// single instance. Multiple writers must use distinct prefixes.
///
/// Sequential codes differ in their last characters only, so consecutive
/// codes walk across shards in order rather than spreading randomly.
#[derive(Debug)]
pub struct SeqGenerator {
    counter: AtomicU64,
    prefix: String,
}

impl Clone for SeqGenerator {
    fn clone(&self) -> Self {
        Self {
            counter: AtomicU64::new(self.counter.load(Ordering::SeqCst)),
            prefix: self.prefix.clone(),
        }
    }
}

impl SeqGenerator {
    /// Creates a new generator with a custom prefix, starting at zero.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self::with_offset(prefix, 0)
    }

    /// Creates a new generator starting from a specific counter value.
    pub fn with_offset(prefix: impl Into<String>, offset: u64) -> Self {
        Self {
            counter: AtomicU64::new(offset),
            prefix: prefix.into(),
        }
    }
}

impl Generator for SeqGenerator {
    type Output = ShortCode;

    fn generate(&self) -> ShortCode {
        let count = self.counter.fetch_add(1, Ordering::SeqCst);
        ShortCode::new_unchecked(format!("{}{:06}", self.prefix, count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn produces_sequential_codes() {
        let generator = SeqGenerator::with_prefix("sl");

        assert_eq!(generator.generate().as_str(), "sl000000");
        assert_eq!(generator.generate().as_str(), "sl000001");
        assert_eq!(generator.generate().as_str(), "sl000002");
    }

    #[test]
    fn with_offset() {
        let generator = SeqGenerator::with_offset("sl", 1000);

        assert_eq!(generator.generate().as_str(), "sl001000");
        assert_eq!(generator.generate().as_str(), "sl001001");
    }

    #[test]
    fn generator_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SeqGenerator>();
    }

    #[test]
    fn clone_preserves_counter_state() {
        let generator = SeqGenerator::with_prefix("sl");
        generator.generate();
        generator.generate();

        let cloned = generator.clone();

        assert_eq!(generator.generate().as_str(), "sl000002");
        assert_eq!(cloned.generate().as_str(), "sl000002");
    }
}
