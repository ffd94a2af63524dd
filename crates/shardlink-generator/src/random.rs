use crate::Error;
use rand::Rng;
use shardlink_core::{Generator, ShortCode};
use typed_builder::TypedBuilder;

/// URL-safe alphabet used for generated codes.
pub const ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

pub const DEFAULT_LENGTH: usize = 8;
pub const MAX_LENGTH: usize = 64;

#[derive(Debug, Clone, Copy, TypedBuilder)]
pub struct RandomGeneratorSettings {
    /// Number of characters in every generated code.
    #[builder(default = DEFAULT_LENGTH)]
    pub length: usize,
}

impl Default for RandomGeneratorSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Generates fixed-length random codes over `[0-9A-Za-z]`.
///
/// With the default length of 8 there are 62^8 (about 2.2e14) possible codes.
/// Uniqueness is probabilistic; nothing checks for an existing key before the
/// code is used. Uniformly random characters also keep the character-sum
/// shard routing reasonably balanced.
#[derive(Debug, Clone)]
pub struct RandomGenerator {
    length: usize,
}

impl RandomGenerator {
    pub fn new(settings: RandomGeneratorSettings) -> Result<Self, Error> {
        if settings.length == 0 || settings.length > MAX_LENGTH {
            return Err(Error::InvalidLength {
                length: settings.length,
                max: MAX_LENGTH,
            });
        }
        Ok(Self {
            length: settings.length,
        })
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

impl Default for RandomGenerator {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
        }
    }
}

impl Generator for RandomGenerator {
    type Output = ShortCode;

    fn generate(&self) -> ShortCode {
        let mut rng = rand::thread_rng();
        let code: String = (0..self.length)
            .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
            .collect();
        ShortCode::new_unchecked(code)
    }
}
