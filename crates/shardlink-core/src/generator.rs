use crate::shortcode::ShortCode;

/// Trait for generating short codes.
///
/// Implementations are pure generators that don't interact with storage.
/// The store performs no existence check before writing, so a generator that
/// repeats itself silently overwrites the earlier shortlink.
pub trait Generator: Send + Sync + 'static {
    type Output: Into<ShortCode>;

    /// Generates a value that converts into a short code, unique with high probability.
    fn generate(&self) -> Self::Output;
}
