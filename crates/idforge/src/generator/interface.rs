use std::sync::Arc;

use crate::{error::Result, id::Identifier};

/// A minimal interface for generating 128-bit identifiers.
///
/// Implementations are interchangeable strategies selected when the host
/// starts up; callers only ever ask for the next identifier.
pub trait IdentityGenerator {
    /// Generates the next identifier with fallible error handling.
    ///
    /// # Errors
    ///
    /// Returns an error if the random source fails, the lock guarding
    /// generator state is poisoned, or more identifiers are requested within
    /// one clock tick than the layout can encode.
    fn try_generate(&self) -> Result<Identifier>;

    /// Generates the next identifier.
    ///
    /// This is the infallible counterpart to
    /// [`IdentityGenerator::try_generate`].
    ///
    /// # Panics
    ///
    /// Identifier generation is treated as always-available infrastructure, so
    /// any error reported by [`IdentityGenerator::try_generate`] is fatal.
    fn generate(&self) -> Identifier {
        match self.try_generate() {
            Ok(id) => id,
            Err(e) => panic!("identifier generation failed: {e}"),
        }
    }
}

/// A process-wide generator handle, as produced by
/// [`GeneratorConfig::build`].
///
/// [`GeneratorConfig::build`]: crate::config::GeneratorConfig::build
pub type SharedGenerator = Arc<dyn IdentityGenerator + Send + Sync>;

impl<G: IdentityGenerator + ?Sized> IdentityGenerator for &G {
    fn try_generate(&self) -> Result<Identifier> {
        (**self).try_generate()
    }
}

impl<G: IdentityGenerator + ?Sized> IdentityGenerator for Box<G> {
    fn try_generate(&self) -> Result<Identifier> {
        (**self).try_generate()
    }
}

impl<G: IdentityGenerator + ?Sized> IdentityGenerator for Arc<G> {
    fn try_generate(&self) -> Result<Identifier> {
        (**self).try_generate()
    }
}
