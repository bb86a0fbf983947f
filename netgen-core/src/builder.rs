//! Builder utilities for configuring a [`Generator`].
//!
//! All parameter validation happens in [`GeneratorBuilder::build`], before
//! any random draw is made.

use crate::{
    Result,
    generator::Generator,
    params::{GenerationParams, Limits},
};

/// Configures and constructs [`Generator`] instances.
///
/// # Examples
/// ```
/// use netgen_core::{GenerationParams, GeneratorBuilder, Limits};
///
/// let generator = GeneratorBuilder::new()
///     .with_params(GenerationParams::default())
///     .with_seed(99)
///     .with_limits(Limits { max_nodes: 300, max_arcs: 2_000 })
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(generator.params().seed, 99);
/// assert_eq!(generator.limits().max_nodes, 300);
/// ```
#[derive(Debug, Clone, Default)]
pub struct GeneratorBuilder {
    params: GenerationParams,
    limits: Limits,
}

impl GeneratorBuilder {
    /// Creates a builder populated with default parameters and limits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces every run parameter.
    #[must_use]
    pub fn with_params(mut self, params: GenerationParams) -> Self {
        self.params = params;
        self
    }

    /// Overrides only the seed, keeping the structural parameters.
    ///
    /// # Examples
    /// ```
    /// use netgen_core::GeneratorBuilder;
    ///
    /// let builder = GeneratorBuilder::new().with_seed(7);
    /// assert_eq!(builder.params().seed, 7);
    /// ```
    #[must_use]
    pub const fn with_seed(mut self, seed: i64) -> Self {
        self.params.seed = seed;
        self
    }

    /// Returns the configured parameters.
    #[must_use]
    pub const fn params(&self) -> &GenerationParams {
        &self.params
    }

    /// Overrides the hard size limits.
    #[must_use]
    pub const fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Returns the configured limits.
    #[must_use]
    pub const fn limits(&self) -> Limits {
        self.limits
    }

    /// Validates the configuration and constructs a [`Generator`].
    ///
    /// # Errors
    /// Returns the [`crate::GeneratorError`] produced by
    /// [`GenerationParams::validate`].
    ///
    /// # Examples
    /// ```
    /// use netgen_core::{GeneratorBuilder, GeneratorError};
    ///
    /// let err = GeneratorBuilder::new()
    ///     .with_seed(0)
    ///     .build()
    ///     .expect_err("seed must be positive");
    /// assert_eq!(err, GeneratorError::BadSeed { seed: 0 });
    /// ```
    pub fn build(self) -> Result<Generator> {
        self.params.validate(self.limits)?;
        Ok(Generator::new(self.params, self.limits))
    }
}
