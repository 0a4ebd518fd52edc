//! ucum-core: UCUM unit engine
//!
//! This crate parses and validates unit expressions written in the case
//! sensitive UCUM syntax, reduces them to base units and converts values
//! between commensurable units, special units such as degrees Celsius
//! included. It has no I/O beyond optional config loading and can be shared
//! across threads.
//!
//! # Example
//!
//! ```
//! use ucum_core::{Decimal, Engine};
//!
//! let engine = Engine::new();
//!
//! // Conversion
//! let cm = engine.convert(&Decimal::one(), "[in_i]", "cm")?;
//! assert_eq!(cm.to_string(), "2.54");
//!
//! // Canonical form
//! let km = engine.canonicalize("km")?;
//! assert_eq!(km.term.to_string(), "m");
//! assert_eq!(km.factor.to_string(), "1000");
//!
//! // Special units
//! let kelvin = engine.convert(&"5".parse::<Decimal>()?, "Cel", "K")?;
//! assert_eq!(kelvin.to_f64(), Some(278.15));
//! # Ok::<(), ucum_core::EngineError>(())
//! ```

pub mod cache;
pub mod canon;
pub mod config;
pub mod convert;
pub mod error;
pub mod parser;
pub mod print;
pub mod registry;
pub mod special;
pub mod types;
pub mod validate;

use std::num::NonZeroUsize;
use std::sync::Arc;

pub use cache::{Cache, CacheConfig, CacheKey, CacheStats};
pub use canon::{Canonicalized, Canonicalizer, Direction};
pub use config::{Config, FeatureFlags};
pub use convert::{Converter, Relation};
pub use error::{
    CanonicalizeError, ConfigError, ConversionError, DecimalError, EngineError, ParseError,
};
pub use registry::Registry;
pub use special::{SpecialFunction, SpecialFunctions};
pub use types::{CanonicalTerm, Decimal, Dimension, Dimensions, Term};

/// Shared entry point: owns the registry, special functions, config and cache
pub struct Engine {
    registry: Arc<Registry>,
    functions: Arc<SpecialFunctions>,
    config: Config,
    cache: Cache,
}

impl Engine {
    /// Engine with built-in defaults
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self::builder().config(config).build()
    }

    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    fn canonicalizer(&self) -> Canonicalizer<'_> {
        Canonicalizer::new(&self.registry, &self.functions)
            .with_flags(self.config.flags())
            .with_cache(&self.cache)
    }

    /// Parse and validate an expression
    pub fn validate(&self, input: &str) -> Result<Term, ParseError> {
        let flags = self.config.flags();
        self.cache
            .validated_or_insert_with(CacheKey::new(input, flags), || {
                validate::validate(input, &self.registry, flags)
            })
    }

    /// Validate independent inputs in parallel. Results keep input order.
    pub fn batch_validate<S>(&self, inputs: &[S]) -> Vec<Result<Term, ParseError>>
    where
        S: AsRef<str> + Sync,
    {
        let workers = std::thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1);
        if workers == 1 || inputs.len() < 2 {
            return inputs.iter().map(|input| self.validate(input.as_ref())).collect();
        }

        let chunk_size = inputs.len().div_ceil(workers);
        std::thread::scope(|scope| {
            let handles: Vec<_> = inputs
                .chunks(chunk_size)
                .map(|chunk| {
                    scope.spawn(move || {
                        chunk
                            .iter()
                            .map(|input| self.validate(input.as_ref()))
                            .collect::<Vec<_>>()
                    })
                })
                .collect();
            handles
                .into_iter()
                .flat_map(|handle| {
                    handle
                        .join()
                        .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
                })
                .collect()
        })
    }

    /// Canonical form of one unit of `input`
    pub fn canonicalize(&self, input: &str) -> Result<Canonicalized, EngineError> {
        self.canonicalize_with_factor(&Decimal::one(), input)
    }

    /// Canonical form of `factor` units of `input`
    pub fn canonicalize_with_factor(
        &self,
        factor: &Decimal,
        input: &str,
    ) -> Result<Canonicalized, EngineError> {
        let term = self.validate(input)?;
        self.canonicalize_term(factor, &term)
    }

    /// Canonicalize an already validated term
    pub fn canonicalize_term(&self, factor: &Decimal, term: &Term) -> Result<Canonicalized, EngineError> {
        Ok(self
            .canonicalizer()
            .canonicalize(factor, term, Direction::From)?)
    }

    /// Convert `factor` units of `from` into units of `to`
    pub fn convert(&self, factor: &Decimal, from: &str, to: &str) -> Result<Decimal, EngineError> {
        let (from, to) = (self.validate(from)?, self.validate(to)?);
        self.convert_terms(factor, &from, &to)
    }

    /// Convert between amounts of substance and masses, treating one mole as
    /// `coefficient` grams. Without molar-mass conversion enabled in the
    /// config this behaves like [`Engine::convert`].
    pub fn convert_with_mol_mass(
        &self,
        factor: &Decimal,
        from: &str,
        to: &str,
        coefficient: &Decimal,
    ) -> Result<Decimal, EngineError> {
        let (from, to) = (self.validate(from)?, self.validate(to)?);
        let canonicalizer = self.canonicalizer().with_mol_mass(coefficient);
        Ok(Converter::new(canonicalizer).convert(factor, &from, &to)?)
    }

    pub fn convert_terms(&self, factor: &Decimal, from: &Term, to: &Term) -> Result<Decimal, EngineError> {
        Ok(Converter::new(self.canonicalizer()).convert(factor, from, to)?)
    }

    /// True if `input` is valid and made only of unprefixed base units and
    /// integers
    pub fn is_canonical(&self, input: &str) -> bool {
        self.validate(input)
            .ok()
            .and_then(|term| term.to_canonical())
            .is_some()
    }

    pub fn check_relation(&self, left: &str, right: &str) -> Result<Relation, ParseError> {
        let (left, right) = (self.validate(left)?, self.validate(right)?);
        Ok(convert::check_relation(&self.canonicalizer(), &left, &right))
    }

    pub fn check_commensurable(&self, left: &str, right: &str) -> Result<Relation, ParseError> {
        let (left, right) = (self.validate(left)?, self.validate(right)?);
        Ok(convert::check_commensurable(&self.canonicalizer(), &left, &right))
    }

    /// Base dimensions of `input`
    pub fn dimensions(&self, input: &str) -> Result<Dimensions, EngineError> {
        let term = self.validate(input)?;
        let step = self.canonicalizer().canonical_step(&term)?;
        Ok(canon::analyze(&step.term))
    }

    /// Validate and print back in UCUM syntax
    pub fn print(&self, input: &str) -> Result<String, ParseError> {
        self.validate(input).map(|term| print::print(&term))
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn special_functions(&self) -> &SpecialFunctions {
        &self.functions
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for an [`Engine`] with custom config or special functions
#[derive(Default)]
pub struct EngineBuilder {
    config: Config,
    functions: special::SpecialFunctionsBuilder,
    registry: Option<Arc<Registry>>,
}

impl EngineBuilder {
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Add or replace a special function by name
    pub fn special_function(mut self, function: SpecialFunction) -> Self {
        self.functions = self.functions.with(function);
        self
    }

    /// Share a registry with other engines
    pub fn registry(mut self, registry: Arc<Registry>) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn build(self) -> Engine {
        let functions = self
            .functions
            .scale(self.config.special_function_scale)
            .build();
        Engine {
            registry: self.registry.unwrap_or_default(),
            functions: Arc::new(functions),
            cache: Cache::new(self.config.cache),
            config: self.config,
        }
    }
}
