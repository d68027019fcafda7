//! Automaton configuration and builder
//!
//! Every parameter a driver needs (board size, state count, rule, seeds,
//! iteration bound, export names) travels in explicit configuration values
//! handed to the components that use them.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{AutomataError, Result};
use crate::rules::Rule;

/// Default grid edge length
pub const DEFAULT_GRID_SIZE: usize = 100;

/// Default number of states (colours)
pub const DEFAULT_COLORS: u32 = 4;

/// Configuration for an automaton run
///
/// The same configuration (including `seed`) always produces the same
/// initial board and therefore the same run.
///
/// # Example
///
/// ```rust
/// use surface_automata::*;
///
/// let config = AutomatonConfigBuilder::new()
///     .seed(42)
///     .dimensions(64, 48)
///     .unwrap()
///     .colors(5)
///     .unwrap()
///     .cyclic()
///     .max_iterations(200)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.rule, Rule::cyclic(5));
/// # #[cfg(feature = "serde")]
/// # {
/// let json = serde_json::to_string(&config).unwrap();
/// let restored: AutomatonConfig = serde_json::from_str(&json).unwrap();
/// assert_eq!(config, restored);
/// # }
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutomatonConfig {
    /// Grid width in cells (ignored for mesh boards)
    pub width: usize,

    /// Grid height in cells (ignored for mesh boards)
    pub height: usize,

    /// Number of automaton states, also the palette size
    pub colors: u32,

    /// Generations to run, or `None` to run until the sink stops
    pub max_iterations: Option<usize>,

    /// Update rule
    pub rule: Rule,

    /// Seed for the random initial state
    pub seed: u64,

    /// Seed for the random display palette
    ///
    /// Defaults to `seed` so a run and its colours are reproduced together.
    pub palette_seed: u64,
}

impl AutomatonConfig {
    /// Number of cells on the grid
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Check that the rule's states fit in the palette
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the rule produces more states than `colors`.
    pub fn validate(&self) -> Result<()> {
        if self.rule.state_count() > self.colors {
            return Err(AutomataError::InvalidConfig(format!(
                "rule {} produces {} states but only {} colours are configured",
                self.rule.name(),
                self.rule.state_count(),
                self.colors
            )));
        }
        Ok(())
    }
}

impl Default for AutomatonConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_SIZE,
            height: DEFAULT_GRID_SIZE,
            colors: DEFAULT_COLORS,
            max_iterations: None,
            rule: Rule::greenberg_hastings(DEFAULT_COLORS),
            seed: 0,
            palette_seed: 0,
        }
    }
}

/// Which rule the builder should produce
#[derive(Debug, Clone, PartialEq, Eq)]
enum RuleChoice {
    GreenbergHastings,
    Cyclic,
    Explicit(Rule),
}

/// Builder for creating AutomatonConfig with validation
///
/// Greenberg-Hastings and cyclic rules take their state count from the
/// configured colours, so the rule and the palette always agree.
#[derive(Debug, Clone)]
pub struct AutomatonConfigBuilder {
    width: usize,
    height: usize,
    colors: u32,
    max_iterations: Option<usize>,
    rule: RuleChoice,
    threshold: Option<usize>,
    seed: Option<u64>,
    palette_seed: Option<u64>,
}

impl AutomatonConfigBuilder {
    /// Create a new builder with default values
    ///
    /// Defaults:
    /// - dimensions: 100 x 100
    /// - colors: 4
    /// - rule: Greenberg-Hastings, default threshold
    /// - max_iterations: unbounded
    /// - seed: Random (generated from thread_rng)
    /// - palette_seed: Same as seed
    pub fn new() -> Self {
        Self {
            width: DEFAULT_GRID_SIZE,
            height: DEFAULT_GRID_SIZE,
            colors: DEFAULT_COLORS,
            max_iterations: None,
            rule: RuleChoice::GreenbergHastings,
            threshold: None,
            seed: None,
            palette_seed: None,
        }
    }

    /// Set the grid dimensions
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if either dimension is 0
    pub fn dimensions(mut self, width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(AutomataError::InvalidConfig(format!(
                "grid dimensions must be at least 1x1 (got {}x{})",
                width, height
            )));
        }
        self.width = width;
        self.height = height;
        Ok(self)
    }

    /// Set the number of states
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if fewer than 2 states are requested
    pub fn colors(mut self, colors: u32) -> Result<Self> {
        if colors < 2 {
            return Err(AutomataError::InvalidConfig(format!(
                "at least 2 colours are required (got {})",
                colors
            )));
        }
        self.colors = colors;
        Ok(self)
    }

    /// Use the Greenberg-Hastings rule
    pub fn greenberg_hastings(mut self) -> Self {
        self.rule = RuleChoice::GreenbergHastings;
        self
    }

    /// Use the cyclic rule
    pub fn cyclic(mut self) -> Self {
        self.rule = RuleChoice::Cyclic;
        self
    }

    /// Use an explicit rule, such as [`Rule::conway`] or [`Rule::life_gen`]
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rule = RuleChoice::Explicit(rule);
        self
    }

    /// Override the threshold of a Greenberg-Hastings or cyclic rule
    pub fn threshold(mut self, threshold: usize) -> Self {
        self.threshold = Some(threshold);
        self
    }

    /// Stop after this many generations
    pub fn max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = Some(iterations);
        self
    }

    /// Run until the sink asks to stop
    pub fn unbounded(mut self) -> Self {
        self.max_iterations = None;
        self
    }

    /// Set the random seed for the initial state
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set a separate palette seed
    pub fn palette_seed(mut self, seed: u64) -> Self {
        self.palette_seed = Some(seed);
        self
    }

    /// Build the configuration
    ///
    /// If no seed was provided, generates a random seed using thread_rng.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if an explicit rule needs more states than
    /// the configured colours.
    pub fn build(self) -> Result<AutomatonConfig> {
        let seed = self.seed.unwrap_or_else(rand::random);
        let palette_seed = self.palette_seed.unwrap_or(seed);

        let rule = match self.rule {
            RuleChoice::GreenbergHastings => Rule::greenberg_hastings(self.colors),
            RuleChoice::Cyclic => Rule::cyclic(self.colors),
            RuleChoice::Explicit(rule) => rule,
        };
        let rule = match self.threshold {
            Some(threshold) => rule.with_threshold(threshold),
            None => rule,
        };

        let config = AutomatonConfig {
            width: self.width,
            height: self.height,
            colors: self.colors,
            max_iterations: self.max_iterations,
            rule,
            seed,
            palette_seed,
        };
        config.validate()?;
        Ok(config)
    }
}

impl Default for AutomatonConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Names used when exporting a textured mesh
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// Material library file referenced by the OBJ (`mtllib`)
    pub material_library: String,
    /// Material selected for every face (`usemtl`)
    pub material_name: String,
    /// Texture atlas file referenced by the material (`map_Kd`)
    pub texture_file: String,
}

impl ExportOptions {
    /// Options whose file names all share one stem
    ///
    /// `ExportOptions::with_stem("board")` references `board.mtl` and
    /// `board.png`.
    pub fn with_stem(stem: &str) -> Self {
        Self {
            material_library: format!("{}.mtl", stem),
            texture_file: format!("{}.png", stem),
            ..Default::default()
        }
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            material_library: "texture.mtl".to_string(),
            material_name: "Default".to_string(),
            texture_file: "texture.png".to_string(),
        }
    }
}
