//! Automaton engine
//!
//! Applies a [`Rule`] uniformly over an [`AdjacencyMap`]. The engine is
//! pull-based: callers ask for the next generation with
//! [`Automaton::step`] and decide themselves when to render, export or
//! stop. [`Automaton::run`] wraps that loop for callers that hand every
//! generation to a [`GenerationSink`].

mod state;
mod step;

pub use state::{validate_closed_world, State};
pub use step::step;
#[cfg(feature = "parallel")]
pub use step::step_parallel;

use std::ops::ControlFlow;
use std::sync::Arc;

use crate::adjacency::AdjacencyMap;
use crate::error::Result;
use crate::region::Region;
use crate::rules::Rule;

/// Consumer of completed generations
///
/// Each call receives a finished generation that will not change while the
/// sink looks at it. Returning `ControlFlow::Break(())` asks the driver to
/// stop, which is how a display reports that the user quit.
pub trait GenerationSink<R: Region> {
    /// Accept generation number `generation` (1 for the first computed step)
    fn accept(&mut self, generation: usize, state: &State<R>) -> ControlFlow<()>;
}

impl<R, F> GenerationSink<R> for F
where
    R: Region,
    F: FnMut(usize, &State<R>) -> ControlFlow<()>,
{
    fn accept(&mut self, generation: usize, state: &State<R>) -> ControlFlow<()> {
        self(generation, state)
    }
}

/// Outcome of [`Automaton::run`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Generations computed during this run
    pub generations: usize,
    /// Whether the sink asked to stop before the bound was reached
    pub stopped_by_sink: bool,
}

/// A board evolving under one rule
///
/// Holds the adjacency map (shared, immutable), the rule and the current
/// generation. Each step replaces the current state wholesale; earlier
/// generations are dropped.
///
/// # Example
///
/// ```
/// use std::ops::ControlFlow;
/// use surface_automata::*;
///
/// let map = build_grid_adjacency(16, 16);
/// let initial = State::random(&map, 4, 42);
/// let mut automaton = Automaton::new(map, initial, Rule::greenberg_hastings(4)).unwrap();
///
/// let summary = automaton
///     .run(Some(10), &mut |_generation: usize, _state: &State<GridCell>| ControlFlow::Continue(()))
///     .unwrap();
/// assert_eq!(summary.generations, 10);
/// assert_eq!(automaton.generation(), 10);
/// ```
#[derive(Debug, Clone)]
pub struct Automaton<R: Region> {
    map: Arc<AdjacencyMap<R>>,
    rule: Rule,
    state: State<R>,
    generation: usize,
}

impl<R: Region> Automaton<R> {
    /// Create an engine from a map, an initial state and a rule
    ///
    /// # Errors
    ///
    /// Returns `MissingRegion` if the initial state does not cover the map.
    pub fn new(map: impl Into<Arc<AdjacencyMap<R>>>, initial: State<R>, rule: Rule) -> Result<Self> {
        let map = map.into();
        validate_closed_world(&map, &initial)?;
        log::debug!(
            "automaton ready: {} regions, rule {}",
            map.len(),
            rule.name()
        );
        Ok(Self {
            map,
            rule,
            state: initial,
            generation: 0,
        })
    }

    /// Advance one generation and return the new state
    pub fn step(&mut self) -> &State<R> {
        self.state = step::step_unchecked(&self.map, &self.state, &self.rule);
        self.generation += 1;
        log::trace!(
            "generation {}: population {}",
            self.generation,
            self.state.population()
        );
        &self.state
    }

    /// Advance `n` generations
    pub fn steps(&mut self, n: usize) -> &State<R> {
        for _ in 0..n {
            self.step();
        }
        &self.state
    }

    /// Run until `limit` generations have been computed, or forever if
    /// `limit` is `None`, handing each generation to `sink`
    ///
    /// The loop ends early as soon as the sink returns `Break`.
    pub fn run<S>(&mut self, limit: Option<usize>, sink: &mut S) -> Result<RunSummary>
    where
        S: GenerationSink<R> + ?Sized,
    {
        let mut generations = 0;
        log::info!(
            "running {} over {} regions ({})",
            self.rule.name(),
            self.map.len(),
            limit.map_or_else(|| "unbounded".to_string(), |n| format!("{} generations", n))
        );

        while limit.map_or(true, |n| generations < n) {
            self.step();
            generations += 1;
            if sink.accept(self.generation, &self.state).is_break() {
                log::info!("stopped by sink after generation {}", self.generation);
                return Ok(RunSummary {
                    generations,
                    stopped_by_sink: true,
                });
            }
        }

        Ok(RunSummary {
            generations,
            stopped_by_sink: false,
        })
    }

    /// Current state
    #[inline]
    pub fn state(&self) -> &State<R> {
        &self.state
    }

    /// Owned copy of the current state, safe to hand to another thread
    pub fn snapshot(&self) -> State<R> {
        self.state.clone()
    }

    /// Number of generations computed so far
    #[inline]
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// The rule driving this board
    #[inline]
    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    /// The board's adjacency map
    #[inline]
    pub fn map(&self) -> &AdjacencyMap<R> {
        &self.map
    }

    /// Shared handle to the adjacency map
    pub fn shared_map(&self) -> Arc<AdjacencyMap<R>> {
        Arc::clone(&self.map)
    }
}
