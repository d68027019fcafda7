//! Update rules
//!
//! Every rule maps a region's current value and the values of its
//! neighbours to the region's next value. Rules are pure and total: they
//! hold only their own parameters, accept any number of neighbours
//! (including none) and never fail.

use std::collections::BTreeSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default excitation threshold for Greenberg-Hastings
pub const GREENBERG_HASTINGS_THRESHOLD: usize = 1;

/// Default advance threshold for the cyclic automaton
pub const CYCLIC_THRESHOLD: usize = 2;

/// An automaton update rule with its parameters
///
/// # Example
///
/// ```
/// use surface_automata::Rule;
///
/// let life = Rule::conway();
/// // A dead cell with three live neighbours is born
/// assert_eq!(life.evaluate(0, [1, 1, 1, 0, 0]), 1);
/// // A live cell with one live neighbour dies
/// assert_eq!(life.evaluate(1, [1, 0, 0]), 0);
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// Excitable medium with states `0..colors`
    ///
    /// A resting cell (0) fires (becomes 1) when more than `threshold`
    /// neighbours are firing. Any other state advances by one, wrapping back
    /// to rest after the refractory states.
    GreenbergHastings {
        /// Firing neighbours needed, exclusive
        threshold: usize,
        /// Number of states
        colors: u32,
    },

    /// Cyclic automaton with states `0..colors`
    ///
    /// A cell advances to its successor state when more than `threshold`
    /// neighbours already hold that successor; otherwise it decays by one,
    /// stopping at 0.
    Cyclic {
        /// Successor-valued neighbours needed, exclusive
        threshold: usize,
        /// Number of states
        colors: u32,
    },

    /// Binary life-like automaton
    ///
    /// A dead cell is born when its live-neighbour count is in `born`; a
    /// live cell dies when its count is in `die`; otherwise nothing changes.
    Life {
        /// Live-neighbour counts that bring a dead cell to life
        born: BTreeSet<usize>,
        /// Live-neighbour counts that kill a live cell
        die: BTreeSet<usize>,
    },
}

impl Rule {
    /// Greenberg-Hastings with the default threshold
    pub fn greenberg_hastings(colors: u32) -> Self {
        Rule::GreenbergHastings {
            threshold: GREENBERG_HASTINGS_THRESHOLD,
            colors,
        }
    }

    /// Cyclic automaton with the default threshold
    pub fn cyclic(colors: u32) -> Self {
        Rule::Cyclic {
            threshold: CYCLIC_THRESHOLD,
            colors,
        }
    }

    /// Life-like rule from born and die counts
    pub fn life_gen<B, D>(born: B, die: D) -> Self
    where
        B: IntoIterator<Item = usize>,
        D: IntoIterator<Item = usize>,
    {
        Rule::Life {
            born: born.into_iter().collect(),
            die: die.into_iter().collect(),
        }
    }

    /// Conway's Game of Life (B3/S23)
    pub fn conway() -> Self {
        Self::life_gen([3], [0, 1, 4, 5, 6, 7, 8])
    }

    /// HighLife (B36/S23)
    pub fn highlife() -> Self {
        Self::life_gen([3, 6], [0, 1, 4, 5, 7, 8])
    }

    /// Replace the threshold of a Greenberg-Hastings or cyclic rule
    ///
    /// Life rules have no threshold and are returned unchanged.
    pub fn with_threshold(self, threshold: usize) -> Self {
        match self {
            Rule::GreenbergHastings { colors, .. } => Rule::GreenbergHastings { threshold, colors },
            Rule::Cyclic { colors, .. } => Rule::Cyclic { threshold, colors },
            life @ Rule::Life { .. } => life,
        }
    }

    /// Number of distinct states this rule produces
    pub fn state_count(&self) -> u32 {
        match self {
            Rule::GreenbergHastings { colors, .. } | Rule::Cyclic { colors, .. } => *colors,
            Rule::Life { .. } => 2,
        }
    }

    /// Short human-readable name, used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Rule::GreenbergHastings { .. } => "greenberg-hastings",
            Rule::Cyclic { .. } => "cyclic",
            Rule::Life { .. } => "life",
        }
    }

    /// Compute the next value of a region
    ///
    /// `neighbors` yields the prior-generation values of the region's
    /// neighbours and may be empty.
    pub fn evaluate<I>(&self, current: u32, neighbors: I) -> u32
    where
        I: IntoIterator<Item = u32>,
    {
        match self {
            Rule::GreenbergHastings { threshold, colors } => {
                if current == 0 {
                    let firing = neighbors.into_iter().filter(|&v| v == 1).count();
                    if firing > *threshold {
                        1
                    } else {
                        0
                    }
                } else {
                    (current + 1) % (*colors).max(1)
                }
            }
            Rule::Cyclic { threshold, colors } => {
                let next = if current < *colors {
                    (current + 1) % *colors
                } else {
                    0
                };
                let ready = neighbors.into_iter().filter(|&v| v == next).count();
                if ready > *threshold {
                    next
                } else {
                    current.saturating_sub(1)
                }
            }
            Rule::Life { born, die } => {
                let live = neighbors.into_iter().filter(|&v| v != 0).count();
                if current == 0 {
                    if born.contains(&live) {
                        1
                    } else {
                        0
                    }
                } else if die.contains(&live) {
                    0
                } else {
                    current
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greenberg_hastings_rest() {
        let rule = Rule::greenberg_hastings(4);
        // exactly the threshold is not enough
        assert_eq!(rule.evaluate(0, [1, 0, 0]), 0);
        assert_eq!(rule.evaluate(0, [1, 1, 0]), 1);
        // refractory neighbours do not excite
        assert_eq!(rule.evaluate(0, [2, 2, 3, 3]), 0);
    }

    #[test]
    fn test_greenberg_hastings_decay_cycle() {
        let rule = Rule::greenberg_hastings(4);
        assert_eq!(rule.evaluate(1, []), 2);
        assert_eq!(rule.evaluate(2, [1, 1, 1]), 3);
        assert_eq!(rule.evaluate(3, []), 0);
    }

    #[test]
    fn test_cyclic_advance() {
        let rule = Rule::cyclic(4);
        assert_eq!(rule.evaluate(1, [2, 2, 2, 0]), 2);
        // wraps to 0 from the last state
        assert_eq!(rule.evaluate(3, [0, 0, 0]), 0);
    }

    #[test]
    fn test_cyclic_decay() {
        let rule = Rule::cyclic(4);
        assert_eq!(rule.evaluate(2, [3, 3]), 1);
        assert_eq!(rule.evaluate(0, []), 0);
    }

    #[test]
    fn test_cyclic_out_of_range_successor_is_zero() {
        let rule = Rule::cyclic(4);
        // successor of an out-of-range value is 0, so it advances on three 0s
        assert_eq!(rule.evaluate(7, [0, 0, 0]), 0);
        assert_eq!(rule.evaluate(7, [1]), 6);
    }

    #[test]
    fn test_conway() {
        let rule = Rule::conway();
        assert_eq!(rule.evaluate(0, [1, 1, 1]), 1);
        assert_eq!(rule.evaluate(0, [1, 1]), 0);
        assert_eq!(rule.evaluate(1, [1, 1]), 1);
        assert_eq!(rule.evaluate(1, [1, 1, 1]), 1);
        assert_eq!(rule.evaluate(1, [1]), 0);
        assert_eq!(rule.evaluate(1, [1, 1, 1, 1]), 0);
        assert_eq!(rule.evaluate(1, []), 0);
    }

    #[test]
    fn test_conway_matches_textbook_rule_for_all_counts() {
        let rule = Rule::conway();
        for live in 0..=8usize {
            let neighbors: Vec<u32> = (0..8).map(|i| u32::from(i < live)).collect();

            let born = rule.evaluate(0, neighbors.iter().copied());
            assert_eq!(born, u32::from(live == 3), "dead cell, {} live", live);

            let survives = rule.evaluate(1, neighbors.iter().copied());
            assert_eq!(survives, u32::from(live == 2 || live == 3), "live cell, {} live", live);
        }
    }

    #[test]
    fn test_highlife_birth_on_six() {
        let rule = Rule::highlife();
        assert_eq!(rule.evaluate(0, [1, 1, 1, 1, 1, 1, 0, 0]), 1);
        assert_eq!(Rule::conway().evaluate(0, [1, 1, 1, 1, 1, 1, 0, 0]), 0);
        // six live neighbours do not kill in HighLife
        assert_eq!(rule.evaluate(1, [1, 1, 1, 1, 1, 1]), 1);
    }

    #[test]
    fn test_life_gen_unchanged_otherwise() {
        let rule = Rule::life_gen([], []);
        assert_eq!(rule.evaluate(0, [1, 1, 1]), 0);
        assert_eq!(rule.evaluate(1, []), 1);
    }

    #[test]
    fn test_with_threshold() {
        let rule = Rule::cyclic(3).with_threshold(0);
        assert_eq!(rule, Rule::Cyclic { threshold: 0, colors: 3 });
        assert_eq!(rule.evaluate(0, [1]), 1);

        assert_eq!(Rule::conway().with_threshold(5), Rule::conway());
    }

    #[test]
    fn test_state_count() {
        assert_eq!(Rule::greenberg_hastings(6).state_count(), 6);
        assert_eq!(Rule::highlife().state_count(), 2);
    }
}
