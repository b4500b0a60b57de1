//! Scoring rules for tree descent and the final move choice.

use super::config::MCTSConfig;

/// Statistics of one child as seen from its parent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChildStats {
    /// Accumulated reward Q.
    pub reward: f64,
    /// Visit count N.
    pub visits: u32,
}

/// Policy for descending through an expanded node.
pub trait SelectionPolicy: Send + Sync {
    /// Score of a child; the highest score is followed.
    fn score(&self, child: ChildStats, parent_visits: u32, config: &MCTSConfig) -> f64;
}

/// Upper Confidence bound applied to Trees.
///
/// Formula: Q/N + c * sqrt(ln(N_parent) / N). Unvisited children score
/// infinity.
#[derive(Clone, Copy, Debug, Default)]
pub struct Uct;

impl SelectionPolicy for Uct {
    fn score(&self, child: ChildStats, parent_visits: u32, config: &MCTSConfig) -> f64 {
        if child.visits == 0 {
            return f64::INFINITY;
        }
        let n = f64::from(child.visits);
        let ln_parent = f64::from(parent_visits.max(1)).ln();
        child.reward / n + config.exploration_weight * (ln_parent / n).sqrt()
    }
}

/// Score used by `choose`: mean reward, or negative infinity below the
/// minimum visit count.
#[must_use]
pub fn choose_score(child: ChildStats, min_visits: u32) -> f64 {
    if child.visits < min_visits || child.visits == 0 {
        f64::NEG_INFINITY
    } else {
        child.reward / f64::from(child.visits)
    }
}

/// Index of the highest score; ties keep the first.
pub fn argmax(scores: impl IntoIterator<Item = f64>) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, score) in scores.into_iter().enumerate() {
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((i, score)),
        }
    }
    best.map(|(i, _)| i)
}
