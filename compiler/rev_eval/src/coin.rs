//! Coin flips for double-`maybe` resolution.
//!
//! `maybe && maybe`, `maybe || maybe`, and an `if` over a `maybe`
//! condition all resolve by chance. The flip source is injected so tests
//! can script the outcomes.

use std::collections::VecDeque;

/// Source of boolean chance.
pub trait CoinFlip {
    /// `true` picks the left/then branch, `false` the right/else branch.
    fn flip(&mut self) -> bool;
}

/// The production source: a fair random coin.
#[derive(Default)]
pub struct RandomCoin;

impl CoinFlip for RandomCoin {
    fn flip(&mut self) -> bool {
        rand::random()
    }
}

/// A scripted sequence of outcomes for tests. Repeats the last outcome
/// once exhausted.
pub struct ScriptedCoin {
    outcomes: VecDeque<bool>,
    last: bool,
}

impl ScriptedCoin {
    pub fn new(outcomes: impl IntoIterator<Item = bool>) -> Self {
        ScriptedCoin {
            outcomes: outcomes.into_iter().collect(),
            last: true,
        }
    }
}

impl CoinFlip for ScriptedCoin {
    fn flip(&mut self) -> bool {
        if let Some(outcome) = self.outcomes.pop_front() {
            self.last = outcome;
        }
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_coin_replays_then_repeats() {
        let mut coin = ScriptedCoin::new([true, false]);
        assert!(coin.flip());
        assert!(!coin.flip());
        assert!(!coin.flip());
    }
}
