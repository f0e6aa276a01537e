//! Solver Options
//!
//! Tunable knobs of the Blossom V solver; all of them preserve correctness and only change the running time.
//!

use itertools::iproduct;
use serde::{Deserialize, Serialize};

/// how the initial matching and dual variables are computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitializationType {
    /// every vertex is an unmatched singleton tree with zero dual
    #[serde(alias = "none")]
    Trivial,
    /// half of the minimum incident weight, followed by a greedy matching of tight edges
    Greedy,
    /// greedy followed by a half-integral fractional matching computed tree by tree
    Fractional,
}

/// how the dual variables of the alternating trees are increased when no primal operation is available
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DualUpdateStrategy {
    /// the same increase is applied to every tree
    MultipleTreeFixedDelta,
    /// trees connected by tight (+, -) edges share an increase, computed component by component
    MultipleTreeConnectedComponents,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Options {
    #[serde(default = "blossom_v_default_configs::initialization_type")]
    pub initialization_type: InitializationType,
    #[serde(default = "blossom_v_default_configs::dual_update_strategy")]
    pub dual_update_strategy: DualUpdateStrategy,
    /// run a single-tree dual update before the primal operations of each tree
    #[serde(default = "blossom_v_default_configs::update_duals_before")]
    pub update_duals_before: bool,
    /// run a single-tree dual update after the primal operations of each tree, and retry if it made progress
    #[serde(default = "blossom_v_default_configs::update_duals_after")]
    pub update_duals_after: bool,
}

pub mod blossom_v_default_configs {
    use super::*;

    pub fn initialization_type() -> InitializationType {
        InitializationType::Fractional
    }
    pub fn dual_update_strategy() -> DualUpdateStrategy {
        DualUpdateStrategy::MultipleTreeConnectedComponents
    }
    pub fn update_duals_before() -> bool {
        false
    }
    pub fn update_duals_after() -> bool {
        false
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            initialization_type: blossom_v_default_configs::initialization_type(),
            dual_update_strategy: blossom_v_default_configs::dual_update_strategy(),
            update_duals_before: blossom_v_default_configs::update_duals_before(),
            update_duals_after: blossom_v_default_configs::update_duals_after(),
        }
    }
}

impl Options {
    pub fn new(
        initialization_type: InitializationType,
        dual_update_strategy: DualUpdateStrategy,
        update_duals_before: bool,
        update_duals_after: bool,
    ) -> Self {
        Self {
            initialization_type,
            dual_update_strategy,
            update_duals_before,
            update_duals_after,
        }
    }

    pub fn from_config(config: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(config)
    }

    /// every combination of the options, useful to cross-check them against each other
    pub fn all() -> Vec<Self> {
        iproduct!(
            [
                InitializationType::Trivial,
                InitializationType::Greedy,
                InitializationType::Fractional
            ],
            [
                DualUpdateStrategy::MultipleTreeFixedDelta,
                DualUpdateStrategy::MultipleTreeConnectedComponents
            ],
            [false, true],
            [false, true]
        )
        .map(|(initialization_type, dual_update_strategy, before, after)| {
            Self::new(initialization_type, dual_update_strategy, before, after)
        })
        .collect()
    }
}
