//! Randomized insert/remove harness.
//!
//! Each round fills a fresh tree with distinct random keys, checks the node
//! count and AVL validity, removes a contiguous run of the inserted keys,
//! checks again, and releases the tree.

use std::fmt;

use log::{debug, info};
use thiserror::Error;

use crate::avl::{count, insert, is_valid_avl, release, remove, Link};
use crate::error::AvlError;
use crate::fuzzer::Fuzzer;

/// Harness parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StressConfig {
    /// Number of independent trees to build.
    pub trees: u32,
    /// Distinct keys stored in each tree.
    pub insertions: usize,
    /// Keys are drawn from `[0, range)`.
    pub range: i32,
    /// Keys removed from each tree, starting at the middle of insertion order.
    pub removes: usize,
    /// Replays a previous run; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl StressConfig {
    pub const FULL: Self = Self {
        trees: 1000,
        insertions: 10_000,
        range: 100_000,
        removes: 1000,
        seed: None,
    };

    pub const SMALL: Self = Self {
        trees: 1,
        insertions: 100,
        range: 1000,
        removes: 10,
        seed: None,
    };

    pub fn validate(&self) -> Result<(), StressError> {
        if self.insertions == 0 {
            return Err(StressError::InvalidConfig(
                "insertions must be positive".to_string(),
            ));
        }
        if usize::try_from(self.range).map_or(true, |r| r < self.insertions) {
            return Err(StressError::InvalidConfig(format!(
                "range {} cannot supply {} distinct keys",
                self.range, self.insertions
            )));
        }
        if self.insertions / 2 + self.removes >= self.insertions {
            return Err(StressError::InvalidConfig(format!(
                "cannot remove {} keys from the middle of {}",
                self.removes, self.insertions
            )));
        }
        Ok(())
    }
}

impl Default for StressConfig {
    fn default() -> Self {
        if cfg!(feature = "small-case") {
            Self::SMALL
        } else {
            Self::FULL
        }
    }
}

/// Phase of a round in which a check ran.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Insert,
    Remove,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Insert => Ok(()),
            Stage::Remove => f.write_str(" (Pos-Remove)"),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StressError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Invalid tree node count{stage}: expected {expected}, got {actual}")]
    CountMismatch {
        stage: Stage,
        expected: usize,
        actual: usize,
    },
    #[error("Invalid AVL tree{stage}")]
    InvalidTree { stage: Stage },
    #[error("Error to insert avl tree node {key}")]
    Insert {
        key: i32,
        #[source]
        source: AvlError,
    },
    #[error("Error to remove avl tree node {key}")]
    Remove {
        key: i32,
        #[source]
        source: AvlError,
    },
}

/// Outcome of one round. Only produced when both checks passed, so the tree
/// was a valid AVL tree at each stage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeReport {
    pub tree: u32,
    pub count: usize,
    pub count_after_remove: usize,
}

fn check(root: &Link, stage: Stage, expected: usize) -> Result<usize, StressError> {
    let actual = count(root.as_deref());
    if actual != expected {
        return Err(StressError::CountMismatch {
            stage,
            expected,
            actual,
        });
    }
    if !is_valid_avl(root.as_deref()) {
        return Err(StressError::InvalidTree { stage });
    }
    Ok(actual)
}

/// Runs a single round against `fuzzer`.
pub fn run_tree(
    config: &StressConfig,
    fuzzer: &mut Fuzzer,
    tree: u32,
) -> Result<TreeReport, StressError> {
    config.validate()?;
    let mut root: Link = None;
    let mut inserted = Vec::with_capacity(config.insertions);

    while inserted.len() < config.insertions {
        let key = fuzzer.random_key(config.range);
        match insert(key, &mut root) {
            Ok(_) => inserted.push(key),
            Err(AvlError::AlreadyInserted) => {}
            Err(source) => return Err(StressError::Insert { key, source }),
        }
    }
    let count_after_insert = check(&root, Stage::Insert, config.insertions)?;
    debug!("tree {tree}: {count_after_insert} nodes inserted");

    let mid = config.insertions / 2;
    for &key in &inserted[mid..mid + config.removes] {
        remove(key, &mut root).map_err(|source| StressError::Remove { key, source })?;
    }
    let count_after_remove = check(&root, Stage::Remove, config.insertions - config.removes)?;
    debug!("tree {tree}: {count_after_remove} nodes after removal");

    release(&mut root);
    Ok(TreeReport {
        tree,
        count: count_after_insert,
        count_after_remove,
    })
}

/// Runs every round, handing each report to `on_tree`. Stops at the first
/// failure.
pub fn run<F>(config: &StressConfig, mut on_tree: F) -> Result<(), StressError>
where
    F: FnMut(&TreeReport),
{
    let mut fuzzer = match config.seed {
        Some(seed) => Fuzzer::from_u64(seed),
        None => Fuzzer::new(None),
    };
    info!(
        "stress: {} trees x {} keys in [0, {}), {} removes",
        config.trees, config.insertions, config.range, config.removes
    );
    debug!("stress seed: {:02x?}", fuzzer.seed);

    for tree in 0..config.trees {
        let report = run_tree(config, &mut fuzzer, tree)?;
        on_tree(&report);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid() {
        assert!(StressConfig::FULL.validate().is_ok());
        assert!(StressConfig::SMALL.validate().is_ok());
    }

    #[test]
    fn rejects_impossible_configs() {
        let empty = StressConfig {
            insertions: 0,
            ..StressConfig::SMALL
        };
        assert!(matches!(empty.validate(), Err(StressError::InvalidConfig(_))));

        let narrow = StressConfig {
            range: 50,
            ..StressConfig::SMALL
        };
        assert!(matches!(narrow.validate(), Err(StressError::InvalidConfig(_))));

        let greedy = StressConfig {
            removes: 50,
            ..StressConfig::SMALL
        };
        assert!(matches!(greedy.validate(), Err(StressError::InvalidConfig(_))));
    }

    #[test]
    fn stage_display() {
        let err = StressError::InvalidTree {
            stage: Stage::Remove,
        };
        assert_eq!(err.to_string(), "Invalid AVL tree (Pos-Remove)");
        let err = StressError::CountMismatch {
            stage: Stage::Insert,
            expected: 3,
            actual: 2,
        };
        assert_eq!(err.to_string(), "Invalid tree node count: expected 3, got 2");
    }

    #[test]
    fn single_round_reports_counts() {
        let mut fuzzer = Fuzzer::from_u64(1);
        let report = run_tree(&StressConfig::SMALL, &mut fuzzer, 0).unwrap();
        assert_eq!(report.count, 100);
        assert_eq!(report.count_after_remove, 90);
    }

    #[test]
    fn single_round_rejects_invalid_config() {
        let mut fuzzer = Fuzzer::from_u64(1);
        let oversized_removal = StressConfig {
            insertions: 10,
            removes: 8,
            range: 1000,
            ..StressConfig::SMALL
        };
        assert!(matches!(
            run_tree(&oversized_removal, &mut fuzzer, 0),
            Err(StressError::InvalidConfig(_))
        ));

        let narrow = StressConfig {
            range: 5,
            ..StressConfig::SMALL
        };
        assert!(matches!(
            run_tree(&narrow, &mut fuzzer, 0),
            Err(StressError::InvalidConfig(_))
        ));

        let empty_range = StressConfig {
            range: 0,
            ..StressConfig::SMALL
        };
        assert!(matches!(
            run_tree(&empty_range, &mut fuzzer, 0),
            Err(StressError::InvalidConfig(_))
        ));
    }
}
