//! Error types for configuration and the worker chain.

use thiserror::Error;

/// A run parameter that violates a startup constraint.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("worker count must be at least 2, got {0}")]
    TooFewWorkers(usize),

    #[error("iteration count must be a positive integer")]
    NoIterations,

    #[error("grid size must be at least 3, got {0}")]
    GridTooSmall(usize),

    #[error("grid size {grid_size} is not divisible by worker count {workers}")]
    Indivisible { grid_size: usize, workers: usize },

    #[error("fireplace columns {start}..{end} do not fit in a grid of width {width}")]
    FireplaceOutOfRange {
        start: usize,
        end: usize,
        width: usize,
    },
}

/// Failures of a row transfer between two chain-adjacent workers.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("worker {rank}: peer {peer} hung up")]
    PeerDisconnected { rank: usize, peer: usize },

    #[error("worker {rank}: row from peer {peer} has {got} values, expected {expected}")]
    RowLength {
        rank: usize,
        peer: usize,
        expected: usize,
        got: usize,
    },

    #[error("worker {rank}: coordinator stopped collecting")]
    CollectorClosed { rank: usize },

    #[error("coordinator: snapshot channel closed with {missing} slice(s) outstanding")]
    CollectorStarved { missing: usize },
}

#[derive(Debug, Error)]
pub enum HeatError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),

    #[error("worker {0} panicked")]
    WorkerPanicked(usize),

    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, HeatError>;
