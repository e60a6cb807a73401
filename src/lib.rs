pub mod config;
pub mod error;
pub mod grid;
pub mod implementations;
pub mod palette;
pub mod pnm;

pub use config::{Fireplace, RunConfig, load_config};
pub use error::{ConfigError, HeatError, Result, TransportError};
pub use grid::Grid;
pub use implementations::distributed::{run_distributed, run_distributed_with};
pub use implementations::single::reference_solve;
