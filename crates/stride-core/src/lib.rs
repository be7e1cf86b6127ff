// stride-core: variables, bounds, time segmentation, config and errors for the stride trajectory core.

pub mod arena;
pub mod config;
pub mod error;
pub mod segmentation;
pub mod types;
pub mod variables;

pub use arena::{VariableArena, VariableHandle};
pub use config::{DynamicsConfig, DynamicsModelKind, StrideConfig, TimingConfig};
pub use error::{ConfigError, DynamicsError, DynamicsResult, StrideError, StrideResult};
pub use types::{Bound, Coords3D, JacobianRow, VecBound};
pub use variables::{OptimizationVariables, ParameterSet};
