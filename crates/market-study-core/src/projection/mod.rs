//! Two-year quarterly projection comparing a baseline plan against the same
//! plan run with the accelerator programme.
//!
//! Data flows one way: parameters → [`engine`] → period series →
//! [`breakeven`] → [`summary`]. [`analysis`] chains all of it for callers
//! that want a single result.

pub mod adjustment;
pub mod analysis;
pub mod breakeven;
pub mod engine;
pub mod params;
pub mod summary;

pub use adjustment::{ScenarioAdjustment, MAX_ADJUSTMENT_FACTOR};
pub use analysis::{analyze_projection, ProjectionAnalysis, ScenarioSnapshot};
pub use breakeven::{find_breakeven, BreakevenResult};
pub use engine::{project, project_with_adjustment, PeriodFigures, PeriodPoint, Projection};
pub use params::{
    resolve_parameters, validate_parameters, BusinessParameters, ResolvedParameters, MAX_FIGURE,
};
pub use summary::{summarize, ComparisonSummary};
