mod error;
mod problem;
mod simplex;
mod solution;
mod tableau;

pub use error::SimplexError;
pub use problem::Problem;
pub use simplex::{DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE, Simplex, Step};
pub use solution::{Solution, SolutionStatus};
pub use tableau::{Pivot, PivotSelection, Tableau};
