use log::{Level, debug, log, warn};

use crate::error::SimplexError;
use crate::problem::Problem;
use crate::solution::{Solution, SolutionStatus};
use crate::tableau::{Pivot, PivotSelection, Tableau};

pub const DEFAULT_MAX_ITERATIONS: usize = 1000;
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Outcome of a single [`Simplex::step`]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// One pivot was applied
    Pivoted(Pivot),
    /// Nothing left to improve
    Optimal,
    /// `column` can grow without limit
    Unbounded { column: usize },
    /// The iteration cap was reached before optimality was proven
    IterationLimit,
}

/// Tableau simplex solver for `max cᵗx, Ax ≤ b, x ≥ 0`
#[derive(Debug, Clone)]
pub struct Simplex {
    tableau: Tableau,
    /// Maximum pivots before giving up
    max_iterations: usize,
    /// Tolerance for recognising basic columns
    tolerance: f64,
    /// Emit the pivot trace at info level
    verbose: bool,
    iterations: usize,
}

impl Simplex {
    pub fn new(objective: Vec<f64>, constraints: Vec<Vec<f64>>, rhs: Vec<f64>) -> Result<Self, SimplexError> {
        let problem = Problem::new(objective, constraints, rhs)?;
        Ok(Self::from_problem(&problem))
    }

    pub fn from_problem(problem: &Problem) -> Self {
        Self {
            tableau: Tableau::from_problem(problem),
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,
            verbose: false,
            iterations: 0,
        }
    }

    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.tolerance = tol;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn tableau(&self) -> &Tableau {
        &self.tableau
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    fn trace_level(&self) -> Level {
        if self.verbose { Level::Info } else { Level::Debug }
    }

    /// Select a pivot and, unless the loop should stop, apply it.
    ///
    /// Once the cap is reached no further pivot is selected, so a tableau
    /// that would report unbounded on the next scan ends at the limit.
    pub fn step(&mut self) -> Step {
        if !self.tableau.can_improve() {
            return Step::Optimal;
        }
        if self.iterations >= self.max_iterations {
            return Step::IterationLimit;
        }

        let pivot = match self.tableau.select_pivot() {
            PivotSelection::Optimal => return Step::Optimal,
            PivotSelection::Unbounded { column } => return Step::Unbounded { column },
            PivotSelection::Pivot(pivot) => pivot,
        };

        let level = self.trace_level();
        log!(level, "Iteration {}", self.iterations + 1);
        log!(level, "Pivot: row {}, col {}", pivot.row, pivot.column);

        // select_pivot only returns strictly positive entries
        self.tableau.eliminate(pivot);
        self.iterations += 1;

        log!(level, "Tableau after pivot:\n{}", self.tableau);
        debug!("Objective value: {}", self.tableau.objective_value());

        Step::Pivoted(pivot)
    }

    /// Pivot until the tableau is optimal, unbounded, or the cap is hit
    pub fn solve(mut self) -> Solution {
        let level = self.trace_level();
        log!(level, "Initial tableau:\n{}", self.tableau);

        let status = loop {
            match self.step() {
                Step::Pivoted(_) => continue,
                Step::Optimal => break SolutionStatus::Optimal,
                Step::Unbounded { column } => {
                    warn!("Problem is unbounded: column {} has no limiting row", column);
                    return Solution::unbounded(self.tableau, self.iterations);
                }
                Step::IterationLimit => {
                    warn!("Maximum iterations ({}) reached before optimality", self.max_iterations);
                    break SolutionStatus::IterationLimit;
                }
            }
        };

        let solution = Solution::extracted(status, self.tableau, self.tolerance, self.iterations);

        if let Some(vars) = &solution.variables {
            log!(level, "Primal solution:");
            for (j, value) in vars {
                log!(level, "  x_{} = {}", j, value);
            }
        }

        solution
    }
}
