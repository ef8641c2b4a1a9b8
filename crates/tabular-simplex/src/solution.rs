use crate::tableau::Tableau;

/// How the iteration loop ended
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolutionStatus {
    /// No objective-row entry is positive
    Optimal,
    /// The ratio test found no limiting row
    Unbounded,
    /// The pivot cap was hit before optimality was proven
    IterationLimit,
}

impl SolutionStatus {
    pub fn is_proven_optimal(self) -> bool {
        self == SolutionStatus::Optimal
    }
}

/// The result of running the simplex loop
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// Solution status
    pub status: SolutionStatus,
    /// Final tableau
    pub tableau: Tableau,
    /// Basic variables as `(index, value)`, `None` when unbounded
    pub variables: Option<Vec<(usize, f64)>>,
    /// Objective value, `None` when unbounded
    pub objective_value: Option<f64>,
    /// Pivots performed
    pub iterations: usize,
}

impl Solution {
    pub(crate) fn unbounded(tableau: Tableau, iterations: usize) -> Self {
        Self {
            status: SolutionStatus::Unbounded,
            tableau,
            variables: None,
            objective_value: None,
            iterations,
        }
    }

    pub(crate) fn extracted(status: SolutionStatus, tableau: Tableau, tolerance: f64, iterations: usize) -> Self {
        let variables = tableau.primal_solution(tolerance);
        let objective_value = tableau.objective_value();
        Self {
            status,
            tableau,
            variables: Some(variables),
            objective_value: Some(objective_value),
            iterations,
        }
    }

    /// Value of variable `index`; zero when it is not basic or the problem is unbounded
    pub fn value_of(&self, index: usize) -> f64 {
        self.variables
            .as_ref()
            .and_then(|vars| vars.iter().find(|(j, _)| *j == index))
            .map_or(0.0, |&(_, value)| value)
    }

    /// `(tableau, variables, objective)`
    pub fn into_parts(self) -> (Tableau, Option<Vec<(usize, f64)>>, Option<f64>) {
        (self.tableau, self.variables, self.objective_value)
    }
}
