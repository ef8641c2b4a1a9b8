use crate::error::SimplexError;

/// A linear program in standard form: maximize cᵗx subject to Ax ≤ b, x ≥ 0.
///
/// Construction only succeeds when the dimensions agree, every entry is
/// finite and `b ≥ 0`, so the all-zero point is a feasible start.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Problem {
    /// Objective coefficients, one per column
    objective: Vec<f64>,
    /// Constraint matrix, one row per constraint
    constraints: Vec<Vec<f64>>,
    /// Right-hand side, one entry per constraint
    rhs: Vec<f64>,
}

impl Problem {
    pub fn new(objective: Vec<f64>, constraints: Vec<Vec<f64>>, rhs: Vec<f64>) -> Result<Self, SimplexError> {
        let n = objective.len();

        if constraints.len() != rhs.len() {
            return Err(SimplexError::RhsLength {
                expected: constraints.len(),
                found: rhs.len(),
            });
        }

        for (j, &value) in objective.iter().enumerate() {
            if !value.is_finite() {
                return Err(SimplexError::NonFinite {
                    location: format!("objective coefficient {}", j),
                    value,
                });
            }
        }

        for (i, row) in constraints.iter().enumerate() {
            if row.len() != n {
                return Err(SimplexError::RowLength {
                    row: i,
                    expected: n,
                    found: row.len(),
                });
            }
            if let Some((j, &value)) = row.iter().enumerate().find(|(_, v)| !v.is_finite()) {
                return Err(SimplexError::NonFinite {
                    location: format!("constraint {} coefficient {}", i, j),
                    value,
                });
            }
        }

        for (i, &value) in rhs.iter().enumerate() {
            if !value.is_finite() {
                return Err(SimplexError::NonFinite {
                    location: format!("right-hand side {}", i),
                    value,
                });
            }
            // No phase one: a negative bound leaves no slack-free starting basis
            if value < 0.0 {
                return Err(SimplexError::NegativeRhs { row: i, value });
            }
        }

        Ok(Self {
            objective,
            constraints,
            rhs,
        })
    }

    pub fn objective(&self) -> &[f64] {
        &self.objective
    }

    pub fn constraints(&self) -> &[Vec<f64>] {
        &self.constraints
    }

    pub fn rhs(&self) -> &[f64] {
        &self.rhs
    }

    pub fn num_variables(&self) -> usize {
        self.objective.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }
}
