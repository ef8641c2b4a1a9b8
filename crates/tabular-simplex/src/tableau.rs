use std::fmt;

use crate::error::SimplexError;
use crate::problem::Problem;

/// Tableau entry used for one Gauss-Jordan step
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pivot {
    pub row: usize,
    pub column: usize,
}

/// Result of scanning the tableau for the next pivot
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PivotSelection {
    /// No objective-row entry is positive
    Optimal,
    /// The entering column has no positive constraint entry
    Unbounded { column: usize },
    /// Entering column and leaving row
    Pivot(Pivot),
}

/// Dense simplex tableau.
///
/// `m + 1` rows by `n + 1` columns: rows `0..m` are constraints and row `m`
/// is the objective; column `n` is the right-hand side. The bottom-right
/// entry always holds the negated objective value.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>"))]
#[derive(Debug, Clone, PartialEq)]
pub struct Tableau {
    data: Vec<Vec<f64>>,
}

impl TryFrom<Vec<Vec<f64>>> for Tableau {
    type Error = SimplexError;

    /// Accepts a non-empty rectangular matrix with at least the RHS column
    fn try_from(data: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        let Some(first) = data.first() else {
            return Err(SimplexError::MalformedTableau("no rows".to_string()));
        };
        let width = first.len();
        if width == 0 {
            return Err(SimplexError::MalformedTableau("no right-hand side column".to_string()));
        }
        if let Some(i) = data.iter().position(|row| row.len() != width) {
            return Err(SimplexError::MalformedTableau(format!(
                "row {} has {} entries, expected {}",
                i,
                data[i].len(),
                width
            )));
        }
        Ok(Self { data })
    }
}

impl From<Tableau> for Vec<Vec<f64>> {
    fn from(tableau: Tableau) -> Self {
        tableau.data
    }
}

impl Tableau {
    /// Stack `[A | b]` on top of `[c | 0]`
    pub fn from_problem(problem: &Problem) -> Self {
        let n = problem.num_variables();
        let mut data = Vec::with_capacity(problem.num_constraints() + 1);

        for (row, &rhs) in problem.constraints().iter().zip(problem.rhs()) {
            let mut line = Vec::with_capacity(n + 1);
            line.extend_from_slice(row);
            line.push(rhs);
            data.push(line);
        }

        let mut obj_row = Vec::with_capacity(n + 1);
        obj_row.extend_from_slice(problem.objective());
        obj_row.push(0.0);
        data.push(obj_row);

        Self { data }
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.data
    }

    pub fn num_rows(&self) -> usize {
        self.data.len()
    }

    pub fn num_columns(&self) -> usize {
        self.data[0].len()
    }

    /// Number of constraint rows (`m`)
    pub fn num_constraints(&self) -> usize {
        self.data.len() - 1
    }

    /// Number of variable columns (`n`), excluding the RHS
    pub fn num_variables(&self) -> usize {
        self.data[0].len() - 1
    }

    pub fn get(&self, row: usize, column: usize) -> Option<f64> {
        self.data.get(row).and_then(|r| r.get(column)).copied()
    }

    pub fn rhs(&self, row: usize) -> Option<f64> {
        self.data.get(row).and_then(|r| r.last()).copied()
    }

    /// Objective row without the RHS entry
    pub fn objective_row(&self) -> &[f64] {
        let obj = &self.data[self.num_constraints()];
        &obj[..obj.len() - 1]
    }

    /// Whether some column still has a strictly positive objective entry
    pub fn can_improve(&self) -> bool {
        self.objective_row().iter().any(|&v| v > 0.0)
    }

    /// Choose the next pivot.
    ///
    /// The entering column is the one with the *smallest* strictly positive
    /// objective entry, lowest index on ties. The leaving row is the minimum
    /// of `rhs / entry` over rows whose entry is strictly positive, lowest
    /// index on ties.
    pub fn select_pivot(&self) -> PivotSelection {
        let mut entering: Option<(usize, f64)> = None;
        for (j, &value) in self.objective_row().iter().enumerate() {
            if value > 0.0 && entering.is_none_or(|(_, best)| value < best) {
                entering = Some((j, value));
            }
        }

        let Some((column, _)) = entering else {
            return PivotSelection::Optimal;
        };

        match self.ratio_test(column) {
            Some(row) => PivotSelection::Pivot(Pivot { row, column }),
            None => PivotSelection::Unbounded { column },
        }
    }

    fn ratio_test(&self, column: usize) -> Option<usize> {
        let rhs_col = self.num_variables();

        let mut min_ratio = f64::INFINITY;
        let mut min_row = None;

        for (i, row) in self.data[..self.num_constraints()].iter().enumerate() {
            let entry = row[column];
            if entry > 0.0 {
                let ratio = row[rhs_col] / entry;
                if ratio < min_ratio {
                    min_ratio = ratio;
                    min_row = Some(i);
                }
            }
        }

        min_row
    }

    /// Pivot on `pivot`, after checking it addresses a non-zero body entry
    pub fn apply_pivot(&mut self, pivot: Pivot) -> Result<(), SimplexError> {
        let Pivot { row, column } = pivot;
        if row >= self.num_constraints() || column >= self.num_variables() {
            return Err(SimplexError::PivotOutOfRange {
                row,
                column,
                rows: self.num_constraints(),
                columns: self.num_variables(),
            });
        }
        if self.data[row][column] == 0.0 {
            return Err(SimplexError::ZeroPivot { row, column });
        }

        self.eliminate(pivot);
        Ok(())
    }

    /// Normalize the pivot row, then clear the pivot column in every other
    /// row, the objective row included.
    pub(crate) fn eliminate(&mut self, pivot: Pivot) {
        let Pivot { row, column } = pivot;

        let pivot_val = self.data[row][column];
        for value in self.data[row].iter_mut() {
            *value /= pivot_val;
        }

        let pivot_row = self.data[row].clone();
        for (i, line) in self.data.iter_mut().enumerate() {
            if i == row {
                continue;
            }
            let factor = line[column];
            for (value, &p) in line.iter_mut().zip(&pivot_row) {
                *value -= factor * p;
            }
        }
    }

    /// Row holding the unit entry of a basic column.
    ///
    /// A column is basic when exactly one constraint entry exceeds
    /// `tolerance` in magnitude, that entry is within `tolerance` of 1, and
    /// its objective entry is within `tolerance` of 0.
    pub fn basic_row(&self, column: usize, tolerance: f64) -> Option<usize> {
        let m = self.num_constraints();

        let mut nonzero = self.data[..m]
            .iter()
            .enumerate()
            .filter(|(_, row)| row[column].abs() > tolerance);
        let (row, _) = nonzero.next()?;
        if nonzero.next().is_some() {
            return None;
        }

        if (self.data[row][column] - 1.0).abs() >= tolerance {
            return None;
        }
        if self.data[m][column].abs() > tolerance {
            return None;
        }

        Some(row)
    }

    /// `(variable, value)` for every basic column, by ascending index.
    /// Columns left out are non-basic and sit at zero.
    pub fn primal_solution(&self, tolerance: f64) -> Vec<(usize, f64)> {
        let rhs_col = self.num_variables();
        (0..self.num_variables())
            .filter_map(|j| self.basic_row(j, tolerance).map(|i| (j, self.data[i][rhs_col])))
            .collect()
    }

    pub fn objective_value(&self) -> f64 {
        -self.data[self.num_constraints()][self.num_variables()]
    }
}

impl fmt::Display for Tableau {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.num_constraints();
        for (i, row) in self.data.iter().enumerate() {
            if i == m {
                let width = row.len() * 12 + 2;
                writeln!(f, "{}", "-".repeat(width))?;
            }
            let (body, rhs) = row.split_at(row.len() - 1);
            for value in body {
                write!(f, "{:>12.4}", value)?;
            }
            writeln!(f, " |{:>12.4}", rhs[0])?;
        }
        Ok(())
    }
}
