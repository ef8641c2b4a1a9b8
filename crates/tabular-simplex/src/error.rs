use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimplexError {
    #[error("Constraint row {row} has {found} coefficients, expected {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("Right-hand side has {found} entries, expected one per constraint ({expected})")]
    RhsLength { expected: usize, found: usize },
    #[error("Non-finite value {value} in {location}")]
    NonFinite { location: String, value: f64 },
    #[error("Negative right-hand side {value} in constraint {row}: the all-zero start is infeasible")]
    NegativeRhs { row: usize, value: f64 },
    #[error("Pivot ({row}, {column}) lies outside the {rows}x{columns} tableau body")]
    PivotOutOfRange {
        row: usize,
        column: usize,
        rows: usize,
        columns: usize,
    },
    #[error("Pivot entry at ({row}, {column}) is zero")]
    ZeroPivot { row: usize, column: usize },
    #[error("Malformed tableau: {0}")]
    MalformedTableau(String),
}
