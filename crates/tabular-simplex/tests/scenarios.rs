use tabular_simplex::{DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE, PivotSelection, Simplex, SolutionStatus, Step};

const EPS: f64 = 1e-9;

fn production_plan() -> Simplex {
    Simplex::new(
        vec![300.0, 250.0, 450.0],
        vec![
            vec![15.0, 20.0, 25.0],
            vec![35.0, 60.0, 60.0],
            vec![20.0, 30.0, 25.0],
            vec![0.0, 250.0, 0.0],
        ],
        vec![1200.0, 3000.0, 1500.0, 500.0],
    )
    .unwrap()
}

fn with_slacks() -> Simplex {
    Simplex::new(
        vec![5.0, 4.0, 3.0, 0.0, 0.0, 0.0],
        vec![
            vec![2.0, 3.0, 1.0, 1.0, 0.0, 0.0],
            vec![4.0, 1.0, 2.0, 0.0, 1.0, 0.0],
            vec![3.0, 4.0, 2.0, 0.0, 0.0, 1.0],
        ],
        vec![5.0, 11.0, 8.0],
    )
    .unwrap()
}

/// Step to completion, checking feasibility and monotonicity after every pivot
fn run_checked(mut simplex: Simplex) -> (Simplex, Step) {
    let mut last_objective = simplex.tableau().objective_value();

    loop {
        match simplex.step() {
            Step::Pivoted(pivot) => {
                let tableau = simplex.tableau();
                for row in 0..tableau.num_constraints() {
                    let rhs = tableau.rhs(row).unwrap();
                    assert!(rhs >= -EPS, "row {} went infeasible ({}) after {:?}", row, rhs, pivot);
                }

                let objective = tableau.objective_value();
                assert!(
                    objective >= last_objective - EPS,
                    "objective fell from {} to {} after {:?}",
                    last_objective,
                    objective,
                    pivot
                );
                last_objective = objective;
            }
            outcome => return (simplex, outcome),
        }
    }
}

#[test]
fn production_plan_reaches_optimum() {
    let solution = production_plan().solve();

    assert_eq!(solution.status, SolutionStatus::Optimal);
    assert!(solution.iterations <= DEFAULT_MAX_ITERATIONS);
    assert_eq!(solution.iterations, 3);

    let objective = solution.objective_value.unwrap();
    assert!(objective.is_finite() && objective >= 0.0);
    assert!((objective - 23060.0).abs() < 1e-6, "obj = {} (expected 23060)", objective);

    let variables = solution.variables.clone().unwrap();
    let indices: Vec<usize> = variables.iter().map(|&(j, _)| j).collect();
    assert_eq!(indices, vec![0, 1, 2]);
    assert!((solution.value_of(0) - 56.0).abs() < 1e-6, "x0 = {}", solution.value_of(0));
    assert!((solution.value_of(1) - 2.0).abs() < 1e-6, "x1 = {}", solution.value_of(1));
    assert!((solution.value_of(2) - 12.8).abs() < 1e-6, "x2 = {}", solution.value_of(2));
}

#[test]
fn every_pivot_keeps_feasibility_and_objective_order() {
    let (_, outcome) = run_checked(production_plan());
    assert_eq!(outcome, Step::Optimal);

    let (simplex, outcome) = run_checked(with_slacks());
    assert_eq!(outcome, Step::Optimal);
    assert!(simplex.iterations() > 0);
}

#[test]
fn optimal_tableau_has_no_positive_objective_entry() {
    for simplex in [production_plan(), with_slacks()] {
        let solution = simplex.solve();
        assert_eq!(solution.status, SolutionStatus::Optimal);
        assert!(solution.tableau.objective_row().iter().all(|&v| v <= EPS));
        assert_eq!(solution.tableau.select_pivot(), PivotSelection::Optimal);
    }
}

#[test]
fn slack_problem_matches_known_optimum() {
    // Maximize 5x + 4y + 3z; optimum 13 at x=2, y=0, z=1
    let solution = with_slacks().solve();

    assert_eq!(solution.status, SolutionStatus::Optimal);
    let objective = solution.objective_value.unwrap();
    assert!((objective - 13.0).abs() < 1e-6, "obj = {} (expected 13)", objective);
    assert!((solution.value_of(0) - 2.0).abs() < 1e-6, "x = {}", solution.value_of(0));
    assert!(solution.value_of(1).abs() < 1e-6, "y = {}", solution.value_of(1));
    assert!((solution.value_of(2) - 1.0).abs() < 1e-6, "z = {}", solution.value_of(2));
}

#[test]
fn unbounded_single_column() {
    let simplex = Simplex::new(vec![1.0], vec![vec![-1.0]], vec![5.0]).unwrap();
    assert_eq!(simplex.tableau().select_pivot(), PivotSelection::Unbounded { column: 0 });

    let solution = simplex.solve();
    assert_eq!(solution.status, SolutionStatus::Unbounded);
    assert_eq!(solution.iterations, 0);

    // The reported column can still improve and nothing limits it
    let tableau = &solution.tableau;
    assert!(tableau.objective_row()[0] > 0.0);
    assert!((0..tableau.num_constraints()).all(|i| tableau.get(i, 0).unwrap() <= 0.0));

    let (_, variables, objective) = solution.into_parts();
    assert!(variables.is_none());
    assert!(objective.is_none());
}

#[test]
fn already_optimal_start() {
    let solution = Simplex::new(vec![-1.0], vec![vec![1.0]], vec![5.0]).unwrap().solve();

    assert_eq!(solution.status, SolutionStatus::Optimal);
    assert_eq!(solution.iterations, 0);
    assert_eq!(solution.objective_value, Some(0.0));
    assert_eq!(solution.variables, Some(Vec::new()));
}

#[test]
fn degenerate_problem_that_stops_early() {
    // Zero right-hand sides make every ratio zero, yet this input still terminates
    let solution = Simplex::new(
        vec![10.0, -57.0, -9.0, -24.0],
        vec![
            vec![0.5, -5.5, -2.5, 9.0],
            vec![0.5, -1.5, -0.5, 1.0],
        ],
        vec![0.0, 0.0],
    )
    .unwrap()
    .with_max_iterations(25)
    .solve();

    assert_eq!(solution.status, SolutionStatus::Optimal);
    assert_eq!(solution.iterations, 2);
    assert!(solution.objective_value.unwrap().abs() < EPS);
}

fn cycling_problem() -> Simplex {
    Simplex::new(
        vec![2.0, -11.0, -1.0, -2.5, -3.0, 0.0, 0.0, 0.0],
        vec![
            vec![0.5, -3.5, 0.0, -2.0, 0.5, 1.0, 0.0, 0.0],
            vec![-2.25, 0.0, -2.25, 1.0, -5.0, 0.0, 1.0, 0.0],
            vec![8.0, -4.0, -1.0, -2.0, 3.0, 0.0, 0.0, 1.0],
        ],
        vec![0.0, 0.0, 0.0],
    )
    .unwrap()
}

fn basis(simplex: &Simplex) -> Vec<usize> {
    simplex
        .tableau()
        .primal_solution(DEFAULT_TOLERANCE)
        .into_iter()
        .map(|(j, _)| j)
        .collect()
}

#[test]
fn degenerate_cycle_revisits_basis() {
    let mut simplex = cycling_problem();
    let mut history = vec![basis(&simplex)];
    for _ in 0..17 {
        assert!(matches!(simplex.step(), Step::Pivoted(_)));
        history.push(basis(&simplex));
    }

    // Eight pivots bring the tableau back to the basis after the first one
    assert_eq!(history[1], vec![0, 6, 7]);
    assert_eq!(history[9], history[1]);
    assert_eq!(history[17], history[9]);
    assert_ne!(history[0], history[1]);
}

#[test]
fn degenerate_cycle_ends_at_the_cap() {
    for cap in [12, DEFAULT_MAX_ITERATIONS] {
        let solution = cycling_problem().with_max_iterations(cap).solve();

        assert_eq!(solution.status, SolutionStatus::IterationLimit);
        assert_eq!(solution.iterations, cap);
        assert!(solution.objective_value.unwrap().abs() < EPS);
        let tableau = &solution.tableau;
        assert!((0..tableau.num_constraints()).all(|i| tableau.rhs(i).unwrap().abs() < EPS));
    }
}

#[cfg(feature = "serde")]
#[test]
fn solution_round_trips_through_json() {
    let solution = production_plan().solve();
    let json = serde_json::to_string(&solution).unwrap();
    let back: tabular_simplex::Solution = serde_json::from_str(&json).unwrap();

    assert_eq!(back.status, solution.status);
    assert_eq!(back.iterations, solution.iterations);
    assert_eq!(back.tableau.num_rows(), 5);
}

#[cfg(feature = "serde")]
#[test]
fn malformed_tableau_json_is_rejected() {
    use tabular_simplex::Tableau;

    assert!(serde_json::from_str::<Tableau>("[]").is_err());
    assert!(serde_json::from_str::<Tableau>("[[]]").is_err());
    assert!(serde_json::from_str::<Tableau>("[[1.0, 2.0], [3.0]]").is_err());

    let tableau: Tableau = serde_json::from_str("[[1.0, 2.0], [3.0, 0.0]]").unwrap();
    assert_eq!(tableau.num_columns(), 2);
}
