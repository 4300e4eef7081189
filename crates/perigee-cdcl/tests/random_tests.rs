//! Randomized soundness tests: the solver against a brute-force enumerator
//! on small 3-SAT formulas, driven by a seeded PRNG so failures replay.

use perigee_base::utils::XorShift64;
use perigee_cdcl::{SatResult, Solver};

/// Random 3-literal clauses over `num_vars` variables.
fn random_formula(rng: &mut XorShift64, num_vars: u32, num_clauses: usize) -> Vec<Vec<i32>> {
    (0..num_clauses)
        .map(|_| {
            let mut clause = Vec::with_capacity(3);
            while clause.len() < 3 {
                let var = rng.next_below(u64::from(num_vars)) as i32 + 1;
                if clause.iter().any(|&l: &i32| l.abs() == var) {
                    continue;
                }
                clause.push(if rng.next_bool() { var } else { -var });
            }
            clause
        })
        .collect()
}

/// Exhaustive satisfiability check, feasible for `num_vars <= 20`.
fn brute_force_sat(num_vars: u32, clauses: &[Vec<i32>]) -> bool {
    for assignment in 0u32..1 << num_vars {
        let holds = clauses.iter().all(|clause| {
            clause.iter().any(|&lit| {
                let bit = (assignment >> (lit.unsigned_abs() - 1)) & 1 == 1;
                (lit > 0) == bit
            })
        });
        if holds {
            return true;
        }
    }
    false
}

fn solve(num_vars: u32, clauses: &[Vec<i32>]) -> SatResult {
    let mut solver = Solver::new(num_vars, 1 << 16).unwrap();
    for clause in clauses {
        solver.add_clause(clause).unwrap();
    }
    solver.solve().unwrap()
}

#[test]
fn test_agrees_with_brute_force() {
    let mut rng = XorShift64::new(0xfeed);
    for round in 0..300 {
        let num_vars = 4 + (round % 7) as u32; // 4..=10
        let num_clauses = (f64::from(num_vars) * 4.3) as usize;
        let clauses = random_formula(&mut rng, num_vars, num_clauses);

        let expected = brute_force_sat(num_vars, &clauses);
        let result = solve(num_vars, &clauses);
        assert_eq!(
            result.is_sat(),
            expected,
            "round {round} disagrees on {clauses:?}"
        );

        // soundness of SAT: the reported model satisfies every clause
        if let SatResult::Sat(model) = &result {
            for clause in &clauses {
                let satisfied = clause
                    .iter()
                    .any(|&lit| (lit > 0) == model.value(lit.unsigned_abs()));
                assert!(satisfied, "round {round}: model misses {clause:?}");
            }
        }
    }
}

#[test]
fn test_deterministic_models() {
    let mut rng = XorShift64::new(0xdead);
    for _ in 0..50 {
        let clauses = random_formula(&mut rng, 9, 30);
        let first = solve(9, &clauses);
        let second = solve(9, &clauses);
        assert_eq!(first, second);
    }
}

#[test]
fn test_planted_solutions_found() {
    // every clause is forced to agree with a hidden assignment, so the
    // formula is satisfiable by construction even at high density
    let mut rng = XorShift64::new(0xace);
    for _ in 0..30 {
        let num_vars = 14u32;
        let planted: Vec<bool> = (0..num_vars).map(|_| rng.next_bool()).collect();
        let mut clauses = random_formula(&mut rng, num_vars, 90);
        for clause in &mut clauses {
            let agrees = |lit: i32| (lit > 0) == planted[(lit.unsigned_abs() - 1) as usize];
            if !clause.iter().copied().any(agrees) {
                clause[0] = -clause[0];
            }
        }
        assert!(solve(num_vars, &clauses).is_sat());
    }
}
