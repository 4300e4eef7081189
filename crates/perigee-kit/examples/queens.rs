//! N-queens demo: one boolean per square, cardinality gadgets per row,
//! column, and diagonal. Run with:
//!
//!     cargo run -p perigee-kit --example queens -- [n]

use perigee_kit::{AutoSolver, CnfBuilder, SatResult};

fn main() {
    let n: i32 = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(8);
    let var = |r: i32, c: i32| (r - 1) * n + c;

    let mut builder = CnfBuilder::with_vars((n * n) as u32);
    for r in 1..=n {
        let row: Vec<i32> = (1..=n).map(|c| var(r, c)).collect();
        builder.exactly_one(&row);
    }
    for c in 1..=n {
        let column: Vec<i32> = (1..=n).map(|r| var(r, c)).collect();
        builder.at_most_one(&column);
    }
    for r1 in 1..=n {
        for c1 in 1..=n {
            for r2 in r1 + 1..=n {
                let dr = r2 - r1;
                for c2 in [c1 - dr, c1 + dr] {
                    if (1..=n).contains(&c2) {
                        builder.add_clause([-var(r1, c1), -var(r2, c2)]);
                    }
                }
            }
        }
    }

    let auto = AutoSolver::from_builder(builder);
    match auto.solve().expect("solver failed") {
        SatResult::Sat(model) => {
            for r in 1..=n {
                let line: String = (1..=n)
                    .map(|c| if model.value(var(r, c) as u32) { 'Q' } else { '.' })
                    .collect();
                println!("{line}");
            }
        }
        SatResult::Unsat => println!("no placement for n = {n}"),
    }
}
