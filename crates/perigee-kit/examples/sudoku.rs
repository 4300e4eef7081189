//! 4x4 Sudoku demo: one boolean per (row, column, digit) triple, with
//! exactly-one constraints per cell, row, column, and box. Also counts the
//! remaining solutions by blocking each model and re-solving. Run with:
//!
//!     cargo run -p perigee-kit --example sudoku

use perigee_kit::{AutoSolver, CnfBuilder, SatResult};

const SIZE: i32 = 4;
const BOX: i32 = 2;

/// Variable for digit `d` at `(row, col)`, everything 1-based.
fn var(row: i32, col: i32, digit: i32) -> i32 {
    ((row - 1) * SIZE + (col - 1)) * SIZE + digit
}

fn main() {
    // 0 marks an open cell
    let givens: [[i32; 4]; 4] = [
        [1, 0, 0, 0],
        [0, 0, 3, 0],
        [0, 4, 0, 0],
        [0, 0, 0, 2],
    ];

    let mut builder = CnfBuilder::with_vars((SIZE * SIZE * SIZE) as u32);
    for row in 1..=SIZE {
        for col in 1..=SIZE {
            let cell: Vec<i32> = (1..=SIZE).map(|d| var(row, col, d)).collect();
            builder.exactly_one(&cell);
        }
    }
    for d in 1..=SIZE {
        for i in 1..=SIZE {
            let row: Vec<i32> = (1..=SIZE).map(|col| var(i, col, d)).collect();
            builder.exactly_one(&row);
            let col: Vec<i32> = (1..=SIZE).map(|row| var(row, i, d)).collect();
            builder.exactly_one(&col);
        }
        for br in 0..BOX {
            for bc in 0..BOX {
                let cells: Vec<i32> = (1..=BOX)
                    .flat_map(|r| (1..=BOX).map(move |c| var(br * BOX + r, bc * BOX + c, d)))
                    .collect();
                builder.exactly_one(&cells);
            }
        }
    }
    for (r, row) in givens.iter().enumerate() {
        for (c, &digit) in row.iter().enumerate() {
            if digit != 0 {
                builder.add_unit(var(r as i32 + 1, c as i32 + 1, digit));
            }
        }
    }

    let mut auto = AutoSolver::from_builder(builder);
    let mut solutions = 0;
    while let SatResult::Sat(model) = auto.solve().expect("solver failed") {
        solutions += 1;
        if solutions == 1 {
            for row in 1..=SIZE {
                let line: String = (1..=SIZE)
                    .map(|col| {
                        let digit = (1..=SIZE)
                            .find(|&d| model.value(var(row, col, d) as u32))
                            .unwrap_or(0);
                        char::from_digit(digit as u32, 10).unwrap_or('?')
                    })
                    .collect();
                println!("{line}");
            }
        }
        auto.block(model.lits());
    }
    println!("{solutions} solution(s)");
}
