//! Differential fuzzing: compare our splitters with SQLite's parser.

use honggfuzz::fuzz;
use sql_values_rs::differential_testing::run_differential_test;
use sql_values_rs::testing::FuzzValue;

fn main() {
    loop {
        fuzz!(|rows: Vec<Vec<FuzzValue>>| {
            run_differential_test(&rows);
        });
    }
}
