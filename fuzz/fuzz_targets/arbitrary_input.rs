//! Robustness fuzzer: arbitrary text must never panic any entry point.

use honggfuzz::fuzz;
use sql_values_rs::testing::test_arbitrary_input;

fn main() {
    loop {
        fuzz!(|input: String| {
            test_arbitrary_input(&input);
        });
    }
}
