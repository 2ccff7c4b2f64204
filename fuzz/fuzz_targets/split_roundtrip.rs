//! Round-trip fuzzer for the tuple and field splitters.
//!
//! Renders arbitrary rows as a tuple list and checks that splitting returns
//! every value, in order, with its original content.

use honggfuzz::fuzz;
use sql_values_rs::testing::{FuzzValue, test_split_roundtrip};

fn main() {
    loop {
        fuzz!(|rows: Vec<Vec<FuzzValue>>| {
            test_split_roundtrip(&rows);
        });
    }
}
