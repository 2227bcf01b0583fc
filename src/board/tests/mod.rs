//! Board module tests.
//!
//! Tests are organized into separate files by category:
//! - `movegen.rs` - Candidate generation geometry per piece kind
//! - `apply_undo.rs` - Reversible move protocol correctness
//! - `edge_cases.rs` - Castling, en passant, pins, check evasion
//! - `draw.rs` - Terminal states and insufficient material
//! - `proptest.rs` - Property-based tests

mod apply_undo;
mod edge_cases;
