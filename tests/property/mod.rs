//! Property-based tests for tree invariants

mod cloning;
mod ordering;
