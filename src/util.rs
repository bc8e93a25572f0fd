/// Numeric conversion helpers.
///
/// Provides checked conversions between `i64`, `usize`, and `f64` that are
/// used by the evaluator for slice bounds, repetition counts, and
/// exponentiation.
pub mod num;
