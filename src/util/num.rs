/// Safely converts an `i64` to a `usize` if and only if it can be
/// represented exactly.
///
/// ## Errors
/// Returns `Err(error)` if the value is negative or exceeds the maximum
/// representable `usize`.
///
/// ## Parameters
/// - `value`: The integer to convert.
/// - `error`: The error to return if conversion is not lossless.
///
/// ## Returns
/// - `Ok(usize)`: The converted value if it is safe.
/// - `Err(error)`: If the value does not fit.
///
/// ## Example
/// ```
/// use snakelet::util::num::i64_to_usize_checked;
///
/// assert_eq!(i64_to_usize_checked(42, "negative!").unwrap(), 42);
/// assert!(i64_to_usize_checked(-1, "negative!").is_err());
/// ```
pub fn i64_to_usize_checked<E>(value: i64, error: E) -> Result<usize, E> {
    usize::try_from(value).map_err(|_| error)
}

/// Safely converts a `usize` to an `i64` if and only if it can be
/// represented exactly.
///
/// ## Errors
/// Returns `Err(error)` if the value exceeds `i64::MAX`.
///
/// ## Parameters
/// - `value`: The unsigned value to convert.
/// - `error`: The error to return if conversion would overflow.
///
/// ## Example
/// ```
/// use snakelet::util::num::usize_to_i64_checked;
///
/// assert_eq!(usize_to_i64_checked(3, "too big!").unwrap(), 3);
/// ```
pub fn usize_to_i64_checked<E>(value: usize, error: E) -> Result<i64, E> {
    i64::try_from(value).map_err(|_| error)
}

/// Truncates an `f64` toward zero and converts it to `i64`.
///
/// The conversion is rejected for non-finite values and for values whose
/// truncation falls outside the `i64` range.
///
/// ## Errors
/// Returns `Err(error)` for NaN, infinities, and out-of-range values.
///
/// ## Parameters
/// - `value`: The floating-point value to truncate.
/// - `error`: The error to return if conversion is invalid.
///
/// ## Example
/// ```
/// use snakelet::util::num::f64_to_i64_truncated;
///
/// assert_eq!(f64_to_i64_truncated(3.9, "out of range!").unwrap(), 3);
/// assert_eq!(f64_to_i64_truncated(-3.9, "out of range!").unwrap(), -3);
/// assert!(f64_to_i64_truncated(f64::INFINITY, "out of range!").is_err());
/// ```
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_precision_loss)]
pub fn f64_to_i64_truncated<E>(value: f64, error: E) -> Result<i64, E> {
    if !value.is_finite() {
        return Err(error);
    }

    let truncated = value.trunc();
    if truncated < i64::MIN as f64 || truncated > i64::MAX as f64 {
        return Err(error);
    }
    Ok(truncated as i64)
}

/// Converts an `i64` to `f64` for mixed-type arithmetic.
///
/// Values beyond 2^53 lose precision, which matches the language's
/// promotion rule: mixed arithmetic is computed in double precision.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub const fn i64_as_f64(value: i64) -> f64 {
    value as f64
}
