//! Option value coercion.

use crate::error::ValueError;

/// Coarsest time granularity the kernel accepts (one second, in ns).
pub const MAX_TIME_GRAN: u32 = 1_000_000_000;

/// Parse an unsigned decimal option value.
///
/// Only ASCII digits are accepted: no sign, no whitespace and no second `=`.
pub fn parse_unsigned(value: &str) -> Result<u32, ValueError> {
    if value.is_empty() {
        return Err(ValueError::Empty);
    }
    if value.starts_with('-') {
        return Err(ValueError::Negative(value.to_string()));
    }
    if value.contains('=') {
        return Err(ValueError::NestedAssignment(value.to_string()));
    }
    if !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValueError::NotDecimal(value.to_string()));
    }
    value
        .parse::<u32>()
        .map_err(|_| ValueError::OutOfRange(value.to_string()))
}

/// Round `value` up to the smallest power of ten that is not below it.
///
/// Zero rounds to 1 and anything above [`MAX_TIME_GRAN`] saturates there.
pub fn round_up_power_of_ten(value: u32) -> u32 {
    let mut p: u32 = 1;
    while p < value {
        match p.checked_mul(10) {
            Some(next) => p = next,
            None => return MAX_TIME_GRAN,
        }
    }
    p
}
