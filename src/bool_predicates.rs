//! Serde predicates for boolean CLI flags.

/// Returns `true` when the provided flag is `false`.
///
/// Used in `skip_serializing_if` so an unset `--json` flag on the command
/// line does not override `json = true` from a config file.
///
/// # Examples
///
/// ```
/// use jobboard::bool_predicates;
///
/// assert!(bool_predicates::not(&false));
/// assert!(!bool_predicates::not(&true));
/// ```
#[must_use]
pub fn not<T>(value: &T) -> bool
where
    T: Copy + std::ops::Not<Output = bool>,
{
    !*value
}
