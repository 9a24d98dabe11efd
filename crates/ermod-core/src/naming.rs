//! Deterministic sibling-name allocation
//!
//! Collisions between generated member names are never errors; they are
//! resolved by appending the smallest integer suffix >= 2 that is not
//! already in use among the siblings.

use std::collections::HashSet;

/// Produce a collision-free name for a new sibling
///
/// Returns `base` unchanged when it is free, otherwise `base2`, `base3`, ...
/// using the smallest free suffix.
///
/// # Example
///
/// ```
/// use ermod_core::naming::allocate_name;
///
/// let taken = ["Customer", "Customer2"];
/// assert_eq!(allocate_name("Customer", taken.iter().copied()), "Customer3");
/// assert_eq!(allocate_name("Supplier", taken.iter().copied()), "Supplier");
/// ```
pub fn allocate_name<'a, I>(base: &str, taken: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let taken: HashSet<&str> = taken.into_iter().collect();

    if !taken.contains(base) {
        return base.to_string();
    }

    let mut suffix = 2u32;
    loop {
        let candidate = format!("{base}{suffix}");
        if !taken.contains(candidate.as_str()) {
            return candidate;
        }
        suffix += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_free_base_is_returned_verbatim() {
        assert_eq!(allocate_name("Customer", std::iter::empty()), "Customer");
    }

    #[test]
    fn test_first_collision_gets_suffix_two() {
        let taken = ["Customer"];
        assert_eq!(allocate_name("Customer", taken.iter().copied()), "Customer2");
    }

    #[test]
    fn test_suffixes_grow_densely() {
        let taken = ["Customer", "Customer2", "Customer3"];
        assert_eq!(allocate_name("Customer", taken.iter().copied()), "Customer4");
    }

    #[test]
    fn test_smallest_free_suffix_wins() {
        // Customer2 was renamed away; the gap is reused
        let taken = ["Customer", "Customer3"];
        assert_eq!(allocate_name("Customer", taken.iter().copied()), "Customer2");
    }

    proptest! {
        #[test]
        fn prop_allocated_name_never_collides(
            base in "[A-Za-z][A-Za-z0-9]{0,12}",
            taken in proptest::collection::hash_set("[A-Za-z][A-Za-z0-9]{0,14}", 0..32),
        ) {
            let refs: Vec<&str> = taken.iter().map(String::as_str).collect();
            let name = allocate_name(&base, refs.iter().copied());
            prop_assert!(!taken.contains(&name));
            prop_assert!(name.starts_with(base.as_str()));
        }
    }
}
