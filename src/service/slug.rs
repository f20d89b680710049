use std::collections::HashSet;

/// Slugified base for a display name, with a fallback for names that
/// slugify to nothing (punctuation-only input).
pub fn slug_base(input: &str, fallback: &str) -> String {
    let base = slug::slugify(input);
    if base.is_empty() {
        fallback.to_string()
    } else {
        base
    }
}

/// First candidate not already taken: `base`, `base-1`, `base-2`, ...
///
/// Pure over a snapshot of existing slugs; the commit-time guarantee is
/// the storage-level unique index, this only picks a likely-free name.
pub fn first_free_slug(base: &str, taken: &HashSet<String>) -> String {
    if !taken.contains(base) {
        return base.to_string();
    }

    let mut n = 1u32;
    loop {
        let candidate = format!("{}-{}", base, n);
        if !taken.contains(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn taken(slugs: &[&str]) -> HashSet<String> {
        slugs.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn free_base_is_used_as_is() {
        assert_eq!(first_free_slug("jane-doe", &taken(&[])), "jane-doe");
    }

    #[test]
    fn collision_appends_counter_from_one() {
        assert_eq!(first_free_slug("jane-doe", &taken(&["jane-doe"])), "jane-doe-1");
        assert_eq!(
            first_free_slug("jane-doe", &taken(&["jane-doe", "jane-doe-1"])),
            "jane-doe-2"
        );
    }

    #[test]
    fn gap_in_counters_is_taken_first() {
        assert_eq!(
            first_free_slug("jane-doe", &taken(&["jane-doe", "jane-doe-2"])),
            "jane-doe-1"
        );
    }

    #[test]
    fn base_fallback_for_empty_slug() {
        assert_eq!(slug_base("!!!", "member"), "member");
        assert_eq!(slug_base("Clean Water For Kibera", "project"), "clean-water-for-kibera");
    }
}
