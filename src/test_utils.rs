//! Test utilities for property-based testing
//!
//! This module provides generators and helpers for proptest.

#[cfg(test)]
pub mod generators {
    use proptest::prelude::*;
    use proptest::sample::Index;

    /// Generate task declarations `(name, dependencies)` named `task0..taskN`
    ///
    /// Every dependency points at an earlier declaration, so the result is acyclic.
    pub fn acyclic_declarations(max_tasks: usize) -> impl Strategy<Value = Vec<(String, Vec<String>)>> {
        prop::collection::vec(prop::collection::vec(any::<Index>(), 0..4), 1..max_tasks).prop_map(
            |rows| {
                rows.iter()
                    .enumerate()
                    .map(|(i, picks)| {
                        let mut deps: Vec<String> = if i == 0 {
                            Vec::new()
                        } else {
                            picks.iter().map(|p| format!("task{}", p.index(i))).collect()
                        };
                        deps.sort();
                        deps.dedup();
                        (format!("task{i}"), deps)
                    })
                    .collect()
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::generators::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn test_declarations_only_point_backwards(decls in acyclic_declarations(10)) {
            for (i, (name, deps)) in decls.iter().enumerate() {
                prop_assert_eq!(name, &format!("task{i}"));
                for dep in deps {
                    let j: usize = dep.trim_start_matches("task").parse().unwrap();
                    prop_assert!(j < i);
                }
            }
        }
    }
}
