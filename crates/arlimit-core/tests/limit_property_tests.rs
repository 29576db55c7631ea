mod common;

use arlimit_core::{LimitBundle, LimitSet};
use common::reconciler_with;
use proptest::prelude::*;

fn command_name() -> impl Strategy<Value = String> {
    "[a-z]{1,8}0"
}

fn limit_set(max: u64) -> impl Strategy<Value = LimitSet> {
    proptest::collection::btree_map(command_name(), proptest::option::of(0..=max), 0..12)
}

proptest! {
    #[test]
    fn initialize_seeds_every_registry_command(
        registry in proptest::collection::btree_set(command_name(), 0..16),
        global in 0u64..1000,
    ) {
        let names: Vec<&str> = registry.iter().map(String::as_str).collect();
        let r = reconciler_with(&[], Some(global), &names);

        let all = r.get_limits(None);
        for command in &registry {
            prop_assert_eq!(all.get(command), Some(&Some(global)));
        }
    }

    #[test]
    fn update_limits_never_exceeds_global(
        initial in limit_set(500),
        updates in limit_set(1000),
        global in 0u64..500,
    ) {
        let seeded: Vec<(&str, Option<u64>)> =
            initial.iter().map(|(c, l)| (c.as_str(), *l)).collect();
        let mut r = reconciler_with(&seeded, Some(global), &[]);
        let before = r.get_limits(None);

        let violates = updates.values().any(|l| matches!(l, Some(v) if *v > global));
        let result = r.update_limits(&updates);

        prop_assert_eq!(result.is_err(), violates);
        if violates {
            prop_assert_eq!(r.get_limits(None), before);
        } else {
            let after = r.get_limits(None);
            for (command, limit) in &updates {
                if before.contains_key(command) {
                    prop_assert_eq!(after.get(command), Some(limit));
                }
            }
            prop_assert_eq!(after.len(), before.len());
        }
    }

    #[test]
    fn apply_bundle_clamps_to_new_global(
        custom in limit_set(1000),
        new_global in 1u64..500,
    ) {
        let mut r = reconciler_with(&[], Some(200), &[]);
        let bundle = LimitBundle {
            custom_limits: custom.clone(),
            global_limit: Some(new_global),
        };

        r.apply_bundle(&bundle).unwrap();

        let after = r.get_limits(None);
        for (command, limit) in &custom {
            let expected = limit.map(|v| if v >= new_global { new_global } else { v });
            prop_assert_eq!(after.get(command), Some(&expected));
        }
        prop_assert_eq!(r.get_global_limit(), Some(new_global));
    }
}
