//! Property tests for escaping, interpolation and key-path derivation.

use lokal::{Localization, LocalizedUnit, Params, Value, escape_html, interpolate, keys};
use proptest::prelude::*;

fn placeholder_name() -> impl Strategy<Value = String> {
    "[A-Za-z_][A-Za-z0-9_]{0,8}"
}

fn tree_key() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,6}"
}

proptest! {
    #[test]
    fn escape_is_identity_without_special_characters(text in "[^&<>\"']*") {
        prop_assert_eq!(escape_html(&text), text.as_str());
    }

    #[test]
    fn escaped_text_has_no_raw_markup(text in ".*") {
        let escaped = escape_html(&text);
        prop_assert!(!escaped.contains(['<', '>', '"', '\'']));
    }

    #[test]
    fn escaping_is_idempotent(text in ".*") {
        let once = escape_html(&text).into_owned();
        prop_assert_eq!(escape_html(&once), once.as_str());
    }

    #[test]
    fn fully_supplied_templates_leave_no_placeholders(
        names in prop::collection::vec(placeholder_name(), 1..5),
        filler in "[a-z ]{0,6}",
    ) {
        let template: String = names
            .iter()
            .map(|name| format!("{filler}{{{{ {name} }}}}"))
            .collect();
        let parameters: Params = names
            .iter()
            .map(|name| (name.clone(), Value::from("☃")))
            .collect();
        let unit = LocalizedUnit::from([("en", template.as_str())]);

        let text = interpolate(Some(&template), &unit, "en", Some(&parameters), true, None);

        prop_assert!(!text.contains("{{"));
        prop_assert_eq!(text.matches('☃').count(), names.len());
    }

    #[test]
    fn every_unit_gets_its_own_key_path(
        groups in prop::collection::btree_map(
            tree_key(),
            prop::collection::btree_set(tree_key(), 1..4),
            1..4,
        ),
    ) {
        let mut tree = Localization::new();
        for (group, leaves) in &groups {
            let mut branch = Localization::new();
            for leaf in leaves {
                branch.insert(leaf.clone(), LocalizedUnit::from([("en", "x")]));
            }
            tree.insert(group.clone(), branch);
        }

        let paths = keys(&tree, "");
        let expected: Vec<String> = groups
            .iter()
            .flat_map(|(group, leaves)| leaves.iter().map(move |leaf| format!("{group}.{leaf}")))
            .collect();
        prop_assert_eq!(paths.paths(), expected);
    }
}
