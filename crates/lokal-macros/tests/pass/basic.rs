// Nested branches and text units build a typed tree
use lokal::{localization, Localization, Node};

fn main() {
    let strings: Localization = localization! {
        button: {
            delete: { en: "Delete", ja: "削除" },
            save: { en: "Save", ja: "保存" },
        },
        greeting: { en: "Hello {{ name }}", ja: "こんにちは {{name}}" },
    };

    assert_eq!(strings.keys().collect::<Vec<_>>(), ["button", "greeting"]);
    let button = strings.get("button").and_then(Node::as_branch).unwrap();
    let delete = button.get("delete").and_then(Node::as_unit).unwrap();
    assert_eq!(delete.get("ja"), Some("削除"));
    assert!(strings.check_locales().is_ok());
}
