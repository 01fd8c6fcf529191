// `_metadata` on trees and units accepts anything convertible to JSON
use lokal::{localization, Node};
use serde_json::json;

fn main() {
    let strings = localization! {
        save: { en: "Save", ja: "保存", _metadata: json!({ "context": "toolbar" }) },
        _metadata: "1.0.0",
    };

    assert_eq!(strings.metadata(), Some(&json!("1.0.0")));
    let save = strings.get("save").and_then(Node::as_unit).unwrap();
    assert_eq!(save.metadata(), Some(&json!({ "context": "toolbar" })));
    assert_eq!(save.len(), 2);
}
