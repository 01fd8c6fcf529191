// Closure units become function units taking `&[Value]`
use lokal::{localization, Node, Value};

fn main() {
    let strings = localization! {
        button: {
            delete: {
                en: |args| format!("Delete {}", args[0]),
                ja: |args| format!("{}を削除", args[0]),
            },
        },
        message: {
            welcome: { en: "Welcome!", ja: "ようこそ！" },
        },
    };

    let button = strings.get("button").and_then(Node::as_branch).unwrap();
    let delete = button.get("delete").and_then(Node::as_function).unwrap();
    let en = delete.get("en").unwrap();
    assert_eq!(en(&[Value::from("file")]), "Delete file");
}
