// A declared locale list, string-literal locales and keyword keys
use lokal::{localization, Node};

fn main() {
    let strings = localization! {
        locales: [en, "en-GB"];
        colour: { en: "Color", "en-GB": "Colour" },
        r#type: { en: "Type", "en-GB": "Type" },
        locales: { en: "Languages", "en-GB": "Languages" },
    };

    assert_eq!(strings.keys().collect::<Vec<_>>(), ["colour", "type", "locales"]);
    let colour = strings.get("colour").and_then(Node::as_unit).unwrap();
    assert_eq!(colour.get("en-GB"), Some("Colour"));
}
