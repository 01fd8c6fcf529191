use lokal::{Value, params};

#[test]
fn empty_params() {
    let p = params! {};
    assert!(p.is_empty());
}

#[test]
fn single_integer_param() {
    let p = params! { "n" => 42 };
    assert_eq!(p.len(), 1);
    assert_eq!(p["n"].as_number(), Some(42));
}

#[test]
fn single_string_param() {
    let p = params! { "name" => "Alice" };
    assert_eq!(p["name"].as_string(), Some("Alice"));
}

#[test]
fn mixed_params_with_trailing_comma() {
    let p = params! {
        "count" => 3,
        "name" => String::from("Bob"),
        "score" => 9.5_f64,
        "admin" => false,
    };
    assert_eq!(p.len(), 4);
    assert_eq!(p["count"].as_number(), Some(3));
    assert_eq!(p["name"].as_string(), Some("Bob"));
    assert_eq!(p["score"].as_float(), Some(9.5));
    assert_eq!(p["admin"], Value::Bool(false));
}

#[test]
fn option_params() {
    let p = params! { "some" => Some(1), "none" => None::<i32> };
    assert_eq!(p["some"], Value::Number(1));
    assert!(p["none"].is_null());
}

#[test]
fn later_duplicate_key_wins() {
    let p = params! { "x" => 1, "x" => 2 };
    assert_eq!(p.len(), 1);
    assert_eq!(p["x"].as_number(), Some(2));
}

#[test]
fn value_display() {
    assert_eq!(Value::from(3).to_string(), "3");
    assert_eq!(Value::from(2.5).to_string(), "2.5");
    assert_eq!(Value::from(true).to_string(), "true");
    assert_eq!(Value::Null.to_string(), "null");
    assert_eq!(Value::from(7_usize).as_float(), Some(7.0));
}

#[test]
#[cfg(target_pointer_width = "64")]
fn oversized_usize_saturates() {
    assert_eq!(Value::from(usize::MAX).as_number(), Some(i64::MAX));
    assert_eq!(Value::from(12_usize).as_number(), Some(12));
}
