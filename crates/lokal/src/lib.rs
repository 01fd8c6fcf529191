//! Small, typed internationalization helpers.
//!
//! A [`LocalizedUnit`] holds one piece of text in several locales and a
//! [`Localization`] arranges units into a tree. [`localize`] picks and
//! interpolates one value, [`localize_all`] projects a whole tree onto a
//! locale, [`keys`] derives the dotted key path of every unit, and
//! [`value_at_key_path`] walks a path back down. Untyped JSON is checked
//! with [`is_localization`] before use.
//!
//! ```
//! use lokal::{LocalizationOptions, keys, localization, localize, params, value_at_key_path};
//!
//! let strings = localization! {
//!     locales: [en, ja];
//!     button: {
//!         delete: { en: "Delete", ja: "削除" },
//!     },
//!     greeting: { en: "Hello {{ name }}", ja: "こんにちは {{name}}" },
//! };
//!
//! let paths = keys(&strings, "");
//! assert_eq!(paths["button"]["delete"], "button.delete");
//!
//! let greeting = value_at_key_path(&strings, "greeting").unwrap().unwrap();
//! let options = LocalizationOptions::builder()
//!     .locale("en")
//!     .parameters(params! { "name" => "<Alice>" })
//!     .build();
//! assert_eq!(localize(greeting.as_unit().unwrap(), &options), "Hello &lt;Alice&gt;");
//! ```

pub mod global;
pub mod localizer;
pub mod tree;
pub mod types;

pub use global::{current_locale, set_current_locale, with_current_locale};
pub use localizer::{
    CurrentLocale, FailureHandler, FixedLocale, LocaleSource, LocalizationError,
    LocalizationFailure, LocalizationOptions, SystemLocale, UnitRef, VALUE_NOT_FOUND,
    escape_html, interpolate, localize, log_failure, resolve_locale,
};
pub use tree::{
    Descend, Entry, KeyNode, KeyPath, KeyPathError, KeyTree, LocaleSet, LocalizedFn,
    LocalizedNode, LocalizedText, LocalizedTree, ProjectionOptions, Step, Violation,
    compute_suggestions, is_localization, is_localization_with_locales, keys, localize_all,
    validate_localization, value_at_key_path,
};
pub use types::{FunctionUnit, LocaleFn, Localization, LocalizedUnit, Node, Params, Value};

// Re-export the localization! macro
pub use lokal_macros::localization;

/// Creates a [`Params`] map from key-value pairs.
///
/// Values are converted via `Into<Value>`, so integers, floats, booleans,
/// strings and `Option`s can be passed directly.
///
/// # Example
///
/// ```
/// use lokal::{params, Value};
///
/// let p = params! { "count" => 3, "name" => "Alice", "nickname" => None::<&str> };
/// assert_eq!(p.len(), 3);
/// assert_eq!(p["count"].as_number(), Some(3));
/// assert_eq!(p["name"].as_string(), Some("Alice"));
/// assert_eq!(p["nickname"], Value::Null);
/// ```
#[macro_export]
macro_rules! params {
    {} => {
        $crate::Params::new()
    };
    { $($key:expr => $value:expr),+ $(,)? } => {
        {
            let mut map = $crate::Params::new();
            $(
                map.insert($key.to_string(), ::std::convert::Into::<$crate::Value>::into($value));
            )+
            map
        }
    };
}
