//! Single-locale projections of a translation tree.

use std::fmt::{Debug, Display, Formatter, Result as FmtResult};
use std::ops::Index;
use std::sync::Arc;

use bon::Builder;
use lokal_semantics::FALLBACK_LOCALE;

use crate::localizer::{
    FailureHandler, LocaleSource, LocalizationError, LocalizationFailure, LocalizationOptions,
    UnitRef, VALUE_NOT_FOUND, localize, report,
};
use crate::types::{FunctionUnit, Localization, LocalizedUnit, Node, Params, Value};

/// Settings for [`localize_all`].
///
/// Projections never interpolate, so there are no parameter settings here.
#[derive(Clone, Default, Builder)]
pub struct ProjectionOptions {
    /// Locale for every leaf. Text leaves resolve one from `locale_source`
    /// when absent; function leaves use `"en"`.
    #[builder(into)]
    pub(crate) locale: Option<String>,

    /// Receives failures instead of the default log sink.
    pub(crate) failure_handler: Option<FailureHandler>,

    /// Default-locale source for text leaves.
    pub(crate) locale_source: Option<Arc<dyn LocaleSource>>,
}

impl ProjectionOptions {
    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }
}

impl Debug for ProjectionOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ProjectionOptions")
            .field("locale", &self.locale)
            .field("failure_handler", &self.failure_handler.is_some())
            .field("locale_source", &self.locale_source.is_some())
            .finish()
    }
}

/// A text leaf of a [`LocalizedTree`]. Localized on every read.
#[derive(Clone)]
pub struct LocalizedText<'a> {
    unit: &'a LocalizedUnit,
    options: Arc<LocalizationOptions>,
}

impl LocalizedText<'_> {
    /// The text for the projection's locale, placeholders left in place.
    pub fn get(&self) -> String {
        localize(self.unit, &self.options)
    }

    pub fn unit(&self) -> &LocalizedUnit {
        self.unit
    }
}

impl Display for LocalizedText<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.get())
    }
}

impl Debug for LocalizedText<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_tuple("LocalizedText").field(&self.get()).finish()
    }
}

impl PartialEq<&str> for LocalizedText<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.get() == *other
    }
}

/// A function leaf of a [`LocalizedTree`].
#[derive(Clone)]
pub struct LocalizedFn<'a> {
    unit: &'a FunctionUnit,
    locale: Arc<str>,
    failure_handler: Option<FailureHandler>,
}

impl LocalizedFn<'_> {
    /// Call the function for the projection's locale with `args`.
    ///
    /// The result is returned as the function produced it. A unit without
    /// that locale reports [`LocalizationError::ValueNotFound`] and yields
    /// [`VALUE_NOT_FOUND`].
    pub fn call(&self, args: &[Value]) -> String {
        match self.unit.get(&self.locale) {
            Some(function) => function(args),
            None => {
                report(
                    &LocalizationFailure {
                        locale: &self.locale,
                        unit: UnitRef::Function(self.unit),
                        error: LocalizationError::ValueNotFound,
                    },
                    self.failure_handler.as_ref(),
                );
                VALUE_NOT_FOUND.to_string()
            }
        }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }
}

impl Debug for LocalizedFn<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("LocalizedFn")
            .field("locale", &self.locale)
            .field("unit", self.unit)
            .finish()
    }
}

/// One entry of a [`LocalizedTree`].
#[derive(Debug, Clone)]
pub enum LocalizedNode<'a> {
    Text(LocalizedText<'a>),
    Function(LocalizedFn<'a>),
    Tree(LocalizedTree<'a>),
}

impl<'a> LocalizedNode<'a> {
    pub fn as_text(&self) -> Option<&LocalizedText<'a>> {
        match self {
            LocalizedNode::Text(text) => Some(text),
            LocalizedNode::Function(_) | LocalizedNode::Tree(_) => None,
        }
    }

    pub fn as_fn(&self) -> Option<&LocalizedFn<'a>> {
        match self {
            LocalizedNode::Function(function) => Some(function),
            LocalizedNode::Text(_) | LocalizedNode::Tree(_) => None,
        }
    }

    pub fn as_tree(&self) -> Option<&LocalizedTree<'a>> {
        match self {
            LocalizedNode::Tree(tree) => Some(tree),
            LocalizedNode::Text(_) | LocalizedNode::Function(_) => None,
        }
    }

    /// The current text of a text leaf.
    pub fn text(&self) -> Option<String> {
        self.as_text().map(LocalizedText::get)
    }

    /// Call a function leaf. `None` for other entries.
    pub fn call(&self, args: &[Value]) -> Option<String> {
        self.as_fn().map(|function| function.call(args))
    }
}

impl PartialEq<&str> for LocalizedNode<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.as_text().is_some_and(|text| text == other)
    }
}

impl<'a> Index<&str> for LocalizedNode<'a> {
    type Output = LocalizedNode<'a>;

    fn index(&self, key: &str) -> &LocalizedNode<'a> {
        match self {
            LocalizedNode::Tree(tree) => &tree[key],
            LocalizedNode::Text(_) | LocalizedNode::Function(_) => {
                panic!("cannot index into the leaf of a localized tree with '{key}'")
            }
        }
    }
}

/// A translation tree projected onto one locale.
///
/// Same keys and shape as the source [`Localization`], which it borrows.
#[derive(Debug, Clone, Default)]
pub struct LocalizedTree<'a> {
    entries: Vec<(&'a str, LocalizedNode<'a>)>,
}

impl<'a> LocalizedTree<'a> {
    pub fn get(&self, key: &str) -> Option<&LocalizedNode<'a>> {
        self.entries.iter().find(|(k, _)| *k == key).map(|(_, node)| node)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &LocalizedNode<'a>)> {
        self.entries.iter().map(|(k, node)| (*k, node))
    }

    pub fn keys(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> Index<&str> for LocalizedTree<'a> {
    type Output = LocalizedNode<'a>;

    fn index(&self, key: &str) -> &LocalizedNode<'a> {
        match self.get(key) {
            Some(node) => node,
            None => panic!("no key '{key}' in localized tree"),
        }
    }
}

/// Project `tree` onto a single locale.
///
/// Text units become [`LocalizedText`] leaves that localize, without
/// interpolation, each time they are read, so a change to the current
/// locale shows up in existing projections. Function units become
/// [`LocalizedFn`] leaves bound to the options' locale (or `"en"`).
///
/// # Example
///
/// ```
/// use lokal::{FunctionUnit, Localization, LocalizedUnit, ProjectionOptions, Value, localize_all};
///
/// let tree = Localization::new()
///     .with("greeting", LocalizedUnit::from([("en", "Hello {{name}}"), ("ja", "こんにちは {{name}}")]))
///     .with(
///         "delete",
///         FunctionUnit::new()
///             .with("en", |args: &[Value]| format!("Delete {}", args[0]))
///             .with("ja", |args: &[Value]| format!("{}を削除", args[0])),
///     );
///
/// let ja = localize_all(&tree, ProjectionOptions::builder().locale("ja").build());
/// assert_eq!(ja["greeting"], "こんにちは {{name}}");
/// assert_eq!(ja["delete"].call(&[Value::from("写真")]).as_deref(), Some("写真を削除"));
/// ```
pub fn localize_all(tree: &Localization, options: ProjectionOptions) -> LocalizedTree<'_> {
    let function_locale: Arc<str> = Arc::from(
        options
            .locale
            .as_deref()
            .filter(|locale| !locale.is_empty())
            .unwrap_or(FALLBACK_LOCALE),
    );
    let text_options = Arc::new(LocalizationOptions {
        locale: options.locale,
        parameters: Params::new(),
        skip_interpolation: true,
        escape_parameters: true,
        failure_handler: options.failure_handler,
        locale_source: options.locale_source,
    });
    project(tree, &text_options, &function_locale)
}

fn project<'a>(
    tree: &'a Localization,
    text_options: &Arc<LocalizationOptions>,
    function_locale: &Arc<str>,
) -> LocalizedTree<'a> {
    let entries = tree
        .iter()
        .map(|(key, node)| {
            let projected = match node {
                Node::Unit(unit) => LocalizedNode::Text(LocalizedText {
                    unit,
                    options: Arc::clone(text_options),
                }),
                Node::Function(unit) => LocalizedNode::Function(LocalizedFn {
                    unit,
                    locale: Arc::clone(function_locale),
                    failure_handler: text_options.failure_handler.clone(),
                }),
                Node::Branch(child) => {
                    LocalizedNode::Tree(project(child, text_options, function_locale))
                }
            };
            (key, projected)
        })
        .collect();
    LocalizedTree { entries }
}
