//! Shared lokal semantics used by both the runtime and macro validation.
//!
//! This crate centralizes the placeholder grammar and the reserved keys so
//! that compile-time checks (`lokal-macros`) and runtime interpolation
//! (`lokal`) agree on what a placeholder is.

use std::ops::Range;

use winnow::combinator::{alt, delimited};
use winnow::prelude::*;
use winnow::stream::LocatingSlice;
use winnow::token::{any, take_till, take_while};

/// Reserved key holding caller-defined metadata on units and trees.
///
/// Never a locale.
pub const METADATA_KEY: &str = "_metadata";

/// Locale assumed when neither the caller nor the environment names one.
pub const FALLBACK_LOCALE: &str = "en";

/// A piece of a scanned template string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Text copied to the output unchanged.
    Literal { text: &'a str, span: Range<usize> },

    /// A `{{ name }}` placeholder. The span covers both brace pairs.
    Placeholder { name: &'a str, span: Range<usize> },
}

impl Segment<'_> {
    /// Byte range of this segment in the scanned template.
    pub fn span(&self) -> Range<usize> {
        match self {
            Segment::Literal { span, .. } | Segment::Placeholder { span, .. } => span.clone(),
        }
    }
}

/// Returns true for characters allowed in a placeholder name (`[A-Za-z0-9_]`).
pub fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Scan a template into literal and placeholder segments.
///
/// A placeholder is `{{`, optional whitespace, one or more word characters,
/// optional whitespace, `}}`. Matching is leftmost and non-overlapping, so
/// `{{{name}}}` scans as `{`, `{{name}}`, `}`. Anything that is not a
/// placeholder is literal text; adjacent literal pieces are merged. Scanning
/// never fails.
pub fn parse_template(template: &str) -> Vec<Segment<'_>> {
    let mut input = LocatingSlice::new(template);
    let mut segments: Vec<Segment<'_>> = Vec::new();

    while let Ok(token) = alt((placeholder, literal)).parse_next(&mut input) {
        match token {
            Token::Placeholder { name, span } => segments.push(Segment::Placeholder {
                name: &template[name],
                span,
            }),
            Token::Literal(span) => match segments.last_mut() {
                Some(Segment::Literal {
                    text,
                    span: previous,
                }) if previous.end == span.start => {
                    previous.end = span.end;
                    *text = &template[previous.clone()];
                }
                _ => segments.push(Segment::Literal {
                    text: &template[span.clone()],
                    span,
                }),
            },
        }
    }

    segments
}

/// Placeholder names of a template, in order of appearance, repeats included.
pub fn placeholder_names(template: &str) -> Vec<&str> {
    parse_template(template)
        .into_iter()
        .filter_map(|segment| match segment {
            Segment::Placeholder { name, .. } => Some(name),
            Segment::Literal { .. } => None,
        })
        .collect()
}

type Input<'i> = LocatingSlice<&'i str>;

enum Token {
    Literal(Range<usize>),
    Placeholder {
        name: Range<usize>,
        span: Range<usize>,
    },
}

fn placeholder(input: &mut Input<'_>) -> ModalResult<Token> {
    delimited(
        ("{{", whitespace),
        take_while(1.., is_word_char).span(),
        (whitespace, "}}"),
    )
    .with_span()
    .map(|(name, span)| Token::Placeholder { name, span })
    .parse_next(input)
}

/// One character, then everything up to the next `{`.
fn literal(input: &mut Input<'_>) -> ModalResult<Token> {
    (any, take_till(0.., '{'))
        .span()
        .map(Token::Literal)
        .parse_next(input)
}

fn whitespace<'i>(input: &mut Input<'i>) -> ModalResult<&'i str> {
    take_while(0.., char::is_whitespace).parse_next(input)
}
