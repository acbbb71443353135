//! Step templates.
//!
//! Step text and expected results may reference parameters by name:
//!
//! | Syntax | Meaning |
//! |--------|---------|
//! | `{name}` | Replaced by the value bound to `name` |
//! | `{{` | A literal `{` |
//! | `}}` | A literal `}` |
//!
//! A name is any non-empty run of characters other than `{` and `}`, taken
//! verbatim (so `{user name}` binds the key `"user name"`). A lone brace or
//! an empty `{}` is a syntax error.
//!
//! # Example
//!
//! ```rust
//! use stepsheet_parser::template::render;
//! use stepsheet_parser::Params;
//!
//! let mut bindings = Params::new();
//! bindings.insert("a".to_string(), "x".to_string());
//! bindings.insert("b".to_string(), "y".to_string());
//!
//! assert_eq!(render("{a}-{b}", &bindings).unwrap(), "x-y");
//! assert_eq!(render("{{literal}}", &bindings).unwrap(), "{literal}");
//! ```

use crate::ast::Params;
use chumsky::prelude::*;
use thiserror::Error;

/// Rendering a template failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// The template does not follow the placeholder grammar.
    #[error("invalid template '{template}': {message}")]
    Syntax { template: String, message: String },

    /// A placeholder has no value in the bindings.
    #[error("no value bound for placeholder '{{{name}}}'")]
    MissingBinding { name: String },
}

/// One piece of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'src> {
    /// Text copied to the output as is.
    Text(&'src str),
    /// A `{name}` reference.
    Placeholder(&'src str),
}

/// A parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template<'src> {
    segments: Vec<Segment<'src>>,
}

fn template_parser<'src>(
) -> impl Parser<'src, &'src str, Vec<Segment<'src>>, extra::Err<Rich<'src, char>>> {
    let escaped = choice((
        just("{{").to(Segment::Text("{")),
        just("}}").to(Segment::Text("}")),
    ));

    let placeholder = none_of("{}")
        .repeated()
        .at_least(1)
        .to_slice()
        .delimited_by(just('{'), just('}'))
        .map(Segment::Placeholder);

    let text = none_of("{}")
        .repeated()
        .at_least(1)
        .to_slice()
        .map(Segment::Text);

    choice((escaped, placeholder, text))
        .repeated()
        .collect()
        .then_ignore(end())
}

impl<'src> Template<'src> {
    /// Parse a template.
    pub fn parse(source: &'src str) -> Result<Self, TemplateError> {
        template_parser()
            .parse(source)
            .into_result()
            .map(|segments| Self { segments })
            .map_err(|errors| TemplateError::Syntax {
                template: source.to_string(),
                message: errors
                    .iter()
                    .map(|e| e.to_string())
                    .collect::<Vec<_>>()
                    .join("; "),
            })
    }

    /// The parsed segments in order.
    pub fn segments(&self) -> &[Segment<'src>] {
        &self.segments
    }

    /// Placeholder names in order of appearance (repeats included).
    pub fn placeholders(&self) -> impl Iterator<Item = &'src str> + '_ {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Placeholder(name) => Some(*name),
            Segment::Text(_) => None,
        })
    }

    /// Substitute every placeholder from `bindings`.
    pub fn render(&self, bindings: &Params) -> Result<String, TemplateError> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Placeholder(name) => {
                    let value = bindings
                        .get(*name)
                        .ok_or_else(|| TemplateError::MissingBinding {
                            name: name.to_string(),
                        })?;
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }
}

/// Parse and render `template` in one go.
pub fn render(template: &str, bindings: &Params) -> Result<String, TemplateError> {
    Template::parse(template)?.render(bindings)
}

/// Escape braces so `text` renders back to itself.
pub fn escape(text: &str) -> String {
    text.replace('{', "{{").replace('}', "}}")
}
