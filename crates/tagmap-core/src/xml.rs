//! Tagged-element reader/writer for the map interchange format.
//!
//! This is not a general XML parser. The interchange format is a fixed
//! grammar: every element is a tag whose attributes appear in a known order,
//! so reading is literal matching plus typed attribute extraction, and any
//! mismatch is fatal to the surrounding load.

use std::fmt::Write;

use tagmap_error::{Error, Result};

/// Cursor over an in-memory interchange document.
pub struct XmlReader<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> XmlReader<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Byte offset of the cursor, for error context.
    pub fn offset(&self) -> usize {
        self.pos
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn skip_whitespace(&mut self) {
        let trimmed = self.rest().trim_start();
        self.pos = self.input.len() - trimmed.len();
    }

    fn advance_to(&mut self, rest: &'a str) {
        self.pos = self.input.len() - rest.len();
    }

    /// Match the literal opening `<name` of a tagged element.
    pub fn tag_match(&mut self, name: &str) -> Result<()> {
        self.skip_whitespace();
        let rest = self
            .rest()
            .strip_prefix('<')
            .and_then(|rest| rest.strip_prefix(name));
        match rest {
            Some(rest) => {
                self.advance_to(rest);
                Ok(())
            }
            None => Err(Error::element_mismatch(name)
                .with_operation("xml::tag_match")
                .with_context("offset", self.pos.to_string())),
        }
    }

    /// Match a literal piece of text, e.g. an element tail or a closing tag.
    pub fn literal_match(&mut self, literal: &str) -> Result<()> {
        self.skip_whitespace();
        match self.rest().strip_prefix(literal) {
            Some(rest) => {
                self.advance_to(rest);
                Ok(())
            }
            None => Err(Error::parse_failed(format!("expected '{}'", literal))
                .with_operation("xml::literal_match")
                .with_context("offset", self.pos.to_string())),
        }
    }

    /// Match the `/>` tail of a self-closing element.
    pub fn element_tail(&mut self) -> Result<()> {
        self.literal_match("/>")
    }

    /// Extract the raw quoted value of the next attribute, which must be
    /// named `name`. Attributes are positional in this format.
    fn attribute_raw(&mut self, name: &str) -> Result<&'a str> {
        self.skip_whitespace();
        let rest = self
            .rest()
            .strip_prefix(name)
            .and_then(|rest| rest.strip_prefix("=\""));
        let Some(rest) = rest else {
            return Err(
                Error::attribute_invalid(name, "attribute missing or out of order")
                    .with_operation("xml::attribute_raw")
                    .with_context("offset", self.pos.to_string()),
            );
        };
        let Some(end) = rest.find('"') else {
            return Err(Error::attribute_invalid(name, "unterminated attribute value")
                .with_operation("xml::attribute_raw")
                .with_context("offset", self.pos.to_string()));
        };
        self.advance_to(&rest[end + 1..]);
        Ok(&rest[..end])
    }

    /// Read an unsigned integer attribute. Malformed values are fatal.
    pub fn attribute_u32(&mut self, name: &str) -> Result<u32> {
        let raw = self.attribute_raw(name)?;
        raw.parse::<u32>().map_err(|err| {
            Error::attribute_invalid(name, format!("'{}' is not an unsigned integer", raw))
                .with_operation("xml::attribute_u32")
                .set_source(err)
        })
    }

    /// Read a floating point attribute. Malformed values are fatal.
    pub fn attribute_f64(&mut self, name: &str) -> Result<f64> {
        let raw = self.attribute_raw(name)?;
        raw.parse::<f64>().map_err(|err| {
            Error::attribute_invalid(name, format!("'{}' is not a number", raw))
                .with_operation("xml::attribute_f64")
                .set_source(err)
        })
    }
}

/// Incremental writer producing the textual interchange form.
#[derive(Default)]
pub struct XmlWriter {
    output: String,
}

impl XmlWriter {
    pub fn new() -> Self {
        Self {
            output: String::with_capacity(4096),
        }
    }

    /// Open a self-closing element, indented one space as the original
    /// format emits nested records.
    pub fn element_open(&mut self, name: &str) -> &mut Self {
        let _ = write!(self.output, " <{name}");
        self
    }

    /// Close a self-closing element.
    pub fn element_close(&mut self) -> &mut Self {
        self.output.push_str("/>\n");
        self
    }

    /// Open a container element at column zero.
    pub fn container_open(&mut self, name: &str) -> &mut Self {
        let _ = write!(self.output, "<{name}");
        self
    }

    /// Close a container element's opening tag.
    pub fn container_head_close(&mut self) -> &mut Self {
        self.output.push_str(">\n");
        self
    }

    /// Emit a container closing tag.
    pub fn container_end(&mut self, name: &str) -> &mut Self {
        let _ = writeln!(self.output, "</{name}>");
        self
    }

    pub fn attribute_u32(&mut self, name: &str, value: u32) -> &mut Self {
        let _ = write!(self.output, " {name}=\"{value}\"");
        self
    }

    /// Doubles are emitted fixed-point with six decimals, matching the
    /// original writer's `%f`.
    pub fn attribute_f64(&mut self, name: &str, value: f64) -> &mut Self {
        let _ = write!(self.output, " {name}=\"{value:.6}\"");
        self
    }

    pub fn as_str(&self) -> &str {
        &self.output
    }

    pub fn finish(self) -> String {
        self.output
    }
}
