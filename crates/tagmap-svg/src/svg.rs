//! SVG format utilities.

use std::fmt::Write;

/// Escape special characters for SVG text content.
pub fn escape_text(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// An SVG document builder for constructing valid SVG output.
pub struct SvgBuilder {
    output: String,
}

impl SvgBuilder {
    /// Create a new SVG document with the given dimensions.
    pub fn new(width: f64, height: f64) -> Self {
        let mut output = String::with_capacity(4096);
        let _ = writeln!(
            output,
            "<svg width=\"{width}\" height=\"{height}\" xmlns=\"http://www.w3.org/2000/svg\">"
        );
        Self { output }
    }

    /// Add a line segment with the given stroke color.
    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: &str) -> &mut Self {
        let _ = writeln!(
            self.output,
            "  <line x1=\"{x1}\" y1=\"{y1}\" x2=\"{x2}\" y2=\"{y2}\" stroke=\"{color}\"/>"
        );
        self
    }

    /// Add a text label anchored at the given point.
    pub fn text(&mut self, x: f64, y: f64, content: &str) -> &mut Self {
        let _ = writeln!(
            self.output,
            "  <text x=\"{x}\" y=\"{y}\">{}</text>",
            escape_text(content)
        );
        self
    }

    /// Finish the document and return the SVG source.
    pub fn finish(mut self) -> String {
        self.output.push_str("</svg>\n");
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builder_produces_a_document() {
        let mut svg = SvgBuilder::new(100.0, 50.0);
        svg.line(0.0, 0.0, 10.0, 10.0, "green");
        let out = svg.finish();
        assert!(out.starts_with("<svg width=\"100\" height=\"50\""));
        assert!(out.contains("<line x1=\"0\" y1=\"0\" x2=\"10\" y2=\"10\" stroke=\"green\"/>"));
        assert!(out.ends_with("</svg>\n"));
    }

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("a<b&c"), "a&lt;b&amp;c");
    }
}
