//! SVG rendering for tag maps.
//!
//! Arcs render as line segments between their endpoint positions; the color
//! is selected solely by spanning-tree membership.

mod svg;

pub use svg::SvgBuilder;

use tagmap_core::{ArcKey, TagMap};

/// Stroke color for an arc, keyed on spanning-tree membership.
fn arc_color(in_tree: bool) -> &'static str {
    if in_tree { "red" } else { "green" }
}

/// Draw one arc into `svg` as a segment between its endpoint positions.
///
/// Arcs whose endpoints are unknown to the map are skipped.
pub fn render_arc(map: &TagMap, key: ArcKey, svg: &mut SvgBuilder) {
    let Some(arc) = map.arc(key) else {
        tracing::trace!("skipping unknown arc {key}");
        return;
    };
    let (Some(from), Some(to)) = (map.tag(key.from_id()), map.tag(key.to_id())) else {
        tracing::trace!("skipping arc {key} with a missing endpoint");
        return;
    };
    svg.line(from.x(), from.y(), to.x(), to.y(), arc_color(arc.in_tree()));
}

/// Render every arc of the map, in deterministic storage order, into one
/// SVG document of the given dimensions.
pub fn render_map(map: &TagMap, width: f64, height: f64) -> String {
    let mut svg = SvgBuilder::new(width, height);
    for arc in map.arcs() {
        render_arc(map, arc.key(), &mut svg);
    }
    svg.finish()
}
