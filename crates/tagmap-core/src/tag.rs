//! Tag records: one physical fiducial marker known to the map.

use smallvec::SmallVec;
use tagmap_error::Result;

use crate::arc::ArcKey;
use crate::xml::{XmlReader, XmlWriter};

/// Stable identity of a marker, as printed on the fiducial itself.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct TagId(pub u32);

impl TagId {
    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for TagId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One fiducial marker and its graph-membership bookkeeping.
///
/// Tags are owned by the map; arcs refer to them through [`TagId`] and tags
/// refer back to incident arcs through [`ArcKey`], so the incidence is
/// bidirectional without ownership cycles.
#[derive(Debug, Clone)]
pub struct Tag {
    id: TagId,
    /// Marker rotation in map coordinates, radians.
    twist: f64,
    x: f64,
    y: f64,
    /// Distance from the spanning-tree root, maintained by the tree builder.
    hop_count: u32,
    arcs: SmallVec<[ArcKey; 4]>,
}

impl Tag {
    pub fn new(id: TagId) -> Self {
        Self {
            id,
            twist: 0.0,
            x: 0.0,
            y: 0.0,
            hop_count: 0,
            arcs: SmallVec::new(),
        }
    }

    pub fn id(&self) -> TagId {
        self.id
    }

    pub fn twist(&self) -> f64 {
        self.twist
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn hop_count(&self) -> u32 {
        self.hop_count
    }

    /// Keys of every arc incident on this tag.
    pub fn arcs(&self) -> &[ArcKey] {
        &self.arcs
    }

    pub fn set_twist(&mut self, twist: f64) {
        self.twist = twist;
    }

    pub fn set_position(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    pub fn set_hop_count(&mut self, hop_count: u32) {
        self.hop_count = hop_count;
    }

    /// Incidence append hook used by arc creation.
    pub(crate) fn arc_append(&mut self, key: ArcKey) {
        if !self.arcs.contains(&key) {
            self.arcs.push(key);
        }
    }

    /// Write this tag as a `<Tag .../>` element. The twist crosses the file
    /// boundary in degrees.
    pub(crate) fn write(&self, writer: &mut XmlWriter) {
        writer
            .element_open("Tag")
            .attribute_u32("Id", self.id.as_u32())
            .attribute_f64("Twist", self.twist.to_degrees())
            .attribute_f64("X", self.x)
            .attribute_f64("Y", self.y)
            .attribute_u32("Hop_Count", self.hop_count)
            .element_close();
    }

    /// Read a `<Tag .../>` element. The result carries no incidence; the map
    /// merges the parsed fields into its own record.
    pub(crate) fn read(reader: &mut XmlReader<'_>) -> Result<Tag> {
        reader.tag_match("Tag")?;
        let id = TagId(reader.attribute_u32("Id")?);
        let twist = reader.attribute_f64("Twist")?.to_radians();
        let x = reader.attribute_f64("X")?;
        let y = reader.attribute_f64("Y")?;
        let hop_count = reader.attribute_u32("Hop_Count")?;
        reader.element_tail()?;

        let mut tag = Tag::new(id);
        tag.set_twist(twist);
        tag.set_position(x, y);
        tag.set_hop_count(hop_count);
        Ok(tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_tag_element_round_trip() {
        let mut tag = Tag::new(TagId(41));
        tag.set_twist(std::f64::consts::FRAC_PI_2);
        tag.set_position(12.25, -3.5);
        tag.set_hop_count(2);

        let mut writer = XmlWriter::new();
        tag.write(&mut writer);
        let text = writer.finish();
        assert_eq!(
            text,
            " <Tag Id=\"41\" Twist=\"90.000000\" X=\"12.250000\" Y=\"-3.500000\" Hop_Count=\"2\"/>\n"
        );

        let parsed = Tag::read(&mut XmlReader::new(&text)).unwrap();
        assert_eq!(parsed.id(), TagId(41));
        assert!((parsed.twist() - std::f64::consts::FRAC_PI_2).abs() < 1e-9);
        assert_eq!(parsed.x(), 12.25);
        assert_eq!(parsed.y(), -3.5);
        assert_eq!(parsed.hop_count(), 2);
    }

    #[test]
    fn test_arc_append_deduplicates() {
        let mut tag = Tag::new(TagId(1));
        let key = ArcKey::new(TagId(1), TagId(2));
        tag.arc_append(key);
        tag.arc_append(key);
        assert_eq!(tag.arcs(), &[key]);
    }

    #[test]
    fn test_tag_id_order() {
        assert!(TagId(2) < TagId(5));
        assert_eq!(TagId(7).to_string(), "7");
    }
}
