//! The owning graph container: every tag and every canonical arc.
//!
//! The map is the single point of shared mutable state. Arcs are indexed by
//! their canonical pair key, so two observations of the same physical pair,
//! submitted in either order, resolve to the same stored record. Access is
//! exclusive and single-threaded; callers serialize externally if needed.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

use tagmap_error::Result;

use crate::arc::{self, Arc, ArcKey};
use crate::tag::{Tag, TagId};
use crate::xml::{XmlReader, XmlWriter};

/// Hook invoked whenever a stored arc's measurement is revised.
pub type ArcAnnounce = Box<dyn FnMut(ArcKey, &Arc)>;

/// The owning container for one tag map.
#[derive(Default)]
pub struct TagMap {
    tags: BTreeMap<TagId, Tag>,
    /// Canonical arc index; iteration order is the arc storage order.
    arcs: BTreeMap<ArcKey, Arc>,
    announce_hook: Option<ArcAnnounce>,
    changes_count: usize,
}

impl std::fmt::Debug for TagMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TagMap")
            .field("tags", &self.tags.len())
            .field("arcs", &self.arcs.len())
            .field("changes_count", &self.changes_count)
            .finish()
    }
}

impl TagMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tag_count(&self) -> usize {
        self.tags.len()
    }

    pub fn arc_count(&self) -> usize {
        self.arcs.len()
    }

    pub fn tag(&self, id: TagId) -> Option<&Tag> {
        self.tags.get(&id)
    }

    pub fn tag_mut(&mut self, id: TagId) -> Option<&mut Tag> {
        self.tags.get_mut(&id)
    }

    pub fn arc(&self, key: ArcKey) -> Option<&Arc> {
        self.arcs.get(&key)
    }

    pub fn arc_mut(&mut self, key: ArcKey) -> Option<&mut Arc> {
        self.arcs.get_mut(&key)
    }

    /// Tags in ascending id order.
    pub fn tags(&self) -> impl Iterator<Item = &Tag> {
        self.tags.values()
    }

    /// Arcs in storage order (lexicographic on the canonical pair key).
    pub fn arcs(&self) -> impl Iterator<Item = &Arc> {
        self.arcs.values()
    }

    /// Install the hook invoked on every announced arc revision.
    pub fn set_arc_announce(&mut self, hook: ArcAnnounce) {
        self.announce_hook = Some(hook);
    }

    /// Number of announced revisions since creation.
    pub fn changes_count(&self) -> usize {
        self.changes_count
    }

    /// Find the tag with `id`, creating an empty record if absent.
    pub fn tag_lookup(&mut self, id: TagId) -> &mut Tag {
        self.tags.entry(id).or_insert_with(|| {
            tracing::trace!("creating tag {id}");
            Tag::new(id)
        })
    }

    /// Fold a fresh reading into the map as a new arc.
    ///
    /// The reading may arrive in either endpoint order; it is canonicalized
    /// before storage and the key is appended to both endpoints' incidence
    /// lists. Pair uniqueness is this container's concern, and a second
    /// create for the same pair is a caller bug.
    pub fn arc_create(
        &mut self,
        from_id: TagId,
        from_twist: f64,
        distance: f64,
        to_id: TagId,
        to_twist: f64,
        goodness: f64,
    ) -> ArcKey {
        let arc = Arc::new(from_id, from_twist, distance, to_id, to_twist, goodness);
        let key = arc.key();
        debug_assert!(!self.arcs.contains_key(&key), "duplicate arc pair {key}");

        self.tag_lookup(from_id).arc_append(key);
        self.tag_lookup(to_id).arc_append(key);
        self.arcs.insert(key, arc);
        tracing::debug!("created arc {key} distance {distance:.3} goodness {goodness:.3}");
        key
    }

    /// Find the arc for an unordered pair, lazily creating an unmeasured
    /// placeholder if absent. The placeholder loses the first arbitration
    /// against any real reading.
    pub fn arc_lookup(&mut self, a: TagId, b: TagId) -> ArcKey {
        let key = ArcKey::new(a, b);
        if !self.arcs.contains_key(&key) {
            tracing::trace!("lazily creating unmeasured arc {key}");
            self.tag_lookup(a).arc_append(key);
            self.tag_lookup(b).arc_append(key);
            self.arcs.insert(key, Arc::unmeasured(key));
        }
        key
    }

    /// Announce a revised arc to the installed hook.
    fn arc_announce(&mut self, key: ArcKey) {
        self.changes_count += 1;
        let Some(arc) = self.arcs.get(&key) else {
            return;
        };
        if let Some(hook) = self.announce_hook.as_mut() {
            hook(key, arc);
        }
    }

    /// Tree-selection preference between two stored arcs: greater distance
    /// sorts first, then greater minimum endpoint hop count on an exact
    /// distance tie. Unknown keys never sort first.
    pub fn arc_priority_less(&self, left: ArcKey, right: ArcKey) -> bool {
        let (Some(a), Some(b)) = (self.arcs.get(&left), self.arcs.get(&right)) else {
            return false;
        };
        arc::priority_less(a, self.min_hop_count(left), b, self.min_hop_count(right))
    }

    fn min_hop_count(&self, key: ArcKey) -> u32 {
        let from = self.hop_count_of(key.from_id());
        let to = self.hop_count_of(key.to_id());
        from.min(to)
    }

    fn hop_count_of(&self, id: TagId) -> u32 {
        self.tags.get(&id).map(|tag| tag.hop_count()).unwrap_or(0)
    }

    /// Arcs reachable from `start` through the incidence lists, in
    /// first-visit order. Traversal state lives in this call only.
    pub fn connected_arcs(&self, start: TagId) -> Vec<ArcKey> {
        let mut visited_tags = HashSet::new();
        let mut visited_arcs = HashSet::new();
        let mut order = Vec::new();
        let mut stack = vec![start];

        while let Some(tag_id) = stack.pop() {
            if !visited_tags.insert(tag_id) {
                continue;
            }
            let Some(tag) = self.tags.get(&tag_id) else {
                continue;
            };
            for &key in tag.arcs() {
                if visited_arcs.insert(key) {
                    order.push(key);
                }
                let other = if key.from_id() == tag_id {
                    key.to_id()
                } else {
                    key.from_id()
                };
                if !visited_tags.contains(&other) {
                    stack.push(other);
                }
            }
        }

        order
    }

    /// Read one `<Arc .../>` element and reconcile it against the stored
    /// record for the pair.
    ///
    /// Both tags and the arc are looked up lazily, so a document can be read
    /// into a fresh map. A strictly better incoming goodness overwrites the
    /// stored geometry, copies the tree flag, and announces the change;
    /// anything else is a silent no-op.
    pub fn arc_read(&mut self, reader: &mut XmlReader<'_>) -> Result<ArcKey> {
        reader.tag_match("Arc")?;
        let from_id = TagId(reader.attribute_u32("From_Tag_Id")?);
        let from_twist = reader.attribute_f64("From_Twist")?.to_radians();
        let distance = reader.attribute_f64("Distance")?;
        let to_id = TagId(reader.attribute_u32("To_Tag_Id")?);
        let to_twist = reader.attribute_f64("To_Twist")?.to_radians();
        let goodness = reader.attribute_f64("Goodness")?;
        let in_tree = reader.attribute_u32("In_Tree")? != 0;
        reader.element_tail()?;

        let key = self.arc_lookup(from_id, to_id);
        let improved = self
            .arcs
            .get_mut(&key)
            .map(|stored| {
                if stored.is_improved_by(goodness) {
                    stored.update(from_twist, distance, to_twist, goodness);
                    stored.set_in_tree(in_tree);
                    true
                } else {
                    false
                }
            })
            .unwrap_or(false);

        if improved {
            tracing::debug!("arc {key} improved to goodness {goodness:.3}");
            self.arc_announce(key);
        }

        Ok(key)
    }

    /// Read one `<Tag .../>` element, merging the fields into the stored
    /// record for that id.
    pub fn tag_read(&mut self, reader: &mut XmlReader<'_>) -> Result<TagId> {
        let parsed = Tag::read(reader)?;
        let id = parsed.id();
        let tag = self.tag_lookup(id);
        tag.set_twist(parsed.twist());
        tag.set_position(parsed.x(), parsed.y());
        tag.set_hop_count(parsed.hop_count());
        Ok(id)
    }

    /// Write the whole map as one `<Map>` document, tags then arcs, each in
    /// deterministic storage order.
    pub fn write(&self, writer: &mut XmlWriter) {
        writer
            .container_open("Map")
            .attribute_u32("Tags_Count", self.tags.len() as u32)
            .attribute_u32("Arcs_Count", self.arcs.len() as u32)
            .container_head_close();
        for tag in self.tags.values() {
            tag.write(writer);
        }
        for arc in self.arcs.values() {
            arc.write(writer);
        }
        writer.container_end("Map");
    }

    /// Read a `<Map>` document into this map, reconciling every arc.
    pub fn read(&mut self, reader: &mut XmlReader<'_>) -> Result<()> {
        reader.tag_match("Map")?;
        let tags_count = reader.attribute_u32("Tags_Count")?;
        let arcs_count = reader.attribute_u32("Arcs_Count")?;
        reader.literal_match(">")?;
        for _ in 0..tags_count {
            self.tag_read(reader)?;
        }
        for _ in 0..arcs_count {
            self.arc_read(reader)?;
        }
        reader.literal_match("</Map>")?;
        Ok(())
    }

    /// Save the map document to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut writer = XmlWriter::new();
        self.write(&mut writer);
        fs::write(path, writer.as_str())?;
        tracing::debug!(
            "saved map with {} tags and {} arcs to {}",
            self.tags.len(),
            self.arcs.len(),
            path.display()
        );
        Ok(())
    }

    /// Load a map document from `path` into a fresh map.
    pub fn load(path: impl AsRef<Path>) -> Result<TagMap> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let mut map = TagMap::new();
        map.read(&mut XmlReader::new(&text))?;
        tracing::debug!(
            "loaded map with {} tags and {} arcs from {}",
            map.tags.len(),
            map.arcs.len(),
            path.display()
        );
        Ok(map)
    }
}
