//! Arc records: one canonical measurement edge between two tags.
//!
//! Cameras observe pairs of markers and derive a relative reading: how much
//! each marker is twisted, how far apart they sit, and a goodness score for
//! the reading. Many readings of the same pair arrive over time; the map
//! keeps exactly one arc per unordered pair and the best reading wins.

use crate::tag::TagId;
use crate::xml::XmlWriter;

/// Order-independent key for one unordered tag pair.
///
/// The derived lexicographic `Ord` (lower endpoint first, then higher) is
/// the storage order of arcs in the map, and the derived `Eq` is arc
/// equality: both sides are already canonical, so no order-insensitive
/// comparison is needed.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct ArcKey {
    from: TagId,
    to: TagId,
}

impl ArcKey {
    /// Build the canonical key for an unordered pair, in either order.
    pub fn new(a: TagId, b: TagId) -> Self {
        if a <= b {
            Self { from: a, to: b }
        } else {
            Self { from: b, to: a }
        }
    }

    /// The lower-id endpoint.
    pub fn from_id(&self) -> TagId {
        self.from
    }

    /// The higher-id endpoint.
    pub fn to_id(&self) -> TagId {
        self.to
    }
}

impl std::fmt::Display for ArcKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

/// One canonical measurement edge.
///
/// Invariants: `from_id < to_id` always (never the raw observation order),
/// and `from_twist` always describes the geometry of `from_id` because the
/// twists are swapped together with the endpoints on canonicalization.
/// `distance > 0` holds for every measured arc.
#[derive(Debug, Clone)]
pub struct Arc {
    from_id: TagId,
    to_id: TagId,
    /// Rotation of the lower-id marker for this reading, radians.
    from_twist: f64,
    /// Rotation of the higher-id marker for this reading, radians.
    to_twist: f64,
    /// Separation between the marker centers.
    distance: f64,
    /// Arbitration cost: distance from the camera optical center to the
    /// segment midpoint at observation time. Lower is better.
    goodness: f64,
    /// Set by the external tree builder, read by rendering.
    in_tree: bool,
}

impl Arc {
    /// Build a canonical arc from one reading, in either endpoint order.
    pub(crate) fn new(
        from_id: TagId,
        from_twist: f64,
        distance: f64,
        to_id: TagId,
        to_twist: f64,
        goodness: f64,
    ) -> Self {
        // The twists travel with their endpoints.
        let (from_id, from_twist, to_id, to_twist) = if from_id > to_id {
            (to_id, to_twist, from_id, from_twist)
        } else {
            (from_id, from_twist, to_id, to_twist)
        };
        Self {
            from_id,
            to_id,
            from_twist,
            to_twist,
            distance,
            goodness,
            in_tree: false,
        }
    }

    /// Placeholder for a pair that has no reading yet. Any real reading is
    /// strictly better than infinite goodness, so the first arbitration
    /// against it always overwrites.
    pub(crate) fn unmeasured(key: ArcKey) -> Self {
        Self {
            from_id: key.from_id(),
            to_id: key.to_id(),
            from_twist: 0.0,
            to_twist: 0.0,
            distance: 0.0,
            goodness: f64::INFINITY,
            in_tree: false,
        }
    }

    pub fn key(&self) -> ArcKey {
        ArcKey {
            from: self.from_id,
            to: self.to_id,
        }
    }

    pub fn from_id(&self) -> TagId {
        self.from_id
    }

    pub fn to_id(&self) -> TagId {
        self.to_id
    }

    pub fn from_twist(&self) -> f64 {
        self.from_twist
    }

    pub fn to_twist(&self) -> f64 {
        self.to_twist
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn goodness(&self) -> f64 {
        self.goodness
    }

    pub fn in_tree(&self) -> bool {
        self.in_tree
    }

    /// Spanning-structure membership, set by the external tree builder.
    pub fn set_in_tree(&mut self, in_tree: bool) {
        self.in_tree = in_tree;
    }

    /// True when a reading with this goodness should replace the stored one.
    /// Equal goodness is not an improvement.
    pub fn is_improved_by(&self, goodness: f64) -> bool {
        goodness < self.goodness
    }

    /// Overwrite the measured fields unconditionally.
    ///
    /// Arbitration is the caller's decision; this primitive always applies.
    /// The asserts are structural contracts, not input validation: tripping
    /// one means a caller or collaborator bug.
    pub fn update(&mut self, from_twist: f64, distance: f64, to_twist: f64, goodness: f64) {
        assert!(
            self.from_id < self.to_id,
            "arc endpoints out of canonical order"
        );
        assert!(distance > 0.0, "arc distance must be positive");
        self.from_twist = from_twist;
        self.distance = distance;
        self.to_twist = to_twist;
        self.goodness = goodness;
    }

    /// Write this arc as an `<Arc .../>` element. Twists cross the file
    /// boundary in degrees.
    pub(crate) fn write(&self, writer: &mut XmlWriter) {
        writer
            .element_open("Arc")
            .attribute_u32("From_Tag_Id", self.from_id.as_u32())
            .attribute_f64("From_Twist", self.from_twist.to_degrees())
            .attribute_f64("Distance", self.distance)
            .attribute_u32("To_Tag_Id", self.to_id.as_u32())
            .attribute_f64("To_Twist", self.to_twist.to_degrees())
            .attribute_f64("Goodness", self.goodness)
            .attribute_u32("In_Tree", self.in_tree as u32)
            .element_close();
    }
}

/// Arc equality compares the endpoint pair only; the measured fields do not
/// participate in identity.
impl PartialEq for Arc {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Arc {}

impl PartialOrd for Arc {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Storage order: lexicographic on the canonical endpoint pair.
impl Ord for Arc {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key().cmp(&other.key())
    }
}

/// Tree-selection preference: does `a` sort before `b`?
///
/// An arc with strictly greater distance sorts first. On an exact distance
/// tie, the arc whose minimum endpoint hop count is strictly greater sorts
/// first. Everything else sorts after. The longer-first preference is
/// intentional and load-bearing for the downstream tree builder; it is the
/// reverse of a shortest-edge spanning construction.
pub fn priority_less(a: &Arc, a_min_hop_count: u32, b: &Arc, b_min_hop_count: u32) -> bool {
    if a.distance > b.distance {
        true
    } else if a.distance == b.distance {
        a_min_hop_count > b_min_hop_count
    } else {
        false
    }
}
