pub mod arc;
pub mod map;
pub mod tag;
pub mod xml;

pub use arc::{Arc, ArcKey, priority_less};
pub use map::{ArcAnnounce, TagMap};
pub use tag::{Tag, TagId};
pub use xml::{XmlReader, XmlWriter};
