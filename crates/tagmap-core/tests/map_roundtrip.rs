use pretty_assertions::assert_eq;
use tagmap_core::{ArcKey, TagId, TagMap, XmlReader, XmlWriter};

fn sample_map() -> TagMap {
    let mut map = TagMap::new();
    map.arc_create(TagId(5), 0.25, 10.0, TagId(2), 0.5, 5.0);
    map.arc_create(TagId(2), -0.125, 7.5, TagId(9), 1.0, 2.25);
    map.tag_mut(TagId(2)).unwrap().set_position(1.5, -2.25);
    map.tag_mut(TagId(2)).unwrap().set_hop_count(1);
    map.tag_mut(TagId(5)).unwrap().set_position(11.0, 0.0);
    map.tag_mut(TagId(9)).unwrap().set_hop_count(2);
    map
}

#[test]
fn canonical_creation_matches_either_observation_order() {
    let mut forward = TagMap::new();
    let mut reverse = TagMap::new();
    let forward_key = forward.arc_create(TagId(2), 0.25, 10.0, TagId(5), 0.75, 5.0);
    let reverse_key = reverse.arc_create(TagId(5), 0.75, 10.0, TagId(2), 0.25, 5.0);

    assert_eq!(forward_key, reverse_key);
    let a = forward.arc(forward_key).unwrap();
    let b = reverse.arc(reverse_key).unwrap();
    assert_eq!(a.from_id(), b.from_id());
    assert_eq!(a.to_id(), b.to_id());
    assert_eq!(a.from_twist(), b.from_twist());
    assert_eq!(a.to_twist(), b.to_twist());
}

#[test]
fn concrete_arbitration_scenario() {
    // Nodes A(id=5) and B(id=2); the reading arrives A-first.
    let mut map = TagMap::new();
    let key = map.arc_create(TagId(5), 0.0, 10.0, TagId(2), 0.0, 5.0);

    assert_eq!(key, ArcKey::new(TagId(2), TagId(5)));
    assert_eq!(key.from_id(), TagId(2));
    assert_eq!(key.to_id(), TagId(5));
    assert_eq!(map.arc(key).unwrap().distance(), 10.0);

    // A better reading overwrites.
    let better = " <Arc From_Tag_Id=\"2\" From_Twist=\"0.000000\" Distance=\"10.000000\" \
                  To_Tag_Id=\"5\" To_Twist=\"0.000000\" Goodness=\"3.000000\" In_Tree=\"0\"/>\n";
    map.arc_read(&mut XmlReader::new(better)).unwrap();
    assert_eq!(map.arc(key).unwrap().goodness(), 3.0);

    // A worse one is a no-op relative to the stored 3.0.
    let worse = " <Arc From_Tag_Id=\"2\" From_Twist=\"0.000000\" Distance=\"10.000000\" \
                 To_Tag_Id=\"5\" To_Twist=\"0.000000\" Goodness=\"7.000000\" In_Tree=\"0\"/>\n";
    map.arc_read(&mut XmlReader::new(worse)).unwrap();
    assert_eq!(map.arc(key).unwrap().goodness(), 3.0);
}

#[test]
fn document_round_trip_reproduces_measurements() {
    let map = sample_map();
    let mut writer = XmlWriter::new();
    map.write(&mut writer);
    let text = writer.finish();

    let mut restored = TagMap::new();
    restored.read(&mut XmlReader::new(&text)).unwrap();

    assert_eq!(restored.tag_count(), map.tag_count());
    assert_eq!(restored.arc_count(), map.arc_count());

    for (original, loaded) in map.arcs().zip(restored.arcs()) {
        assert_eq!(loaded.key(), original.key());
        // Distance and goodness survive exactly; the twists pass through
        // degrees and come back within floating point tolerance.
        assert_eq!(loaded.distance(), original.distance());
        assert_eq!(loaded.goodness(), original.goodness());
        assert!((loaded.from_twist() - original.from_twist()).abs() < 1e-7);
        assert!((loaded.to_twist() - original.to_twist()).abs() < 1e-7);
        assert_eq!(loaded.in_tree(), original.in_tree());
    }

    let tag = restored.tag(TagId(2)).unwrap();
    assert_eq!(tag.x(), 1.5);
    assert_eq!(tag.y(), -2.25);
    assert_eq!(tag.hop_count(), 1);
}

#[test]
fn save_and_load_through_a_file() {
    let map = sample_map();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("map.xml");

    map.save(&path).unwrap();
    let restored = TagMap::load(&path).unwrap();

    assert_eq!(restored.arc_count(), 2);
    let key = ArcKey::new(TagId(2), TagId(9));
    assert_eq!(restored.arc(key).unwrap().distance(), 7.5);
    assert_eq!(restored.arc(key).unwrap().goodness(), 2.25);
}

#[test]
fn reloading_a_document_keeps_the_better_reading() {
    let map = sample_map();
    let mut writer = XmlWriter::new();
    map.write(&mut writer);
    let text = writer.finish();

    let mut restored = TagMap::new();
    restored.read(&mut XmlReader::new(&text)).unwrap();

    // Improve one arc in memory, then replay the same document: the stored
    // (better) reading must survive the replay untouched.
    let key = ArcKey::new(TagId(2), TagId(5));
    restored
        .arc_mut(key)
        .unwrap()
        .update(0.25, 10.0, 0.5, 1.0);
    restored.read(&mut XmlReader::new(&text)).unwrap();

    assert_eq!(restored.arc(key).unwrap().goodness(), 1.0);
    assert_eq!(restored.arc_count(), 2);
}

#[test]
fn truncated_document_fails_to_load() {
    let map = sample_map();
    let mut writer = XmlWriter::new();
    map.write(&mut writer);
    let text = writer.finish();
    let truncated = &text[..text.len() / 2];

    let mut restored = TagMap::new();
    assert!(restored.read(&mut XmlReader::new(truncated)).is_err());
}
