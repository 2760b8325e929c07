use std::io::Write;
use vehiscan::LabelTable;

#[test]
fn coco_maps_the_traffic_classes() {
    let table = LabelTable::coco();
    assert_eq!(table.get(0), Some("person"));
    assert_eq!(table.get(2), Some("car"));
    assert_eq!(table.get(3), Some("motorcycle"));
    assert_eq!(table.get(5), Some("bus"));
    assert_eq!(table.get(7), Some("truck"));
}

#[test]
fn coco_index_gaps_fall_back_to_synthetic_labels() {
    let table = LabelTable::coco();
    for gap in [11, 25, 28, 29, 44, 65, 67, 68, 70, 82] {
        assert_eq!(table.get(gap), None, "index {}", gap);
        assert_eq!(table.lookup(gap), format!("Class {}", gap));
    }
}

#[test]
fn out_of_range_index_falls_back() {
    assert_eq!(LabelTable::coco().lookup(9000), "Class 9000");
}

#[test]
fn loads_a_table_from_json() -> anyhow::Result<()> {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile()?;
    write!(file, r#"{{"2": "car", "5": "bus"}}"#)?;
    let table = LabelTable::from_json_file(file.path())?;
    assert_eq!(table.len(), 2);
    assert_eq!(table.get(2), Some("car"));
    assert_eq!(table.lookup(7), "Class 7");
    Ok(())
}

#[test]
fn rejects_non_numeric_keys() -> anyhow::Result<()> {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile()?;
    write!(file, r#"{{"car": "two"}}"#)?;
    assert!(LabelTable::from_json_file(file.path()).is_err());
    Ok(())
}

#[test]
fn rejects_malformed_json() -> anyhow::Result<()> {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile()?;
    write!(file, "not json at all")?;
    assert!(LabelTable::from_json_file(file.path()).is_err());
    Ok(())
}
