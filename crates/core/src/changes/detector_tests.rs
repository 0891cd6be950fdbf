use super::*;

fn rec(school: &str, name: &str, position: Option<&str>, head: bool) -> SnapshotRecord {
    let slug = school.to_lowercase().replace(' ', "-");
    SnapshotRecord::new(name, school, slug, position, head)
}

fn keys(records: &[SnapshotRecord]) -> Vec<(String, String)> {
    records.iter().map(|r| (r.school_slug.clone(), r.name.clone())).collect()
}

#[test]
fn new_assistant_is_a_hire() {
    let prev = vec![rec("Georgia", "Kirby Smart", Some("Head Coach"), true)];
    let cur = vec![
        rec("Georgia", "Kirby Smart", Some("Head Coach"), true),
        rec("Georgia", "Mike Bobo", Some("OC"), false),
    ];

    let changes = detect_changes(&prev, &cur);

    assert_eq!(keys(&changes.new_hires), vec![("georgia".to_owned(), "Mike Bobo".to_owned())]);
    assert!(changes.departures.is_empty());
    assert!(changes.promotions.is_empty());
}

#[test]
fn title_change_is_a_promotion() {
    let prev = vec![rec("Texas", "Jane Doe", Some("DC"), false)];
    let cur = vec![rec("Texas", "Jane Doe", Some("Co-DC"), false)];

    let changes = detect_changes(&prev, &cur);

    assert!(changes.new_hires.is_empty());
    assert!(changes.departures.is_empty());
    assert_eq!(changes.promotions.len(), 1);
    let promo = &changes.promotions[0];
    assert_eq!(promo.from_position.as_deref(), Some("DC"));
    assert_eq!(promo.to_position.as_deref(), Some("Co-DC"));
}

#[test]
fn departed_coach_without_position_is_reported() {
    let prev = vec![
        rec("Alabama", "Nick Saban", Some("Head Coach"), true),
        rec("Alabama", "Unknown Analyst", None, false),
    ];
    let cur = vec![rec("Alabama", "Nick Saban", Some("Head Coach"), true)];

    let changes = detect_changes(&prev, &cur);

    assert_eq!(changes.departures.len(), 1);
    assert_eq!(changes.departures[0].name, "Unknown Analyst");
    assert_eq!(changes.departures[0].position, None);
}

#[test]
fn missing_and_empty_position_are_equal() {
    let prev = vec![rec("Iowa", "A Coach", None, false)];
    let cur = vec![rec("Iowa", "A Coach", Some(""), false)];

    assert!(detect_changes(&prev, &cur).is_empty());
}

#[test]
fn head_coach_flag_flip_is_a_promotion() {
    let prev = vec![rec("Ohio State", "Ryan Day", Some("Head Coach"), false)];
    let cur = vec![rec("Ohio State", "Ryan Day", Some("Head Coach"), true)];

    let changes = detect_changes(&prev, &cur);

    assert_eq!(changes.promotions.len(), 1);
    assert!(!changes.promotions[0].from_is_head_coach);
    assert!(changes.promotions[0].to_is_head_coach);
}

#[test]
fn identical_snapshots_produce_no_changes() {
    let snap = vec![
        rec("Georgia", "Kirby Smart", Some("Head Coach"), true),
        rec("Georgia", "Mike Bobo", Some("OC"), false),
        rec("LSU", "Brian Kelly", Some("Head Coach"), true),
    ];

    let changes = detect_changes(&snap, &snap);

    assert!(changes.is_empty());
    assert!(changes.moves.is_empty());
    assert!(changes.data_quality.is_clean());
}

#[test]
fn empty_previous_makes_everyone_a_hire() {
    let cur = vec![
        rec("LSU", "Brian Kelly", Some("Head Coach"), true),
        rec("Georgia", "Kirby Smart", Some("Head Coach"), true),
    ];

    let changes = detect_changes(&[], &cur);

    assert_eq!(changes.new_hires.len(), 2);
    assert!(changes.departures.is_empty());
    // sorted by school display name
    assert_eq!(changes.new_hires[0].school, "Georgia");
    assert_eq!(changes.new_hires[1].school, "LSU");
}

#[test]
fn empty_current_makes_everyone_a_departure() {
    let prev = vec![rec("Georgia", "Kirby Smart", Some("Head Coach"), true)];

    let changes = detect_changes(&prev, &[]);

    assert_eq!(changes.departures.len(), 1);
    assert!(changes.new_hires.is_empty());
    assert!(changes.promotions.is_empty());
}

#[test]
fn both_empty_is_empty() {
    let changes = detect_changes(&[], &[]);
    assert_eq!(changes, ChangeSet::default());
}

#[test]
fn outputs_are_disjoint_and_cover_the_key_sets() {
    let prev = vec![
        rec("Georgia", "Kirby Smart", Some("Head Coach"), true),
        rec("Georgia", "Todd Monken", Some("OC"), false),
        rec("Texas", "Jane Doe", Some("DC"), false),
        rec("Texas", "Steve Sarkisian", Some("Head Coach"), true),
    ];
    let cur = vec![
        rec("Georgia", "Kirby Smart", Some("Head Coach"), true),
        rec("Georgia", "Mike Bobo", Some("OC"), false),
        rec("Texas", "Jane Doe", Some("Co-DC"), false),
        rec("Texas", "Steve Sarkisian", Some("Head Coach"), true),
    ];

    let changes = detect_changes(&prev, &cur);

    let hires = keys(&changes.new_hires);
    let gone = keys(&changes.departures);
    let promoted: Vec<_> =
        changes.promotions.iter().map(|p| (p.school_slug.clone(), p.name.clone())).collect();

    for key in &hires {
        assert!(!gone.contains(key));
        assert!(!promoted.contains(key));
        assert!(!prev.iter().any(|r| (r.school_slug.clone(), r.name.clone()) == *key));
    }
    for key in &gone {
        assert!(!promoted.contains(key));
        assert!(!cur.iter().any(|r| (r.school_slug.clone(), r.name.clone()) == *key));
    }
    assert_eq!(hires, vec![("georgia".to_owned(), "Mike Bobo".to_owned())]);
    assert_eq!(gone, vec![("georgia".to_owned(), "Todd Monken".to_owned())]);
    assert_eq!(promoted, vec![("texas".to_owned(), "Jane Doe".to_owned())]);
}

#[test]
fn same_name_at_two_schools_are_distinct_coaches() {
    let prev = vec![rec("Georgia", "Chris Smith", Some("WR"), false)];
    let cur = vec![
        rec("Georgia", "Chris Smith", Some("WR"), false),
        rec("Auburn", "Chris Smith", Some("TE"), false),
    ];

    let changes = detect_changes(&prev, &cur);

    assert_eq!(keys(&changes.new_hires), vec![("auburn".to_owned(), "Chris Smith".to_owned())]);
    assert!(changes.promotions.is_empty());
    assert!(changes.moves.is_empty());
}

#[test]
fn duplicate_rows_collapse_to_head_coach_row() {
    let prev = vec![rec("Georgia", "Kirby Smart", Some("Head Coach"), true)];
    let cur = vec![
        rec("Georgia", "Kirby Smart", Some("Defensive Coordinator"), false),
        rec("Georgia", "Kirby Smart", Some("Head Coach"), true),
    ];

    let changes = detect_changes(&prev, &cur);

    assert!(changes.promotions.is_empty());
    assert_eq!(changes.data_quality.duplicates, 1);
}

#[test]
fn duplicate_rows_prefer_longer_title() {
    let prev = vec![rec("Texas", "Jane Doe", Some("Defensive Coordinator"), false)];
    let cur = vec![
        rec("Texas", "Jane Doe", Some("DC"), false),
        rec("Texas", "Jane Doe", Some("Defensive Coordinator"), false),
    ];

    let changes = detect_changes(&prev, &cur);

    assert!(changes.is_empty());
    assert_eq!(changes.data_quality.duplicates, 1);
}

#[test]
fn malformed_rows_are_counted_and_skipped() {
    let prev = vec![rec("Georgia", "Kirby Smart", Some("Head Coach"), true)];
    let cur = vec![
        rec("Georgia", "Kirby Smart", Some("Head Coach"), true),
        rec("Georgia", "   ", Some("OC"), false),
        SnapshotRecord::new("Orphan Coach", "", "", Some("TE"), false),
    ];

    let changes = detect_changes(&prev, &cur);

    assert!(changes.is_empty());
    assert_eq!(changes.data_quality.malformed, 2);
}

#[test]
fn single_school_move_is_flagged_alongside_hire_and_departure() {
    let prev = vec![rec("Georgia", "Mike Bobo", Some("OC"), false)];
    let cur = vec![rec("Auburn", "Mike Bobo", Some("OC"), false)];

    let changes = detect_changes(&prev, &cur);

    assert_eq!(changes.new_hires.len(), 1);
    assert_eq!(changes.departures.len(), 1);
    assert_eq!(
        changes.moves,
        vec![SchoolMove {
            name: "Mike Bobo".to_owned(),
            from_school_slug: "georgia".to_owned(),
            to_school_slug: "auburn".to_owned(),
            from_conference: None,
            to_conference: None,
        }]
    );
}

#[test]
fn move_carries_both_conferences() {
    let prev = vec![rec("Oregon", "Will Stein", Some("OC"), false).with_conference(Some("Big 10"))];
    let cur = vec![rec("Kentucky", "Will Stein", Some("Head Coach"), true).with_conference(Some("SEC"))];

    let changes = detect_changes(&prev, &cur);

    assert_eq!(changes.moves[0].from_conference.as_deref(), Some("Big 10"));
    assert_eq!(changes.moves[0].to_conference.as_deref(), Some("SEC"));
}

#[test]
fn report_flags_power_four_entries() {
    let prev = vec![
        rec("Georgia", "Todd Monken", Some("OC"), false).with_conference(Some("SEC")),
        rec("Kent State", "Mark Carney", Some("DC"), false).with_conference(Some("MAC")),
        rec("Memphis", "Tim Cramsey", Some("OC"), false).with_conference(Some("AAC")),
    ];
    let cur = vec![
        rec("Kent State", "Jim Bob", Some("QB"), false).with_conference(Some("MAC")),
        rec("Memphis", "Tim Cramsey", Some("OC"), false).with_conference(Some("AAC")),
        rec("Ohio State", "Mark Carney", Some("DC"), false).with_conference(Some("Big Ten")),
    ];

    let report = ChangeReport::new(2024, 2025, detect_changes(&prev, &cur));

    let hires: Vec<(&str, bool)> =
        report.new_hires.iter().map(|h| (h.change.name.as_str(), h.alert)).collect();
    assert_eq!(hires, [("Jim Bob", false), ("Mark Carney", true)]);
    let departures: Vec<(&str, bool)> =
        report.departures.iter().map(|d| (d.change.name.as_str(), d.alert)).collect();
    assert_eq!(departures, [("Todd Monken", true), ("Mark Carney", false)]);
    // MAC to Big Ten
    assert!(report.moves[0].alert);
    assert_eq!(report.alert_count(), 3);
}

#[test]
fn ambiguous_names_are_not_moves() {
    let prev = vec![
        rec("Georgia", "Chris Smith", Some("WR"), false),
        rec("Iowa", "Chris Smith", Some("TE"), false),
    ];
    let cur = vec![rec("Auburn", "Chris Smith", Some("WR"), false)];

    assert!(detect_changes(&prev, &cur).moves.is_empty());
}

#[test]
fn report_serializes_with_year_labels() {
    let prev = vec![
        rec("Texas", "Jane Doe", Some("DC"), false).with_conference(Some("SEC")),
        rec("Texas", "Kyle Flood", Some("OL"), false).with_conference(Some("SEC")),
    ];
    let cur = vec![
        rec("Texas", "Jane Doe", Some("Co-DC"), false).with_conference(Some("SEC")),
        rec("Texas", "Pete Kwiatkowski", Some("Linebackers"), false),
    ];

    let report = ChangeReport::new(2024, 2025, detect_changes(&prev, &cur));
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["from"], 2024);
    assert_eq!(json["to"], 2025);
    assert_eq!(json["promotions"][0]["to_position"], "Co-DC");
    assert_eq!(json["new_hires"][0]["name"], "Pete Kwiatkowski");
    assert_eq!(json["new_hires"][0]["alert"], false);
    assert!(json["new_hires"][0].get("conference").is_none());
    assert_eq!(json["departures"][0]["name"], "Kyle Flood");
    assert_eq!(json["departures"][0]["conference"], "SEC");
    assert_eq!(json["departures"][0]["alert"], true);
    assert_eq!(json["data_quality"]["duplicates"], 0);

    let back: ChangeReport = serde_json::from_value(json).unwrap();
    assert_eq!(back, report);
}
