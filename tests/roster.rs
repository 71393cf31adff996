//! Integration tests for CSV roster import.

use pool_bracket_web::parse_roster;

#[test]
fn parses_names_associations_and_weights() {
    let csv = "name,association,weight\n\
               Ada,North,72.5\n\
               Befe,South,\n\
               ,East,60.0\n";
    let roster = parse_roster(csv).unwrap();
    assert_eq!(roster.len(), 2, "nameless rows are skipped");
    assert_eq!(roster[0].name, "Ada");
    assert_eq!(roster[0].association, "North");
    assert_eq!(roster[0].weight, Some(72.5));
    assert_eq!(roster[1].weight, None);
}

#[test]
fn malformed_weight_aborts_the_import() {
    let csv = "name,association,weight\nAda,North,heavy\n";
    assert!(parse_roster(csv).is_err());
}

#[test]
fn empty_roster_is_fine() {
    assert!(parse_roster("name,association,weight\n").unwrap().is_empty());
}
