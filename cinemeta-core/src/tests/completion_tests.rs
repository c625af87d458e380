use super::*;
use serde_json::json;

fn record(value: Value) -> Record {
    serde_json::from_value(value).unwrap()
}

#[test]
fn three_populated_fields_is_enough() {
    let r = record(json!({
        "movie_id": 1,
        "description": "Two cops, one thief.",
        "cast": "Al Pacino,Robert De Niro",
        "directors": "Michael Mann",
    }));
    assert!(!CompletionPolicy::metadata().needs_enrichment(&r));
}

#[test]
fn single_field_needs_enrichment() {
    let r = record(json!({"movie_id": 1, "description": "Only this."}));
    assert!(CompletionPolicy::metadata().needs_enrichment(&r));
}

#[test]
fn blank_strings_and_empty_lists_do_not_count() {
    let r = record(json!({
        "description": "   ",
        "interests": [],
        "release_date": null,
        "directors": "Michael Mann",
        "cast": "A",
        "writers": "",
    }));
    let policy = CompletionPolicy::metadata();
    assert_eq!(policy.meaningful_count(&r), 2);
    assert!(policy.needs_enrichment(&r));
}

#[test]
fn populated_list_counts() {
    let r = record(json!({
        "interests": ["Crime", "Drama"],
        "directors": "Michael Mann",
        "release_date": "1995-12-15",
    }));
    assert!(!CompletionPolicy::metadata().needs_enrichment(&r));
}

#[test]
fn fields_outside_the_policy_are_ignored() {
    let r = record(json!({
        "movie_id": 1,
        "title": "Heat (1995)",
        "genres": "Action,Crime,Thriller",
        "imdbId": 113277,
        "description": "d",
    }));
    assert_eq!(CompletionPolicy::metadata().meaningful_count(&r), 1);
}

#[test]
fn empty_record_needs_enrichment() {
    assert!(CompletionPolicy::metadata().needs_enrichment(&Record::new()));
}

#[test]
fn threshold_is_tunable() {
    let r = record(json!({"description": "d"}));
    assert!(!CompletionPolicy::metadata().with_threshold(1).needs_enrichment(&r));
    assert!(CompletionPolicy::metadata().with_threshold(6).needs_enrichment(&r));
}

#[test]
fn empty_object_counts_for_metadata() {
    let r = record(json!({
        "description": "d",
        "cast": "A",
        "interests": {},
    }));
    let policy = CompletionPolicy::metadata();
    assert_eq!(policy.meaningful_count(&r), 3);
    assert!(!policy.needs_enrichment(&r));
}

#[test]
fn presence_differs_only_on_empty_objects() {
    for value in [json!(null), json!(""), json!([]), json!("x"), json!(1), json!({"a": 1})] {
        assert_eq!(
            Presence::Meaningful.counts(&value),
            Presence::NonEmpty.counts(&value),
            "{value}"
        );
    }
    assert!(Presence::Meaningful.counts(&json!({})));
    assert!(!Presence::NonEmpty.counts(&json!({})));
}

#[test]
fn poster_policy_wants_a_non_empty_map() {
    let policy = CompletionPolicy::posters();
    assert!(policy.needs_enrichment(&record(json!({"movie_id": 1}))));
    assert!(policy.needs_enrichment(&record(json!({"poster_urls": {}}))));
    assert!(!policy.needs_enrichment(&record(json!({
        "poster_urls": {"380": "https://m.media-amazon.com/images/M/a.jpg"}
    }))));
}

#[test]
fn is_meaningful_by_kind() {
    assert!(!is_meaningful(&json!(null)));
    assert!(!is_meaningful(&json!("\t\n")));
    assert!(!is_meaningful(&json!([])));
    assert!(is_meaningful(&json!({})));
    assert!(is_meaningful(&json!("x")));
    assert!(is_meaningful(&json!([""])));
    assert!(is_meaningful(&json!(0)));
    assert!(is_meaningful(&json!(false)));
}
