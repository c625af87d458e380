use super::*;
use serde_json::json;

const TOY_STORY: &str = r#"{
    "id": "tt0114709",
    "primaryTitle": "Toy Story",
    "description": "A cowboy doll is profoundly threatened and jealous when a new spaceman action figure supplants him as top toy in a boy's bedroom.",
    "interests": ["Animation", "Adventure", "Comedy"],
    "releaseDate": "1995-11-22",
    "averageRating": 8.3,
    "directors": [{"id": "nm0005124", "fullName": "John Lasseter"}],
    "writers": [
        {"id": "nm0005124", "fullName": "John Lasseter"},
        {"id": "nm0004056", "fullName": "Pete Docter"}
    ],
    "cast": [
        {"id": "nm0000158", "fullName": "Tom Hanks", "characters": ["Woody"]},
        {"id": "nm0000741", "fullName": "Tim Allen", "characters": ["Buzz Lightyear"]}
    ]
}"#;

#[test]
fn title_url_uses_padded_id() {
    assert_eq!(
        title_url("https://imdb236.p.rapidapi.com/api/imdb", ImdbId::new(114709)),
        "https://imdb236.p.rapidapi.com/api/imdb/tt0114709"
    );
    assert_eq!(
        title_url("http://localhost:8080/api/imdb/", ImdbId::new(1)),
        "http://localhost:8080/api/imdb/tt0000001"
    );
}

#[test]
fn parses_consumed_fields_only() {
    let fields = parse_title_response(TOY_STORY).unwrap();
    let keys: Vec<&str> = fields.keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        vec!["description", "interests", "release_date", "directors", "cast", "writers"]
    );
    assert_eq!(fields["interests"], json!(["Animation", "Adventure", "Comedy"]));
    assert_eq!(fields["release_date"], json!("1995-11-22"));
    assert_eq!(fields["directors"], json!("John Lasseter"));
    assert_eq!(fields["writers"], json!("John Lasseter,Pete Docter"));
    assert_eq!(fields["cast"], json!("Tom Hanks,Tim Allen"));
}

#[test]
fn missing_fields_become_null_or_empty() {
    let fields = parse_title_response(r#"{"id": "tt0000001", "cast": null}"#).unwrap();
    assert_eq!(fields.len(), 6);
    assert_eq!(fields["description"], Value::Null);
    assert_eq!(fields["interests"], Value::Null);
    assert_eq!(fields["release_date"], Value::Null);
    assert_eq!(fields["directors"], json!(""));
    assert_eq!(fields["cast"], json!(""));
    assert_eq!(fields["writers"], json!(""));
}

#[test]
fn people_without_names_keep_their_slot() {
    let body = r#"{"cast": [{"fullName": "A"}, {"id": "nm1"}, {"fullName": null}, {"fullName": "D"}]}"#;
    let fields = parse_title_response(body).unwrap();
    assert_eq!(fields["cast"], json!("A,,,D"));
}

#[test]
fn credit_ids_of_any_shape_are_ignored() {
    let body = r#"{"directors": [{"id": 5124, "fullName": "John Lasseter"}, {"id": null, "fullName": "Pete Docter"}]}"#;
    let fields = parse_title_response(body).unwrap();
    assert_eq!(fields["directors"], json!("John Lasseter,Pete Docter"));
}

#[test]
fn non_json_body_is_malformed() {
    let err = parse_title_response("<html>oops</html>").unwrap_err();
    assert!(matches!(err, FetchError::Malformed(_)));
}

#[test]
fn non_object_body_is_malformed() {
    assert!(matches!(
        parse_title_response("[1, 2, 3]"),
        Err(FetchError::Malformed(_))
    ));
    assert!(matches!(
        parse_title_response("\"tt0114709\""),
        Err(FetchError::Malformed(_))
    ));
}

#[test]
fn wrong_credit_shape_is_malformed() {
    assert!(matches!(
        parse_title_response(r#"{"directors": "John Lasseter"}"#),
        Err(FetchError::Malformed(_))
    ));
}
