use serde::Deserialize;
use serde_json::Value;

/// Title record from the IMDb metadata API. Only the consumed fields are
/// modelled; everything else in the response is ignored.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct TitleInfo {
    #[serde(default)]
    pub description: Option<Value>,
    #[serde(default)]
    pub interests: Option<Value>,
    #[serde(default, rename = "releaseDate")]
    pub release_date: Option<Value>,
    #[serde(default)]
    pub directors: Option<Vec<Person>>,
    #[serde(default)]
    pub writers: Option<Vec<Person>>,
    #[serde(default)]
    pub cast: Option<Vec<Person>>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Person {
    #[serde(default, rename = "fullName")]
    pub full_name: Option<String>,
}

/// Join people's full names with commas, keeping source order. A person
/// without a name still takes a slot so positions line up with the source.
pub fn join_names(people: Option<&[Person]>) -> String {
    people
        .unwrap_or_default()
        .iter()
        .map(|p| p.full_name.as_deref().unwrap_or(""))
        .collect::<Vec<_>>()
        .join(",")
}
