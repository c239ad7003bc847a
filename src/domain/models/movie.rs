#[cfg(test)]
#[path = "movie_test.rs"]
mod tests;

use serde_derive::Deserialize;
use serde_derive::Serialize;

/// A movie record as owned by the API.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_year: Option<i32>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

impl Movie {
    /// `Title (Year)`, with `N/A` standing in for a missing year.
    pub fn heading(&self) -> String {
        let year = match self.release_year {
            Some(year) => year.to_string(),
            None => "N/A".to_string(),
        };

        return format!("{} ({year})", self.title);
    }

    pub fn byline(&self) -> String {
        let director = non_empty(&self.director).unwrap_or("Unknown director");
        let genre = non_empty(&self.genre).unwrap_or("Unknown genre");

        return format!("{director} | {genre}");
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    return value
        .as_deref()
        .map(|e| return e.trim())
        .filter(|e| return !e.is_empty());
}

/// Body of `POST /movies` and `PUT /movies/:id`. Unset fields are left out
/// of the payload entirely.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieInput {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_year: Option<i32>,
}
