#[cfg(test)]
#[path = "draft_test.rs"]
mod tests;

use super::ClientError;
use super::Field;
use super::Form;
use super::Movie;
use super::MovieInput;

const TITLE: usize = 0;
const DIRECTOR: usize = 1;
const GENRE: usize = 2;
const RELEASE_YEAR: usize = 3;

/// Unsaved movie form state. `id` is set while editing an existing record.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MovieDraft {
    pub id: Option<String>,
    pub title: String,
    pub director: String,
    pub genre: String,
    pub release_year: String,
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    return Some(value.to_string());
}

impl MovieDraft {
    pub fn empty_form() -> Form {
        return Form::new(vec![
            Field::new("Title (required)"),
            Field::new("Director"),
            Field::new("Genre"),
            Field::new("Release year"),
        ]);
    }

    pub fn from_movie(movie: &Movie) -> MovieDraft {
        return MovieDraft {
            id: Some(movie.id.to_string()),
            title: movie.title.to_string(),
            director: movie.director.clone().unwrap_or_default(),
            genre: movie.genre.clone().unwrap_or_default(),
            release_year: movie
                .release_year
                .map(|year| return year.to_string())
                .unwrap_or_default(),
        };
    }

    pub fn from_form(form: &Form, id: Option<String>) -> MovieDraft {
        return MovieDraft {
            id,
            title: form.value(TITLE).to_string(),
            director: form.value(DIRECTOR).to_string(),
            genre: form.value(GENRE).to_string(),
            release_year: form.value(RELEASE_YEAR).to_string(),
        };
    }

    pub fn write_to(&self, form: &mut Form) {
        form.set_value(TITLE, &self.title);
        form.set_value(DIRECTOR, &self.director);
        form.set_value(GENRE, &self.genre);
        form.set_value(RELEASE_YEAR, &self.release_year);
        form.focus = TITLE;
    }

    pub fn to_input(&self) -> Result<MovieInput, ClientError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ClientError::Validation("Title is required".to_string()));
        }

        let mut release_year = None;
        if let Some(year) = optional(&self.release_year) {
            match year.parse::<i32>() {
                Ok(year) => release_year = Some(year),
                Err(_) => {
                    return Err(ClientError::Validation(format!(
                        "Release year must be a number, got: {year}"
                    )));
                }
            }
        }

        return Ok(MovieInput {
            title: title.to_string(),
            director: optional(&self.director),
            genre: optional(&self.genre),
            release_year,
        });
    }
}
