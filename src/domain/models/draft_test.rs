use anyhow::Result;

use super::MovieDraft;
use crate::domain::models::ClientError;
use crate::domain::models::Movie;
use crate::domain::models::MovieInput;

#[test]
fn it_builds_input_with_only_the_title() -> Result<()> {
    let draft = MovieDraft {
        title: "Arrival".to_string(),
        ..MovieDraft::default()
    };

    let input = draft.to_input()?;
    assert_eq!(
        input,
        MovieInput {
            title: "Arrival".to_string(),
            director: None,
            genre: None,
            release_year: None,
        }
    );
    assert_eq!(draft.id, None);

    return Ok(());
}

#[test]
fn it_trims_and_parses_fields() -> Result<()> {
    let draft = MovieDraft {
        id: None,
        title: "  Dune ".to_string(),
        director: " Denis Villeneuve".to_string(),
        genre: "   ".to_string(),
        release_year: " 2021 ".to_string(),
    };

    let input = draft.to_input()?;
    assert_eq!(input.title, "Dune");
    assert_eq!(input.director, Some("Denis Villeneuve".to_string()));
    assert_eq!(input.genre, None);
    assert_eq!(input.release_year, Some(2021));

    return Ok(());
}

#[test]
fn it_requires_a_title() {
    let draft = MovieDraft {
        title: " ".to_string(),
        director: "Someone".to_string(),
        ..MovieDraft::default()
    };

    assert_eq!(
        draft.to_input(),
        Err(ClientError::Validation("Title is required".to_string()))
    );
}

#[test]
fn it_rejects_non_numeric_years() {
    let draft = MovieDraft {
        title: "Dune".to_string(),
        release_year: "twenty".to_string(),
        ..MovieDraft::default()
    };

    let res = draft.to_input();
    assert!(matches!(res, Err(ClientError::Validation(_))));
}

#[test]
fn it_copies_a_movie_for_editing() {
    let movie = Movie {
        id: "7".to_string(),
        title: "Dune".to_string(),
        release_year: Some(2021),
        genre: Some("Sci-Fi".to_string()),
        ..Movie::default()
    };

    let draft = MovieDraft::from_movie(&movie);
    assert_eq!(draft.id, Some("7".to_string()));
    assert_eq!(draft.director, "");
    assert_eq!(draft.release_year, "2021");
}

#[test]
fn it_round_trips_through_a_form() {
    let draft = MovieDraft {
        id: Some("3".to_string()),
        title: "Heat".to_string(),
        director: "Michael Mann".to_string(),
        genre: "Crime".to_string(),
        release_year: "1995".to_string(),
    };

    let mut form = MovieDraft::empty_form();
    draft.write_to(&mut form);

    assert_eq!(MovieDraft::from_form(&form, Some("3".to_string())), draft);
}
