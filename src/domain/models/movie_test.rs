use anyhow::Result;
use test_utils::insta_snapshot;
use test_utils::movies_fixture;

use super::Movie;
use super::MovieInput;

#[test]
fn it_parses_the_movie_list() -> Result<()> {
    let movies: Vec<Movie> = serde_json::from_str(movies_fixture())?;

    assert_eq!(movies.len(), 2);
    assert_eq!(movies[0].release_year, Some(2021));
    assert_eq!(movies[0].director, Some("Denis Villeneuve".to_string()));
    assert_eq!(movies[1].director, None);
    assert_eq!(movies[1].genre, None);
    assert_eq!(movies[1].created_at, "2024-03-02T10:00:00.000Z");

    return Ok(());
}

#[test]
fn it_parses_movies_without_timestamps() -> Result<()> {
    let movies: Vec<Movie> =
        serde_json::from_str(r#"[{"id":"1","title":"Dune","releaseYear":2021}]"#)?;

    assert_eq!(movies.len(), 1);
    assert_eq!(movies[0].created_at, "");
    assert_eq!(movies[0].heading(), "Dune (2021)");

    return Ok(());
}

#[test]
fn it_formats_headings() {
    let mut movie = Movie {
        id: "1".to_string(),
        title: "Dune".to_string(),
        release_year: Some(2021),
        ..Movie::default()
    };
    assert_eq!(movie.heading(), "Dune (2021)");

    movie.release_year = None;
    assert_eq!(movie.heading(), "Dune (N/A)");
}

#[test]
fn it_formats_bylines() {
    let mut movie = Movie {
        director: Some("Denis Villeneuve".to_string()),
        genre: Some("Sci-Fi".to_string()),
        ..Movie::default()
    };
    assert_eq!(movie.byline(), "Denis Villeneuve | Sci-Fi");

    movie.director = Some("  ".to_string());
    movie.genre = None;
    assert_eq!(movie.byline(), "Unknown director | Unknown genre");
}

#[test]
fn it_omits_unset_input_fields() {
    let input = MovieInput {
        title: "Arrival".to_string(),
        ..MovieInput::default()
    };

    insta_snapshot(|| {
        insta::assert_json_snapshot!(input, @r###"
        {
          "title": "Arrival"
        }
        "###);
    });
}

#[test]
fn it_serializes_input_fields_in_camel_case() -> Result<()> {
    let input = MovieInput {
        title: "Dune".to_string(),
        director: Some("Denis Villeneuve".to_string()),
        genre: None,
        release_year: Some(2021),
    };

    let value = serde_json::to_value(&input)?;
    assert_eq!(
        value,
        serde_json::json!({
            "title": "Dune",
            "director": "Denis Villeneuve",
            "releaseYear": 2021
        })
    );

    return Ok(());
}
