use std::env;

pub fn insta_snapshot<F: FnOnce()>(f: F) {
    let mut settings = insta::Settings::clone_current();
    let snapshot_path = env::current_dir().unwrap().join("./test/snapshots");
    settings.set_snapshot_path(snapshot_path);
    settings.bind(f);
}

/// Two movies as served by `GET /movies`. The second one only carries the
/// fields the API requires.
pub fn movies_fixture() -> &'static str {
    return r#"
[
  {
    "id": "1",
    "title": "Dune",
    "director": "Denis Villeneuve",
    "genre": "Sci-Fi",
    "releaseYear": 2021,
    "createdAt": "2024-03-01T10:00:00.000Z",
    "updatedAt": "2024-03-01T10:00:00.000Z"
  },
  {
    "id": "2",
    "title": "Arrival",
    "director": null,
    "createdAt": "2024-03-02T10:00:00.000Z",
    "updatedAt": "2024-03-02T10:00:00.000Z"
  }
]
"#
    .trim();
}

pub fn movie_fixture(id: &str, title: &str) -> String {
    return format!(
        r#"{{"id":"{id}","title":"{title}","createdAt":"2024-03-01T10:00:00.000Z","updatedAt":"2024-03-01T10:00:00.000Z"}}"#
    );
}
