use super::MovieInput;

/// Work requested by the UI, carried out by the actions worker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Login {
        email: String,
        password: String,
    },
    Register {
        name: String,
        email: String,
        password: String,
    },
    ListMovies {
        mount_id: u64,
    },
    CreateMovie {
        mount_id: u64,
        input: MovieInput,
    },
    UpdateMovie {
        mount_id: u64,
        id: String,
        input: MovieInput,
    },
    DeleteMovie {
        mount_id: u64,
        id: String,
    },
}
