use tui_textarea::Input;

use super::ClientError;
use super::Movie;

pub enum Event {
    LoginCompleted(Result<String, ClientError>),
    RegisterCompleted(Result<String, ClientError>),
    MoviesLoaded {
        mount_id: u64,
        result: Result<Vec<Movie>, ClientError>,
    },
    MovieSaved {
        mount_id: u64,
        updated: bool,
        result: Result<Movie, ClientError>,
    },
    MovieDeleted {
        mount_id: u64,
        result: Result<(), ClientError>,
    },
    KeyboardCTRLC(),
    KeyboardInput(Input),
    KeyboardPaste(String),
    UIResize(),
    UITick(),
}

fn expired<T>(result: &Result<T, ClientError>) -> bool {
    return matches!(result, Err(err) if err.is_session_expired());
}

impl Event {
    pub fn is_session_expired(&self) -> bool {
        match self {
            Event::LoginCompleted(result) | Event::RegisterCompleted(result) => {
                return expired(result);
            }
            Event::MoviesLoaded { result, .. } => return expired(result),
            Event::MovieSaved { result, .. } => return expired(result),
            Event::MovieDeleted { result, .. } => return expired(result),
            _ => return false,
        }
    }
}
