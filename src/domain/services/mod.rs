pub mod actions;
mod app_state;
mod auth;
mod dashboard;
pub mod events;
mod notifications;
mod router;
mod session;

pub use app_state::*;
pub use auth::*;
pub use dashboard::*;
pub use notifications::*;
pub use router::*;
pub use session::*;
