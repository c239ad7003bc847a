mod action;
mod auth;
mod draft;
mod error;
mod event;
mod form;
mod movie;
mod notification;
mod route;
mod token_store;

pub use action::*;
pub use auth::*;
pub use draft::*;
pub use error::*;
pub use event::*;
pub use form::*;
pub use movie::*;
pub use notification::*;
pub use route::*;
pub use token_store::*;
