//! Wire models of the authentication API.

mod user;

pub use user::{AuthResponse, AuthenticateRequest, LoggedUser, UserProfile};
