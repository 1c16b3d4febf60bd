// Sign-in
//
// The auth backend is an external collaborator with two calls (login,
// signup). A successful call stores a user snapshot in the data directory;
// the guard decides which commands need one.

pub mod client;
pub mod guard;
pub mod session;
pub mod validation;

pub use client::AuthClient;
pub use guard::{check, Access, Decision, Redirect};
pub use session::{SessionStore, User};
pub use validation::{LoginForm, SignupForm};
