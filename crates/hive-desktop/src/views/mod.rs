//! Application views
//!
//! One view per screen: signing in and the notes board.

mod login;
mod notes;

pub use login::Login;
pub use notes::Notes;
