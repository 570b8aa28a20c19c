use crossterm::event::KeyEvent;
use enroll_core::api::register;

/// Things that can happen to this app
#[derive(Debug)]
pub enum Action {
    /// The user did something on the keyboard
    Key(KeyEvent),

    /// The registration endpoint answered. The response's own status field
    /// says whether the account was created; getting here only means the
    /// request/response cycle completed.
    Submitted(register::Resp),

    /// Something bad happened (e.g. we couldn't reach the server); display
    /// it to the user
    Problem(String),
}
