use serde::{Deserialize, Serialize};

/// The request to register a new account. Deliberately only these two
/// fields: the confirmation copy of the password exists for client-side
/// cross-checking and never goes over the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Req {
    /// Email to use for contact and login.
    pub email: String,

    /// Plaintext password to use for login.
    pub password: String,
}

/// What the endpoint said. The body `status` field, not the HTTP code,
/// carries the verdict; `message` and `description` are shown to the user
/// verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resp {
    /// `"success"` on success; anything else is a rejection.
    pub status: String,

    /// Short human-readable headline, e.g. "Welcome".
    pub message: String,

    /// Longer human-readable detail, e.g. "Check your inbox".
    pub description: String,
}

impl Resp {
    /// Interpret the status field.
    #[must_use]
    pub fn outcome(&self) -> Outcome {
        if self.status == STATUS_SUCCESS {
            Outcome::Success
        } else {
            Outcome::Failure
        }
    }
}

/// The two ways a submission that got a response can end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The account was created.
    Success,

    /// The server said no (email taken, policy, whatever it reported).
    Failure,
}

/// The status value the server uses to signal success.
const STATUS_SUCCESS: &str = "success";

/// Where the register endpoint lives.
pub const PATH: &str = "/api/v1/register";
