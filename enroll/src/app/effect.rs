use super::Action;
use enroll_core::api::{self, register, Client};
use notify_rust::{Notification, Urgency};

/// Connections to external services that effects use. We keep these around
/// to have some level of connection sharing for the app as a whole.
pub struct EffectContext {
    /// an HTTP client with reqwest
    http: reqwest::Client,
}

impl EffectContext {
    /// Get a new `EffectContext`
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }
}

/// Things that can happen as a result of user input. Side effects!
#[derive(Debug, PartialEq, Eq)]
pub enum Effect {
    /// Send a sign-up request to the server. Exactly one request per
    /// effect; nothing here retries.
    Register(Client, register::Req),

    /// Show a transient notification to the user
    Notify(Notice),
}

impl Effect {
    /// Perform the side-effectful portions of this effect, returning the
    /// next `Action` the application needs to handle
    pub async fn run(self, conn: &EffectContext) -> Option<Action> {
        match self.run_inner(conn).await {
            Ok(action) => action,
            Err(problem) => {
                tracing::error!(?problem, "problem running effect");
                Some(Action::Problem(problem.to_string()))
            }
        }
    }

    /// The actual implementation of `run`, but with a `Result` wrapper to
    /// make it more ergonomic to write.
    async fn run_inner(self, conn: &EffectContext) -> Result<Option<Action>, Problem> {
        match self {
            Self::Register(client, req) => {
                tracing::info!(email = %req.email, "registering");

                let resp = client.register(&conn.http, &req).await?;

                Ok(Some(Action::Submitted(resp)))
            }

            Self::Notify(notice) => {
                tracing::debug!(summary = %notice.summary, "notifying");

                // We don't care if the notification failed to show.
                let _ = Notification::new()
                    .summary(&notice.summary)
                    .body(&notice.body)
                    .urgency(if notice.destructive {
                        Urgency::Critical
                    } else {
                        Urgency::Normal
                    })
                    .show();

                Ok(None)
            }
        }
    }
}

/// A transient message for the user, in either a normal or a destructive
/// (error) style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Short headline
    pub summary: String,

    /// Longer detail line
    pub body: String,

    /// Whether to style this as an error
    pub destructive: bool,
}

impl Notice {
    /// A normal notice, for good news.
    pub fn info(summary: String, body: String) -> Self {
        Self {
            summary,
            body,
            destructive: false,
        }
    }

    /// A destructive-styled notice, for rejections and failures.
    pub fn destructive(summary: String, body: String) -> Self {
        Self {
            summary,
            body,
            destructive: true,
        }
    }
}

/// Problems that can happen while running an `Effect`.
#[derive(Debug, thiserror::Error)]
pub enum Problem {
    /// We had a problem communicating with the server, for example due to a
    /// bad URL or the network being down.
    #[error("Problem communicating with the server: {0}")]
    Server(#[from] api::Error),
}
