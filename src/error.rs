use std::fmt;

use reqwest::StatusCode;

/// Failures raised by the station and catalog clients.
///
/// A catalog search that finds nothing is not an error; see
/// [`crate::spotify::search::resolve`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Transport failure or non-success status. `status` is set when the
    /// remote side answered.
    #[error("upstream unavailable: {message}")]
    UpstreamUnavailable {
        status: Option<StatusCode>,
        message: String,
    },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Local authorization failure: no token, or one that cannot be refreshed.
    #[error("authorization failed: {0}")]
    Auth(String),
}

impl Error {
    pub fn upstream(message: impl Into<String>) -> Self {
        Error::UpstreamUnavailable {
            status: None,
            message: message.into(),
        }
    }

    pub fn upstream_status(status: StatusCode, message: impl Into<String>) -> Self {
        Error::UpstreamUnavailable {
            status: Some(status),
            message: message.into(),
        }
    }

    /// The remote side refused the bearer token (401 or 403).
    pub fn is_rejected_token(&self) -> bool {
        matches!(
            self,
            Error::UpstreamUnavailable {
                status: Some(StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN),
                ..
            }
        )
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return Error::MalformedResponse(err.to_string());
        }
        match err.status() {
            Some(status) => Error::upstream_status(status, err.to_string()),
            None => Error::upstream(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::MalformedResponse(err.to_string())
    }
}

/// Steps of a single playlist run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    AwaitingStation,
    Resolving,
    CreatingPlaylist,
    AddingTracks,
    Done,
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::AwaitingStation => "fetching station",
            Stage::Resolving => "resolving tracks",
            Stage::CreatingPlaylist => "creating playlist",
            Stage::AddingTracks => "adding tracks",
            Stage::Done => "done",
            Stage::Failed => "failed",
        };
        write!(f, "{}", s)
    }
}

/// A run that ended in [`Stage::Failed`]. `stage` is the step that was active.
#[derive(Debug, thiserror::Error)]
#[error("playlist run failed while {stage}: {source}")]
pub struct PipelineError {
    pub stage: Stage,
    #[source]
    pub source: Error,
}

impl PipelineError {
    pub fn new(stage: Stage, source: Error) -> Self {
        Self { stage, source }
    }

    /// True when the run should send the user back through authorization.
    pub fn needs_reauth(&self) -> bool {
        matches!(self.source, Error::Auth(_)) || self.source.is_rejected_token()
    }
}
