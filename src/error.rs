#[derive(Debug, Clone, PartialEq)]
pub enum SubmitError {
    /// The server answered with a non-2xx status.
    Http { status: u16, body: String },
    /// No usable HTTP response: DNS, connect, TLS, timeout, or a body that could not be read.
    Transport { reason: String },
}

/// The stderr report for a failed submission.
impl std::fmt::Display for SubmitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmitError::Http { status, body } => {
                write!(f, "HTTP Error: {status}\nResponse: {body}")
            }
            SubmitError::Transport { reason } => write!(f, "Transport Error: {reason}"),
        }
    }
}
