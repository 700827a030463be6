use std::env::VarError;

pub const DEFAULT_ENDPOINT: &str = "https://b12.io/apply/submission";

#[derive(Debug, Clone)]
pub struct Config {
    pub applicant: Applicant,
    pub signing_secret: String,
    pub timeout_secs: u64,
    pub log_level: String,
}

/// Values that end up in the submission payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Applicant {
    pub action_run_link: String,
    pub email: String,
    pub name: String,
    pub repository_link: String,
    pub resume_link: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(env_lookup)
    }

    /// Build the config from an arbitrary key lookup. Empty values are kept as-is;
    /// only absent keys are rejected.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Result<Option<String>, String>,
    {
        let required = |key: &str| {
            lookup(key)?.ok_or_else(|| format!("Missing required environment variable: {key}"))
        };
        let or = |key: &str, default: &str| -> Result<String, String> {
            Ok(lookup(key)?.unwrap_or_else(|| default.to_string()))
        };

        let applicant = Applicant {
            action_run_link: required("ACTION_RUN_LINK")?,
            email: required("SUBMISSION_EMAIL")?,
            name: required("SUBMISSION_NAME")?,
            repository_link: required("REPOSITORY_LINK")?,
            resume_link: required("RESUME_LINK")?,
        };
        let signing_secret = required("SIGNING_SECRET")?;

        let timeout_secs: u64 = or("SUBMISSION_TIMEOUT_SECS", "30")?
            .parse()
            .map_err(|e| format!("Invalid SUBMISSION_TIMEOUT_SECS: {e}"))?;
        if timeout_secs == 0 {
            return Err("Invalid SUBMISSION_TIMEOUT_SECS: must be at least 1".to_string());
        }

        let log_level = or("SUBMITTER_LOG_LEVEL", "warn")?;

        Ok(Config {
            applicant,
            signing_secret,
            timeout_secs,
            log_level,
        })
    }
}

/// Read one process variable. Absent is `Ok(None)`; a value that is not UTF-8 is an error.
pub fn env_lookup(key: &str) -> Result<Option<String>, String> {
    match std::env::var(key) {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(_)) => Err(format!("Invalid {key}: value is not valid UTF-8")),
    }
}
