//! Engine runtime configuration.
//!
//! Configuration is resolved once at process startup and passed into the
//! engine, rather than read from the process environment while bundles
//! are being handled.

/// Engine configuration resolved at startup.
#[derive(Clone, Copy, Debug, Default)]
pub struct EngineConfig {
    /// Reject bundles whose screenings do not resolve every catalog
    /// question, instead of recording the session as incomplete. Off by
    /// default; production feeds routinely deliver partial screenings.
    pub require_complete_screening: bool,
}

impl EngineConfig {
    /// Read configuration from the process environment.
    ///
    /// `HRSN_REQUIRE_COMPLETE` set to `1` or `true` enables strict intake.
    pub fn from_env() -> Self {
        Self {
            require_complete_screening: std::env::var("HRSN_REQUIRE_COMPLETE")
                .map(|value| flag_enabled(&value))
                .unwrap_or(false),
        }
    }
}

fn flag_enabled(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true")
}
