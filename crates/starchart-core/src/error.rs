//! Errors surfaced by galaxy content queries.

use starchart_logic::StarId;

/// Errors that can occur while answering star queries.
#[derive(Debug)]
pub enum GalaxyError {
    /// The star id addresses a cell beyond the last spiral ring.
    StarOutOfRange { star_id: StarId, star_count: u32 },
    /// A collaborating service could not answer. Queries that never touched
    /// the failing collaborator keep working.
    Collaborator {
        service: &'static str,
        detail: String,
    },
}

impl GalaxyError {
    pub fn collaborator(service: &'static str, detail: impl Into<String>) -> Self {
        GalaxyError::Collaborator {
            service,
            detail: detail.into(),
        }
    }
}

impl std::fmt::Display for GalaxyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GalaxyError::StarOutOfRange { star_id, star_count } => {
                write!(
                    f,
                    "Star {} out of range: galaxy holds {} stars",
                    star_id, star_count
                )
            }
            GalaxyError::Collaborator { service, detail } => {
                write!(f, "Collaborator {} unavailable: {}", service, detail)
            }
        }
    }
}

impl std::error::Error for GalaxyError {}
