use platecraft_gateway::GatewayError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PlatecraftError>;

/// Errors surfaced by the orchestrators
///
/// Gateway failures are wrapped; callers only ever see these two kinds.
#[derive(Debug, Error)]
pub enum PlatecraftError {
    /// User input rejected before any request was made
    #[error("{0}")]
    Validation(String),

    /// The AI backend failed; `message` is safe to show to users
    #[error("{message}")]
    RemoteService {
        message: String,
        #[source]
        source: GatewayError,
    },
}

impl PlatecraftError {
    pub(crate) fn empty_menu() -> Self {
        Self::Validation("Please enter a menu.".to_owned())
    }

    pub(crate) fn extraction(source: GatewayError) -> Self {
        Self::RemoteService {
            message: "Failed to parse menu. Please check the format and try again.".to_owned(),
            source,
        }
    }

    pub(crate) fn edit(source: GatewayError) -> Self {
        Self::RemoteService {
            message: "Failed to edit the image.".to_owned(),
            source,
        }
    }

    /// Whether the failure came from user input rather than the backend
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
