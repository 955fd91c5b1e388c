use thiserror::Error;

/// Rejections of the distance field, worded for the status region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DistanceError {
    #[error("Please enter your desired distance.")]
    Empty,
    #[error("Please enter a valid distance (positive number).")]
    Invalid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeolocationError {
    #[error("Could not get location. Permission denied.")]
    PermissionDenied,
    #[error("Could not get location. Position unavailable.")]
    PositionUnavailable,
    #[error("Could not get location. Timeout getting location.")]
    Timeout,
    #[error("Could not get location. Unknown error.")]
    Unknown,
}

impl GeolocationError {
    /// Maps the browser's `GeolocationPositionError.code`.
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => Self::PermissionDenied,
            2 => Self::PositionUnavailable,
            3 => Self::Timeout,
            _ => Self::Unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    #[error("map container #{0} not found")]
    ContainerMissing(String),
    #[error("map is not initialised")]
    NotInitialised,
    #[error("{0}")]
    Js(String),
}

/// Failures of one search round trip. `Display` is what follows "Error: "
/// in the status region.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("{0}")]
    Server(String),
    #[error("Server responded with status: {0}")]
    Status(u16),
    #[error("Server responded with status: {code} - {text}")]
    StatusText { code: u16, text: String },
    #[error("{0}")]
    Network(String),
    #[error("{0}")]
    Decode(#[from] serde_json::Error),
    #[error("course {0} has no length")]
    MissingLength(String),
    #[error("{0}")]
    Map(#[from] MapError),
}
