//! Status codes for path queries

/// Result type for path queries
pub type Result<T> = std::result::Result<T, Status>;

/// Status enum for path queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Operation was successful
    Success,
    /// Provided parameter was invalid
    InvalidParam,
    /// Query point lies outside the baked volume
    OutOfBounds,
    /// Destination is blocked or unreachable
    NoPath,
    /// Search grew more nodes than the corner budget allows
    CornerBudgetExceeded,
    /// No grid has been baked yet
    NotBaked,
}

impl Status {
    /// Checks if the status is a failure
    pub fn is_failure(&self) -> bool {
        *self != Status::Success
    }

    /// Checks if the status is a success
    pub fn is_success(&self) -> bool {
        *self == Status::Success
    }

    /// Converts status to a result
    pub fn to_result<T>(self, value: T) -> Result<T> {
        if self.is_success() {
            Ok(value)
        } else {
            Err(self)
        }
    }

    /// Whether the caller can recover by issuing a different query
    ///
    /// Budget overflow and a missing grid point at misconfiguration instead.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Status::Success | Status::OutOfBounds | Status::NoPath | Status::InvalidParam
        )
    }
}

impl std::error::Error for Status {}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Success => write!(f, "Success"),
            Status::InvalidParam => write!(f, "Invalid parameter"),
            Status::OutOfBounds => write!(f, "Point out of bounds"),
            Status::NoPath => write!(f, "No path"),
            Status::CornerBudgetExceeded => write!(f, "Corner budget exceeded"),
            Status::NotBaked => write!(f, "Grid not baked"),
        }
    }
}

impl From<Status> for voxnav_common::Error {
    fn from(status: Status) -> Self {
        let message = status.to_string();
        match status {
            Status::OutOfBounds => voxnav_common::Error::OutOfBounds(message),
            Status::NoPath => voxnav_common::Error::NoPath(message),
            Status::CornerBudgetExceeded => voxnav_common::Error::CornerBudgetExceeded(message),
            Status::Success | Status::InvalidParam | Status::NotBaked => {
                voxnav_common::Error::InvalidParameter(message)
            }
        }
    }
}
