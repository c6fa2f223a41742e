//! Status returned by behavior nodes.

/// Outcome of evaluating a node for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// Condition held, or the action wrote its decision.
    Success,

    /// Condition did not hold, or the action could not apply.
    Failure,
}

impl Status {
    /// Maps a boolean onto a status (`true` is `Success`).
    #[inline]
    pub fn from_bool(value: bool) -> Self {
        if value { Status::Success } else { Status::Failure }
    }

    #[inline]
    pub fn is_success(self) -> bool {
        matches!(self, Status::Success)
    }

    #[inline]
    pub fn is_failure(self) -> bool {
        matches!(self, Status::Failure)
    }
}
