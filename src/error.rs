//! Failures surfaced at the manager's call boundary.
//!
//! Only programmer errors in the host land here. Benign races (showing a
//! visible window, destroying a dead one, pointer-up without a session) are
//! silent no-ops and never produce a `WmError`.

use thiserror::Error;

use crate::window::WindowId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WmError {
    #[error("the specified container is not valid")]
    InvalidContainer,
    #[error("the specified container already has a window manager")]
    ContainerBound,
    #[error("no live window with id {0}")]
    WindowNotFound(WindowId),
    #[error("a pointer session is already active for window {owner}")]
    SessionActive { owner: WindowId },
}

pub type Result<T, E = WmError> = std::result::Result<T, E>;
