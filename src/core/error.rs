use thiserror::Error;

/// Failures the slide stage can run into. Most are absorbed close to where
/// they happen (missing mount is a no-op, failed media becomes a placeholder);
/// the variants exist so the boundary can log them uniformly.
#[derive(Debug, Error)]
pub enum StageError {
    #[error("render surface #{0} not present")]
    MissingMount(&'static str),
    #[error("asset {index} ({path}) failed to load: {reason}")]
    AssetLoad {
        index: usize,
        path: String,
        reason: String,
    },
    #[error("invalid stage config: {0}")]
    InvalidConfig(String),
    #[error("gpu: {0}")]
    Gpu(String),
    #[error("dom: {0}")]
    Dom(String),
    #[error("mount superseded by a newer page view")]
    Superseded,
}

impl StageError {
    /// Errors that should end initialization quietly instead of being reported.
    pub fn is_silent(&self) -> bool {
        matches!(self, StageError::MissingMount(_) | StageError::Superseded)
    }
}
