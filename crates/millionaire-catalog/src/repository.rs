//! Question pool abstraction.

use async_trait::async_trait;
use millionaire_core::error::DomainError;

use crate::question::Question;

/// Read access to the pool of questions games are drawn from.
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Returns every question available for `level`. An empty list means the
    /// level cannot be filled.
    async fn questions_for_level(&self, level: u8) -> Result<Vec<Question>, DomainError>;
}
