use async_trait::async_trait;

use super::errors::RemoteError;
use crate::objective::{Objective, ObjectiveBoardView};

/// Remote source of the rider's objectives.
#[async_trait]
pub trait ObjectiveFeedPort: Send + Sync {
    async fn fetch_objectives(&self) -> Result<Vec<Objective>, RemoteError>;
}

/// Rendering surface for the objective board. Called after every change.
pub trait ObjectiveViewPort: Send + Sync {
    fn render(&self, view: &ObjectiveBoardView);
}
