use serde::{Deserialize, Serialize};

use crate::ids::CampaignId;

/// Screens the core can send the rider to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Route {
    Login,
    Campaign { campaign_id: CampaignId },
}

/// Navigation is owned by the presentation layer; the core only asks.
#[async_trait::async_trait]
pub trait RouterPort: Send + Sync {
    async fn navigate(&self, route: Route) -> anyhow::Result<()>;
}
