use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use rr_core::ids::{CampaignId, ObjectiveId};
use rr_core::objective::Objective;
use rr_core::ports::{HttpClientPort, HttpRequest, ObjectiveFeedPort, RemoteError};

use super::endpoint;

const OBJECTIVE_PATH: &str = "objective";

/// Identifiers arrive as strings or numbers depending on the backend table.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireId {
    Text(String),
    Number(i64),
}

impl WireId {
    fn into_string(self) -> String {
        match self {
            WireId::Text(text) => text,
            WireId::Number(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ImageDto {
    #[serde(default)]
    url: String,
}

#[derive(Debug, Deserialize)]
struct ObjectiveDto {
    id: WireId,
    titulo: String,
    meta: f64,
    #[serde(default)]
    image: Option<ImageDto>,
    id_campanha: WireId,
}

impl From<ObjectiveDto> for Objective {
    fn from(dto: ObjectiveDto) -> Self {
        Objective {
            id: ObjectiveId::from(dto.id.into_string()),
            title: dto.titulo,
            progress: dto.meta,
            trophy_image: dto.image.unwrap_or_default().url,
            campaign_id: CampaignId::from(dto.id_campanha.into_string()),
        }
    }
}

/// [`ObjectiveFeedPort`] reading `GET {base}/objective`.
pub struct HttpObjectiveFeed {
    http: Arc<dyn HttpClientPort>,
    base_url: String,
}

impl HttpObjectiveFeed {
    pub fn new(http: Arc<dyn HttpClientPort>, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl ObjectiveFeedPort for HttpObjectiveFeed {
    async fn fetch_objectives(&self) -> Result<Vec<Objective>, RemoteError> {
        let url = endpoint(&self.base_url, OBJECTIVE_PATH);
        let response = self.http.request(HttpRequest::get(url)).await?;
        if !response.is_success() {
            warn!(status = response.status, "objective feed rejected");
            return Err(RemoteError::FeedRejected {
                status: response.status,
            });
        }

        let objectives: Vec<Objective> = response
            .json::<Vec<ObjectiveDto>>()?
            .into_iter()
            .map(Objective::from)
            .collect();
        debug!(count = objectives.len(), "objective feed decoded");
        Ok(objectives)
    }
}
