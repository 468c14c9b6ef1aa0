//! Ranking Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{RankingSnapshotPort, UserRepositoryPort};
use crate::application::queries::GetTopCreators;
use crate::domain::creator::{PanelView, PanelViewer};

/// GetTopCreators Handler
///
/// 排行只读取订阅快照，刷新由排行 worker 负责
pub struct GetTopCreatorsHandler {
    ranking: Arc<dyn RankingSnapshotPort>,
    user_repo: Arc<dyn UserRepositoryPort>,
}

impl GetTopCreatorsHandler {
    pub fn new(ranking: Arc<dyn RankingSnapshotPort>, user_repo: Arc<dyn UserRepositoryPort>) -> Self {
        Self { ranking, user_repo }
    }

    pub async fn handle(&self, query: GetTopCreators) -> Result<PanelView, ApplicationError> {
        let ranking = match self.ranking.current() {
            Some(ranking) => ranking,
            None => return Ok(PanelView::Loading),
        };

        let viewer = match query.viewer_ref {
            Some(identity_ref) => self
                .user_repo
                .find_by_identity(&identity_ref)
                .await?
                .map(|user| PanelViewer {
                    identity_ref: user.identity_ref,
                    name: user.name,
                    image_url: user.image_url,
                }),
            None => None,
        };

        Ok(PanelView::render(Some(ranking), viewer))
    }
}
