use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{domain::ProjectStore, services::TeamRosterManager};

pub type ProjectStoreType = Arc<RwLock<dyn ProjectStore + Send + Sync>>;

#[derive(Clone)]
pub struct AppState {
    pub team_roster_manager: TeamRosterManager,
}

impl AppState {
    pub fn new(project_store: ProjectStoreType) -> Self {
        Self {
            team_roster_manager: TeamRosterManager::new(project_store),
        }
    }
}
