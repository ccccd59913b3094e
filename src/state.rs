use std::sync::Arc;

use crate::config::Config;
use crate::domain::ports::ServicemanRepository;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub serviceman_repo: Arc<dyn ServicemanRepository>,
}
