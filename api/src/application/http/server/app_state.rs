use std::sync::Arc;

use dietplate_core::application::DietplateService;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: DietplateService,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: DietplateService) -> Self {
        Self { args, service }
    }
}
