// Application state for HTTP handlers
use crate::application::dashboard_service::DashboardService;
use crate::infrastructure::flash_cookie::FlashSigner;
use crate::infrastructure::templates::Templates;

#[derive(Clone)]
pub struct AppState {
    pub dashboard_service: DashboardService,
    pub templates: Templates,
    pub flash: FlashSigner,
}
