mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;
pub mod background_task;

pub use domain::{entities, use_cases};
pub use interfaces::{handlers, repositories, routes};
pub use infrastructure::utils;

use repositories::image_store::LocalImageStore;
use settings::{AppConfig, UploadSettings};
use use_cases::upload::UploadHandler;

pub struct AppState {
    pub upload_handler: AppUploadHandler,
}

pub type AppUploadHandler = UploadHandler<LocalImageStore>;

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        let settings = UploadSettings::from(config);
        let store = LocalImageStore::new(settings.image_dir.clone());
        let upload_handler = UploadHandler::new(store, settings);

        AppState { upload_handler }
    }
}
