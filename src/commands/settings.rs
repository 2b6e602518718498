//! Settings Commands
//!
//! Commands for reading and updating application settings.

use crate::models::response::CommandResponse;
use crate::models::settings::{AppConfig, SettingsUpdate};
use crate::storage::ConfigService;

/// Current settings, with environment overrides applied
pub fn get_settings(service: &ConfigService) -> CommandResponse<AppConfig> {
    service.effective_config().into()
}

/// Update application settings with a partial update
pub fn update_settings(
    service: &mut ConfigService,
    update: SettingsUpdate,
) -> CommandResponse<AppConfig> {
    service.update_config(update).into()
}

/// Restore default settings
pub fn reset_settings(service: &mut ConfigService) -> CommandResponse<AppConfig> {
    match service.reset() {
        Ok(()) => CommandResponse::ok(service.get_config().clone()),
        Err(e) => CommandResponse::err(e.to_string()),
    }
}
