#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod alert;
pub mod format;
pub mod log;
pub mod search;
pub mod service;
pub mod session;

pub use search::{DEBOUNCE, ExerciseSearch, SearchRequest};
pub use service::Service;
pub use session::SessionOrchestrator;

#[allow(async_fn_in_trait)]
pub trait SettingsService {
    async fn get_settings(&self) -> Result<Settings, String>;
    async fn set_settings(&self, settings: Settings) -> Result<(), String>;
}

#[allow(async_fn_in_trait)]
pub trait SettingsRepository {
    async fn read_settings(&self) -> Result<Settings, String>;
    async fn write_settings(&self, settings: Settings) -> Result<(), String>;
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub beep_volume: u8,
    pub vibrate: bool,
    pub theme: Theme,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            beep_volume: 80,
            vibrate: true,
            theme: Theme::Dark,
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    System,
    Light,
    Dark,
}
