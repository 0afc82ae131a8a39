// Settings persistence trait
use crate::domain::settings::Settings;

/// Advisory persistence for [`Settings`].
///
/// Neither operation fails from the caller's point of view: `load` falls back
/// to catalog defaults and `save` logs and drops write errors.
pub trait SettingsStore {
    fn load(&self) -> Settings;

    fn save(&self, settings: &Settings);
}
