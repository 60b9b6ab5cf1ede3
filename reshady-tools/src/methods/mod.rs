pub mod apply_preset;
pub mod base;
pub mod install;
pub mod list_games;
pub mod remove;
pub mod toggle;

pub use apply_preset::{ApplyPresetMethod, ApplyPresetParams};
pub use base::{ListGamesResponse, Method, MethodResponse, ScriptCommand};
pub use install::{InstallMethod, InstallParams};
pub use list_games::ListGamesMethod;
pub use remove::{RemoveMethod, RemoveParams};
pub use toggle::{ToggleMethod, ToggleParams};
