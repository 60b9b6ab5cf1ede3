//! Backend methods for the Reshady plugin.
//!
//! Every method shells out to `reshady.sh` in the plugin directory and
//! reports the script's exit code and output as data.

pub mod dispatcher;
pub mod error;
pub mod methods;
pub mod parser;
pub mod registry;
pub mod runner;
pub mod script;
pub mod traits;

pub use dispatcher::MethodDispatcher;
pub use error::MethodError;
pub use methods::{ListGamesResponse, Method, MethodResponse};
pub use parser::{parse_games, GameRecord};
pub use registry::MethodRegistry;
pub use runner::{CommandResult, CommandRunner, SystemLauncher, LAUNCH_FAILURE_CODE};
pub use script::{ScriptPath, SCRIPT_NAME};
pub use traits::ProcessLauncher;
