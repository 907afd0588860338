// ABOUTME: Container engine and compose command detection.
// ABOUTME: Confirms the engine answers and resolves which compose form to use.

mod detection;
mod error;

pub use detection::{
    BollardEngine, EngineEndpoint, EngineProbe, ProgramProbe, SystemProbe, detect_local_socket,
    resolve,
};
pub use error::{EngineError, EnvironmentError, EnvironmentErrorKind};
