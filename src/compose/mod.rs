// ABOUTME: Compose orchestrator boundary.
// ABOUTME: Command form resolution, the subprocess invoker, and typed container listings.

mod context;
mod invoker;
mod listing;

pub use context::{ComposeCommand, ComposeContext};
pub use invoker::{ComposeInvoker, OrchestrationError, Orchestrator};
pub use listing::{ComposeContainer, RunningServices, parse_listing, running_services};
