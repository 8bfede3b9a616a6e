// Infrastructure: external collaborators behind trait objects.

pub mod deps;
pub mod notifier;
pub mod storage;
pub mod test_dependencies;
pub mod traits;

pub use deps::ServerDeps;
pub use notifier::LogNotifier;
pub use storage::LocalFileStorage;
pub use traits::{BaseAdminNotifier, BaseFileStorage};
