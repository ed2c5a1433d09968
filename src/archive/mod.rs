mod prefs;
mod record;
mod sample;
mod store;

pub use prefs::UiPreferences;
pub use record::{Artifact, ArtifactFormat};
pub use sample::sample_artifacts;
pub use store::{ArtifactStore, JsonFileStore, MemoryStore, StoreError};
