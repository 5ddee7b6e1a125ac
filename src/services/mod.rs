pub mod builder;
pub mod economics;
pub mod normalizer;
pub mod storage;

pub use builder::SnapshotBuilder;
pub use storage::SnapshotStore;
