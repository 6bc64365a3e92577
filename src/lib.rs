pub mod errors;
pub mod models;
pub mod sources;
pub mod stats;
pub mod storage;

pub use errors::{SourceError, StatsError};
pub use models::{ActivitySnapshot, CardRecord, DailyStats, TimeWindow, UserRecord};
pub use sources::{CardSource, UserSource};
pub use stats::{ActivityAggregator, day_key};
pub use storage::{SnapshotStore, load_snapshot, resolve_snapshot_path};
