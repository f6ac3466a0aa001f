mod apply;
pub use apply::ApplyCommand;

mod check;
pub use check::CheckCommand;

mod config;
pub use config::MigrationConfig;

mod history_file;
pub use history_file::{HistoryFile, HistoryFileMigration};

mod plan;
pub use plan::PlanCommand;

mod snapshot_file;
pub use snapshot_file::SnapshotFile;
