//! The table recording applied migrations and the schema each one left
//! behind.

pub(crate) const CREATE: &str = "CREATE TABLE IF NOT EXISTS __trellis_migrations (
    id BIGINT PRIMARY KEY,
    name TEXT NOT NULL,
    checksum TEXT NOT NULL,
    snapshot JSONB NOT NULL,
    applied_at TIMESTAMPTZ NOT NULL DEFAULT now()
)";

pub(crate) const EXISTS: &str = "SELECT to_regclass('__trellis_migrations') IS NOT NULL";

pub(crate) const LATEST_SNAPSHOT: &str =
    "SELECT snapshot FROM __trellis_migrations ORDER BY id DESC LIMIT 1";

pub(crate) const LIST: &str = "SELECT id, name, checksum FROM __trellis_migrations ORDER BY id";

pub(crate) const CHECKSUM: &str = "SELECT checksum FROM __trellis_migrations WHERE id = $1";

pub(crate) const INSERT: &str = "INSERT INTO __trellis_migrations (id, name, checksum, snapshot, applied_at) \
     VALUES ($1, $2, $3, $4, now())";

/// Key of the transaction-scoped advisory lock held while a migration runs.
/// Two processes applying migrations to the same database take turns.
pub(crate) const LOCK_KEY: i64 = 0x7472_656c_6c69_73;
