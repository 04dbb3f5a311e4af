/// Game and tag ids: PostgreSQL BIGSERIAL, assigned by the store.
pub type DbId = i64;

/// Row timestamps, always UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
