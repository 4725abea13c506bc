/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Owners are identified by the UUID issued by the auth provider.
pub type OwnerId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
