/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Users are owned by the external identity provider; we only ever see
/// their subject string.
pub type UserId = String;
