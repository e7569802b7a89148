/// Milliseconds since the UNIX epoch.
pub type Timestamp = i64;
