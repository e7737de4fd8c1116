//! Database schema for craftstats

/// player_activity initialization, matches the schema consumed by reports
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS player_activity (
    "Index" SERIAL PRIMARY KEY,
    "Time_Stamp" TIMESTAMP NOT NULL,
    "Player_Count" INT,
    "Player_Names" TEXT,
    "Server_Name" TEXT
)
"#;
