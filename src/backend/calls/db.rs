/**
 * Call Model and Database Operations
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::fmt;
use std::str::FromStr;

/// Direction of a call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallType {
    Incoming,
    Outgoing,
}

impl CallType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CallType::Incoming => "incoming",
            CallType::Outgoing => "outgoing",
        }
    }
}

impl fmt::Display for CallType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CallType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "incoming" => Ok(CallType::Incoming),
            "outgoing" => Ok(CallType::Outgoing),
            other => Err(format!("unknown call type {:?}", other)),
        }
    }
}

/// One recorded call
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Call {
    pub id: uuid::Uuid,
    pub phone_number: String,
    /// `incoming` or `outgoing`
    pub call_type: String,
    pub timestamp: DateTime<Utc>,
}

/// Insert a call stamped with the current time
pub async fn insert_call(
    pool: &PgPool,
    phone_number: &str,
    call_type: CallType,
) -> Result<Call, sqlx::Error> {
    let call = sqlx::query_as::<_, Call>(
        r#"
        INSERT INTO calls (id, phone_number, call_type, timestamp)
        VALUES ($1, $2, $3, $4)
        RETURNING id, phone_number, call_type, timestamp
        "#
    )
    .bind(uuid::Uuid::new_v4())
    .bind(phone_number)
    .bind(call_type.as_str())
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(call)
}

/// Calls of `phone_number`, newest first
pub async fn calls_for_number(pool: &PgPool, phone_number: &str) -> Result<Vec<Call>, sqlx::Error> {
    let calls = sqlx::query_as::<_, Call>(
        r#"
        SELECT id, phone_number, call_type, timestamp
        FROM calls
        WHERE phone_number = $1
        ORDER BY timestamp DESC
        "#
    )
    .bind(phone_number)
    .fetch_all(pool)
    .await?;

    Ok(calls)
}
