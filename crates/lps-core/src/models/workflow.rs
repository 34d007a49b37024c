//! Workflow batch records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use utoipa::ToSchema;

/// Workflow lifecycle status (matches database enum)
///
/// `Draft -> PendingAd` happens only through a successful generation;
/// `Ready -> Archived` only through the archive operation. `Ready` itself is set by
/// collaborators outside the generation engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type, Serialize, Deserialize, ToSchema)]
#[sqlx(type_name = "workflow_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStatus {
    Draft,
    PendingAd,
    Ready,
    Archived,
}

impl WorkflowStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowStatus::Draft => "draft",
            WorkflowStatus::PendingAd => "pending_ad",
            WorkflowStatus::Ready => "ready",
            WorkflowStatus::Archived => "archived",
        }
    }
}

impl fmt::Display for WorkflowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for WorkflowStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(WorkflowStatus::Draft),
            "pending_ad" => Ok(WorkflowStatus::PendingAd),
            "ready" => Ok(WorkflowStatus::Ready),
            "archived" => Ok(WorkflowStatus::Archived),
            other => Err(format!("unknown workflow status '{}'", other)),
        }
    }
}

/// Workflow definition (database row)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Workflow {
    pub id: i64,
    pub name: String,
    pub status: WorkflowStatus,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Workflow row joined with the number of landing pages it owns (list view)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WorkflowWithCount {
    pub id: i64,
    pub name: String,
    pub status: WorkflowStatus,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub landing_page_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_through_str() {
        for status in [
            WorkflowStatus::Draft,
            WorkflowStatus::PendingAd,
            WorkflowStatus::Ready,
            WorkflowStatus::Archived,
        ] {
            assert_eq!(status.as_str().parse::<WorkflowStatus>(), Ok(status));
        }
        assert!("generating".parse::<WorkflowStatus>().is_err());
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let json = serde_json::to_string(&WorkflowStatus::PendingAd).unwrap();
        assert_eq!(json, "\"pending_ad\"");
    }
}
