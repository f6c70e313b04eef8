use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{contact::ContactSummaryDto, profile::ProfileSummaryDto};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum InteractionKind {
    Email,
    Call,
    Meeting,
    Note,
    Sms,
}

impl InteractionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionKind::Email => "email",
            InteractionKind::Call => "call",
            InteractionKind::Meeting => "meeting",
            InteractionKind::Note => "note",
            InteractionKind::Sms => "sms",
        }
    }
}

impl fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InteractionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email" => Ok(InteractionKind::Email),
            "call" => Ok(InteractionKind::Call),
            "meeting" => Ok(InteractionKind::Meeting),
            "note" => Ok(InteractionKind::Note),
            "sms" => Ok(InteractionKind::Sms),
            other => Err(format!("unknown interaction type '{}'", other)),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Inbound,
    Outbound,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Inbound => "inbound",
            Direction::Outbound => "outbound",
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "inbound" => Ok(Direction::Inbound),
            "outbound" => Ok(Direction::Outbound),
            other => Err(format!("unknown direction '{}'", other)),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct InteractionDto {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: InteractionKind,
    pub subject: Option<String>,
    pub body: Option<String>,
    pub direction: Option<Direction>,
    pub duration_min: Option<i32>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub occurred_at: DateTime<Utc>,
    pub contact_id: Option<Uuid>,
    pub lead_id: Option<Uuid>,
    pub company_id: Option<Uuid>,
    pub author_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub author: Option<ProfileSummaryDto>,
}

/// Interaction in the dashboard activity feed.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct ActivityDto {
    #[serde(flatten)]
    pub interaction: InteractionDto,
    pub contact: Option<ContactSummaryDto>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct CreateInteractionDto {
    #[serde(rename = "type")]
    pub kind: InteractionKind,
    pub subject: Option<String>,
    pub body: Option<String>,
    pub direction: Option<Direction>,
    pub duration_min: Option<i32>,
    pub scheduled_at: Option<DateTime<Utc>>,
    /// Defaults to the time of creation.
    pub occurred_at: Option<DateTime<Utc>>,
    pub contact_id: Option<Uuid>,
    pub lead_id: Option<Uuid>,
    pub company_id: Option<Uuid>,
}
