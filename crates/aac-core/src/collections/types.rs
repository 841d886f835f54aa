//! Entity records stored in the collection documents.
//!
//! Field names serialize in camelCase so documents stay readable by the web
//! front end that shares the data directory.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// How often a person or place features in the user's week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Rarely,
}

/// Circles of communication, from closest (family) to unfamiliar.
///
/// Stored as the numbers 1 through 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Circle {
    Family = 1,
    Friends = 2,
    Acquaintances = 3,
    PaidWorkers = 4,
    Unfamiliar = 5,
}

impl TryFrom<u8> for Circle {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Circle::Family),
            2 => Ok(Circle::Friends),
            3 => Ok(Circle::Acquaintances),
            4 => Ok(Circle::PaidWorkers),
            5 => Ok(Circle::Unfamiliar),
            other => Err(format!("circle must be 1-5, got {}", other)),
        }
    }
}

impl From<Circle> for u8 {
    fn from(circle: Circle) -> Self {
        circle as u8
    }
}

/// A communication partner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: String,
    pub name: String,
    /// e.g. "wife", "friend", "physiotherapist"
    pub role: String,
    pub relationship: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub circle: Option<Circle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub communication_frequency: Option<Frequency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub communication_style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub common_topics: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub communication_preferences: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topics: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A place where conversations happen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub frequency: Frequency,
    /// Person ids
    pub communication_partners: Vec<String>,
    pub notes: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interest {
    High,
    Medium,
    Low,
}

/// A conversation topic and who it is shared with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: String,
    pub name: String,
    pub interest: Interest,
    /// Person ids
    pub related_people: Vec<String>,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassportSection {
    pub id: String,
    pub title: String,
    pub content: String,
    pub order: u32,
}

/// A communication passport: a profile handed to new conversation partners.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Passport {
    pub id: String,
    pub title: String,
    /// Timestamp as written by whichever client saved it; usually RFC 3339.
    pub created_at: String,
    pub updated_at: String,
    pub sections: Vec<PassportSection>,
}

impl Passport {
    /// A passport with no sections, stamped with the current time.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        Self {
            id: id.into(),
            title: title.into(),
            created_at: now.clone(),
            updated_at: now,
            sections: Vec::new(),
        }
    }

    /// Bump `updated_at` to now.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    }

    /// `updated_at` parsed as RFC 3339 or a bare `YYYY-MM-DD` date.
    pub fn updated_at_utc(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.updated_at)
    }

    /// Sections in display order.
    pub fn ordered_sections(&self) -> Vec<&PassportSection> {
        let mut sections: Vec<_> = self.sections.iter().collect();
        sections.sort_by_key(|section| section.order);
        sections
    }
}

fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// A logged conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: String,
    pub partner_id: String,
    pub partner_name: String,
    pub location: String,
    pub date: String,
    pub transcription: String,
    pub notes: String,
    pub topics: Vec<String>,
    /// Length in seconds
    pub duration: u64,
}
