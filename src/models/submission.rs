//! Contact submission models and the persistence wire shape.

use crate::domain::EmailAddress;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a submission asks of the shop.
///
/// The kind discriminates the rest of the record: an appointment carries a
/// service and a preferred time, a query carries neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionKind {
    /// A general question. Carries no booking details.
    #[default]
    Query,

    /// A booking request. Must carry a service and a preferred time.
    Appointment,
}

impl SubmissionKind {
    /// Parse the lowercase wire value used by the form.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "query" => Some(Self::Query),
            "appointment" => Some(Self::Appointment),
            _ => None,
        }
    }

    /// The lowercase wire value stored in the `type` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Appointment => "appointment",
        }
    }
}

impl fmt::Display for SubmissionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One of the shop's five offerings.
///
/// The wire values are the human-readable names shown in the booking form;
/// they are stored verbatim in the `service` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Service {
    #[serde(rename = "Classic Haircut")]
    ClassicHaircut,

    #[serde(rename = "Beard Trim & Shape")]
    BeardTrimAndShape,

    #[serde(rename = "Hot Towel Shave")]
    HotTowelShave,

    #[serde(rename = "Fade & Taper Combo")]
    FadeAndTaperCombo,

    #[serde(rename = "Hair Wash & Style")]
    HairWashAndStyle,
}

impl Service {
    /// All offerings, in the order the booking form lists them.
    pub const ALL: [Service; 5] = [
        Service::ClassicHaircut,
        Service::BeardTrimAndShape,
        Service::HotTowelShave,
        Service::FadeAndTaperCombo,
        Service::HairWashAndStyle,
    ];

    /// Parse the human-readable service name used by the form.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Classic Haircut" => Some(Self::ClassicHaircut),
            "Beard Trim & Shape" => Some(Self::BeardTrimAndShape),
            "Hot Towel Shave" => Some(Self::HotTowelShave),
            "Fade & Taper Combo" => Some(Self::FadeAndTaperCombo),
            "Hair Wash & Style" => Some(Self::HairWashAndStyle),
            _ => None,
        }
    }

    /// The service name as shown in the form and stored in the table.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ClassicHaircut => "Classic Haircut",
            Self::BeardTrimAndShape => "Beard Trim & Shape",
            Self::HotTowelShave => "Hot Towel Shave",
            Self::FadeAndTaperCombo => "Fade & Taper Combo",
            Self::HairWashAndStyle => "Hair Wash & Style",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Raw form input, exactly as the user entered it.
///
/// Every field is a plain string; nothing is validated here. The serde names
/// match the web form's field names (`fullName`, `type`, `preferredTime`) so
/// a captured form payload deserializes directly into a draft.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactForm {
    /// Full name as entered
    pub full_name: String,

    /// Email address as entered
    pub email: String,

    /// Phone number as entered (optional, free-form)
    pub phone: String,

    /// Raw submission kind (`"query"` or `"appointment"`)
    #[serde(rename = "type")]
    pub kind: String,

    /// Raw service selection (empty when none chosen)
    pub service: String,

    /// Raw preferred date-time (empty when none chosen)
    pub preferred_time: String,

    /// Message body as entered
    pub message: String,
}

impl Default for ContactForm {
    fn default() -> Self {
        Self {
            full_name: String::new(),
            email: String::new(),
            phone: String::new(),
            kind: SubmissionKind::Query.as_str().to_string(),
            service: String::new(),
            preferred_time: String::new(),
            message: String::new(),
        }
    }
}

/// A validated contact submission.
///
/// Produced only by [`crate::validation::validate`]; by construction the
/// presence of `service` and `preferred_time` agrees with `kind`.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactSubmission {
    /// Full name, trimmed
    pub full_name: String,

    /// Validated email address
    pub email: EmailAddress,

    /// Phone number, if one was entered
    pub phone: Option<String>,

    /// Query or appointment
    pub kind: SubmissionKind,

    /// Chosen offering; present iff `kind` is `Appointment`
    pub service: Option<Service>,

    /// Requested slot; present iff `kind` is `Appointment`
    pub preferred_time: Option<DateTime<Utc>>,

    /// Message body
    pub message: String,
}

/// Row shape inserted into the contact table.
///
/// Column names match the deployed schema: the kind discriminator is stored
/// under the legacy column name `type`, and absent optionals serialize as
/// explicit nulls rather than being omitted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubmissionRow {
    /// `full_name` column
    pub full_name: String,

    /// `email` column
    pub email: String,

    /// `phone` column (null when absent)
    pub phone: Option<String>,

    /// `type` column
    #[serde(rename = "type")]
    pub kind: SubmissionKind,

    /// `service` column (null when absent)
    pub service: Option<Service>,

    /// `preferred_time` column as an RFC 3339 timestamp (null when absent)
    pub preferred_time: Option<String>,

    /// `message` column
    pub message: String,
}

impl From<&ContactSubmission> for SubmissionRow {
    fn from(submission: &ContactSubmission) -> Self {
        Self {
            full_name: submission.full_name.clone(),
            email: submission.email.as_str().to_string(),
            phone: submission.phone.clone(),
            kind: submission.kind,
            service: submission.service,
            preferred_time: submission.preferred_time.map(|t| t.to_rfc3339()),
            message: submission.message.clone(),
        }
    }
}
