//! Review status catalog and notification text.
use crate::error::ParseError;
use serde_json::Value;

const NAME_KEY: &str = "homework_name";
const STATUS_KEY: &str = "status";

/// The closed set of review statuses the API reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl ReviewStatus {
    pub const ALL: [ReviewStatus; 3] = [
        ReviewStatus::Approved,
        ReviewStatus::Reviewing,
        ReviewStatus::Rejected,
    ];

    pub fn code(self) -> &'static str {
        match self {
            ReviewStatus::Approved => "approved",
            ReviewStatus::Reviewing => "reviewing",
            ReviewStatus::Rejected => "rejected",
        }
    }

    /// Human-readable verdict shown to the student.
    pub fn verdict(self) -> &'static str {
        match self {
            ReviewStatus::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            ReviewStatus::Reviewing => "Работа взята на проверку ревьюером.",
            ReviewStatus::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.code() == code)
    }
}

/// A review item whose required fields have been checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewItem<'a> {
    pub name: &'a str,
    pub status: ReviewStatus,
}

impl<'a> ReviewItem<'a> {
    /// Read the name and status out of a raw item.
    ///
    /// Both fields must be present before the status code is looked up, so a
    /// missing name wins over an unknown status.
    pub fn from_value(item: &'a Value) -> Result<Self, ParseError> {
        let name = string_field(item, NAME_KEY).ok_or(ParseError::MissingField(NAME_KEY))?;
        let code = string_field(item, STATUS_KEY).ok_or(ParseError::MissingField(STATUS_KEY))?;
        let status = ReviewStatus::from_code(code)
            .ok_or_else(|| ParseError::UnknownStatus(code.to_string()))?;
        Ok(Self { name, status })
    }

    pub fn message(&self) -> String {
        format!(
            "Changed review status for \"{}\". {}",
            self.name,
            self.status.verdict()
        )
    }
}

/// Turn the latest review item into the notification text.
pub fn parse_status(item: &Value) -> Result<String, ParseError> {
    ReviewItem::from_value(item).map(|item| item.message())
}

fn string_field<'a>(item: &'a Value, key: &str) -> Option<&'a str> {
    item.get(key).and_then(Value::as_str)
}
