//! Validation error records and report entries.
//!
//! A validation run records one [`CreateValidation`] per broken reference it
//! finds in a saved chart, a dashboard, or an explore table. The report
//! assembled from the stored rows is a sequence of [`ValidationResponse`]
//! entries enriched with the current state of the referenced entity.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// Name shown for a chart-kind entry whose chart no longer exists.
pub const CHART_PLACEHOLDER_NAME: &str = "Chart does not exist";

/// Name shown for a dashboard-kind entry whose dashboard no longer exists.
pub const DASHBOARD_PLACEHOLDER_NAME: &str = "Dashboard does not exist";

/// Chart kind reported when the chart has no recorded kind.
pub const DEFAULT_CHART_KIND: &str = "vertical_bar";

// ── Source / error type enums ────────────────────────────────────────

/// The kind of entity a validation error was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationSource {
    Chart,
    Dashboard,
    Table,
}

impl ValidationSource {
    /// The value stored in the `validations.source` column.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Chart => "chart",
            Self::Dashboard => "dashboard",
            Self::Table => "table",
        }
    }
}

impl fmt::Display for ValidationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValidationSource {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chart" => Ok(Self::Chart),
            "dashboard" => Ok(Self::Dashboard),
            "table" => Ok(Self::Table),
            other => Err(CoreError::Validation(format!(
                "Unknown validation source '{other}'"
            ))),
        }
    }
}

/// What kind of reference was found broken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValidationErrorType {
    #[serde(rename = "chart")]
    Chart,
    #[serde(rename = "sorting")]
    Sorting,
    #[serde(rename = "filter")]
    Filter,
    #[serde(rename = "metric")]
    Metric,
    #[serde(rename = "model")]
    Model,
    #[serde(rename = "dimension")]
    Dimension,
    #[serde(rename = "custom metric")]
    CustomMetric,
}

impl ValidationErrorType {
    /// The value stored in the `validations.error_type` column.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Chart => "chart",
            Self::Sorting => "sorting",
            Self::Filter => "filter",
            Self::Metric => "metric",
            Self::Model => "model",
            Self::Dimension => "dimension",
            Self::CustomMetric => "custom metric",
        }
    }
}

impl fmt::Display for ValidationErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValidationErrorType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chart" => Ok(Self::Chart),
            "sorting" => Ok(Self::Sorting),
            "filter" => Ok(Self::Filter),
            "metric" => Ok(Self::Metric),
            "model" => Ok(Self::Model),
            "dimension" => Ok(Self::Dimension),
            "custom metric" => Ok(Self::CustomMetric),
            other => Err(CoreError::Validation(format!(
                "Unknown validation error type '{other}'"
            ))),
        }
    }
}

// ── Create DTOs ──────────────────────────────────────────────────────

/// Fields shared by every recorded validation error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationBase {
    pub project_uuid: Uuid,
    pub error: String,
    pub error_type: ValidationErrorType,
}

/// A broken reference inside an explore table / model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTableValidation {
    #[serde(flatten)]
    pub base: ValidationBase,
    pub model_name: Option<String>,
}

/// A broken field reference inside a saved chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateChartValidation {
    #[serde(flatten)]
    pub base: ValidationBase,
    pub chart_uuid: Uuid,
    pub field_name: String,
    /// Snapshot of the chart name at validation time.
    pub chart_name: Option<String>,
}

/// A broken reference inside a dashboard (filter or tile).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateDashboardValidation {
    #[serde(flatten)]
    pub base: ValidationBase,
    pub dashboard_uuid: Uuid,
    pub field_name: Option<String>,
    pub chart_name: Option<String>,
    /// Snapshot of the dashboard name at validation time.
    pub name: Option<String>,
}

/// One validation error to record, discriminated by its `source`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum CreateValidation {
    Table(CreateTableValidation),
    Chart(CreateChartValidation),
    Dashboard(CreateDashboardValidation),
}

impl CreateValidation {
    pub fn source(&self) -> ValidationSource {
        match self {
            Self::Table(_) => ValidationSource::Table,
            Self::Chart(_) => ValidationSource::Chart,
            Self::Dashboard(_) => ValidationSource::Dashboard,
        }
    }

    pub fn base(&self) -> &ValidationBase {
        match self {
            Self::Table(v) => &v.base,
            Self::Chart(v) => &v.base,
            Self::Dashboard(v) => &v.base,
        }
    }
}

// ── Report entries ───────────────────────────────────────────────────

/// Identity and project scope of a stored validation row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ValidationRef {
    pub validation_id: DbId,
    pub project_uuid: Uuid,
}

/// Fields shared by every report entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResponseBase {
    pub validation_id: DbId,
    pub project_uuid: Uuid,
    pub created_at: Timestamp,
    pub error: String,
    pub error_type: ValidationErrorType,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableValidationResponse {
    #[serde(flatten)]
    pub base: ValidationResponseBase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartValidationResponse {
    #[serde(flatten)]
    pub base: ValidationResponseBase,
    pub chart_uuid: Uuid,
    pub name: String,
    pub chart_type: String,
    pub chart_views: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated_by: Option<String>,
    pub last_updated_at: Option<Timestamp>,
    pub space_uuid: Option<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardValidationResponse {
    #[serde(flatten)]
    pub base: ValidationResponseBase,
    pub dashboard_uuid: Uuid,
    pub name: String,
    pub dashboard_views: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated_by: Option<String>,
    pub last_updated_at: Option<Timestamp>,
    pub space_uuid: Option<Uuid>,
}

/// One entry of the aggregated validation report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum ValidationResponse {
    Table(TableValidationResponse),
    Chart(ChartValidationResponse),
    Dashboard(DashboardValidationResponse),
}

impl ValidationResponse {
    pub fn source(&self) -> ValidationSource {
        match self {
            Self::Table(_) => ValidationSource::Table,
            Self::Chart(_) => ValidationSource::Chart,
            Self::Dashboard(_) => ValidationSource::Dashboard,
        }
    }

    pub fn base(&self) -> &ValidationResponseBase {
        match self {
            Self::Table(v) => &v.base,
            Self::Chart(v) => &v.base,
            Self::Dashboard(v) => &v.base,
        }
    }

    /// Display name of the entry, if it has one.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Table(v) => v.name.as_deref(),
            Self::Chart(v) => Some(&v.name),
            Self::Dashboard(v) => Some(&v.name),
        }
    }
}

// ── Naming rules ─────────────────────────────────────────────────────

/// Pick the display name for a report entry.
///
/// The current entity name wins, then the snapshot recorded at validation
/// time, then `placeholder`. Empty strings count as missing.
pub fn resolve_display_name(
    current: Option<&str>,
    snapshot: Option<&str>,
    placeholder: &str,
) -> String {
    current
        .filter(|s| !s.is_empty())
        .or(snapshot.filter(|s| !s.is_empty()))
        .unwrap_or(placeholder)
        .to_string()
}

/// Format the "last updated by" name as `"<first> <last>"`.
///
/// Returns `None` when no user was joined (no first name column value).
pub fn format_user_name(first_name: Option<&str>, last_name: Option<&str>) -> Option<String> {
    let first = first_name?;
    Some(format!("{first} {}", last_name.unwrap_or_default()))
}
