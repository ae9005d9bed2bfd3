//! Rows of the `validations` table and the report rows joined onto it.

use sqlx::FromRow;
use uuid::Uuid;
use vantage_core::error::CoreError;
use vantage_core::types::{DbId, Timestamp};
use vantage_core::validation::{
    format_user_name, resolve_display_name, ChartValidationResponse, CreateValidation,
    DashboardValidationResponse, TableValidationResponse, ValidationResponse,
    ValidationResponseBase, CHART_PLACEHOLDER_NAME, DASHBOARD_PLACEHOLDER_NAME,
    DEFAULT_CHART_KIND,
};

/// Wrap a domain error raised while interpreting a row.
fn decode_error(err: CoreError) -> sqlx::Error {
    sqlx::Error::Decode(Box::new(err))
}

// ── Stored row ───────────────────────────────────────────────────────

/// A row from the `validations` table.
#[derive(Debug, Clone, FromRow)]
pub struct ValidationRow {
    pub validation_id: DbId,
    pub project_uuid: Uuid,
    pub job_id: Option<String>,
    pub error: String,
    pub error_type: String,
    pub source: String,
    pub model_name: Option<String>,
    pub saved_chart_uuid: Option<Uuid>,
    pub dashboard_uuid: Option<Uuid>,
    pub field_name: Option<String>,
    pub chart_name: Option<String>,
    pub created_at: Timestamp,
}

impl ValidationRow {
    /// The fields every report entry carries.
    pub fn response_base(&self) -> Result<ValidationResponseBase, sqlx::Error> {
        Ok(ValidationResponseBase {
            validation_id: self.validation_id,
            project_uuid: self.project_uuid,
            created_at: self.created_at,
            error: self.error.clone(),
            error_type: self.error_type.parse().map_err(decode_error)?,
        })
    }

    pub fn into_table_response(self) -> Result<ValidationResponse, sqlx::Error> {
        Ok(ValidationResponse::Table(TableValidationResponse {
            base: self.response_base()?,
            name: self.model_name,
        }))
    }
}

// ── Insert mapping ───────────────────────────────────────────────────

/// Flat column values for one `validations` insert.
///
/// Only the columns relevant to the record's source are set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewValidationRow<'a> {
    pub project_uuid: Uuid,
    pub job_id: Option<&'a str>,
    pub error: &'a str,
    pub error_type: &'static str,
    pub source: &'static str,
    pub model_name: Option<&'a str>,
    pub saved_chart_uuid: Option<Uuid>,
    pub dashboard_uuid: Option<Uuid>,
    pub field_name: Option<&'a str>,
    pub chart_name: Option<&'a str>,
}

impl<'a> NewValidationRow<'a> {
    pub fn new(validation: &'a CreateValidation, job_id: Option<&'a str>) -> Self {
        let base = validation.base();
        let row = Self {
            project_uuid: base.project_uuid,
            job_id,
            error: &base.error,
            error_type: base.error_type.as_str(),
            source: validation.source().as_str(),
            model_name: None,
            saved_chart_uuid: None,
            dashboard_uuid: None,
            field_name: None,
            chart_name: None,
        };

        match validation {
            CreateValidation::Table(table) => Self {
                model_name: table.model_name.as_deref(),
                ..row
            },
            CreateValidation::Chart(chart) => Self {
                saved_chart_uuid: Some(chart.chart_uuid),
                field_name: Some(&chart.field_name),
                chart_name: chart.chart_name.as_deref(),
                ..row
            },
            CreateValidation::Dashboard(dashboard) => Self {
                dashboard_uuid: Some(dashboard.dashboard_uuid),
                field_name: dashboard.field_name.as_deref(),
                chart_name: dashboard.chart_name.as_deref(),
                model_name: dashboard.name.as_deref(),
                ..row
            },
        }
    }
}

// ── Report rows ──────────────────────────────────────────────────────

/// A chart-kind validation row left-joined with its saved chart, space,
/// last-updating user, and view count.
#[derive(Debug, Clone, FromRow)]
pub struct ChartReportRow {
    #[sqlx(flatten)]
    pub validation: ValidationRow,
    pub entity_name: Option<String>,
    pub last_version_updated_at: Option<Timestamp>,
    pub last_version_chart_kind: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub space_uuid: Option<Uuid>,
    pub views: Option<i64>,
}

impl ChartReportRow {
    pub fn into_response(self) -> Result<ValidationResponse, sqlx::Error> {
        let base = self.validation.response_base()?;
        let chart_uuid = self.validation.saved_chart_uuid.ok_or_else(|| {
            decode_error(CoreError::Internal(format!(
                "chart validation {} has no saved_chart_uuid",
                self.validation.validation_id
            )))
        })?;

        Ok(ValidationResponse::Chart(ChartValidationResponse {
            base,
            chart_uuid,
            name: resolve_display_name(
                self.entity_name.as_deref(),
                self.validation.chart_name.as_deref(),
                CHART_PLACEHOLDER_NAME,
            ),
            chart_type: self
                .last_version_chart_kind
                .unwrap_or_else(|| DEFAULT_CHART_KIND.to_string()),
            chart_views: self.views.unwrap_or(0),
            field_name: self.validation.field_name,
            last_updated_by: format_user_name(
                self.first_name.as_deref(),
                self.last_name.as_deref(),
            ),
            last_updated_at: self.last_version_updated_at,
            space_uuid: self.space_uuid,
        }))
    }
}

/// A dashboard-kind validation row left-joined with its dashboard, space,
/// a dashboard version and its author, and view count.
#[derive(Debug, Clone, FromRow)]
pub struct DashboardReportRow {
    #[sqlx(flatten)]
    pub validation: ValidationRow,
    pub entity_name: Option<String>,
    pub last_updated_at: Option<Timestamp>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub space_uuid: Option<Uuid>,
    pub views: Option<i64>,
}

impl DashboardReportRow {
    pub fn into_response(self) -> Result<ValidationResponse, sqlx::Error> {
        let base = self.validation.response_base()?;
        let dashboard_uuid = self.validation.dashboard_uuid.ok_or_else(|| {
            decode_error(CoreError::Internal(format!(
                "dashboard validation {} has no dashboard_uuid",
                self.validation.validation_id
            )))
        })?;

        Ok(ValidationResponse::Dashboard(DashboardValidationResponse {
            base,
            dashboard_uuid,
            name: resolve_display_name(
                self.entity_name.as_deref(),
                self.validation.model_name.as_deref(),
                DASHBOARD_PLACEHOLDER_NAME,
            ),
            dashboard_views: self.views.unwrap_or(0),
            field_name: self.validation.field_name,
            chart_name: self.validation.chart_name,
            last_updated_by: format_user_name(
                self.first_name.as_deref(),
                self.last_name.as_deref(),
            ),
            last_updated_at: self.last_updated_at,
            space_uuid: self.space_uuid,
        }))
    }
}
