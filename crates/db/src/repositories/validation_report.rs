//! Per-source pipelines behind [`ValidationRepo::get`](super::ValidationRepo::get).
//!
//! Every source kind runs the same query shape:
//! filter by project, job scope and source, left-join the kind's entity
//! graph, keep the first row of each `DISTINCT ON` group under the kind's
//! `ORDER BY`, then map rows into report entries. [`ReportKind`] supplies the
//! parts that differ.

use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;
use vantage_core::validation::{ValidationResponse, ValidationSource};

use crate::models::validation::{ChartReportRow, DashboardReportRow, ValidationRow};

/// Columns of `validations` (aliased `v`) selected by every pipeline.
pub(crate) const VALIDATION_COLUMNS: &str = "v.validation_id, v.project_uuid, v.job_id, \
    v.error, v.error_type, v.source, v.model_name, v.saved_chart_uuid, v.dashboard_uuid, \
    v.field_name, v.chart_name, v.created_at";

/// The parts of a report query that vary by source kind.
///
/// The leading `ORDER_BY` expressions must match `DISTINCT_ON` in order;
/// PostgreSQL rejects the query otherwise.
pub(crate) trait ReportKind {
    const SOURCE: ValidationSource;
    /// Extra select list, starting with `", "` when non-empty.
    const EXTRA_COLUMNS: &'static str;
    /// Join clauses, ending with a space when non-empty.
    const JOINS: &'static str;
    const DISTINCT_ON: &'static str;
    const ORDER_BY: &'static str;

    type Row: for<'r> FromRow<'r, PgRow> + Send + Unpin;

    fn into_response(row: Self::Row) -> Result<ValidationResponse, sqlx::Error>;
}

/// Explore tables are not stored entities: no joins, dedup on the error text.
pub(crate) struct TableKind;

impl ReportKind for TableKind {
    const SOURCE: ValidationSource = ValidationSource::Table;
    const EXTRA_COLUMNS: &'static str = "";
    const JOINS: &'static str = "";
    const DISTINCT_ON: &'static str = "v.error";
    const ORDER_BY: &'static str = "v.error ASC, v.validation_id DESC";

    type Row = ValidationRow;

    fn into_response(row: Self::Row) -> Result<ValidationResponse, sqlx::Error> {
        row.into_table_response()
    }
}

pub(crate) struct ChartKind;

impl ReportKind for ChartKind {
    const SOURCE: ValidationSource = ValidationSource::Chart;
    const EXTRA_COLUMNS: &'static str = ", sq.name AS entity_name, \
        sq.last_version_updated_at, sq.last_version_chart_kind, \
        u.first_name, u.last_name, s.space_uuid, \
        (SELECT COUNT(acv.chart_uuid) FROM analytics_chart_views acv \
         WHERE acv.chart_uuid = sq.saved_query_uuid) AS views";
    const JOINS: &'static str = "\
        LEFT JOIN saved_queries sq ON sq.saved_query_uuid = v.saved_chart_uuid \
        LEFT JOIN spaces s ON s.space_id = sq.space_id \
        LEFT JOIN users u ON u.user_uuid = sq.last_version_updated_by_user_uuid ";
    const DISTINCT_ON: &'static str = "sq.name, sq.saved_query_id, v.error";
    const ORDER_BY: &'static str = "sq.name ASC, sq.saved_query_id DESC, v.error ASC";

    type Row = ChartReportRow;

    fn into_response(row: Self::Row) -> Result<ValidationResponse, sqlx::Error> {
        row.into_response()
    }
}

/// Dashboards join every version; the newest version supplies the
/// "last updated" fields of each surviving row.
pub(crate) struct DashboardKind;

impl ReportKind for DashboardKind {
    const SOURCE: ValidationSource = ValidationSource::Dashboard;
    const EXTRA_COLUMNS: &'static str = ", d.name AS entity_name, \
        dv.created_at AS last_updated_at, \
        u.first_name, u.last_name, s.space_uuid, \
        (SELECT COUNT(adv.dashboard_uuid) FROM analytics_dashboard_views adv \
         WHERE adv.dashboard_uuid = d.dashboard_uuid) AS views";
    const JOINS: &'static str = "\
        LEFT JOIN dashboards d ON d.dashboard_uuid = v.dashboard_uuid \
        LEFT JOIN spaces s ON s.space_id = d.space_id \
        LEFT JOIN dashboard_versions dv ON dv.dashboard_id = d.dashboard_id \
        LEFT JOIN users u ON u.user_uuid = dv.updated_by_user_uuid ";
    const DISTINCT_ON: &'static str = "d.name, dv.dashboard_id, v.error";
    const ORDER_BY: &'static str =
        "d.name ASC, dv.dashboard_id DESC, v.error ASC, dv.created_at DESC";

    type Row = DashboardReportRow;

    fn into_response(row: Self::Row) -> Result<ValidationResponse, sqlx::Error> {
        row.into_response()
    }
}

/// Build the report query for one source kind.
///
/// Binds: `$1` project uuid, `$2` job id (NULL selects rows with no job),
/// `$3` source.
pub(crate) fn report_query<K: ReportKind>() -> String {
    format!(
        "SELECT DISTINCT ON ({distinct_on}) {VALIDATION_COLUMNS}{extra} \
         FROM validations v \
         {joins}\
         WHERE v.project_uuid = $1 \
           AND v.job_id IS NOT DISTINCT FROM $2 \
           AND v.source = $3 \
         ORDER BY {order_by}",
        distinct_on = K::DISTINCT_ON,
        extra = K::EXTRA_COLUMNS,
        joins = K::JOINS,
        order_by = K::ORDER_BY,
    )
}

/// Run one source kind's pipeline.
pub(crate) async fn fetch_report<K: ReportKind>(
    pool: &PgPool,
    project_uuid: Uuid,
    job_id: Option<&str>,
) -> Result<Vec<ValidationResponse>, sqlx::Error> {
    let query = report_query::<K>();
    let rows = sqlx::query_as::<_, K::Row>(&query)
        .bind(project_uuid)
        .bind(job_id)
        .bind(K::SOURCE.as_str())
        .fetch_all(pool)
        .await?;
    tracing::debug!(
        source = %K::SOURCE,
        %project_uuid,
        job_id,
        rows = rows.len(),
        "Validation report rows fetched"
    );
    rows.into_iter().map(K::into_response).collect()
}
