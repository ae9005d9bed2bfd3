//! Repository for the `validations` table: the validation store and the
//! aggregated validation report.

use sqlx::PgPool;
use uuid::Uuid;
use vantage_core::error::CoreError;
use vantage_core::types::DbId;
use vantage_core::validation::{CreateValidation, ValidationRef, ValidationResponse};

use super::validation_report::{fetch_report, ChartKind, DashboardKind, TableKind};
use crate::error::DbError;
use crate::models::validation::NewValidationRow;

/// Records, removes, and reports validation errors.
pub struct ValidationRepo;

impl ValidationRepo {
    /// Record a batch of validation errors, optionally tied to a job run.
    ///
    /// All rows are inserted in one transaction: if any insert fails the
    /// transaction is dropped uncommitted and nothing is recorded.
    pub async fn create(
        pool: &PgPool,
        validations: &[CreateValidation],
        job_id: Option<&str>,
    ) -> Result<(), sqlx::Error> {
        if validations.is_empty() {
            return Ok(());
        }

        let mut tx = pool.begin().await?;
        for validation in validations {
            let row = NewValidationRow::new(validation, job_id);
            sqlx::query(
                "INSERT INTO validations \
                    (project_uuid, job_id, error, error_type, source, model_name, \
                     saved_chart_uuid, dashboard_uuid, field_name, chart_name) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
            )
            .bind(row.project_uuid)
            .bind(row.job_id)
            .bind(row.error)
            .bind(row.error_type)
            .bind(row.source)
            .bind(row.model_name)
            .bind(row.saved_chart_uuid)
            .bind(row.dashboard_uuid)
            .bind(row.field_name)
            .bind(row.chart_name)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        tracing::info!(count = validations.len(), job_id, "Validation errors recorded");
        Ok(())
    }

    /// Delete every validation row of a project. Returns the number removed.
    pub async fn delete(pool: &PgPool, project_uuid: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM validations WHERE project_uuid = $1")
            .bind(project_uuid)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Delete one validation row. Returns `true` if a row was removed.
    pub async fn delete_validation(pool: &PgPool, validation_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM validations WHERE validation_id = $1")
            .bind(validation_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Look up the project a validation row belongs to.
    ///
    /// Fails with [`CoreError::NotFound`] when no such row exists.
    pub async fn get_by_validation_id(
        pool: &PgPool,
        validation_id: DbId,
    ) -> Result<ValidationRef, DbError> {
        let row: Option<(DbId, Uuid)> = sqlx::query_as(
            "SELECT validation_id, project_uuid FROM validations WHERE validation_id = $1",
        )
        .bind(validation_id)
        .fetch_optional(pool)
        .await?;

        let (validation_id, project_uuid) = row.ok_or(CoreError::NotFound {
            entity: "Validation",
            id: validation_id,
        })?;
        Ok(ValidationRef {
            validation_id,
            project_uuid,
        })
    }

    /// Assemble the validation report of a project.
    ///
    /// With `job_id` only rows of that job run are considered; without it
    /// only rows recorded outside any job. An empty `job_id` counts as none.
    /// Entries are grouped table, chart, dashboard; each group is
    /// deduplicated and ordered by its own key.
    pub async fn get(
        pool: &PgPool,
        project_uuid: Uuid,
        job_id: Option<&str>,
    ) -> Result<Vec<ValidationResponse>, sqlx::Error> {
        let job_id = job_id.filter(|j| !j.is_empty());
        let (tables, charts, dashboards) = futures::try_join!(
            fetch_report::<TableKind>(pool, project_uuid, job_id),
            fetch_report::<ChartKind>(pool, project_uuid, job_id),
            fetch_report::<DashboardKind>(pool, project_uuid, job_id),
        )?;

        let mut report = Vec::with_capacity(tables.len() + charts.len() + dashboards.len());
        report.extend(tables);
        report.extend(charts);
        report.extend(dashboards);
        Ok(report)
    }
}
