use std::str::FromStr;

use chrono::{DateTime, Utc};
use color_eyre::eyre::eyre;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::domain::{
    Project, ProjectId, ProjectMember, ProjectName, ProjectRoster,
    ProjectStore, ProjectStoreError, Role, UserId, VersionedRoster,
};

pub struct PostgresProjectStore {
    pool: PgPool,
}

impl PostgresProjectStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ProjectRow {
    project_id: Uuid,
    project_name: String,
    version: i64,
}

#[derive(sqlx::FromRow)]
struct MemberRow {
    user_id: Uuid,
    role: String,
    joined_at: DateTime<Utc>,
}

fn unexpected(e: impl std::fmt::Display) -> ProjectStoreError {
    ProjectStoreError::UnexpectedError(eyre!(e.to_string()))
}

async fn fetch_project_row(
    conn: &mut PgConnection,
    project_id: &ProjectId,
) -> Result<ProjectRow, ProjectStoreError> {
    // FOR SHARE keeps the version and the member rows read below consistent
    // with each other while a concurrent save_roster is in flight.
    sqlx::query_as::<_, ProjectRow>(
        r#"
            SELECT project_id, project_name, version
            FROM projects
            WHERE project_id = $1
            FOR SHARE
        "#,
    )
    .bind(project_id.as_ref())
    .fetch_one(conn)
    .await
    .map_err(|e| match e {
        sqlx::Error::RowNotFound => ProjectStoreError::ProjectIDNotFound,
        e => ProjectStoreError::UnexpectedError(eyre!(e)),
    })
}

async fn fetch_roster(
    conn: &mut PgConnection,
    project_id: &ProjectId,
) -> Result<ProjectRoster, ProjectStoreError> {
    let rows = sqlx::query_as::<_, MemberRow>(
        r#"
            SELECT user_id, role, joined_at
            FROM project_members
            WHERE project_id = $1
            ORDER BY position
        "#,
    )
    .bind(project_id.as_ref())
    .fetch_all(conn)
    .await
    .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?;

    let members = rows
        .into_iter()
        .map(|row| {
            Ok(ProjectMember {
                user_id: UserId::new(row.user_id),
                role: Role::from_str(&row.role).map_err(unexpected)?,
                joined_at: row.joined_at,
            })
        })
        .collect::<Result<Vec<_>, ProjectStoreError>>()?;

    ProjectRoster::new(members).map_err(unexpected)
}

async fn insert_members(
    conn: &mut PgConnection,
    project_id: &ProjectId,
    roster: &ProjectRoster,
) -> Result<(), ProjectStoreError> {
    for (position, member) in roster.members().iter().enumerate() {
        let position = i32::try_from(position).map_err(unexpected)?;
        sqlx::query(
            r#"
            INSERT INTO project_members (project_id, user_id, role, joined_at, position)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(project_id.as_ref())
        .bind(member.user_id.as_ref())
        .bind(member.role.as_str())
        .bind(member.joined_at)
        .bind(position)
        .execute(&mut *conn)
        .await
        .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?;
    }
    Ok(())
}

#[async_trait::async_trait]
impl ProjectStore for PostgresProjectStore {
    #[tracing::instrument(name = "Adding project to PostgreSQL", skip_all)]
    async fn add_project(
        &mut self,
        project: &Project,
    ) -> Result<(), ProjectStoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?;

        sqlx::query(
            r#"
            INSERT INTO projects (project_id, project_name, version) VALUES ($1, $2, $3)
            "#,
        )
        .bind(project.project_id.as_ref())
        .bind(project.project_name.as_ref())
        .bind(project.version)
        .execute(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                ProjectStoreError::ProjectIDExists
            }
            e => ProjectStoreError::UnexpectedError(eyre!(e)),
        })?;

        insert_members(&mut tx, &project.project_id, &project.members).await?;

        tx.commit()
            .await
            .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))
    }

    #[tracing::instrument(
        name = "Getting project details from PostgreSQL",
        skip_all
    )]
    async fn get_project(
        &self,
        project_id: &ProjectId,
    ) -> Result<Project, ProjectStoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?;

        let row = fetch_project_row(&mut tx, project_id).await?;
        let members = fetch_roster(&mut tx, project_id).await?;

        tx.commit()
            .await
            .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?;

        Ok(Project {
            project_id: ProjectId::new(row.project_id),
            project_name: ProjectName::parse(&row.project_name)
                .map_err(unexpected)?,
            members,
            version: row.version,
        })
    }

    #[tracing::instrument(
        name = "Getting project list from PostgreSQL",
        skip_all
    )]
    async fn get_project_list(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<(ProjectId, ProjectName)>, ProjectStoreError> {
        let rows = sqlx::query_as::<_, (Uuid, String)>(
            r#"
                SELECT projects.project_id, projects.project_name
                FROM projects
                INNER JOIN project_members ON project_members.project_id = projects.project_id
                WHERE project_members.user_id = $1
                ORDER BY projects.project_name
            "#,
        )
        .bind(user_id.as_ref())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?;

        rows.into_iter()
            .map(|(project_id, project_name)| {
                let project_name =
                    ProjectName::parse(&project_name).map_err(unexpected)?;
                Ok((ProjectId::new(project_id), project_name))
            })
            .collect()
    }

    #[tracing::instrument(name = "Loading roster from PostgreSQL", skip_all)]
    async fn load_roster(
        &self,
        project_id: &ProjectId,
    ) -> Result<VersionedRoster, ProjectStoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?;

        let row = fetch_project_row(&mut tx, project_id).await?;
        let roster = fetch_roster(&mut tx, project_id).await?;

        tx.commit()
            .await
            .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?;

        Ok(VersionedRoster {
            roster,
            version: row.version,
        })
    }

    #[tracing::instrument(name = "Saving roster to PostgreSQL", skip_all)]
    async fn save_roster(
        &mut self,
        project_id: &ProjectId,
        roster: &ProjectRoster,
        expected_version: i64,
    ) -> Result<i64, ProjectStoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?;

        let new_version = sqlx::query_scalar::<_, i64>(
            r#"
            UPDATE projects SET version = version + 1
            WHERE project_id = $1 AND version = $2
            RETURNING version
            "#,
        )
        .bind(project_id.as_ref())
        .bind(expected_version)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?;

        let new_version = match new_version {
            Some(version) => version,
            None => {
                let found = sqlx::query_scalar::<_, i64>(
                    r#"
                    SELECT version FROM projects WHERE project_id = $1
                    "#,
                )
                .bind(project_id.as_ref())
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?;

                return Err(match found {
                    Some(found) => ProjectStoreError::VersionConflict {
                        expected: expected_version,
                        found,
                    },
                    None => ProjectStoreError::ProjectIDNotFound,
                });
            }
        };

        sqlx::query(
            r#"
                DELETE FROM project_members WHERE project_id = $1
            "#,
        )
        .bind(project_id.as_ref())
        .execute(&mut *tx)
        .await
        .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?;

        insert_members(&mut tx, project_id, roster).await?;

        tx.commit()
            .await
            .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?;

        Ok(new_version)
    }
}
