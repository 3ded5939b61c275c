//! User repository for database operations

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::{models::User, pagination::PageRequest};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use tracing::info;

use super::{NewUser, RepositoryError, RepositoryResult, UserRepository, UserSearch};

const USER_COLUMNS: &str = "id, name, email, user_role, created_at, updated_at";

#[derive(FromRow)]
struct UserRow {
    id: i64,
    name: String,
    email: String,
    user_role: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role = row
            .user_role
            .parse()
            .map_err(|e| RepositoryError::CorruptRow(format!("user {}: {}", row.id, e)))?;

        Ok(User {
            id: row.id,
            name: row.name,
            email: row.email,
            role,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Escape LIKE metacharacters so the term matches literally
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Append the WHERE clause for the listing criteria
fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, criteria: &UserSearch) {
    builder
        .push(" WHERE user_role <> ")
        .push_bind(criteria.excluded_role.id().to_string());

    if let Some(term) = &criteria.term {
        let pattern = format!("%{}%", escape_like(term));
        builder
            .push(" AND (name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR email ILIKE ")
            .push_bind(pattern)
            .push(")");
    }

    if let Some(role) = &criteria.role {
        builder.push(" AND user_role = ").push_bind(role.clone());
    }
}

/// User repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn search(
        &self,
        criteria: &UserSearch,
        page: PageRequest,
    ) -> RepositoryResult<(Vec<User>, u64)> {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM users");
        push_filters(&mut count, criteria);
        let total: i64 = count.build_query_scalar().fetch_one(&self.pool).await?;

        let mut select = QueryBuilder::<Postgres>::new(format!("SELECT {} FROM users", USER_COLUMNS));
        push_filters(&mut select, criteria);
        select
            .push(" ORDER BY id LIMIT ")
            .push_bind(i64::try_from(page.limit()).unwrap_or(i64::MAX))
            .push(" OFFSET ")
            .push_bind(i64::try_from(page.offset()).unwrap_or(i64::MAX));

        let rows: Vec<UserRow> = select.build_query_as().fetch_all(&self.pool).await?;
        let users = rows
            .into_iter()
            .map(User::try_from)
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok((users, total.max(0) as u64))
    }

    async fn email_exists(&self, email: &str) -> RepositoryResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }

    async fn create(&self, new_user: &NewUser) -> RepositoryResult<User> {
        info!("Inserting user with role {}", new_user.role);

        let row: UserRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO users (name, email, password, user_role)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(&new_user.name)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(new_user.role.id())
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<User>> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        row.map(User::try_from).transpose()
    }

    async fn delete(&self, id: i64) -> RepositoryResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
