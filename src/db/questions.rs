//! PostgreSQL-backed `QuestionStore` implementation

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool, Postgres, Transaction};

use crate::{
    models::{NewQuestion, OrderDir, Question, SearchField, SearchQuery},
    Error, Result,
};

const QUESTION_COLUMNS: &str = "id, text, hint1, hint2, answer, created_at, updated_at";

const INSERT_QUESTION: &str = "\
INSERT INTO questions (text, hint1, hint2, answer)
VALUES ($1, $2, $3, $4)
RETURNING id, text, hint1, hint2, answer, created_at, updated_at";

/// Store abstraction over the questions table.
#[async_trait]
pub trait QuestionStore: Send + Sync {
    /// List all questions, newest first.
    async fn list(&self) -> Result<Vec<Question>>;

    /// Insert a question; the store assigns identifier and timestamps.
    async fn insert(&self, question: &NewQuestion) -> Result<Question>;

    /// Full-record update. Returns `None` when the identifier is unknown.
    /// `created_at` is preserved; `updated_at` is bumped by the store.
    async fn update(&self, id: i64, question: &NewQuestion) -> Result<Option<Question>>;

    /// Delete by identifier, returning the number of rows removed.
    async fn delete(&self, id: i64) -> Result<u64>;

    /// Substring search over a whitelisted column, sorted by that column.
    async fn search(&self, query: &SearchQuery) -> Result<Vec<Question>>;
}

/// Build the search statement. `col` and `dir` are interpolated only from
/// closed enums, never from raw input.
pub(crate) fn search_sql(field: SearchField, order_dir: OrderDir) -> String {
    format!(
        "SELECT {QUESTION_COLUMNS}
         FROM questions
         WHERE {col} ILIKE $1
         ORDER BY {col} {dir}
         LIMIT $2",
        col = field.column(),
        dir = order_dir.as_sql(),
    )
}

#[derive(Clone)]
pub struct PostgresQuestionStore {
    pool: PgPool,
}

impl PostgresQuestionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Start a transaction for multi-row work (bulk import).
    pub async fn begin(&self) -> Result<Transaction<'static, Postgres>> {
        self.pool.begin().await.map_err(Error::Database)
    }

    /// Insert on an explicit connection so callers can run inside a
    /// transaction or savepoint.
    pub async fn insert_on(
        &self,
        conn: &mut PgConnection,
        question: &NewQuestion,
    ) -> Result<Question> {
        sqlx::query_as::<_, Question>(INSERT_QUESTION)
            .bind(&question.text)
            .bind(question.hint1.as_deref())
            .bind(question.hint2.as_deref())
            .bind(&question.answer)
            .fetch_one(conn)
            .await
            .map_err(Error::Database)
    }
}

#[async_trait]
impl QuestionStore for PostgresQuestionStore {
    async fn list(&self) -> Result<Vec<Question>> {
        let sql = format!(
            "SELECT {QUESTION_COLUMNS}
             FROM questions
             ORDER BY created_at DESC"
        );

        sqlx::query_as::<_, Question>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)
    }

    async fn insert(&self, question: &NewQuestion) -> Result<Question> {
        sqlx::query_as::<_, Question>(INSERT_QUESTION)
            .bind(&question.text)
            .bind(question.hint1.as_deref())
            .bind(question.hint2.as_deref())
            .bind(&question.answer)
            .fetch_one(&self.pool)
            .await
            .map_err(Error::Database)
    }

    async fn update(&self, id: i64, question: &NewQuestion) -> Result<Option<Question>> {
        sqlx::query_as::<_, Question>(
            "UPDATE questions
             SET text = $1, hint1 = $2, hint2 = $3, answer = $4, updated_at = now()
             WHERE id = $5
             RETURNING id, text, hint1, hint2, answer, created_at, updated_at",
        )
        .bind(&question.text)
        .bind(question.hint1.as_deref())
        .bind(question.hint2.as_deref())
        .bind(&question.answer)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)
    }

    async fn delete(&self, id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(result.rows_affected())
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<Question>> {
        let sql = search_sql(query.field, query.order_dir);

        sqlx::query_as::<_, Question>(&sql)
            .bind(query.like_pattern())
            .bind(query.limit)
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_sql_filters_and_sorts_on_the_same_column() {
        let sql = search_sql(SearchField::Hint1, OrderDir::Desc);
        assert!(sql.contains("WHERE hint1 ILIKE $1"));
        assert!(sql.contains("ORDER BY hint1 DESC"));
        assert!(sql.contains("LIMIT $2"));
    }

    #[test]
    fn search_sql_covers_every_whitelisted_column() {
        for (field, column) in [
            (SearchField::Text, "text"),
            (SearchField::Hint1, "hint1"),
            (SearchField::Hint2, "hint2"),
            (SearchField::Answer, "answer"),
        ] {
            let sql = search_sql(field, OrderDir::Asc);
            assert!(sql.contains(&format!("WHERE {column} ILIKE $1")));
            assert!(sql.contains(&format!("ORDER BY {column} ASC")));
        }
    }

    #[test]
    fn search_text_is_never_interpolated() {
        // The pattern travels as a bind parameter; the statement text is
        // fully determined by the two enums.
        let sql = search_sql(SearchField::Answer, OrderDir::Asc);
        assert!(!sql.contains('%'));
        assert_eq!(sql.matches('$').count(), 2);
    }
}
