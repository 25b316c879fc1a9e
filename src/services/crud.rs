//! CRUD service - business logic for question records

use validator::Validate;

use crate::{
    db::{PostgresQuestionStore, QuestionStore},
    models::{validation_message, NewQuestion, Question},
    Error, Result,
};

pub struct CrudService {
    store: PostgresQuestionStore,
}

impl CrudService {
    pub fn new(store: PostgresQuestionStore) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Question>> {
        self.store.list().await
    }

    /// Create a question. Validation runs before the store is touched; the
    /// store assigns identifier and both timestamps.
    pub async fn create(&self, input: NewQuestion) -> Result<Question> {
        validate_question(&input)?;
        self.store.insert(&input).await
    }

    /// Full-record update: all fields overwritten, `updated_at` advances,
    /// `created_at` is unchanged.
    pub async fn update(&self, id: i64, input: NewQuestion) -> Result<Question> {
        validate_question(&input)?;
        self.store
            .update(id, &input)
            .await?
            .ok_or(Error::QuestionNotFound { id })
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let deleted = self.store.delete(id).await?;
        if deleted == 0 {
            return Err(Error::QuestionNotFound { id });
        }
        Ok(())
    }
}

fn validate_question(input: &NewQuestion) -> Result<()> {
    input
        .validate()
        .map_err(|errors| Error::Validation(validation_message(&errors)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_rejects_before_store_access() {
        let err = validate_question(&NewQuestion {
            text: "ab".into(),
            hint1: None,
            hint2: None,
            answer: "x".into(),
        })
        .unwrap_err();

        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(err.to_string(), "text must be at least 3 characters long");
    }

    #[test]
    fn validation_accepts_minimal_record() {
        assert!(validate_question(&NewQuestion {
            text: "abc".into(),
            hint1: None,
            hint2: None,
            answer: "x".into(),
        })
        .is_ok());
    }
}
