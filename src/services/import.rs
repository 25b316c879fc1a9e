//! CSV bulk import service
//!
//! Imports semicolon-delimited question rows inside a single transaction.
//! Each row is parsed, validated, and inserted independently; failures are
//! recorded per row and never abort the batch. The transaction commits only
//! when at least one row made it in; an all-failed import leaves the store
//! untouched.

use serde::Serialize;
use sqlx::Acquire;
use validator::Validate;

use crate::{
    db::PostgresQuestionStore,
    models::{validation_message, NewQuestion, Question},
    Error, Result,
};

#[derive(Debug, Serialize)]
pub struct ImportOutcome {
    pub imported_count: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failed_rows: Vec<String>,
    pub questions: Vec<Question>,
}

pub struct ImportService {
    store: PostgresQuestionStore,
}

impl ImportService {
    pub fn new(store: PostgresQuestionStore) -> Self {
        Self { store }
    }

    pub async fn import(&self, csv_text: &str) -> Result<ImportOutcome> {
        if csv_text.trim().is_empty() {
            return Err(Error::InvalidRequest("csv text is required".to_string()));
        }

        let rows = read_rows(csv_text);

        let mut tx = self.store.begin().await?;
        let mut questions: Vec<Question> = Vec::new();
        let mut failed_rows: Vec<String> = Vec::new();

        for (row, prepared) in rows {
            let input = match prepared {
                Ok(input) => input,
                Err(reason) => {
                    failed_rows.push(reason);
                    continue;
                }
            };

            // Each insert runs under a savepoint so a failed statement does
            // not poison the enclosing transaction.
            let mut savepoint = tx.begin().await.map_err(Error::Database)?;
            match self.store.insert_on(&mut *savepoint, &input).await {
                Ok(question) => {
                    savepoint.commit().await.map_err(Error::Database)?;
                    questions.push(question);
                }
                Err(err) => {
                    tracing::warn!(row, error = %err, "import row insert failed");
                    let _ = savepoint.rollback().await;
                    failed_rows.push(format!("row {row}: database error"));
                }
            }
        }

        if questions.is_empty() {
            // Nothing succeeded: discard the transaction.
            let _ = tx.rollback().await;
        } else {
            tx.commit().await.map_err(Error::Database)?;
        }

        tracing::info!(
            imported = questions.len(),
            failed = failed_rows.len(),
            "csv import finished"
        );

        Ok(ImportOutcome {
            imported_count: questions.len(),
            failed_rows,
            questions,
        })
    }
}

/// Read all data rows, pairing each 1-based row number with either a
/// validated question or its failure description. The first row is consumed
/// as a header; an empty body after the header yields no rows.
fn read_rows(csv_text: &str) -> Vec<(usize, std::result::Result<NewQuestion, String>)> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .flexible(true)
        .has_headers(true)
        .from_reader(csv_text.as_bytes());

    reader
        .records()
        .enumerate()
        .map(|(index, record)| {
            let row = index + 1;
            (row, prepare_row(record, row))
        })
        .collect()
}

fn prepare_row(
    record: csv::Result<csv::StringRecord>,
    row: usize,
) -> std::result::Result<NewQuestion, String> {
    let record = record.map_err(|err| {
        tracing::debug!(row, error = %err, "unreadable csv row");
        format!("row {row}: invalid format")
    })?;

    let input = row_to_question(&record).map_err(|reason| format!("row {row}: {reason}"))?;

    // Same rules as single-record creation.
    input
        .validate()
        .map_err(|errors| format!("row {row}: {}", validation_message(&errors)))?;

    Ok(input)
}

/// Map one delimited record onto a question. The last column is always the
/// answer; the first is the text; columns 2 and 3, when present, become the
/// hints. Fields are trimmed; trimmed-empty hints are treated as absent.
fn row_to_question(record: &csv::StringRecord) -> std::result::Result<NewQuestion, &'static str> {
    if record.len() < 2 {
        return Err("insufficient columns");
    }

    let fields: Vec<&str> = record.iter().map(str::trim).collect();

    let non_empty = |value: &str| (!value.is_empty()).then(|| value.to_string());
    let hint1 = if fields.len() > 2 { non_empty(fields[1]) } else { None };
    let hint2 = if fields.len() > 3 { non_empty(fields[2]) } else { None };

    Ok(NewQuestion {
        text: fields[0].to_string(),
        hint1,
        hint2,
        answer: fields[fields.len() - 1].to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(fields: &[&str]) -> csv::StringRecord {
        csv::StringRecord::from(fields.to_vec())
    }

    #[test]
    fn rejects_rows_with_fewer_than_two_columns() {
        assert_eq!(
            row_to_question(&record(&["only one"])).unwrap_err(),
            "insufficient columns"
        );
    }

    #[test]
    fn two_columns_are_text_and_answer() {
        let q = row_to_question(&record(&["What is 2+2?", "4"])).unwrap();
        assert_eq!(q.text, "What is 2+2?");
        assert_eq!(q.hint1, None);
        assert_eq!(q.hint2, None);
        assert_eq!(q.answer, "4");
    }

    #[test]
    fn third_and_fourth_columns_become_hints() {
        let q = row_to_question(&record(&["Capital of Poland?", "On the Vistula", "Warsaw"]))
            .unwrap();
        assert_eq!(q.hint1.as_deref(), Some("On the Vistula"));
        assert_eq!(q.hint2, None);
        assert_eq!(q.answer, "Warsaw");

        let q = row_to_question(&record(&[
            "Capital of Poland?",
            "On the Vistula",
            "Starts with W",
            "Warsaw",
        ]))
        .unwrap();
        assert_eq!(q.hint1.as_deref(), Some("On the Vistula"));
        assert_eq!(q.hint2.as_deref(), Some("Starts with W"));
        assert_eq!(q.answer, "Warsaw");
    }

    #[test]
    fn last_column_is_always_the_answer() {
        // Extra columns between the hints and the answer are ignored.
        let q = row_to_question(&record(&["text here", "h1", "h2", "extra", "answer"])).unwrap();
        assert_eq!(q.text, "text here");
        assert_eq!(q.hint1.as_deref(), Some("h1"));
        assert_eq!(q.hint2.as_deref(), Some("h2"));
        assert_eq!(q.answer, "answer");
    }

    #[test]
    fn fields_are_trimmed_and_blank_hints_dropped() {
        let q = row_to_question(&record(&["  spaced text  ", "   ", "answer  "])).unwrap();
        assert_eq!(q.text, "spaced text");
        assert_eq!(q.hint1, None);
        assert_eq!(q.answer, "answer");
    }

    #[test]
    fn header_row_is_skipped_and_rows_numbered_from_one() {
        let csv_text = "text;hint1;hint2;answer\n\
                        First question?;h1;h2;a1\n\
                        Second question?;a2\n";
        let rows = read_rows(csv_text);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].0, 1);
        assert_eq!(rows[0].1.as_ref().unwrap().text, "First question?");
        assert_eq!(rows[1].0, 2);
        assert_eq!(rows[1].1.as_ref().unwrap().text, "Second question?");
    }

    #[test]
    fn header_only_input_yields_no_rows() {
        assert!(read_rows("text;hint1;hint2;answer\n").is_empty());
        assert!(read_rows("text;answer").is_empty());
    }

    #[test]
    fn failures_carry_row_number_and_reason() {
        let csv_text = "header\n\
                        Good question?;good answer\n\
                        lonely-column\n\
                        ab;answer\n\
                        Another good one?;fine\n";
        let rows = read_rows(csv_text);

        assert_eq!(rows.len(), 4);
        assert!(rows[0].1.is_ok());
        assert_eq!(
            rows[1].1.as_ref().unwrap_err(),
            "row 2: insufficient columns"
        );
        assert_eq!(
            rows[2].1.as_ref().unwrap_err(),
            "row 3: text must be at least 3 characters long"
        );
        assert!(rows[3].1.is_ok());
    }

    #[test]
    fn quoted_fields_may_contain_the_delimiter() {
        let csv_text = "header\n\
                        \"What; exactly; is this?\";the answer\n";
        let rows = read_rows(csv_text);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].1.as_ref().unwrap().text, "What; exactly; is this?");
        assert_eq!(rows[0].1.as_ref().unwrap().answer, "the answer");
    }

    #[test]
    fn empty_answer_column_fails_validation() {
        let csv_text = "header\nValid text here;\n";
        let rows = read_rows(csv_text);

        assert_eq!(rows.len(), 1);
        assert_eq!(
            rows[0].1.as_ref().unwrap_err(),
            "row 1: answer must not be empty"
        );
    }
}
