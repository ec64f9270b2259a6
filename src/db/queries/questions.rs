use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i64,
}

#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i64,
}

const SELECT_QUESTIONS: &str = "SELECT id, question, answer, category, difficulty FROM questions";

pub async fn get_all_questions(pool: &SqlitePool) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
        SELECT id, question, answer, category, difficulty FROM questions ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn get_question(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
        SELECT id, question, answer, category, difficulty FROM questions WHERE questions.id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn get_questions_for_category(
    pool: &SqlitePool,
    category: i64,
) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
        SELECT id, question, answer, category, difficulty FROM questions
        WHERE questions.category = ?1
        ORDER BY id
        "#,
    )
    .bind(category)
    .fetch_all(pool)
    .await
}

/// Case-insensitive substring search over the question text. SQLite's `LIKE` only folds
/// ASCII, so matching happens here with Unicode lowercasing.
pub async fn search_questions(pool: &SqlitePool, term: &str) -> sqlx::Result<Vec<Question>> {
    let term = term.to_lowercase();
    let questions = get_all_questions(pool).await?;
    Ok(questions
        .into_iter()
        .filter(|q| q.question.to_lowercase().contains(&term))
        .collect())
}

/// Questions, optionally limited to one category, whose ids are not in `excluded`.
pub async fn get_questions_excluding(
    pool: &SqlitePool,
    category: Option<i64>,
    excluded: &[i64],
) -> sqlx::Result<Vec<Question>> {
    let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(SELECT_QUESTIONS);
    query.push(" WHERE 1 = 1");
    if let Some(category) = category {
        query.push(" AND questions.category = ").push_bind(category);
    }
    if !excluded.is_empty() {
        query.push(" AND questions.id NOT IN (");
        let mut ids = query.separated(", ");
        for id in excluded {
            ids.push_bind(*id);
        }
        ids.push_unseparated(")");
    }
    query.push(" ORDER BY id");

    query.build_query_as::<Question>().fetch_all(pool).await
}

pub async fn create_question(
    conn: &mut SqliteConnection,
    question: &NewQuestion,
) -> sqlx::Result<i64> {
    let id = sqlx::query(
        r#"
        INSERT INTO questions (question, answer, category, difficulty) VALUES (?1, ?2, ?3, ?4)
        "#,
    )
    .bind(&question.question)
    .bind(&question.answer)
    .bind(question.category)
    .bind(question.difficulty)
    .execute(conn)
    .await?
    .last_insert_rowid();

    Ok(id)
}

/// Returns the number of deleted rows.
pub async fn delete_question(conn: &mut SqliteConnection, id: i64) -> sqlx::Result<u64> {
    let result = sqlx::query(
        r#"
        DELETE FROM questions WHERE questions.id = ?1
        "#,
    )
    .bind(id)
    .execute(conn)
    .await?;
    Ok(result.rows_affected())
}

pub async fn import_questions(
    conn: &mut SqliteConnection,
    questions: Vec<Question>,
) -> sqlx::Result<()> {
    let existing_ids: HashSet<i64> = sqlx::query_scalar::<_, i64>("SELECT id FROM questions")
        .fetch_all(&mut *conn)
        .await?
        .into_iter()
        .collect();
    let new_ids: HashSet<i64> = questions.iter().map(|q| q.id).collect();

    for id in existing_ids.difference(&new_ids) {
        delete_question(conn, *id).await?;
    }
    for question in questions {
        if existing_ids.contains(&question.id) {
            sqlx::query(
                r#"
                UPDATE questions SET question=?1, answer=?2, category=?3, difficulty=?4
                WHERE questions.id = ?5
                "#,
            )
            .bind(&question.question)
            .bind(&question.answer)
            .bind(question.category)
            .bind(question.difficulty)
            .bind(question.id)
            .execute(&mut *conn)
            .await?;
        } else {
            sqlx::query(
                r#"
                INSERT INTO questions (id, question, answer, category, difficulty)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )
            .bind(question.id)
            .bind(&question.question)
            .bind(&question.answer)
            .bind(question.category)
            .bind(question.difficulty)
            .execute(&mut *conn)
            .await?;
        }
    }
    Ok(())
}
