use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use sqlx::{SqliteConnection, SqlitePool};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    pub id: i64,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
}

/// Categories keyed by id, the shape every listing response carries.
pub type CategoryMap = BTreeMap<i64, String>;

pub fn to_map(categories: Vec<Category>) -> CategoryMap {
    categories.into_iter().map(|c| (c.id, c.kind)).collect()
}

pub async fn get_all_categories(pool: &SqlitePool) -> sqlx::Result<Vec<Category>> {
    sqlx::query_as::<_, Category>(
        r#"
        SELECT id, type FROM categories ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn get_category(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<Category>> {
    sqlx::query_as::<_, Category>(
        r#"
        SELECT id, type FROM categories WHERE categories.id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Makes the categories table match `categories` exactly: unknown ids are inserted, known ids
/// are renamed and ids missing from the input are deleted.
pub async fn import_categories(
    conn: &mut SqliteConnection,
    categories: Vec<Category>,
) -> sqlx::Result<()> {
    let existing_ids: HashSet<i64> = sqlx::query_scalar::<_, i64>("SELECT id FROM categories")
        .fetch_all(&mut *conn)
        .await?
        .into_iter()
        .collect();
    let new_ids: HashSet<i64> = categories.iter().map(|c| c.id).collect();

    for id in existing_ids.difference(&new_ids) {
        sqlx::query("DELETE FROM categories WHERE categories.id = ?1")
            .bind(*id)
            .execute(&mut *conn)
            .await?;
    }
    for category in categories {
        if existing_ids.contains(&category.id) {
            sqlx::query("UPDATE categories SET type = ?1 WHERE categories.id = ?2")
                .bind(&category.kind)
                .bind(category.id)
                .execute(&mut *conn)
                .await?;
        } else {
            sqlx::query("INSERT INTO categories (id, type) VALUES (?1, ?2)")
                .bind(category.id)
                .bind(&category.kind)
                .execute(&mut *conn)
                .await?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    #[tokio::test]
    async fn lookup_by_id() {
        let pool = test_pool().await;
        let category = get_category(&pool, 3).await.unwrap().unwrap();
        assert_eq!(category.kind, "Geography");
        assert!(get_category(&pool, 1000).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn import_replaces_the_table() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        import_categories(
            &mut conn,
            vec![
                Category {
                    id: 1,
                    kind: "Physics".to_owned(),
                },
                Category {
                    id: 9,
                    kind: "Music".to_owned(),
                },
            ],
        )
        .await
        .unwrap();
        drop(conn);

        let map = to_map(get_all_categories(&pool).await.unwrap());
        assert_eq!(
            map,
            CategoryMap::from([(1, "Physics".to_owned()), (9, "Music".to_owned())])
        );
    }

    #[test]
    fn serializes_kind_as_type() {
        let category = Category {
            id: 2,
            kind: "Art".to_owned(),
        };
        assert_eq!(
            serde_json::to_value(&category).unwrap(),
            serde_json::json!({"id": 2, "type": "Art"})
        );
    }
}
