use async_trait::async_trait;
use derive_new::new;
use kernel::store::{
    check, Change, Document, DocumentPath, DocumentStore, Operation, Principal, Query,
    StoreError, WriteBatch, WriteOp,
};
use serde_json::{Map, Value};
use sqlx::{types::Json, PgConnection};
use tokio::sync::broadcast;

use super::feed::ChangeFeed;
use crate::database::{model::document::DocumentRow, ConnectionPool};

/// Documents stored as JSONB rows in the `documents` table.
#[derive(new)]
pub struct PgDocumentStore {
    db: ConnectionPool,
    #[new(default)]
    feed: ChangeFeed,
}

fn backend(e: sqlx::Error) -> StoreError {
    // 40001: 同時実行中のトランザクションと直列化できなかった
    let serialization_failure = e
        .as_database_error()
        .and_then(|db| db.code())
        .is_some_and(|code| code == "40001");
    if serialization_failure {
        StoreError::Conflict(e.to_string())
    } else {
        StoreError::Backend(e.to_string())
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn get(
        &self,
        principal: &Principal,
        path: &DocumentPath,
    ) -> Result<Option<Document>, StoreError> {
        check(principal, path.collection(), Some(path.id()), Operation::Get, None)?;
        let row: Option<DocumentRow> = sqlx::query_as(
            r#"
                SELECT id, data
                FROM documents
                WHERE collection = $1 AND id = $2
            "#,
        )
        .bind(path.collection().to_string())
        .bind(path.id())
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(backend)?;

        Ok(row.map(Document::from))
    }

    async fn list(
        &self,
        principal: &Principal,
        query: &Query,
    ) -> Result<Vec<Document>, StoreError> {
        check(principal, query.target(), None, Operation::List, None)?;
        // 等価条件はすべて JSONB の包含演算子 @> にまとめて渡す
        let containment: Map<String, Value> = query
            .filters()
            .iter()
            .map(|f| (f.field.clone(), f.value.clone()))
            .collect();
        let rows: Vec<DocumentRow> = sqlx::query_as(
            r#"
                SELECT id, data
                FROM documents
                WHERE collection = $1 AND data @> $2
                ORDER BY seq ASC
            "#,
        )
        .bind(query.target().to_string())
        .bind(Json(containment))
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(backend)?;

        Ok(rows.into_iter().map(Document::from).collect())
    }

    async fn commit(&self, principal: &Principal, batch: WriteBatch) -> Result<(), StoreError> {
        for op in batch.ops() {
            check(
                principal,
                op.path().collection(),
                Some(op.path().id()),
                op.operation(),
                op.data(),
            )?;
        }

        let mut tx = self
            .db
            .begin()
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        // 複数ドキュメントの整合性を保つため SERIALIZABLE で実行する
        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut *tx)
            .await
            .map_err(backend)?;

        for op in batch.ops() {
            apply(&mut *tx, op).await?;
        }

        tx.commit().await.map_err(backend)?;
        self.feed.publish_committed(batch.ops());
        Ok(())
    }

    fn changes(&self) -> broadcast::Receiver<Change> {
        self.feed.subscribe()
    }

    async fn ping(&self) -> bool {
        sqlx::query("SELECT 1")
            .fetch_one(self.db.inner_ref())
            .await
            .is_ok()
    }
}

// 途中で失敗した場合はトランザクションが破棄され、何も反映されない
async fn apply(conn: &mut PgConnection, op: &WriteOp) -> Result<(), StoreError> {
    let path = op.path();
    let res = match op {
        WriteOp::Create { data, .. } => sqlx::query(
            r#"
                INSERT INTO documents (collection, id, data)
                VALUES ($1, $2, $3)
                ON CONFLICT (collection, id) DO NOTHING
            "#,
        )
        .bind(path.collection().to_string())
        .bind(path.id())
        .bind(Json(data))
        .execute(&mut *conn)
        .await
        .map_err(backend)?,
        WriteOp::Update { patch, expect, .. } => {
            // expect が空なら @> '{}' は常に真
            let res = sqlx::query(
                r#"
                    UPDATE documents
                    SET data = data || $3
                    WHERE collection = $1 AND id = $2 AND data @> $4
                "#,
            )
            .bind(path.collection().to_string())
            .bind(path.id())
            .bind(Json(patch))
            .bind(Json(expect))
            .execute(&mut *conn)
            .await
            .map_err(backend)?;
            if res.rows_affected() < 1 && !expect.is_empty() && exists(conn, path).await? {
                return Err(StoreError::Conflict(path.to_string()));
            }
            res
        }
        WriteOp::Delete { .. } => {
            sqlx::query(
                r#"
                    DELETE FROM documents
                    WHERE collection = $1 AND id = $2
                "#,
            )
            .bind(path.collection().to_string())
            .bind(path.id())
            .execute(&mut *conn)
            .await
            .map_err(backend)?;
            return Ok(());
        }
    };

    if res.rows_affected() < 1 {
        return Err(match op {
            WriteOp::Create { .. } => StoreError::AlreadyExists(path.to_string()),
            _ => StoreError::NotFound(path.to_string()),
        });
    }
    Ok(())
}

async fn exists(conn: &mut PgConnection, path: &DocumentPath) -> Result<bool, StoreError> {
    sqlx::query_scalar(
        r#"
            SELECT EXISTS (
                SELECT 1 FROM documents WHERE collection = $1 AND id = $2
            )
        "#,
    )
    .bind(path.collection().to_string())
    .bind(path.id())
    .fetch_one(&mut *conn)
    .await
    .map_err(backend)
}
