use kernel::store::Document;
use serde_json::{Map, Value};
use sqlx::types::Json;

// documents テーブルから 1 件を読み出すための型
#[derive(sqlx::FromRow)]
pub struct DocumentRow {
    pub id: String,
    pub data: Json<Map<String, Value>>,
}

impl From<DocumentRow> for Document {
    fn from(value: DocumentRow) -> Self {
        let DocumentRow { id, data } = value;
        Document::new(id, data.0)
    }
}
