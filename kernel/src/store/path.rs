use serde_json::{Map, Value};
use std::fmt;
use strum::{AsRefStr, Display, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr, EnumIter)]
pub enum Collection {
    #[strum(serialize = "rooms")]
    Rooms,
    #[strum(serialize = "reservations")]
    Reservations,
    #[strum(serialize = "piscines")]
    Piscines,
    #[strum(serialize = "restau-bar")]
    RestauBar,
    #[strum(serialize = "salles")]
    Salles,
    #[strum(serialize = "users")]
    Users,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentPath {
    collection: Collection,
    id: String,
}

impl DocumentPath {
    pub fn new(collection: Collection, id: impl Into<String>) -> Self {
        Self {
            collection,
            id: id.into(),
        }
    }

    pub fn collection(&self) -> Collection {
        self.collection
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn key(&self) -> SubscriptionKey {
        SubscriptionKey(self.to_string())
    }
}

impl fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.collection, self.id)
    }
}

/// Equality filter on a top-level document field.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub field: String,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    collection: Collection,
    filters: Vec<Filter>,
}

impl Query {
    pub fn collection(collection: Collection) -> Self {
        Self {
            collection,
            filters: Vec::new(),
        }
    }

    pub fn where_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push(Filter {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    pub fn target(&self) -> Collection {
        self.collection
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn matches(&self, fields: &Map<String, Value>) -> bool {
        self.filters
            .iter()
            .all(|f| fields.get(&f.field) == Some(&f.value))
    }

    // 同じ条件を別の順序で並べたクエリも同一キーになるよう、フィールド名で整列する
    pub fn key(&self) -> SubscriptionKey {
        let mut parts: Vec<String> = self
            .filters
            .iter()
            .map(|f| format!("{}=={}", f.field, f.value))
            .collect();
        parts.sort();
        SubscriptionKey(format!("{}?{}", self.collection, parts.join("&")))
    }
}

/// Identity of a live subscription: bindings re-subscribe only when it changes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubscriptionKey(String);

impl SubscriptionKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
