use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::macros::string_enum;

string_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum Collection {
        DriverPayments => "driver_payments",
        User => "user",
        DesiredShift => "desired_shift",
        ConfirmedShift => "confirmed_shift",
    }
}

/// A stored document. `data` is the record body; bookkeeping lives beside it.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Document {
    pub id: Uuid,
    pub collection: Collection,
    pub data: Value,
    pub expire_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document {
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_value(self.data.clone()).with_context(|| {
            format!(
                "Malformed {} document {}",
                self.collection.as_str(),
                self.id
            )
        })
    }
}

/// Equality match on top-level fields of the document body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter(Map<String, Value>);

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, field: &str, value: impl Serialize) -> Self {
        let value = serde_json::to_value(value).unwrap_or(Value::Null);
        self.0.insert(field.to_string(), value);
        self
    }

    pub fn matches(&self, data: &Value) -> bool {
        self.0
            .iter()
            .all(|(field, expected)| data.get(field) == Some(expected))
    }

    pub fn to_json(&self) -> Value {
        Value::Object(self.0.clone())
    }
}

/// Collection-scoped document storage. No transactions and no concurrency
/// tokens: concurrent writers to the same document race and the last one wins.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    fn backend_tag(&self) -> &'static str;

    /// Documents matching `filter`, oldest first.
    async fn find(&self, collection: Collection, filter: &Filter) -> Result<Vec<Document>>;

    async fn insert(
        &self,
        collection: Collection,
        data: Value,
        expire_at: Option<DateTime<Utc>>,
    ) -> Result<Document>;

    /// Replaces the body and expiry of an existing document.
    async fn update(
        &self,
        collection: Collection,
        id: Uuid,
        data: Value,
        expire_at: Option<DateTime<Utc>>,
    ) -> Result<Option<Document>>;

    async fn delete(&self, collection: Collection, id: Uuid) -> Result<bool>;

    /// Removes documents whose expiry is strictly before `now`.
    async fn delete_expired(&self, collection: Collection, now: DateTime<Utc>) -> Result<u64>;
}
