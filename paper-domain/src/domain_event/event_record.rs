use super::DomainEvent;
use crate::error::{DomainError, DomainResult};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// 类型擦除后的事件记录
///
/// 事件总线队列中保存的形态：订阅者按字段名从 `fields` 中取值，
/// 不关心事件的具体 Rust 类型。
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    kind: &'static str,
    occurred_at: DateTime<Utc>,
    fields: Map<String, Value>,
}

impl EventRecord {
    pub fn from_event<E>(event: &E) -> DomainResult<Self>
    where
        E: DomainEvent,
    {
        let fields = match serde_json::to_value(event)? {
            Value::Object(map) => map,
            other => {
                return Err(DomainError::invalid_value(format!(
                    "event {} must serialize to an object, got {other}",
                    E::KIND
                )));
            }
        };

        Ok(Self {
            kind: E::KIND,
            occurred_at: event.occurred_at(),
            fields,
        })
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// 以字段名填充目标参数结构；多余字段与缺失字段的处理由目标类型的
    /// serde 属性决定（订阅者命令：忽略多余、缺失取默认）。
    pub fn params<T>(&self) -> DomainResult<T>
    where
        T: DeserializeOwned,
    {
        Ok(serde_json::from_value(Value::Object(self.fields.clone()))?)
    }
}
