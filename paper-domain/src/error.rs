//! 领域层统一错误定义
//!
//! 聚焦序列化、存储约束、会话生命周期与实体查找等最小必要集合，
//! 存储层错误在命令管线中原样向上传播。
//!
use thiserror::Error;

/// 统一错误类型（基础库最小必要集）
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DomainError {
    // --- 序列化 ---
    #[error("serialization error: {source}")]
    Serde {
        #[from]
        source: serde_json::Error,
    },

    // --- 存储/持久化 ---
    #[error("constraint violation: {reason}")]
    Constraint { reason: String },
    #[error("database error: {reason}")]
    Database { reason: String },
    #[error("session closed")]
    SessionClosed,
    #[error("storage fault injected at {stage}")]
    Fault { stage: &'static str },

    // --- 领域规则 ---
    #[error("invalid value: {reason}")]
    InvalidValue { reason: String },
    #[error("not found: {reason}")]
    NotFound { reason: String },
}

impl DomainError {
    pub fn constraint(reason: impl Into<String>) -> Self {
        Self::Constraint {
            reason: reason.into(),
        }
    }

    pub fn not_found(reason: impl Into<String>) -> Self {
        Self::NotFound {
            reason: reason.into(),
        }
    }

    pub fn invalid_value(reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            reason: reason.into(),
        }
    }
}

/// 统一 Result 类型别名
pub type DomainResult<T> = Result<T, DomainError>;

// 允许在基础设施层直接使用 `?` 将 sqlx 错误转换为 DomainError

#[cfg(feature = "infra-sqlx")]
impl From<sqlx::Error> for DomainError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DomainError::NotFound {
                reason: "row not found".to_string(),
            },
            sqlx::Error::Database(db) if db.constraint().is_some() => DomainError::Constraint {
                reason: db.message().to_string(),
            },
            other => DomainError::Database {
                reason: other.to_string(),
            },
        }
    }
}
