use paper_domain::error::DomainError;

#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// 存储/约束错误，原样包裹
    #[error("domain: {0}")]
    Domain(#[from] DomainError),

    /// 调用方错误：未知参数名、类型不符或形状错误
    #[error("validation: {0}")]
    Validation(String),

    /// 调用方错误：未注册的命令
    #[error("handler not found: {0}")]
    HandlerNotFound(String),

    #[error("handler already registered: command={command}")]
    AlreadyRegisteredCommand { command: &'static str },

    /// 编程错误：命令声明的能力未在容器中提供
    #[error("capability unavailable: {capability}")]
    CapabilityUnavailable { capability: &'static str },

    /// 编程错误：事件字段无法填充订阅者参数
    #[error("subscriber {subscriber} cannot read event {event}: {reason}")]
    SubscriberParams {
        subscriber: &'static str,
        event: &'static str,
        reason: String,
    },

    #[error("type mismatch: expected={expected}, found={found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("event drain exceeded {limit} events")]
    DrainLimitExceeded { limit: usize },

    #[error("serialization: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("config: {0}")]
    Config(String),
}

pub type AppResult<T> = Result<T, AppError>;
