//! 日志/追踪初始化

use crate::config::Settings;
use tracing_subscriber::EnvFilter;

/// 初始化进程级 tracing 订阅者；`RUST_LOG` 优先于配置中的过滤规则。
///
/// 可重复调用（后续调用为空操作）。
pub fn init(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(settings.debug);

    let _ = if settings.log_json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        let settings = Settings {
            log_json: true,
            ..Settings::default()
        };
        init(&settings);
        init(&Settings::default());
        tracing::info!("still logging");
    }
}
