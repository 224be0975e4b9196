//! 过程宏（paper-macros）
//!
//! 以编译期代码生成替代运行时反射：
//! - `#[entity_id]`：实体标识包装类型；
//! - `#[domain_event]`：领域事件（种类标签 + 发生时间）；
//! - `#[command]` / `#[subscriber_command]`：命令参数的反序列化形状；
//! - `#[derive(Inject)]`：命令协作者（能力）的显式声明与解析。
//!
use proc_macro::TokenStream;

mod command;
mod derive_utils;
mod domain_event;
mod entity_id;
mod field_utils;
mod inject;

/// 实体 ID 宏
/// 用于 `tuple struct` 形式的 ID 类型（例如 `struct ScreenId(Uuid);`），
/// 追加常用派生并实现 `new/Display/FromStr/From` 等。
#[proc_macro_attribute]
pub fn entity_id(attr: TokenStream, item: TokenStream) -> TokenStream {
    entity_id::expand(attr, item)
}

/// 领域事件宏
/// - 仅支持具名字段结构体；
/// - 若缺失则追加 `occurred_at: DateTime<Utc>` 字段；
/// - 生成 `new(..)` 构造函数（发生时间在构造时确定）与 `DomainEvent` 实现；
/// - 参数：`#[domain_event(kind = "screen.created")]`，缺省为结构体名。
#[proc_macro_attribute]
pub fn domain_event(attr: TokenStream, item: TokenStream) -> TokenStream {
    domain_event::expand(attr, item)
}

/// 根命令参数宏：派生 `Deserialize` 并拒绝未知参数名
#[proc_macro_attribute]
pub fn command(attr: TokenStream, item: TokenStream) -> TokenStream {
    command::expand_root(attr, item)
}

/// 订阅者命令参数宏：派生 `Deserialize`，缺失字段取默认值，多余字段忽略
#[proc_macro_attribute]
pub fn subscriber_command(attr: TokenStream, item: TokenStream) -> TokenStream {
    command::expand_subscriber(attr, item)
}

/// 为具名字段结构体实现 `paper_application::capability::Inject`，
/// 每个字段类型须实现 `Capability`。
#[proc_macro_derive(Inject)]
pub fn derive_inject(item: TokenStream) -> TokenStream {
    inject::expand(item)
}
