//! 事务边界
//!
//! `run` 以显式调用包裹根命令的执行：
//! 1. 取得当前工作单元；
//! 2. 执行业务逻辑（含依赖注入）；
//! 3. flush，约束冲突在任何事件投递之前暴露；
//! 4. 排空事件总线，订阅者在同一未提交的工作单元内执行；
//! 5. 提交。
//!
//! 第 2-5 步任一失败：清空事件队列、回滚，原样返回原始错误。
//! 无论成功与否，最后都关闭工作单元。
//!
use crate::container::Scope;
use crate::error::AppResult;
use paper_domain::persist::UnitOfWork;
use std::future::Future;

pub async fn run<T, F>(scope: &Scope, work: F) -> AppResult<T>
where
    F: Future<Output = AppResult<T>> + Send,
    T: Send,
{
    let session = scope.session();

    let result = match commit_after(scope, session.as_ref(), work).await {
        Ok((value, processed)) => {
            tracing::info!(events = processed, "unit of work committed");
            Ok(value)
        }
        Err(err) => {
            let discarded = scope.bus().clear();
            tracing::warn!(error = %err, discarded, "boundary failed, rolling back");
            if let Err(rollback_err) = session.rollback().await {
                tracing::warn!(error = %rollback_err, "rollback failed");
            }
            Err(err)
        }
    };

    if let Err(close_err) = session.close().await {
        tracing::warn!(error = %close_err, "failed to release unit of work");
    }

    result
}

async fn commit_after<T, F>(scope: &Scope, session: &dyn UnitOfWork, work: F) -> AppResult<(T, usize)>
where
    F: Future<Output = AppResult<T>> + Send,
{
    let value = work.await?;
    session.flush().await?;
    let processed = scope.bus().dispatch(scope).await?;
    session.commit().await?;
    Ok((value, processed))
}
