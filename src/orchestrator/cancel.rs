//! 取消信号
//!
//! 基于 `tokio::sync::watch` 的一次性取消信号：可以任意克隆，
//! 任意一端调用 `cancel()` 后所有等待方都会被唤醒，且之后的
//! 等待立即返回。

use std::sync::Arc;
use tokio::sync::watch;

/// 外部取消信号
#[derive(Clone)]
pub struct CancelSignal {
    tx: Arc<watch::Sender<bool>>,
}

impl CancelSignal {
    /// 创建新的取消信号（初始为未取消）
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// 触发取消
    pub fn cancel(&self) {
        // send 只在没有接收方时失败，此处忽略即可
        let _ = self.tx.send(true);
    }

    /// 是否已取消
    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }

    /// 等待取消信号
    ///
    /// 已取消时立即返回；否则挂起直到 `cancel()` 被调用。
    pub async fn cancelled(&self) {
        let mut rx = self.tx.subscribe();
        if *rx.borrow() {
            return;
        }
        while rx.changed().await.is_ok() {
            if *rx.borrow() {
                return;
            }
        }
        // 发送端被持有在 self 里，通道不会在等待期间关闭
        std::future::pending::<()>().await;
    }
}

impl Default for CancelSignal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_cancel_wakes_waiters() {
        let signal = CancelSignal::new();
        assert!(!signal.is_cancelled());

        let waiter = {
            let signal = signal.clone();
            tokio::spawn(async move { signal.cancelled().await })
        };

        tokio::time::sleep(Duration::from_millis(10)).await;
        signal.cancel();

        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("等待方应该被唤醒")
            .expect("等待任务不应 panic");
        assert!(signal.is_cancelled());
    }

    #[tokio::test]
    async fn test_cancelled_returns_immediately_after_cancel() {
        let signal = CancelSignal::new();
        signal.cancel();
        tokio::time::timeout(Duration::from_millis(100), signal.cancelled())
            .await
            .expect("已取消的信号应该立即返回");
    }
}
