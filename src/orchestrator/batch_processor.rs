//! 批量调度引擎 - 编排层
//!
//! ## 职责
//!
//! 1. **并发控制**：使用 Semaphore 限制同时在途的请求数量
//! 2. **扇出**：每条记录一个 tokio 任务，经由 CorrectionClient 校正
//! 3. **收集**：按完成顺序收集结果，随后按提交顺序恢复排序
//! 4. **失败隔离**：单元的 panic 与错误被折叠为该单元的 Failed 结果
//! 5. **取消传播**：外部取消停止新的提交，放弃在途单元，向调用方返回错误
//!
//! ## 设计特点
//!
//! - 完成顺序与输出顺序无关：输出顺序永远等于输入顺序
//! - 单元之间不共享可变状态，只有完成流和进度计数器是共享的
//! - 所有等待（节流、HTTP、退避）都是可取消的挂起点，不持有任何锁

use crate::error::{AppError, AppResult};
use crate::models::{BatchResult, InputRecord, Outcome, RecordOutcome, WorkUnit};
use crate::orchestrator::cancel::CancelSignal;
use crate::services::CorrectionClient;
use futures::stream::{FuturesUnordered, StreamExt};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{info, warn};

/// 批量调度引擎
pub struct BatchProcessor {
    client: Arc<CorrectionClient>,
    max_concurrent: usize,
}

impl BatchProcessor {
    /// 创建新的调度引擎
    pub fn new(client: CorrectionClient, max_concurrent: usize) -> Self {
        Self {
            client: Arc::new(client),
            max_concurrent,
        }
    }

    /// 运行一个批次
    ///
    /// 每条输入记录恰好产生一个结果，输出顺序等于输入顺序。
    /// 单元级失败不会中断批次；只有外部取消会以错误返回，
    /// 取消错误中保留已收集到的结果。
    pub async fn run_batch(
        &self,
        records: Vec<InputRecord>,
        cancel: &CancelSignal,
    ) -> AppResult<BatchResult> {
        let total = records.len();
        if total == 0 {
            return Ok(BatchResult::default());
        }

        info!("🚀 开始批处理: {} 条记录, 并发上限 {}", total, self.max_concurrent);

        let semaphore = Arc::new(Semaphore::new(self.max_concurrent));
        let completed = Arc::new(AtomicUsize::new(0));
        let mut pending = FuturesUnordered::new();

        for (position, record) in records.into_iter().enumerate() {
            let unit = WorkUnit { position, record };
            let record_id = unit.record.id.clone();

            let handle = self.spawn_unit(unit, &semaphore, &completed, cancel, total);

            // 把 JoinHandle 包一层：panic 在这里折叠为该单元的 Failed 结果
            pending.push(async move {
                match handle.await {
                    Ok(done) => done,
                    Err(e) => {
                        warn!("❌ 单元任务异常终止: {}", e);
                        Some((
                            position,
                            RecordOutcome {
                                id: record_id,
                                outcome: Outcome::Failed(format!("Task failed: {}", e)),
                            },
                        ))
                    }
                }
            });
        }

        // 按完成顺序收集，同时监听取消信号
        let mut collected: Vec<(usize, RecordOutcome)> = Vec::with_capacity(total);
        loop {
            tokio::select! {
                next = pending.next() => match next {
                    Some(Some(item)) => collected.push(item),
                    // None 表示该单元在取消后停止，不产生结果
                    Some(None) => {}
                    None => break,
                },
                _ = cancel.cancelled() => {
                    warn!("🛑 批处理被取消: 已完成 {}/{}", collected.len(), total);
                    return Err(AppError::batch_cancelled(Self::into_ordered(collected)));
                }
            }
        }

        if cancel.is_cancelled() {
            warn!("🛑 批处理被取消: 已完成 {}/{}", collected.len(), total);
            return Err(AppError::batch_cancelled(Self::into_ordered(collected)));
        }

        let outcomes = Self::into_ordered(collected);
        info!("✅ 批处理完成: {}/{} 条结果", outcomes.len(), total);

        Ok(BatchResult { outcomes })
    }

    /// 为单个工作单元创建并发任务
    fn spawn_unit(
        &self,
        unit: WorkUnit,
        semaphore: &Arc<Semaphore>,
        completed: &Arc<AtomicUsize>,
        cancel: &CancelSignal,
        total: usize,
    ) -> tokio::task::JoinHandle<Option<(usize, RecordOutcome)>> {
        let client = Arc::clone(&self.client);
        let semaphore = Arc::clone(semaphore);
        let completed = Arc::clone(completed);
        let cancel = cancel.clone();

        tokio::spawn(async move {
            // 取许可前先监听取消：已取消时不再开始新的单元
            let _permit = tokio::select! {
                permit = semaphore.acquire_owned() => match permit {
                    Ok(p) => p,
                    Err(_) => return None,
                },
                _ = cancel.cancelled() => return None,
            };

            // 在途调用同样可以被取消信号放弃
            let outcome = tokio::select! {
                outcome = client.correct(unit.record.text.as_deref()) => outcome,
                _ = cancel.cancelled() => return None,
            };

            let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
            info!("📈 进度: {}/{}", done, total);

            Some((
                unit.position,
                RecordOutcome {
                    id: unit.record.id,
                    outcome,
                },
            ))
        })
    }

    /// 按提交顺序恢复排序，丢弃完成顺序
    fn into_ordered(mut collected: Vec<(usize, RecordOutcome)>) -> Vec<RecordOutcome> {
        collected.sort_by_key(|(position, _)| *position);
        collected.into_iter().map(|(_, item)| item).collect()
    }
}
