//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批量调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 批量调度引擎
//! - 把一批记录扇出到有界并发任务
//! - 控制并发数量（Semaphore）
//! - 按完成顺序收集、按提交顺序输出
//! - 传播外部取消信号
//!
//! ### `cancel` - 取消信号
//! - 可克隆的一次性取消信号（watch 通道）
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<InputRecord>)
//!     ↓
//! services::CorrectionClient (处理单条句子)
//!     ↓
//! services::RequestBuilder (构建消息序列)
//! ```
//!
//! ## 设计原则
//!
//! 1. **单一职责**：编排层只做调度和统计，不做业务判断
//! 2. **失败隔离**：单元级失败在单元边界被吸收，不影响其他单元
//! 3. **顺序不变量**：输出顺序永远等于输入顺序

pub mod batch_processor;
pub mod cancel;

// 重新导出主要类型
pub use batch_processor::BatchProcessor;
pub use cancel::CancelSignal;
