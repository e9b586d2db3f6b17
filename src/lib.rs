//! # Sentence Corrector
//!
//! 一个通过外部校正 API 批量校正句子的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用严格的三层架构：
//!
//! ### ① 数据层（Models / Prompts）
//! - `models/` - 输入记录、工作单元、结果类型与 API 线上格式
//! - `prompts/` - 系统提示词模板与固定少样本示例
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单条句子
//! - `RequestBuilder` - 消息序列构建能力（纯函数）
//! - `CorrectionClient` - 单句校正能力（重试 / 退避 / 失败遏制）
//!
//! ### ③ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 批量调度引擎，扇出 / 收集 / 排序
//! - `orchestrator/cancel` - 外部取消信号
//!
//! ## 核心不变量
//!
//! - 每条输入记录恰好产生一个结果
//! - 输出顺序永远等于输入顺序，与完成顺序无关
//! - 单元级失败绝不中断批次；只有配置错误和取消会向调用方传播

pub mod config;
pub mod error;

pub mod models;
pub mod orchestrator;
pub mod prompts;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult, BatchError, ConfigError};
pub use models::{BatchResult, InputRecord, Outcome, RecordOutcome};
pub use orchestrator::{BatchProcessor, CancelSignal};
pub use services::{CorrectionClient, RequestBuilder};
