//! 句子校正客户端 - 业务能力层
//!
//! 只负责"校正一条句子"能力：
//! - 空文本短路为 Skipped，不发起网络调用
//! - 429 指数退避重试，固定上限
//! - 非 429 错误状态与响应解析失败立即判定失败，不重试
//! - 任何本地异常在此边界被吸收为 Failed，绝不向外逃逸

use crate::config::Config;
use crate::models::{ChatRequest, ChatResponse, Outcome};
use crate::prompts;
use crate::services::request_builder::RequestBuilder;
use crate::utils::logging::truncate_text;
use anyhow::Result;
use reqwest::StatusCode;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// 重试耗尽后的哨兵信息
pub const FAILED_AFTER_RETRIES: &str = "Failed after retries";
/// 响应形状不符的哨兵信息
pub const INVALID_RESPONSE_FORMAT: &str = "Invalid API response format";

/// 句子校正客户端
pub struct CorrectionClient {
    http: reqwest::Client,
    builder: RequestBuilder,
    api_url: String,
    api_key: String,
    model: String,
    temperature: f64,
    top_p: f64,
    max_retries: u32,
    pacing_delay: Duration,
    backoff_base: Duration,
}

impl CorrectionClient {
    /// 创建新的校正客户端
    ///
    /// 前提：`config` 已通过 `Config::validate()`，模板名称一定存在。
    pub fn new(config: &Config) -> Self {
        let system_prompt = prompts::get(&config.template_name)
            .or_else(|| prompts::get(prompts::DEFAULT_TEMPLATE))
            .unwrap_or_default();

        Self {
            http: reqwest::Client::new(),
            builder: RequestBuilder::new(system_prompt),
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            top_p: config.top_p,
            max_retries: config.max_retries,
            pacing_delay: config.pacing_delay(),
            backoff_base: config.backoff_base(),
        }
    }

    /// 校正一条句子
    ///
    /// 这是失败遏制边界：本方法永远不返回错误，任何失败都折叠为
    /// `Outcome::Failed`，一条坏记录绝不能让整个批次中断。
    pub async fn correct(&self, text: Option<&str>) -> Outcome {
        let text = match text {
            Some(t) if !t.trim().is_empty() => t,
            // 空文本或缺失：直接跳过，不发起网络调用
            _ => return Outcome::Skipped,
        };

        match self.try_correct(text).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("⚠️ 本地异常被吸收为单元失败: {}", e);
                Outcome::Failed(e.to_string())
            }
        }
    }

    /// 发起请求并处理重试 / 状态分类
    async fn try_correct(&self, text: &str) -> Result<Outcome> {
        debug!("正在校正: {}", truncate_text(text, 40));

        let messages = self.builder.build(text);
        let request = ChatRequest {
            model: &self.model,
            messages: &messages,
            temperature: self.temperature,
            top_p: self.top_p,
        };

        for attempt in 0..self.max_retries {
            // 每次请求前的固定节流延时，与退避无关
            sleep(self.pacing_delay).await;

            let response = self
                .http
                .post(&self.api_url)
                .bearer_auth(&self.api_key)
                .json(&request)
                .send()
                .await?;

            let status = response.status();

            if status == StatusCode::TOO_MANY_REQUESTS {
                let wait = self.backoff_base.saturating_mul(2u32.saturating_pow(attempt));
                warn!(
                    "⚠️ 429 Too Many Requests，等待 {:?} 后重试 ({}/{})",
                    wait,
                    attempt + 1,
                    self.max_retries
                );
                sleep(wait).await;
                continue;
            }

            if !status.is_success() {
                warn!("❌ HTTP {}: 不重试", status.as_u16());
                return Ok(Outcome::Failed(format!("HTTP {}", status.as_u16())));
            }

            // 状态成功：解析响应
            return match response.json::<ChatResponse>().await {
                Ok(parsed) => match parsed.first_content() {
                    Some(content) => {
                        debug!("✓ 校正完成");
                        Ok(Outcome::Corrected(content))
                    }
                    None => {
                        warn!("❌ API 响应缺少 choices 字段");
                        Ok(Outcome::Failed(INVALID_RESPONSE_FORMAT.to_string()))
                    }
                },
                Err(_) => {
                    warn!("❌ API 响应无法解析");
                    Ok(Outcome::Failed(INVALID_RESPONSE_FORMAT.to_string()))
                }
            };
        }

        warn!("❌ 校正失败，已重试 {} 次", self.max_retries);
        Ok(Outcome::Failed(FAILED_AFTER_RETRIES.to_string()))
    }
}
