use crate::error::{AppError, AppResult, ConfigError};
use crate::prompts;
use serde::Deserialize;
use std::time::Duration;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 同时在途的请求数量上限
    pub max_concurrent_requests: usize,
    /// 系统提示词模板名称
    pub template_name: String,
    /// 采样温度
    pub temperature: f64,
    /// 核采样参数
    pub top_p: f64,
    // --- API 配置 ---
    pub api_url: String,
    pub api_key: String,
    pub model: String,
    // --- 重试 / 节流配置 ---
    /// 429 重试次数上限
    pub max_retries: u32,
    /// 每次请求前的固定节流延时（毫秒）
    pub pacing_delay_ms: u64,
    /// 指数退避基准时长（毫秒），第 n 次重试等待 base * 2^n
    pub backoff_base_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_concurrent_requests: 3,
            template_name: prompts::DEFAULT_TEMPLATE.to_string(),
            temperature: 0.1,
            top_p: 1.0,
            api_url: "https://api.upstage.ai/v1/chat/completions".to_string(),
            api_key: String::new(),
            model: "solar-pro".to_string(),
            max_retries: 10,
            pacing_delay_ms: 500,
            backoff_base_ms: 1000,
        }
    }
}

/// TOML 配置文件的字段（全部可选，缺省字段保持原值）
///
/// API 密钥不从文件读取，只从环境变量读取。
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    max_concurrent_requests: Option<usize>,
    template_name: Option<String>,
    temperature: Option<f64>,
    top_p: Option<f64>,
    api_url: Option<String>,
    model: Option<String>,
    max_retries: Option<u32>,
    pacing_delay_ms: Option<u64>,
    backoff_base_ms: Option<u64>,
}

impl Config {
    /// 从环境变量加载配置，未设置的字段使用默认值
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            max_concurrent_requests: std::env::var("MAX_CONCURRENT_REQUESTS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_concurrent_requests),
            template_name: std::env::var("TEMPLATE_NAME").unwrap_or(default.template_name),
            temperature: std::env::var("TEMPERATURE").ok().and_then(|v| v.parse().ok()).unwrap_or(default.temperature),
            top_p: std::env::var("TOP_P").ok().and_then(|v| v.parse().ok()).unwrap_or(default.top_p),
            api_url: std::env::var("API_URL").unwrap_or(default.api_url),
            api_key: std::env::var("UPSTAGE_API_KEY").unwrap_or(default.api_key),
            model: std::env::var("MODEL_NAME").unwrap_or(default.model),
            max_retries: std::env::var("MAX_RETRIES").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_retries),
            pacing_delay_ms: std::env::var("PACING_DELAY_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.pacing_delay_ms),
            backoff_base_ms: std::env::var("BACKOFF_BASE_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.backoff_base_ms),
        }
    }

    /// 从 TOML 文本合并配置（文件中出现的字段覆盖当前值）
    pub fn merge_toml_str(mut self, content: &str, path: &str) -> AppResult<Self> {
        let file: ConfigFile = toml::from_str(content)
            .map_err(|e| AppError::config_toml_parse_failed(path, e))?;

        if let Some(v) = file.max_concurrent_requests {
            self.max_concurrent_requests = v;
        }
        if let Some(v) = file.template_name {
            self.template_name = v;
        }
        if let Some(v) = file.temperature {
            self.temperature = v;
        }
        if let Some(v) = file.top_p {
            self.top_p = v;
        }
        if let Some(v) = file.api_url {
            self.api_url = v;
        }
        if let Some(v) = file.model {
            self.model = v;
        }
        if let Some(v) = file.max_retries {
            self.max_retries = v;
        }
        if let Some(v) = file.pacing_delay_ms {
            self.pacing_delay_ms = v;
        }
        if let Some(v) = file.backoff_base_ms {
            self.backoff_base_ms = v;
        }

        Ok(self)
    }

    /// 从 TOML 配置文件合并配置
    pub async fn merge_toml_file(self, path: &str) -> AppResult<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| AppError::config_file_read_failed(path, e))?;
        self.merge_toml_str(&content, path)
    }

    /// 校验配置，任何批次运行前调用一次
    pub fn validate(&self) -> AppResult<()> {
        if self.api_key.trim().is_empty() {
            return Err(AppError::Config(ConfigError::MissingApiKey));
        }
        if self.max_concurrent_requests == 0 {
            return Err(AppError::Config(ConfigError::InvalidConcurrency {
                value: self.max_concurrent_requests,
            }));
        }
        if prompts::get(&self.template_name).is_none() {
            return Err(AppError::Config(ConfigError::UnknownTemplate {
                name: self.template_name.clone(),
            }));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(AppError::Config(ConfigError::InvalidSamplingParam {
                name: "temperature".to_string(),
                value: self.temperature,
            }));
        }
        if !(0.0..=1.0).contains(&self.top_p) || self.top_p == 0.0 {
            return Err(AppError::Config(ConfigError::InvalidSamplingParam {
                name: "top_p".to_string(),
                value: self.top_p,
            }));
        }
        Ok(())
    }

    /// 每次请求前的固定节流延时
    pub fn pacing_delay(&self) -> Duration {
        Duration::from_millis(self.pacing_delay_ms)
    }

    /// 指数退避基准时长
    pub fn backoff_base(&self) -> Duration {
        Duration::from_millis(self.backoff_base_ms)
    }
}
