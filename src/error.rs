use crate::models::RecordOutcome;
use std::fmt;

/// 应用程序错误类型
///
/// 单元级错误永远不会出现在这里：它们在单元边界被吸收为 `Outcome::Failed`。
/// 只有批次级条件（配置无效、取消）会作为错误传播。
#[derive(Debug)]
pub enum AppError {
    /// 配置错误
    Config(ConfigError),
    /// 批处理错误
    Batch(BatchError),
    /// 其他错误（用于包装第三方库错误）
    Other(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(e) => write!(f, "配置错误: {}", e),
            AppError::Batch(e) => write!(f, "批处理错误: {}", e),
            AppError::Other(msg) => write!(f, "错误: {}", msg),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(e) => Some(e),
            AppError::Batch(e) => Some(e),
            AppError::Other(_) => None,
        }
    }
}

/// 配置错误
#[derive(Debug)]
pub enum ConfigError {
    /// API 密钥缺失
    MissingApiKey,
    /// 并发数必须为正数
    InvalidConcurrency { value: usize },
    /// 未知的模板名称
    UnknownTemplate { name: String },
    /// 采样参数超出范围
    InvalidSamplingParam { name: String, value: f64 },
    /// 读取配置文件失败
    FileReadFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// TOML 解析失败
    TomlParseFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingApiKey => {
                write!(f, "API 密钥缺失（请设置 UPSTAGE_API_KEY 环境变量）")
            }
            ConfigError::InvalidConcurrency { value } => {
                write!(f, "并发数必须为正数，实际为 {}", value)
            }
            ConfigError::UnknownTemplate { name } => {
                write!(f, "未知的模板名称: {}", name)
            }
            ConfigError::InvalidSamplingParam { name, value } => {
                write!(f, "采样参数 {} 超出范围: {}", name, value)
            }
            ConfigError::FileReadFailed { path, source } => {
                write!(f, "读取配置文件失败 ({}): {}", path, source)
            }
            ConfigError::TomlParseFailed { path, source } => {
                write!(f, "TOML解析失败 ({}): {}", path, source)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::FileReadFailed { source, .. }
            | ConfigError::TomlParseFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}

/// 批处理错误
#[derive(Debug)]
pub enum BatchError {
    /// 批处理被外部取消
    ///
    /// `completed` 保留取消前已经收集到的结果（按提交顺序排列），
    /// 调用方可以自行决定是否保留这部分结果。
    Cancelled { completed: Vec<RecordOutcome> },
}

impl fmt::Display for BatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchError::Cancelled { completed } => {
                write!(f, "批处理被取消，已完成 {} 个单元", completed.len())
            }
        }
    }
}

impl std::error::Error for BatchError {}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建配置文件读取错误
    pub fn config_file_read_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Config(ConfigError::FileReadFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 创建 TOML 解析错误
    pub fn config_toml_parse_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Config(ConfigError::TomlParseFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 创建批处理取消错误
    pub fn batch_cancelled(completed: Vec<RecordOutcome>) -> Self {
        AppError::Batch(BatchError::Cancelled { completed })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
