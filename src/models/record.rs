//! 批处理数据模型
//!
//! 定义批处理的输入记录、工作单元和结果类型

use serde::Serialize;

/// 输入记录
///
/// `id` 在一个批次内唯一，原样保留到输出中，永远不会被重排或修改。
/// `text` 为 `None` 表示源表格中的缺失单元格。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputRecord {
    /// 记录标识符（不透明，原样透传）
    pub id: String,
    /// 待校正的句子（可能缺失）
    pub text: Option<String>,
}

impl InputRecord {
    /// 创建新的输入记录
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: Some(text.into()),
        }
    }

    /// 创建文本缺失的输入记录
    pub fn missing(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: None,
        }
    }
}

/// 工作单元
///
/// `position` 是记录在提交序列中的下标，只用于并发完成后恢复原始顺序，
/// 对远端服务没有任何意义。
#[derive(Debug, Clone)]
pub struct WorkUnit {
    /// 提交顺序下标（0 起始）
    pub position: usize,
    /// 对应的输入记录
    pub record: InputRecord,
}

/// 单个工作单元的处理结果
///
/// 每个工作单元恰好产生一个结果，不存在部分结果。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Outcome {
    /// 校正成功，携带校正后的句子
    Corrected(String),
    /// 文本为空或缺失，跳过（不发起网络调用）
    Skipped,
    /// 处理失败，携带哨兵错误信息
    Failed(String),
}

impl Outcome {
    /// 输出列的文本表示
    ///
    /// 跳过的记录输出空串；失败的记录输出哨兵信息本身（与源数据表的
    /// `cor_sentence` 列语义一致）。
    pub fn output_text(&self) -> &str {
        match self {
            Outcome::Corrected(text) => text,
            Outcome::Skipped => "",
            Outcome::Failed(message) => message,
        }
    }

    /// 是否为失败结果
    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }
}

/// 标识符与结果的配对
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordOutcome {
    /// 记录标识符（与输入一致）
    pub id: String,
    /// 处理结果
    pub outcome: Outcome,
}

/// 批处理结果
///
/// 核心不变量：长度等于输入批次长度，顺序等于输入提交顺序。
/// 完成顺序无关紧要。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchResult {
    /// 按提交顺序排列的结果
    pub outcomes: Vec<RecordOutcome>,
}

impl BatchResult {
    /// 结果数量
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// 统计 (校正成功, 跳过, 失败) 的数量
    pub fn counts(&self) -> (usize, usize, usize) {
        let mut corrected = 0;
        let mut skipped = 0;
        let mut failed = 0;
        for item in &self.outcomes {
            match item.outcome {
                Outcome::Corrected(_) => corrected += 1,
                Outcome::Skipped => skipped += 1,
                Outcome::Failed(_) => failed += 1,
            }
        }
        (corrected, skipped, failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_text_mapping() {
        assert_eq!(Outcome::Corrected("고친 문장".to_string()).output_text(), "고친 문장");
        assert_eq!(Outcome::Skipped.output_text(), "");
        assert_eq!(Outcome::Failed("HTTP 500".to_string()).output_text(), "HTTP 500");
    }

    #[test]
    fn test_batch_result_counts() {
        let result = BatchResult {
            outcomes: vec![
                RecordOutcome {
                    id: "0".to_string(),
                    outcome: Outcome::Corrected("a".to_string()),
                },
                RecordOutcome {
                    id: "1".to_string(),
                    outcome: Outcome::Skipped,
                },
                RecordOutcome {
                    id: "2".to_string(),
                    outcome: Outcome::Failed("HTTP 500".to_string()),
                },
                RecordOutcome {
                    id: "3".to_string(),
                    outcome: Outcome::Corrected("b".to_string()),
                },
            ],
        };
        assert_eq!(result.counts(), (2, 1, 1));
        assert_eq!(result.len(), 4);
    }
}
