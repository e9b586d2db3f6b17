//! 请求构建服务 - 业务能力层
//!
//! 只负责"构建消息序列"能力：系统模板 + 固定少样本示例 + 一条变量消息。
//! 纯函数，无状态，无 I/O。

use crate::models::ChatMessage;
use crate::prompts::EXAMPLE_PAIRS;

/// 请求构建器
///
/// 职责：
/// - 把一条待校正文本组装成完整的消息序列
/// - 不发起网络调用
/// - 不校验文本内容（空文本的短路处理在调用方）
pub struct RequestBuilder {
    system_prompt: String,
}

impl RequestBuilder {
    /// 创建新的请求构建器
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
        }
    }

    /// 构建消息序列
    ///
    /// 顺序固定：系统消息 → 少样本示例（user/assistant 交替）→ 变量 user 消息。
    /// 对空文本同样不会失败。
    pub fn build(&self, text: &str) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(2 + EXAMPLE_PAIRS.len() * 2);

        messages.push(ChatMessage::system(&self.system_prompt));

        for (err_sentence, cor_sentence) in EXAMPLE_PAIRS {
            messages.push(ChatMessage::user(*err_sentence));
            messages.push(ChatMessage::assistant(*cor_sentence));
        }

        messages.push(ChatMessage::user(text));

        messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_shape() {
        let builder = RequestBuilder::new("교정 전문가");
        let messages = builder.build("안녕 하세요");

        assert_eq!(messages.len(), 2 + EXAMPLE_PAIRS.len() * 2);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[0].content, "교정 전문가");

        // 少样本示例严格交替
        for (i, pair) in messages[1..messages.len() - 1].chunks(2).enumerate() {
            assert_eq!(pair[0].role, "user", "示例 {} 的 user 消息", i);
            assert_eq!(pair[1].role, "assistant", "示例 {} 的 assistant 消息", i);
        }

        let last = messages.last().unwrap();
        assert_eq!(last.role, "user");
        assert_eq!(last.content, "안녕 하세요");
    }

    #[test]
    fn test_build_is_deterministic() {
        let builder = RequestBuilder::new("prompt");
        assert_eq!(builder.build("문장"), builder.build("문장"));
    }

    #[test]
    fn test_build_accepts_empty_text() {
        let builder = RequestBuilder::new("prompt");
        let messages = builder.build("");
        assert_eq!(messages.last().unwrap().content, "");
    }
}
