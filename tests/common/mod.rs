//! 测试用的本地模拟校正服务
//!
//! 在 127.0.0.1 随机端口上启动一个 axum 服务，按 `ServerState` 的
//! 配置模拟限流、错误状态、畸形响应和慢响应。
#![allow(dead_code)]

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use sentence_corrector::config::Config;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// 模拟服务的行为配置与观测计数
pub struct ServerState {
    /// 收到的请求总数
    pub hits: AtomicUsize,
    /// 当前在途请求数
    pub inflight: AtomicUsize,
    /// 观测到的在途请求峰值
    pub max_inflight: AtomicUsize,
    /// 每次请求到达的时刻（用于退避间隔断言）
    pub hit_times: Mutex<Vec<Instant>>,
    /// 最近一次请求体
    pub last_body: Mutex<Option<Value>>,
    /// 前 N 个请求返回 429
    pub rate_limit_first: usize,
    /// 固定以该状态码失败
    pub fail_status: Option<u16>,
    /// 返回形状错误的成功响应
    pub malformed: bool,
    /// 用户文本包含该子串时返回 500
    pub fail_on_contains: Option<String>,
    /// 所有请求的固定延时
    pub delay: Duration,
    /// 第 N 个及之后的请求额外延时（用于取消测试）
    pub slow_after: Option<(usize, Duration)>,
}

impl Default for ServerState {
    fn default() -> Self {
        Self {
            hits: AtomicUsize::new(0),
            inflight: AtomicUsize::new(0),
            max_inflight: AtomicUsize::new(0),
            hit_times: Mutex::new(Vec::new()),
            last_body: Mutex::new(None),
            rate_limit_first: 0,
            fail_status: None,
            malformed: false,
            fail_on_contains: None,
            delay: Duration::ZERO,
            slow_after: None,
        }
    }
}

async fn chat_handler(
    State(state): State<Arc<ServerState>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let hit = state.hits.fetch_add(1, Ordering::SeqCst);
    state.hit_times.lock().unwrap().push(Instant::now());

    let current = state.inflight.fetch_add(1, Ordering::SeqCst) + 1;
    state.max_inflight.fetch_max(current, Ordering::SeqCst);

    let text = last_user_content(&body);
    *state.last_body.lock().unwrap() = Some(body);

    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }
    if let Some((after, slow)) = state.slow_after {
        if hit >= after {
            tokio::time::sleep(slow).await;
        }
    }

    let response = if hit < state.rate_limit_first {
        (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({"error": "rate limited"})),
        )
    } else if let Some(status) = state.fail_status {
        (
            StatusCode::from_u16(status).unwrap(),
            Json(json!({"error": "server error"})),
        )
    } else if state
        .fail_on_contains
        .as_deref()
        .is_some_and(|pattern| text.contains(pattern))
    {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "boom"})),
        )
    } else if state.malformed {
        (StatusCode::OK, Json(json!({"unexpected": true})))
    } else {
        (
            StatusCode::OK,
            Json(json!({
                "choices": [
                    {"message": {"role": "assistant", "content": format!("교정: {text}")}}
                ]
            })),
        )
    };

    state.inflight.fetch_sub(1, Ordering::SeqCst);
    response
}

fn last_user_content(body: &Value) -> String {
    body["messages"]
        .as_array()
        .and_then(|messages| messages.last())
        .and_then(|message| message["content"].as_str())
        .unwrap_or_default()
        .to_string()
}

/// 启动模拟服务，返回监听地址
pub async fn spawn_server(state: Arc<ServerState>) -> SocketAddr {
    let app = Router::new()
        .route("/v1/chat/completions", post(chat_handler))
        .with_state(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// 指向模拟服务的测试配置（时间参数压缩到毫秒级）
pub fn test_config(addr: SocketAddr) -> Config {
    Config {
        api_url: format!("http://{addr}/v1/chat/completions"),
        api_key: "test-key".to_string(),
        pacing_delay_ms: 1,
        backoff_base_ms: 20,
        ..Default::default()
    }
}

/// 轮询等待命中数达到 `target`，超时则 panic
pub async fn wait_for_hits(state: &Arc<ServerState>, target: usize, timeout: Duration) {
    let deadline = Instant::now() + timeout;
    while state.hits.load(Ordering::SeqCst) < target {
        assert!(
            Instant::now() < deadline,
            "等待命中数 {} 超时，实际 {}",
            target,
            state.hits.load(Ordering::SeqCst)
        );
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}
