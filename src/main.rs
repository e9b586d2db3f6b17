use anyhow::Result;
use sentence_corrector::config::Config;
use sentence_corrector::models::InputRecord;
use sentence_corrector::orchestrator::{BatchProcessor, CancelSignal};
use sentence_corrector::services::CorrectionClient;
use sentence_corrector::utils::logging;
use std::io::BufRead;
use tracing::warn;

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logging::init();

    // 加载配置：环境变量 → 可选 TOML 文件覆盖 → 校验
    let mut config = Config::from_env();
    if let Ok(path) = std::env::var("CONFIG_FILE") {
        config = config.merge_toml_file(&path).await?;
    }
    config.validate()?;

    logging::log_startup(&config);

    // 从标准输入读取记录：每行 "id<TAB>text"，没有制表符时以行号作为 id
    let records = read_records()?;
    logging::log_records_loaded(records.len());

    // Ctrl-C → 取消信号
    let cancel = CancelSignal::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("🛑 收到中断信号，正在取消批处理...");
                cancel.cancel();
            }
        });
    }

    // 运行批处理
    let client = CorrectionClient::new(&config);
    let processor = BatchProcessor::new(client, config.max_concurrent_requests);
    let result = processor.run_batch(records, &cancel).await?;

    logging::print_final_stats(&result);

    // 输出结果：默认 id<TAB>output，OUTPUT_JSON=1 时每行一个 JSON 对象
    let as_json = std::env::var("OUTPUT_JSON").is_ok_and(|v| v == "1");
    for item in &result.outcomes {
        if as_json {
            println!("{}", serde_json::to_string(item)?);
        } else {
            println!("{}\t{}", item.id, item.outcome.output_text());
        }
    }

    Ok(())
}

/// 从标准输入读取输入记录
fn read_records() -> Result<Vec<InputRecord>> {
    let stdin = std::io::stdin();
    let mut records = Vec::new();
    for (line_no, line) in stdin.lock().lines().enumerate() {
        let line = line?;
        let record = match line.split_once('\t') {
            Some((id, text)) => InputRecord::new(id, text),
            None => InputRecord::new(line_no.to_string(), line),
        };
        records.push(record);
    }
    Ok(records)
}
