use std::process::ExitCode;

use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

fn main() -> ExitCode {
    // 提前加载 .env，使得 CONFIG_PATH / TOKIO_WORKER_THREADS 等生效
    dotenv().ok();

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    // Panic 钩子：记录异常，便于排查
    std::panic::set_hook(Box::new(move |info| {
        error!(service = "catalog", event = "panic", %service_id, pid, message = %info, "unhandled panic occurred");
    }));

    // 配置错误由 server::run 报告，这里只取线程数
    let worker_threads = configs::AppConfig::load_or_env().ok().and_then(|cfg| cfg.server.worker_threads);

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = worker_threads { builder.worker_threads(w); }

    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("failed to build tokio runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    rt.block_on(async move {
        // server::run 内部初始化日志并监听 Ctrl+C 优雅停机
        let server_task = tokio::spawn(server::run());
        info!(service = "catalog", event = "start", %service_id, pid, version, "catalog service starting");
        match server_task.await {
            Ok(Ok(())) => {
                info!(service = "catalog", event = "stop", %service_id, pid, "server stopped normally");
                ExitCode::SUCCESS
            }
            Ok(Err(e)) => {
                error!(service = "catalog", event = "run_failed", error = %e, "server::run returned error");
                eprintln!("server failed: {:#}", e);
                ExitCode::FAILURE
            }
            Err(e) => {
                error!(service = "catalog", event = "task_join_error", error = %e, "server task join error");
                ExitCode::FAILURE
            }
        }
    })
}
