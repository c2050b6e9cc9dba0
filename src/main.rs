// ==========================================
// 电影节排片助手 - 命令行入口
// ==========================================
// 用法:
//   festival-planner import <catalogue.csv>
//   festival-planner add <screening_id>
//   festival-planner remove <screening_id>
//   festival-planner preview <screening_id>
//   festival-planner itinerary
//   festival-planner export
// ==========================================

use std::process::ExitCode;

use festival_planner::api::ApiResult;
use festival_planner::app::{get_default_db_path, AppState};
use festival_planner::logging;

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();

    tracing::info!("{} v{}", festival_planner::APP_NAME, festival_planner::VERSION);

    let db_path = get_default_db_path();
    tracing::info!("使用数据库: {}", db_path);

    let state = match AppState::new(db_path) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("初始化失败: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&state, &args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("错误: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(state: &AppState, args: &[String]) -> ApiResult<()> {
    let command = args.first().map(String::as_str).unwrap_or("itinerary");
    let arg = args.get(1).map(String::as_str).unwrap_or("");

    match command {
        "import" => {
            let report = state.catalogue_api.import_catalogue(arg).await?;
            println!("导入 {} 条, 拒绝 {} 行", report.imported, report.rejected.len());
            for rejection in &report.rejected {
                println!("  第{}行: {}", rejection.row, rejection.reason);
            }
        }
        "add" => {
            let response = state.schedule_api.add_selection(arg).await?;
            println!(
                "已加入 {} ({}), 冲突 {} / 提醒 {}",
                response.selection.screening_id,
                response.selection.film_title,
                response.summary.impossible_count,
                response.summary.warning_count
            );
            for conflict in &response.introduced_conflicts {
                println!("  {} <-> {}: {}", conflict.a, conflict.b, conflict.severity);
            }
        }
        "remove" => {
            state.schedule_api.remove_selection(arg)?;
            println!("已移出 {}", arg);
        }
        "preview" => {
            let preview = state.schedule_api.preview_conflicts(arg)?;
            print_json(&preview)?;
        }
        "export" => {
            println!("{}", state.schedule_api.export_itinerary_json()?);
        }
        _ => {
            let itinerary = state.schedule_api.get_itinerary().await?;
            print_json(&itinerary)?;
        }
    }

    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> ApiResult<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| festival_planner::api::ApiError::InternalError(e.to_string()))?;
    println!("{}", text);
    Ok(())
}
