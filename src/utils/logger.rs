use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 本 crate 的兩個執行檔各自的 tracing target
const OWN_TARGETS: [&str; 2] = ["model_orchestrator", "assign_ports"];

/// 建立日誌過濾器：`RUST_LOG` 優先，其次為明確指定的等級，最後才是預設值
pub fn build_filter(verbose: bool, level: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose, level)))
}

fn default_directives(verbose: bool, level: Option<&str>) -> String {
    let (own, rest) = match level {
        Some(level) => (level.to_lowercase(), Some("warn")),
        None if verbose => ("debug".to_string(), Some("info")),
        None => ("info".to_string(), None),
    };

    let mut directives: Vec<String> = OWN_TARGETS
        .iter()
        .map(|target| format!("{}={}", target, own))
        .collect();
    directives.extend(rest.map(str::to_string));
    directives.join(",")
}

pub fn init_cli_logger(verbose: bool, level: Option<&str>) {
    tracing_subscriber::registry()
        .with(build_filter(verbose, level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

/// 以 JSON 格式輸出，方便交給日誌收集系統
pub fn init_json_logger(level: Option<&str>) {
    tracing_subscriber::registry()
        .with(build_filter(false, level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .json(),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives_cover_both_binaries() {
        assert_eq!(
            default_directives(false, None),
            "model_orchestrator=info,assign_ports=info"
        );
        assert_eq!(
            default_directives(true, None),
            "model_orchestrator=debug,assign_ports=debug,info"
        );
        assert_eq!(
            default_directives(false, Some("TRACE")),
            "model_orchestrator=trace,assign_ports=trace,warn"
        );
    }

    #[test]
    fn test_default_directives_parse() {
        for (verbose, level) in [(false, None), (true, None), (false, Some("debug"))] {
            let directives = default_directives(verbose, level);
            assert!(EnvFilter::try_new(&directives).is_ok(), "{}", directives);
        }
    }
}
