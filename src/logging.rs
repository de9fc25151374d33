//! 로깅 초기화 모듈

use tracing_subscriber::EnvFilter;

/// tracing 구독자 초기화
///
/// `RUST_LOG`가 있으면 그대로 사용하고, 없으면 `warn` (상세 모드에서는 `info`) 레벨을 씁니다.
/// 로그는 stderr로 출력되어 콘솔 리포트와 섞이지 않습니다.
pub fn init(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .try_init();
}
