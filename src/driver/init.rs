//! Process Initialization
//!
//! クライアント生成前に一度だけ呼ぶプロセス初期化

use std::sync::Once;

static INIT: Once = Once::new();

/// プロセス全体の初期化（ロガー設定）
///
/// 何度呼んでも初期化は1回だけ行われる。`RUST_LOG` 未指定時は `info`。
pub fn initialize() {
    INIT.call_once(|| {
        // テストハーネス等で既にロガーが設定済みなら何もしない
        let _ = env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or("info"),
        )
        .try_init();
    });
}

/// 初期化済みかどうか
pub fn is_initialized() -> bool {
    INIT.is_completed()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_is_idempotent() {
        initialize();
        initialize();
        assert!(is_initialized());
    }
}
