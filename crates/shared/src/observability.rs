//! # ログ出力とリクエスト追跡
//!
//! - `LOG_FORMAT`（`json` / `pretty`）と `RUST_LOG` からサブスクライバーを組み立てる
//! - ゲートウェイの各リクエストに UUID v7 の `x-request-id` を振り、スパンに載せる
//!
//! 環境変数の読み取りは `from_lookup` に関数を渡す形にしてあり、
//! テストではプロセスの環境を触らずに済む。

use std::{fmt, str::FromStr};

/// `RUST_LOG` が無いときのフィルタ
pub const DEFAULT_LOG_FILTER: &str = "info,ideecatcher=debug";

/// ログの出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// 1 行 1 イベントの JSON。フィールドはトップレベルに展開する
    Json,
    #[default]
    Pretty,
}

/// `LOG_FORMAT` に知らない値が入っていた
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLogFormat(pub String);

impl fmt::Display for UnknownLogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown log format {:?} (expected \"json\" or \"pretty\")", self.0)
    }
}

impl std::error::Error for UnknownLogFormat {}

impl FromStr for LogFormat {
    type Err = UnknownLogFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            other => Err(UnknownLogFormat(other.to_string())),
        }
    }
}

impl LogFormat {
    /// `LOG_FORMAT` を引いて形式を決める
    ///
    /// 未設定なら既定値。読めない値は警告を出して既定値に倒す
    /// （この時点ではまだサブスクライバーが無いので stderr に直接書く）。
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let Some(raw) = lookup("LOG_FORMAT") else {
            return Self::default();
        };
        raw.parse().unwrap_or_else(|e: UnknownLogFormat| {
            eprintln!("WARNING: {e}, falling back to pretty");
            Self::default()
        })
    }
}

/// サブスクライバーの組み立てに必要な値
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    /// `app` スパンの `service` に入れる名前
    pub service_name: String,
    pub log_format:   LogFormat,
    /// `RUST_LOG` の書式
    pub filter:       String,
}

impl TracingConfig {
    pub fn from_lookup(
        service_name: impl Into<String>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let filter = lookup("RUST_LOG")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Self {
            service_name: service_name.into(),
            log_format: LogFormat::from_lookup(&lookup),
            filter,
        }
    }

    pub fn from_env(service_name: impl Into<String>) -> Self {
        Self::from_lookup(service_name, |key| std::env::var(key).ok())
    }
}

/// グローバルサブスクライバーを設定する
///
/// 既に設定済み、またはフィルタが読めない場合はエラーを返す。
/// 返り値の後は、呼び出し側で `info_span!("app", service = ...)` に入ること。
#[cfg(feature = "observability")]
pub fn init_tracing(
    config: &TracingConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    use tracing_subscriber::{EnvFilter, Layer as _, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_new(&config.filter)?;

    let fmt_layer = match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(true)
            .with_span_list(false)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer().with_target(false).boxed(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;
    Ok(())
}

/// `SetRequestIdLayer` 用の ID 生成器
///
/// クライアントが `x-request-id` を付けてきた場合は、レイヤー側がそれを使う。
#[cfg(feature = "observability")]
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuidV7;

#[cfg(feature = "observability")]
impl tower_http::request_id::MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(
        &mut self,
        _request: &http::Request<B>,
    ) -> Option<tower_http::request_id::RequestId> {
        http::HeaderValue::from_str(&uuid::Uuid::now_v7().to_string())
            .ok()
            .map(tower_http::request_id::RequestId::new)
    }
}

/// `TraceLayer::make_span_with` 用のスパン
#[cfg(feature = "observability")]
pub fn make_request_span<B>(request: &http::Request<B>) -> tracing::Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");

    tracing::info_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = %request_id
    )
}
