//! # ゲートウェイクライアント
//!
//! コンポーザーからゲートウェイへの通信を担当する。
//!
//! ## エンドポイント
//!
//! - `POST /api/send-email` - アイデアをメールとして送信
//!
//! 呼び出しの失敗（ネットワーク、2xx 以外、解釈できないボディ）は
//! [`DispatchClientError`] として返し、[`dispatch_idea`] が失敗の [`DispatchResult`]
//! に変換する。コントローラーに例外的な経路は届かない。

use std::time::Duration;

use async_trait::async_trait;
use ideecatcher_domain::dispatch::{DispatchRequest, DispatchResult};
use ideecatcher_shared::{MessageResponse, event_log::error};
use thiserror::Error;

/// 送信エンドポイントのパス
pub const SEND_EMAIL_PATH: &str = "/api/send-email";

/// 1 回の送信を打ち切るまでの時間
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// ゲートウェイクライアントエラー
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DispatchClientError {
    /// ネットワークエラー
    #[error("ネットワークエラー: {0}")]
    Network(String),

    /// ゲートウェイが 2xx 以外を返した
    #[error("ゲートウェイが拒否しました（{status}）: {message}")]
    Rejected { status: u16, message: String },

    /// レスポンスボディを解釈できない
    #[error("レスポンスを解釈できません: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for DispatchClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            DispatchClientError::MalformedResponse(err.to_string())
        } else {
            // 接続失敗・タイムアウトを含む
            DispatchClientError::Network(err.to_string())
        }
    }
}

/// ゲートウェイクライアントトレイト
///
/// テスト時にスタブを使用できるようトレイトで定義。
#[async_trait]
pub trait DispatchClient: Send + Sync {
    /// 送信リクエストをゲートウェイに渡す
    ///
    /// 2xx ならゲートウェイのメッセージを返す。
    async fn send_email(
        &self,
        request: &DispatchRequest,
    ) -> Result<MessageResponse, DispatchClientError>;
}

/// ゲートウェイクライアント実装
pub struct DispatchClientImpl {
    base_url: String,
    client:   reqwest::Client,
    timeout:  Duration,
}

impl DispatchClientImpl {
    /// 新しい DispatchClient を作成する
    ///
    /// # 引数
    ///
    /// - `base_url`: ゲートウェイのベース URL（例: `http://localhost:3000`）
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client:   reqwest::Client::new(),
            timeout:  REQUEST_TIMEOUT,
        }
    }

    /// 応答待ちの上限を変える
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl DispatchClient for DispatchClientImpl {
    async fn send_email(
        &self,
        request: &DispatchRequest,
    ) -> Result<MessageResponse, DispatchClientError> {
        let url = format!("{}{SEND_EMAIL_PATH}", self.base_url);

        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .json(request)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            serde_json::from_str::<MessageResponse>(&body)
                .map_err(|e| DispatchClientError::MalformedResponse(e.to_string()))
        } else {
            // エラー時もゲートウェイは {message} を返すが、プロキシ等の素のテキストも許容する
            let message = serde_json::from_str::<MessageResponse>(&body)
                .map(|r| r.message)
                .unwrap_or(body);
            Err(DispatchClientError::Rejected {
                status: status.as_u16(),
                message,
            })
        }
    }
}

/// ゲートウェイを呼び出し、結果を [`DispatchResult`] にまとめる
///
/// クライアントのエラーはここでログに出して失敗の結果に変換する。
pub async fn dispatch_idea(
    client: &dyn DispatchClient,
    request: &DispatchRequest,
) -> DispatchResult {
    match client.send_email(request).await {
        Ok(response) => DispatchResult::success(response.message),
        Err(e) => {
            tracing::error!(
                error.category = error::category::EXTERNAL_SERVICE,
                error.kind = error::kind::SERVICE_COMMUNICATION,
                error = %e,
                "ゲートウェイへの送信に失敗しました"
            );
            DispatchResult::failure(e.to_string())
        }
    }
}
