//! # CORS ミドルウェア
//!
//! ブラウザ上のコンポーザーから別オリジンで呼ばれるため、すべてのレスポンスに
//! 同一の CORS ヘッダーを付与する。
//!
//! 処理は 2 段:
//!
//! 1. プリフライト（`OPTIONS`）は他のどのチェックよりも先に 200・空ボディで返す
//! 2. それ以外はハンドラを実行し、成功・失敗を問わずレスポンスにヘッダーを付与する

use axum::{
    body::Body,
    extract::Request,
    http::{HeaderMap, HeaderValue, Method, StatusCode, header},
    middleware::Next,
    response::Response,
};

/// 許可するメソッド
pub const ALLOWED_METHODS: &str = "POST, OPTIONS";

/// 許可するリクエストヘッダー
pub const ALLOWED_HEADERS: &str = "X-CSRF-Token, X-Requested-With, Accept, Accept-Version, \
                                   Content-Length, Content-MD5, Content-Type, Date, X-Api-Version";

/// プリフライトの短絡と CORS ヘッダーの付与
pub async fn cors(request: Request, next: Next) -> Response {
    let mut response = if request.method() == Method::OPTIONS {
        tracing::debug!(uri = %request.uri(), "プリフライトリクエストに応答");
        preflight_response()
    } else {
        next.run(request).await
    };

    apply_cors_headers(response.headers_mut());
    response
}

fn preflight_response() -> Response {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = StatusCode::OK;
    response
}

fn apply_cors_headers(headers: &mut HeaderMap) {
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
        HeaderValue::from_static("true"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOWED_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOWED_HEADERS),
    );
}

#[cfg(test)]
mod tests {
    use axum::{Router, middleware::from_fn, routing::post};
    use tower::ServiceExt;

    use super::*;

    fn test_app() -> Router {
        Router::new()
            .route(
                "/echo",
                post(|| async { (StatusCode::IM_A_TEAPOT, "handler") }),
            )
            .layer(from_fn(cors))
    }

    fn request(method: Method) -> Request {
        axum::http::Request::builder()
            .method(method)
            .uri("/echo")
            .body(Body::from(r#"{"recipient":"a@example.com"}"#))
            .unwrap()
    }

    #[test]
    fn test_許可ヘッダーの一覧() {
        assert_eq!(
            ALLOWED_HEADERS,
            "X-CSRF-Token, X-Requested-With, Accept, Accept-Version, Content-Length, \
             Content-MD5, Content-Type, Date, X-Api-Version"
        );
    }

    #[tokio::test]
    async fn test_プリフライトはハンドラを呼ばずに200を返す() {
        let response = test_app().oneshot(request(Method::OPTIONS)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn test_ハンドラのレスポンスにもヘッダーが付与される() {
        let response = test_app().oneshot(request(Method::POST)).await.unwrap();

        assert_eq!(response.status(), StatusCode::IM_A_TEAPOT);
        let headers = response.headers();
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "POST, OPTIONS");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], ALLOWED_HEADERS);
    }
}
