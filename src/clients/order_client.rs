/// 订单 API 客户端
///
/// 封装网络目录查询和批量下单两个接口
use crate::clients::session::Session;
use crate::config::Config;
use crate::error::{ApiError, AppError, AppResult};
use crate::models::bulk_result::BulkOrderResponse;
use crate::models::network::{Network, NetworkCatalog};
use crate::models::order::BulkOrderRequest;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

const NETWORKS_ENDPOINT: &str = "api/orders/networks";
const PLACE_BULK_ENDPOINT: &str = "api/orders/place-bulk";

/// 订单 API 客户端
pub struct OrderApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl OrderApiClient {
    /// 根据配置创建客户端
    pub fn new(config: &Config) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AppError::api_request_failed("client", e))?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// 获取全部网络及套餐
    pub async fn fetch_networks(&self, session: &Session) -> AppResult<Vec<Network>> {
        let url = self.endpoint(NETWORKS_ENDPOINT);
        debug!("GET {}", url);

        let response = session
            .authorize(self.http.get(&url))
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(NETWORKS_ENDPOINT, e))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(unauthorized(NETWORKS_ENDPOINT));
        }
        if !status.is_success() {
            return Err(ApiError::BadResponse {
                endpoint: NETWORKS_ENDPOINT.to_string(),
                code: Some(status.as_u16()),
                message: Some("Failed to fetch bundle prices".to_string()),
            }
            .into());
        }

        let catalog: NetworkCatalog = decode(response, NETWORKS_ENDPOINT).await?;
        match catalog.data {
            Some(networks) if catalog.success => {
                debug!("获取到 {} 个网络", networks.len());
                Ok(networks)
            }
            _ => Err(ApiError::BadResponse {
                endpoint: NETWORKS_ENDPOINT.to_string(),
                code: Some(status.as_u16()),
                message: catalog
                    .message
                    .or_else(|| Some("Invalid response from server".to_string())),
            }
            .into()),
        }
    }

    /// 提交批量订单
    ///
    /// 单次请求，不重试；服务端返回 `success: false` 时作为结果返回而不是错误
    pub async fn place_bulk(
        &self,
        session: &Session,
        request: &BulkOrderRequest,
    ) -> AppResult<BulkOrderResponse> {
        let url = self.endpoint(PLACE_BULK_ENDPOINT);
        debug!(
            "POST {} ({} 条订单, 网络 {})",
            url,
            request.orders.len(),
            request.network_key
        );

        let response = session
            .authorize(self.http.post(&url))
            .json(request)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(PLACE_BULK_ENDPOINT, e))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(unauthorized(PLACE_BULK_ENDPOINT));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AppError::api_request_failed(PLACE_BULK_ENDPOINT, e))?;

        if status == StatusCode::FORBIDDEN {
            let message = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
                .unwrap_or_else(|| "Account access restricted".to_string());
            return Err(ApiError::Forbidden {
                endpoint: PLACE_BULK_ENDPOINT.to_string(),
                message,
            }
            .into());
        }

        match serde_json::from_str::<BulkOrderResponse>(&body) {
            Ok(parsed) => Ok(parsed),
            Err(_) if !status.is_success() => Err(ApiError::BadResponse {
                endpoint: PLACE_BULK_ENDPOINT.to_string(),
                code: Some(status.as_u16()),
                message: Some(body),
            }
            .into()),
            Err(e) => Err(ApiError::JsonParseFailed {
                endpoint: PLACE_BULK_ENDPOINT.to_string(),
                source: e,
            }
            .into()),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

fn unauthorized(endpoint: &str) -> AppError {
    ApiError::Unauthorized {
        endpoint: endpoint.to_string(),
    }
    .into()
}

async fn decode<T: DeserializeOwned>(response: Response, endpoint: &str) -> AppResult<T> {
    let body = response
        .text()
        .await
        .map_err(|e| AppError::api_request_failed(endpoint, e))?;
    serde_json::from_str(&body).map_err(|e| {
        AppError::from(ApiError::JsonParseFailed {
            endpoint: endpoint.to_string(),
            source: e,
        })
    })
}
