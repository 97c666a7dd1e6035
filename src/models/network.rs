use serde::{Deserialize, Serialize};

/// 运营商网络标识
///
/// API 中 MTN 使用 `YELLO` 作为 networkKey
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NetworkKey {
    /// MTN
    Yello,
    /// Telecel
    Telecel,
    /// AirtelTigo
    AirtelTigo,
    /// API 返回的其他网络
    Other(String),
}

impl NetworkKey {
    /// 获取 API 使用的 key
    pub fn as_str(&self) -> &str {
        match self {
            NetworkKey::Yello => "YELLO",
            NetworkKey::Telecel => "TELECEL",
            NetworkKey::AirtelTigo => "AT_PREMIUM",
            NetworkKey::Other(key) => key,
        }
    }

    /// 获取显示名称
    pub fn label(&self) -> &str {
        match self {
            NetworkKey::Yello => "MTN",
            NetworkKey::Telecel => "Telecel",
            NetworkKey::AirtelTigo => "AirtelTigo",
            NetworkKey::Other(key) => key,
        }
    }

    /// 从用户输入解析网络（支持 key 和常用名称，不区分大小写）
    pub fn find(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "YELLO" | "MTN" => NetworkKey::Yello,
            "TELECEL" | "VODAFONE" => NetworkKey::Telecel,
            "AT_PREMIUM" | "AIRTELTIGO" | "AT" => NetworkKey::AirtelTigo,
            _ => NetworkKey::Other(s.trim().to_string()),
        }
    }
}

impl From<String> for NetworkKey {
    fn from(value: String) -> Self {
        match value.as_str() {
            "YELLO" => NetworkKey::Yello,
            "TELECEL" => NetworkKey::Telecel,
            "AT_PREMIUM" => NetworkKey::AirtelTigo,
            _ => NetworkKey::Other(value),
        }
    }
}

impl From<NetworkKey> for String {
    fn from(value: NetworkKey) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for NetworkKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 流量套餐
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bundle {
    #[serde(deserialize_with = "deserialize_number")]
    pub capacity: f64,
    #[serde(deserialize_with = "deserialize_number")]
    pub price: f64,
    #[serde(default = "default_active", alias = "is_active")]
    pub is_active: bool,
}

impl Bundle {
    pub fn new(capacity: f64, price: f64) -> Self {
        Self {
            capacity,
            price,
            is_active: true,
        }
    }
}

/// 网络及其套餐目录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Network {
    #[serde(alias = "network_key")]
    pub network_key: NetworkKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default = "default_active", alias = "is_active")]
    pub is_active: bool,
    #[serde(default)]
    pub bundles: Vec<Bundle>,
}

impl Network {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or_else(|| self.network_key.label())
    }
}

/// `GET /api/orders/networks` 的响应
#[derive(Debug, Clone, Deserialize)]
pub struct NetworkCatalog {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<Vec<Network>>,
    #[serde(default)]
    pub message: Option<String>,
}

fn default_active() -> bool {
    true
}

// API 有时把数字序列化为字符串
pub(crate) fn deserialize_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Visitor;
    use std::fmt;

    struct NumberVisitor;

    impl<'de> Visitor<'de> for NumberVisitor {
        type Value = f64;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a number or a numeric string")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            value
                .trim()
                .parse::<f64>()
                .map_err(|_| E::custom(format!("invalid number: {}", value)))
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value as f64)
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value as f64)
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value)
        }
    }

    deserializer.deserialize_any(NumberVisitor)
}
