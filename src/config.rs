use crate::error::ConfigError;
use crate::services::bulk_parser::InputFormat;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 订单 API 地址
    pub api_base_url: String,
    /// 登录令牌
    pub auth_token: String,
    /// 下单网络，为空时使用目录中的第一个网络
    pub network_key: Option<String>,
    /// 待解析的订单文件
    pub input_file: String,
    /// 输入格式
    pub input_format: InputFormat,
    /// 离线套餐目录（TOML），设置后不再请求网络目录
    pub catalog_file: Option<String>,
    /// 只解析和试算，不提交
    pub dry_run: bool,
    /// 单次批量上限
    pub max_recipients: usize,
    /// 结果 CSV 输出目录
    pub results_dir: String,
    /// 是否写出 CSV 模板
    pub write_template: bool,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 请求超时（秒）
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "https://serverdatahub.onrender.com".to_string(),
            auth_token: String::new(),
            network_key: None,
            input_file: "bulk_orders.txt".to_string(),
            input_format: InputFormat::Auto,
            catalog_file: None,
            dry_run: false,
            max_recipients: 50,
            results_dir: ".".to_string(),
            write_template: false,
            verbose_logging: false,
            request_timeout_secs: 30,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源读取配置，无法解析的值使用默认值
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let default = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            api_base_url: lookup("ORDER_API_BASE_URL").unwrap_or(default.api_base_url),
            auth_token: lookup("AUTH_TOKEN").unwrap_or(default.auth_token),
            network_key: non_empty("NETWORK_KEY"),
            input_file: lookup("INPUT_FILE").unwrap_or(default.input_file),
            input_format: lookup("INPUT_FORMAT").and_then(|v| v.parse().ok()).unwrap_or(default.input_format),
            catalog_file: non_empty("CATALOG_FILE"),
            dry_run: lookup("DRY_RUN").and_then(|v| v.parse().ok()).unwrap_or(default.dry_run),
            max_recipients: lookup("MAX_RECIPIENTS").and_then(|v| v.parse().ok()).unwrap_or(default.max_recipients),
            results_dir: lookup("RESULTS_DIR").unwrap_or(default.results_dir),
            write_template: lookup("WRITE_TEMPLATE").and_then(|v| v.parse().ok()).unwrap_or(default.write_template),
            verbose_logging: lookup("VERBOSE_LOGGING").and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            request_timeout_secs: lookup("REQUEST_TIMEOUT_SECS").and_then(|v| v.parse().ok()).unwrap_or(default.request_timeout_secs),
        }
    }

    /// 校验配置：请求网络目录或提交订单都需要登录令牌
    pub fn validate(&self) -> Result<(), ConfigError> {
        let needs_api = self.catalog_file.is_none() || !self.dry_run;
        if needs_api && self.auth_token.trim().is_empty() {
            return Err(ConfigError::MissingToken);
        }
        if self.max_recipients == 0 {
            return Err(ConfigError::EnvVarParseFailed {
                var_name: "MAX_RECIPIENTS".to_string(),
                value: "0".to_string(),
                expected_type: "正整数".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.max_recipients, 50);
        assert_eq!(config.input_format, InputFormat::Auto);
        assert!(config.network_key.is_none());
        assert!(!config.dry_run);
    }

    #[test]
    fn test_overrides_and_fallbacks() {
        let config = config_from(&[
            ("AUTH_TOKEN", "abc"),
            ("NETWORK_KEY", "TELECEL"),
            ("INPUT_FORMAT", "csv"),
            ("DRY_RUN", "true"),
            ("MAX_RECIPIENTS", "many"),
            ("CATALOG_FILE", "  "),
        ]);
        assert_eq!(config.auth_token, "abc");
        assert_eq!(config.network_key.as_deref(), Some("TELECEL"));
        assert_eq!(config.input_format, InputFormat::Csv);
        assert!(config.dry_run);
        assert_eq!(config.max_recipients, 50);
        assert!(config.catalog_file.is_none());
    }

    #[test]
    fn test_validate_requires_token() {
        assert_eq!(config_from(&[]).validate(), Err(ConfigError::MissingToken));
        assert!(config_from(&[("AUTH_TOKEN", "abc")]).validate().is_ok());
        // 离线试算不需要令牌
        assert!(config_from(&[("CATALOG_FILE", "catalog.toml"), ("DRY_RUN", "true")])
            .validate()
            .is_ok());
    }
}
