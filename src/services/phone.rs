//! 加纳手机号规范化与校验

use phf::phf_set;

/// 允许的运营商号段（去掉前导 0 后的前两位）
static NETWORK_PREFIXES: phf::Set<&'static str> = phf_set! {
    "20", "23", "24", "25", "26", "27", "28", "29", "30", "31", "32",
    "50", "53", "54", "55", "56", "57", "58", "59",
};

/// 规范化手机号为本地格式（以 0 开头）
///
/// 只调整形状，不做校验：
/// - 去掉空白和连字符
/// - `+233` / `233` 前缀替换为 `0`
/// - 其余不以 `0` 开头的补一个 `0`
pub fn normalize_phone(raw: &str) -> String {
    let phone: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();

    if let Some(rest) = phone.strip_prefix("+233") {
        format!("0{}", rest)
    } else if let Some(rest) = phone.strip_prefix("233") {
        format!("0{}", rest)
    } else if !phone.starts_with('0') {
        format!("0{}", phone)
    } else {
        phone
    }
}

/// 校验规范化后的号码：`0` + 允许号段 + 7 位数字，共 10 位
pub fn is_valid_ghanaian_mobile(phone: &str) -> bool {
    phone.len() == 10
        && phone.bytes().all(|b| b.is_ascii_digit())
        && phone.starts_with('0')
        && NETWORK_PREFIXES.contains(&phone[1..3])
}
