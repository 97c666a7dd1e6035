//! 订单工作列表 - 手动录入与批量解析结果的载体

use std::collections::BTreeMap;

use crate::error::{AppResult, BusinessError};
use crate::models::network::NetworkKey;
use crate::models::order::{BulkOrderRequest, OrderEntry, DEFAULT_CAPACITY};
use crate::services::bulk_parser::{parse_capacity, ParseOutcome};
use crate::services::phone::{is_valid_ghanaian_mobile, normalize_phone};

/// 单行号码格式错误提示
pub const INVALID_FORMAT_MESSAGE: &str = "Invalid phone number format";

/// 当前编辑中的订单列表
///
/// - 列表永远至少有一条（可能是占位条目）
/// - 字段错误按条目下标记录，与批量解析的错误提示分开
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSheet {
    entries: Vec<OrderEntry>,
    field_errors: BTreeMap<usize, String>,
}

impl OrderSheet {
    pub fn new() -> Self {
        Self {
            entries: vec![OrderEntry::placeholder()],
            field_errors: BTreeMap::new(),
        }
    }

    pub fn entries(&self) -> &[OrderEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(OrderEntry::is_placeholder)
    }

    pub fn field_errors(&self) -> &BTreeMap<usize, String> {
        &self.field_errors
    }

    pub fn field_error(&self, index: usize) -> Option<&str> {
        self.field_errors.get(&index).map(String::as_str)
    }

    /// 追加一条空白条目
    pub fn add_entry(&mut self) {
        self.entries.push(OrderEntry::placeholder());
    }

    /// 删除条目，删空时补回占位条目
    pub fn remove_entry(&mut self, index: usize) -> AppResult<OrderEntry> {
        self.check_index(index)?;
        let removed = self.entries.remove(index);

        // 后面条目的错误下标前移
        self.field_errors = std::mem::take(&mut self.field_errors)
            .into_iter()
            .filter(|(i, _)| *i != index)
            .map(|(i, msg)| if i > index { (i - 1, msg) } else { (i, msg) })
            .collect();

        if self.entries.is_empty() {
            self.entries.push(OrderEntry::placeholder());
        }
        Ok(removed)
    }

    /// 修改号码：规范化后校验，无效时记录字段错误
    ///
    /// 清空输入框时号码置空，不报错
    pub fn set_recipient(&mut self, index: usize, raw: &str) -> AppResult<()> {
        self.check_index(index)?;

        let recipient = if raw.trim().is_empty() {
            String::new()
        } else {
            normalize_phone(raw)
        };

        if !recipient.is_empty() && !is_valid_ghanaian_mobile(&recipient) {
            self.field_errors
                .insert(index, INVALID_FORMAT_MESSAGE.to_string());
        } else {
            self.field_errors.remove(&index);
        }

        self.entries[index].recipient = recipient;
        Ok(())
    }

    /// 修改流量大小，无法解析时退回默认值
    pub fn set_capacity(&mut self, index: usize, raw: &str) -> AppResult<()> {
        self.check_index(index)?;
        self.entries[index].capacity = parse_capacity(raw).unwrap_or(DEFAULT_CAPACITY);
        Ok(())
    }

    /// 应用粘贴解析结果：无有效条目时重置为占位条目
    pub fn apply_paste(&mut self, outcome: &ParseOutcome) {
        self.replace(outcome.working_entries());
    }

    /// 应用 CSV 解析结果：无有效条目时保留原列表
    ///
    /// 返回是否替换了列表
    pub fn apply_csv(&mut self, outcome: &ParseOutcome) -> bool {
        if outcome.has_entries() {
            self.replace(outcome.entries.clone());
            true
        } else {
            false
        }
    }

    /// 提交成功后清空
    pub fn clear(&mut self) {
        self.replace(vec![OrderEntry::placeholder()]);
    }

    /// 号码无效的条目数（占位条目也算）
    pub fn invalid_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| !is_valid_ghanaian_mobile(&e.recipient))
            .count()
    }

    /// 构建批量下单请求
    pub fn to_request(&self, network_key: NetworkKey) -> BulkOrderRequest {
        BulkOrderRequest {
            orders: self
                .entries
                .iter()
                .map(|e| OrderEntry::new(normalize_phone(&e.recipient), e.capacity))
                .collect(),
            network_key,
        }
    }

    fn replace(&mut self, entries: Vec<OrderEntry>) {
        self.entries = entries;
        self.field_errors.clear();
    }

    fn check_index(&self, index: usize) -> AppResult<()> {
        if index >= self.entries.len() {
            return Err(BusinessError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            }
            .into());
        }
        Ok(())
    }
}

impl Default for OrderSheet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::services::bulk_parser::{parse_bulk_text, parse_csv};

    #[test]
    fn test_new_sheet_has_placeholder() {
        let sheet = OrderSheet::new();
        assert_eq!(sheet.entries(), &[OrderEntry::placeholder()]);
        assert!(sheet.is_empty());
        assert_eq!(sheet.invalid_count(), 1);
    }

    #[test]
    fn test_remove_last_entry_keeps_placeholder() {
        let mut sheet = OrderSheet::new();
        sheet.set_recipient(0, "0241234567").unwrap();
        let removed = sheet.remove_entry(0).unwrap();
        assert_eq!(removed.recipient, "0241234567");
        assert_eq!(sheet.entries(), &[OrderEntry::placeholder()]);
    }

    #[test]
    fn test_field_errors_keyed_by_index() {
        let mut sheet = OrderSheet::new();
        sheet.add_entry();
        sheet.add_entry();
        sheet.set_recipient(1, "12345").unwrap();
        sheet.set_recipient(2, "+233 55 123 4567").unwrap();

        assert_eq!(sheet.field_error(1), Some(INVALID_FORMAT_MESSAGE));
        assert_eq!(sheet.field_error(2), None);
        assert_eq!(sheet.entries()[2].recipient, "0551234567");

        sheet.set_recipient(1, "0241234567").unwrap();
        assert!(sheet.field_errors().is_empty());
    }

    #[test]
    fn test_remove_shifts_field_errors() {
        let mut sheet = OrderSheet::new();
        sheet.add_entry();
        sheet.add_entry();
        sheet.set_recipient(0, "bad").unwrap();
        sheet.set_recipient(2, "worse").unwrap();

        sheet.remove_entry(0).unwrap();
        assert_eq!(sheet.field_error(0), None);
        assert_eq!(sheet.field_error(1), Some(INVALID_FORMAT_MESSAGE));
    }

    #[test]
    fn test_clearing_recipient_is_not_an_error() {
        let mut sheet = OrderSheet::new();
        sheet.set_recipient(0, "bad").unwrap();
        sheet.set_recipient(0, "  ").unwrap();
        assert_eq!(sheet.entries()[0].recipient, "");
        assert_eq!(sheet.field_error(0), None);
    }

    #[test]
    fn test_capacity_falls_back_to_default() {
        let mut sheet = OrderSheet::new();
        sheet.set_capacity(0, "10").unwrap();
        assert_eq!(sheet.entries()[0].capacity, 10.0);
        sheet.set_capacity(0, "lots").unwrap();
        assert_eq!(sheet.entries()[0].capacity, DEFAULT_CAPACITY);
    }

    #[test]
    fn test_out_of_range_index() {
        let mut sheet = OrderSheet::new();
        let err = sheet.set_recipient(3, "0241234567").unwrap_err();
        assert!(matches!(
            err,
            AppError::Business(BusinessError::IndexOutOfRange { index: 3, len: 1 })
        ));
    }

    #[test]
    fn test_apply_paste_and_csv() {
        let mut sheet = OrderSheet::new();
        sheet.apply_paste(&parse_bulk_text("0241234567, 5\n0551234567 10"));
        assert_eq!(sheet.len(), 2);

        assert!(!sheet.apply_csv(&parse_csv("recipient,capacity\nnope,5")));
        assert_eq!(sheet.len(), 2);

        sheet.apply_paste(&parse_bulk_text("nothing here"));
        assert_eq!(sheet.entries(), &[OrderEntry::placeholder()]);
    }

    #[test]
    fn test_to_request() {
        let mut sheet = OrderSheet::new();
        sheet.apply_paste(&parse_bulk_text("233241234567, 5"));
        let request = sheet.to_request(NetworkKey::Telecel);
        assert_eq!(request.orders, vec![OrderEntry::new("0241234567", 5.0)]);
        assert_eq!(request.network_key, NetworkKey::Telecel);
        assert_eq!(sheet.invalid_count(), 0);
    }
}
