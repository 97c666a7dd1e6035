//! 价格计算

use crate::models::network::{Bundle, Network, NetworkKey};
use crate::models::order::OrderEntry;

/// 按网络 key 查找
pub fn find_network<'a>(networks: &'a [Network], key: &NetworkKey) -> Option<&'a Network> {
    networks.iter().find(|n| &n.network_key == key)
}

/// 查找与流量大小完全相等的套餐
pub fn find_bundle(network: &Network, capacity: f64) -> Option<&Bundle> {
    network.bundles.iter().find(|b| b.capacity == capacity)
}

/// 计算订单总价
///
/// 目录中找不到对应套餐的条目按 0 计；未选择网络时总价为 0
pub fn calculate_total_cost(entries: &[OrderEntry], network: Option<&Network>) -> f64 {
    let Some(network) = network else {
        return 0.0;
    };

    entries.iter().fold(0.0, |total, entry| {
        total + find_bundle(network, entry.capacity).map_or(0.0, |b| b.price)
    })
}

/// 找不到套餐的条目
pub fn unpriced_entries<'a>(entries: &'a [OrderEntry], network: &Network) -> Vec<&'a OrderEntry> {
    entries
        .iter()
        .filter(|e| !e.is_placeholder() && find_bundle(network, e.capacity).is_none())
        .collect()
}

/// 可购买的套餐，按流量从小到大
pub fn active_bundles(network: &Network) -> Vec<&Bundle> {
    let mut bundles: Vec<&Bundle> = network.bundles.iter().filter(|b| b.is_active).collect();
    bundles.sort_by(|a, b| a.capacity.total_cmp(&b.capacity));
    bundles
}
