//! # Bulk Order
//!
//! 加纳流量套餐（MTN / Telecel / AirtelTigo）批量下单工具
//!
//! ## 架构设计
//!
//! ### ① 数据层（Models）
//! - `models/` - 订单、网络目录、批量结果的数据结构，以及文件加载
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 纯同步能力，不做 I/O（导出除外）
//! - `phone` - 号码规范化与校验
//! - `bulk_parser` - 粘贴文本 / CSV 解析
//! - `order_sheet` - 工作列表的手动编辑
//! - `pricing` - 按套餐目录计价
//! - `export` - CSV 模板与结果导出
//!
//! ### ③ 客户端层（Clients）
//! - `clients/` - 订单 API 调用，会话显式传入
//!
//! ### ④ 流程层（Workflow）
//! - `workflow/` - 读取 → 解析 → 选网络 → 校验 → 提交 → 导出
//!
//! ## 模块结构

pub mod app;
pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use app::App;
pub use clients::{OrderApiClient, Session};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{BulkOrderRequest, BulkOrderResponse, Network, NetworkKey, OrderEntry};
pub use services::{
    calculate_total_cost, is_valid_ghanaian_mobile, normalize_phone, parse_bulk_text, parse_csv,
    OrderSheet, ParseOutcome,
};
pub use workflow::{BulkOrderFlow, FlowOutcome, FlowReport};
