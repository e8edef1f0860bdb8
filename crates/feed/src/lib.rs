//! # `chenhui-feed` - 行情数据适配层
//!
//! 本 crate 实现 `chenhui-core` 的 `MarketDataProvider` 端口，
//! 对接万得终端旁挂的 HTTP 网关（wss / wsee 两类查询）。
//! 终端会话与授权是外部前置条件，不在本层管理。

pub mod wind;
