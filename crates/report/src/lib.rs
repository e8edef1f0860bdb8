//! # `chenhui-report` - 晨会周报装配层
//!
//! 本 crate 把行情端口取回的涨跌幅表加工成固定模板的段落序列：
//! 符号化涨跌描述、行业与概念榜单、分组个股叙述，以及
//! `MorningTalkWeekly` 这个一次性的线性生成管线。

pub mod builder;
pub mod describe;
