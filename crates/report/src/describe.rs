use chenhui_core::config::{ConfigError, NamedInstrument, StockGroup};
use chenhui_core::market::entity::PctChangeTable;
use chenhui_core::report::entity::MoverRow;

// 行业榜单的固定深度
const SECTOR_TOP_N: usize = 5;

/// # Summary
/// 把小数涨跌幅映射为带符号的中文描述。
///
/// # Logic
/// 1. 正值渲染为 `涨X.XX%`，负值取绝对值渲染为 `跌X.XX%`。
/// 2. 恰好为 0 渲染为 `平收`，绝不归入涨跌任何一侧。
///
/// # Arguments
/// * `value`: 小数涨跌幅。
///
/// # Returns
/// 返回两位小数百分比精度的描述串。
pub fn sign_label(value: f64) -> String {
    if value > 0.0 {
        format!("涨{:.2}%", value * 100.0)
    } else if value < 0.0 {
        format!("跌{:.2}%", value.abs() * 100.0)
    } else {
        "平收".to_string()
    }
}

/// # Summary
/// 按配置顺序把涨跌幅表富化为派生行。
///
/// # Logic
/// 1. 逐个标的在表中查值，缺失立即报 CodeNotInTable。
/// 2. 生成展示名称与符号化描述。
///
/// # Arguments
/// * `table`: 涨跌幅表。
/// * `instruments`: 配置顺序的标的列表。
///
/// # Returns
/// 成功返回与配置同序的派生行集合。
pub fn derive_rows(
    table: &PctChangeTable,
    instruments: &[NamedInstrument],
) -> Result<Vec<MoverRow>, ConfigError> {
    instruments
        .iter()
        .map(|item| {
            let change = table
                .change_of(&item.code)
                .ok_or_else(|| ConfigError::CodeNotInTable(item.code.clone()))?;
            Ok(MoverRow {
                code: item.code.clone(),
                name: item.name.clone(),
                change,
                label: sign_label(change),
            })
        })
        .collect()
}

/// # Summary
/// 选出两个方向的榜单行。
///
/// # Logic
/// 1. 上涨侧取正值中最高的 n 个，按涨幅非递增排列。
/// 2. 下跌侧取负值中最深的 n 个，呈现时距零最近者在前
///    （幅度非递减）。
/// 3. 同值行保持配置中的相对顺序，与哈希迭代无关。
///
/// # Arguments
/// * `rows`: 派生行集合。
/// * `n`: 每侧的最大条数。
///
/// # Returns
/// 返回 (上涨榜, 下跌榜) 两个借用切片向量。
pub fn select_movers(rows: &[MoverRow], n: usize) -> (Vec<&MoverRow>, Vec<&MoverRow>) {
    let mut sorted: Vec<&MoverRow> = rows.iter().collect();
    sorted.sort_by(|a, b| b.change.total_cmp(&a.change));

    let ups: Vec<&MoverRow> = sorted
        .iter()
        .filter(|row| row.change > 0.0)
        .take(n)
        .copied()
        .collect();

    let mut downs: Vec<&MoverRow> = sorted
        .iter()
        .rev()
        .filter(|row| row.change < 0.0)
        .take(n)
        .copied()
        .collect();
    // rev 之后为最深跌幅在前，呈现约定是距零最近者在前
    downs.reverse();

    (ups, downs)
}

/// 把一侧榜单渲染为 `名称+描述` 的顿号串
fn enumerate_side(rows: &[&MoverRow]) -> String {
    rows.iter()
        .map(|row| format!("{}{}", row.name, row.label))
        .collect::<Vec<_>>()
        .join("，")
}

/// # Summary
/// 生成申万行业的涨跌榜单句对。
///
/// # Logic
/// 1. 每侧取前 5，名称加描述顿号相连。
/// 2. 侧内不足 5 个时句首显式说明实际个数。
/// 3. 某侧为空时替换为固定的"没有行业上涨/下跌"句。
///
/// # Arguments
/// * `rows`: 行业派生行集合。
///
/// # Returns
/// 返回上涨句与下跌句以空格相接的完整描述。
pub fn describe_sectors(rows: &[MoverRow]) -> String {
    let (ups, downs) = select_movers(rows, SECTOR_TOP_N);

    let up_text = if ups.is_empty() {
        "没有行业上涨。".to_string()
    } else if ups.len() < SECTOR_TOP_N {
        format!("仅{}个行业上涨，{}。", ups.len(), enumerate_side(&ups))
    } else {
        format!("上涨前{}位的行业分别是{}。", SECTOR_TOP_N, enumerate_side(&ups))
    };

    let down_text = if downs.is_empty() {
        "没有行业下跌。".to_string()
    } else if downs.len() < SECTOR_TOP_N {
        format!("仅{}个行业下跌，{}。", downs.len(), enumerate_side(&downs))
    } else {
        format!(
            "下跌前{}位的行业分别是{}。",
            SECTOR_TOP_N,
            enumerate_side(&downs)
        )
    };

    format!("{} {}", up_text, down_text)
}

/// # Summary
/// 生成 wind 热门概念的涨跌榜单句对。
///
/// # Logic
/// 1. 每侧取前 top_n，措辞用"概念"而非"行业"。
/// 2. 某侧为空时用"全部下跌/全部上涨"句式，与行业描述的
///    空侧措辞刻意保持不同。
/// 3. 两句之间用段内软换行衔接。
///
/// # Arguments
/// * `rows`: 概念指数派生行集合。
/// * `top_n`: 每侧的最大条数。
///
/// # Returns
/// 返回以 `wind热门概念` 开头的完整描述。
pub fn describe_wind_indices(rows: &[MoverRow], top_n: usize) -> String {
    let (ups, downs) = select_movers(rows, top_n);

    let up_text = if ups.is_empty() {
        "全部下跌。".to_string()
    } else if ups.len() < top_n {
        format!("仅{}个概念上涨，{}。", ups.len(), enumerate_side(&ups))
    } else {
        format!("上涨前{}位的概念分别是{}。", top_n, enumerate_side(&ups))
    };

    let down_text = if downs.is_empty() {
        "全部上涨。".to_string()
    } else if downs.len() < top_n {
        format!("仅{}个概念下跌，{}。", downs.len(), enumerate_side(&downs))
    } else {
        format!("下跌前{}位的概念分别是{}。", top_n, enumerate_side(&downs))
    };

    format!("wind热门概念{}\n   {}", up_text, down_text)
}

/// # Summary
/// 生成分组个股叙述（港股、美股子板块通用）。
///
/// # Logic
/// 1. 分组顺序严格取配置顺序，组内按涨跌幅非递增排列。
/// 2. 每组渲染为 `组名：名称+描述，…`。
/// 3. 组间以 `；` 加段内软换行衔接，整体以 `。` 收尾。
///
/// # Arguments
/// * `groups`: 配置顺序的个股分组。
/// * `table`: 覆盖全部成分股的涨跌幅表。
///
/// # Returns
/// 成功返回完整的分组描述，表缺代码时返回 ConfigError。
pub fn describe_groups(
    groups: &[StockGroup],
    table: &PctChangeTable,
) -> Result<String, ConfigError> {
    let mut parts = Vec::with_capacity(groups.len());

    for group in groups {
        let mut rows = derive_rows(table, &group.stocks)?;
        rows.sort_by(|a, b| b.change.total_cmp(&a.change));

        let listed = rows
            .iter()
            .map(|row| format!("{}{}", row.name, row.label))
            .collect::<Vec<_>>()
            .join("，");
        parts.push(format!("{}：{}", group.name, listed));
    }

    Ok(format!("{}。", parts.join("；\n   ")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, change: f64) -> MoverRow {
        MoverRow {
            code: format!("{}.TEST", name),
            name: name.to_string(),
            change,
            label: sign_label(change),
        }
    }

    #[test]
    fn test_sign_label_three_way() {
        assert_eq!(sign_label(0.0231), "涨2.31%");
        assert_eq!(sign_label(-0.0105), "跌1.05%");
        assert_eq!(sign_label(0.0), "平收");
    }

    #[test]
    fn test_sign_label_rounding() {
        assert_eq!(sign_label(0.12345), "涨12.35%");
        assert_eq!(sign_label(-0.000049), "跌0.00%");
    }

    #[test]
    fn test_derive_rows_follows_config_order() {
        let mut table = PctChangeTable::new("t");
        table.insert("000001.SH", 0.0231);
        table.insert("399001.SZ", -0.0105);
        let instruments = vec![
            NamedInstrument {
                name: "上证指数".to_string(),
                code: "000001.SH".to_string(),
            },
            NamedInstrument {
                name: "深证成指".to_string(),
                code: "399001.SZ".to_string(),
            },
        ];

        let rows = derive_rows(&table, &instruments).unwrap();
        assert_eq!(rows[0].label, "涨2.31%");
        assert_eq!(rows[1].label, "跌1.05%");
    }

    #[test]
    fn test_derive_rows_missing_code() {
        let table = PctChangeTable::new("t");
        let instruments = vec![NamedInstrument {
            name: "上证指数".to_string(),
            code: "000001.SH".to_string(),
        }];
        assert!(matches!(
            derive_rows(&table, &instruments),
            Err(ConfigError::CodeNotInTable(_))
        ));
    }

    #[test]
    fn test_select_movers_ordering_and_bounds() {
        let rows = vec![
            row("a", 0.01),
            row("b", 0.07),
            row("c", -0.02),
            row("d", 0.03),
            row("e", -0.06),
            row("f", -0.04),
            row("g", 0.0),
        ];
        let (ups, downs) = select_movers(&rows, 2);

        // 上涨榜非递增，且不超过 n
        let up_names: Vec<&str> = ups.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(up_names, vec!["b", "d"]);

        // 下跌榜取最深两个，距零最近者在前（幅度非递减）
        let down_names: Vec<&str> = downs.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(down_names, vec!["f", "e"]);

        // 平收既不上涨也不下跌
        assert!(ups.iter().all(|r| r.change > 0.0));
        assert!(downs.iter().all(|r| r.change < 0.0));
    }

    #[test]
    fn test_describe_sectors_full_sides() {
        let rows = vec![
            row("电子", 0.05),
            row("通信", 0.04),
            row("汽车", 0.03),
            row("银行", 0.02),
            row("煤炭", 0.01),
            row("传媒", 0.009),
            row("钢铁", -0.01),
            row("环保", -0.02),
            row("综合", -0.03),
            row("地产", -0.04),
            row("医药", -0.05),
            row("军工", -0.06),
        ];
        let text = describe_sectors(&rows);
        assert!(text.starts_with("上涨前5位的行业分别是电子涨5.00%，通信涨4.00%"));
        assert!(text.contains("。 下跌前5位的行业分别是钢铁跌1.00%，环保跌2.00%"));
        assert!(text.ends_with("。"));
    }

    #[test]
    fn test_describe_sectors_partial_up_side() {
        // 仅 3 个行业上涨，句首必须显式说明个数
        let rows = vec![
            row("电子", 0.05),
            row("通信", 0.04),
            row("汽车", 0.03),
            row("钢铁", -0.01),
            row("环保", -0.02),
            row("综合", -0.03),
            row("地产", -0.04),
            row("医药", -0.05),
            row("军工", -0.06),
        ];
        let text = describe_sectors(&rows);
        assert!(text.starts_with("仅3个行业上涨，电子涨5.00%，通信涨4.00%，汽车涨3.00%。"));
    }

    #[test]
    fn test_describe_sectors_empty_sides() {
        let all_up = vec![row("电子", 0.05)];
        assert!(describe_sectors(&all_up).ends_with("没有行业下跌。"));

        let all_down = vec![row("钢铁", -0.01)];
        assert!(describe_sectors(&all_down).starts_with("没有行业上涨。"));
    }

    #[test]
    fn test_describe_wind_indices_all_negative() {
        // 概念全线下跌时上涨侧用"全部下跌"句式
        let rows = vec![row("茅指数", -0.02), row("宁组合", -0.03)];
        let text = describe_wind_indices(&rows, 15);
        assert!(text.starts_with("wind热门概念全部下跌。"));
        assert!(text.contains("\n   仅2个概念下跌，宁组合跌3.00%，茅指数跌2.00%。"));
    }

    #[test]
    fn test_describe_wind_indices_all_positive() {
        let rows = vec![row("茅指数", 0.02)];
        let text = describe_wind_indices(&rows, 15);
        assert!(text.contains("仅1个概念上涨，茅指数涨2.00%。"));
        assert!(text.ends_with("全部上涨。"));
    }

    #[test]
    fn test_describe_groups_config_order_and_inner_sort() {
        let mut table = PctChangeTable::new("t");
        table.insert("0700.HK", -0.012);
        table.insert("3690.HK", 0.034);
        table.insert("2269.HK", 0.0);

        let groups = vec![
            StockGroup {
                name: "港股科技股".to_string(),
                stocks: vec![
                    NamedInstrument {
                        name: "腾讯控股".to_string(),
                        code: "0700.HK".to_string(),
                    },
                    NamedInstrument {
                        name: "美团".to_string(),
                        code: "3690.HK".to_string(),
                    },
                ],
            },
            StockGroup {
                name: "港股医药股".to_string(),
                stocks: vec![NamedInstrument {
                    name: "药明生物".to_string(),
                    code: "2269.HK".to_string(),
                }],
            },
        ];

        let text = describe_groups(&groups, &table).unwrap();
        // 组顺序取配置顺序，组内按涨跌幅降序
        assert_eq!(
            text,
            "港股科技股：美团涨3.40%，腾讯控股跌1.20%；\n   港股医药股：药明生物平收。"
        );
    }

    #[test]
    fn test_describe_groups_missing_code() {
        let table = PctChangeTable::new("t");
        let groups = vec![StockGroup {
            name: "港股科技股".to_string(),
            stocks: vec![NamedInstrument {
                name: "腾讯控股".to_string(),
                code: "0700.HK".to_string(),
            }],
        }];
        assert!(matches!(
            describe_groups(&groups, &table),
            Err(ConfigError::CodeNotInTable(_))
        ));
    }
}
