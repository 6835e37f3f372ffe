//! 样式表生成模块：
//! - 使用内置 Tera 模板渲染 LESS
//! - 每个图标一条规则，background-position 为单元格原点的相反数

use anyhow::{anyhow, Context, Result};
use indexmap::IndexMap;
use serde::Serialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tera::{Context as TContext, Tera};

use crate::loader::{IconRecord, TileDimensions};

/// 样式表文件名
pub(crate) const STYLESHEET_FILE_NAME: &str = "sprites-pro.less";

const TEMPLATE_NAME: &str = "sprites-pro.less";
const TEMPLATE: &str = include_str!("assets/sprites-pro.less.tera");

/// 类名对齐宽度
const CLASS_WIDTH: usize = 26;

#[derive(Debug, Serialize)]
struct IconRule {
    class: String,
    x: i64,
    y: i64,
}

/// 渲染样式表；图标必须已经过合成（带有 `grid_location`）
pub(crate) fn render_stylesheet(
    icons: &IndexMap<String, IconRecord>,
    tile: TileDimensions,
) -> Result<String> {
    let rules = icons
        .values()
        .map(|icon| {
            let (x, y) = icon
                .grid_location
                .ok_or_else(|| anyhow!("图标 '{}' 尚未分配网格位置", icon.name))?;
            Ok(IconRule {
                class: format!("{:<width$}", icon.name, width = CLASS_WIDTH),
                x: -i64::from(x),
                y: -i64::from(y),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let mut tera = Tera::default();
    tera.add_raw_template(TEMPLATE_NAME, TEMPLATE)
        .context("解析样式表模板失败")?;
    let mut ctx = TContext::new();
    ctx.insert("max_width", &tile.max_width);
    ctx.insert("max_height", &tile.max_height);
    ctx.insert("icons", &rules);
    tera.render(TEMPLATE_NAME, &ctx).context("渲染样式表失败")
}

/// 写出样式表；输出目录不存在时自动创建
pub(crate) fn write_stylesheet(text: &str, output_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("创建输出目录失败: {}", output_dir.display()))?;
    let path = output_dir.join(STYLESHEET_FILE_NAME);
    fs::write(&path, text).with_context(|| format!("写入样式表失败: {}", path.display()))?;
    Ok(path)
}
