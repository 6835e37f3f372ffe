//! 生成流程模块：
//! - 加载图标 -> 合成精灵图 -> 渲染样式表
//! - 所有进度通过 `Reporter` 上报

use anyhow::Result;
use std::path::PathBuf;

use crate::{
    config::Settings,
    filters::FilterRegistry,
    loader::{load_icons, TileDimensions},
    reporter::{Event, Reporter},
    sprite::{compose_sprite, save_sprite, GridLayout, SPRITE_FILE_NAME},
    stylesheet::{render_stylesheet, write_stylesheet, STYLESHEET_FILE_NAME},
};

/// 一次生成的摘要
#[derive(Debug)]
pub(crate) struct RunSummary {
    pub(crate) icon_count: usize,
    pub(crate) tile: TileDimensions,
    pub(crate) grid: GridLayout,
    pub(crate) sprite_path: PathBuf,
    pub(crate) stylesheet_path: PathBuf,
}

/// 按设置执行一次完整生成
pub(crate) fn generate(
    settings: &Settings,
    registry: &FilterRegistry,
    reporter: &dyn Reporter,
) -> Result<RunSummary> {
    let (filter, kind) = registry.resolve(&settings.selector)?;
    if !settings.adjust_map.is_empty() {
        let mappings = settings
            .adjust_map
            .iter()
            .map(|m| (m.file_name.clone(), m.icon_name.clone()))
            .collect();
        reporter.report(Event::AdjustMapIgnored { mappings });
    }

    let mut loaded = load_icons(&settings.icon_dir, &kind, filter, settings.resize, reporter)?;
    let tile = loaded.tile;

    let sprite = compose_sprite(&mut loaded.icons, tile);
    reporter.report(Event::GridComputed {
        columns: sprite.grid.columns,
        rows: sprite.grid.rows,
        width: sprite.canvas.width(),
        height: sprite.canvas.height(),
    });

    reporter.report(Event::Writing { path: settings.output_dir.join(SPRITE_FILE_NAME) });
    let sprite_path = save_sprite(&sprite, &settings.output_dir)?;
    reporter.report(Event::Written { path: sprite_path.clone() });

    reporter.report(Event::Writing { path: settings.output_dir.join(STYLESHEET_FILE_NAME) });
    let text = render_stylesheet(&loaded.icons, tile)?;
    let stylesheet_path = write_stylesheet(&text, &settings.output_dir)?;
    reporter.report(Event::Written { path: stylesheet_path.clone() });

    Ok(RunSummary {
        icon_count: loaded.icons.len(),
        tile,
        grid: sprite.grid,
        sprite_path,
        stylesheet_path,
    })
}
