//! 精灵图合成模块：
//! - 计算方形网格（列数 = 行数 = ceil(sqrt(n))）
//! - 将每个图标居中贴入所在单元格，并记录单元格原点
//! - 写出 PNG

use anyhow::{Context, Result};
use image::{imageops, RgbaImage};
use indexmap::IndexMap;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::loader::{IconRecord, TileDimensions};

/// 精灵图文件名
pub(crate) const SPRITE_FILE_NAME: &str = "sprites-pro.png";

/// 网格尺寸（单元格数）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct GridLayout {
    pub(crate) columns: u32,
    pub(crate) rows: u32,
}

impl GridLayout {
    /// n 个图标对应的网格；n 为 0 时为 0x0
    pub(crate) fn for_count(n: usize) -> Self {
        let side = ceil_sqrt(n as u64) as u32;
        Self { columns: side, rows: side }
    }

    /// 第 index 个单元格的 (列, 行)
    pub(crate) fn cell(&self, index: usize) -> (u32, u32) {
        let columns = self.columns.max(1) as usize;
        ((index % columns) as u32, (index / columns) as u32)
    }
}

/// 整数 ceil(sqrt(n))，避免浮点误差
fn ceil_sqrt(n: u64) -> u64 {
    if n == 0 {
        return 0;
    }
    let mut r = (n as f64).sqrt() as u64;
    while r * r > n {
        r -= 1;
    }
    while r * r < n {
        r += 1;
    }
    r
}

/// 合成结果
#[derive(Debug)]
pub(crate) struct Sprite {
    pub(crate) canvas: RgbaImage,
    pub(crate) grid: GridLayout,
}

/// 图标在单元格内的居中偏移（向下取整）
pub(crate) fn centered_offset(tile: TileDimensions, width: u32, height: u32) -> (u32, u32) {
    ((tile.max_width - width) / 2, (tile.max_height - height) / 2)
}

/// 按插入顺序把图标贴入网格，并为每个图标写入 `grid_location`
pub(crate) fn compose_sprite(
    icons: &mut IndexMap<String, IconRecord>,
    tile: TileDimensions,
) -> Sprite {
    let grid = GridLayout::for_count(icons.len());
    let mut canvas = RgbaImage::new(grid.columns * tile.max_width, grid.rows * tile.max_height);

    for (index, icon) in icons.values_mut().enumerate() {
        let (col, row) = grid.cell(index);
        let origin = (col * tile.max_width, row * tile.max_height);
        icon.grid_location = Some(origin);

        let (cx, cy) = centered_offset(tile, icon.width, icon.height);
        // 单元格互不重叠，直接覆盖即可保留图标原始 alpha
        imageops::replace(
            &mut canvas,
            &icon.image,
            i64::from(origin.0 + cx),
            i64::from(origin.1 + cy),
        );
    }

    Sprite { canvas, grid }
}

/// 写出精灵图；输出目录不存在时自动创建
pub(crate) fn save_sprite(sprite: &Sprite, output_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("创建输出目录失败: {}", output_dir.display()))?;
    let path = output_dir.join(SPRITE_FILE_NAME);
    // PNG 不支持 0 尺寸，空图输出 1x1 透明像素
    let result = if sprite.canvas.width() == 0 || sprite.canvas.height() == 0 {
        RgbaImage::new(1, 1).save(&path)
    } else {
        sprite.canvas.save(&path)
    };
    result.with_context(|| format!("写入精灵图失败: {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use tempfile::TempDir;

    fn icon(name: &str, w: u32, h: u32, color: [u8; 4]) -> IconRecord {
        IconRecord {
            name: name.to_string(),
            source_file: format!("{}.png", name),
            image: RgbaImage::from_pixel(w, h, Rgba(color)),
            width: w,
            height: h,
            grid_location: None,
        }
    }

    fn icon_set(specs: &[(&str, u32, u32)]) -> IndexMap<String, IconRecord> {
        specs
            .iter()
            .enumerate()
            .map(|(i, (n, w, h))| (n.to_string(), icon(n, *w, *h, [i as u8 + 1, 10, 20, 255])))
            .collect()
    }

    #[test]
    fn grid_is_ceil_sqrt_square() {
        assert_eq!(GridLayout::for_count(0), GridLayout { columns: 0, rows: 0 });
        for (n, side) in [(1, 1), (2, 2), (4, 2), (5, 3), (9, 3), (10, 4), (16, 4), (17, 5), (1000, 32)] {
            assert_eq!(GridLayout::for_count(n), GridLayout { columns: side, rows: side }, "n={}", n);
        }
    }

    #[test]
    fn five_icons_fill_three_by_three_grid() {
        let mut icons = icon_set(&[("a", 32, 32), ("b", 16, 20), ("c", 31, 7), ("d", 1, 1), ("e", 32, 5)]);
        let tile = TileDimensions { max_width: 32, max_height: 32 };
        let sprite = compose_sprite(&mut icons, tile);

        assert_eq!(sprite.grid, GridLayout { columns: 3, rows: 3 });
        assert_eq!(sprite.canvas.dimensions(), (96, 96));

        let locations: Vec<_> = icons.values().map(|i| i.grid_location.unwrap()).collect();
        assert_eq!(locations, vec![(0, 0), (32, 0), (64, 0), (0, 32), (32, 32)]);

        // 剩余 4 个单元格保持透明
        for (cx, cy) in [(64, 32), (0, 64), (32, 64), (64, 64)] {
            for y in cy..cy + 32 {
                for x in cx..cx + 32 {
                    assert_eq!(sprite.canvas.get_pixel(x, y)[3], 0);
                }
            }
        }
    }

    #[test]
    fn icons_are_centered_with_floor_division_and_pasted_losslessly() {
        let mut icons = IndexMap::new();
        let mut odd = icon("odd", 3, 5, [0, 0, 0, 0]);
        for (x, y, p) in odd.image.enumerate_pixels_mut() {
            *p = Rgba([x as u8 * 40, y as u8 * 30, 7, (x * 50 + y * 10) as u8]);
        }
        icons.insert("filler".to_string(), icon("filler", 8, 8, [9, 9, 9, 255]));
        icons.insert("odd".to_string(), odd.clone());

        let tile = TileDimensions { max_width: 8, max_height: 8 };
        assert_eq!(centered_offset(tile, 3, 5), (2, 1));
        let sprite = compose_sprite(&mut icons, tile);

        let (gx, gy) = icons["odd"].grid_location.unwrap();
        assert_eq!((gx, gy), (8, 0));
        let (cx, cy) = centered_offset(tile, 3, 5);
        for (x, y, p) in odd.image.enumerate_pixels() {
            assert_eq!(sprite.canvas.get_pixel(gx + cx + x, gy + cy + y), p);
        }
        // 居中留白保持透明
        assert_eq!(sprite.canvas.get_pixel(gx, gy)[3], 0);
    }

    #[test]
    fn centering_subtracts_before_halving() {
        // 偶数单元格、奇数图标：(8 - 3) / 2 = 2，而 8 / 2 - 3 / 2 = 3
        let tile = TileDimensions { max_width: 8, max_height: 8 };
        assert_eq!(centered_offset(tile, 3, 3), (2, 2));
        let tile = TileDimensions { max_width: 5, max_height: 7 };
        assert_eq!(centered_offset(tile, 2, 2), (1, 2));

        let mut icons = icon_set(&[("a", 3, 3)]);
        let sprite = compose_sprite(&mut icons, TileDimensions { max_width: 8, max_height: 8 });
        assert_eq!(sprite.canvas.get_pixel(2, 2)[3], 255);
        assert_eq!(sprite.canvas.get_pixel(4, 4)[3], 255);
        assert_eq!(sprite.canvas.get_pixel(5, 5)[3], 0);
        assert_eq!(sprite.canvas.get_pixel(1, 1)[3], 0);
    }

    #[test]
    fn grid_location_follows_insertion_order() {
        let specs: Vec<(String, u32, u32)> = (0..7).map(|i| (format!("i{}", i), 4 + i, 10 - i)).collect();
        let refs: Vec<(&str, u32, u32)> = specs.iter().map(|(n, w, h)| (n.as_str(), *w, *h)).collect();
        let mut icons = icon_set(&refs);
        let tile = TileDimensions { max_width: 10, max_height: 10 };
        let sprite = compose_sprite(&mut icons, tile);
        let columns = sprite.grid.columns;
        for (index, icon) in icons.values().enumerate() {
            let index = index as u32;
            assert_eq!(
                icon.grid_location,
                Some((index % columns * tile.max_width, index / columns * tile.max_height))
            );
        }
    }

    #[test]
    fn empty_set_composes_and_saves() {
        let mut icons = IndexMap::new();
        let sprite = compose_sprite(&mut icons, TileDimensions::default());
        assert_eq!(sprite.grid, GridLayout { columns: 0, rows: 0 });
        assert_eq!(sprite.canvas.dimensions(), (0, 0));

        let tmp = TempDir::new().unwrap();
        let path = save_sprite(&sprite, &tmp.path().join("out")).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn save_creates_nested_output_dir() {
        let mut icons = icon_set(&[("a", 4, 4)]);
        let sprite = compose_sprite(&mut icons, TileDimensions { max_width: 4, max_height: 4 });
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("a").join("b");
        let path = save_sprite(&sprite, &out).unwrap();
        assert_eq!(path, out.join(SPRITE_FILE_NAME));
        // 目录已存在时再次写出不报错
        save_sprite(&sprite, &out).unwrap();
        let back = image::open(&path).unwrap().into_rgba8();
        assert_eq!(back, sprite.canvas);
    }
}
