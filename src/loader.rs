//! 图标加载模块：
//! - 按目录列举顺序读取图标（不递归）
//! - 经命名规则过滤、解码并可选缩放
//! - 统计单元格尺寸，处理重名

use anyhow::{bail, Context, Result};
use image::{imageops, ImageReader, RgbaImage};
use indexmap::IndexMap;
use std::{fs, path::Path};

use crate::{
    filters::IconFilter,
    reporter::{Event, Reporter},
};

/// 单个图标
#[derive(Debug, Clone)]
pub(crate) struct IconRecord {
    pub(crate) name: String,
    pub(crate) source_file: String,
    pub(crate) image: RgbaImage,
    pub(crate) width: u32,
    pub(crate) height: u32,
    /// 所在单元格左上角（合成后才有值）
    pub(crate) grid_location: Option<(u32, u32)>,
}

/// 单元格尺寸：所有图标宽、高各自的最大值
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct TileDimensions {
    pub(crate) max_width: u32,
    pub(crate) max_height: u32,
}

/// 加载结果：按插入顺序排列的图标与单元格尺寸
#[derive(Debug)]
pub(crate) struct LoadedIcons {
    pub(crate) icons: IndexMap<String, IconRecord>,
    pub(crate) tile: TileDimensions,
}

/// 从目录加载指定类型的图标
pub(crate) fn load_icons(
    dir: &Path,
    kind: &str,
    filter: &dyn IconFilter,
    max_dimension: Option<u32>,
    reporter: &dyn Reporter,
) -> Result<LoadedIcons> {
    if max_dimension == Some(0) {
        bail!("缩放尺寸必须大于 0");
    }
    reporter.report(Event::LoadStarted { kind: kind.to_string(), dir: dir.to_path_buf() });

    let entries = fs::read_dir(dir)
        .with_context(|| format!("读取图标目录失败: {}", dir.display()))?;

    let mut icons: IndexMap<String, IconRecord> = IndexMap::new();
    let mut tile = TileDimensions::default();
    let mut give_hint = true;

    for entry in entries {
        let entry = entry.with_context(|| format!("读取图标目录失败: {}", dir.display()))?;
        // 跟随符号链接判断，指向目录的链接同样跳过
        if entry.path().is_dir() {
            continue;
        }
        let file_os = entry.file_name();
        let Some(file_name) = file_os.to_str() else { continue };
        let Some(name) = filter.icon_name(kind, file_name) else { continue };

        let image = decode_icon(&entry.path(), max_dimension)?;
        let (width, height) = image.dimensions();
        tile.max_width = tile.max_width.max(width);
        tile.max_height = tile.max_height.max(height);

        let record = IconRecord {
            name: name.clone(),
            source_file: file_name.to_string(),
            image,
            width,
            height,
            grid_location: None,
        };
        // IndexMap 覆盖时保留原位置
        if let Some(previous) = icons.insert(name.clone(), record) {
            if give_hint {
                reporter.report(Event::RenameHint);
                give_hint = false;
            }
            reporter.report(Event::DuplicateIcon {
                name,
                file: file_name.to_string(),
                previous: previous.source_file,
            });
        }
    }

    reporter.report(Event::Loaded {
        kind: kind.to_string(),
        count: icons.len(),
        tile_width: tile.max_width,
        tile_height: tile.max_height,
    });
    Ok(LoadedIcons { icons, tile })
}

/// 打开并完整解码图片；文件句柄在返回前释放
fn decode_icon(path: &Path, max_dimension: Option<u32>) -> Result<RgbaImage> {
    let image = ImageReader::open(path)
        .with_context(|| format!("打开图标失败: {}", path.display()))?
        .with_guessed_format()
        .with_context(|| format!("识别图片格式失败: {}", path.display()))?
        .decode()
        .with_context(|| format!("解码图标失败: {}", path.display()))?
        .into_rgba8();

    let Some(bound) = max_dimension else { return Ok(image) };
    let (w, h) = image.dimensions();
    match thumbnail_size(w, h, bound) {
        Some((nw, nh)) => Ok(imageops::resize(&image, nw, nh, imageops::FilterType::Lanczos3)),
        None => Ok(image),
    }
}

/// 等比缩小到长边不超过 `bound`；无需缩放时返回 None。
/// 短边向下取整，至少为 1。
pub(crate) fn thumbnail_size(width: u32, height: u32, bound: u32) -> Option<(u32, u32)> {
    let long = width.max(height);
    if long <= bound {
        return None;
    }
    let scale = |short: u32| -> u32 {
        let v = u64::from(short) * u64::from(bound) / u64::from(long);
        (v as u32).max(1)
    };
    if width >= height {
        Some((bound, scale(height)))
    } else {
        Some((scale(width), bound))
    }
}
