//! 图标命名过滤模块：
//! - `IconFilter` 决定文件是否属于某个图标库的指定类型，并给出图标名
//! - 内置 GlyphIcons 与通用目录两种规则
//! - `FilterRegistry` 负责 `prefix:kind` 类型选择器的解析

use anyhow::{bail, Result};
use std::path::Path;

/// 图标命名规则
pub(crate) trait IconFilter {
    /// 类型选择器中的库前缀，如 `glyphicons`
    fn prefix(&self) -> &'static str;

    /// 支持的子类型
    fn kinds(&self) -> &'static [&'static str];

    /// 根据文件名推导图标名；不符合规则时返回 None（静默跳过）
    fn icon_name(&self, kind: &str, file_name: &str) -> Option<String>;

    /// 默认图标目录（未通过参数覆盖时使用）
    fn default_icon_dir(&self) -> &'static str;

    /// 默认输出目录（未通过参数覆盖时使用）
    fn default_output_dir(&self) -> &'static str;
}

/// GlyphIcons Pro 命名约定：
/// - glyphicons: `glyphicons_079_signal.png`
/// - halflings: `glyphicons_halflings_001_glass.png`
/// - social: `glyphicons_social_01_pinterest.png`
pub(crate) struct GlyphIconFilter;

impl GlyphIconFilter {
    const KINDS: [&'static str; 3] = ["glyphicons", "halflings", "social"];

    fn stem_for_kind<'a>(kind: &str, stem: &'a str) -> Option<&'a str> {
        let rest = stem.strip_prefix("glyphicons_")?;
        match kind {
            "glyphicons" => {
                // 以数字开头才是主图标集，避免把 halflings/social 误收进来
                if rest.starts_with(|c: char| c.is_ascii_digit()) { Some(rest) } else { None }
            }
            "halflings" => rest.strip_prefix("halflings_"),
            "social" => rest.strip_prefix("social_"),
            _ => None,
        }
    }
}

impl IconFilter for GlyphIconFilter {
    fn prefix(&self) -> &'static str { "glyphicons" }

    fn kinds(&self) -> &'static [&'static str] { &Self::KINDS }

    fn icon_name(&self, kind: &str, file_name: &str) -> Option<String> {
        let (stem, ext) = split_extension(file_name)?;
        if !ext.eq_ignore_ascii_case("png") {
            return None;
        }
        let numbered = Self::stem_for_kind(kind, stem)?;
        // NNN_<rest>
        let (number, rest) = numbered.split_once('_')?;
        if number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let name: String = rest
            .trim()
            .chars()
            .map(|c| if c == '_' || c.is_whitespace() { '-' } else { c.to_ascii_lowercase() })
            .collect();
        if name.is_empty() { None } else { Some(name) }
    }

    fn default_icon_dir(&self) -> &'static str { "glyphicons_pro/png" }

    fn default_output_dir(&self) -> &'static str { "glyphicons_pro/sprites" }
}

/// 通用目录：整个目录视为一组图标，文件名（去扩展名）即图标名
pub(crate) struct GenericIconFilter;

impl GenericIconFilter {
    const KINDS: [&'static str; 1] = ["icons"];
    const EXTENSIONS: [&'static str; 5] = ["png", "gif", "jpg", "jpeg", "bmp"];
}

impl IconFilter for GenericIconFilter {
    fn prefix(&self) -> &'static str { "generic" }

    fn kinds(&self) -> &'static [&'static str] { &Self::KINDS }

    fn icon_name(&self, kind: &str, file_name: &str) -> Option<String> {
        if !Self::KINDS.contains(&kind) || file_name.starts_with('.') {
            return None;
        }
        let (stem, ext) = split_extension(file_name)?;
        if stem.is_empty() || !Self::EXTENSIONS.iter().any(|e| ext.eq_ignore_ascii_case(e)) {
            return None;
        }
        Some(stem.to_string())
    }

    fn default_icon_dir(&self) -> &'static str { "icons" }

    fn default_output_dir(&self) -> &'static str { "sprites" }
}

/// 拆分 `stem.ext`；无扩展名时返回 None
fn split_extension(file_name: &str) -> Option<(&str, &str)> {
    let path = Path::new(file_name);
    let stem = path.file_stem()?.to_str()?;
    let ext = path.extension()?.to_str()?;
    Some((stem, ext))
}

/// 全部可用的命名规则（顺序即 `--list-types` 的输出顺序）
pub(crate) struct FilterRegistry {
    filters: Vec<Box<dyn IconFilter>>,
}

impl Default for FilterRegistry {
    fn default() -> Self {
        Self { filters: vec![Box::new(GlyphIconFilter), Box::new(GenericIconFilter)] }
    }
}

impl FilterRegistry {
    /// 列出所有合法的 `prefix:kind` 取值
    pub(crate) fn supported_types(&self) -> Vec<String> {
        self.filters
            .iter()
            .flat_map(|f| f.kinds().iter().map(move |k| format!("{}:{}", f.prefix(), k)))
            .collect()
    }

    /// 解析类型选择器，返回对应的规则与子类型
    pub(crate) fn resolve(&self, selector: &str) -> Result<(&dyn IconFilter, String)> {
        let Some((prefix, kind)) = selector.trim().split_once(':') else {
            bail!(
                "类型格式错误: {}，应为 prefix:kind，可选值: {}",
                selector,
                self.supported_types().join(", ")
            );
        };
        for f in &self.filters {
            if f.prefix() == prefix && f.kinds().contains(&kind) {
                return Ok((f.as_ref(), kind.to_string()));
            }
        }
        bail!("不支持的类型: {}，可选值: {}", selector, self.supported_types().join(", "));
    }
}
