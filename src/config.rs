//! 配置与加载模块：
//! - 定义 YAML 配置文件结构 `FileConfig`
//! - 按 CLI > 环境变量 > 配置文件 > 类型默认值 合并出最终 `Settings`
//! - 暴露配置来源信息，便于日志打印

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::filters::FilterRegistry;

/// 自动发现的配置文件名
const CONFIG_CANDIDATES: [&str; 2] = ["icon-sprite.yaml", "icon-sprite.yml"];

/// 配置文件内容（所有字段可选）
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub(crate) struct FileConfig {
    /// 图标类型 prefix:kind
    #[serde(default, rename = "type")]
    pub(crate) kind: Option<String>,
    #[serde(default)]
    pub(crate) icon_dir: Option<PathBuf>,
    #[serde(default)]
    pub(crate) output_dir: Option<PathBuf>,
    #[serde(default)]
    pub(crate) resize: Option<u32>,
    /// 形如 `file.png:new-name`
    #[serde(default)]
    pub(crate) adjust_map: Vec<String>,
}

/// 配置文件来源
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ConfigSource {
    LocalExplicit(PathBuf),
    LocalAuto(PathBuf),
}

/// 读取到的配置文件
#[derive(Debug)]
pub(crate) struct LoadedConfig {
    pub(crate) config: FileConfig,
    pub(crate) source: ConfigSource,
}

/// 人类可读的来源描述
pub(crate) fn describe_source(src: &ConfigSource) -> String {
    match src {
        ConfigSource::LocalExplicit(p) => format!("本地文件: {}", p.display()),
        ConfigSource::LocalAuto(p) => format!("本地文件(自动发现): {}", p.display()),
    }
}

/// 加载配置文件：显式路径必须存在；未指定时在 `search_dir` 中自动查找，找不到则返回 None
pub(crate) fn load_file_config(explicit: Option<&Path>, search_dir: &Path) -> Result<Option<LoadedConfig>> {
    if let Some(path) = explicit {
        if !path.exists() {
            bail!("配置文件不存在: {}", path.display());
        }
        let config = parse_file(path)?;
        return Ok(Some(LoadedConfig { config, source: ConfigSource::LocalExplicit(path.to_path_buf()) }));
    }
    for cand in CONFIG_CANDIDATES {
        let path = search_dir.join(cand);
        if path.is_file() {
            let config = parse_file(&path)?;
            return Ok(Some(LoadedConfig { config, source: ConfigSource::LocalAuto(path) }));
        }
    }
    Ok(None)
}

fn parse_file(path: &Path) -> Result<FileConfig> {
    let raw = fs::read_to_string(path).with_context(|| format!("读取配置失败: {}", path.display()))?;
    // 空文件视为全部缺省
    if raw.trim().is_empty() {
        return Ok(FileConfig::default());
    }
    serde_yaml::from_str(&raw).with_context(|| format!("解析 YAML 失败: {}", path.display()))
}

/// 一条 `-m` 映射：文件名 -> 新图标名
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AdjustEntry {
    pub(crate) file_name: String,
    pub(crate) icon_name: String,
}

/// 解析 `file.png:new-name`
pub(crate) fn parse_adjust_entry(raw: &str) -> Result<AdjustEntry> {
    let parts: Vec<&str> = raw.split(':').map(str::trim).collect();
    match parts.as_slice() {
        [file, name] if !file.is_empty() && !name.is_empty() => Ok(AdjustEntry {
            file_name: file.to_string(),
            icon_name: name.to_string(),
        }),
        _ => bail!("映射格式错误: {}，应为 文件名:图标名", raw),
    }
}

/// 单一来源（CLI 或环境变量）提供的可选值
#[derive(Debug, Default, Clone)]
pub(crate) struct SettingsLayer {
    pub(crate) kind: Option<String>,
    pub(crate) icon_dir: Option<PathBuf>,
    pub(crate) output_dir: Option<PathBuf>,
    pub(crate) resize: Option<u32>,
    pub(crate) quiet: Option<bool>,
}

/// 合并后的最终设置
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Settings {
    /// 完整类型选择器 prefix:kind（已校验）
    pub(crate) selector: String,
    pub(crate) icon_dir: PathBuf,
    pub(crate) output_dir: PathBuf,
    pub(crate) resize: Option<u32>,
    pub(crate) adjust_map: Vec<AdjustEntry>,
    pub(crate) quiet: bool,
}

/// 合并各来源：CLI > 环境变量 > 配置文件 > 类型默认值
pub(crate) fn resolve_settings(
    cli: SettingsLayer,
    env: SettingsLayer,
    cli_adjust_map: &[String],
    file: Option<FileConfig>,
    registry: &FilterRegistry,
) -> Result<Settings> {
    let file = file.unwrap_or_default();

    let Some(selector) = cli.kind.or(env.kind).or(file.kind) else {
        bail!(
            "缺少图标类型：请使用 -t 指定，或设置 ICON_SPRITE_TYPE，或在配置文件中填写 type。可选值: {}",
            registry.supported_types().join(", ")
        );
    };
    let (filter, _kind) = registry.resolve(&selector)?;

    let resize = cli.resize.or(env.resize).or(file.resize);
    if resize == Some(0) {
        bail!("缩放尺寸必须大于 0");
    }

    // CLI 提供时覆盖配置文件中的映射
    let raw_map: &[String] = if cli_adjust_map.is_empty() { &file.adjust_map } else { cli_adjust_map };
    let adjust_map = raw_map
        .iter()
        .map(|m| parse_adjust_entry(m))
        .collect::<Result<Vec<_>>>()?;

    Ok(Settings {
        selector: selector.trim().to_string(),
        icon_dir: cli
            .icon_dir
            .or(env.icon_dir)
            .or(file.icon_dir)
            .unwrap_or_else(|| PathBuf::from(filter.default_icon_dir())),
        output_dir: cli
            .output_dir
            .or(env.output_dir)
            .or(file.output_dir)
            .unwrap_or_else(|| PathBuf::from(filter.default_output_dir())),
        resize,
        adjust_map,
        quiet: cli.quiet.or(env.quiet).unwrap_or(false),
    })
}
