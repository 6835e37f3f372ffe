//! CLI 定义模块：仅负责命令行参数结构体与解析
//! 将 clap 的声明与业务逻辑解耦，便于在其它模块中复用参数。

use clap::Parser;
use std::path::PathBuf;

/// 顶层 CLI 入口
#[derive(Parser, Debug)]
#[command(
    name = "icon-sprite",
    about = "将图标目录打包为一张精灵图及对应的 LESS 样式表",
    after_help = "支持的图标库: GlyphIcons Pro 与通用目录，使用 --list-types 查看全部类型",
    version
)]
pub(crate) struct Cli {
    /// 图标类型，格式 prefix:kind，例如 glyphicons:halflings
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub(crate) kind: Option<String>,
    /// 图标目录，默认取所选类型的内置目录
    #[arg(short = 'd', long, value_name = "DIR")]
    pub(crate) icon_dir: Option<PathBuf>,
    /// 输出目录，不存在时自动创建
    #[arg(short, long, value_name = "DIR")]
    pub(crate) output_dir: Option<PathBuf>,
    /// 将图标等比缩小到指定尺寸（像素，长边）
    #[arg(short, long, value_name = "PX")]
    pub(crate) resize: Option<u32>,
    /// 为指定文件重新定义图标名，可多次使用，例如 -m glyphicons_079_signal.png:signal-strength
    #[arg(short = 'm', long, value_name = "FILE:NAME")]
    pub(crate) adjust_map: Vec<String>,
    /// 配置文件路径，默认：icon-sprite.yaml / icon-sprite.yml
    #[arg(short, long, value_name = "FILE")]
    pub(crate) config: Option<PathBuf>,
    /// 仅输出告警
    #[arg(short, long)]
    pub(crate) quiet: bool,
    /// 列出支持的图标类型后退出
    #[arg(long)]
    pub(crate) list_types: bool,
}
