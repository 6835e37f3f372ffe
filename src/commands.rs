//! 命令调度模块：
//! - 接收解析好的 CLI 参数，结合环境变量与配置文件计算“有效参数”
//! - 调用生成流程并打印摘要

use anyhow::Result;
use std::path::Path;

use crate::{
    cli::Cli,
    config::{self, resolve_settings, SettingsLayer},
    filters::FilterRegistry,
    generator::generate,
    reporter::ConsoleReporter,
    utils::{env_bool_truthy, env_opt_path, env_opt_string, env_opt_u32},
};

/// 运行命令行
pub(crate) fn run(cli: Cli) -> Result<()> {
    let registry = FilterRegistry::default();

    if cli.list_types {
        for t in registry.supported_types() {
            println!("{}", t);
        }
        return Ok(());
    }

    // 环境变量覆盖（若 CLI 未指定）
    let env_layer = SettingsLayer {
        kind: env_opt_string("ICON_SPRITE_TYPE"),
        icon_dir: env_opt_path("ICON_SPRITE_ICON_DIR"),
        output_dir: env_opt_path("ICON_SPRITE_OUTPUT_DIR"),
        resize: env_opt_u32("ICON_SPRITE_RESIZE")?,
        quiet: env_bool_truthy("ICON_SPRITE_QUIET"),
    };
    let cli_layer = SettingsLayer {
        kind: cli.kind,
        icon_dir: cli.icon_dir,
        output_dir: cli.output_dir,
        resize: cli.resize,
        quiet: cli.quiet.then_some(true),
    };

    let config_path = cli.config.or_else(|| env_opt_path("ICON_SPRITE_CONFIG"));
    let loaded_cfg = config::load_file_config(config_path.as_deref(), Path::new("."))?;
    let (file_cfg, source) = match loaded_cfg {
        Some(lc) => (Some(lc.config), Some(lc.source)),
        None => (None, None),
    };

    let settings = resolve_settings(cli_layer, env_layer, &cli.adjust_map, file_cfg, &registry)?;
    if let (Some(src), false) = (&source, settings.quiet) {
        println!("ℹ️ 本次使用的配置来源: {}", config::describe_source(src));
    }

    let reporter = ConsoleReporter { quiet: settings.quiet };
    let summary = generate(&settings, &registry, &reporter)?;
    if !settings.quiet {
        println!(
            "✅ 完成: {} 个图标，单元格 {}x{}px，网格 {}x{} -> {}, {}",
            summary.icon_count,
            summary.tile.max_width,
            summary.tile.max_height,
            summary.grid.columns,
            summary.grid.rows,
            summary.sprite_path.display(),
            summary.stylesheet_path.display()
        );
    }
    Ok(())
}
