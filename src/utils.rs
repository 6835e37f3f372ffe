//! 通用辅助函数：
//! - 环境变量读取与解析

use anyhow::{bail, Result};
use std::{env, path::PathBuf};

/// 可选读取 PATH 环境变量为 PathBuf。
pub(crate) fn env_opt_path(key: &str) -> Option<PathBuf> {
    env::var_os(key).filter(|v| !v.is_empty()).map(PathBuf::from)
}

/// 可选读取 String 环境变量。
pub(crate) fn env_opt_string(key: &str) -> Option<String> {
    env::var(key).ok().map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// 可选读取 u32 环境变量；已设置但无法解析时报错。
pub(crate) fn env_opt_u32(key: &str) -> Result<Option<u32>> {
    match env_opt_string(key) {
        Some(s) => parse_u32_value(key, &s).map(Some),
        None => Ok(None),
    }
}

fn parse_u32_value(key: &str, raw: &str) -> Result<u32> {
    match raw.trim().parse::<u32>() {
        Ok(v) => Ok(v),
        Err(_) => bail!("环境变量 {} 的值无效: {}，应为非负整数", key, raw),
    }
}

/// 读取布尔环境变量的真值（1/true/on/yes/y）。
pub(crate) fn env_bool_truthy(key: &str) -> Option<bool> {
    env::var(key).ok().map(|v| parse_truthy(&v))
}

fn parse_truthy(v: &str) -> bool {
    matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "on" | "yes" | "y")
}
