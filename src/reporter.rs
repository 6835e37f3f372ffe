//! 进度与告警上报模块：
//! - 加载/合成过程中产生的事件统一通过 `Reporter` 发出
//! - 命令行使用 `ConsoleReporter` 输出，调用方也可替换或静默

use std::path::PathBuf;

/// 生成过程中的事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Event {
    /// 开始从目录加载某类型图标
    LoadStarted { kind: String, dir: PathBuf },
    /// 图标名重复：后加载的文件覆盖先前的文件
    DuplicateIcon { name: String, file: String, previous: String },
    /// 首次出现重名时提示 `-m` 参数
    RenameHint,
    /// 加载完成
    Loaded { kind: String, count: usize, tile_width: u32, tile_height: u32 },
    /// 网格尺寸（单元格数与像素）
    GridComputed { columns: u32, rows: u32, width: u32, height: u32 },
    /// 开始写出某个文件
    Writing { path: PathBuf },
    /// 文件写出完成
    Written { path: PathBuf },
    /// `-m` 参数已接收但不会生效（文件名, 新图标名）
    AdjustMapIgnored { mappings: Vec<(String, String)> },
}

impl Event {
    /// 是否属于告警类事件（静默模式下仍需输出）
    pub(crate) fn is_warning(&self) -> bool {
        matches!(
            self,
            Event::DuplicateIcon { .. } | Event::RenameHint | Event::AdjustMapIgnored { .. }
        )
    }
}

/// 事件观察者
pub(crate) trait Reporter {
    fn report(&self, event: Event);
}

/// 终端输出：普通进度写 stdout，告警写 stderr
pub(crate) struct ConsoleReporter {
    pub(crate) quiet: bool,
}

impl ConsoleReporter {
    /// 静默模式下只输出告警
    fn shows(&self, event: &Event) -> bool {
        !self.quiet || event.is_warning()
    }
}

impl Reporter for ConsoleReporter {
    fn report(&self, event: Event) {
        if !self.shows(&event) {
            return;
        }
        match event {
            Event::LoadStarted { kind, dir } => {
                println!("ℹ️ 加载图标({}): {}", kind, dir.display());
            }
            Event::DuplicateIcon { name, file, previous } => {
                eprintln!("⚠️ 图标名重复: '{}'，文件 '{}' 覆盖了 '{}'", name, file, previous);
            }
            Event::RenameHint => {
                eprintln!("💡 提示: 可使用 -m 参数为指定文件重新定义图标名");
            }
            Event::Loaded { kind, count, tile_width, tile_height } => {
                println!("ℹ️ 图标总数({}): {}", kind, count);
                println!("ℹ️ 单元格尺寸: {}px x {}px", tile_width, tile_height);
            }
            Event::GridComputed { columns, rows, width, height } => {
                println!("ℹ️ 精灵图尺寸(单元格): {}x{}", columns, rows);
                println!("ℹ️ 精灵图尺寸(像素): {}x{}", width, height);
            }
            Event::Writing { path } => {
                println!("-> 生成: {}", path.display());
            }
            Event::Written { path } => {
                println!("✅ 已写入: {}", path.display());
            }
            Event::AdjustMapIgnored { mappings } => {
                eprintln!("⚠️ 已接收 {} 条 -m 映射，但当前版本不会应用:", mappings.len());
                for (file, name) in mappings {
                    eprintln!("   {} -> {}", file, name);
                }
            }
        }
    }
}

/// 记录事件，供测试断言
#[cfg(test)]
#[derive(Default)]
pub(crate) struct RecordingReporter {
    pub(crate) events: std::cell::RefCell<Vec<Event>>,
}

#[cfg(test)]
impl Reporter for RecordingReporter {
    fn report(&self, event: Event) {
        self.events.borrow_mut().push(event);
    }
}

#[cfg(test)]
impl RecordingReporter {
    pub(crate) fn warnings(&self) -> Vec<Event> {
        self.events.borrow().iter().filter(|e| e.is_warning()).cloned().collect()
    }
}
