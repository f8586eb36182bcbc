use super::LoggingConfig;
use anyhow::Result;
use chrono::{Duration as ChronoDuration, Local, NaiveDate};
use std::fs;
use std::path::Path;
use tracing::warn;

/// 删除早于保留天数的日志文件, 返回删除的文件数
pub(super) fn cleanup_logs(config: &LoggingConfig) -> Result<usize> {
    let directory = Path::new(&config.directory);
    if config.retention_days <= 0 || !directory.exists() {
        return Ok(0);
    }
    let cutoff = Local::now().date_naive() - ChronoDuration::days(config.retention_days);
    cleanup_before(directory, &config.file_prefix, cutoff)
}

fn cleanup_before(directory: &Path, prefix: &str, cutoff: NaiveDate) -> Result<usize> {
    let mut removed = 0;
    for entry in fs::read_dir(directory)? {
        let entry = entry?;
        let file_name = entry.file_name().to_string_lossy().to_string();
        let Some(date) = parse_log_name(&file_name, prefix) else {
            continue;
        };
        if date < cutoff {
            match fs::remove_file(entry.path()) {
                Ok(()) => removed += 1,
                Err(err) => warn!("删除过期日志失败, file={}: {}", file_name, err),
            }
        }
    }
    Ok(removed)
}

fn parse_log_name(file_name: &str, prefix: &str) -> Option<NaiveDate> {
    let date_part = file_name
        .strip_prefix(prefix)?
        .strip_prefix('.')?
        .strip_suffix(".log")?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::build_current_log_path;
    use tempfile::TempDir;

    #[test]
    fn test_parse_log_name() {
        assert_eq!(
            parse_log_name("yin.2026-02-06.log", "yin"),
            NaiveDate::from_ymd_opt(2026, 2, 6)
        );
        assert!(parse_log_name("yin.log", "yin").is_none());
        assert!(parse_log_name("other.2026-02-06.log", "yin").is_none());
        assert!(parse_log_name("yin.2026-13-40.log", "yin").is_none());
    }

    #[test]
    fn test_清理过期日志() {
        let temp_dir = match TempDir::new() {
            Ok(temp_dir) => temp_dir,
            Err(err) => panic!("创建临时目录失败: {}", err),
        };
        let dir = temp_dir.path();
        let (Some(old), Some(recent), Some(cutoff)) = (
            NaiveDate::from_ymd_opt(2026, 1, 1),
            NaiveDate::from_ymd_opt(2026, 2, 10),
            NaiveDate::from_ymd_opt(2026, 2, 1),
        ) else {
            panic!("测试日期初始化失败");
        };
        let old_path = build_current_log_path(dir, "yin", old);
        let recent_path = build_current_log_path(dir, "yin", recent);
        let foreign_path = build_current_log_path(dir, "other", old);
        for path in [&old_path, &recent_path, &foreign_path] {
            if let Err(err) = fs::write(path, b"x") {
                panic!("写入测试日志失败: {}", err);
            }
        }

        let removed = cleanup_before(dir, "yin", cutoff);
        assert!(matches!(removed, Ok(1)), "清理结果: {:?}", removed);
        assert!(!old_path.exists());
        assert!(recent_path.exists());
        assert!(foreign_path.exists());
    }
}
