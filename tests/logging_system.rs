use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use tempfile::TempDir;
use yin::logging::{LoggingConfig, build_current_log_path, init};

// tracing 的全局订阅器只能初始化一次, 涉及 init() 的断言都放在同一个测试里

fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("创建临时目录失败: {}", err),
    }
}

#[test]
fn test_日志路径格式() {
    let Some(date) = NaiveDate::from_ymd_opt(2026, 10, 15) else {
        panic!("测试日期初始化失败");
    };
    let path = build_current_log_path(Path::new("/var/log/yin"), "decoder", date);
    assert_eq!(path, Path::new("/var/log/yin/decoder.2026-10-15.log"));
}

#[test]
fn test_初始化与过期清理() {
    let dir = temp_dir();
    let directory = dir.path().join("logs");
    if let Err(err) = fs::create_dir_all(&directory) {
        panic!("创建日志目录失败: {}", err);
    }
    let Some(old) = NaiveDate::from_ymd_opt(2000, 1, 1) else {
        panic!("测试日期初始化失败");
    };
    let stale = build_current_log_path(&directory, "it", old);
    if let Err(err) = fs::write(&stale, b"old") {
        panic!("写入过期日志失败: {}", err);
    }

    let config = LoggingConfig {
        level: "debug".to_string(),
        directory: directory.to_string_lossy().to_string(),
        file_prefix: "it".to_string(),
        retention_days: 7,
    };
    let result = init(&config);
    assert!(result.is_ok(), "日志系统初始化失败: {:?}", result.err());
    assert!(!stale.exists(), "过期日志应被删除");

    // log 门面的记录经兼容层写入文件
    log::info!("集成测试日志");
    assert!(init(&config).is_err(), "重复初始化应报错");
    assert_eq!(config.current_log_path().parent(), Some(directory.as_path()));
}
