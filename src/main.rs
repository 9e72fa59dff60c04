use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};

use rust_locate::cli::Cli;
use rust_locate::fs::{BasePathFs, FileSystem, OsFs};

fn main() -> Result<()> {
    // 解析命令行参数
    let cli = Cli::parse();

    // 初始化日志
    env_logger::Builder::new()
        .filter_level(if cli.debug {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .init();

    cli.validate().context("无效的命令行参数")?;

    info!("开始运行 rust-locate");
    let start_time = Instant::now();

    let finder = cli.build_finder().context("创建定位器失败")?;

    let os_fs = OsFs::new().with_follow_links(cli.follow_links);
    let fs: Arc<dyn FileSystem> = match &cli.root {
        Some(root) => {
            debug!("将搜索路径解析到 {} 之下", root);
            Arc::new(BasePathFs::new(os_fs, root.clone()))
        }
        None => Arc::new(os_fs),
    };

    let results = finder.find(fs).context("查找失败")?;

    // 打印结果
    for path in results {
        println!("{}", path);
    }

    let elapsed = start_time.elapsed();
    info!("查找完成，耗时 {:.2?}", elapsed);

    Ok(())
}
