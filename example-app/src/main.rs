//! # 示例应用程序
//!
//! 演示如何用 Lorn IoC 容器装配一个客户管理模块：
//! 数据访问层以 trait object 导出，业务层分别使用构造注入和属性注入。

use anyhow::Context;
use clap::Parser;
use ioc_common::ContainerConfig;
use ioc_container::{Assembly, Container};
use ioc_macros::{component_constructors, Component};
use std::path::PathBuf;
use tracing::info;

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "example-app")]
#[command(about = "Lorn IoC 示例应用")]
struct Args {
    /// 配置文件路径（TOML 或 JSON），不指定时只读取环境变量
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 打开循环依赖检测
    #[arg(long)]
    detect_cycles: bool,

    /// 日志级别
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 初始化日志
    tracing_subscriber::fmt()
        .with_max_level(parse_log_level(&args.log_level))
        .init();

    info!("启动 Lorn IoC 示例应用");

    let config = load_config(&args)?;
    let mut container = Container::builder().with_config(config).build();

    let added = container
        .add_assembly(&customer_assembly())
        .context("批量注册客户模块失败")?;
    info!("客户模块注册完成: {} 个注册项", added);

    for entry in container.registrations() {
        println!(
            "{} -> {}",
            entry.requested.short_name(),
            entry.implementation.short_name()
        );
    }

    let bll = container
        .resolve::<CustomerBll>()
        .context("解析 CustomerBll 失败")?;
    println!("CustomerBll (构造注入): {}", bll.describe());

    let second = container
        .resolve::<SecondCustomerBll>()
        .context("解析 SecondCustomerBll 失败")?;
    println!("SecondCustomerBll (属性注入): {}", second.describe());

    if let Err(e) = container.resolve::<AuditTrail>() {
        println!("AuditTrail 未被批量注册: {}", e);
    }

    info!("示例应用结束");
    Ok(())
}

/// 加载容器配置
fn load_config(args: &Args) -> anyhow::Result<ContainerConfig> {
    let config = match &args.config {
        Some(path) => ContainerConfig::load(path)
            .with_context(|| format!("加载配置文件失败: {}", path.display()))?,
        None => {
            info!("未指定配置文件，将使用默认配置和环境变量");
            ContainerConfig::from_env()?
        }
    };

    Ok(if args.detect_cycles {
        config.with_cycle_detection(true)
    } else {
        config
    })
}

/// 解析日志级别
fn parse_log_level(level: &str) -> tracing::Level {
    match level.to_lowercase().as_str() {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "info" => tracing::Level::INFO,
        "warn" => tracing::Level::WARN,
        "error" => tracing::Level::ERROR,
        _ => tracing::Level::INFO,
    }
}

fn customer_assembly() -> Assembly {
    Assembly::new("example-app")
        .with::<Logger>()
        .with::<SqlCustomerDal>()
        .with::<CustomerBll>()
        .with::<SecondCustomerBll>()
        .with::<AuditTrail>()
}

// 示例组件

/// 客户数据访问接口
pub trait CustomerDal: Send + Sync {
    fn find_name(&self, id: u32) -> String;
}

/// 日志组件
#[derive(Debug, Default, Component)]
#[component(default, export)]
pub struct Logger;

impl Logger {
    pub fn prefix(&self) -> &'static str {
        "[customer]"
    }
}

/// SQL 数据访问实现
#[derive(Debug, Default, Component)]
#[component(default, export = dyn CustomerDal)]
pub struct SqlCustomerDal;

impl CustomerDal for SqlCustomerDal {
    fn find_name(&self, id: u32) -> String {
        format!("customer-{id}")
    }
}

/// 构造注入的业务层
#[derive(Component)]
#[component(import_constructor)]
pub struct CustomerBll {
    dal: Box<dyn CustomerDal>,
    logger: Box<Logger>,
}

#[component_constructors]
impl CustomerBll {
    pub fn new(dal: Box<dyn CustomerDal>, logger: Box<Logger>) -> Self {
        Self { dal, logger }
    }

    pub fn describe(&self) -> String {
        format!("{} {}", self.logger.prefix(), self.dal.find_name(1))
    }
}

/// 属性注入的业务层
#[derive(Default, Component)]
#[component(default)]
pub struct SecondCustomerBll {
    #[import]
    customer_dal: Option<Box<dyn CustomerDal>>,
    #[import]
    logger: Option<Box<Logger>>,
}

impl SecondCustomerBll {
    pub fn describe(&self) -> String {
        match (&self.logger, &self.customer_dal) {
            (Some(logger), Some(dal)) => format!("{} {}", logger.prefix(), dal.find_name(2)),
            _ => "依赖未注入".to_string(),
        }
    }
}

/// 不带任何注入标记
#[derive(Debug, Default, Component)]
#[component(default)]
pub struct AuditTrail;
