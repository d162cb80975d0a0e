//! 容器与派生宏的集中集成测试
//!
//! 覆盖客户业务层、数据访问层和日志组件的典型装配场景。

use ioc_abstractions::ComponentResolver;
use ioc_common::{ContainerConfig, ContainerError, TypeKey};
use ioc_container::{Assembly, Container};
use ioc_macros::{component_constructors, Component};
use std::io::Write;
use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// 初始化测试日志系统（只初始化一次）
fn init_test_logger() {
    INIT_LOGGER.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("debug")
            .with_test_writer()
            .try_init()
            .ok();
    });
}

pub trait CustomerDal: Send + Sync {
    fn source(&self) -> &'static str;
}

pub trait CustomerService: Send + Sync {
    fn is_wired(&self) -> bool;
}

#[derive(Debug, Default, Component)]
#[component(default, export)]
pub struct Logger;

#[derive(Debug, Default, Component)]
#[component(default, export = dyn CustomerDal)]
pub struct SqlCustomerDal;

impl CustomerDal for SqlCustomerDal {
    fn source(&self) -> &'static str {
        "sql"
    }
}

/// 构造注入
#[derive(Component)]
#[component(import_constructor)]
pub struct CustomerBll {
    dal: Box<dyn CustomerDal>,
    #[allow(dead_code)]
    logger: Box<Logger>,
}

#[component_constructors]
impl CustomerBll {
    pub fn new(dal: Box<dyn CustomerDal>, logger: Box<Logger>) -> Self {
        Self { dal, logger }
    }
}

/// 属性注入
#[derive(Default, Component)]
#[component(default, export = dyn CustomerService)]
pub struct SecondCustomerBll {
    #[import]
    customer_dal: Option<Box<dyn CustomerDal>>,
    #[import]
    logger: Option<Box<Logger>>,
}

impl CustomerService for SecondCustomerBll {
    fn is_wired(&self) -> bool {
        self.customer_dal.is_some() && self.logger.is_some()
    }
}

/// 未带任何标记
#[derive(Default, Component)]
#[component(default)]
pub struct ReportPrinter;

fn customer_assembly() -> Assembly {
    Assembly::new("customers")
        .with::<Logger>()
        .with::<SqlCustomerDal>()
        .with::<CustomerBll>()
        .with::<SecondCustomerBll>()
        .with::<ReportPrinter>()
}

#[test]
fn test_assembly_constructor_dependencies() {
    init_test_logger();
    let mut container = Container::new();
    container.add_assembly(&customer_assembly()).unwrap();

    let erased = container.resolve_type(TypeKey::of::<CustomerBll>()).unwrap();
    assert_eq!(erased.concrete_type(), TypeKey::of::<CustomerBll>());

    let bll = container.resolve::<CustomerBll>().unwrap();
    assert_eq!(bll.dal.source(), "sql");
}

#[test]
fn test_assembly_property_dependencies() {
    init_test_logger();
    let mut container = Container::new();
    container.add_assembly(&customer_assembly()).unwrap();

    let erased = container.resolve_type(TypeKey::of::<SecondCustomerBll>()).unwrap();
    assert_eq!(erased.concrete_type(), TypeKey::of::<SecondCustomerBll>());

    let bll = container.resolve::<SecondCustomerBll>().unwrap();
    assert!(bll.is_wired());
}

#[test]
fn test_assembly_skips_unmarked_components() {
    init_test_logger();
    let mut container = Container::new();
    let added = container.add_assembly(&customer_assembly()).unwrap();

    // Logger, dyn CustomerDal, CustomerBll, SecondCustomerBll, dyn CustomerService
    assert_eq!(added, 5);
    assert!(!container.is_registered::<ReportPrinter>());
    assert!(container.resolve::<ReportPrinter>().err().unwrap().is_unregistered());
}

#[test]
fn test_add_type_property_dependencies() {
    init_test_logger();
    let mut container = Container::new();
    container.add_type::<SecondCustomerBll>().unwrap();
    container.add_type::<Logger>().unwrap();
    container.add_type_as::<dyn CustomerDal, SqlCustomerDal>().unwrap();

    let bll = container.resolve::<SecondCustomerBll>().unwrap();
    let dal = bll.customer_dal.as_ref().unwrap();
    assert_eq!(dal.source(), "sql");
    assert!(bll.logger.is_some());

    let dal = container.resolve_type(TypeKey::of::<dyn CustomerDal>()).unwrap();
    assert_eq!(dal.concrete_type(), TypeKey::of::<SqlCustomerDal>());
}

#[test]
fn test_properties_follow_requested_type() {
    init_test_logger();
    let mut container = Container::new();
    container.add_assembly(&customer_assembly()).unwrap();

    // dyn CustomerService 自身没有注入属性，所以不做属性注入
    let service = container.resolve::<dyn CustomerService>().unwrap();
    assert!(!service.is_wired());

    let concrete = container.resolve::<SecondCustomerBll>().unwrap();
    assert!(concrete.is_wired());
}

#[test]
fn test_missing_dependency_names_requested_type() {
    init_test_logger();
    let mut container = Container::new();
    container.add_type::<CustomerBll>().unwrap();
    container.add_type_as::<dyn CustomerDal, SqlCustomerDal>().unwrap();

    let err = container.resolve::<CustomerBll>().err().unwrap();
    let message = err.to_string();
    assert!(err.is_unregistered());
    assert!(message.contains("CustomerBll"));
    assert!(message.contains("Logger"));
}

#[test]
fn test_duplicate_assembly_is_rejected() {
    init_test_logger();
    let mut container = Container::new();
    container.add_assembly(&customer_assembly()).unwrap();
    let before = container.registrations();

    let err = container.add_assembly(&customer_assembly()).unwrap_err();
    assert!(matches!(err, ContainerError::DuplicateRegistration { .. }));
    assert_eq!(container.registrations(), before);
}

/// 互相依赖的组件
#[derive(Component)]
#[component(import_constructor)]
pub struct Orders(#[allow(dead_code)] Box<Invoices>);

#[component_constructors]
impl Orders {
    pub fn new(invoices: Box<Invoices>) -> Self {
        Self(invoices)
    }
}

#[derive(Component)]
#[component(import_constructor)]
pub struct Invoices(#[allow(dead_code)] Box<Orders>);

#[component_constructors]
impl Invoices {
    pub fn new(orders: Box<Orders>) -> Self {
        Self(orders)
    }
}

#[test]
fn test_cycle_guard_from_config_file() -> anyhow::Result<()> {
    init_test_logger();
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile()?;
    writeln!(file, "[container]")?;
    writeln!(file, "detect_cycles = true")?;
    writeln!(file, "log_resolutions = false")?;

    let config = ContainerConfig::load(file.path())?;
    assert!(config.detect_cycles);
    assert!(!config.log_resolutions);

    let mut container = Container::builder().with_config(config).build();
    container.add_type::<Orders>()?;
    container.add_type::<Invoices>()?;

    let err = container.resolve::<Orders>().err().unwrap();
    assert!(matches!(err, ContainerError::CircularDependency { .. }));
    Ok(())
}
