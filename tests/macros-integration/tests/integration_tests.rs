//! 派生宏生成的组件描述符测试

use ioc_common::{ConstructorSet, Injectable, TypeKey};
use ioc_macros::{component_constructors, Component};
use std::fmt;

pub trait Notifier: Send + Sync {
    fn channel(&self) -> &'static str;
}

pub trait Auditor: Send + Sync {}

#[derive(Default, Component)]
#[component(default, export, export = dyn Notifier, export = dyn Auditor)]
pub struct MailNotifier;

impl Notifier for MailNotifier {
    fn channel(&self) -> &'static str {
        "mail"
    }
}

impl Auditor for MailNotifier {}

#[derive(Debug)]
pub struct InvalidAddress;

impl fmt::Display for InvalidAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid address")
    }
}

impl std::error::Error for InvalidAddress {}

#[derive(Component)]
#[component(import_constructor)]
pub struct Dispatcher {
    notifier: Box<dyn Notifier>,
    retries: u32,
    #[import]
    fallback: Option<Box<dyn Notifier>>,
}

#[component_constructors]
impl Dispatcher {
    pub fn new(notifier: Box<dyn Notifier>, retries: u32) -> Self {
        Self {
            notifier,
            retries,
            fallback: None,
        }
    }

    pub fn with_address(address: String) -> Result<Self, InvalidAddress> {
        if address.contains('@') {
            Ok(Self::new(Box::new(MailNotifier), 0))
        } else {
            Err(InvalidAddress)
        }
    }

    pub fn retries(&self) -> u32 {
        self.retries
    }

    #[allow(dead_code)]
    fn internal() -> Self {
        Self::new(Box::new(MailNotifier), 1)
    }
}

#[derive(Default, Component)]
#[component(default)]
pub struct Settings {
    #[import]
    threshold: Option<u32>,
}

#[test]
fn test_default_constructor_and_exports() {
    let descriptor = MailNotifier::descriptor();

    assert_eq!(descriptor.type_key(), TypeKey::of::<MailNotifier>());
    assert!(!descriptor.uses_constructor_injection());
    assert_eq!(descriptor.constructors().len(), 1);
    assert_eq!(descriptor.constructors()[0].name(), "default");

    let exported: Vec<TypeKey> = descriptor
        .exports()
        .iter()
        .map(|export| export.requested_type(descriptor.type_key()))
        .collect();
    assert_eq!(
        exported,
        vec![
            TypeKey::of::<MailNotifier>(),
            TypeKey::of::<dyn Notifier>(),
            TypeKey::of::<dyn Auditor>(),
        ]
    );
    assert!(!descriptor.exports()[0].has_coercion());
    assert!(descriptor.exports()[1].has_coercion());
}

#[test]
fn test_constructor_set_keeps_declaration_order() {
    let constructors = Dispatcher::constructors();
    let names: Vec<_> = constructors.iter().map(|c| c.name()).collect();

    assert_eq!(names, vec!["new", "with_address"]);
    assert_eq!(
        constructors[0].parameters(),
        &[TypeKey::of::<dyn Notifier>(), TypeKey::of::<u32>()]
    );
    assert_eq!(constructors[1].parameters(), &[TypeKey::of::<String>()]);
}

#[test]
fn test_constructor_invocation() {
    use ioc_common::{Arguments, ConstructionError, Instance};

    let constructors = Dispatcher::constructors();
    let notifier: Box<dyn Notifier> = Box::new(MailNotifier);
    let args = Arguments::new(vec![
        Instance::from_view(notifier, TypeKey::of::<MailNotifier>()),
        Instance::new(3_u32),
    ]);
    let dispatcher = constructors[0]
        .invoke(args)
        .unwrap()
        .downcast::<Dispatcher>()
        .ok()
        .unwrap();
    assert_eq!(dispatcher.retries(), 3);
    assert_eq!(dispatcher.notifier.channel(), "mail");

    let err = constructors[1]
        .invoke(Arguments::new(vec![Instance::new("nobody".to_string())]))
        .unwrap_err();
    assert!(matches!(err, ConstructionError::Failed { .. }));
}

#[test]
fn test_import_fields_and_marker() {
    let descriptor = Dispatcher::descriptor();

    assert!(descriptor.uses_constructor_injection());
    assert_eq!(descriptor.properties().len(), 1);
    assert_eq!(descriptor.properties()[0].name(), "fallback");
    assert_eq!(
        descriptor.properties()[0].property_type(),
        TypeKey::of::<dyn Notifier>()
    );
    assert!(descriptor.qualifies_for_scan());
}

#[test]
fn test_unboxed_import_field() {
    let descriptor = Settings::descriptor();
    let property = &descriptor.properties()[0];
    assert_eq!(property.property_type(), TypeKey::of::<u32>());

    let mut instance = ioc_common::Instance::new(Settings::default());
    property
        .inject(&mut instance, ioc_common::Instance::new(7_u32))
        .unwrap();
    let settings = instance.downcast::<Settings>().ok().unwrap();
    assert_eq!(settings.threshold, Some(7));
}

#[test]
fn test_resolve_through_container() {
    use ioc_common::{ComponentDescriptor, Constructor};

    let mut container = ioc_container::Container::new();
    container.add_descriptor(
        ComponentDescriptor::builder::<u32>()
            .constructor(Constructor::nullary("retries", || 2_u32))
            .build(),
    );
    container.add_type_key(TypeKey::of::<u32>()).unwrap();
    container.add_type_as::<dyn Notifier, MailNotifier>().unwrap();
    container.add_type::<Dispatcher>().unwrap();

    let dispatcher = container.resolve::<Dispatcher>().unwrap();
    assert_eq!(dispatcher.retries(), 2);
    assert_eq!(dispatcher.notifier.channel(), "mail");
    assert!(dispatcher.fallback.is_none());
}
