use ioc_common::Injectable;
use ioc_macros::{component_constructors, Component};

pub trait Store: Send + Sync {}

#[derive(Default, Component)]
#[component(default, export = dyn Store)]
pub struct MemoryStore;

impl Store for MemoryStore {}

#[derive(Component)]
#[component(import_constructor, export)]
pub struct Catalog {
    #[allow(dead_code)]
    store: Box<dyn Store>,
}

#[component_constructors]
impl Catalog {
    pub fn new(store: Box<dyn Store>) -> Self {
        Self { store }
    }
}

fn main() {
    assert!(MemoryStore::descriptor().qualifies_for_scan());
    assert!(Catalog::descriptor().uses_constructor_injection());
}
