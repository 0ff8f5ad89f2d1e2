#![allow(dead_code)]

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use ruyi_reflect::{HasStaticType, Modifiers, StructTypeBuilder, Type, TypeTable};

/// A `Base { x }` / `Derived: Base { y }` hierarchy registered in its own table.
pub struct Hierarchy {
    pub base: Type,
    pub derived: Type,
    pub table: Arc<TypeTable>,
}

pub fn hierarchy(package: &str) -> Hierarchy {
    let base = StructTypeBuilder::new(format!("{package}::Base"))
        .add_field("x", i32::type_info().clone(), Modifiers::PUBLIC)
        .add_method(
            "describe",
            [],
            String::type_info().clone(),
            Modifiers::PUBLIC,
        )
        .finish()
        .unwrap();
    let derived = StructTypeBuilder::new(format!("{package}::Derived"))
        .set_super_type(base.clone())
        .add_field("y", f64::type_info().clone(), Modifiers::PRIVATE)
        .add_method(
            "scale",
            [f64::type_info().clone()],
            <()>::type_info().clone(),
            Modifiers::PUBLIC | Modifiers::FINAL,
        )
        .finish()
        .unwrap();

    let mut table = TypeTable::new(package);
    table.insert_type(base.clone()).unwrap();
    table.insert_type(derived.clone()).unwrap();

    Hierarchy {
        base,
        derived,
        table: Arc::new(table),
    }
}

/// Records the order in which type initializers run.
#[derive(Clone, Default)]
pub struct InitLog {
    counter: Arc<AtomicUsize>,
    order: Arc<parking_lot::Mutex<Vec<String>>>,
}

impl InitLog {
    pub fn record(&self, ty: &Type) {
        self.counter.fetch_add(1, Ordering::SeqCst);
        self.order.lock().push(ty.name().to_owned());
    }

    pub fn count(&self) -> usize {
        self.counter.load(Ordering::SeqCst)
    }

    pub fn order(&self) -> Vec<String> {
        self.order.lock().clone()
    }
}

/// Builds a single-type table named `name` holding a struct type of the given name.
pub fn table_with(name: &str, type_name: &str) -> (Type, Arc<TypeTable>) {
    let ty = StructTypeBuilder::new(type_name).finish().unwrap();
    let mut table = TypeTable::new(name);
    table.insert_type(ty.clone()).unwrap();
    (ty, Arc::new(table))
}
