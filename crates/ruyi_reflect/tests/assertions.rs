mod util;

use ruyi_reflect::{
    assert::{require_instance_of, require_subtype_of, Reflect},
    ErrorKind, HasStaticType, Type,
};
use util::*;

/// A value whose type is only known at runtime.
struct Dynamic(Type);

impl Reflect for Dynamic {
    fn type_of(&self) -> Type {
        self.0.clone()
    }
}

#[test]
fn instance_of_runtime_type() {
    let hierarchy = hierarchy("assertions");
    let value = Dynamic(hierarchy.derived.clone());

    assert!(require_instance_of(Some(&value), Some(&hierarchy.base), "not a base").is_ok());
    assert!(require_instance_of(Some(&value), Some(Type::object()), "not an object").is_ok());

    let err = require_instance_of(Some(&value), Some(String::type_info()), || {
        format!("{} is not a string", value.type_of())
    })
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert_eq!(err.to_string(), "assertions::Derived is not a string");
}

#[test]
fn subtype_hierarchy() {
    let hierarchy = hierarchy("assertions");

    assert!(require_subtype_of(Some(&hierarchy.derived), Some(&hierarchy.base), "").is_ok());
    assert!(require_subtype_of(
        Some(&hierarchy.derived.array_type()),
        Some(&hierarchy.base.array_type()),
        ""
    )
    .is_ok());

    let err = require_subtype_of(Some(&hierarchy.base), Some(&hierarchy.derived), "").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert_eq!(err.to_string(), "Assertion failed");
}
