mod util;

use ruyi_reflect::{
    enumerate::{list_fields, list_methods, visit_fields, visit_methods},
    Member, Method, Type,
};
use util::*;

#[test]
fn fields_of_derived_then_base() {
    let hierarchy = hierarchy("members");

    let names: Vec<_> = list_fields(&hierarchy.derived, true)
        .iter()
        .map(Member::name)
        .collect();
    assert_eq!(names, ["y", "x"]);

    let declared: Vec<_> = list_fields(&hierarchy.derived, false)
        .iter()
        .map(Member::name)
        .collect();
    assert_eq!(declared, ["y"]);
}

#[test]
fn methods_of_derived_then_base() {
    let hierarchy = hierarchy("members");

    let methods = list_methods(&hierarchy.derived, true);
    let names: Vec<_> = methods.iter().map(Member::name).collect();
    assert_eq!(names, ["scale", "describe"]);

    let scale = methods[0];
    assert_eq!(scale.declaring_type(), &hierarchy.derived);
    assert_eq!(scale.parameter_types().len(), 1);
    assert_eq!(scale.return_type().name(), "void");
    assert_eq!(methods[1].declaring_type(), &hierarchy.base);
}

#[test]
fn ancestors_never_shrink_the_list() {
    let hierarchy = hierarchy("members");
    for ty in [
        &hierarchy.base,
        &hierarchy.derived,
        Type::object(),
        Type::string(),
    ] {
        assert!(list_fields(ty, true).len() >= list_fields(ty, false).len());
        assert!(list_methods(ty, true).len() >= list_methods(ty, false).len());
    }
}

#[test]
fn visit_matches_list() {
    let hierarchy = hierarchy("members");

    let mut visited = Vec::new();
    visit_fields(
        &hierarchy.derived,
        |field| {
            visited.push(field.name());
            Ok(())
        },
        None,
        true,
    )
    .unwrap();
    let listed: Vec<_> = list_fields(&hierarchy.derived, true)
        .iter()
        .map(Member::name)
        .collect();
    assert_eq!(visited, listed);
}

#[test]
fn reject_all_filter_never_calls_the_visitor() {
    let hierarchy = hierarchy("members");

    let reject_all = |_: &Method<'_>| false;
    let mut calls = 0;
    visit_methods(
        &hierarchy.derived,
        |_| {
            calls += 1;
            Ok(())
        },
        Some(&reject_all),
        true,
    )
    .unwrap();
    assert_eq!(calls, 0);
}

#[test]
fn filter_selects_members() {
    let hierarchy = hierarchy("members");

    let without_parameters = |method: &Method<'_>| method.parameter_types().is_empty();
    let mut selected = Vec::new();
    visit_methods(
        &hierarchy.derived,
        |method| {
            selected.push(method.name());
            Ok(())
        },
        Some(&without_parameters),
        true,
    )
    .unwrap();
    assert_eq!(selected, ["describe"]);
}

#[test]
fn access_failures_name_the_member() {
    let hierarchy = hierarchy("members");
    let outsider = Type::string();

    let err = visit_fields(
        &hierarchy.derived,
        |field| Ok(field.check_access(outsider)?),
        None,
        true,
    )
    .unwrap_err();

    insta::assert_snapshot!(err.to_string(), @r###"Not allowed to access field [y]: type [core::String] cannot access field [y] of type [members::Derived] with modifiers "private""###);
}
