//! The library loader is process-wide, so everything touching it lives in a single test.

mod util;

use std::{sync::Arc, thread};

use ruyi_reflect::{
    loader::{
        default_loader, install_library_loader, library_loader, scoped_context_loader,
        system_loader,
    },
    resolve::{for_name, is_type_present},
    TypeTable,
};
use util::*;

#[test]
fn context_beats_library_beats_system() {
    assert!(library_loader().is_none());
    assert_eq!(default_loader().name(), "system");

    let (library_type, _) = table_with("unused", "shared::Plugin");
    let mut library = TypeTable::with_parent("library", system_loader());
    library.insert_type(library_type.clone()).unwrap();
    assert!(install_library_loader(Some(Arc::new(library))).is_none());
    assert_eq!(default_loader().name(), "library");

    // The library loader is visible from every thread
    let found = thread::spawn(|| is_type_present("shared::Plugin", None).unwrap())
        .join()
        .unwrap();
    assert!(found);
    assert!(is_type_present("core::String", None).unwrap());

    {
        let (context_type, context) = table_with("context", "shared::Plugin");
        let _guard = scoped_context_loader(context);
        assert_eq!(default_loader().name(), "context");
        assert_eq!(for_name("shared::Plugin", None).unwrap(), Some(context_type));
    }

    assert_eq!(for_name("shared::Plugin", None).unwrap(), Some(library_type));

    let previous = install_library_loader(None).unwrap();
    assert_eq!(previous.name(), "library");
    assert_eq!(default_loader().name(), "system");
    assert!(!is_type_present("shared::Plugin", None).unwrap());
}
