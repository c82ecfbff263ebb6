//! Editing session tests against decoded archives.

mod common;

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

use common::{loaded_store, zip_bytes};
use zipedit::{Action, Session, SessionStore, ZipCodec};

fn project() -> SessionStore {
    loaded_store(
        "project.zip",
        &[
            ("src/main.ts", b"console.log('main')"),
            ("src/util.ts", b"export const x = 1"),
            ("docs/guide.md", b"# Guide"),
            ("assets/logo.png", &[0x89, 0x50, 0x4e, 0x47]),
        ],
    )
}

fn root_text(store: &SessionStore, path: &str) -> Option<String> {
    store
        .state()
        .root()?
        .find(path)?
        .text_content()
        .map(String::from)
}

// =============================================================================
// Dirty Flags
// =============================================================================

#[test]
fn test_dirty_lifecycle() {
    let mut store = project();

    store.dispatch(Action::select("src/main.ts"));
    assert!(!store.state().is_dirty("src/main.ts"));

    store.dispatch(Action::edit("console.log('edited')"));
    assert!(store.state().is_dirty("src/main.ts"));

    store.dispatch(Action::Save);
    assert!(!store.state().is_dirty("src/main.ts"));
    assert_eq!(
        root_text(&store, "src/main.ts").as_deref(),
        Some("console.log('edited')")
    );
    assert_eq!(
        store.state().selected().unwrap().content(),
        "console.log('edited')"
    );
}

#[test]
fn test_edit_back_to_original_is_still_dirty() {
    let mut store = project();
    store.dispatch(Action::select("docs/guide.md"));
    store.dispatch(Action::edit("# Guide!"));
    store.dispatch(Action::edit("# Guide"));
    assert!(store.state().is_dirty("docs/guide.md"));
}

#[test]
fn test_edits_are_per_path() {
    let mut store = project();
    store.dispatch(Action::select("src/main.ts"));
    store.dispatch(Action::edit("main edited"));
    store.dispatch(Action::select("src/util.ts"));
    store.dispatch(Action::edit("util edited"));
    store.dispatch(Action::Save);

    let state = store.state();
    assert!(state.is_dirty("src/main.ts"));
    assert!(!state.is_dirty("src/util.ts"));
    assert_eq!(root_text(&store, "src/main.ts").as_deref(), Some("console.log('main')"));
    assert_eq!(root_text(&store, "src/util.ts").as_deref(), Some("util edited"));
}

// =============================================================================
// Tabs
// =============================================================================

#[test]
fn test_close_dirty_tab_does_not_affect_root() {
    let mut store = project();
    let before = root_text(&store, "src/main.ts");

    store.dispatch(Action::select("src/main.ts"));
    store.dispatch(Action::edit("never saved"));
    store.dispatch(Action::close("src/main.ts"));

    assert_eq!(root_text(&store, "src/main.ts"), before);
    assert!(!store.state().has_unsaved());
}

#[test]
fn test_tab_order_is_open_order() {
    let mut store = project();
    for path in ["docs/guide.md", "src/util.ts", "src/main.ts", "docs/guide.md"] {
        store.dispatch(Action::select(path));
    }
    let tabs: Vec<_> = store.state().open_paths().collect();
    assert_eq!(tabs, vec!["docs/guide.md", "src/util.ts", "src/main.ts"]);
    assert_eq!(store.state().selected_path(), Some("docs/guide.md"));
}

#[test]
fn test_saved_content_survives_close_and_reopen() {
    let mut store = project();
    store.dispatch(Action::select("src/util.ts"));
    store.dispatch(Action::edit("export const x = 2"));
    store.dispatch(Action::Save);
    store.dispatch(Action::close("src/util.ts"));
    store.dispatch(Action::select("src/util.ts"));

    assert_eq!(store.state().selected().unwrap().content(), "export const x = 2");
    assert!(!store.state().is_dirty("src/util.ts"));
}

// =============================================================================
// Images and Binaries
// =============================================================================

#[test]
fn test_image_selection() {
    let mut store = project();
    store.dispatch(Action::select("assets/logo.png"));

    let copy = store.state().selected().unwrap();
    assert_eq!(copy.content(), "");
    assert_eq!(copy.binary_data(), Some(&[0x89, 0x50, 0x4e, 0x47][..]));
    assert!(store.state().download_selected().is_none());
}

// =============================================================================
// Structural Sharing
// =============================================================================

#[test]
fn test_save_shares_untouched_subtrees() {
    let mut store = project();
    let before = Arc::clone(store.state().root().unwrap());

    store.dispatch(Action::select("src/main.ts"));
    store.dispatch(Action::edit("changed"));
    store.dispatch(Action::Save);
    let after = store.state().root().unwrap();

    for name in ["docs", "assets"] {
        assert!(Arc::ptr_eq(
            before.child(name).unwrap(),
            after.child(name).unwrap()
        ));
    }
    let (old_src, new_src) = (before.child("src").unwrap(), after.child("src").unwrap());
    assert!(!Arc::ptr_eq(old_src, new_src));
    assert!(Arc::ptr_eq(
        old_src.child("util.ts").unwrap(),
        new_src.child("util.ts").unwrap()
    ));
}

// =============================================================================
// Reload and Notifications
// =============================================================================

#[test]
fn test_reload_discards_working_copies() {
    let mut store = project();
    store.dispatch(Action::select("src/main.ts"));
    store.dispatch(Action::edit("unsaved"));

    store
        .load_archive(&ZipCodec::new(), zip_bytes(&[("other.txt", b"o")]), "other.zip")
        .unwrap();

    let state = store.state();
    assert_eq!(state.open_paths().count(), 0);
    assert!(state.selected_path().is_none());
    assert!(!state.has_unsaved());
    assert_eq!(state.root().unwrap().name(), "other");
    assert!(state.is_expanded("/"));
}

#[test]
fn test_listeners_see_every_change() {
    let mut store = project();
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    store.subscribe(move |_: &Session| counter.set(counter.get() + 1));

    store.dispatch(Action::select("src/main.ts"));
    store.dispatch(Action::edit("x"));
    store.dispatch(Action::Save);
    store.dispatch(Action::Save);
    store.dispatch(Action::select("does/not/exist"));

    assert_eq!(calls.get(), 3);
}
