//! JavaScript-exposed editing session.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Array, Object, Reflect, Uint8Array};
use wasm_bindgen::prelude::*;

use super::file::{named_bytes, to_js_error, tree_to_js, uint8_array_to_vec, vec_to_uint8_array};
use crate::codec::{Compression, DecodeOptions, EncodeOptions, ZipCodec};
use crate::session::{Action, SessionStore};

/// An archive editing session exposed to JavaScript.
///
/// # JavaScript Example
///
/// ```javascript
/// const session = new WasmSession();
/// session.loadArchive(new Uint8Array(await file.arrayBuffer()), file.name);
///
/// session.select('src/index.ts');
/// const doc = session.editorDocument();   // { text, language }
/// session.edit(doc.text + '\n// edited');
/// session.save();
///
/// const { fileName, bytes } = session.exportArchive();
/// ```
#[wasm_bindgen]
pub struct WasmSession {
    pub(super) store: Rc<RefCell<SessionStore>>,
    pub(super) codec: ZipCodec,
}

#[wasm_bindgen]
impl WasmSession {
    /// Create an empty session.
    ///
    /// @param materializeDirectories - Keep explicit empty folders from archives
    #[wasm_bindgen(constructor)]
    pub fn new(materialize_directories: Option<bool>) -> WasmSession {
        let decode = DecodeOptions::new()
            .materialize_directories(materialize_directories.unwrap_or(false));
        Self {
            store: Rc::new(RefCell::new(SessionStore::new())),
            codec: ZipCodec::new().with_decode_options(decode),
        }
    }

    /// Set the compression used by `exportArchive`.
    ///
    /// @param method - "stored" or "deflated"
    /// @param level - Optional level 0-9 for deflated
    /// @throws Error if the level is out of range
    #[wasm_bindgen(js_name = "setCompression")]
    pub fn set_compression(&mut self, method: &str, level: Option<u32>) -> Result<(), JsValue> {
        let compression = match method.to_lowercase().as_str() {
            "stored" | "store" | "copy" => Compression::Stored,
            "deflated" | "deflate" => Compression::Deflated,
            other => {
                return Err(JsValue::from_str(&format!(
                    "Unknown compression method: {}",
                    other
                )));
            }
        };
        let mut options = EncodeOptions::new().compression(compression);
        if let Some(level) = level {
            options = options.level(level).map_err(to_js_error)?;
        }
        self.codec = self.codec.clone().with_encode_options(options);
        Ok(())
    }

    /// Load an archive, replacing the current session.
    ///
    /// @param data - Archive bytes
    /// @param fileName - Name of the uploaded file
    /// @throws Error if the archive cannot be opened (session unchanged)
    #[wasm_bindgen(js_name = "loadArchive")]
    pub fn load_archive(&self, data: Uint8Array, file_name: &str) -> Result<(), JsValue> {
        let bytes = uint8_array_to_vec(&data);
        self.store
            .borrow_mut()
            .load_archive(&self.codec, bytes, file_name)
            .map_err(to_js_error)
    }

    /// Encode the current tree.
    ///
    /// @returns `{ fileName, bytes }`, or null when nothing is loaded
    /// @throws Error if encoding fails
    #[wasm_bindgen(js_name = "exportArchive")]
    pub fn export_archive(&self) -> Result<JsValue, JsValue> {
        match self
            .store
            .borrow()
            .export_archive(&self.codec)
            .map_err(to_js_error)?
        {
            Some(exported) => named_bytes(&exported.file_name, &exported.bytes),
            None => Ok(JsValue::NULL),
        }
    }

    /// Select a file (opening a tab) or toggle a folder.
    pub fn select(&self, path: &str) {
        self.store.borrow_mut().dispatch(Action::select(path));
    }

    /// Replace the selected file's text.
    pub fn edit(&self, content: String) {
        self.store.borrow_mut().dispatch(Action::Edit(content));
    }

    /// Save the selected file into the tree.
    pub fn save(&self) {
        self.store.borrow_mut().dispatch(Action::Save);
    }

    /// Close a tab, dropping unsaved edits.
    #[wasm_bindgen(js_name = "closeTab")]
    pub fn close_tab(&self, path: &str) {
        self.store.borrow_mut().dispatch(Action::close(path));
    }

    /// Expand or collapse a folder.
    #[wasm_bindgen(js_name = "toggleExpand")]
    pub fn toggle_expand(&self, path: &str) {
        self.store.borrow_mut().dispatch(Action::toggle_expand(path));
    }

    /// Open tab paths in order.
    #[wasm_bindgen(js_name = "openTabs")]
    pub fn open_tabs(&self) -> Array {
        let tabs = Array::new();
        for path in self.store.borrow().state().open_paths() {
            tabs.push(&JsValue::from_str(path));
        }
        tabs
    }

    /// Whether `path` has unsaved edits.
    #[wasm_bindgen(js_name = "isDirty")]
    pub fn is_dirty(&self, path: &str) -> bool {
        self.store.borrow().state().is_dirty(path)
    }

    /// Whether any open tab has unsaved edits.
    #[wasm_bindgen(js_name = "hasUnsaved")]
    pub fn has_unsaved(&self) -> bool {
        self.store.borrow().state().has_unsaved()
    }

    /// Whether the folder at `path` is expanded.
    #[wasm_bindgen(js_name = "isExpanded")]
    pub fn is_expanded(&self, path: &str) -> bool {
        self.store.borrow().state().is_expanded(path)
    }

    /// The selected path, if any.
    #[wasm_bindgen(js_name = "selectedPath")]
    pub fn selected_path(&self) -> Option<String> {
        self.store.borrow().state().selected_path().map(String::from)
    }

    /// The editor input for the selection.
    ///
    /// @returns `{ text, language }`, or null when nothing is selected
    #[wasm_bindgen(js_name = "editorDocument")]
    pub fn editor_document(&self) -> Result<JsValue, JsValue> {
        let Some(doc) = self.store.borrow().state().editor_document() else {
            return Ok(JsValue::NULL);
        };
        let obj = Object::new();
        Reflect::set(&obj, &"text".into(), &JsValue::from_str(&doc.text))?;
        Reflect::set(&obj, &"language".into(), &JsValue::from_str(doc.language))?;
        Ok(obj.into())
    }

    /// Bytes of the selected image or binary file.
    #[wasm_bindgen(js_name = "selectedBinary")]
    pub fn selected_binary(&self) -> Option<Uint8Array> {
        let store = self.store.borrow();
        store
            .state()
            .selected()
            .and_then(|copy| copy.binary_data())
            .map(vec_to_uint8_array)
    }

    /// The selected text file with its current content.
    ///
    /// @returns `{ fileName, bytes }`, or null
    #[wasm_bindgen(js_name = "downloadSelected")]
    pub fn download_selected(&self) -> Result<JsValue, JsValue> {
        match self.store.borrow().state().download_selected() {
            Some(download) => named_bytes(&download.file_name, &download.bytes),
            None => Ok(JsValue::NULL),
        }
    }

    /// The file tree as nested plain objects, or null.
    pub fn tree(&self) -> Result<JsValue, JsValue> {
        match self.store.borrow().state().root() {
            Some(root) => tree_to_js(root),
            None => Ok(JsValue::NULL),
        }
    }

    /// Name of the loaded archive, if any.
    #[wasm_bindgen(js_name = "archiveName")]
    pub fn archive_name(&self) -> Option<String> {
        self.store.borrow().state().archive_name().map(String::from)
    }
}

impl Default for WasmSession {
    fn default() -> Self {
        Self::new(None)
    }
}
