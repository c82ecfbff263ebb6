//! WASM/Browser support for zipedit
//!
//! This module provides WebAssembly bindings so a browser page can drive an
//! editing session: upload an archive, browse and edit it, and download the
//! result.
//!
//! # Features
//!
//! - **WasmSession**: JavaScript-exposed editing session
//! - **Async/Promise API**: Promise-based load and export
//! - **Helpers**: file classification and editor language hints
//!
//! # Example (JavaScript)
//!
//! ```javascript
//! import { WasmSession, languageHint } from 'zipedit';
//!
//! const session = new WasmSession();
//! await session.loadArchiveAsync(uint8ArrayData, 'project.zip');
//!
//! const tree = session.tree();            // { name, path, kind, children }
//! session.select('src/main.ts');
//! session.edit('console.log("edited");');
//! session.save();
//!
//! const { fileName, bytes } = await session.exportArchiveAsync();
//! ```

mod async_api;
mod file;
mod session;

// Re-export main types for wasm-bindgen
pub use session::WasmSession;

use wasm_bindgen::prelude::*;

/// Get the library version
#[wasm_bindgen(js_name = "getVersion")]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Classify a file name as "text", "image" or "binary".
#[wasm_bindgen(js_name = "classifyName")]
pub fn classify_name(name: &str) -> String {
    crate::classify(name).as_str().to_string()
}

/// Get the editor language for a file name.
#[wasm_bindgen(js_name = "languageHint")]
pub fn language_hint(name: &str) -> String {
    crate::language_hint(name).to_string()
}
