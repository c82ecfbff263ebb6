//! Promise-based loading for WASM.
//!
//! Decoding happens after a yield to the event loop so the page can repaint
//! (for example to show a spinner) before the work starts.

use js_sys::{Promise, Uint8Array};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, future_to_promise};

use super::file::{named_bytes, to_js_error, uint8_array_to_vec};
use super::session::WasmSession;
use crate::codec::ArchiveCodec;

#[wasm_bindgen]
impl WasmSession {
    /// Load an archive asynchronously.
    ///
    /// If another load is started before this one finishes, this one's
    /// result is discarded and the promise resolves to false.
    ///
    /// @param data - Archive bytes
    /// @param fileName - Name of the uploaded file
    /// @returns A Promise resolving to true if the archive was loaded
    ///
    /// # JavaScript Example
    ///
    /// ```javascript
    /// try {
    ///     await session.loadArchiveAsync(bytes, file.name);
    /// } catch (e) {
    ///     showError(`Could not open ${file.name}: ${e}`);
    /// }
    /// ```
    #[wasm_bindgen(js_name = "loadArchiveAsync")]
    pub fn load_archive_async(&self, data: Uint8Array, file_name: String) -> Promise {
        let bytes = uint8_array_to_vec(&data);
        let ticket = self.store.borrow_mut().begin_load(file_name.clone());
        let store = self.store.clone();
        let codec = self.codec.clone();

        future_to_promise(async move {
            yield_to_event_loop().await;

            let result = codec
                .decode(&bytes)
                .map(|decoded| decoded.into_tree(&file_name));
            let committed = store
                .borrow_mut()
                .complete_load(ticket, result)
                .map_err(to_js_error)?;
            Ok(JsValue::from_bool(committed))
        })
    }

    /// Encode the current tree asynchronously.
    ///
    /// @returns A Promise resolving to `{ fileName, bytes }`, or null
    #[wasm_bindgen(js_name = "exportArchiveAsync")]
    pub fn export_archive_async(&self) -> Promise {
        let store = self.store.clone();
        let codec = self.codec.clone();

        future_to_promise(async move {
            yield_to_event_loop().await;

            let exported = store
                .borrow()
                .export_archive(&codec)
                .map_err(to_js_error)?;
            match exported {
                Some(exported) => named_bytes(&exported.file_name, &exported.bytes),
                None => Ok(JsValue::NULL),
            }
        })
    }
}

/// Yield to the event loop.
async fn yield_to_event_loop() {
    let promise = Promise::resolve(&JsValue::NULL);
    let _ = JsFuture::from(promise).await;
}
