//! Conversions between Rust values and JavaScript values.

use js_sys::{Array, Object, Reflect, Uint8Array};
use wasm_bindgen::prelude::*;

use crate::tree::TreeNode;

/// Copies a Uint8Array into a Vec<u8>.
pub fn uint8_array_to_vec(data: &Uint8Array) -> Vec<u8> {
    let mut buffer = vec![0u8; data.length() as usize];
    data.copy_to(&mut buffer);
    buffer
}

/// Copies bytes into a new Uint8Array.
pub fn vec_to_uint8_array(data: &[u8]) -> Uint8Array {
    let array = Uint8Array::new_with_length(data.len() as u32);
    array.copy_from(data);
    array
}

/// Converts a crate error into a JavaScript exception value.
pub fn to_js_error(e: crate::Error) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Builds a plain `{ fileName, bytes }` object.
pub fn named_bytes(file_name: &str, bytes: &[u8]) -> Result<JsValue, JsValue> {
    let obj = Object::new();
    Reflect::set(&obj, &"fileName".into(), &JsValue::from_str(file_name))?;
    Reflect::set(&obj, &"bytes".into(), &vec_to_uint8_array(bytes))?;
    Ok(obj.into())
}

/// Converts a tree node (recursively) into a plain object.
///
/// Files carry `name`, `path`, `kind: "file"` and `contentKind`; folders
/// carry `kind: "folder"` and a `children` array. Payloads are not copied.
pub fn tree_to_js(node: &TreeNode) -> Result<JsValue, JsValue> {
    let obj = Object::new();
    Reflect::set(&obj, &"name".into(), &JsValue::from_str(node.name()))?;
    Reflect::set(&obj, &"path".into(), &JsValue::from_str(node.path()))?;

    match node.content_kind() {
        Some(kind) => {
            Reflect::set(&obj, &"kind".into(), &"file".into())?;
            Reflect::set(&obj, &"contentKind".into(), &JsValue::from_str(kind.as_str()))?;
        }
        None => {
            Reflect::set(&obj, &"kind".into(), &"folder".into())?;
            let children = Array::new();
            for child in node.children() {
                children.push(&tree_to_js(child)?);
            }
            Reflect::set(&obj, &"children".into(), &children)?;
        }
    }

    Ok(obj.into())
}
