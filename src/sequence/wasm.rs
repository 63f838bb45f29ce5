//! WASM bindings for the sequence module.
//!
//! This module provides a JavaScript-friendly wrapper around the core
//! `MianChowla` engine for use in browser environments.

use js_sys::BigUint64Array;
use serde::Serialize;
use serde_wasm_bindgen::Serializer;
use wasm_bindgen::prelude::*;

use crate::error::SequenceError;
use super::engine::MianChowla;

/// Serialize a value to JsValue with maps as plain JS objects (not Map).
/// Integers become BigInt so they match the scalar getters.
fn to_js_value<T: Serialize>(value: &T) -> Result<JsValue, serde_wasm_bindgen::Error> {
    value.serialize(
        &Serializer::new()
            .serialize_maps_as_objects(true)
            .serialize_large_number_types_as_bigints(true),
    )
}

/// Converts terms or differences to a `BigUint64Array`, keeping full u64 precision.
fn to_js_array(values: impl IntoIterator<Item = u64>) -> BigUint64Array {
    let values: Vec<u64> = values.into_iter().collect();
    BigUint64Array::from(values.as_slice())
}

/// Zero means "no limit", matching the native API.
fn bound(max_terms: Option<u32>) -> Option<usize> {
    max_terms.map(|m| m as usize)
}

// =============================================================================
// ERROR CONVERSION
// =============================================================================

impl From<SequenceError> for JsValue {
    fn from(err: SequenceError) -> JsValue {
        JsValue::from_str(&err.to_string())
    }
}

/// Helper macro for Result conversion
macro_rules! js_result {
    ($expr:expr) => {
        $expr.map_err(|e: SequenceError| JsValue::from(e))
    };
}

// =============================================================================
// MAIN WRAPPER TYPE
// =============================================================================

/// JavaScript-friendly wrapper around `MianChowla`.
#[wasm_bindgen]
pub struct JsMianChowla {
    inner: MianChowla,
}

#[wasm_bindgen]
impl JsMianChowla {
    /// Creates a new, empty engine.
    ///
    /// # Example (JavaScript)
    /// ```js
    /// const mc = new JsMianChowla();
    /// ```
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsMianChowla {
        JsMianChowla {
            inner: MianChowla::new(),
        }
    }

    /// Number of terms generated so far.
    #[wasm_bindgen(getter)]
    pub fn length(&self) -> usize {
        self.inner.len()
    }

    /// Gets the term at a zero-based index, generating terms as needed.
    ///
    /// # Example (JavaScript)
    /// ```js
    /// mc.term(5); // 21n
    /// ```
    pub fn term(&mut self, index: usize) -> Result<u64, JsValue> {
        js_result!(self.inner.term(index))
    }

    /// Gets the terms at indices `0..=index` as an array.
    #[wasm_bindgen(js_name = termsUpTo)]
    pub fn terms_up_to(&mut self, index: usize) -> Result<BigUint64Array, JsValue> {
        let terms = js_result!(self.inner.terms_up_to(index))?;
        Ok(to_js_array(terms))
    }

    /// Gets the most recently generated term. Throws on an empty engine.
    #[wasm_bindgen(js_name = lastTerm)]
    pub fn last_term(&self) -> Result<u64, JsValue> {
        js_result!(self.inner.last_term())
    }

    /// Gets every term generated so far.
    pub fn terms(&self) -> BigUint64Array {
        to_js_array(self.inner.terms())
    }
}

// =============================================================================
// DIFFERENCE METHODS
// =============================================================================

#[wasm_bindgen]
impl JsMianChowla {
    /// Gets every difference discovered so far, in ascending order.
    pub fn differences(&self) -> BigUint64Array {
        to_js_array(self.inner.differences())
    }

    /// Gets the differences between the term at `index` and all earlier terms.
    #[wasm_bindgen(js_name = differencesForTerm)]
    pub fn differences_for_term(&mut self, index: usize) -> Result<BigUint64Array, JsValue> {
        let differences = js_result!(self.inner.differences_for_term(index))?;
        Ok(to_js_array(differences))
    }

    /// Gets the differences among the terms at indices `0..=index`.
    #[wasm_bindgen(js_name = differencesUpTo)]
    pub fn differences_up_to(&mut self, index: usize) -> Result<BigUint64Array, JsValue> {
        let differences = js_result!(self.inner.differences_up_to(index))?;
        Ok(to_js_array(differences))
    }

    /// Finds the term `t` such that `t - d` is also a term.
    ///
    /// Returns `undefined` if `d` is not realized within `maxTerms` terms.
    ///
    /// # Example (JavaScript)
    /// ```js
    /// const t = mc.findDifference(5n, 1000);
    /// if (t !== undefined) {
    ///   console.log(`5 = ${t} - ${t - 5n}`);
    /// }
    /// ```
    #[wasm_bindgen(js_name = findDifference)]
    pub fn find_difference(&mut self, d: u64, max_terms: Option<u32>) -> Result<Option<u64>, JsValue> {
        js_result!(self.inner.find_difference(d, bound(max_terms)))
    }

    /// Gets the state as a plain object `{ terms, differences }`.
    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        Ok(to_js_value(&self.inner.snapshot())?)
    }
}

impl Default for JsMianChowla {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_arrays_keep_u64_precision() {
        let big = (1u64 << 53) + 1;
        let array = to_js_array([1, big, u64::MAX]);
        assert_eq!(array.to_vec(), vec![1, big, u64::MAX]);
    }

    #[wasm_bindgen_test]
    fn test_arrays_match_scalar_getters() {
        let mut mc = JsMianChowla::new();
        let terms = mc.terms_up_to(5).unwrap();
        assert_eq!(terms.to_vec(), vec![1, 2, 4, 8, 13, 21]);
        assert_eq!(terms.get_index(5), mc.term(5).unwrap());
        assert_eq!(mc.differences_for_term(3).unwrap().to_vec(), vec![4, 6, 7]);
    }

    #[wasm_bindgen_test]
    fn test_snapshot_uses_bigints() {
        let mut mc = JsMianChowla::new();
        mc.term(2).unwrap();
        let snapshot = mc.snapshot().unwrap();
        let terms = js_sys::Reflect::get(&snapshot, &JsValue::from_str("terms")).unwrap();
        let first = js_sys::Reflect::get_u32(&terms, 0).unwrap();
        assert!(first.is_bigint());
        assert_eq!(first, JsValue::from(1u64));
    }
}
