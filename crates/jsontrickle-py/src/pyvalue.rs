use jsontrickle::{ObjectRef, ValueRef};
use pyo3::{prelude::*, types::PyDict};

/// Builds a `dict` from a borrowed object, recursing into nested objects.
///
/// Entries keep the parser's insertion order.
pub fn object_to_py<'py>(py: Python<'py>, object: ObjectRef<'_>) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    for (key, value) in object.iter() {
        match value {
            ValueRef::String(s) => dict.set_item(key, s)?,
            ValueRef::Object(child) => dict.set_item(key, object_to_py(py, child)?)?,
        }
    }
    Ok(dict)
}
