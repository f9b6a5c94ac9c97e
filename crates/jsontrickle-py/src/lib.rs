//! Python bindings: the `jsontrickle` module with a `StreamingJsonParser`
//! class.
//!
//! ```python
//! from jsontrickle import StreamingJsonParser
//!
//! parser = StreamingJsonParser()
//! parser.consume('{"foo": "ba').consume('r"}')
//! assert parser.get() == {"foo": "bar"}
//! ```
mod pyvalue;

pub use pyvalue::object_to_py;

use ::jsontrickle::{IncrementalObjectParser, ParserOptions, PartialValueMode};
use pyo3::{prelude::*, types::PyDict};

/// Incremental parser for streamed JSON objects.
///
/// Wraps [`IncrementalObjectParser`]; see there for the parsing rules.
#[pyclass(name = "StreamingJsonParser", module = "jsontrickle")]
#[derive(Debug, Default)]
pub struct PyStreamingJsonParser {
    inner: IncrementalObjectParser,
}

#[pymethods]
impl PyStreamingJsonParser {
    /// `partial_values=False` hides string values until their closing quote
    /// arrives.
    #[new]
    #[pyo3(signature = (partial_values = true))]
    fn new(partial_values: bool) -> Self {
        let partial_values = if partial_values {
            PartialValueMode::Prefixes
        } else {
            PartialValueMode::None
        };
        Self {
            inner: IncrementalObjectParser::with_options(ParserOptions {
                partial_values,
                ..Default::default()
            }),
        }
    }

    /// Feeds the next chunk of text. Returns the parser for chaining.
    fn consume<'py>(mut slf: PyRefMut<'py, Self>, chunk: &str) -> PyRefMut<'py, Self> {
        slf.inner.consume(chunk);
        slf
    }

    /// Feeds the next chunk of UTF-8 bytes. Returns the parser for chaining.
    fn consume_bytes<'py>(mut slf: PyRefMut<'py, Self>, chunk: &[u8]) -> PyRefMut<'py, Self> {
        slf.inner.consume_bytes(chunk);
        slf
    }

    /// A fresh `dict` holding everything parsed so far.
    fn get<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        object_to_py(py, self.inner.root())
    }

    /// Discards all parsed state.
    fn reset(&mut self) {
        self.inner.reset();
    }

    /// Renders the current result as JSON text.
    #[pyo3(signature = (pretty = false))]
    fn to_json(&self, pretty: bool) -> String {
        let value = self.inner.snapshot();
        if pretty {
            format!("{value:#}")
        } else {
            value.to_string()
        }
    }

    /// Number of objects open below the root.
    #[getter]
    fn depth(&self) -> usize {
        self.inner.depth()
    }

    /// Whether a string is missing its closing quote.
    #[getter]
    fn in_string(&self) -> bool {
        self.inner.is_in_string()
    }

    fn __repr__(&self) -> String {
        format!("StreamingJsonParser({})", self.inner.snapshot())
    }
}

#[pymodule]
pub fn jsontrickle(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyStreamingJsonParser>()?;
    Ok(())
}
