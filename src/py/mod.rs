use std::path::PathBuf;

use log::debug;
use pyo3::exceptions::PyValueError;
use pyo3::types::PyDict;
use pyo3::{pyclass, pymethods, pymodule, types::PyModule, PyErr, PyResult, Python};

use crate::base::{Count, Depth};
use crate::error::Error;
use crate::query::DepthCount;
use crate::reader::ReaderOptions;
use crate::VideoCounts;

impl From<Error> for PyErr {
    fn from(err: Error) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

#[pyclass(name = "VideoCounts")]
pub struct PyVideoCounts {
    counts: VideoCounts<String, String>,
}

fn counts_dict<'py>(py: Python<'py>, counts: &[DepthCount]) -> PyResult<&'py PyDict> {
    let dict = PyDict::new(py);
    for count in counts {
        dict.set_item(count.depth, count.users)?;
    }
    Ok(dict)
}

#[pymethods]
impl PyVideoCounts {
    #[new]
    fn new(videos: Vec<String>) -> PyResult<Self> {
        debug!("Creating video counts for {} videos", videos.len());
        Ok(Self {
            counts: VideoCounts::new(videos)?,
        })
    }

    /// Adds a view, returns the new depth of the user if it changed
    fn add_view(&mut self, video: String, user: String) -> PyResult<Option<Depth>> {
        Ok(self.counts.add_view(&video, &user)?)
    }

    /// Reads a comma separated log file (video, user)
    fn read_file(&mut self, path: PathBuf) -> PyResult<Count> {
        let stats = self
            .counts
            .read_file(&path, &ReaderOptions::default())
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(stats.events)
    }

    fn at_least(&self, depth: Depth) -> PyResult<Count> {
        Ok(self.counts.at_least(depth)?)
    }

    fn exactly(&self, depth: Depth) -> PyResult<Count> {
        Ok(self.counts.exactly(depth)?)
    }

    /// Returns a dictionary with the `at_least` and `exactly` counts
    fn report<'py>(&self, py: Python<'py>) -> PyResult<&'py PyDict> {
        let report = self.counts.report()?;
        let dict = PyDict::new(py);
        dict.set_item("at_least", counts_dict(py, &report.at_least)?)?;
        dict.set_item("exactly", counts_dict(py, &report.exactly)?)?;
        Ok(dict)
    }
}

/// A Python module implemented in Rust.
#[pymodule]
fn watch_depth(_py: Python, m: &PyModule) -> PyResult<()> {
    pyo3_log::init();

    m.add_class::<PyVideoCounts>()?;
    Ok(())
}
