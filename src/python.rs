// ==================== PYO3 BINDINGS ====================

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use crate::config::{timeout_from_secs, Config};
use crate::error::GiftError;
use crate::models::Product;
use crate::price_range::PriceRange;
use crate::selector::Selection;
use crate::GiftFinder;

fn to_py_err(e: GiftError) -> PyErr {
    if e.is_upstream() {
        PyRuntimeError::new_err(e.to_string())
    } else {
        PyValueError::new_err(e.to_string())
    }
}

fn build_config(site: Option<String>, timeout_secs: Option<f64>) -> Result<Config, GiftError> {
    let mut config = Config::from_env()?;
    if let Some(site) = site {
        config = config.with_site(site);
    }
    if let Some(secs) = timeout_secs {
        config = config.with_timeout(Some(timeout_from_secs(secs)?));
    }
    config.validate()?;
    Ok(config)
}

fn block_on<F: std::future::Future>(future: F) -> PyResult<F::Output> {
    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| PyRuntimeError::new_err(format!("tokio runtime: {e}")))?;
    Ok(runtime.block_on(future))
}

fn product_dict<'py>(py: Python<'py>, product: Product) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new_bound(py);
    dict.set_item("display_price", product.display_price())?;
    dict.set_item("id", product.id)?;
    dict.set_item("title", product.title)?;
    dict.set_item("price", product.price)?;
    dict.set_item("thumbnail", product.thumbnail)?;
    dict.set_item("permalink", product.permalink)?;
    Ok(dict)
}

#[pyfunction]
#[pyo3(signature = (site=None, timeout_secs=None))]
fn list_categories(
    py: Python,
    site: Option<String>,
    timeout_secs: Option<f64>,
) -> PyResult<PyObject> {
    let config = build_config(site, timeout_secs).map_err(to_py_err)?;
    let finder = GiftFinder::from_config(&config).map_err(to_py_err)?;

    let categories = py.allow_threads(|| block_on(finder.categories()))?;

    let list = PyList::empty_bound(py);
    for category in categories {
        let dict = PyDict::new_bound(py);
        dict.set_item("id", category.id)?;
        dict.set_item("name", category.name)?;
        list.append(dict)?;
    }
    Ok(list.into())
}

#[pyfunction]
#[pyo3(signature = (category_id, price_range, site=None, timeout_secs=None))]
fn suggest_gift(
    py: Python,
    category_id: String,
    price_range: String,
    site: Option<String>,
    timeout_secs: Option<f64>,
) -> PyResult<PyObject> {
    if category_id.trim().is_empty() {
        return Err(PyValueError::new_err("category_id is required"));
    }
    let range = PriceRange::from_token(&price_range).ok_or_else(|| {
        let known: Vec<_> = PriceRange::ALL.iter().map(|r| r.token()).collect();
        PyValueError::new_err(format!(
            "unknown price_range {price_range:?}, expected one of {known:?}"
        ))
    })?;

    let config = build_config(site, timeout_secs).map_err(to_py_err)?;
    let finder = GiftFinder::from_config(&config).map_err(to_py_err)?;

    let selection = py.allow_threads(|| block_on(finder.suggest(&category_id, Some(range))))?;

    let dict = PyDict::new_bound(py);
    match selection {
        Selection::Found(product) => {
            dict.set_item("outcome", "found")?;
            dict.set_item("product", product_dict(py, product)?)?;
        }
        Selection::NoMatches => {
            dict.set_item("outcome", "no_matches")?;
        }
        Selection::FetchFailed(e) => {
            dict.set_item("outcome", "fetch_failed")?;
            dict.set_item("error", e.to_string())?;
        }
    }
    Ok(dict.into())
}

/// `(token, label)` pairs in selector order.
#[pyfunction]
fn price_ranges() -> Vec<(&'static str, &'static str)> {
    PriceRange::ALL.iter().map(|r| (r.token(), r.label())).collect()
}

#[pymodule]
fn gift_finder(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(list_categories, m)?)?;
    m.add_function(wrap_pyfunction!(suggest_gift, m)?)?;
    m.add_function(wrap_pyfunction!(price_ranges, m)?)?;
    Ok(())
}
