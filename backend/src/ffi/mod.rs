//! Python bindings
//!
//! Converts between Python dicts/lists and the Rust investor and state
//! types. The waterfall itself never touches Python objects.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::{PyBool, PyDict, PyList, PyString};

use crate::models::{Cap, DistributionState, Investor, InvestorConfig, ShareClass};
use crate::models::investor::DEFAULT_CAP;
use crate::orchestrator::simulate;

// ========================================================================
// PyDict Extraction Helpers
// ========================================================================

/// Extract a required field from a Python dict
fn extract_required<'py, T>(dict: &Bound<'py, PyDict>, key: &str) -> PyResult<T>
where
    T: FromPyObject<'py>,
{
    dict.get_item(key)?
        .ok_or_else(|| PyValueError::new_err(format!("Missing required field '{}'", key)))?
        .extract()
}

/// Extract an optional field; a missing key or `None` both read as absent
fn extract_optional<'py, T>(dict: &Bound<'py, PyDict>, key: &str) -> PyResult<Option<T>>
where
    T: FromPyObject<'py>,
{
    match dict.get_item(key)? {
        Some(value) if !value.is_none() => Ok(Some(value.extract()?)),
        _ => Ok(None),
    }
}

/// Cap from `None`/missing (default), `False` or `"uncapped"`, or a number
fn extract_cap(dict: &Bound<'_, PyDict>) -> PyResult<Cap> {
    let Some(value) = dict.get_item("cap")? else {
        return Ok(DEFAULT_CAP);
    };

    if value.is_none() {
        Ok(DEFAULT_CAP)
    } else if value.is_instance_of::<PyBool>() {
        if value.extract::<bool>()? {
            Err(PyValueError::new_err("cap=True is ambiguous, pass a multiple"))
        } else {
            Ok(Cap::Uncapped)
        }
    } else if value.is_instance_of::<PyString>() {
        let label: String = value.extract()?;
        if label == "uncapped" {
            Ok(Cap::Uncapped)
        } else {
            Err(PyValueError::new_err(format!("Unknown cap label '{}'", label)))
        }
    } else {
        Ok(Cap::Multiple(value.extract()?))
    }
}

// ========================================================================
// Conversions
// ========================================================================

/// Convert a Python dict to an Investor
pub fn parse_investor(py_investor: &Bound<'_, PyDict>) -> PyResult<Investor> {
    let share_class: String = extract_required(py_investor, "share_class")?;
    let share_class: ShareClass = share_class
        .parse()
        .map_err(|err: crate::models::InvestorError| PyValueError::new_err(err.to_string()))?;

    let config = InvestorConfig {
        title: extract_optional(py_investor, "title")?.unwrap_or_default(),
        share_class,
        num_shares: extract_required(py_investor, "num_shares")?,
        purchase_price: extract_optional(py_investor, "purchase_price")?.unwrap_or(0.0),
        liquidation_preference: extract_optional(py_investor, "liquidation_preference")?,
        is_participating: extract_optional(py_investor, "is_participating")?.unwrap_or(false),
        cap: extract_cap(py_investor)?,
    };

    Investor::try_from(config).map_err(|err| PyValueError::new_err(err.to_string()))
}

/// Convert a DistributionState to a Python dict
pub fn state_to_py<'py>(py: Python<'py>, state: &DistributionState) -> PyResult<Bound<'py, PyDict>> {
    let distribution = PyDict::new_bound(py);
    for (share_class, record) in state.distributions() {
        let entry = PyDict::new_bound(py);
        entry.set_item("converted_to_common", record.converted_to_common)?;
        entry.set_item("exit_amount", record.exit_amount)?;
        entry.set_item("is_capped", record.is_capped)?;
        distribution.set_item(share_class.label(), entry)?;
    }

    let result = PyDict::new_bound(py);
    result.set_item("exit_remainder", state.exit_remainder())?;
    result.set_item("total_shares_remainder", state.total_shares_remainder())?;
    result.set_item("distribution", distribution)?;
    Ok(result)
}

/// Simulate one exit from Python
///
/// # Example (from Python)
///
/// ```python
/// from exit_waterfall_core_rs import simulate_exit_distribution
///
/// result = simulate_exit_distribution(60_000_000, [
///     {"title": "Founders", "share_class": "common", "num_shares": 1_000_000},
///     {"title": "Series A", "share_class": "seriesA", "num_shares": 200_000,
///      "purchase_price": 900_000, "cap": 2},
/// ])
/// print(result["distribution"]["seriesA"]["exit_amount"])
/// ```
#[pyfunction]
pub fn simulate_exit_distribution<'py>(
    py: Python<'py>,
    exit_proceeds: f64,
    investors: &Bound<'py, PyList>,
) -> PyResult<Bound<'py, PyDict>> {
    let investors = investors
        .iter()
        .map(|item| parse_investor(item.downcast::<PyDict>()?))
        .collect::<PyResult<Vec<_>>>()?;

    let state = simulate(exit_proceeds, &investors)
        .map_err(|err| PyValueError::new_err(err.to_string()))?;

    state_to_py(py, &state)
}
