//! Whitelist-driven parameter vectorization.
//!
//! Converts a model's parameter map into one flat comparison vector by
//! concatenating the whitelisted tensors in whitelist order, each
//! flattened row-major.

use crate::error::GkdeError;
use crate::model::ParameterMap;

/// Flatten the whitelisted parameters of a model into one `Vec<f32>`.
///
/// The output layout is fully determined by `whitelist` order and each
/// tensor's row-major element order, so two maps flattened with the same
/// whitelist produce index-aligned vectors.
///
/// # Errors
///
/// [`GkdeError::MissingParameter`] if any whitelist name is absent from
/// the map. A model missing a selected layer cannot be scored.
pub fn flatten_into_vector(
    model: &ParameterMap,
    whitelist: &[&str],
) -> Result<Vec<f32>, GkdeError> {
    let total: usize = whitelist
        .iter()
        .map(|name| model.get(name).map(|t| t.len()).unwrap_or(0))
        .sum();

    let mut flat = Vec::with_capacity(total);
    for &name in whitelist {
        let tensor = model
            .get(name)
            .ok_or_else(|| GkdeError::MissingParameter(name.to_string()))?;
        // `iter` walks elements in logical (row-major) order regardless of
        // the tensor's memory layout.
        flat.extend(tensor.iter().copied());
    }
    Ok(flat)
}
