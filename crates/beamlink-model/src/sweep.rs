//! Parameter sweeps
//!
//! Parameters are JSON-shaped documents keyed by element or source name:
//!
//! ```json
//! [
//!   { "Slit": { "openingWidth": [2.0, 3.0], "openingHeight": [1.0, 2.0] } },
//!   { "Slit.position.z": 1000.0 }
//! ]
//! ```
//!
//! [`normalize`] expands such a document into a flat list of concrete
//! parameter sets: lists are alternatives, sibling keys of an object vary
//! together, and dotted keys become nested objects. [`trace_n`] applies each
//! set to a host beamline, runs a trace, and restores the original values.

use std::path::{Path, PathBuf};

use beamlink_host::{HostError, HostModule, HostResult, HostValue};
use rustc_hash::FxHashMap;
use serde_json::{Map, Value};
use thiserror::Error;

/// Errors raised while expanding or applying parameters
#[derive(Debug, Error)]
pub enum SweepError {
    /// Two values at the same key could not be merged
    #[error("Cannot merge {left} and {right}")]
    CannotMerge { left: String, right: String },

    /// Sibling keys of an object expand to different numbers of alternatives
    #[error("unequal lengths: {left} != {right}")]
    UnequalLengths { left: usize, right: usize },

    /// A parameter set, or the parameters of one object, is not an object
    #[error("expected an object of parameters, got {0}")]
    NotAnObject(String),

    /// A value has no host representation
    #[error("unsupported parameter value: {0}")]
    UnsupportedValue(String),

    /// Failure reported by the host while applying parameters or tracing
    #[error(transparent)]
    Host(#[from] HostError),

    /// Failed to read a parameter file
    #[error("Failed to read parameter file: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid JSON parameter file
    #[error("Failed to parse JSON parameters: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid TOML parameter file
    #[error("Failed to parse TOML parameters: {0}")]
    Toml(#[from] toml::de::Error),

    /// Parameter file with an unknown extension
    #[error("unsupported parameter file: {}", .0.display())]
    UnsupportedFormat(PathBuf),
}

/// Deep merge of two objects; shared keys are merged recursively
pub fn merge(a: &Value, b: &Value) -> Result<Value, SweepError> {
    let (Value::Object(left), Value::Object(right)) = (a, b) else {
        return Err(SweepError::CannotMerge {
            left: a.to_string(),
            right: b.to_string(),
        });
    };

    let mut merged = left.clone();
    for (key, value) in right {
        let combined = match left.get(key) {
            Some(existing) => merge(existing, value)?,
            None => value.clone(),
        };
        merged.insert(key.clone(), combined);
    }
    Ok(Value::Object(merged))
}

/// Expand dotted keys: `{"Slit.position.z": 1}` -> `{"Slit": {"position": {"z": 1}}}`
pub fn to_nested(flat: &Value) -> Result<Value, SweepError> {
    let Value::Object(entries) = flat else {
        return Err(SweepError::NotAnObject(flat.to_string()));
    };

    let mut nested = Value::Object(Map::new());
    for (key, value) in entries {
        let wrapped = key.rsplit('.').fold(value.clone(), |inner, part| {
            let mut outer = Map::new();
            outer.insert(part.to_string(), inner);
            Value::Object(outer)
        });
        nested = merge(&nested, &wrapped)?;
    }
    Ok(nested)
}

fn expand(params: &Value) -> Result<Vec<Value>, SweepError> {
    match params {
        Value::Array(items) => {
            let mut result = Vec::new();
            for item in items {
                result.extend(expand(item)?);
            }
            Ok(result)
        }
        Value::Object(entries) => {
            let mut result: Vec<Value> = Vec::new();
            for (key, value) in entries {
                let alternatives = expand(value)?;
                if result.is_empty() {
                    result = alternatives.into_iter().map(|v| single(key, v)).collect();
                } else if result.len() == alternatives.len() {
                    for (set, alternative) in result.iter_mut().zip(alternatives) {
                        *set = merge(set, &single(key, alternative))?;
                    }
                } else {
                    return Err(SweepError::UnequalLengths {
                        left: result.len(),
                        right: alternatives.len(),
                    });
                }
            }
            Ok(result)
        }
        scalar => Ok(vec![scalar.clone()]),
    }
}

fn single(key: &str, value: Value) -> Value {
    let mut map = Map::new();
    map.insert(key.to_string(), value);
    Value::Object(map)
}

/// Expand a parameter document into concrete parameter sets
pub fn normalize(params: &Value) -> Result<Vec<Value>, SweepError> {
    expand(params)?.iter().map(to_nested).collect()
}

/// Every combination of one parameter set from each argument, merged
pub fn all_combinations(args: &[Value]) -> Result<Vec<Value>, SweepError> {
    let mut combinations = vec![Value::Object(Map::new())];
    for arg in args {
        let sets = normalize(arg)?;
        let mut next = Vec::with_capacity(combinations.len() * sets.len());
        for combination in &combinations {
            for set in &sets {
                next.push(merge(combination, set)?);
            }
        }
        combinations = next;
    }
    Ok(combinations)
}

/// Read a parameter document from a `.json` or `.toml` file
pub fn load_params(path: &Path) -> Result<Value, SweepError> {
    let content = std::fs::read_to_string(path)?;
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(serde_json::from_str(&content)?),
        Some("toml") => Ok(toml::from_str(&content)?),
        _ => Err(SweepError::UnsupportedFormat(path.to_path_buf())),
    }
}

/// Host value for a leaf parameter
pub fn to_host_value(value: &Value) -> Result<HostValue, SweepError> {
    Ok(match value {
        Value::Null => HostValue::None,
        Value::Bool(b) => HostValue::Bool(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => HostValue::Int(i),
            None => HostValue::Float(
                n.as_f64()
                    .ok_or_else(|| SweepError::UnsupportedValue(n.to_string()))?,
            ),
        },
        Value::String(s) => HostValue::Str(s.clone()),
        Value::Array(items) => HostValue::List(items.iter().map(to_host_value).collect::<Result<_, _>>()?),
        Value::Object(_) => return Err(SweepError::UnsupportedValue(value.to_string())),
    })
}

fn as_object<'a>(value: &'a Value) -> Result<&'a Map<String, Value>, SweepError> {
    value
        .as_object()
        .ok_or_else(|| SweepError::NotAnObject(value.to_string()))
}

fn apply(module: &HostModule, target: &HostValue, params: &Map<String, Value>) -> Result<(), SweepError> {
    for (key, value) in params {
        match value {
            Value::Object(nested) => apply(module, &module.get_attr(target, key)?, nested)?,
            leaf => module.set_attr(target, key, to_host_value(leaf)?)?,
        }
    }
    Ok(())
}

fn restore(
    module: &HostModule,
    target: &HostValue,
    original: &HostValue,
    params: &Map<String, Value>,
) -> HostResult<()> {
    // keep going past a failed key so the others are still restored
    let mut first_error = Ok(());
    for (key, value) in params {
        let restored = match value {
            Value::Object(nested) => module.get_attr(target, key).and_then(|target| {
                let original = module.get_attr(original, key)?;
                restore(module, &target, &original, nested)
            }),
            _ => module
                .get_attr(original, key)
                .and_then(|original| module.set_attr(target, key, original)),
        };
        first_error = first_error.and(restored);
    }
    first_error
}

fn originals(module: &HostModule, beamline: &HostValue) -> HostResult<FxHashMap<String, HostValue>> {
    let mut copies = FxHashMap::default();
    for list in ["sources", "elements"] {
        let items = module.get_attr(beamline, list)?;
        for item in items.as_list().unwrap_or(&[]) {
            let name = module.get_attr(item, "name")?;
            let name = name
                .as_str()
                .ok_or_else(|| HostError::mismatch("str", name.type_name()))?
                .to_string();
            copies.insert(name, module.deep_copy(item)?);
        }
    }
    Ok(copies)
}

/// Trace `beamline` once per parameter set of `params`
///
/// Each set maps element or source names to parameters. Nested parameters are
/// reached through attribute reads, so they are written through proxies into
/// the beamline. After every trace the touched parameters are restored from
/// copies taken before the sweep, whether or not the trace succeeded.
pub fn trace_n<R>(
    module: &HostModule,
    beamline: &HostValue,
    params: &Value,
    mut trace: impl FnMut(&HostModule, &HostValue) -> HostResult<R>,
) -> Result<Vec<(Value, R)>, SweepError> {
    let originals = originals(module, beamline)?;
    let mut results = Vec::new();

    for set in normalize(params)? {
        tracing::info!(params = %set, "running with parameters");
        let targets = as_object(&set)?;

        let mut applied = Vec::with_capacity(targets.len());
        let mut outcome = Ok(());
        for (name, object_params) in targets {
            let target = match module.call_method(beamline, "item", &[HostValue::from(name.as_str())]) {
                Ok(target) => target,
                Err(err) => {
                    outcome = Err(err.into());
                    break;
                }
            };
            let applied_params = match as_object(object_params) {
                Ok(applied_params) => applied_params,
                Err(err) => {
                    outcome = Err(err);
                    break;
                }
            };
            applied.push((name.as_str(), target.clone(), applied_params));
            if let Err(err) = apply(module, &target, applied_params) {
                outcome = Err(err);
                break;
            }
        }

        let traced = match outcome {
            Ok(()) => trace(module, beamline).map_err(SweepError::from),
            Err(err) => Err(err),
        };

        let mut restored = Ok(());
        for (name, target, applied_params) in &applied {
            if let Some(original) = originals.get(*name) {
                restored = restored.and(restore(module, target, original, applied_params));
            }
        }

        let traced = traced?;
        restored?;
        results.push((set.clone(), traced));
    }
    Ok(results)
}
