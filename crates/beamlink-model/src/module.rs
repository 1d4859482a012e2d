//! Module entry point

use std::path::PathBuf;
use std::rc::Rc;

use beamlink_host::{HostError, HostModule, HostValue};
use beamlink_reflect::register_type;

use crate::beamline::{beamline_type, Tracer};
use crate::config::ModuleConfig;
use crate::element::DesignElement;
use crate::enums::register_enums;
use crate::error::ModelError;
use crate::rays::rays_type;
use crate::source::DesignSource;

/// Build the apparatus module
///
/// Registers `DesignElement` and `Source` with everything they reach,
/// declares the enumerations and exports their members, then adds `Rays`,
/// `Beamline` (tracing through `tracer`) and `get_module_path()`.
pub fn init_module(config: &ModuleConfig, tracer: Rc<dyn Tracer>) -> Result<HostModule, ModelError> {
    config.validate()?;

    let mut module = HostModule::new(config.name.as_str());
    module.set_doc(config.doc.as_str());

    register_type::<DesignElement>(&mut module)?;
    register_type::<DesignSource>(&mut module)?;
    register_enums(&mut module)?;

    module.add_type(rays_type())?;
    module.add_type(beamline_type(tracer))?;

    let data_dir = config.data_dir();
    module.def(
        "get_module_path",
        Rc::new(move |_, args| {
            if !args.is_empty() {
                return Err(HostError::from("get_module_path() takes no arguments"));
            }
            Ok(HostValue::Str(data_dir.display().to_string()))
        }),
    );

    tracing::debug!(
        module = %config.name,
        types = module.type_names().count(),
        data_dir = %config.data_dir().display(),
        "module initialised"
    );
    Ok(module)
}

/// Data directory reported by `get_module_path()`
pub fn get_module_path(config: &ModuleConfig) -> PathBuf {
    config.data_dir()
}
