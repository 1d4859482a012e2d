//! Beamlink model: an X-ray beamline apparatus exposed to a dynamic host
//!
//! Design elements and sources are plain value types. Registering them with
//! [`init_module`] declares every nested structure (vectors, slope errors),
//! variant (surfaces, cutouts) and enumeration they reach, so host code can
//! write `beamline.item("M1").cutout.width = 40.0` and edit the beamline in
//! place.
//!
//! The crate also carries the pieces around the bindings:
//!
//! - [`ModuleConfig`]: module name, docstring and data directory, from TOML
//! - [`Rays`]: traced ray columns handed to the host without copying
//! - [`sweep`]: parameter expansion and `trace_n` over a host beamline
//! - [`init_tracing`]: `RUST_LOG` driven log output

pub mod beamline;
pub mod config;
pub mod cutout;
mod design;
pub mod element;
pub mod enums;
pub mod error;
mod logging;
pub mod math;
mod module;
pub mod rays;
pub mod source;
pub mod surface;
pub mod sweep;

pub use beamline::{beamline_type, Beamline, Tracer};
pub use config::{ConfigError, ModuleConfig, DATA_DIR_ENV};
pub use cutout::{Cutout, Elliptical, Rect, Trapezoid, Unlimited};
pub use design::Scalars;
pub use element::{DesignElement, SlopeError};
pub use enums::{
    register_enums, ElectronEnergyOrientation, ElementType, EnergyDistributionType, EnergySpreadUnit,
    EventType, Material, SourceDist, SpreadType,
};
pub use error::ModelError;
pub use logging::init_tracing;
pub use math::{DMat4, DVec3, DVec4, Rad};
pub use module::{get_module_path, init_module};
pub use rays::{rays_type, RayBatch, RayEvent, Rays};
pub use source::DesignSource;
pub use surface::{Cubic, Plane, Quadric, Surface, Toroid};
pub use sweep::{all_combinations, load_params, merge, normalize, to_nested, trace_n, SweepError};
