//! Traced rays
//!
//! A tracer fills a [`RayBatch`] with one column per ray attribute. Turning
//! the batch into [`Rays`] moves every column into an [`ArrayBuffer`] without
//! copying; the host reads the same allocations through read-only properties.

use std::rc::Rc;

use beamlink_host::{ArrayBuffer, Complex64, HostError, HostObject, HostType, HostValue, Property};
use beamlink_reflect::Enumeration;

use crate::enums::EventType;
use crate::error::ModelError;

/// Column names, in the order the host lists them
pub const COLUMNS: [&str; 17] = [
    "position_x",
    "position_y",
    "position_z",
    "direction_x",
    "direction_y",
    "direction_z",
    "energy",
    "electric_field_x",
    "electric_field_y",
    "electric_field_z",
    "path_length",
    "order",
    "event_type",
    "last_element_id",
    "source_id",
    "ray_id",
    "path_event_id",
];

/// Ray events produced by a tracer, stored column-wise
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RayBatch {
    pub position_x: Vec<f64>,
    pub position_y: Vec<f64>,
    pub position_z: Vec<f64>,
    pub direction_x: Vec<f64>,
    pub direction_y: Vec<f64>,
    pub direction_z: Vec<f64>,
    pub energy: Vec<f64>,
    pub electric_field_x: Vec<Complex64>,
    pub electric_field_y: Vec<Complex64>,
    pub electric_field_z: Vec<Complex64>,
    pub path_length: Vec<f64>,
    pub order: Vec<i32>,
    /// [`EventType`] discriminants
    pub event_type: Vec<i32>,
    pub last_element_id: Vec<i32>,
    pub source_id: Vec<i32>,
    pub ray_id: Vec<i32>,
    pub path_event_id: Vec<i32>,
}

/// One ray event, used to build a batch row by row
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RayEvent {
    pub position: [f64; 3],
    pub direction: [f64; 3],
    pub energy: f64,
    pub electric_field: [Complex64; 3],
    pub path_length: f64,
    pub order: i32,
    pub event_type: EventType,
    pub last_element_id: i32,
    pub source_id: i32,
    pub ray_id: i32,
    pub path_event_id: i32,
}

impl RayBatch {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            position_x: Vec::with_capacity(capacity),
            position_y: Vec::with_capacity(capacity),
            position_z: Vec::with_capacity(capacity),
            direction_x: Vec::with_capacity(capacity),
            direction_y: Vec::with_capacity(capacity),
            direction_z: Vec::with_capacity(capacity),
            energy: Vec::with_capacity(capacity),
            electric_field_x: Vec::with_capacity(capacity),
            electric_field_y: Vec::with_capacity(capacity),
            electric_field_z: Vec::with_capacity(capacity),
            path_length: Vec::with_capacity(capacity),
            order: Vec::with_capacity(capacity),
            event_type: Vec::with_capacity(capacity),
            last_element_id: Vec::with_capacity(capacity),
            source_id: Vec::with_capacity(capacity),
            ray_id: Vec::with_capacity(capacity),
            path_event_id: Vec::with_capacity(capacity),
        }
    }

    /// Append one event to every column
    pub fn push(&mut self, event: RayEvent) {
        let [px, py, pz] = event.position;
        let [dx, dy, dz] = event.direction;
        let [ex, ey, ez] = event.electric_field;
        self.position_x.push(px);
        self.position_y.push(py);
        self.position_z.push(pz);
        self.direction_x.push(dx);
        self.direction_y.push(dy);
        self.direction_z.push(dz);
        self.energy.push(event.energy);
        self.electric_field_x.push(ex);
        self.electric_field_y.push(ey);
        self.electric_field_z.push(ez);
        self.path_length.push(event.path_length);
        self.order.push(event.order);
        self.event_type.push(event.event_type.discriminant() as i32);
        self.last_element_id.push(event.last_element_id);
        self.source_id.push(event.source_id);
        self.ray_id.push(event.ray_id);
        self.path_event_id.push(event.path_event_id);
    }

    /// Number of events
    pub fn len(&self) -> usize {
        self.position_x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.position_x.is_empty()
    }

    fn column_lengths(&self) -> [usize; 17] {
        [
            self.position_x.len(),
            self.position_y.len(),
            self.position_z.len(),
            self.direction_x.len(),
            self.direction_y.len(),
            self.direction_z.len(),
            self.energy.len(),
            self.electric_field_x.len(),
            self.electric_field_y.len(),
            self.electric_field_z.len(),
            self.path_length.len(),
            self.order.len(),
            self.event_type.len(),
            self.last_element_id.len(),
            self.source_id.len(),
            self.ray_id.len(),
            self.path_event_id.len(),
        ]
    }

    /// Check that every column has the same length
    pub fn validate(&self) -> Result<(), ModelError> {
        let expected = self.len();
        for (&column, got) in COLUMNS.iter().zip(self.column_lengths()) {
            if got != expected {
                return Err(ModelError::RaggedColumn {
                    column,
                    expected,
                    got,
                });
            }
        }
        Ok(())
    }
}

/// Traced rays as host-visible columns
#[derive(Debug, Clone)]
pub struct Rays {
    len: usize,
    columns: Vec<(&'static str, ArrayBuffer)>,
}

impl Rays {
    /// Move the columns of `batch` into array buffers
    pub fn from_batch(batch: RayBatch) -> Result<Self, ModelError> {
        batch.validate()?;
        let len = batch.len();
        let buffers = [
            ArrayBuffer::new(batch.position_x),
            ArrayBuffer::new(batch.position_y),
            ArrayBuffer::new(batch.position_z),
            ArrayBuffer::new(batch.direction_x),
            ArrayBuffer::new(batch.direction_y),
            ArrayBuffer::new(batch.direction_z),
            ArrayBuffer::new(batch.energy),
            ArrayBuffer::new(batch.electric_field_x),
            ArrayBuffer::new(batch.electric_field_y),
            ArrayBuffer::new(batch.electric_field_z),
            ArrayBuffer::new(batch.path_length),
            ArrayBuffer::new(batch.order),
            ArrayBuffer::new(batch.event_type),
            ArrayBuffer::new(batch.last_element_id),
            ArrayBuffer::new(batch.source_id),
            ArrayBuffer::new(batch.ray_id),
            ArrayBuffer::new(batch.path_event_id),
        ];
        Ok(Self {
            len,
            columns: COLUMNS.into_iter().zip(buffers).collect(),
        })
    }

    /// Number of ray events
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn column(&self, name: &str) -> Option<&ArrayBuffer> {
        self.columns
            .iter()
            .find(|(column, _)| *column == name)
            .map(|(_, buffer)| buffer)
    }

    /// Event type of event `index`
    pub fn event(&self, index: usize) -> Option<EventType> {
        let raw = *self.column("event_type")?.as_slice::<i32>().ok()?.get(index)?;
        EventType::members()
            .iter()
            .find(|(_, member)| member.discriminant() == i64::from(raw))
            .map(|(_, member)| *member)
    }

    /// Hand the rays to the host
    pub fn into_host(self) -> HostValue {
        HostValue::Object(HostObject::new("Rays", self))
    }
}

/// Host type `Rays`: one read-only array property per column
pub fn rays_type() -> HostType {
    let mut ty = HostType::new("Rays").doc("Traced ray events, one array per attribute");
    for name in COLUMNS {
        ty.add_property(Property::new(
            name,
            Rc::new(move |_, obj| {
                let rays = obj.downcast_ref::<Rays>()?;
                rays.column(name)
                    .cloned()
                    .map(HostValue::Array)
                    .ok_or_else(|| HostError::ArgumentError(format!("missing ray column '{}'", name)))
            }),
        ));
    }
    ty.add_property(Property::new(
        "count",
        Rc::new(|_, obj| Ok(HostValue::Int(obj.downcast_ref::<Rays>()?.len() as i64))),
    ));
    ty
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(ray_id: i32, event_type: EventType) -> RayEvent {
        RayEvent {
            position: [ray_id as f64, 0.0, 1.0],
            energy: 100.0,
            event_type,
            ray_id,
            ..RayEvent::default()
        }
    }

    #[test]
    fn test_push_fills_every_column() {
        let mut batch = RayBatch::with_capacity(2);
        batch.push(event(0, EventType::Emitted));
        batch.push(event(1, EventType::HitElement));

        assert_eq!(batch.len(), 2);
        assert!(batch.validate().is_ok());
        assert_eq!(batch.event_type, vec![1, 2]);
    }

    #[test]
    fn test_ragged_batch_rejected() {
        let mut batch = RayBatch::default();
        batch.push(event(0, EventType::Emitted));
        batch.energy.push(1.0);

        let err = Rays::from_batch(batch).unwrap_err();
        assert_eq!(err.to_string(), "ray column 'energy' has 2 entries, expected 1");
    }

    #[test]
    fn test_columns_are_not_copied() {
        let mut batch = RayBatch::default();
        batch.push(event(7, EventType::Absorbed));
        let energy_ptr = batch.energy.as_ptr();
        let field_ptr = batch.electric_field_y.as_ptr();

        let rays = Rays::from_batch(batch).unwrap();
        let energy = rays.column("energy").unwrap().as_slice::<f64>().unwrap();
        let field = rays.column("electric_field_y").unwrap().as_slice::<Complex64>().unwrap();
        assert_eq!(energy.as_ptr(), energy_ptr);
        assert_eq!(field.as_ptr(), field_ptr);
        assert_eq!(rays.event(0), Some(EventType::Absorbed));
        assert_eq!(rays.event(1), None);
    }
}
