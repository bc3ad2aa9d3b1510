//! Mapping between live entities and saved records.

use crate::error::GeomarkError;
use crate::geo::{Argb, GeoCoord};
use crate::model::{AreaPointRecord, AreaRecord, PointRecord};
use crate::store::{Area, AreaStyle, Point};

pub(crate) fn point_to_record(point: &Point) -> PointRecord {
    PointRecord {
        longitude: point.longitude(),
        latitude: point.latitude(),
        name: point.name.clone(),
        color: point.color.to_string(),
        size: point.size,
    }
}

pub(crate) fn area_to_record(area: &Area) -> AreaRecord {
    AreaRecord {
        name: area.name.clone(),
        points: area
            .vertices
            .iter()
            .map(|v| AreaPointRecord {
                longitude: v.longitude,
                latitude: v.latitude,
            })
            .collect(),
        fill_color: area.style.fill.to_string(),
        border_color: area.style.border.to_string(),
    }
}

/// Builds a point from a record. Coordinates are not checked here; the
/// map adapter rejects them when the point is placed.
pub(crate) fn point_from_record(record: &PointRecord) -> Result<Point, GeomarkError> {
    let color: Argb = record.color.parse()?;
    Ok(Point::new(record.latitude, record.longitude)
        .with_name(record.name.clone())
        .with_color(color)
        .with_size(record.size))
}

pub(crate) fn area_from_record(record: &AreaRecord) -> Result<Area, GeomarkError> {
    let style = AreaStyle {
        fill: record.fill_color.parse()?,
        border: record.border_color.parse()?,
    };
    let vertices = record
        .points
        .iter()
        .map(|p| GeoCoord::new(p.latitude, p.longitude))
        .collect();
    Ok(Area::new(vertices)
        .with_name(record.name.clone())
        .with_style(style))
}
