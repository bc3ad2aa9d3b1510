//! In-memory annotation store.
//!
//! Holds the committed points and areas in insertion order, plus the
//! current selection. The store trusts its input: coordinates are checked
//! by the map adapter before anything reaches it. The only rule it
//! enforces itself is that an area needs three or more vertices.

mod entity;
mod ids;

pub use entity::{
    Area, AreaStyle, Point, DEFAULT_AREA_BORDER, DEFAULT_AREA_FILL, DEFAULT_AREA_NAME,
    DEFAULT_POINT_SIZE,
};
pub use ids::{AreaId, PointId};

use crate::map::FeatureHandle;

/// Ordered collections of live points and areas.
#[derive(Debug, Default)]
pub struct AnnotationStore {
    points: Vec<Point>,
    areas: Vec<Area>,
    selected_point: Option<PointId>,
    selected_area: Option<AreaId>,
    next_point_id: u64,
    next_area_id: u64,
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a point and returns its new identity.
    pub fn add_point(&mut self, mut point: Point) -> PointId {
        self.next_point_id += 1;
        point.id = PointId(self.next_point_id);
        self.points.push(point);
        PointId(self.next_point_id)
    }

    /// Removes a point by identity, clearing the selection if it pointed
    /// at the removed point.
    pub fn remove_point(&mut self, id: PointId) -> Option<Point> {
        let idx = self.points.iter().position(|p| p.id == id)?;
        if self.selected_point == Some(id) {
            self.selected_point = None;
        }
        Some(self.points.remove(idx))
    }

    pub fn point(&self, id: PointId) -> Option<&Point> {
        self.points.iter().find(|p| p.id == id)
    }

    pub fn point_mut(&mut self, id: PointId) -> Option<&mut Point> {
        self.points.iter_mut().find(|p| p.id == id)
    }

    /// Points in insertion order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Finds the point whose marker is `handle`.
    pub fn point_by_feature(&self, handle: FeatureHandle) -> Option<&Point> {
        self.points.iter().find(|p| p.feature == Some(handle))
    }

    /// Removes every point and returns them in their former order.
    pub fn clear_points(&mut self) -> Vec<Point> {
        self.selected_point = None;
        std::mem::take(&mut self.points)
    }

    /// Commits an area. Areas with fewer than three vertices are rejected
    /// and `None` is returned.
    pub fn add_area(&mut self, mut area: Area) -> Option<AreaId> {
        if !area.is_complete() {
            log::debug!(
                "rejecting area '{}' with {} vertices",
                area.name,
                area.vertices.len()
            );
            return None;
        }
        self.next_area_id += 1;
        area.id = AreaId(self.next_area_id);
        self.areas.push(area);
        Some(AreaId(self.next_area_id))
    }

    /// Removes an area by identity, clearing the selection if needed.
    pub fn remove_area(&mut self, id: AreaId) -> Option<Area> {
        let idx = self.areas.iter().position(|a| a.id == id)?;
        if self.selected_area == Some(id) {
            self.selected_area = None;
        }
        Some(self.areas.remove(idx))
    }

    pub fn area(&self, id: AreaId) -> Option<&Area> {
        self.areas.iter().find(|a| a.id == id)
    }

    /// Areas in insertion order.
    pub fn areas(&self) -> &[Area] {
        &self.areas
    }

    /// Removes every area and returns them in their former order.
    pub fn clear_areas(&mut self) -> Vec<Area> {
        self.selected_area = None;
        std::mem::take(&mut self.areas)
    }

    /// Selects a point, replacing any previous point selection.
    ///
    /// Selecting an unknown ID clears the selection and returns false.
    pub fn select_point(&mut self, id: Option<PointId>) -> bool {
        match id {
            Some(id) if self.point(id).is_some() => {
                self.selected_point = Some(id);
                true
            }
            Some(_) => {
                self.selected_point = None;
                false
            }
            None => {
                self.selected_point = None;
                true
            }
        }
    }

    /// Selects an area, replacing any previous area selection.
    ///
    /// Selecting an unknown ID clears the selection and returns false.
    pub fn select_area(&mut self, id: Option<AreaId>) -> bool {
        match id {
            Some(id) if self.area(id).is_some() => {
                self.selected_area = Some(id);
                true
            }
            Some(_) => {
                self.selected_area = None;
                false
            }
            None => {
                self.selected_area = None;
                true
            }
        }
    }

    pub fn selected_point(&self) -> Option<&Point> {
        self.selected_point.and_then(|id| self.point(id))
    }

    pub fn selected_area(&self) -> Option<&Area> {
        self.selected_area.and_then(|id| self.area(id))
    }
}
