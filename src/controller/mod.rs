//! Annotation controller: turns gestures into store and map changes.
//!
//! The controller is a two-state machine:
//!
//! - **Idle**: a click on an existing point asks to delete it; a click on
//!   empty map opens the point editor for a new point.
//! - **DrawingArea**: every click adds a pending vertex (drawn as a
//!   temporary marker). Finishing with three or more vertices opens the
//!   area editor; confirming commits the area and swaps the markers for a
//!   polygon, cancelling discards them.
//!
//! Clicks outside the map are ignored in both states. Dialogs are modal:
//! each gesture waits for its dialog's single answer before returning.

mod dialog;
mod records;

pub use dialog::{
    Answer, AreaEdits, Cancelled, Confirmation, DialogHost, DialogResult, PointEdits, Prompt,
    ScriptedDialogs,
};

use std::path::Path;

use crate::error::GeomarkError;
use crate::geo::{Coord, GeoCoord, Screen};
use crate::map::{HitTolerance, MapAdapter};
use crate::model::{AppSettings, ProjectFile, Theme};
use crate::persistence::PersistenceService;
use crate::store::{AnnotationStore, Area, AreaId, Point, PointId, DEFAULT_POINT_SIZE};

/// Current gesture mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureMode {
    Idle,
    DrawingArea,
}

#[derive(Debug)]
enum GestureState {
    Idle,
    DrawingArea { pending: Vec<Point> },
}

/// What a click did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The click was outside the map.
    Ignored,
    PointAdded(PointId),
    /// The point editor was cancelled.
    AddCancelled,
    PointRemoved(PointId),
    /// The delete confirmation was declined.
    RemoveDeclined(PointId),
    /// A pending area vertex was added; `pending` is the new count.
    VertexAdded { pending: usize },
}

/// What finishing an area did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FinishOutcome {
    NotDrawing,
    /// Still drawing; the area needs at least three vertices.
    TooFewVertices(usize),
    Committed(AreaId),
    /// The area editor was cancelled and the pending vertices discarded.
    Cancelled,
}

/// Counts from restoring a project.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub points: usize,
    pub areas: usize,
    pub skipped: usize,
}

/// Coordinates gestures, dialogs, the store and the map.
#[derive(Debug)]
pub struct AnnotationController<D> {
    store: AnnotationStore,
    map: MapAdapter,
    dialogs: D,
    persistence: PersistenceService,
    settings: AppSettings,
    state: GestureState,
    hit_tolerance: HitTolerance,
}

impl<D: DialogHost> AnnotationController<D> {
    pub fn new(
        map: MapAdapter,
        dialogs: D,
        persistence: PersistenceService,
        settings: AppSettings,
    ) -> Self {
        Self {
            store: AnnotationStore::new(),
            map,
            dialogs,
            persistence,
            settings,
            state: GestureState::Idle,
            hit_tolerance: HitTolerance::default(),
        }
    }

    pub fn with_hit_tolerance(mut self, tolerance: HitTolerance) -> Self {
        self.hit_tolerance = tolerance;
        self
    }

    pub fn store(&self) -> &AnnotationStore {
        &self.store
    }

    pub fn map(&self) -> &MapAdapter {
        &self.map
    }

    pub fn dialogs(&self) -> &D {
        &self.dialogs
    }

    pub fn dialogs_mut(&mut self) -> &mut D {
        &mut self.dialogs
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    pub fn mode(&self) -> GestureMode {
        match self.state {
            GestureState::Idle => GestureMode::Idle,
            GestureState::DrawingArea { .. } => GestureMode::DrawingArea,
        }
    }

    /// Vertices placed so far while drawing an area.
    pub fn pending_vertices(&self) -> &[Point] {
        match &self.state {
            GestureState::Idle => &[],
            GestureState::DrawingArea { pending } => pending,
        }
    }

    pub fn set_viewport_size(&mut self, width: f64, height: f64) {
        self.map.set_viewport_size(width, height);
    }

    // ---- gestures ---------------------------------------------------------

    /// Handles a primary-button press at a screen position.
    pub fn handle_click(&mut self, screen: Coord<Screen>) -> ClickOutcome {
        let geo = self.map.screen_to_geo(screen);
        self.handle_geo_click(geo)
    }

    /// Handles a click that has already been converted to a geographic
    /// position.
    pub fn handle_geo_click(&mut self, geo: GeoCoord) -> ClickOutcome {
        if !self.map.is_valid_coordinate(geo.latitude, geo.longitude) {
            log::debug!("ignoring click outside the map at ({geo})");
            return ClickOutcome::Ignored;
        }

        if let GestureState::DrawingArea { pending } = &mut self.state {
            let mut vertex = Point::new(geo.latitude, geo.longitude);
            vertex.feature = self.map.place_visual_point(&vertex);
            pending.push(vertex);
            log::debug!("area vertex added at ({geo}), {} pending", pending.len());
            return ClickOutcome::VertexAdded {
                pending: pending.len(),
            };
        }

        let hit = self
            .map
            .find_nearest_point(geo, self.store.points(), self.hit_tolerance)
            .map(Point::id);
        match hit {
            Some(id) => self.request_remove_point(id),
            None => self.add_point_at(geo),
        }
    }

    /// Opens the point editor for a new point at `geo` and commits it on
    /// confirmation.
    pub fn add_point_at(&mut self, geo: GeoCoord) -> ClickOutcome {
        if !self.map.is_valid_coordinate(geo.latitude, geo.longitude) {
            return ClickOutcome::Ignored;
        }
        let draft = Point::new(geo.latitude, geo.longitude);
        let Ok(mut point) = self.dialogs.edit_point(draft) else {
            return ClickOutcome::AddCancelled;
        };
        point.position = geo;
        sanitize_size(&mut point);

        let Some(handle) = self.map.place_visual_point(&point) else {
            return ClickOutcome::Ignored;
        };
        point.feature = Some(handle);
        let id = self.store.add_point(point);
        log::info!("point {id} added at ({geo})");
        ClickOutcome::PointAdded(id)
    }

    /// Asks for confirmation, then deletes the point.
    pub fn request_remove_point(&mut self, id: PointId) -> ClickOutcome {
        let Some(point) = self.store.point(id) else {
            return ClickOutcome::Ignored;
        };
        let question = Confirmation::new(
            "Delete point",
            format!("Delete point {}?", point.display_text()),
        );
        if self.dialogs.confirm(&question) {
            self.remove_point(id);
            ClickOutcome::PointRemoved(id)
        } else {
            ClickOutcome::RemoveDeclined(id)
        }
    }

    /// Removes a point from the store and its marker from the map.
    pub fn remove_point(&mut self, id: PointId) -> Option<Point> {
        let point = self.store.remove_point(id)?;
        if let Some(handle) = point.feature() {
            self.map.remove_visual_point(handle);
        }
        log::info!("point {id} removed");
        Some(point)
    }

    /// Opens the point editor for an existing point and applies the
    /// result. Position and identity cannot be edited.
    pub fn edit_point(&mut self, id: PointId) -> bool {
        let Some(current) = self.store.point(id).cloned() else {
            return false;
        };
        let Ok(mut edited) = self.dialogs.edit_point(current.clone()) else {
            return false;
        };
        sanitize_size(&mut edited);

        let Some(point) = self.store.point_mut(id) else {
            return false;
        };
        point.name = edited.name;
        point.color = edited.color;
        point.size = edited.size;
        self.map.update_point_style(point);
        true
    }

    pub fn select_point(&mut self, id: Option<PointId>) -> bool {
        self.store.select_point(id)
    }

    pub fn select_area(&mut self, id: Option<AreaId>) -> bool {
        self.store.select_area(id)
    }

    pub fn can_delete_selected_point(&self) -> bool {
        self.store.selected_point().is_some()
    }

    pub fn delete_selected_point(&mut self) -> bool {
        match self.store.selected_point().map(Point::id) {
            Some(id) => self.remove_point(id).is_some(),
            None => false,
        }
    }

    pub fn can_clear_points(&self) -> bool {
        !self.store.points().is_empty()
    }

    pub fn clear_points(&mut self) {
        self.store.clear_points();
        self.map.clear_all_points();
        // pending area vertices live on the same layer
        if let GestureState::DrawingArea { pending } = &mut self.state {
            for vertex in pending.iter_mut() {
                vertex.feature = self.map.place_visual_point(vertex);
            }
        }
    }

    // ---- area drawing -----------------------------------------------------

    pub fn can_start_area(&self) -> bool {
        self.mode() == GestureMode::Idle
    }

    /// Enters area-drawing mode with an empty vertex list.
    pub fn start_area(&mut self) -> bool {
        if !self.can_start_area() {
            return false;
        }
        self.state = GestureState::DrawingArea {
            pending: Vec::new(),
        };
        log::info!("area drawing started");
        true
    }

    pub fn can_finish_area(&self) -> bool {
        self.pending_vertices().len() >= 3
    }

    /// Opens the area editor for the pending vertices.
    pub fn finish_area(&mut self) -> FinishOutcome {
        let count = match &self.state {
            GestureState::Idle => return FinishOutcome::NotDrawing,
            GestureState::DrawingArea { pending } => pending.len(),
        };
        if count < 3 {
            return FinishOutcome::TooFewVertices(count);
        }

        let pending = self.take_pending();
        let vertices: Vec<GeoCoord> = pending.iter().map(|p| p.position).collect();
        let draft = Area::new(vertices.clone());

        let outcome = match self.dialogs.edit_area(draft) {
            Ok(mut area) => {
                area.vertices = vertices;
                area.feature = self.map.place_visual_area(&area.vertices, area.style);
                match area.feature {
                    Some(handle) => match self.store.add_area(area) {
                        Some(id) => {
                            log::info!("area {id} committed");
                            FinishOutcome::Committed(id)
                        }
                        None => {
                            self.map.remove_visual_area(handle);
                            FinishOutcome::Cancelled
                        }
                    },
                    None => FinishOutcome::Cancelled,
                }
            }
            Err(Cancelled) => {
                log::info!("area drawing cancelled in editor");
                FinishOutcome::Cancelled
            }
        };
        self.map.remove_visual_points(&pending);
        outcome
    }

    /// Leaves drawing mode, discarding pending vertices and their markers.
    /// Returns how many vertices were discarded.
    pub fn cancel_area(&mut self) -> usize {
        let pending = self.take_pending();
        if !pending.is_empty() {
            self.map.remove_visual_points(&pending);
        }
        log::info!("area drawing cancelled, {} vertices discarded", pending.len());
        pending.len()
    }

    fn take_pending(&mut self) -> Vec<Point> {
        match std::mem::replace(&mut self.state, GestureState::Idle) {
            GestureState::Idle => Vec::new(),
            GestureState::DrawingArea { pending } => pending,
        }
    }

    /// Removes an area from the store and its polygon from the map.
    pub fn remove_area(&mut self, id: AreaId) -> Option<Area> {
        let area = self.store.remove_area(id)?;
        if let Some(handle) = area.feature() {
            self.map.remove_visual_area(handle);
        }
        log::info!("area {id} removed");
        Some(area)
    }

    pub fn can_delete_selected_area(&self) -> bool {
        self.store.selected_area().is_some()
    }

    pub fn delete_selected_area(&mut self) -> bool {
        match self.store.selected_area().map(Area::id) {
            Some(id) => self.remove_area(id).is_some(),
            None => false,
        }
    }

    pub fn can_clear_areas(&self) -> bool {
        !self.store.areas().is_empty()
    }

    pub fn clear_areas(&mut self) {
        self.store.clear_areas();
        self.map.clear_all_areas();
    }

    // ---- camera -----------------------------------------------------------

    /// Centres the view on a point, keeping zoom.
    pub fn focus_point(&mut self, id: PointId) -> bool {
        match self.store.point(id) {
            Some(point) => {
                self.map.frame_on_point(point);
                true
            }
            None => false,
        }
    }

    /// Centres the view on an area, zooming to fit if asked.
    pub fn focus_area(&mut self, id: AreaId, fit_to_view: bool) -> bool {
        match self.store.area(id) {
            Some(area) => {
                self.map.frame_on_area(area, fit_to_view);
                true
            }
            None => false,
        }
    }

    // ---- persistence ------------------------------------------------------

    /// Snapshot of everything currently committed, plus the camera.
    pub fn to_project(&self) -> ProjectFile {
        ProjectFile {
            camera: self.map.camera_state(),
            points: self
                .store
                .points()
                .iter()
                .map(records::point_to_record)
                .collect(),
            areas: self
                .store
                .areas()
                .iter()
                .map(records::area_to_record)
                .collect(),
        }
    }

    /// Replaces the current annotations with those in `project`.
    ///
    /// Entries that cannot be shown (bad colour, coordinates outside the
    /// map, areas with fewer than three vertices) are skipped and logged.
    pub fn apply_project(&mut self, project: &ProjectFile) -> LoadSummary {
        self.cancel_area();
        self.clear_points();
        self.clear_areas();

        let mut summary = LoadSummary::default();
        log::info!("restoring {} point(s)", project.points.len());
        for (idx, record) in project.points.iter().enumerate() {
            match records::point_from_record(record) {
                Ok(mut point) => {
                    sanitize_size(&mut point);
                    match self.map.place_visual_point(&point) {
                        Some(handle) => {
                            point.feature = Some(handle);
                            self.store.add_point(point);
                            summary.points += 1;
                        }
                        None => {
                            log::warn!("skipping point {idx}: outside the map");
                            summary.skipped += 1;
                        }
                    }
                }
                Err(e) => {
                    log::warn!("skipping point {idx}: {e}");
                    summary.skipped += 1;
                }
            }
        }

        log::info!("restoring {} area(s)", project.areas.len());
        for (idx, record) in project.areas.iter().enumerate() {
            match records::area_from_record(record) {
                Ok(mut area) => match self.map.place_visual_area(&area.vertices, area.style) {
                    Some(handle) => {
                        area.feature = Some(handle);
                        self.store.add_area(area);
                        summary.areas += 1;
                    }
                    None => {
                        log::warn!(
                            "skipping area {idx}: needs 3+ vertices inside the map, has {}",
                            record.points.len()
                        );
                        summary.skipped += 1;
                    }
                },
                Err(e) => {
                    log::warn!("skipping area {idx}: {e}");
                    summary.skipped += 1;
                }
            }
        }

        self.map.set_camera_state(&project.camera);
        log::info!(
            "loaded {} point(s) and {} area(s), skipped {}",
            summary.points,
            summary.areas,
            summary.skipped
        );
        summary
    }

    /// Loads the default project file. A missing or broken file yields an
    /// empty project.
    pub fn load(&mut self) -> LoadSummary {
        let project = self.persistence.load_project();
        self.apply_project(&project)
    }

    /// Loads a project from `path`, recovering like [`Self::load`].
    pub fn load_from(&mut self, path: &Path) -> LoadSummary {
        let project = self.persistence.load_project_from(path);
        let summary = self.apply_project(&project);
        self.remember_directory(path);
        summary
    }

    /// Saves to the default project file; failures are only logged.
    pub fn save(&self) -> bool {
        self.persistence.save_project(&self.to_project())
    }

    /// Saves to `path`.
    ///
    /// # Errors
    /// Returns the I/O or serialization error.
    pub fn save_to(&mut self, path: &Path) -> Result<(), GeomarkError> {
        self.persistence.save_project_to(path, &self.to_project())?;
        self.remember_directory(path);
        Ok(())
    }

    fn remember_directory(&mut self, path: &Path) {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            self.settings.last_save_directory = dir.display().to_string();
        }
    }

    // ---- settings ---------------------------------------------------------

    pub fn set_theme(&mut self, theme: Theme) {
        self.settings.theme = theme;
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.settings.theme = self.settings.theme.toggled();
        self.settings.theme
    }

    /// Saves the project to the default path and hands back the settings
    /// so the host can persist them.
    pub fn shutdown(self) -> AppSettings {
        if !self.save() {
            log::warn!("project was not saved on exit");
        }
        self.settings
    }
}

fn sanitize_size(point: &mut Point) {
    if !(point.size.is_finite() && point.size > 0.0) {
        log::warn!(
            "point size {} is not positive, using {DEFAULT_POINT_SIZE}",
            point.size
        );
        point.size = DEFAULT_POINT_SIZE;
    }
}
