//! Map adapter: the only code that touches the drawn map.
//!
//! The adapter owns the viewport and two feature layers (areas below,
//! points above). It converts between screen pixels, projected metres and
//! geographic degrees, places and removes features on behalf of the
//! controller, hit-tests points, and frames the camera.
//!
//! Entities only ever hold a [`FeatureHandle`]; the feature itself lives
//! here.

mod feature;
mod viewport;

pub use feature::{Feature, FeatureHandle, FeatureLayer, SymbolStyle, VectorStyle};
pub use viewport::{Navigation, Viewport};

use std::time::Duration;

use crate::geo::{self, mercator, Argb, Coord, GeoBounds, GeoCoord, Screen};
use crate::model::CameraRecord;
use crate::store::{Area, AreaStyle, Point};

/// Duration of animated camera moves.
pub const NAVIGATION_DURATION: Duration = Duration::from_millis(1000);

/// Fraction of extra space left around an area when it is framed.
pub const FRAME_MARGIN: f64 = 0.2;

/// Default pixel radius used when clicking on a point.
pub const DEFAULT_PIXEL_TOLERANCE: f64 = 10.0;

/// Pixels of hit radius per unit of point size.
pub const PIXELS_PER_SIZE_UNIT: f64 = 15.0;

/// How close a click must land to a point to hit it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HitTolerance {
    /// The same pixel radius for every point.
    Fixed(f64),
    /// `size * PIXELS_PER_SIZE_UNIT` pixels for each point.
    ScaledBySize,
}

impl HitTolerance {
    fn radius_for(&self, point: &Point) -> f64 {
        match self {
            HitTolerance::Fixed(px) => *px,
            HitTolerance::ScaledBySize => point.size * PIXELS_PER_SIZE_UNIT,
        }
    }
}

impl Default for HitTolerance {
    fn default() -> Self {
        HitTolerance::Fixed(DEFAULT_PIXEL_TOLERANCE)
    }
}

/// Façade over the drawn map.
#[derive(Debug)]
pub struct MapAdapter {
    viewport: Viewport,
    areas: FeatureLayer,
    points: FeatureLayer,
    next_handle: u64,
    last_navigation: Option<Navigation>,
    revision: u64,
}

impl MapAdapter {
    /// Creates an empty map with a viewport of the given pixel size.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            viewport: Viewport::new(width, height),
            areas: FeatureLayer::new("Areas", 0.3),
            points: FeatureLayer::new("Points", 1.0),
            next_handle: 0,
            last_navigation: None,
            revision: 0,
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Resizes the view, keeping centre and zoom.
    pub fn set_viewport_size(&mut self, width: f64, height: f64) {
        self.viewport.width = width;
        self.viewport.height = height;
        self.refresh();
    }

    pub fn point_layer(&self) -> &FeatureLayer {
        &self.points
    }

    pub fn area_layer(&self) -> &FeatureLayer {
        &self.areas
    }

    /// Resolves a handle in either layer.
    pub fn feature(&self, handle: FeatureHandle) -> Option<&Feature> {
        self.points.get(handle).or_else(|| self.areas.get(handle))
    }

    /// The most recent camera move, for the host to animate.
    pub fn last_navigation(&self) -> Option<&Navigation> {
        self.last_navigation.as_ref()
    }

    /// Bumped on every visual change; hosts repaint when it moves.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Converts a screen position to a geographic one.
    pub fn screen_to_geo(&self, screen: Coord<Screen>) -> GeoCoord {
        mercator::to_lon_lat(self.viewport.screen_to_world(screen))
    }

    /// Converts a geographic position to a screen one.
    pub fn geo_to_screen(&self, geo: GeoCoord) -> Coord<Screen> {
        self.viewport.world_to_screen(mercator::from_lon_lat(geo))
    }

    /// The single validation gate for geographic input.
    pub fn is_valid_coordinate(&self, latitude: f64, longitude: f64) -> bool {
        geo::is_valid_coordinate(latitude, longitude)
    }

    /// Draws a marker for `point` and returns its handle.
    ///
    /// Returns `None` and draws nothing if the coordinates are invalid.
    pub fn place_visual_point(&mut self, point: &Point) -> Option<FeatureHandle> {
        if !self.is_valid_coordinate(point.latitude(), point.longitude()) {
            log::warn!(
                "cannot place point '{}': coordinates outside the map",
                point.name
            );
            return None;
        }
        let handle = self.allocate_handle();
        self.points.insert(
            handle,
            Feature::Point {
                position: mercator::from_lon_lat(point.position),
                style: symbol_style(point),
            },
        );
        self.refresh();
        Some(handle)
    }

    /// Restyles the marker of an already placed point.
    pub fn update_point_style(&mut self, point: &Point) -> bool {
        let Some(handle) = point.feature() else {
            return false;
        };
        match self.points.get_mut(handle) {
            Some(Feature::Point { style, .. }) => {
                *style = symbol_style(point);
                self.refresh();
                true
            }
            _ => false,
        }
    }

    /// Removes a point marker. Unknown handles are ignored.
    pub fn remove_visual_point(&mut self, handle: FeatureHandle) {
        if self.points.remove(handle).is_some() {
            self.refresh();
        }
    }

    /// Removes the markers of several points, e.g. pending area vertices.
    pub fn remove_visual_points<'a>(&mut self, points: impl IntoIterator<Item = &'a Point>) {
        for handle in points.into_iter().filter_map(Point::feature) {
            self.points.remove(handle);
        }
        self.refresh();
    }

    pub fn clear_all_points(&mut self) {
        self.points.clear();
        self.refresh();
    }

    /// Draws a closed polygon through `vertices` and returns its handle.
    ///
    /// Returns `None` for fewer than three vertices or if any vertex is
    /// outside the map.
    pub fn place_visual_area(
        &mut self,
        vertices: &[GeoCoord],
        style: AreaStyle,
    ) -> Option<FeatureHandle> {
        if vertices.len() < 3 {
            return None;
        }
        if !vertices
            .iter()
            .all(|v| self.is_valid_coordinate(v.latitude, v.longitude))
        {
            log::warn!("cannot place area: a vertex is outside the map");
            return None;
        }

        let mut ring: Vec<_> = vertices.iter().copied().map(mercator::from_lon_lat).collect();
        ring.push(ring[0]);

        let handle = self.allocate_handle();
        self.areas.insert(
            handle,
            Feature::Polygon {
                ring,
                style: VectorStyle {
                    fill: style.fill,
                    outline: style.border,
                    outline_width: 2.0,
                },
            },
        );
        self.refresh();
        Some(handle)
    }

    /// Removes an area polygon. Unknown handles are ignored.
    pub fn remove_visual_area(&mut self, handle: FeatureHandle) {
        if self.areas.remove(handle).is_some() {
            self.refresh();
        }
    }

    pub fn clear_all_areas(&mut self) {
        self.areas.clear();
        self.refresh();
    }

    /// Returns the first candidate, in slice order, whose marker lies
    /// strictly within the tolerance of `geo` on screen.
    ///
    /// This is the first hit, not necessarily the closest one.
    pub fn find_nearest_point<'a>(
        &self,
        geo: GeoCoord,
        candidates: &'a [Point],
        tolerance: HitTolerance,
    ) -> Option<&'a Point> {
        if !self.is_valid_coordinate(geo.latitude, geo.longitude) {
            return None;
        }
        let target = self.geo_to_screen(geo);
        candidates.iter().find(|candidate| {
            let screen = self.geo_to_screen(candidate.position);
            screen.distance_to(&target) < tolerance.radius_for(candidate)
        })
    }

    /// Centres on a point, keeping the current zoom.
    pub fn frame_on_point(&mut self, point: &Point) {
        if !self.is_valid_coordinate(point.latitude(), point.longitude()) {
            return;
        }
        let center = mercator::from_lon_lat(point.position);
        self.navigate(center, self.viewport.resolution);
    }

    /// Centres on an area's bounding box.
    ///
    /// With `fit_to_view` the zoom is chosen so the whole box fits the
    /// viewport with a [`FRAME_MARGIN`] margin; otherwise zoom is kept.
    pub fn frame_on_area(&mut self, area: &Area, fit_to_view: bool) {
        let Some(bounds) = GeoBounds::from_coords(&area.vertices) else {
            return;
        };
        if !bounds.min.is_valid() || !bounds.max.is_valid() {
            return;
        }
        let center = bounds.world_center();
        let mut resolution = self.viewport.resolution;

        if fit_to_view && self.viewport.width > 0.0 && self.viewport.height > 0.0 {
            let (w, h) = bounds.world_size();
            let fit = (w / self.viewport.width).max(h / self.viewport.height);
            if fit > 0.0 {
                resolution = fit * (1.0 + FRAME_MARGIN);
            }
        }
        self.navigate(center, resolution);
    }

    /// Snapshot of the current camera.
    pub fn camera_state(&self) -> CameraRecord {
        CameraRecord {
            center_x: self.viewport.center.x,
            center_y: self.viewport.center.y,
            resolution: self.viewport.resolution,
            rotation: self.viewport.rotation,
        }
    }

    /// Restores a saved camera. An unusable resolution is replaced by the
    /// default and a non-finite centre by the origin.
    pub fn set_camera_state(&mut self, camera: &CameraRecord) {
        let resolution = camera.effective_resolution();
        let center = if camera.center_x.is_finite() && camera.center_y.is_finite() {
            Coord::new(camera.center_x, camera.center_y)
        } else {
            log::warn!(
                "camera centre ({}, {}) is not finite, using the origin",
                camera.center_x,
                camera.center_y
            );
            Coord::new(0.0, 0.0)
        };
        self.viewport.center = center;
        self.viewport.resolution = resolution;
        self.refresh();
        log::info!(
            "camera restored: x={:.2}, y={:.2}, resolution={:.2}",
            center.x,
            center.y,
            resolution
        );
    }

    fn navigate(&mut self, center: Coord<geo::World>, resolution: f64) {
        self.viewport.center = center;
        self.viewport.resolution = resolution;
        self.last_navigation = Some(Navigation {
            center,
            resolution,
            duration: NAVIGATION_DURATION,
        });
        self.refresh();
    }

    fn allocate_handle(&mut self) -> FeatureHandle {
        self.next_handle += 1;
        FeatureHandle(self.next_handle)
    }

    fn refresh(&mut self) {
        self.revision += 1;
    }
}

fn symbol_style(point: &Point) -> SymbolStyle {
    SymbolStyle {
        fill: point.color,
        outline: Argb::BLACK,
        outline_width: 2.0,
        scale: point.size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DEFAULT_RESOLUTION;

    fn adapter() -> MapAdapter {
        MapAdapter::new(800.0, 600.0)
    }

    fn placed(map: &mut MapAdapter, lat: f64, lon: f64) -> Point {
        let mut p = Point::new(lat, lon);
        p.feature = map.place_visual_point(&p);
        p
    }

    #[test]
    fn test_place_point_creates_marker() {
        let mut map = adapter();
        let p = placed(&mut map, 20.0, 10.0);
        let handle = p.feature().unwrap();
        assert!(map.feature(handle).unwrap().is_point());
        assert_eq!(map.point_layer().len(), 1);
    }

    #[test]
    fn test_place_invalid_point_is_noop() {
        let mut map = adapter();
        assert!(map.place_visual_point(&Point::new(90.0, 0.0)).is_none());
        assert!(map.place_visual_point(&Point::new(f64::NAN, 0.0)).is_none());
        assert!(map.point_layer().is_empty());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut map = adapter();
        let handle = placed(&mut map, 1.0, 1.0).feature().unwrap();
        map.remove_visual_point(handle);
        map.remove_visual_point(handle);
        assert!(map.point_layer().is_empty());
    }

    #[test]
    fn test_area_ring_is_closed() {
        let mut map = adapter();
        let vertices = [
            GeoCoord::new(0.0, 0.0),
            GeoCoord::new(0.0, 1.0),
            GeoCoord::new(1.0, 1.0),
        ];
        let handle = map
            .place_visual_area(&vertices, AreaStyle::default())
            .unwrap();
        let feature = map.feature(handle).unwrap();
        assert!(feature.is_polygon() && !feature.is_point());
        match feature {
            Feature::Polygon { ring, .. } => {
                assert_eq!(ring.len(), 4);
                assert_eq!(ring[0], ring[3]);
            }
            other => panic!("expected polygon, got {other:?}"),
        }
    }

    #[test]
    fn test_area_needs_three_vertices() {
        let mut map = adapter();
        let vertices = [GeoCoord::new(0.0, 0.0), GeoCoord::new(0.0, 1.0)];
        assert!(map
            .place_visual_area(&vertices, AreaStyle::default())
            .is_none());
        assert!(map.area_layer().is_empty());
    }

    #[test]
    fn test_screen_geo_inverse_at_center() {
        let map = adapter();
        let geo = map.screen_to_geo(Coord::new(400.0, 300.0));
        assert!(geo.latitude.abs() < 1e-9);
        assert!(geo.longitude.abs() < 1e-9);
    }

    #[test]
    fn test_hit_returns_first_in_order_not_closest() {
        let mut map = adapter();
        map.set_camera_state(&CameraRecord {
            resolution: 1.0,
            ..Default::default()
        });
        // ~5 m and ~1 m east of the origin; both inside a 10 px radius at 1 m/px.
        let far = Point::new(0.0, 5.0 / 111_319.49).with_name("far");
        let near = Point::new(0.0, 1.0 / 111_319.49).with_name("near");
        let candidates = vec![far, near];
        let hit = map
            .find_nearest_point(GeoCoord::new(0.0, 0.0), &candidates, HitTolerance::default())
            .unwrap();
        assert_eq!(hit.name, "far");
    }

    #[test]
    fn test_hit_misses_outside_tolerance() {
        let mut map = adapter();
        map.set_camera_state(&CameraRecord {
            resolution: 1.0,
            ..Default::default()
        });
        let candidates = vec![Point::new(0.0, 50.0 / 111_319.49)];
        assert!(map
            .find_nearest_point(GeoCoord::new(0.0, 0.0), &candidates, HitTolerance::Fixed(10.0))
            .is_none());
    }

    #[test]
    fn test_scaled_tolerance_uses_point_size() {
        let mut map = adapter();
        map.set_camera_state(&CameraRecord {
            resolution: 1.0,
            ..Default::default()
        });
        let off = 20.0 / 111_319.49;
        let small = vec![Point::new(0.0, off).with_size(1.0)];
        let big = vec![Point::new(0.0, off).with_size(2.0)];
        let origin = GeoCoord::new(0.0, 0.0);
        assert!(map
            .find_nearest_point(origin, &small, HitTolerance::ScaledBySize)
            .is_none());
        assert!(map
            .find_nearest_point(origin, &big, HitTolerance::ScaledBySize)
            .is_some());
    }

    #[test]
    fn test_frame_on_point_keeps_zoom() {
        let mut map = adapter();
        map.set_camera_state(&CameraRecord {
            resolution: 250.0,
            ..Default::default()
        });
        map.frame_on_point(&Point::new(20.0, 10.0));
        let nav = map.last_navigation().unwrap();
        assert_eq!(nav.resolution, 250.0);
        assert_eq!(nav.duration, NAVIGATION_DURATION);
        let expected = mercator::from_lon_lat(GeoCoord::new(20.0, 10.0));
        assert!(map.viewport().center.distance_to(&expected) < 1e-6);
    }

    #[test]
    fn test_frame_on_area_fits_with_margin() {
        let mut map = adapter();
        let area = Area::new(vec![
            GeoCoord::new(-1.0, -2.0),
            GeoCoord::new(-1.0, 2.0),
            GeoCoord::new(1.0, 0.0),
        ]);
        map.frame_on_area(&area, true);

        let vp = *map.viewport();
        let min = mercator::from_lon_lat(GeoCoord::new(-1.0, -2.0));
        let max = mercator::from_lon_lat(GeoCoord::new(1.0, 2.0));
        let a = vp.world_to_screen(min);
        let b = vp.world_to_screen(max);
        // the box is inside the view
        for s in [a, b] {
            assert!(s.x >= 0.0 && s.x <= vp.width);
            assert!(s.y >= 0.0 && s.y <= vp.height);
        }
        // and the wider axis spans width / (1 + margin)
        assert!(((b.x - a.x) - 800.0 / 1.2).abs() < 1e-6);
        assert!(vp.center.x.abs() < 1e-6);
    }

    #[test]
    fn test_frame_on_area_without_fit_keeps_zoom() {
        let mut map = adapter();
        let area = Area::new(vec![
            GeoCoord::new(10.0, 10.0),
            GeoCoord::new(10.0, 12.0),
            GeoCoord::new(12.0, 12.0),
        ]);
        map.frame_on_area(&area, false);
        assert_eq!(map.viewport().resolution, DEFAULT_RESOLUTION);
    }

    #[test]
    fn test_camera_restore_substitutes_zero_resolution() {
        let mut map = adapter();
        map.set_camera_state(&CameraRecord {
            center_x: 100.0,
            center_y: -50.0,
            resolution: 0.0,
            rotation: 0.0,
        });
        let cam = map.camera_state();
        assert_eq!(cam.center_x, 100.0);
        assert_eq!(cam.center_y, -50.0);
        assert_eq!(cam.resolution, DEFAULT_RESOLUTION);
    }

    #[test]
    fn test_camera_restore_replaces_non_finite_center() {
        let mut map = adapter();
        map.set_camera_state(&CameraRecord {
            center_x: f64::NAN,
            center_y: 10.0,
            resolution: 250.0,
            rotation: 0.0,
        });
        let cam = map.camera_state();
        assert_eq!((cam.center_x, cam.center_y), (0.0, 0.0));
        assert_eq!(cam.resolution, 250.0);

        map.set_camera_state(&CameraRecord {
            center_x: 5.0,
            center_y: f64::INFINITY,
            ..cam
        });
        assert_eq!(map.camera_state().center_y, 0.0);
    }

    #[test]
    fn test_layers_are_named_and_areas_translucent() {
        let map = adapter();
        assert_eq!(map.point_layer().name(), "Points");
        assert_eq!(map.point_layer().opacity(), 1.0);
        assert_eq!(map.area_layer().name(), "Areas");
        assert_eq!(map.area_layer().opacity(), 0.3);
    }

    #[test]
    fn test_revision_moves_on_visual_change() {
        let mut map = adapter();
        let before = map.revision();
        let handle = placed(&mut map, 1.0, 1.0).feature().unwrap();
        let after_place = map.revision();
        assert!(after_place > before);
        map.remove_visual_point(handle);
        assert!(map.revision() > after_place);
    }

    #[test]
    fn test_update_style_restyles_in_place() {
        let mut map = adapter();
        let mut p = placed(&mut map, 1.0, 1.0);
        p.color = Argb::opaque(0, 0, 255);
        p.size = 3.0;
        assert!(map.update_point_style(&p));
        match map.feature(p.feature().unwrap()).unwrap() {
            Feature::Point { style, .. } => {
                assert_eq!(style.fill, Argb::opaque(0, 0, 255));
                assert_eq!(style.scale, 3.0);
            }
            other => panic!("expected point, got {other:?}"),
        }
    }
}
