//! Project file validation.
//!
//! Checks a [`ProjectFile`] before (or instead of) loading it, so a user
//! can see which entries a load would silently skip:
//! - coordinates that are NaN or outside the mercator bounds
//! - colour strings that do not parse
//! - point sizes that are not positive
//! - areas with fewer than three vertices
//! - camera resolutions that would be replaced by the default

mod report;

pub use report::{IssueCode, IssueContext, Severity, ValidationIssue, ValidationReport};

use crate::geo::mercator::{MAX_LATITUDE, MAX_LONGITUDE, MIN_LATITUDE, MIN_LONGITUDE};
use crate::geo::Argb;
use crate::model::{CameraRecord, ProjectFile, DEFAULT_RESOLUTION};

/// Options for validation behavior.
#[derive(Clone, Debug, Default)]
pub struct ValidateOptions {
    /// If true, treat warnings as errors.
    pub strict: bool,
}

/// Validates a project and returns a report of all issues found.
pub fn validate_project(project: &ProjectFile, _opts: &ValidateOptions) -> ValidationReport {
    let mut report = ValidationReport::new();

    validate_camera(&project.camera, &mut report);

    for (index, point) in project.points.iter().enumerate() {
        let ctx = IssueContext::Point { index };
        check_coordinate(point.latitude, point.longitude, &ctx, &mut report);
        check_color(&point.color, &ctx, &mut report);
        if !(point.size.is_finite() && point.size > 0.0) {
            report.add(ValidationIssue::warning(
                IssueCode::NonPositiveSize,
                format!("Size {} is not positive; the default will be used", point.size),
                ctx,
            ));
        }
    }

    for (index, area) in project.areas.iter().enumerate() {
        if area.points.len() < 3 {
            report.add(ValidationIssue::error(
                IssueCode::TooFewVertices,
                format!("Area '{}' has {} vertices (need 3)", area.name, area.points.len()),
                IssueContext::Area { index },
            ));
        }
        for (vertex, p) in area.points.iter().enumerate() {
            check_coordinate(
                p.latitude,
                p.longitude,
                &IssueContext::AreaVertex {
                    area: index,
                    vertex,
                },
                &mut report,
            );
        }
        let ctx = IssueContext::Area { index };
        check_color(&area.fill_color, &ctx, &mut report);
        check_color(&area.border_color, &ctx, &mut report);
    }

    report
}

fn validate_camera(camera: &CameraRecord, report: &mut ValidationReport) {
    if !(camera.center_x.is_finite() && camera.center_y.is_finite()) {
        report.add(ValidationIssue::error(
            IssueCode::CameraNotFinite,
            format!(
                "Camera centre ({}, {}) is not finite",
                camera.center_x, camera.center_y
            ),
            IssueContext::Camera,
        ));
    }
    if camera.effective_resolution() != camera.resolution {
        report.add(ValidationIssue::warning(
            IssueCode::InvalidResolution,
            format!(
                "Resolution {} will be replaced by {}",
                camera.resolution, DEFAULT_RESOLUTION
            ),
            IssueContext::Camera,
        ));
    }
}

fn check_coordinate(latitude: f64, longitude: f64, ctx: &IssueContext, report: &mut ValidationReport) {
    if !(latitude.is_finite() && longitude.is_finite()) {
        report.add(ValidationIssue::error(
            IssueCode::CoordinateNotFinite,
            format!("Coordinate ({}, {}) is not finite", latitude, longitude),
            ctx.clone(),
        ));
        return;
    }
    if !(MIN_LATITUDE..=MAX_LATITUDE).contains(&latitude) {
        report.add(ValidationIssue::error(
            IssueCode::LatitudeOutOfRange,
            format!(
                "Latitude {} outside [{}, {}]",
                latitude, MIN_LATITUDE, MAX_LATITUDE
            ),
            ctx.clone(),
        ));
    }
    if !(MIN_LONGITUDE..=MAX_LONGITUDE).contains(&longitude) {
        report.add(ValidationIssue::error(
            IssueCode::LongitudeOutOfRange,
            format!(
                "Longitude {} outside [{}, {}]",
                longitude, MIN_LONGITUDE, MAX_LONGITUDE
            ),
            ctx.clone(),
        ));
    }
}

fn check_color(value: &str, ctx: &IssueContext, report: &mut ValidationReport) {
    match value.parse::<Argb>() {
        Ok(color) if color.a == 0 => report.add(ValidationIssue::warning(
            IssueCode::TransparentColor,
            format!("Colour '{}' is fully transparent", value),
            ctx.clone(),
        )),
        Ok(_) => {}
        Err(_) => report.add(ValidationIssue::error(
            IssueCode::InvalidColor,
            format!("Colour '{}' is not #AARRGGBB", value),
            ctx.clone(),
        )),
    }
}
