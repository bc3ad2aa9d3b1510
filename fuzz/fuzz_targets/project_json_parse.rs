//! Fuzz target for project JSON parsing.
//!
//! This fuzzer feeds arbitrary byte sequences to the project parser and,
//! when parsing succeeds, validates and restores the result, checking for
//! panics, crashes, or hangs.

#![no_main]

use geomark::controller::{AnnotationController, ScriptedDialogs};
use geomark::map::MapAdapter;
use geomark::model::io_json::from_json_slice;
use geomark::model::AppSettings;
use geomark::persistence::PersistenceService;
use geomark::validation::{validate_project, ValidateOptions};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let Ok(project) = from_json_slice(data) else {
        return;
    };
    let _ = validate_project(&project, &ValidateOptions::default());

    let mut controller = AnnotationController::new(
        MapAdapter::new(800.0, 600.0),
        ScriptedDialogs::accepting(),
        PersistenceService::new("fuzz.json"),
        AppSettings::default(),
    );
    let _ = controller.apply_project(&project);
    let _ = controller.to_project();
});
