use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use super::*;
use crate::{
    assets::{decode::SourceImage, encode::encode_png, fonts::FontBook},
    foundation::core::Rgba8,
    session::capture::CaptureStream,
};

const DISPLAY: Size = Size::new(400.0, 300.0);

fn small_config() -> FotobooConfig {
    let mut config = FotobooConfig::default();
    config.crop.output_width = 64;
    config.crop.output_height = 36;
    config.capture.countdown_secs = 0;
    config.capture.settle_ms = 0;
    config.capture.output_width = 32;
    config.capture.output_height = 18;
    config.strip.export_scale = 0.2;
    config
}

fn png_file(name: &str, shade: u8) -> (String, Vec<u8>) {
    let png = encode_png(&SourceImage::solid(40, 30, Rgba8::rgb(shade, 0, 0))).unwrap();
    (name.to_string(), png.bytes().to_vec())
}

fn files(n: usize) -> Vec<(String, Vec<u8>)> {
    (0..n)
        .map(|i| png_file(&format!("p{i}.png"), (i * 40) as u8))
        .collect()
}

/// A booth holding `n` committed photos.
fn collected(n: usize) -> SessionOrchestrator {
    let mut booth = SessionOrchestrator::new(small_config());
    booth.ingest(files(n), DISPLAY).unwrap();
    while let CropStep::Next(_) = booth.commit_crop().unwrap() {}
    assert_eq!(booth.photos().len(), n);
    booth
}

fn composed() -> SessionOrchestrator {
    let mut booth = collected(5);
    booth.proceed_to_selection().unwrap();
    for i in [2, 0, 3, 4] {
        booth.toggle_selection(i).unwrap();
    }
    booth.finish_selection().unwrap();
    booth
}

#[test]
fn upload_crops_each_image_in_turn() {
    let mut booth = SessionOrchestrator::new(small_config());
    let mut batch = files(3);
    batch.push(("readme.txt".to_string(), b"not a photo".to_vec()));

    let ingested = booth.ingest(batch, DISPLAY).unwrap();
    assert_eq!(ingested.rejected, vec!["readme.txt".to_string()]);
    assert_eq!(booth.state(), BoothState::Cropping);
    assert_eq!(booth.crop_progress(), Some(CropProgress { index: 0, total: 3 }));
    assert!(booth.crop_session().is_some());

    assert_eq!(
        booth.commit_crop().unwrap(),
        CropStep::Next(CropProgress { index: 1, total: 3 })
    );
    assert_eq!(
        booth.commit_crop().unwrap(),
        CropStep::Next(CropProgress { index: 2, total: 3 })
    );
    assert_eq!(booth.commit_crop().unwrap(), CropStep::Finished { stored: 3 });

    assert_eq!(booth.state(), BoothState::Collected);
    assert!(booth.crop_session().is_none());
    let first = booth.photos()[0].decode().unwrap();
    assert_eq!((first.width(), first.height()), (64, 36));
    assert_eq!(booth.photos()[0].format(), image::ImageFormat::Jpeg);
}

#[test]
fn undecodable_uploads_are_reported_by_name() {
    let mut booth = SessionOrchestrator::new(small_config());
    let truncated_jpeg = vec![0xff, 0xd8, 0xff, 0xe0, 0x00, 0x10, b'J', b'F', b'I', b'F'];
    let batch = vec![
        ("broken.jpg".to_string(), truncated_jpeg),
        png_file("a.png", 10),
        png_file("b.png", 20),
    ];

    let ingested = booth.ingest(batch, DISPLAY).unwrap();
    assert!(ingested.rejected.is_empty());
    assert_eq!(booth.unreadable_uploads(), &["broken.jpg".to_string()]);
    assert_eq!(booth.crop_progress(), Some(CropProgress { index: 1, total: 3 }));

    while let CropStep::Next(_) = booth.commit_crop().unwrap() {}
    assert_eq!(booth.photos().len(), 2);
    assert_eq!(booth.unreadable_uploads(), &["broken.jpg".to_string()]);

    booth.ingest(files(1), DISPLAY).unwrap();
    assert!(booth.unreadable_uploads().is_empty());
}

#[test]
fn cancelling_a_batch_keeps_committed_photos() {
    let mut booth = SessionOrchestrator::new(small_config());
    booth.ingest(files(3), DISPLAY).unwrap();
    booth.commit_crop().unwrap();
    booth.cancel_crop();

    assert_eq!(booth.state(), BoothState::Collected);
    assert_eq!(booth.photos().len(), 1);
    assert!(booth.commit_crop().is_err());
}

#[test]
fn cancelling_the_first_crop_leaves_booth_empty() {
    let mut booth = SessionOrchestrator::new(small_config());
    booth.ingest(files(2), DISPLAY).unwrap();
    booth.cancel_crop();
    assert_eq!(booth.state(), BoothState::Empty);
    assert!(booth.photos().is_empty());
}

#[test]
fn editing_replaces_the_photo_in_place() {
    let mut booth = collected(4);
    let untouched = booth.photos()[0].clone();

    booth.edit_photo(1, DISPLAY).unwrap();
    assert_eq!(booth.state(), BoothState::Cropping);
    booth.crop_session().unwrap().rotate();
    assert_eq!(booth.commit_crop().unwrap(), CropStep::Finished { stored: 1 });

    assert_eq!(booth.photos().len(), 4);
    assert_eq!(booth.photos()[0], untouched);
    assert_eq!(booth.state(), BoothState::Collected);
    assert!(booth.edit_photo(9, DISPLAY).is_err());
}

#[test]
fn selection_needs_four_uploads() {
    let mut booth = collected(3);
    let err = booth.proceed_to_selection().unwrap_err();
    assert_eq!(err.to_string(), "validation error: Please upload at least 4 photos");
    assert_eq!(booth.state(), BoothState::Collected);
}

#[test]
fn finishing_with_three_selected_is_rejected() {
    let mut booth = collected(5);
    booth.proceed_to_selection().unwrap();
    for i in [2, 0, 3] {
        booth.toggle_selection(i).unwrap();
    }

    let err = booth.finish_selection().unwrap_err();
    assert_eq!(err.to_string(), "validation error: Please select exactly 4 photos");
    assert_eq!(booth.state(), BoothState::Selecting);
    assert_eq!(booth.selection().indices(), &[2, 0, 3]);
    assert!(booth.strip().is_none());
}

#[test]
fn strip_follows_pick_order() {
    let booth = composed();
    assert_eq!(booth.state(), BoothState::Composed);
    let strip = booth.strip().unwrap();
    let expected: Vec<_> = [2, 0, 3, 4].iter().map(|&i| booth.photos()[i].clone()).collect();
    assert_eq!(strip.photos(), expected.as_slice());
    assert_eq!(strip.background(), Rgba8::WHITE);
}

#[test]
fn removing_a_photo_reindexes_selection() {
    let mut booth = collected(5);
    booth.proceed_to_selection().unwrap();
    for i in [4, 1, 2] {
        booth.toggle_selection(i).unwrap();
    }
    booth.remove_photo(2).unwrap();
    assert_eq!(booth.photos().len(), 4);
    assert_eq!(booth.selection().indices(), &[3, 1]);
    assert!(booth.toggle_selection(4).is_err());
}

#[test]
fn editor_marks_strip_custom_and_export_reports() {
    let mut booth = composed();
    let layer = booth.open_editor().unwrap();
    layer.add_sticker("🎉").unwrap();
    assert_eq!(booth.state(), BoothState::Editing);
    booth.set_background(Rgba8::rgb(0xfe, 0xd7, 0xaa)).unwrap();

    let mut compositor = StripCompositor::new(FontBook::empty());
    let export = booth.export(&mut compositor).unwrap();
    assert!(export.file_name.starts_with("fotoboo-custom-"));
    assert_eq!((export.width, export.height), (80, 186));
    assert_eq!(export.report.skipped_elements.len(), 1);
    assert_eq!(booth.state(), BoothState::Exported);

    // Exporting again is allowed.
    assert!(booth.export(&mut compositor).is_ok());
}

#[test]
fn closing_editor_keeps_decorations() {
    let mut booth = composed();
    booth.open_editor().unwrap().add_text("hi", "Tinos, serif", 32.0, Rgba8::BLACK).unwrap();
    booth.close_editor().unwrap();
    assert_eq!(booth.state(), BoothState::Composed);
    let strip = booth.strip().unwrap();
    assert_eq!(strip.decorations().len(), 1);
    assert!(strip.decorations().selected_id().is_none());
    assert!(booth.decorations().is_err());
}

#[test]
fn export_requires_a_composed_strip() {
    let mut booth = collected(4);
    let mut compositor = StripCompositor::new(FontBook::empty());
    assert!(booth.export(&mut compositor).unwrap_err().is_validation());
    assert_eq!(booth.state(), BoothState::Collected);
}

struct Camera {
    stops: Arc<AtomicUsize>,
    fail: Option<DeviceAccessError>,
}

struct Stream {
    stops: Arc<AtomicUsize>,
}

impl CaptureStream for Stream {
    fn grab_frame(&mut self) -> FotobooResult<SourceImage> {
        Ok(SourceImage::solid(64, 48, Rgba8::rgb(0, 128, 0)))
    }

    fn stop(&mut self) {
        self.stops.fetch_add(1, Ordering::SeqCst);
    }
}

impl CaptureDevice for Camera {
    fn open(
        &mut self,
        _request: &StreamRequest,
    ) -> Result<Box<dyn crate::session::capture::CaptureStream>, DeviceAccessError> {
        match self.fail.clone() {
            Some(err) => Err(err),
            None => Ok(Box::new(Stream {
                stops: Arc::clone(&self.stops),
            })),
        }
    }
}

fn camera() -> (Camera, Arc<AtomicUsize>) {
    let stops = Arc::new(AtomicUsize::new(0));
    (
        Camera {
            stops: Arc::clone(&stops),
            fail: None,
        },
        stops,
    )
}

#[test]
fn capture_sequence_fills_the_booth() {
    let (mut cam, stops) = camera();
    let mut booth = SessionOrchestrator::new(small_config());
    booth.start_capture(&mut cam).unwrap();
    assert_eq!(booth.state(), BoothState::Capturing);

    let cancel = AtomicBool::new(false);
    let run = booth.run_capture_sequence(&cancel, |_| {}).unwrap();
    assert_eq!(run.photos.len(), 4);
    assert_eq!(booth.photos().len(), 4);
    assert_eq!(booth.state(), BoothState::Selecting);

    let retake = booth.retake_single_photo(&cancel, |_| {}).unwrap();
    assert_eq!(retake.photos.len(), 1);
    assert_eq!(booth.photos().len(), 5);

    assert!(booth.release_capture());
    assert!(!booth.release_capture());
    assert_eq!(stops.load(Ordering::SeqCst), 1);
}

#[test]
fn cancelled_capture_keeps_nothing_and_releases() {
    let (mut cam, stops) = camera();
    let mut booth = SessionOrchestrator::new(small_config());
    booth.start_capture(&mut cam).unwrap();

    let cancel = AtomicBool::new(true);
    let run = booth.run_capture_sequence(&cancel, |_| {}).unwrap();
    assert!(run.cancelled);
    assert!(booth.photos().is_empty());
    assert_eq!(booth.state(), BoothState::Empty);
    assert!(!booth.is_capture_live());
    assert_eq!(stops.load(Ordering::SeqCst), 1);
}

#[test]
fn starting_capture_resets_earlier_round() {
    let (mut cam, _) = camera();
    let mut booth = collected(4);
    booth.start_capture(&mut cam).unwrap();
    assert!(booth.photos().is_empty());
    assert_eq!(booth.capture_photo().unwrap(), 1);
}

#[test]
fn camera_failure_is_kept_for_display() {
    let (mut cam, _) = camera();
    cam.fail = Some(DeviceAccessError::InUse);
    let mut booth = SessionOrchestrator::new(small_config());

    let err = booth.start_capture(&mut cam).unwrap_err();
    assert!(matches!(err, FotobooError::Device(DeviceAccessError::InUse)));
    assert_eq!(booth.camera_error(), Some(&DeviceAccessError::InUse));
    assert_eq!(booth.state(), BoothState::Empty);

    cam.fail = None;
    booth.start_capture(&mut cam).unwrap();
    assert!(booth.camera_error().is_none());
}

#[test]
fn reset_returns_to_empty_and_releases_camera() {
    let (mut cam, stops) = camera();
    let mut booth = composed();
    booth.reset();
    assert_eq!(booth.state(), BoothState::Empty);
    assert!(booth.photos().is_empty());
    assert!(booth.strip().is_none());

    booth.start_capture(&mut cam).unwrap();
    booth.reset();
    booth.reset();
    assert_eq!(stops.load(Ordering::SeqCst), 1);
}
