//! The booth flow: collect photos, crop them, pick four, decorate, export.

use std::sync::atomic::AtomicBool;

use crate::{
    assets::decode::EncodedImage,
    config::settings::FotobooConfig,
    crop::{
        queue::{CropProgress, CropQueue},
        session::CropSession,
    },
    decor::layer::DecorationLayer,
    foundation::{
        core::{Rgba8, Size},
        error::{DeviceAccessError, FotobooError, FotobooResult},
    },
    session::{
        capture::{
            CaptureDevice, CaptureEvent, CaptureHandle, CaptureRun, StreamRequest, frame_to_photo,
            run_capture_sequence,
        },
        ingest::{Ingested, ingest_files},
        selection::{MAX_SELECTION, SelectionSet},
    },
    strip::{
        compositor::StripCompositor, export::StripExport, job::RenderJob, photo_strip::PhotoStrip,
    },
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BoothState {
    Empty,
    Capturing,
    Cropping,
    Collected,
    Selecting,
    Composed,
    Editing,
    Exported,
}

/// Where a committed crop goes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CropTarget {
    Append,
    Replace(usize),
}

/// Result of committing the current crop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CropStep {
    /// The crop was stored and the next queued image is loaded.
    Next(CropProgress),
    /// The crop was stored and nothing is left to crop.
    Finished { stored: usize },
    /// The crop session had no image loaded; nothing changed.
    NotReady,
}

#[derive(Debug)]
pub struct SessionOrchestrator {
    config: FotobooConfig,
    state: BoothState,
    photos: Vec<EncodedImage>,
    selection: SelectionSet,
    queue: CropQueue,
    crop: CropSession,
    crop_target: CropTarget,
    crop_display: Size,
    progress: Option<CropProgress>,
    stored_this_batch: usize,
    batch_names: Vec<String>,
    unreadable: Vec<String>,
    strip: Option<PhotoStrip>,
    capture: Option<CaptureHandle>,
    camera_error: Option<DeviceAccessError>,
}

impl SessionOrchestrator {
    pub fn new(config: FotobooConfig) -> Self {
        Self {
            crop: CropSession::new(config.crop.clone()),
            config,
            state: BoothState::Empty,
            photos: Vec::new(),
            selection: SelectionSet::new(),
            queue: CropQueue::default(),
            crop_target: CropTarget::Append,
            crop_display: Size::ZERO,
            progress: None,
            stored_this_batch: 0,
            batch_names: Vec::new(),
            unreadable: Vec::new(),
            strip: None,
            capture: None,
            camera_error: None,
        }
    }

    pub fn state(&self) -> BoothState {
        self.state
    }

    pub fn config(&self) -> &FotobooConfig {
        &self.config
    }

    pub fn photos(&self) -> &[EncodedImage] {
        &self.photos
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn strip(&self) -> Option<&PhotoStrip> {
        self.strip.as_ref()
    }

    pub fn crop_progress(&self) -> Option<CropProgress> {
        self.progress
    }

    /// Uploads of the current batch that looked like images but could not be decoded.
    pub fn unreadable_uploads(&self) -> &[String] {
        &self.unreadable
    }

    /// The crop in progress, for pointer and zoom input.
    pub fn crop_session(&mut self) -> Option<&mut CropSession> {
        (self.state == BoothState::Cropping).then_some(&mut self.crop)
    }

    /// Inline message for the last failed camera request.
    pub fn camera_error(&self) -> Option<&DeviceAccessError> {
        self.camera_error.as_ref()
    }

    pub fn is_capture_live(&self) -> bool {
        self.capture.as_ref().is_some_and(CaptureHandle::is_live)
    }

    /// Accept user files; the images among them are queued for cropping in `display`-sized boxes.
    pub fn ingest(&mut self, files: Vec<(String, Vec<u8>)>, display: Size) -> FotobooResult<Ingested> {
        self.require(&[BoothState::Empty, BoothState::Collected], "upload photos")?;
        let ingested = ingest_files(files)?;
        self.queue = CropQueue::new(ingested.images.clone());
        self.batch_names = ingested.names.clone();
        self.unreadable.clear();
        self.crop_target = CropTarget::Append;
        self.crop_display = display;
        self.stored_this_batch = 0;
        self.begin_next_crop()?;
        Ok(ingested)
    }

    /// Load the next queued image into the crop session.
    ///
    /// Images that fail to decode are skipped and listed in
    /// [`SessionOrchestrator::unreadable_uploads`]. Returns `None` once the queue is exhausted, and the
    /// booth leaves the cropping state.
    pub fn begin_next_crop(&mut self) -> FotobooResult<Option<CropProgress>> {
        while let Some((image, progress)) = self.queue.advance() {
            match self.crop.begin_encoded(&image, self.crop_display) {
                Ok(()) => {
                    self.progress = Some(progress);
                    self.state = BoothState::Cropping;
                    return Ok(Some(progress));
                }
                Err(err) if err.is_validation() => return Err(err),
                Err(err) => {
                    let name = self
                        .batch_names
                        .get(progress.index)
                        .cloned()
                        .unwrap_or_else(|| format!("image {}", progress.index + 1));
                    tracing::warn!(%name, error = %err, "skipping undecodable upload");
                    self.unreadable.push(name);
                }
            }
        }
        self.finish_cropping();
        Ok(None)
    }

    /// Store the current crop and move on to the next queued image.
    pub fn commit_crop(&mut self) -> FotobooResult<CropStep> {
        self.require(&[BoothState::Cropping], "commit a crop")?;
        let Some(cropped) = self.crop.commit()? else {
            return Ok(CropStep::NotReady);
        };

        match self.crop_target {
            CropTarget::Append => {
                self.photos.push(cropped);
                self.stored_this_batch += 1;
            }
            CropTarget::Replace(index) => {
                if let Some(slot) = self.photos.get_mut(index) {
                    *slot = cropped;
                }
                self.stored_this_batch += 1;
                self.queue.clear();
            }
        }

        match self.begin_next_crop()? {
            Some(progress) => Ok(CropStep::Next(progress)),
            None => Ok(CropStep::Finished {
                stored: self.stored_this_batch,
            }),
        }
    }

    /// Abandon the crop and every image still queued. Committed photos are untouched.
    pub fn cancel_crop(&mut self) {
        if self.state != BoothState::Cropping {
            return;
        }
        self.crop.cancel();
        self.queue.clear();
        tracing::info!("upload cancelled");
        self.finish_cropping();
    }

    /// Re-crop photo `index`; the committed result replaces it in place.
    pub fn edit_photo(&mut self, index: usize, display: Size) -> FotobooResult<CropProgress> {
        self.require(&[BoothState::Collected], "edit a photo")?;
        let photo = self.photo_at(index)?.clone();
        self.crop.begin_encoded(&photo, display)?;
        self.queue.clear();
        self.batch_names.clear();
        self.unreadable.clear();
        self.crop_target = CropTarget::Replace(index);
        self.crop_display = display;
        self.stored_this_batch = 0;
        let progress = CropProgress { index: 0, total: 1 };
        self.progress = Some(progress);
        self.state = BoothState::Cropping;
        Ok(progress)
    }

    /// Drop photo `index` and keep the selection pointing at the same photos.
    pub fn remove_photo(&mut self, index: usize) -> FotobooResult<()> {
        self.require(
            &[BoothState::Collected, BoothState::Selecting],
            "remove a photo",
        )?;
        self.photo_at(index)?;
        self.photos.remove(index);
        self.selection.on_photo_removed(index);
        if self.photos.is_empty() && self.state == BoothState::Collected {
            self.state = BoothState::Empty;
        }
        Ok(())
    }

    pub fn proceed_to_selection(&mut self) -> FotobooResult<()> {
        self.require(&[BoothState::Collected], "select photos")?;
        if self.photos.len() < MAX_SELECTION {
            return Err(FotobooError::validation(format!(
                "Please upload at least {MAX_SELECTION} photos"
            )));
        }
        self.state = BoothState::Selecting;
        Ok(())
    }

    /// Toggle photo `index` in the selection; returns whether it is now selected.
    pub fn toggle_selection(&mut self, index: usize) -> FotobooResult<bool> {
        self.require(&[BoothState::Selecting], "select photos")?;
        self.photo_at(index)?;
        self.selection.toggle(index)
    }

    /// Build the strip from the four selected photos, in pick order.
    pub fn finish_selection(&mut self) -> FotobooResult<&PhotoStrip> {
        self.require(&[BoothState::Selecting], "finish selection")?;
        if !self.selection.is_full() {
            return Err(FotobooError::validation(format!(
                "Please select exactly {MAX_SELECTION} photos"
            )));
        }
        let photos = self
            .selection
            .indices()
            .iter()
            .filter_map(|&i| self.photos.get(i).cloned())
            .collect();
        let strip = PhotoStrip::new(photos, self.config.strip.background)?;
        self.state = BoothState::Composed;
        Ok(self.strip.insert(strip))
    }

    /// Go back from the composed strip to picking photos. Decorations are discarded.
    pub fn back_to_selection(&mut self) -> FotobooResult<()> {
        self.require(
            &[BoothState::Composed, BoothState::Exported],
            "change the selection",
        )?;
        self.strip = None;
        self.state = BoothState::Selecting;
        Ok(())
    }

    pub fn open_editor(&mut self) -> FotobooResult<&mut DecorationLayer> {
        self.require(
            &[BoothState::Composed, BoothState::Exported, BoothState::Editing],
            "open the editor",
        )?;
        let strip = self
            .strip
            .as_mut()
            .ok_or_else(|| FotobooError::validation("Please select exactly 4 photos"))?;
        strip.set_custom(true);
        self.state = BoothState::Editing;
        Ok(strip.decorations_mut())
    }

    pub fn close_editor(&mut self) -> FotobooResult<()> {
        self.require(&[BoothState::Editing], "close the editor")?;
        if let Some(strip) = self.strip.as_mut() {
            strip.decorations_mut().select(None);
        }
        self.state = BoothState::Composed;
        Ok(())
    }

    /// Decorations of the strip being edited.
    pub fn decorations(&mut self) -> FotobooResult<&mut DecorationLayer> {
        self.require(&[BoothState::Editing], "edit decorations")?;
        Ok(self.composed_strip_mut()?.decorations_mut())
    }

    pub fn set_background(&mut self, color: Rgba8) -> FotobooResult<()> {
        self.require(
            &[BoothState::Composed, BoothState::Editing, BoothState::Exported],
            "change the background",
        )?;
        self.composed_strip_mut()?.set_background(color);
        Ok(())
    }

    /// Render the composed strip. On failure the booth stays where it was so the user can retry.
    pub fn export(&mut self, compositor: &mut StripCompositor) -> FotobooResult<StripExport> {
        self.require(
            &[BoothState::Composed, BoothState::Editing, BoothState::Exported],
            "export",
        )?;
        let strip = self
            .strip
            .as_ref()
            .ok_or_else(|| FotobooError::validation("Please select exactly 4 photos"))?;
        let job = RenderJob::from_strip(strip, &self.config.strip, &self.config.export);
        let export = compositor.export(&job, &self.config.export.file_prefix)?;
        self.state = BoothState::Exported;
        Ok(export)
    }

    /// Acquire the camera (reusing a live stream) and start a fresh capture round.
    ///
    /// Photos and selection from an earlier round are discarded. Device failures are kept for
    /// [`Self::camera_error`] and returned.
    pub fn start_capture(&mut self, device: &mut dyn CaptureDevice) -> FotobooResult<()> {
        self.require(
            &[
                BoothState::Empty,
                BoothState::Collected,
                BoothState::Selecting,
                BoothState::Capturing,
            ],
            "start the camera",
        )?;
        if !self.is_capture_live() {
            let request = StreamRequest::from_config(&self.config.capture);
            match CaptureHandle::acquire(device, &request) {
                Ok(handle) => self.capture = Some(handle),
                Err(err) => {
                    tracing::warn!(error = %err, "camera unavailable");
                    self.camera_error = Some(err.clone());
                    return Err(err.into());
                }
            }
        }
        self.camera_error = None;
        self.photos.clear();
        self.selection.clear();
        self.strip = None;
        self.state = BoothState::Capturing;
        Ok(())
    }

    /// Grab one frame now and store it. Returns the number of photos collected.
    pub fn capture_photo(&mut self) -> FotobooResult<usize> {
        self.require(&[BoothState::Capturing], "take a photo")?;
        let handle = self
            .capture
            .as_mut()
            .ok_or(FotobooError::Device(DeviceAccessError::Unavailable))?;
        let frame = handle.grab_frame()?;
        self.photos.push(frame_to_photo(&frame, &self.config.capture)?);
        Ok(self.photos.len())
    }

    /// Run the configured countdown-and-shoot sequence.
    ///
    /// A cancelled run keeps nothing from that run and releases the camera.
    pub fn run_capture_sequence(
        &mut self,
        cancel: &AtomicBool,
        on_event: impl FnMut(CaptureEvent),
    ) -> FotobooResult<CaptureRun> {
        let shots = self.config.capture.shots;
        self.run_shots(shots, cancel, on_event)
    }

    /// Take one more photo with a countdown, appending it to the collection.
    pub fn retake_single_photo(
        &mut self,
        cancel: &AtomicBool,
        on_event: impl FnMut(CaptureEvent),
    ) -> FotobooResult<CaptureRun> {
        if matches!(self.state, BoothState::Collected | BoothState::Selecting) && self.is_capture_live()
        {
            self.state = BoothState::Capturing;
        }
        self.run_shots(1, cancel, on_event)
    }

    fn run_shots(
        &mut self,
        shots: usize,
        cancel: &AtomicBool,
        on_event: impl FnMut(CaptureEvent),
    ) -> FotobooResult<CaptureRun> {
        self.require(&[BoothState::Capturing], "take photos")?;
        let handle = self
            .capture
            .as_mut()
            .ok_or(FotobooError::Device(DeviceAccessError::Unavailable))?;
        let run = run_capture_sequence(handle, &self.config.capture, shots, cancel, on_event)?;
        if !run.cancelled {
            self.photos.extend(run.photos.iter().cloned());
        }
        self.state = self.settled_state();
        if self.state == BoothState::Collected && self.photos.len() >= MAX_SELECTION {
            self.state = BoothState::Selecting;
        }
        Ok(run)
    }

    /// Stop the camera. Safe to call any number of times.
    pub fn release_capture(&mut self) -> bool {
        let released = self.capture.as_mut().is_some_and(CaptureHandle::release);
        self.capture = None;
        if self.state == BoothState::Capturing {
            self.state = self.settled_state();
        }
        released
    }

    /// Back to an empty booth. The camera is released.
    pub fn reset(&mut self) {
        self.release_capture();
        self.crop.cancel();
        self.queue.clear();
        self.batch_names.clear();
        self.unreadable.clear();
        self.photos.clear();
        self.selection.clear();
        self.strip = None;
        self.progress = None;
        self.camera_error = None;
        self.state = BoothState::Empty;
    }

    fn finish_cropping(&mut self) {
        self.progress = None;
        self.crop_target = CropTarget::Append;
        self.state = self.settled_state();
    }

    fn settled_state(&self) -> BoothState {
        if self.photos.is_empty() {
            BoothState::Empty
        } else {
            BoothState::Collected
        }
    }

    fn photo_at(&self, index: usize) -> FotobooResult<&EncodedImage> {
        self.photos.get(index).ok_or_else(|| {
            FotobooError::validation(format!(
                "photo {index} does not exist ({} collected)",
                self.photos.len()
            ))
        })
    }

    fn composed_strip_mut(&mut self) -> FotobooResult<&mut PhotoStrip> {
        self.strip
            .as_mut()
            .ok_or_else(|| FotobooError::validation("Please select exactly 4 photos"))
    }

    fn require(&self, allowed: &[BoothState], action: &str) -> FotobooResult<()> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(FotobooError::validation(format!(
                "cannot {action} while {:?}",
                self.state
            )))
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/orchestrator.rs"]
mod tests;
