//! Camera capture behind a device trait.
//!
//! The crate never talks to hardware. A host implements [`CaptureDevice`] for its camera API and
//! the booth drives the countdown, framing and mirroring.

use std::{
    sync::atomic::{AtomicBool, Ordering},
    time::Duration,
};

use crate::{
    assets::{
        decode::{EncodedImage, SourceImage},
        encode::encode_png,
    },
    config::settings::CaptureConfig,
    foundation::{
        core::{Affine, Rect, Rgba8},
        error::{DeviceAccessError, FotobooError, FotobooResult},
    },
    geometry::mapper::cover_fit_source_rect,
    render::cpu::Surface,
};

const WAIT_SLICE: Duration = Duration::from_millis(25);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Facing {
    /// Front camera.
    #[default]
    User,
    Environment,
}

/// What to ask the device for. Devices may return frames of any size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StreamRequest {
    pub width: u32,
    pub height: u32,
    pub facing: Facing,
}

impl StreamRequest {
    pub fn from_config(config: &CaptureConfig) -> Self {
        Self {
            width: config.ideal_width,
            height: config.ideal_height,
            facing: Facing::User,
        }
    }
}

pub trait CaptureDevice {
    fn open(&mut self, request: &StreamRequest) -> Result<Box<dyn CaptureStream>, DeviceAccessError>;
}

pub trait CaptureStream: Send {
    /// Latest frame, straight from the sensor (not mirrored).
    fn grab_frame(&mut self) -> FotobooResult<SourceImage>;
    /// Stop the stream. Called at most once.
    fn stop(&mut self);
}

/// Owns a live stream until [`CaptureHandle::release`]; releasing twice is a no-op.
pub struct CaptureHandle {
    stream: Option<Box<dyn CaptureStream>>,
}

impl std::fmt::Debug for CaptureHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureHandle")
            .field("live", &self.is_live())
            .finish()
    }
}

impl CaptureHandle {
    pub fn acquire(
        device: &mut dyn CaptureDevice,
        request: &StreamRequest,
    ) -> Result<Self, DeviceAccessError> {
        let stream = device.open(request)?;
        tracing::debug!(width = request.width, height = request.height, "capture stream opened");
        Ok(Self {
            stream: Some(stream),
        })
    }

    pub fn is_live(&self) -> bool {
        self.stream.is_some()
    }

    pub fn grab_frame(&mut self) -> FotobooResult<SourceImage> {
        match self.stream.as_mut() {
            Some(stream) => stream.grab_frame(),
            None => Err(FotobooError::Device(DeviceAccessError::Unavailable)),
        }
    }

    /// Stop the stream. Returns `true` only for the call that actually stopped it.
    pub fn release(&mut self) -> bool {
        match self.stream.take() {
            Some(mut stream) => {
                stream.stop();
                tracing::debug!("capture stream released");
                true
            }
            None => false,
        }
    }
}

impl Drop for CaptureHandle {
    fn drop(&mut self) {
        self.release();
    }
}

/// Turn a raw frame into a stored photo: cover-fit to the output aspect, optionally mirror, PNG.
pub fn frame_to_photo(frame: &SourceImage, config: &CaptureConfig) -> FotobooResult<EncodedImage> {
    let (w, h) = (config.output_width, config.output_height);
    let mut surface = Surface::new(w, h)?;
    surface.fill(Rgba8::BLACK);

    let src = cover_fit_source_rect(frame.size(), f64::from(w) / f64::from(h));
    let dst = Rect::new(0.0, 0.0, f64::from(w), f64::from(h));
    let mirror = if config.mirror {
        Affine::new([-1.0, 0.0, 0.0, 1.0, f64::from(w), 0.0])
    } else {
        Affine::IDENTITY
    };
    surface.draw_image_region(frame, src, dst, mirror)?;
    encode_png(&surface.into_image()?)
}

/// Progress reported while a capture sequence runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaptureEvent {
    /// Seconds left before shot `shot` (zero-based).
    Countdown { shot: usize, remaining: u32 },
    Captured { shot: usize },
}

#[derive(Clone, Debug, Default)]
pub struct CaptureRun {
    pub photos: Vec<EncodedImage>,
    pub cancelled: bool,
}

/// Take `shots` photos with a countdown before each and a settle delay after each.
///
/// `cancel` is checked at every wait. On cancellation the stream is released and the photos taken
/// so far are returned with `cancelled` set; the caller decides whether to keep them.
#[tracing::instrument(skip(handle, config, cancel, on_event))]
pub fn run_capture_sequence(
    handle: &mut CaptureHandle,
    config: &CaptureConfig,
    shots: usize,
    cancel: &AtomicBool,
    mut on_event: impl FnMut(CaptureEvent),
) -> FotobooResult<CaptureRun> {
    let mut run = CaptureRun::default();
    let settle = Duration::from_millis(config.settle_ms);

    for shot in 0..shots {
        for remaining in (1..=config.countdown_secs).rev() {
            on_event(CaptureEvent::Countdown { shot, remaining });
            if !wait(Duration::from_secs(1), cancel) {
                return Ok(cancelled(handle, run));
            }
        }
        if cancel.load(Ordering::Relaxed) {
            return Ok(cancelled(handle, run));
        }

        let frame = handle.grab_frame()?;
        run.photos.push(frame_to_photo(&frame, config)?);
        on_event(CaptureEvent::Captured { shot });

        if shot + 1 < shots && !wait(settle, cancel) {
            return Ok(cancelled(handle, run));
        }
    }
    Ok(run)
}

fn cancelled(handle: &mut CaptureHandle, mut run: CaptureRun) -> CaptureRun {
    tracing::info!(taken = run.photos.len(), "capture sequence cancelled");
    handle.release();
    run.cancelled = true;
    run
}

/// Sleep for `total`, waking early when `cancel` is set. Returns `false` if cancelled.
fn wait(total: Duration, cancel: &AtomicBool) -> bool {
    let mut left = total;
    loop {
        if cancel.load(Ordering::Relaxed) {
            return false;
        }
        if left.is_zero() {
            return true;
        }
        let step = left.min(WAIT_SLICE);
        std::thread::sleep(step);
        left -= step;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/capture.rs"]
mod tests;
