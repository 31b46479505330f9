//! Fixed-rate frame loop.
//!
//! [`FrameScheduler::tick`] does all per-frame work except sleeping and
//! flushing, and reports how long the caller should wait. [`FrameScheduler::run`]
//! wraps it into a blocking loop for the binary.

use std::sync::atomic::{AtomicBool, Ordering};

use embassy_time::{Duration, Instant};
use heapless::HistoryBuffer;
use tracing::{error, info, warn};

use crate::canvas::Canvas;
use crate::color::{BLACK, Rgb};
use crate::driver::{DisplayError, OutputDriver};
use crate::frame_state::FrameState;
use crate::geometry::Geometry;
use crate::message::{PIXELS_TOPIC, encode_pixels};
use crate::transport::Transport;

/// Default target frame rate
pub const DEFAULT_FPS: f32 = 60.0;

/// Number of frame periods averaged for the frame rate report
pub const FRAME_RATE_WINDOW: usize = 60;

const REPORT_INTERVAL: Duration = Duration::from_secs(1);
const ZERO: Duration = Duration::from_ticks(0);

/// Whether this instance follows remote commands or publishes its frames
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Role {
    /// Consume control messages, publish nothing
    #[default]
    Follower,
    /// Ignore control messages, publish every rendered frame
    Leader,
}

#[derive(Debug, Clone, Copy)]
pub struct SchedulerOptions {
    pub frame_duration: Duration,
    pub role: Role,
    /// Log a warning whenever a frame overruns its budget
    pub warn_lag: bool,
    /// Log the measured frame rate once per second
    pub print_frame_rate: bool,
}

impl Default for SchedulerOptions {
    fn default() -> Self {
        Self {
            frame_duration: frame_duration(DEFAULT_FPS),
            role: Role::Follower,
            warn_lag: false,
            print_frame_rate: false,
        }
    }
}

/// Frame period for a target rate
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn frame_duration(fps: f32) -> Duration {
    Duration::from_micros((1_000_000.0 / fps).round() as u64)
}

/// Result of a frame tick operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameResult {
    /// How long to wait before presenting the frame
    pub sleep_duration: Duration,
    /// The frame took longer than its budget
    pub lagging: bool,
}

/// Rolling window of frame periods
struct FrameStats {
    periods: HistoryBuffer<u64, FRAME_RATE_WINDOW>,
    last_report: Option<Instant>,
}

impl FrameStats {
    const fn new() -> Self {
        Self {
            periods: HistoryBuffer::new(),
            last_report: None,
        }
    }

    fn record(&mut self, period: Duration) {
        self.periods.write(period.as_micros());
    }

    fn frame_rate(&self) -> Option<f32> {
        let total: u64 = self.periods.iter().sum();
        (total > 0).then(|| self.periods.len() as f32 * 1_000_000.0 / total as f32)
    }

    /// Whether a report is due, restarting the report interval if so
    fn report_due(&mut self, now: Instant) -> bool {
        match self.last_report {
            Some(last) if now.saturating_duration_since(last) < REPORT_INTERVAL => false,
            _ => {
                self.last_report = Some(now);
                true
            }
        }
    }
}

/// Drives the frame state at a fixed rate
///
/// # Usage
///
/// ```ignore
/// let mut scheduler = FrameScheduler::new(&geometry, state, driver, transport, options);
///
/// loop {
///     let result = scheduler.tick(Instant::now());
///     sleep(result.sleep_duration);
///     scheduler.present()?;
/// }
/// ```
pub struct FrameScheduler<'a, O: OutputDriver, T: Transport> {
    geometry: &'a Geometry,
    state: FrameState,
    output: O,
    transport: T,
    options: SchedulerOptions,
    pixels: Vec<Rgb>,
    last_frame: Option<Instant>,
    stats: FrameStats,
}

impl<'a, O: OutputDriver, T: Transport> FrameScheduler<'a, O, T> {
    pub fn new(
        geometry: &'a Geometry,
        state: FrameState,
        output: O,
        transport: T,
        options: SchedulerOptions,
    ) -> Self {
        if options.role == Role::Leader {
            info!("running as leader, publishing frames");
        }
        Self {
            geometry,
            state,
            output,
            transport,
            options,
            pixels: vec![BLACK; geometry.count()],
            last_frame: None,
            stats: FrameStats::new(),
        }
    }

    pub const fn state(&self) -> &FrameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut FrameState {
        &mut self.state
    }

    /// The frame buffer as it will be flushed by [`FrameScheduler::present`]
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    pub const fn output(&self) -> &O {
        &self.output
    }

    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Build one frame and compute pacing
    ///
    /// 1. Followers handle at most one pending control message
    /// 2. The buffer is cleared and the active mode rendered, as the
    ///    modifiers allow
    /// 3. Spin and reverse are applied
    /// 4. The time since the previous frame decides the sleep; slave mode
    ///    never sleeps so it tracks the upstream rate
    pub fn tick(&mut self, now: Instant) -> FrameResult {
        if self.options.role == Role::Follower {
            if let Some(message) = self.transport.try_receive() {
                self.state.handle_message(message);
            }
        }

        let mut canvas = Canvas::new(&mut self.pixels, self.geometry);
        self.state.draw(&mut canvas);
        self.state.apply_modifiers(&mut self.pixels);

        self.pace(now)
    }

    fn pace(&mut self, now: Instant) -> FrameResult {
        let Some(last_frame) = self.last_frame else {
            self.last_frame = Some(now);
            return FrameResult {
                sleep_duration: ZERO,
                lagging: false,
            };
        };

        let budget = self.options.frame_duration;
        let elapsed = now.saturating_duration_since(last_frame);
        let lagging = elapsed > budget;
        let sleep_duration = if self.state.is_slave() {
            ZERO
        } else {
            budget.checked_sub(elapsed).unwrap_or(ZERO)
        };

        if lagging && self.options.warn_lag {
            warn!(
                elapsed_us = elapsed.as_micros(),
                budget_us = budget.as_micros(),
                "frame lagging"
            );
        }

        let frame_end = now + sleep_duration;
        self.stats
            .record(frame_end.saturating_duration_since(last_frame));
        self.last_frame = Some(frame_end);

        if self.options.print_frame_rate && self.stats.report_due(now) {
            if let Some(fps) = self.stats.frame_rate() {
                info!("{fps:.1} fps");
            }
        }

        FrameResult {
            sleep_duration,
            lagging,
        }
    }

    /// Flush the buffer to the driver and, as leader, publish it
    pub fn present(&mut self) -> Result<(), DisplayError> {
        self.output.write(&self.pixels)?;
        if self.options.role == Role::Leader {
            self.publish();
        }
        Ok(())
    }

    fn publish(&mut self) {
        let payload = match encode_pixels(&self.pixels) {
            Ok(payload) => payload,
            Err(err) => {
                warn!(%err, "failed to encode frame");
                return;
            }
        };
        if let Err(err) = self.transport.publish(PIXELS_TOPIC, &payload) {
            warn!(%err, "failed to publish frame");
        }
    }

    /// Tick, sleep the remainder of the frame, then present
    pub fn run_frame(&mut self) -> Result<FrameResult, DisplayError> {
        let result = self.tick(Instant::now());
        if result.sleep_duration > ZERO {
            std::thread::sleep(std::time::Duration::from_micros(
                result.sleep_duration.as_micros(),
            ));
        }
        self.present()?;
        Ok(result)
    }

    /// Run frames until `shutdown` is set or the display fails
    ///
    /// The driver is closed either way; a display failure is returned.
    pub fn run(&mut self, shutdown: &AtomicBool) -> Result<(), DisplayError> {
        let result = loop {
            if shutdown.load(Ordering::Relaxed) {
                break Ok(());
            }
            if let Err(err) = self.run_frame() {
                error!(%err, "display failed, shutting down");
                break Err(err);
            }
        };
        self.close();
        result
    }

    /// Close the driver, logging any failure
    pub fn close(&mut self) {
        if let Err(err) = self.output.close() {
            warn!(%err, "failed to close display");
        }
    }
}
