/// Live progress-bar component.
///
/// A loader hands a [`LoaderHandle`] to its trigger, which starts background
/// work that reports progress through the handle. The thread calling `run`
/// polls the handle at a fixed interval and redraws the bar in place until
/// progress reaches 1.0. The background task is owned by the loader: it is
/// told to stop through [`LoaderHandle::is_cancelled`] and joined before
/// `run` returns.
use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{debug, trace, warn};

use crate::constants::{MIN_BAR_WIDTH, POLL_INTERVAL};
use crate::writer::Writer;

/// Columns reserved right of the bar: the closing bracket lives at
/// `width - BAR_MARGIN`, followed by the percentage field and `%`.
const BAR_MARGIN: usize = 6;

/// Single-slot handoff between the worker and the render loop.
#[derive(Debug)]
struct Progress {
    /// `f64` bit pattern of the latest accepted value.
    bits: AtomicU64,
    dirty: AtomicBool,
    cancelled: AtomicBool,
}

impl Progress {
    fn new() -> Self {
        Self {
            bits: AtomicU64::new(0f64.to_bits()),
            dirty: AtomicBool::new(false),
            cancelled: AtomicBool::new(false),
        }
    }

    fn load(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Acquire))
    }

    /// Store `value` unless it is NaN or below the current value.
    fn store(&self, value: f64) -> bool {
        if value.is_nan() {
            return false;
        }
        let mut current = self.bits.load(Ordering::Acquire);
        loop {
            if value < f64::from_bits(current) {
                return false;
            }
            match self.bits.compare_exchange_weak(
                current,
                value.to_bits(),
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => break,
                Err(actual) => current = actual,
            }
        }
        self.dirty.store(true, Ordering::Release);
        true
    }

    fn take_dirty(&self) -> bool {
        self.dirty.swap(false, Ordering::AcqRel)
    }

    fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::Acquire)
    }
}

/// Handle through which background work reports progress.
#[derive(Debug, Clone)]
pub struct LoaderHandle(Arc<Progress>);

impl LoaderHandle {
    /// Report progress in `[0, 1]`. Values at or above 1.0 finish the loader.
    ///
    /// NaN and values below the last accepted one are ignored, so the bar
    /// never shrinks.
    pub fn update(&self, progress: f64) {
        if !self.0.store(progress) {
            trace!("ignoring progress update {progress}");
        }
    }

    /// Latest accepted progress value.
    #[must_use]
    pub fn progress(&self) -> f64 {
        self.0.load()
    }

    /// Whether the render loop has exited and the work should stop.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.cancelled.load(Ordering::Acquire)
    }
}

enum Trigger {
    /// Caller-provided start hook, optionally returning the task to join.
    Custom(Box<dyn FnOnce(LoaderHandle) -> Option<JoinHandle<()>>>),
    /// Work to run on a thread the loader spawns itself.
    Thread(Box<dyn FnOnce(LoaderHandle) + Send>),
}

/// Progress bar driven by externally reported updates.
pub struct Loader {
    trigger: Trigger,
    on_complete: Option<Box<dyn FnOnce()>>,
    progress: Arc<Progress>,
    poll_interval: Duration,
}

impl Loader {
    /// Loader whose trigger starts the work itself.
    ///
    /// If the trigger returns a `JoinHandle`, the loader owns that task: it is
    /// cancelled and joined when rendering ends, and rendering stops early if
    /// the task finishes without reaching 1.0.
    #[must_use]
    pub fn new<F>(trigger: F) -> Self
    where
        F: FnOnce(LoaderHandle) -> Option<JoinHandle<()>> + 'static,
    {
        Self::with_trigger(Trigger::Custom(Box::new(trigger)))
    }

    /// Loader that runs `work` on a dedicated background thread.
    #[must_use]
    pub fn spawn<F>(work: F) -> Self
    where
        F: FnOnce(LoaderHandle) + Send + 'static,
    {
        Self::with_trigger(Trigger::Thread(Box::new(work)))
    }

    fn with_trigger(trigger: Trigger) -> Self {
        Self {
            trigger,
            on_complete: None,
            progress: Arc::new(Progress::new()),
            poll_interval: POLL_INTERVAL,
        }
    }

    /// Callback fired after the final frame and trailing newline.
    #[must_use]
    pub fn on_complete(mut self, callback: impl FnOnce() + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }

    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// A handle to this loader's progress slot.
    #[must_use]
    pub fn handle(&self) -> LoaderHandle {
        LoaderHandle(Arc::clone(&self.progress))
    }

    pub(crate) fn run<W: Write>(self, writer: &mut Writer<W>) -> io::Result<()> {
        let Self {
            trigger,
            on_complete,
            progress,
            poll_interval,
        } = self;
        let handle = LoaderHandle(Arc::clone(&progress));

        let task = match trigger {
            Trigger::Custom(start) => start(handle),
            Trigger::Thread(work) => Some(
                thread::Builder::new()
                    .name("quikcli-loader".to_owned())
                    .spawn(move || work(handle))?,
            ),
        };

        let width = usize::from(writer.width());
        debug!("loader rendering at width {width}");
        let rendered = render_loop(&progress, writer, width, poll_interval, task.as_ref());

        progress.cancelled.store(true, Ordering::Release);
        if let Some(task) = task {
            if task.join().is_err() {
                warn!("loader task panicked");
            }
        }

        rendered?;
        writer.newline()?;
        if let Some(callback) = on_complete {
            callback();
        }
        Ok(())
    }
}

impl fmt::Debug for Loader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Loader")
            .field("progress", &self.progress.load())
            .field("poll_interval", &self.poll_interval)
            .finish_non_exhaustive()
    }
}

fn render_loop<W: Write>(
    progress: &Progress,
    writer: &mut Writer<W>,
    width: usize,
    poll_interval: Duration,
    task: Option<&JoinHandle<()>>,
) -> io::Result<()> {
    loop {
        if progress.take_dirty() {
            let value = progress.load();
            trace!("redraw at {value}");
            writer.reset_cursor().out_line(&render_bar(width, value))?;
            if value >= 1.0 {
                return Ok(());
            }
        } else if task.is_some_and(JoinHandle::is_finished) && !progress.is_dirty() {
            warn!(
                "loader task exited at {}% without completing",
                percent(progress.load())
            );
            return Ok(());
        }
        thread::sleep(poll_interval);
    }
}

/// Number of `=` cells drawn for `progress` at `width` columns.
///
/// `floor((width - 6) * progress)` with progress clamped to `[0, 1]` and the
/// width raised to [`MIN_BAR_WIDTH`].
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
pub fn filled_len(width: usize, progress: f64) -> usize {
    let span = width.max(MIN_BAR_WIDTH) - BAR_MARGIN;
    (span as f64 * clamp_unit(progress)).floor() as usize
}

/// Render one frame of the bar.
///
/// `[` at column 0, `]` at `width - 6`, the integer percentage right-aligned
/// ending at `width - 2` and `%` in the last column. The `=` run starts at
/// column 1 and the `>` head sits right after it, replacing the closing
/// bracket once the run reaches it.
#[must_use]
pub fn render_bar(width: usize, progress: f64) -> String {
    let width = width.max(MIN_BAR_WIDTH);
    let filled = filled_len(width, progress);

    let mut cells = vec![' '; width];
    cells[0] = '[';
    cells[width - BAR_MARGIN] = ']';
    cells[width - 1] = '%';
    for cell in &mut cells[1..=filled] {
        *cell = '=';
    }
    cells[filled + 1] = '>';

    let label = format!("{:>3}", percent(progress));
    for (cell, ch) in cells[width - 4..width - 1].iter_mut().zip(label.chars()) {
        *cell = ch;
    }
    cells.into_iter().collect()
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn percent(progress: f64) -> u8 {
    (100.0 * clamp_unit(progress)).floor() as u8
}

fn clamp_unit(progress: f64) -> f64 {
    if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    /// Split captured loader output into its redraw frames.
    fn frames(output: &[u8]) -> Vec<String> {
        let text = String::from_utf8(output.to_vec()).unwrap();
        text.split("\x1b[1A")
            .map(|chunk| chunk.trim_end_matches('\n').to_owned())
            .filter(|frame| !frame.is_empty())
            .collect()
    }

    fn frame_percent(frame: &str, width: usize) -> u32 {
        frame[width - 4..width - 1].trim().parse().unwrap()
    }

    #[test]
    fn test_bar_layout_at_zero() {
        let bar = render_bar(26, 0.0);
        assert_eq!(bar.len(), 26);
        assert_eq!(bar, "[>                  ]   0%");
    }

    #[test]
    fn test_bar_layout_midway() {
        let bar = render_bar(26, 0.5);
        assert_eq!(bar, "[==========>        ]  50%");
        assert_eq!(filled_len(26, 0.5), 10);
    }

    #[test]
    fn test_bar_layout_full() {
        let bar = render_bar(26, 1.0);
        assert_eq!(bar, "[====================>100%");
        assert_eq!(bar.matches('=').count(), 20);
    }

    #[test]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn test_filled_len_floors() {
        for step in 0..=100 {
            let progress = f64::from(step) / 100.0;
            let bar = render_bar(86, progress);
            let expected = (80.0 * progress).floor() as usize;
            assert_eq!(filled_len(86, progress), expected);
            assert_eq!(bar.matches('=').count(), expected, "at {progress}");
            assert_eq!(bar.chars().count(), 86);
        }
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        assert_eq!(render_bar(26, 3.0), render_bar(26, 1.0));
        assert_eq!(render_bar(26, -1.0), render_bar(26, 0.0));
        assert_eq!(render_bar(26, f64::NAN), render_bar(26, 0.0));
    }

    #[test]
    fn test_narrow_width_uses_minimum() {
        assert_eq!(render_bar(3, 0.0).len(), MIN_BAR_WIDTH);
    }

    #[test]
    fn test_handle_ignores_regressions() {
        let loader = Loader::new(|_| None);
        let handle = loader.handle();
        handle.update(0.5);
        handle.update(0.25);
        handle.update(f64::NAN);
        assert!((handle.progress() - 0.5).abs() < f64::EPSILON);
        handle.update(0.75);
        assert!((handle.progress() - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    #[allow(clippy::cast_possible_truncation)]
    fn test_spawned_work_drives_bar_to_completion() {
        let finished = Rc::new(Cell::new(0));
        let count = Rc::clone(&finished);
        let worker_done = Arc::new(AtomicBool::new(false));
        let worker_flag = Arc::clone(&worker_done);

        let loader = Loader::spawn(move |handle| {
            for step in 1..=4 {
                handle.update(f64::from(step) * 0.25);
                thread::sleep(Duration::from_millis(5));
            }
            worker_flag.store(true, Ordering::SeqCst);
        })
        .on_complete(move || count.set(count.get() + 1));

        let mut writer = Writer::with_width(Vec::new(), 26);
        loader.run(&mut writer).unwrap();

        assert_eq!(finished.get(), 1);
        // The task was joined before run returned.
        assert!(worker_done.load(Ordering::SeqCst));

        let output = writer.into_inner();
        assert!(output.ends_with(b"\x1b[1A\n"));
        let frames = frames(&output);
        assert!(!frames.is_empty());
        for frame in &frames {
            let pct = frame_percent(frame, 26);
            assert_eq!(frame.matches('=').count() as u32, 20 * pct / 100, "{frame}");
        }
        assert_eq!(frame_percent(frames.last().unwrap(), 26), 100);
    }

    #[test]
    fn test_custom_trigger_without_task() {
        let loader = Loader::new(|handle| {
            handle.update(1.0);
            None
        });
        let mut writer = Writer::with_width(Vec::new(), 16);
        loader.run(&mut writer).unwrap();

        let output = writer.into_inner();
        assert_eq!(frames(&output), [render_bar(16, 1.0)]);
    }

    #[test]
    fn test_custom_trigger_owning_task() {
        let loader = Loader::new(|handle| {
            Some(thread::spawn(move || {
                while !handle.is_cancelled() {
                    let next = handle.progress() + 0.5;
                    handle.update(next);
                    thread::sleep(Duration::from_millis(2));
                }
            }))
        });
        let mut writer = Writer::with_width(Vec::new(), 16);
        loader.run(&mut writer).unwrap();
        assert_eq!(
            frame_percent(frames(writer.get_ref()).last().unwrap(), 16),
            100
        );
    }

    #[test]
    fn test_abandoned_task_stops_rendering() {
        let loader = Loader::spawn(|handle| handle.update(0.5));
        let mut writer = Writer::with_width(Vec::new(), 26);
        loader.run(&mut writer).unwrap();

        assert_eq!(frames(writer.get_ref()), [render_bar(26, 0.5)]);
    }
}
