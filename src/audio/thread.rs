use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink};

use super::error::AudioError;
use super::sink::create_sink_at;
use super::tags::read_tags;
use super::types::MediaEvent;

pub(super) type MediaId = u64;

/// How long the position may stay frozen while playing before we report a stall.
const STALL_AFTER: Duration = Duration::from_secs(2);

#[derive(Debug)]
pub(super) enum AudioCmd {
    /// Open `path` as the new current media, replacing any previous one.
    Open {
        id: MediaId,
        path: PathBuf,
        volume: f32,
        events: Sender<MediaEvent>,
    },
    Play(MediaId),
    Pause(MediaId),
    /// Pause and rewind to the start.
    Stop(MediaId),
    Seek(MediaId, Duration),
    SetVolume(MediaId, f32),
    /// Drop the sink for this media.
    Release(MediaId),
    /// Shut the audio thread down.
    Quit,
}

/// The one media object the audio thread currently holds.
struct Loaded {
    id: MediaId,
    path: PathBuf,
    sink: Sink,
    events: Sender<MediaEvent>,
    volume: f32,
    playing: bool,
    ended: bool,
    last_pos: Duration,
    frozen_for: Duration,
    stalled: bool,
}

impl Loaded {
    fn notify(&self, event: MediaEvent) {
        // The handle may already be gone; its notifications are moot then.
        let _ = self.events.send(event);
    }

    /// Replace the sink with a fresh one starting at `at`, keeping volume and pause state.
    fn reload(&mut self, stream: &OutputStream, at: Duration) {
        match create_sink_at(stream, &self.path, at) {
            Ok((sink, _)) => {
                self.sink.stop();
                sink.set_volume(self.volume);
                if self.playing {
                    sink.play();
                }
                self.sink = sink;
                self.ended = false;
                self.last_pos = at;
                self.frozen_for = Duration::ZERO;
            }
            Err(err) => {
                self.playing = false;
                self.notify(MediaEvent::Error(err));
            }
        }
    }

    fn seek(&mut self, stream: &OutputStream, to: Duration) {
        if self.sink.empty() {
            // Finished sinks have nothing left to seek in.
            self.reload(stream, to);
        } else if let Err(err) = self.sink.try_seek(to) {
            tracing::debug!(error = %err, "seek unsupported, rebuilding sink");
            self.reload(stream, to);
        }
        self.last_pos = to;
        self.frozen_for = Duration::ZERO;
    }
}

pub(super) fn spawn_audio_thread(rx: Receiver<AudioCmd>, tick: Duration) -> JoinHandle<()> {
    thread::spawn(move || {
        let stream = match OutputStreamBuilder::open_default_stream() {
            Ok(mut stream) => {
                // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
                // but noisy for a TUI app.
                stream.log_on_drop(false);
                Some(stream)
            }
            Err(err) => {
                tracing::error!(error = %err, "no audio output device");
                None
            }
        };

        let mut current: Option<Loaded> = None;

        loop {
            match rx.recv_timeout(tick) {
                Ok(AudioCmd::Quit) => break,
                Ok(cmd) => handle_cmd(cmd, stream.as_ref(), &mut current),
                Err(RecvTimeoutError::Timeout) => {
                    if let Some(loaded) = current.as_mut() {
                        on_tick(loaded, tick);
                    }
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }

        if let Some(loaded) = current.take() {
            loaded.sink.stop();
        }
        tracing::debug!("audio thread exiting");
    })
}

fn matching(current: &mut Option<Loaded>, id: MediaId) -> Option<&mut Loaded> {
    current.as_mut().filter(|l| l.id == id)
}

fn handle_cmd(cmd: AudioCmd, stream: Option<&OutputStream>, current: &mut Option<Loaded>) {
    match cmd {
        AudioCmd::Open {
            id,
            path,
            volume,
            events,
        } => {
            if let Some(old) = current.take() {
                old.sink.stop();
            }
            *current = open(id, path, volume, events, stream);
        }
        AudioCmd::Play(id) => {
            let Some(loaded) = matching(current, id) else {
                return;
            };
            loaded.playing = true;
            if loaded.sink.empty() {
                // Replaying after the end: start from the top.
                if let Some(stream) = stream {
                    loaded.reload(stream, Duration::ZERO);
                }
            }
            loaded.sink.play();
            loaded.ended = false;
        }
        AudioCmd::Pause(id) => {
            if let Some(loaded) = matching(current, id) {
                loaded.sink.pause();
                loaded.playing = false;
            }
        }
        AudioCmd::Stop(id) => {
            if let Some(loaded) = matching(current, id) {
                loaded.sink.pause();
                loaded.playing = false;
                loaded.stalled = false;
                if let Some(stream) = stream {
                    loaded.seek(stream, Duration::ZERO);
                }
            }
        }
        AudioCmd::Seek(id, to) => {
            if let (Some(loaded), Some(stream)) = (matching(current, id), stream) {
                loaded.seek(stream, to);
                loaded.notify(MediaEvent::Position(to));
            }
        }
        AudioCmd::SetVolume(id, volume) => {
            if let Some(loaded) = matching(current, id) {
                loaded.volume = volume;
                loaded.sink.set_volume(volume);
            }
        }
        AudioCmd::Release(id) => {
            if current.as_ref().is_some_and(|l| l.id == id) {
                if let Some(loaded) = current.take() {
                    loaded.sink.stop();
                }
            }
        }
        AudioCmd::Quit => {}
    }
}

fn open(
    id: MediaId,
    path: PathBuf,
    volume: f32,
    events: Sender<MediaEvent>,
    stream: Option<&OutputStream>,
) -> Option<Loaded> {
    let Some(stream) = stream else {
        let _ = events.send(MediaEvent::Error(AudioError::NoOutputDevice(
            "output stream unavailable".to_string(),
        )));
        return None;
    };

    let (sink, decoded_total) = match create_sink_at(stream, &path, Duration::ZERO) {
        Ok(v) => v,
        Err(err) => {
            let _ = events.send(MediaEvent::Error(err));
            return None;
        }
    };
    sink.set_volume(volume);

    let (tag_total, metadata) = read_tags(&path);
    let duration = tag_total.or(decoded_total);
    log_open(&path, duration);

    let _ = events.send(MediaEvent::Ready { duration, metadata });

    Some(Loaded {
        id,
        path,
        sink,
        events,
        volume,
        playing: false,
        ended: false,
        last_pos: Duration::ZERO,
        frozen_for: Duration::ZERO,
        stalled: false,
    })
}

fn log_open(path: &Path, duration: Option<Duration>) {
    tracing::debug!(
        path = %path.display(),
        duration_ms = duration.map(|d| d.as_millis() as u64),
        "media ready"
    );
}

/// Periodic work: report progress, detect end of track and stalls.
fn on_tick(loaded: &mut Loaded, tick: Duration) {
    if !loaded.playing || loaded.ended {
        return;
    }

    if loaded.sink.empty() {
        loaded.ended = true;
        loaded.playing = false;
        loaded.notify(MediaEvent::EndOfMedia);
        return;
    }

    let pos = loaded.sink.get_pos();
    if pos != loaded.last_pos {
        loaded.last_pos = pos;
        loaded.frozen_for = Duration::ZERO;
        loaded.stalled = false;
        loaded.notify(MediaEvent::Position(pos));
        return;
    }

    loaded.frozen_for += tick;
    if !loaded.stalled && loaded.frozen_for >= STALL_AFTER {
        loaded.stalled = true;
        loaded.notify(MediaEvent::Stalled);
    }
}
