use std::path::Path;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

use crate::config::AudioSettings;

use super::backend::{MediaEngine, MediaObject};
use super::error::AudioError;
use super::thread::{AudioCmd, MediaId, spawn_audio_thread};
use super::types::MediaEvent;

/// `rodio`-backed engine. Owns the audio thread, which owns the output stream.
pub struct RodioEngine {
    tx: Sender<AudioCmd>,
    next_id: MediaId,
    join: Option<JoinHandle<()>>,
}

impl RodioEngine {
    pub fn new(settings: &AudioSettings) -> Self {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let tick = Duration::from_millis(settings.tick_ms.max(1));
        let join = spawn_audio_thread(rx, tick);

        Self {
            tx,
            next_id: 0,
            join: Some(join),
        }
    }
}

impl MediaEngine for RodioEngine {
    type Media = RodioMedia;

    fn open(&mut self, path: &Path, volume: f32) -> RodioMedia {
        let id = self.next_id;
        self.next_id += 1;

        let (events_tx, events_rx) = mpsc::channel::<MediaEvent>();
        let cmd = AudioCmd::Open {
            id,
            path: path.to_path_buf(),
            volume,
            events: events_tx.clone(),
        };
        if self.tx.send(cmd).is_err() {
            tracing::error!("audio thread is gone, cannot open media");
            let _ = events_tx.send(MediaEvent::Error(AudioError::Disconnected));
        }

        RodioMedia {
            id,
            tx: self.tx.clone(),
            events: events_rx,
        }
    }
}

impl Drop for RodioEngine {
    fn drop(&mut self) {
        let _ = self.tx.send(AudioCmd::Quit);
        if let Some(h) = self.join.take() {
            let _ = h.join();
        }
    }
}

/// Handle to the media currently loaded in the audio thread.
///
/// Dropping it releases the sink.
pub struct RodioMedia {
    id: MediaId,
    tx: Sender<AudioCmd>,
    events: Receiver<MediaEvent>,
}

impl RodioMedia {
    fn send(&self, cmd: AudioCmd) {
        if let Err(err) = self.tx.send(cmd) {
            tracing::warn!(cmd = ?err.0, "audio thread is gone");
        }
    }
}

impl MediaObject for RodioMedia {
    fn play(&mut self) {
        self.send(AudioCmd::Play(self.id));
    }

    fn pause(&mut self) {
        self.send(AudioCmd::Pause(self.id));
    }

    fn stop(&mut self) {
        self.send(AudioCmd::Stop(self.id));
    }

    fn seek(&mut self, position: Duration) {
        self.send(AudioCmd::Seek(self.id, position));
    }

    fn set_volume(&mut self, volume: f32) {
        self.send(AudioCmd::SetVolume(self.id, volume));
    }

    fn try_event(&mut self) -> Option<MediaEvent> {
        self.events.try_recv().ok()
    }
}

impl Drop for RodioMedia {
    fn drop(&mut self) {
        let _ = self.tx.send(AudioCmd::Release(self.id));
    }
}
