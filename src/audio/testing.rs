//! In-memory media backend for coordinator and controller tests.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

use crate::library::TrackMetadata;

use super::backend::{MediaEngine, MediaObject};
use super::types::MediaEvent;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Open { id: u64, path: PathBuf, volume: f32 },
    Play(u64),
    Pause(u64),
    Stop(u64),
    Seek(u64, Duration),
    SetVolume(u64, f32),
    Release(u64),
}

#[derive(Default)]
struct FakeState {
    calls: Vec<Call>,
    pending: HashMap<u64, VecDeque<MediaEvent>>,
    live: Vec<u64>,
    next_id: u64,
}

/// Test-side view of the fake backend: inspect calls, inject notifications.
#[derive(Clone, Default)]
pub(crate) struct FakeBackend(Rc<RefCell<FakeState>>);

impl FakeBackend {
    pub(crate) fn engine(&self) -> FakeEngine {
        FakeEngine(self.0.clone())
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.0.borrow().calls.clone()
    }

    pub(crate) fn clear_calls(&self) {
        self.0.borrow_mut().calls.clear();
    }

    /// Media objects opened and not yet dropped.
    pub(crate) fn live(&self) -> Vec<u64> {
        self.0.borrow().live.clone()
    }

    pub(crate) fn latest(&self) -> u64 {
        let st = self.0.borrow();
        st.next_id.checked_sub(1).expect("nothing opened yet")
    }

    /// Queue `event` for the most recently opened media.
    pub(crate) fn emit(&self, event: MediaEvent) {
        let id = self.latest();
        self.0
            .borrow_mut()
            .pending
            .entry(id)
            .or_default()
            .push_back(event);
    }

    pub(crate) fn ready(&self, duration: Duration) {
        self.emit(MediaEvent::Ready {
            duration: Some(duration),
            metadata: TrackMetadata::default(),
        });
    }
}

pub(crate) struct FakeEngine(Rc<RefCell<FakeState>>);

impl MediaEngine for FakeEngine {
    type Media = FakeMedia;

    fn open(&mut self, path: &Path, volume: f32) -> FakeMedia {
        let mut st = self.0.borrow_mut();
        let id = st.next_id;
        st.next_id += 1;
        st.live.push(id);
        st.calls.push(Call::Open {
            id,
            path: path.to_path_buf(),
            volume,
        });
        FakeMedia {
            id,
            state: self.0.clone(),
        }
    }
}

pub(crate) struct FakeMedia {
    id: u64,
    state: Rc<RefCell<FakeState>>,
}

impl FakeMedia {
    fn record(&self, call: Call) {
        self.state.borrow_mut().calls.push(call);
    }
}

impl MediaObject for FakeMedia {
    fn play(&mut self) {
        self.record(Call::Play(self.id));
    }

    fn pause(&mut self) {
        self.record(Call::Pause(self.id));
    }

    fn stop(&mut self) {
        self.record(Call::Stop(self.id));
    }

    fn seek(&mut self, position: Duration) {
        self.record(Call::Seek(self.id, position));
    }

    fn set_volume(&mut self, volume: f32) {
        self.record(Call::SetVolume(self.id, volume));
    }

    fn try_event(&mut self) -> Option<MediaEvent> {
        self.state
            .borrow_mut()
            .pending
            .get_mut(&self.id)
            .and_then(VecDeque::pop_front)
    }
}

impl Drop for FakeMedia {
    fn drop(&mut self) {
        let mut st = self.state.borrow_mut();
        st.live.retain(|&id| id != self.id);
        st.calls.push(Call::Release(self.id));
    }
}
