use super::*;
use crate::audio::testing::{Call, FakeBackend, FakeEngine};
use crate::audio::{MediaEvent, MediaStatus, PlaybackCoordinator, Volume};
use crate::config::LibrarySettings;
use crate::library::TrackMetadata;
use std::path::PathBuf;
use std::time::Duration;

fn app_with(n: usize) -> (FakeBackend, App<FakeEngine>) {
    let backend = FakeBackend::default();
    let player = PlaybackCoordinator::new(backend.engine(), Volume::default());
    let mut app = App::new(player, LibrarySettings::default());
    app.add_files((0..n).map(|i| format!("/m/{i}.mp3")));
    (backend, app)
}

fn opened_paths(backend: &FakeBackend) -> Vec<PathBuf> {
    backend
        .calls()
        .into_iter()
        .filter_map(|c| match c {
            Call::Open { path, .. } => Some(path),
            _ => None,
        })
        .collect()
}

fn finish_ready(backend: &FakeBackend, app: &mut App<FakeEngine>) {
    backend.ready(Duration::from_secs(60));
    app.pump();
}

#[test]
fn play_track_out_of_bounds_changes_nothing() {
    let (backend, mut app) = app_with(2);
    assert!(app.play_track(1));
    backend.clear_calls();

    assert!(!app.play_track(2));
    assert!(!app.play_track(usize::MAX));

    assert_eq!(app.playlist.current(), Some(1));
    assert_eq!(app.selected, 1);
    assert!(backend.calls().is_empty());
}

#[test]
fn play_track_moves_cursor_and_requests_redraw() {
    let (backend, mut app) = app_with(3);
    app.take_redraw();

    app.play_track(2);
    assert_eq!(app.selected, 2);
    assert!(app.take_redraw());
    assert!(!app.take_redraw());
    assert_eq!(opened_paths(&backend), vec![PathBuf::from("/m/2.mp3")]);
}

#[test]
fn next_and_previous_wrap_around() {
    let (backend, mut app) = app_with(3);

    app.next_track();
    assert_eq!(app.playlist.current(), Some(0));
    app.previous_track();
    assert_eq!(app.playlist.current(), Some(2));
    app.next_track();
    assert_eq!(app.playlist.current(), Some(0));
    app.next_track();
    app.next_track();
    app.next_track();
    assert_eq!(app.playlist.current(), Some(0));

    assert_eq!(opened_paths(&backend).len(), 6);
    // Every switch released the previous media first.
    assert_eq!(backend.live().len(), 1);
}

#[test]
fn navigation_on_empty_playlist_is_ignored() {
    let (backend, mut app) = app_with(0);
    app.next_track();
    app.previous_track();
    app.toggle_play_pause();
    app.play_selected();
    assert_eq!(app.playlist.current(), None);
    assert!(backend.calls().is_empty());
}

#[test]
fn previous_with_nothing_selected_picks_last() {
    let (_backend, mut app) = app_with(4);
    app.previous_track();
    assert_eq!(app.playlist.current(), Some(3));
}

#[test]
fn end_of_last_track_wraps_to_first() {
    let (backend, mut app) = app_with(3);
    app.play_track(2);
    finish_ready(&backend, &mut app);

    backend.emit(MediaEvent::EndOfMedia);
    app.pump();

    assert_eq!(app.playlist.current(), Some(0));
    assert_eq!(app.player.status(), MediaStatus::Unknown);
    assert_eq!(
        opened_paths(&backend).last(),
        Some(&PathBuf::from("/m/0.mp3"))
    );
}

#[test]
fn progress_requests_redraw_only_when_position_moves() {
    let (backend, mut app) = app_with(1);
    app.play_track(0);
    finish_ready(&backend, &mut app);
    app.take_redraw();

    backend.emit(MediaEvent::Position(Duration::from_secs(5)));
    app.pump();
    assert!(app.take_redraw());

    app.pump();
    assert!(!app.take_redraw());

    // Same position again: the cell does not change.
    backend.emit(MediaEvent::Position(Duration::from_secs(5)));
    app.pump();
    assert!(!app.take_redraw());
}

#[test]
fn stop_before_pending_end_of_track_does_not_advance() {
    let (backend, mut app) = app_with(3);
    app.play_track(0);
    finish_ready(&backend, &mut app);

    backend.emit(MediaEvent::EndOfMedia);
    app.stop();
    app.pump();

    assert_eq!(app.playlist.current(), Some(0));
    assert_eq!(app.player.status(), MediaStatus::Stopped);
    assert_eq!(opened_paths(&backend), vec![PathBuf::from("/m/0.mp3")]);
}

#[test]
fn pause_before_pending_end_of_track_does_not_advance() {
    let (backend, mut app) = app_with(3);
    app.play_track(1);
    finish_ready(&backend, &mut app);

    backend.emit(MediaEvent::EndOfMedia);
    app.toggle_play_pause();
    app.pump();

    assert_eq!(app.playlist.current(), Some(1));
    assert_eq!(app.player.status(), MediaStatus::Paused);
    assert_eq!(opened_paths(&backend).len(), 1);
}

#[test]
fn toggle_play_pause_follows_status() {
    let (backend, mut app) = app_with(2);

    // Nothing played yet: start at the first track.
    app.toggle_play_pause();
    assert_eq!(app.playlist.current(), Some(0));
    finish_ready(&backend, &mut app);
    assert_eq!(app.player.status(), MediaStatus::Playing);

    app.toggle_play_pause();
    assert_eq!(app.player.status(), MediaStatus::Paused);
    app.toggle_play_pause();
    assert_eq!(app.player.status(), MediaStatus::Playing);

    // Stopped: restart the current track rather than resuming.
    app.next_track();
    finish_ready(&backend, &mut app);
    app.stop();
    backend.clear_calls();
    app.toggle_play_pause();
    assert_eq!(app.playlist.current(), Some(1));
    assert_eq!(opened_paths(&backend), vec![PathBuf::from("/m/1.mp3")]);
}

#[test]
fn metadata_is_written_back_into_playlist() {
    let (backend, mut app) = app_with(2);
    app.play_track(1);
    app.take_redraw();

    backend.emit(MediaEvent::Ready {
        duration: Some(Duration::from_secs(200)),
        metadata: TrackMetadata {
            title: Some("Real".into()),
            artist: Some("Artist".into()),
            album: Some("Record".into()),
        },
    });
    app.pump();

    let t = app.playlist.get(1).unwrap();
    assert_eq!(t.title, "Real");
    assert_eq!(t.artist.as_deref(), Some("Artist"));
    assert_eq!(t.album.as_deref(), Some("Record"));
    assert_eq!(t.duration, Some(Duration::from_secs(200)));
    assert_eq!(app.playlist.get(0).unwrap().title, "0");
    assert!(app.take_redraw());
}

#[test]
fn metadata_for_removed_row_does_not_land_elsewhere() {
    let (backend, mut app) = app_with(2);
    app.play_track(1);
    app.remove_track(1);

    backend.emit(MediaEvent::Ready {
        duration: None,
        metadata: TrackMetadata {
            title: Some("Real".into()),
            ..TrackMetadata::default()
        },
    });
    app.pump();

    assert_eq!(app.playlist.len(), 1);
    assert_eq!(app.playlist.get(0).unwrap().title, "0");
}

#[test]
fn remove_track_keeps_selection_in_range() {
    let (_backend, mut app) = app_with(3);
    app.play_track(2);
    assert!(app.remove_track(2).is_some());
    assert_eq!(app.selected, 1);
    assert_eq!(app.playlist.current(), None);
    assert!(app.remove_track(7).is_none());

    app.clear();
    assert!(!app.has_tracks());
    assert_eq!(app.selected, 0);
    assert_eq!(app.player.status(), MediaStatus::Disposed);
}

#[test]
fn seek_helpers_use_known_duration() {
    let (backend, mut app) = app_with(1);
    app.seek_fraction(0.5);
    assert!(backend.calls().is_empty());

    app.play_track(0);
    finish_ready(&backend, &mut app);
    backend.clear_calls();

    app.seek_fraction(0.5);
    app.seek_by(-100);
    app.seek_by(5);
    assert_eq!(
        backend.calls(),
        vec![
            Call::Seek(0, Duration::from_secs(30)),
            Call::Seek(0, Duration::ZERO),
            Call::Seek(0, Duration::from_secs(5)),
        ]
    );
}

#[test]
fn volume_helpers_clamp_and_mute() {
    let (_backend, mut app) = app_with(0);
    app.adjust_volume(0.8);
    assert_eq!(app.player.volume(), 1.0);
    app.adjust_volume(-2.0);
    assert_eq!(app.player.volume(), 0.0);

    app.player.set_volume(0.7);
    app.toggle_mute();
    assert_eq!(app.player.effective_volume(), 0.0);
    app.toggle_mute();
    assert_eq!(app.player.effective_volume(), 0.7);
}

#[test]
fn cursor_moves_wrap_and_are_independent_of_playback() {
    let (_backend, mut app) = app_with(3);
    app.play_track(1);

    app.select_prev();
    app.select_prev();
    assert_eq!(app.selected, 2);
    app.select_next();
    assert_eq!(app.selected, 0);
    app.select_last();
    assert_eq!(app.selected, 2);
    app.select_first();
    assert_eq!(app.selected, 0);

    assert_eq!(app.playlist.current(), Some(1));
}

#[test]
fn add_files_skips_non_audio() {
    let (_backend, mut app) = app_with(0);
    let added = app.add_files(["/m/a.mp3", "/m/readme.txt", "/m/b.AAC"]);
    assert_eq!(added, 2);
    assert_eq!(app.playlist.len(), 2);
}

#[test]
fn add_path_prompt_adds_folder_sorted() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("b.mp3"), b"x").unwrap();
    std::fs::write(dir.path().join("a.wav"), b"x").unwrap();
    std::fs::write(dir.path().join("c.txt"), b"x").unwrap();

    let (_backend, mut app) = app_with(0);
    app.begin_add_path();
    assert_eq!(app.input_mode, InputMode::AddPath);
    for c in dir.path().to_str().unwrap().chars() {
        app.push_input_char(c);
    }
    app.push_input_char('x');
    app.pop_input_char();
    app.submit_input();

    assert_eq!(app.input_mode, InputMode::Normal);
    let titles: Vec<&str> = app
        .playlist
        .tracks()
        .iter()
        .map(|t| t.title.as_str())
        .collect();
    assert_eq!(titles, vec!["a", "b"]);
    assert_eq!(app.status_message.as_deref(), Some("Added 2 track(s)"));
}

#[test]
fn add_path_prompt_reports_errors() {
    let (_backend, mut app) = app_with(0);
    app.begin_add_path();
    for c in "/definitely/not/here/".chars() {
        app.push_input_char(c);
    }
    app.submit_input();
    // A missing path is not a directory, so it is offered as a file and filtered out.
    assert_eq!(app.playlist.len(), 0);
    assert!(app.status_message.is_some());

    app.begin_add_path();
    app.push_input_char('z');
    app.cancel_input();
    assert_eq!(app.input_mode, InputMode::Normal);
    assert!(app.input.is_empty());
}
