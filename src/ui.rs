//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};
use std::time::Duration;

use crate::app::{App, InputMode};
use crate::audio::{MediaEngine, MediaStatus};
use crate::config::{ControlsSettings, TimeField, UiSettings};
use crate::library::{Track, display_from_fields};

const CONTROLS: [(&str, &str); 12] = [
    ("j/k", "up/down"),
    ("h/l", "prev/next song"),
    ("H/L", "scrub"),
    ("enter", "play selected"),
    ("space/p", "play/pause"),
    ("s", "stop"),
    ("+/-", "volume"),
    ("m", "mute"),
    ("a", "add file/folder"),
    ("d", "remove"),
    ("K", "metadata"),
    ("q", "quit"),
];

/// Render the controls help text, incorporating scrub seconds.
fn controls_text(scrub_seconds: u64) -> String {
    CONTROLS
        .iter()
        .map(|(k, v)| {
            if *k == "H/L" {
                format!("[{}] {} -/+{}s", k, v, scrub_seconds)
            } else {
                format!("[{}] {}", k, v)
            }
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Format a `Duration` as `M:SS`.
fn format_time(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Build the time text (elapsed/total/remaining) per `UiSettings`.
fn time_text(elapsed: Duration, total: Duration, ui: &UiSettings) -> String {
    let mut parts: Vec<String> = Vec::new();
    for f in &ui.now_playing_time_fields {
        match f {
            TimeField::Elapsed => parts.push(format_time(elapsed)),
            TimeField::Total => parts.push(format_time(total)),
            TimeField::Remaining => {
                let rem = total.saturating_sub(elapsed);
                parts.push(format!("-{}", format_time(rem)));
            }
        }
    }
    parts.join(&ui.now_playing_time_separator)
}

/// Fraction of the track already played, in `[0, 1]`.
fn progress_ratio(elapsed: Duration, total: Duration) -> f64 {
    if total.is_zero() {
        return 0.0;
    }
    (elapsed.as_secs_f64() / total.as_secs_f64()).clamp(0.0, 1.0)
}

/// Shows the gain actually applied; while muted, also the level unmute restores.
fn volume_text(effective: f32, level: f32, muted: bool) -> String {
    if muted {
        format!("Vol: muted ({:.0}%)", level * 100.0)
    } else {
        format!("Vol: {:.0}%", effective * 100.0)
    }
}

/// Title/artist/album lines for the now-playing box.
fn now_playing_lines(track: Option<&Track>) -> Vec<Line<'static>> {
    let Some(track) = track else {
        return vec![Line::from(Span::styled(
            "No track loaded",
            Style::default().add_modifier(Modifier::BOLD),
        ))];
    };

    vec![
        Line::from(Span::styled(
            track.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(
            track
                .artist
                .clone()
                .unwrap_or_else(|| "Unknown Artist".to_string()),
        ),
        Line::from(
            track
                .album
                .clone()
                .unwrap_or_else(|| "Unknown Album".to_string()),
        ),
    ]
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    // Keep the popup smaller and avoid covering the entire UI.
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(3);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

/// Format an optional duration, rounding up partial seconds, showing total seconds.
fn format_duration_ceil(d: Option<Duration>) -> String {
    let Some(d) = d else {
        return "-".to_string();
    };

    let mut total_secs = d.as_secs();
    if d.subsec_nanos() > 0 {
        total_secs = total_secs.saturating_add(1);
    }

    format!("{}:{:02} ({}s)", total_secs / 60, total_secs % 60, total_secs)
}

/// Pick the slice of rows to render so the cursor stays roughly centered.
///
/// Returns `(start, end, cursor_pos_in_window)`.
fn visible_window(total: usize, height: usize, cursor: usize) -> (usize, usize, usize) {
    let cursor = cursor.min(total.saturating_sub(1));
    if total <= height || height == 0 {
        return (0, total, cursor);
    }
    let half = height / 2;
    let mut start = cursor.saturating_sub(half);
    if start + height > total {
        start = total - height;
    }
    (start, start + height, cursor - start)
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw<E: MediaEngine>(
    frame: &mut Frame,
    app: &App<E>,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" encore ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Now playing
    let player = &app.player;
    let now_playing = Paragraph::new(now_playing_lines(player.now_playing())).block(
        Block::bordered()
            .padding(Padding {
                left: 1,
                right: 0,
                top: 0,
                bottom: 0,
            })
            .title(" now playing "),
    );
    frame.render_widget(now_playing, chunks[1]);

    // Progress + status
    {
        let elapsed = player.position_property().get();
        let total = player.duration();
        let status = if player.has_media() {
            player.status()
        } else {
            MediaStatus::Stopped
        };

        let mut parts = vec![
            status.label().to_string(),
            time_text(elapsed, total, ui_settings),
            volume_text(player.effective_volume(), player.volume(), player.is_muted()),
        ];
        if let Some(msg) = &app.status_message {
            parts.push(msg.clone());
        }

        let gauge = Gauge::default()
            .block(Block::bordered().title(" status "))
            .ratio(progress_ratio(elapsed, total))
            .label(parts.join(" • "));
        frame.render_widget(gauge, chunks[2]);
    }

    // Playlist
    {
        let tracks = app.playlist.tracks();
        let current = app.playlist.current();
        let list_height = chunks[3].height.saturating_sub(2) as usize;
        let (start, end, cursor_in_window) =
            visible_window(tracks.len(), list_height, app.selected);

        // Only build ListItems for the visible window.
        let items: Vec<ListItem> = tracks[start..end]
            .iter()
            .enumerate()
            .map(|(offset, track)| {
                let label = display_from_fields(
                    track,
                    &ui_settings.playlist_fields,
                    &ui_settings.playlist_separator,
                );
                if current == Some(start + offset) {
                    ListItem::new(format!("♪ {}", label))
                        .style(Style::default().add_modifier(Modifier::BOLD))
                } else {
                    ListItem::new(format!("  {}", label))
                }
            })
            .collect();

        let title = format!(" playlist ({}) ", tracks.len());
        let list = if items.is_empty() {
            List::new(vec![ListItem::new("  Press [a] to add files or a folder")])
        } else {
            List::new(items)
        }
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

        let mut state = ListState::default();
        if !tracks.is_empty() {
            state.select(Some(cursor_in_window));
        }
        frame.render_stateful_widget(list, chunks[3], &mut state);
    }

    // Overlay metadata popup (keeps list visible under it)
    if app.metadata_window {
        let popup_area = centered_rect_sized(72, 9, chunks[3]);
        frame.render_widget(Clear, popup_area);

        let meta = match app.playlist.get(app.selected) {
            Some(track) => format!(
                "Title: {}\nArtist: {}\nAlbum: {}\nDuration: {}\nPath: {}",
                track.title,
                track.artist.as_deref().unwrap_or("-"),
                track.album.as_deref().unwrap_or("-"),
                format_duration_ceil(track.duration),
                track.path().display()
            ),
            None => "No track selected".to_string(),
        };
        let meta_paragraph = Paragraph::new(meta)
            .block(
                Block::default()
                    .padding(Padding {
                        left: 1,
                        right: 0,
                        top: 0,
                        bottom: 0,
                    })
                    .borders(Borders::ALL)
                    .title(" metadata (K closes) "),
            )
            .wrap(Wrap { trim: true });
        frame.render_widget(meta_paragraph, popup_area);
    }

    if app.input_mode == InputMode::AddPath {
        let popup_area = centered_rect_sized(72, 3, chunks[3]);
        frame.render_widget(Clear, popup_area);
        let prompt = Paragraph::new(format!("{}_", app.input)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" add file or folder (enter adds, esc cancels) "),
        );
        frame.render_widget(prompt, popup_area);
    }

    let footer = Paragraph::new(controls_text(controls_settings.scrub_seconds))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(footer, chunks[4]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_time_uses_minutes_and_padded_seconds() {
        assert_eq!(format_time(Duration::ZERO), "0:00");
        assert_eq!(format_time(Duration::from_millis(65_900)), "1:05");
        assert_eq!(format_time(Duration::from_secs(3_600)), "60:00");
    }

    #[test]
    fn time_text_follows_configured_fields() {
        let ui = UiSettings {
            now_playing_time_fields: vec![TimeField::Elapsed, TimeField::Remaining],
            now_playing_time_separator: " | ".into(),
            ..UiSettings::default()
        };
        assert_eq!(
            time_text(Duration::from_secs(30), Duration::from_secs(90), &ui),
            "0:30 | -1:00"
        );
    }

    #[test]
    fn progress_ratio_handles_unknown_duration() {
        assert_eq!(progress_ratio(Duration::from_secs(5), Duration::ZERO), 0.0);
        assert_eq!(
            progress_ratio(Duration::from_secs(5), Duration::from_secs(10)),
            0.5
        );
        assert_eq!(
            progress_ratio(Duration::from_secs(50), Duration::from_secs(10)),
            1.0
        );
    }

    #[test]
    fn visible_window_keeps_cursor_centered() {
        assert_eq!(visible_window(5, 10, 3), (0, 5, 3));
        assert_eq!(visible_window(100, 10, 50), (45, 55, 5));
        assert_eq!(visible_window(100, 10, 99), (90, 100, 9));
        assert_eq!(visible_window(0, 10, 0), (0, 0, 0));
    }

    #[test]
    fn volume_text_shows_mute() {
        assert_eq!(volume_text(0.5, 0.5, false), "Vol: 50%");
        assert_eq!(volume_text(0.0, 0.5, true), "Vol: muted (50%)");
    }

    #[test]
    fn format_duration_ceil_rounds_up() {
        assert_eq!(format_duration_ceil(None), "-");
        assert_eq!(
            format_duration_ceil(Some(Duration::from_millis(61_200))),
            "1:02 (62s)"
        );
    }
}
