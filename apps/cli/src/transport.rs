//! One-shot transport commands
//!
//! Each command makes exactly one remote call and prints a status line.
//! Failures are logged and printed, and reported back as `false`.

use tunectl_spotify_client::PlaybackState;

use crate::catalog::Catalog;
use crate::console::Console;
use crate::error::CliResult;
use crate::resolver::describe;

fn report(console: &mut Console, result: CliResult<()>, done: &str, failed: &str) -> bool {
    match result {
        Ok(()) => {
            console.line(done);
            true
        }
        Err(e) => {
            e.log();
            console.line(format!("Error {}: {}", failed, e));
            false
        }
    }
}

pub async fn pause<C: Catalog + ?Sized>(catalog: &C, console: &mut Console) -> bool {
    let result = catalog.pause().await;
    report(console, result, "Paused", "pausing")
}

pub async fn resume<C: Catalog + ?Sized>(catalog: &C, console: &mut Console) -> bool {
    let result = catalog.resume().await;
    report(console, result, "Resumed", "resuming")
}

pub async fn next<C: Catalog + ?Sized>(catalog: &C, console: &mut Console) -> bool {
    let result = catalog.next_track().await;
    report(console, result, "Next track", "skipping")
}

pub async fn previous<C: Catalog + ?Sized>(catalog: &C, console: &mut Console) -> bool {
    let result = catalog.previous_track().await;
    report(console, result, "Previous track", "going back")
}

/// Clamp a requested volume into the range the service accepts
pub fn clamp_volume(level: i64) -> u8 {
    level.clamp(0, 100) as u8
}

/// Set the volume, clamping `level` to `0..=100` first
pub async fn set_volume<C: Catalog + ?Sized>(catalog: &C, level: i64, console: &mut Console) -> bool {
    let percent = clamp_volume(level);
    let result = catalog.set_volume(percent).await;
    report(
        console,
        result,
        &format!("Volume set to {}%", percent),
        "setting volume",
    )
}

/// `m:ss` for a position in milliseconds
pub fn format_position(ms: u64) -> String {
    let secs = ms / 1000;
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Print what is playing and how far along it is
pub async fn current<C: Catalog + ?Sized>(catalog: &C, console: &mut Console) -> bool {
    let state = match catalog.current_playback().await {
        Ok(state) => state,
        Err(e) => {
            e.log();
            console.line(format!("Error getting current track: {}", e));
            return false;
        }
    };

    match state {
        Some(PlaybackState {
            is_playing,
            progress_ms,
            item: Some(track),
            ..
        }) => {
            let status = if is_playing { "Playing" } else { "Paused" };
            console.line(format!("{}: {}", status, describe(&track)));
            console.line(format!(
                "{} / {}",
                format_position(progress_ms),
                format_position(track.duration_ms)
            ));
        }
        _ => console.line("Nothing currently playing"),
    }
    true
}
