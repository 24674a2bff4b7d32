//! Desktop notifications and the terminal bell.
//! macOS goes through osascript, Linux through notify-send.
use std::io::Write;
use std::process::Command;
use std::thread::{self, JoinHandle};

pub const FINISHED_TITLE: &str = "Timer finished!";

/// Notification body for a finished countdown of the given mode
pub fn finished_body(mode_label: &str) -> String {
    format!("{} is over. How about a break?", mode_label)
}

/// Send a desktop notification when a countdown finishes
pub fn notify_timer_finished(mode_label: &str) {
    let body = finished_body(mode_label);

    #[cfg(target_os = "macos")]
    {
        let script = format!(
            r#"display notification "{}" with title "Fokus - {}""#,
            body.replace('"', "\\\""),
            FINISHED_TITLE
        );

        let mut command = Command::new("osascript");
        command.arg("-e").arg(&script);
        run_detached(command);
    }

    #[cfg(target_os = "linux")]
    {
        let mut command = Command::new("notify-send");
        command.arg("--app-name=fokus").arg(FINISHED_TITLE).arg(&body);
        run_detached(command);
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux")))]
    {
        // No-op on other platforms
        let _ = body;
    }
}

/// Run a notifier off the render thread. The helper thread waits for the
/// child so it is reaped even when the notification daemon is slow.
fn run_detached(mut command: Command) -> JoinHandle<()> {
    thread::spawn(move || {
        if let Err(err) = command.output() {
            tracing::debug!(error = %err, "notification command failed");
        }
    })
}

/// Ring the terminal bell
pub fn ring_bell() {
    let mut stdout = std::io::stdout();
    let _ = stdout.write_all(b"\x07");
    let _ = stdout.flush();
}
