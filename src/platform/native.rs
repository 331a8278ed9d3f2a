//! Native clipboard via copypasta

use copypasta::{ClipboardContext, ClipboardProvider};

/// Put `content` on the system clipboard. `false` when no clipboard is reachable
/// (headless session, missing X11/Wayland display).
pub fn copy_to_clipboard(content: &str) -> bool {
    match ClipboardContext::new() {
        Ok(mut ctx) => match ctx.set_contents(content.to_string()) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("[clipboard] write failed: {e}");
                false
            }
        },
        Err(e) => {
            log::warn!("[clipboard] unavailable: {e}");
            false
        }
    }
}
