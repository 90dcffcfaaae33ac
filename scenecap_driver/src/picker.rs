//! Scene selection.
//!
//! The selection lives behind a shared accessor so an interactive
//! surface can update it asynchronously; the driver reads it exactly
//! once, synchronously, before the capture run. Without the
//! `interactive` feature (or without a TTY) the deterministic default
//! stands.

use scenecap_core::NONE_SCENE;
use std::sync::{Arc, Mutex};

/// Deterministic default: the first handle that is not the "NONE"
/// sentinel, or the sentinel itself when none exist.
pub fn default_scene(handles: &[String]) -> String {
    handles
        .iter()
        .find(|h| !h.contains(NONE_SCENE))
        .cloned()
        .unwrap_or_else(|| NONE_SCENE.to_string())
}

/// Shared "current selection" accessor.
#[derive(Debug, Clone)]
pub struct SceneSelection {
    current: Arc<Mutex<String>>,
}

impl SceneSelection {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            current: Arc::new(Mutex::new(initial.into())),
        }
    }

    /// Reads the current selection.
    pub fn current(&self) -> String {
        self.current.lock().expect("selection lock poisoned").clone()
    }

    /// Replaces the current selection.
    pub fn select(&self, handle: &str) {
        *self.current.lock().expect("selection lock poisoned") = handle.to_string();
    }
}

#[cfg(feature = "interactive")]
pub mod interactive {
    //! Terminal picker for the scene handle list.

    use super::SceneSelection;
    use crossterm::{
        cursor,
        event::{read, Event, KeyCode},
        execute,
        terminal::{self, Clear, ClearType},
        tty::IsTty,
    };
    use std::io::{stdout, Write};

    /// Presents the handle list and writes the user's choice into the
    /// selection. No-op without a TTY; Esc/q keeps the current value.
    pub fn pick(handles: &[String], selection: &SceneSelection) -> std::io::Result<()> {
        let mut out = stdout();
        if handles.is_empty() || !out.is_tty() {
            return Ok(());
        }

        let current = selection.current();
        let mut index = handles.iter().position(|h| *h == current).unwrap_or(0);

        terminal::enable_raw_mode()?;
        let result = (|| -> std::io::Result<()> {
            loop {
                execute!(out, Clear(ClearType::All), cursor::MoveTo(0, 0))?;
                write!(out, "Available Scenes (enter to select, q to keep):\r\n")?;
                for (i, handle) in handles.iter().enumerate() {
                    let marker = if i == index { ">" } else { " " };
                    write!(out, "{marker} {handle}\r\n")?;
                }
                out.flush()?;

                if let Event::Key(key) = read()? {
                    match key.code {
                        KeyCode::Up => index = index.saturating_sub(1),
                        KeyCode::Down => index = (index + 1).min(handles.len() - 1),
                        KeyCode::Enter => {
                            selection.select(&handles[index]);
                            break;
                        }
                        KeyCode::Esc | KeyCode::Char('q') => break,
                        _ => {}
                    }
                }
            }
            Ok(())
        })();
        terminal::disable_raw_mode()?;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handles(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_default_scene_skips_none_sentinel() {
        let scenes = handles(&["NONE", "apt_0.scene_instance.json", "apt_1.scene_instance.json"]);
        assert_eq!(default_scene(&scenes), "apt_0.scene_instance.json");
    }

    #[test]
    fn test_default_scene_empty_list() {
        assert_eq!(default_scene(&[]), "NONE");
    }

    #[test]
    fn test_default_scene_all_none() {
        let scenes = handles(&["NONE", "also_NONE_scene"]);
        assert_eq!(default_scene(&scenes), "NONE");
    }

    #[test]
    fn test_default_scene_is_deterministic() {
        let scenes = handles(&["NONE", "b_scene", "a_scene"]);
        assert_eq!(default_scene(&scenes), default_scene(&scenes));
        assert_eq!(default_scene(&scenes), "b_scene");
    }

    #[test]
    fn test_selection_accessor() {
        let selection = SceneSelection::new("NONE");
        assert_eq!(selection.current(), "NONE");

        // clones observe updates through the shared cell
        let observer = selection.clone();
        selection.select("apt_2");
        assert_eq!(observer.current(), "apt_2");
    }
}
