//! Copying the displayed value to the system clipboard.
//!
//! The [`Controller`] copies text through a [`Clipboard`] backend and
//! publishes the state of the copy [`Icon`] on a `watch` channel:
//!
//! * after a successful copy the icon shows [`Icon::Check`], and a timer
//!   reverts it to [`Icon::Copy`] after the reset delay;
//! * leaving the output area reverts it immediately. The timer is not
//!   cancelled and reverting twice is a no-op.
//!
//! The [`Osc52`] backend reaches the clipboard of the terminal emulator,
//! also across SSH sessions, by writing an OSC 52 escape sequence.

use std::{
    fmt,
    io::Write,
    sync::{Arc, Mutex},
    time::Duration,
};

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use tokio::sync::watch;

use crate::error::{Error, Result};

/// State of the copy icon next to the output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Icon {
    #[default]
    Copy,
    Check,
}

impl Icon {
    /// Asset path of the icon image.
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Copy => "icons/clipboard.svg",
            Self::Check => "icons/check.svg",
        }
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Copy => write!(f, "copy"),
            Self::Check => write!(f, "copied"),
        }
    }
}

/// A place to copy text to.
pub trait Clipboard {
    /// Replaces the clipboard contents with `text`.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the clipboard cannot be written.
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// Terminal clipboard through the OSC 52 escape sequence.
#[derive(Debug)]
pub struct Osc52<W> {
    out: W,
}

impl<W: Write> Osc52<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Clipboard for Osc52<W> {
    fn write_text(&mut self, text: &str) -> Result<()> {
        let payload = BASE64.encode(text);
        write!(self.out, "\x1b]52;c;{payload}\x07")?;
        self.out.flush()?;
        Ok(())
    }
}

/// In-process clipboard.
///
/// Clones share their contents.
#[derive(Clone, Debug, Default)]
pub struct Memory {
    contents: Arc<Mutex<String>>,
}

impl Memory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current contents.
    ///
    /// # Panics
    ///
    /// Panics if a writer panicked while holding the lock.
    #[must_use]
    pub fn contents(&self) -> String {
        self.contents.lock().expect("clipboard lock poisoned").clone()
    }
}

impl Clipboard for Memory {
    fn write_text(&mut self, text: &str) -> Result<()> {
        let mut contents = self
            .contents
            .lock()
            .map_err(|e| Error::internal(e.to_string()))?;
        *contents = text.to_owned();
        Ok(())
    }
}

/// Copies text and drives the copy icon.
pub struct Controller<C> {
    clipboard: C,
    icon: Arc<watch::Sender<Icon>>,
    reset: Duration,
}

impl<C: Clipboard> Controller<C> {
    /// Creates a controller that reverts the icon `reset` after a copy.
    pub fn new(clipboard: C, reset: Duration) -> Self {
        let (icon, _) = watch::channel(Icon::default());
        Self {
            clipboard,
            icon: Arc::new(icon),
            reset,
        }
    }

    /// Subscribes to icon changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Icon> {
        self.icon.subscribe()
    }

    #[must_use]
    pub fn icon(&self) -> Icon {
        *self.icon.borrow()
    }

    #[must_use]
    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    /// Copies `text` and shows [`Icon::Check`] until the reset delay passes.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the clipboard cannot be written. The error is
    /// logged here and the icon is left as it was.
    pub fn copy(&mut self, text: &str) -> Result<()> {
        if let Err(e) = self.clipboard.write_text(text) {
            error!("failed to copy text: {e}");
            return Err(e);
        }
        debug!("copied {text:?}");

        set(&self.icon, Icon::Check);

        let icon = Arc::clone(&self.icon);
        let reset = self.reset;
        tokio::spawn(async move {
            tokio::time::sleep(reset).await;
            set(&icon, Icon::Copy);
        });

        Ok(())
    }

    /// Reverts the icon to [`Icon::Copy`] right away.
    pub fn leave(&self) {
        set(&self.icon, Icon::Copy);
    }
}

/// Publishes `icon`, notifying subscribers only on an actual change.
fn set(sender: &watch::Sender<Icon>, icon: Icon) {
    sender.send_if_modified(|current| {
        let modified = *current != icon;
        *current = icon;
        modified
    });
}
