//! The output area and how it is drawn.
//!
//! A [`Screen`] holds what is currently displayed; it is the only place a
//! generated value lives after its pipeline run ends. A [`Render`]
//! implementation draws it, along with prompts and alerts.

use std::io::Write;

use crate::{clipboard::Icon, error::Result, pipeline::Output};

/// Contents of the output area.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Screen {
    pub label: String,
    pub value: String,
    pub heading: String,
    pub text: String,
    pub icon: Icon,
}

impl Screen {
    /// Replaces label, value, heading and text with `output`.
    pub fn show(&mut self, output: &Output) {
        self.label = output.label.to_owned();
        self.value = output.value.to_string();
        self.heading = output.heading.clone().unwrap_or_default();
        self.text.clone_from(&output.text);
    }

    /// Replaces only the text, leaving the previous value on display.
    pub fn show_error(&mut self, message: &str) {
        self.text = message.to_owned();
    }

    /// The value that a copy would put on the clipboard.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Something that can draw the output area and talk to the user.
pub trait Render {
    /// Draws the whole output area.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the output cannot be written.
    fn draw(&mut self, screen: &Screen) -> Result<()>;

    /// Draws a change of the copy icon.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the output cannot be written.
    fn icon(&mut self, icon: Icon) -> Result<()>;

    /// Asks the user for input; the answer arrives as the next line.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the output cannot be written.
    fn prompt(&mut self, message: &str) -> Result<()>;

    /// Shows a warning the user should not miss.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the output cannot be written.
    fn alert(&mut self, message: &str) -> Result<()>;

    /// Shows an informational line.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the output cannot be written.
    fn print(&mut self, message: &str) -> Result<()>;
}

/// Draws on a terminal, or any other writer.
#[derive(Debug)]
pub struct Terminal<W> {
    out: W,
}

impl<W: Write> Terminal<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Render for Terminal<W> {
    fn draw(&mut self, screen: &Screen) -> Result<()> {
        writeln!(self.out)?;
        if !screen.label.is_empty() {
            writeln!(self.out, "{}", screen.label)?;
        }
        if !screen.value.is_empty() {
            writeln!(self.out, "    {}    [{}]", screen.value, screen.icon)?;
        }
        if !screen.heading.is_empty() {
            writeln!(self.out, "{}", screen.heading)?;
        }
        writeln!(self.out, "{}", screen.text)?;
        self.out.flush()?;
        Ok(())
    }

    fn icon(&mut self, icon: Icon) -> Result<()> {
        writeln!(self.out, "[{icon}]")?;
        self.out.flush()?;
        Ok(())
    }

    fn prompt(&mut self, message: &str) -> Result<()> {
        write!(self.out, "{message}: ")?;
        self.out.flush()?;
        Ok(())
    }

    fn alert(&mut self, message: &str) -> Result<()> {
        writeln!(self.out, "! {message}")?;
        self.out.flush()?;
        Ok(())
    }

    fn print(&mut self, message: &str) -> Result<()> {
        writeln!(self.out, "{message}")?;
        self.out.flush()?;
        Ok(())
    }
}
