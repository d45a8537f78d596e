//! Interactive session for one widget.
//!
//! The session reads commands line by line and drives the rest of the
//! crate: it keeps the options, dispatches pipeline runs, renders their
//! results and forwards copy requests to the clipboard controller.
//!
//! Option entry is a small state machine: after `options` the next line(s)
//! answer the prompts instead of being read as commands.
//!
//! Commands (short forms in parentheses):
//!
//! * `generate` (`g`): draw a new value; cancels a run still in flight
//! * `options` (`o`): change the range or word length
//! * `copy` (`c`): copy the displayed value
//! * `leave` (`l`): reset the copy icon, as when the pointer leaves
//! * `features` (`f`): describe the widget
//! * `dictionary` (`d`): link to the full entry of the displayed word
//! * `help` (`h`), `quit` (`q`)

use std::{fmt, future::Future, ops::ControlFlow, str::FromStr};

use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt},
    sync::watch,
};

use crate::{
    clipboard::{Clipboard, Controller, Icon},
    error::{Error, Result},
    features::Features,
    options::{Range, WordLength, LENGTH_PROMPT, MAX_PROMPT, MIN_PROMPT},
    pipeline::{Completion, Dispatcher, Pipeline, Request, FALLBACK},
    render::{Render, Screen},
};

/// Which generator a session runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Widget {
    Number,
    Word,
}

impl fmt::Display for Widget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number => write!(f, "number"),
            Self::Word => write!(f, "word"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    Generate,
    Options,
    Copy,
    Leave,
    Features,
    Dictionary,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let command = match s.trim().to_lowercase().as_str() {
            "generate" | "g" => Self::Generate,
            "options" | "o" => Self::Options,
            "copy" | "c" => Self::Copy,
            "leave" | "l" => Self::Leave,
            "features" | "f" => Self::Features,
            "dictionary" | "d" => Self::Dictionary,
            "help" | "h" | "?" => Self::Help,
            "quit" | "q" | "exit" => Self::Quit,
            _ => return Err(Error::invalid_argument(format!("unknown command {s:?}"))),
        };
        Ok(command)
    }
}

/// What the next input line means.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
enum Mode {
    #[default]
    Command,
    Min,
    Max {
        min: String,
    },
    Length,
}

pub struct Session<R, C> {
    widget: Widget,
    range: Range,
    length: WordLength,

    dispatcher: Dispatcher,
    controller: Controller<C>,
    icons: watch::Receiver<Icon>,
    features: Features,

    screen: Screen,
    renderer: R,
    mode: Mode,
}

impl<R, C> Session<R, C>
where
    R: Render,
    C: Clipboard,
{
    #[must_use]
    pub fn new(
        widget: Widget,
        pipeline: Pipeline,
        controller: Controller<C>,
        features: Features,
        renderer: R,
    ) -> Self {
        let icons = controller.subscribe();

        Self {
            widget,
            range: Range::default(),
            length: WordLength::default(),

            dispatcher: Dispatcher::new(pipeline),
            controller,
            icons,
            features,

            screen: Screen::default(),
            renderer,
            mode: Mode::default(),
        }
    }

    #[must_use]
    pub fn with_range(mut self, range: Range) -> Self {
        self.range = range;
        self
    }

    #[must_use]
    pub fn with_length(mut self, length: WordLength) -> Self {
        self.length = length;
        self
    }

    #[must_use]
    pub fn widget(&self) -> Widget {
        self.widget
    }

    #[must_use]
    pub fn range(&self) -> Range {
        self.range
    }

    #[must_use]
    pub fn length(&self) -> WordLength {
        self.length
    }

    #[must_use]
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn controller(&self) -> &Controller<C> {
        &self.controller
    }

    /// The request a `generate` would submit with the current options.
    #[must_use]
    pub fn request(&self) -> Request {
        match self.widget {
            Widget::Number => Request::Number(self.range),
            Widget::Word => Request::Word(self.length),
        }
    }

    /// Generates one value and renders it, waiting for the result.
    ///
    /// # Errors
    ///
    /// Will return `Err` if rendering fails.
    pub async fn generate(&mut self) -> Result<()> {
        self.dispatcher.submit(self.request());
        let completion = self.dispatcher.completed().await;
        self.complete(completion)
    }

    /// Renders the result of a pipeline run.
    ///
    /// # Errors
    ///
    /// Will return `Err` if rendering fails.
    pub fn complete(&mut self, completion: Completion) -> Result<()> {
        match completion.result {
            Ok(output) => self.screen.show(&output),
            Err(e) => {
                error!("error generating {}: {e}", self.widget);
                self.screen.show_error(FALLBACK);
            }
        }

        self.renderer.draw(&self.screen)
    }

    /// Handles one line of input, either a command or a prompt answer.
    ///
    /// # Errors
    ///
    /// Will return `Err` if rendering fails.
    pub fn handle_line(&mut self, line: &str) -> Result<ControlFlow<()>> {
        let line = line.trim();

        match std::mem::take(&mut self.mode) {
            Mode::Command => {}
            Mode::Min => {
                self.mode = Mode::Max {
                    min: line.to_owned(),
                };
                self.renderer.prompt(MAX_PROMPT)?;
                return Ok(ControlFlow::Continue(()));
            }
            Mode::Max { min } => {
                let range = Range::from_input(&min, line);
                if let Some(warning) = range.warning {
                    self.renderer.alert(&warning.to_string())?;
                }
                self.range = range.value;
                info!("range set to {}", self.range);
                return Ok(ControlFlow::Continue(()));
            }
            Mode::Length => {
                let length = WordLength::from_input(line);
                if let Some(warning) = length.warning {
                    self.renderer.alert(&warning.to_string())?;
                }
                self.length = length.value;
                info!("word length set to {}", self.length);
                return Ok(ControlFlow::Continue(()));
            }
        }

        if line.is_empty() {
            return Ok(ControlFlow::Continue(()));
        }

        match line.parse() {
            Ok(command) => self.execute(command),
            Err(_) => {
                self.renderer.print(&format!(
                    "unknown command {line:?}, type \"help\" for a list of commands"
                ))?;
                Ok(ControlFlow::Continue(()))
            }
        }
    }

    /// Executes one command.
    ///
    /// # Errors
    ///
    /// Will return `Err` if rendering fails.
    pub fn execute(&mut self, command: Command) -> Result<ControlFlow<()>> {
        match command {
            Command::Generate => {
                if self.dispatcher.is_busy() {
                    debug!("superseding the run in flight");
                }
                self.dispatcher.submit(self.request());
            }

            Command::Options => match self.widget {
                Widget::Number => {
                    self.mode = Mode::Min;
                    self.renderer.prompt(MIN_PROMPT)?;
                }
                Widget::Word => {
                    self.mode = Mode::Length;
                    self.renderer.prompt(LENGTH_PROMPT)?;
                }
            },

            Command::Copy => {
                let value = self.screen.value().to_owned();
                // Failures are logged by the controller and otherwise ignored.
                let _ = self.controller.copy(&value);
            }

            Command::Leave => self.controller.leave(),

            Command::Features => {
                for card in &self.features.contents {
                    self.renderer.print(&card.to_string())?;
                }
            }

            Command::Dictionary => self.dictionary()?,

            Command::Help => self.help()?,

            Command::Quit => {
                self.dispatcher.cancel();
                return Ok(ControlFlow::Break(()));
            }
        }

        Ok(ControlFlow::Continue(()))
    }

    fn dictionary(&mut self) -> Result<()> {
        if self.widget != Widget::Word {
            return self
                .renderer
                .print("the dictionary is only available for words");
        }

        let word = self.screen.value();
        if word.is_empty() {
            return self.renderer.print("generate a word first");
        }

        let url = self.dispatcher.pipeline().wordnik_url(word)?;
        debug!("dictionary page: {url}");
        self.renderer.print(url.as_str())
    }

    fn help(&mut self) -> Result<()> {
        let options = match self.widget {
            Widget::Number => "options     (o)  set the minimum and maximum",
            Widget::Word => "options     (o)  set the word length",
        };

        self.renderer.print("generate    (g)  generate a new value")?;
        self.renderer.print(options)?;
        self.renderer.print("copy        (c)  copy the value to the clipboard")?;
        self.renderer.print("leave       (l)  reset the copy icon")?;
        self.renderer.print("features    (f)  describe this generator")?;
        if self.widget == Widget::Word {
            self.renderer
                .print("dictionary  (d)  link to the full dictionary entry")?;
        }
        self.renderer.print("help        (h)  show this help")?;
        self.renderer.print("quit        (q)  exit")
    }

    fn redraw_icon(&mut self) -> Result<()> {
        let icon = *self.icons.borrow_and_update();
        self.screen.icon = icon;
        self.renderer.icon(icon)
    }

    /// Runs the session until `quit`, end of input, or `shutdown` resolves.
    ///
    /// At end of input a run still in flight is awaited and rendered, so
    /// that piped input like `echo generate | genum number` prints a result.
    ///
    /// # Errors
    ///
    /// Will return `Err` if input cannot be read or rendering fails.
    pub async fn run<I, S>(&mut self, input: I, shutdown: S) -> Result<()>
    where
        I: AsyncBufRead + Unpin,
        S: Future<Output = ()>,
    {
        let mut lines = input.lines();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                // Prioritize shutdown signals.
                biased;

                () = &mut shutdown => {
                    self.dispatcher.cancel();
                    break;
                }

                completion = self.dispatcher.completed() => self.complete(completion)?,

                Ok(()) = self.icons.changed() => self.redraw_icon()?,

                line = lines.next_line() => {
                    let Some(line) = line? else {
                        if self.dispatcher.is_busy() {
                            let completion = self.dispatcher.completed().await;
                            self.complete(completion)?;
                        }
                        break;
                    };

                    if self.handle_line(&line)?.is_break() {
                        break;
                    }
                }
            }
        }

        Ok(())
    }
}
