use std::{io, time::Duration};

use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute, terminal,
};

use crate::tui::{App, event::TuiEvent, event_loop::EventLoop};

/// TUI application runtime.
///
/// Manages the event loop and executes applications that implement the `App` trait.
#[derive(Default, Debug)]
pub struct Tui {
    events: EventLoop,
    mouse_capture: bool,
    key_release_events: bool,
}

impl Tui {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the tick rate (Hz, ticks per second).
    pub fn set_tick_rate(&mut self, rate: f64) {
        self.events
            .set_tick_interval(Some(Duration::from_secs_f64(1.0 / rate)));
    }

    /// Requests mouse press, drag and release events.
    pub fn enable_mouse_capture(&mut self) {
        self.mouse_capture = true;
    }

    /// Requests key release events when the terminal supports them.
    ///
    /// Returns whether release events will be reported.
    pub fn enable_key_release_events(&mut self) -> bool {
        self.key_release_events = terminal::supports_keyboard_enhancement().unwrap_or(false);
        self.key_release_events
    }

    /// Runs the application.
    ///
    /// 1. Calls `app.init()` for initialization
    /// 2. Runs the event loop until `app.should_exit()` returns true
    ///    - tick: calls `app.update()` with the elapsed time
    ///    - render: calls `app.draw()`
    ///    - terminal event: calls `app.handle_event()`
    pub fn run<A>(mut self, app: &mut A) -> anyhow::Result<()>
    where
        A: App,
    {
        app.init(&mut self);

        ratatui::run(|terminal| -> anyhow::Result<()> {
            self.enter_input_modes()?;
            let result = self.event_loop(terminal, app);
            self.leave_input_modes()?;
            result
        })
    }

    fn event_loop<A>(
        &mut self,
        terminal: &mut ratatui::DefaultTerminal,
        app: &mut A,
    ) -> anyhow::Result<()>
    where
        A: App,
    {
        while !app.should_exit() {
            match self.events.next()? {
                TuiEvent::Tick(elapsed) => {
                    app.update(self, elapsed);
                }
                TuiEvent::Render => {
                    terminal.draw(|f| app.draw(f))?;
                }
                TuiEvent::Crossterm(event) => {
                    app.handle_event(self, event);
                }
            }
        }
        Ok(())
    }

    fn enter_input_modes(&self) -> io::Result<()> {
        if self.mouse_capture {
            execute!(io::stdout(), EnableMouseCapture)?;
        }
        if self.key_release_events {
            execute!(
                io::stdout(),
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        }
        Ok(())
    }

    fn leave_input_modes(&self) -> io::Result<()> {
        if self.key_release_events {
            execute!(io::stdout(), PopKeyboardEnhancementFlags)?;
        }
        if self.mouse_capture {
            execute!(io::stdout(), DisableMouseCapture)?;
        }
        Ok(())
    }
}
