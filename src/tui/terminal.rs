//! Terminal setup and teardown.

use std::io::{self, IsTerminal, Stdout};

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::{ComissaoError, Result};

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Enters raw mode and the alternate screen.
///
/// Also installs a panic hook that leaves the alternate screen before the
/// panic message is printed.
///
/// # Errors
///
/// Returns [`ComissaoError::Io`] if stdout is not a TTY or the terminal
/// cannot be switched.
pub fn setup_terminal() -> Result<Tui> {
    if !io::stdout().is_terminal() {
        return Err(ComissaoError::Io(
            "the report browser needs an interactive terminal; use --export instead".to_string(),
        ));
    }

    enable_raw_mode().map_err(|e| ComissaoError::Io(format!("failed to enable raw mode: {e}")))?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).map_err(|e| {
        let _ = disable_raw_mode();
        ComissaoError::Io(format!("failed to enter alternate screen: {e}"))
    })?;

    let terminal = Terminal::new(CrosstermBackend::new(stdout)).map_err(|e| {
        let _ = disable_raw_mode();
        ComissaoError::Io(format!("failed to create terminal: {e}"))
    })?;

    install_panic_hook();
    Ok(terminal)
}

fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        previous(info);
    }));
}

/// Leaves raw mode and the alternate screen.
///
/// # Errors
///
/// Returns [`ComissaoError::Io`] if the terminal cannot be restored.
pub fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode().map_err(|e| ComissaoError::Io(e.to_string()))?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .map_err(|e| ComissaoError::Io(e.to_string()))?;
    terminal
        .show_cursor()
        .map_err(|e| ComissaoError::Io(e.to_string()))?;
    Ok(())
}
