use std::io::{self, Write};

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal;

/// Read one trimmed line from stdin after printing a prompt.
/// Returns `None` on EOF.
pub fn read_line(prompt: &str) -> io::Result<Option<String>> {
    print!("{}", prompt);
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        println!();
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Read a line without echoing it, masking keystrokes with `*`.
/// Returns `None` when the user aborts with Ctrl-C or Ctrl-D.
pub fn read_password(prompt: &str) -> io::Result<Option<String>> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let result = {
        let _raw = RawMode::enable()?;
        read_masked()
    };
    println!();
    result
}

fn read_masked() -> io::Result<Option<String>> {
    let mut password = String::new();
    loop {
        let key = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => key,
            _ => continue,
        };
        match key.code {
            KeyCode::Enter => return Ok(Some(password)),
            KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) => {
                if c == 'c' || c == 'd' {
                    return Ok(None);
                }
            }
            KeyCode::Char(c) => {
                password.push(c);
                print!("*");
                io::stdout().flush()?;
            }
            KeyCode::Backspace => {
                if password.pop().is_some() {
                    // Erase the last mask character.
                    print!("\u{8} \u{8}");
                    io::stdout().flush()?;
                }
            }
            _ => {}
        }
    }
}

/// Restores the terminal even when the read bails out early.
struct RawMode;

impl RawMode {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}
