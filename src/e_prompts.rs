#[cfg(feature = "tui")]
use crossterm::{
    event::{poll, read, Event, KeyCode},
    terminal::{disable_raw_mode, enable_raw_mode},
};
use std::error::Error;
use std::io::{self, IsTerminal};
use std::time::Duration;

/// Prompts the user with the given message and waits up to `wait_secs` seconds
/// for a key press. Returns `Ok(Some(c))` if a key is pressed, or `Ok(None)`
/// if the timeout expires or stdin is not a terminal.
pub fn prompt(message: &str, wait_secs: u64) -> Result<Option<char>, Box<dyn Error>> {
    if !message.trim().is_empty() {
        println!("{}", message);
    }
    if !io::stdin().is_terminal() {
        return Ok(None);
    }

    #[cfg(feature = "tui")]
    {
        let timeout = Duration::from_secs(wait_secs);
        // Clear any pending events.
        while poll(Duration::from_millis(0))? {
            let _ = read()?;
        }
        enable_raw_mode()?;
        let result = if poll(timeout)? {
            match read()? {
                Event::Key(key_event) => match key_event.code {
                    KeyCode::Char(c) => Some(c.to_ascii_lowercase()),
                    _ => Some('\n'),
                },
                _ => None,
            }
        } else {
            None
        };
        disable_raw_mode()?;
        Ok(result)
    }

    #[cfg(not(feature = "tui"))]
    {
        Ok(read_line_with_timeout(wait_secs)?.and_then(|line| line.chars().next()))
    }
}

/// Reads an entire line from the user, pre-filled with `initial` where the
/// terminal allows it. Returns `Ok(None)` when input is cancelled (Esc) or
/// stdin is not a terminal.
pub fn prompt_line(message: &str, initial: &str) -> Result<Option<String>, Box<dyn Error>> {
    if !io::stdin().is_terminal() {
        return Ok(None);
    }

    #[cfg(feature = "tui")]
    {
        use std::io::Write;
        print!("{} {}", message, initial);
        io::stdout().flush()?;
        enable_raw_mode()?;
        let mut input = initial.to_string();
        let outcome = loop {
            if let Event::Key(key_event) = read()? {
                match key_event.code {
                    KeyCode::Enter => break Some(input),
                    KeyCode::Esc => break None,
                    KeyCode::Char(c) => {
                        input.push(c);
                        print!("{}", c);
                        io::stdout().flush()?;
                    }
                    KeyCode::Backspace => {
                        if input.pop().is_some() {
                            print!("\u{8} \u{8}");
                            io::stdout().flush()?;
                        }
                    }
                    _ => {}
                }
            }
        };
        disable_raw_mode()?;
        println!();
        Ok(outcome)
    }

    #[cfg(not(feature = "tui"))]
    {
        use std::io::{BufRead, Write};
        if initial.is_empty() {
            print!("{} ", message);
        } else {
            print!("{} [{}] ", message, initial);
        }
        io::stdout().flush()?;
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        let line = line.trim_end_matches(['\r', '\n']);
        if line.is_empty() {
            Ok(Some(initial.to_string()))
        } else {
            Ok(Some(line.to_string()))
        }
    }
}

#[cfg(not(feature = "tui"))]
fn read_line_with_timeout(wait_secs: u64) -> io::Result<Option<String>> {
    use std::io::BufRead;
    use std::sync::mpsc;
    use std::thread;

    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut line = String::new();
        let _ = io::stdin().lock().read_line(&mut line);
        let _ = tx.send(line);
    });
    match rx.recv_timeout(Duration::from_secs(wait_secs)) {
        Ok(line) => Ok(Some(line.trim().to_string())),
        Err(mpsc::RecvTimeoutError::Timeout) => Ok(None),
        Err(e) => Err(io::Error::new(io::ErrorKind::Other, e)),
    }
}
