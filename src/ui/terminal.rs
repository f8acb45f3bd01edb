//! Terminal front end
//!
//! Line-oriented loop over stdin. Each command maps onto a session [`Action`] and the
//! screen is redrawn after every command.

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::session::{Action, QuoteSession, SessionState};

const HELP: &str = "Commands:
  n, next          get another quote
  s, save          save the current quote
  h, share         share the current quote
  l, list          show or hide saved quotes
  d, delete <N>    delete saved quote number N
  ?, help          show this help
  q, quit          exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(Action),
    Help,
    Redraw,
    Quit,
}

/// Parse one input line
pub fn parse_command(line: &str) -> Result<Command, String> {
    let mut parts = line.split_whitespace();
    let Some(verb) = parts.next() else {
        return Ok(Command::Redraw);
    };

    let command = match verb.to_lowercase().as_str() {
        "n" | "next" => Command::Run(Action::Refresh),
        "s" | "save" => Command::Run(Action::Save),
        "h" | "share" => Command::Run(Action::Share),
        "l" | "list" => Command::Run(Action::ToggleList),
        "d" | "delete" => {
            let arg = parts
                .next()
                .ok_or_else(|| "delete needs the number of a saved quote".to_string())?;
            let number: usize = arg
                .parse()
                .map_err(|_| format!("not a quote number: {}", arg))?;
            // Rows are shown starting at 1
            let index = number
                .checked_sub(1)
                .ok_or_else(|| "quote numbers start at 1".to_string())?;
            Command::Run(Action::Remove(index))
        }
        "?" | "help" => Command::Help,
        "q" | "quit" | "exit" => Command::Quit,
        other => return Err(format!("unknown command: {}", other)),
    };

    if let Some(extra) = parts.next() {
        return Err(format!("unexpected argument: {}", extra));
    }
    Ok(command)
}

/// Render the session state as plain text
pub fn render(state: &SessionState) -> String {
    let mut out = String::new();
    out.push_str("\n  ");
    out.push_str(state.current.text());
    out.push_str("\n    ");
    out.push_str(&state.current.byline());
    out.push('\n');

    if state.list_visible {
        out.push_str("\nSaved Quotes\n");
        if state.saved.is_empty() {
            out.push_str("  (none yet)\n");
        }
        for (i, quote) in state.saved.iter().enumerate() {
            out.push_str(&format!("  {}. {}\n     - {}\n", i + 1, quote.content, quote.author));
        }
    }

    if let Some(error) = &state.last_error {
        out.push_str(&format!("\n! {}\n", error));
    }

    out
}

/// Drive `session` from stdin until EOF or `quit`
pub async fn run(session: &mut QuoteSession) -> std::io::Result<()> {
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    session.init().await;
    stdout.write_all(render(session.state()).as_bytes()).await?;
    stdout.write_all(b"\nType ? for help.\n").await?;

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let output = match parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => format!("{}\n", HELP),
            Ok(Command::Redraw) => render(session.state()),
            Ok(Command::Run(action)) => {
                session.apply(action).await;
                render(session.state())
            }
            Err(e) => format!("{} (type ? for help)\n", e),
        };
        stdout.write_all(output.as_bytes()).await?;
    }

    tracing::info!("Terminal session closed");
    Ok(())
}
