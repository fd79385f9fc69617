//! Line commands read from stdin while a session plays.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Tempo(u32),
    Genre(Option<String>),
    Experience(Option<String>),
    Status,
    Stop,
    Help,
}

pub const HELP: &str = "commands: tempo <bpm> | genre <text> | experience <text> | status | stop";

impl ConsoleCommand {
    /// Parse one input line. Blank lines yield `Ok(None)`. An empty genre or
    /// experience clears it.
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let text = || (!rest.is_empty()).then(|| rest.to_string());

        let command = match word.to_ascii_lowercase().as_str() {
            "tempo" | "bpm" => Self::Tempo(
                rest.parse()
                    .map_err(|_| format!("expected a whole number of BPM, got '{rest}'"))?,
            ),
            "genre" => Self::Genre(text()),
            "experience" => Self::Experience(text()),
            "status" => Self::Status,
            "stop" | "quit" | "exit" => Self::Stop,
            "help" | "?" => Self::Help,
            other => return Err(format!("unknown command '{other}'")),
        };
        Ok(Some(command))
    }
}
