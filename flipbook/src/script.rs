//! # Script front end
//!
//! Drives a session from text, one statement per line. Blank lines and `#` comments are skipped.
//!
//! ```text
//! press 3 4        # pointer events, in cells
//! drag 8 4
//! release 8 4
//! key ctrl+KeyZ    # anything bound in hotkeys.toml
//! duplicate
//! frames 6
//! color #ff8800
//! tick 130         # advance the preview clock, in milliseconds
//! save walk-cycle
//! ```

use std::time::Duration;

use flipbook_core::{
    color::ColorParseError, pen_tools::Tool, state::grid::Cell, Command, CommandError,
    EditorSession,
};

use crate::actions::{
    hotkeys::{KeyboardHotkey, KeyboardHotkeyFromStrError, KeysToActions},
    Action,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Statement {
    Press(Cell),
    Drag(Cell),
    Release(Cell),
    /// Act as if a hotkey was pressed.
    Key(KeyboardHotkey),
    Command(Command),
    Tick(Duration),
    /// Save, optionally under a different name than the default.
    Save(Option<String>),
    Load(std::path::PathBuf),
    Status,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown statement {0:?}")]
    Unknown(String),
    #[error("missing {0}")]
    MissingArgument(&'static str),
    #[error("unexpected argument {0:?}")]
    Trailing(String),
    #[error("expected a number, found {0:?}")]
    BadNumber(String),
    #[error("bad color: {0}")]
    BadColor(#[from] ColorParseError),
    #[error("unknown tool {0:?}")]
    BadTool(String),
    #[error("expected `next` or `prev`, found {0:?}")]
    BadPage(String),
    #[error("bad hotkey: {0}")]
    BadKey(#[from] KeyboardHotkeyFromStrError),
}

struct Args<'a>(std::str::SplitWhitespace<'a>);
impl<'a> Args<'a> {
    fn word(&mut self, what: &'static str) -> Result<&'a str, ParseError> {
        self.0.next().ok_or(ParseError::MissingArgument(what))
    }
    fn number<T: std::str::FromStr>(&mut self, what: &'static str) -> Result<T, ParseError> {
        let word = self.word(what)?;
        word.parse().map_err(|_| ParseError::BadNumber(word.to_owned()))
    }
    fn cell(&mut self) -> Result<Cell, ParseError> {
        Ok(Cell::new(self.number("column")?, self.number("row")?))
    }
    fn finish(mut self) -> Result<(), ParseError> {
        match self.0.next() {
            Some(extra) => Err(ParseError::Trailing(extra.to_owned())),
            None => Ok(()),
        }
    }
}

/// Parse one line. `Ok(None)` for blank and comment lines.
pub fn parse_line(line: &str) -> Result<Option<Statement>, ParseError> {
    // `#` starts a comment unless it's the argument of `color`.
    let comment = line
        .match_indices('#')
        .map(|(at, _)| at)
        .find(|&at| line[..at].trim() != "color");
    let line = comment.map_or(line, |at| &line[..at]);
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };
    let mut args = Args(words);

    let statement = match head {
        "press" => Statement::Press(args.cell()?),
        "drag" => Statement::Drag(args.cell()?),
        "release" => Statement::Release(args.cell()?),
        "key" => Statement::Key(args.word("hotkey")?.parse()?),
        "tick" => Statement::Tick(Duration::from_millis(args.number("milliseconds")?)),
        "save" => Statement::Save(args.0.next().map(str::to_owned)),
        "load" => Statement::Load(args.word("path")?.into()),
        "status" => Statement::Status,
        _ => Statement::Command(parse_command(head, &mut args)?),
    };
    args.finish()?;
    Ok(Some(statement))
}

fn parse_command(head: &str, args: &mut Args) -> Result<Command, ParseError> {
    Ok(match head {
        "undo" => Command::Undo,
        "redo" => Command::Redo,
        "next" => Command::NextFrame,
        "prev" => Command::PreviousFrame,
        "jump" => Command::JumpToFrame(args.number("frame")?),
        "page" => match args.word("direction")? {
            "next" => Command::NextPage,
            "prev" => Command::PreviousPage,
            other => return Err(ParseError::BadPage(other.to_owned())),
        },
        "insert" => Command::InsertFrame,
        "duplicate" => Command::DuplicateFrame,
        "delete" => Command::DeleteFrame,
        "frames" => Command::SetTotalFrames(args.number("frame count")?),
        "copy" => Command::Copy,
        "paste" => Command::Paste,
        "resize" => Command::ResizeCanvas(args.number("canvas size")?),
        "tool" => {
            let name = args.word("tool")?;
            Command::SetTool(
                name.parse::<Tool>()
                    .map_err(|_| ParseError::BadTool(name.to_owned()))?,
            )
        }
        "color" => Command::SetColor(args.word("color")?.parse()?),
        "fps" => Command::SetFps(args.number("fps")?),
        other => return Err(ParseError::Unknown(other.to_owned())),
    })
}

/// Executes statements against a session, reporting to `out`.
pub struct Runner<'a, Out> {
    pub session: &'a mut EditorSession,
    pub hotkeys: &'a KeysToActions,
    /// Where `save` writes to.
    pub save_dir: std::path::PathBuf,
    /// Name `save` uses when none is given.
    pub file_name: String,
    out: Out,
}
impl<'a, Out: std::io::Write> Runner<'a, Out> {
    pub fn new(
        session: &'a mut EditorSession,
        hotkeys: &'a KeysToActions,
        save_dir: std::path::PathBuf,
        file_name: String,
        out: Out,
    ) -> Self {
        Self {
            session,
            hotkeys,
            save_dir,
            file_name,
            out,
        }
    }
    /// Run every line of `input`. Bad lines are reported and skipped, only failing to write output stops early.
    pub fn run(&mut self, input: impl std::io::BufRead) -> anyhow::Result<()> {
        for (number, line) in input.lines().enumerate() {
            let line = line?;
            match parse_line(&line) {
                Ok(Some(statement)) => self.execute(statement)?,
                Ok(None) => (),
                Err(e) => {
                    log::debug!("Line {}: {e}", number + 1);
                    writeln!(self.out, "line {}: {e}", number + 1)?;
                }
            }
        }
        Ok(())
    }
    pub fn execute(&mut self, statement: Statement) -> anyhow::Result<()> {
        match statement {
            Statement::Press(cell) => {
                self.session.press(cell);
            }
            Statement::Drag(cell) => {
                self.session.drag(cell);
            }
            Statement::Release(cell) => {
                if let Some(end) = self.session.release(cell) {
                    writeln!(self.out, "{}: {} cells", end.tool, end.changed)?;
                }
            }
            Statement::Key(hotkey) => match self.hotkeys.action_of(&hotkey) {
                Some(Action::Save) => self.save(None)?,
                Some(action) => {
                    if let Some(command) = action.command(self.session) {
                        self.apply(command)?;
                    }
                }
                None => writeln!(self.out, "{hotkey} isn't bound")?,
            },
            Statement::Command(command) => self.apply(command)?,
            Statement::Tick(elapsed) => {
                if let Some(frame) = self.session.tick(elapsed) {
                    writeln!(self.out, "preview {}", frame + 1)?;
                }
            }
            Statement::Save(name) => self.save(name.as_deref())?,
            Statement::Load(path) => match crate::io::read_path(&path, self.session) {
                Ok(frames) => writeln!(self.out, "loaded {frames} frames")?,
                Err(e) => writeln!(self.out, "error: {e:#}")?,
            },
            Statement::Status => self.status()?,
        }
        Ok(())
    }
    fn apply(&mut self, command: Command) -> std::io::Result<()> {
        match self.session.apply(command) {
            Ok(()) => Ok(()),
            Err(e @ CommandError::NoOp(_)) => writeln!(self.out, "note: {e}"),
            Err(e) => writeln!(self.out, "error: {e}"),
        }
    }
    fn save(&mut self, name: Option<&str>) -> std::io::Result<()> {
        let name = name.unwrap_or(&self.file_name);
        match crate::io::write_path(&self.save_dir, name, self.session) {
            Ok(path) => writeln!(self.out, "saved {}", path.display()),
            Err(e) => writeln!(self.out, "error: {e:#}"),
        }
    }
    fn status(&mut self) -> std::io::Result<()> {
        let session = &*self.session;
        let store = session.store();
        let history = session.history();
        let visible = session.film_strip().visible(store.active_count());
        writeln!(
            self.out,
            "frame {}/{} | {} | {} {} | {} fps | undo {} redo {} | strip {}-{}",
            store.current_index() + 1,
            store.active_count(),
            store.canvas_size(),
            session.tools().tool(),
            session.color(),
            session.playback().fps(),
            history.undo_steps(),
            history.redo_steps(),
            visible.start + 1,
            visible.end,
        )
    }
}

#[cfg(test)]
mod test {
    use super::{parse_line, ParseError, Runner, Statement};
    use crate::actions::hotkeys::{ActionsToKeys, KeysToActions};
    use flipbook_core::{pen_tools::Tool, state::grid::Cell, Color, Command, EditorSession};
    use std::time::Duration;

    #[test]
    fn parses_statements() {
        assert_eq!(
            parse_line("press 3 -1"),
            Ok(Some(Statement::Press(Cell::new(3, -1))))
        );
        assert_eq!(
            parse_line("  jump 4  # go"),
            Ok(Some(Statement::Command(Command::JumpToFrame(4))))
        );
        assert_eq!(
            parse_line("color #ff000080"),
            Ok(Some(Statement::Command(Command::SetColor(Color::new(
                255, 0, 0, 128
            )))))
        );
        assert_eq!(
            parse_line("color #ff0000 # ink"),
            Ok(Some(Statement::Command(Command::SetColor(Color::opaque(
                255, 0, 0
            )))))
        );
        assert_eq!(
            parse_line("tool rectangle"),
            Ok(Some(Statement::Command(Command::SetTool(Tool::Rectangle))))
        );
        assert_eq!(parse_line("tick 125"), Ok(Some(Statement::Tick(Duration::from_millis(125)))));
        assert_eq!(parse_line("save"), Ok(Some(Statement::Save(None))));
        assert_eq!(parse_line("# just a comment"), Ok(None));
        assert_eq!(parse_line(""), Ok(None));
    }
    #[test]
    fn parse_errors() {
        assert_eq!(parse_line("press 3"), Err(ParseError::MissingArgument("row")));
        assert_eq!(parse_line("frames x"), Err(ParseError::BadNumber("x".to_owned())));
        assert_eq!(parse_line("undo twice"), Err(ParseError::Trailing("twice".to_owned())));
        assert_eq!(parse_line("tool brush"), Err(ParseError::BadTool("brush".to_owned())));
        assert_eq!(parse_line("page up"), Err(ParseError::BadPage("up".to_owned())));
        assert_eq!(parse_line("explode"), Err(ParseError::Unknown("explode".to_owned())));
        assert!(matches!(parse_line("key ctrl+Nope"), Err(ParseError::BadKey(_))));
    }
    #[test]
    fn runs_a_script() {
        let mut session = EditorSession::default();
        let keys = KeysToActions::try_from(&ActionsToKeys::default()).unwrap();
        let mut out = Vec::new();
        let script = "\
            press 0 0\n\
            drag 3 0\n\
            release 3 0\n\
            key ctrl+KeyD\n\
            bogus\n\
            delete\n\
            delete\n\
            key ctrl+KeyZ\n\
            status\n";
        Runner::new(
            &mut session,
            &keys,
            std::env::temp_dir(),
            "unused.png".to_owned(),
            &mut out,
        )
        .run(script.as_bytes())
        .unwrap();

        let out = String::from_utf8(out).unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(
            lines,
            [
                "pencil: 4 cells",
                "line 5: unknown statement \"bogus\"",
                "note: can't delete the only frame",
                "frame 1/2 | 32x32 | pencil #000000 | 8 fps | undo 2 redo 1 | strip 1-2",
            ]
        );
    }
}
