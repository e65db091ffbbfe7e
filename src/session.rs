//! The menu-driven console around a [`Tree`]. Input and output are generic so the whole
//! conversation can be driven from memory in tests.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::{debug, info, warn};

use crate::display::{write_rows, DisplayConfig};
use crate::error::{LoadError, ParseActionError, SessionError};
use crate::loader;
use crate::tree::{Insertion, Tree};

const ALLOCATION_FAILURE: &str = "ERROR - A memory allocation failure has occurred.";
const EMPTY_TREE: &str = "Binary search tree is empty.";

/// Something the user can ask for from the menu.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Print every value in the tree.
    Show,
    /// Add a positive integer.
    Add,
    /// Delete an integer.
    Delete,
    /// Print the subtree rooted at an integer.
    Find,
    /// Leave the menu.
    Exit,
}

impl Action {
    /// Every action in menu order.
    pub const ALL: [Action; 5] = [
        Action::Show,
        Action::Add,
        Action::Delete,
        Action::Find,
        Action::Exit,
    ];

    /// The character that selects this action.
    pub fn key(self) -> char {
        match self {
            Action::Show => 'S',
            Action::Add => 'A',
            Action::Delete => 'D',
            Action::Find => 'F',
            Action::Exit => 'E',
        }
    }

    /// The action selected by `key`, ignoring case.
    pub fn from_key(key: char) -> Option<Self> {
        let key = key.to_ascii_uppercase();
        Self::ALL.into_iter().find(|action| action.key() == key)
    }

    fn describe(self) -> &'static str {
        match self {
            Action::Show => "Show all integers in the binary search tree.",
            Action::Add => "Add an integer to the tree.",
            Action::Delete => "Delete an integer from the tree.",
            Action::Find => "Find an integer and display its subtree.",
            Action::Exit => "Exit the program.",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.key(), self.describe())
    }
}

/// Parses the first non-blank character of `s`.
impl FromStr for Action {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .chars()
            .next()
            .and_then(Action::from_key)
            .ok_or_else(|| ParseActionError(s.trim().to_string()))
    }
}

/// Whether the session keeps going after an action.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    /// Show the menu again.
    Continue,
    /// Stop the session and tear the tree down.
    Halt,
    /// A node couldn't be allocated: stop the session, tear the tree down, and report failure.
    Abort,
}

/// A console session: prompts on `output`, answers read line by line from `input`.
pub struct Session<R, W> {
    input: R,
    output: W,
    tree: Tree,
    display: DisplayConfig,
}

impl<R, W> Session<R, W>
where
    R: BufRead,
    W: Write,
{
    /// Starts a session over `tree`.
    pub fn new(input: R, output: W, tree: Tree, display: DisplayConfig) -> Self {
        Self {
            input,
            output,
            tree,
            display,
        }
    }

    /// The tree being worked on.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Gives back the output writer, consuming the session.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Asks for a data file name until one can be opened.
    pub fn prompt_for_file(&mut self) -> Result<BufReader<File>, SessionError> {
        loop {
            write!(self.output, "Enter a file name for integer data: ")?;
            self.output.flush()?;
            let path = PathBuf::from(self.read_line()?.trim());

            match loader::open(&path) {
                Ok(reader) => {
                    info!(path = %path.display(), "opened data file");
                    return Ok(reader);
                }
                Err(err) => {
                    debug!(error = %err, "data file rejected");
                    writeln!(self.output, "File does not exist, enter  a file that does exist.")?;
                }
            }
        }
    }

    /// Tries `preset` first and falls back to [`Session::prompt_for_file`] when there is none or
    /// it can't be opened.
    pub fn open_data_file(
        &mut self,
        preset: Option<&Path>,
    ) -> Result<BufReader<File>, SessionError> {
        if let Some(path) = preset {
            match loader::open(path) {
                Ok(reader) => {
                    info!(path = %path.display(), "opened data file");
                    return Ok(reader);
                }
                Err(err) => {
                    warn!(error = %err, "preset data file rejected");
                    writeln!(self.output, "File does not exist, enter  a file that does exist.")?;
                }
            }
        }
        self.prompt_for_file()
    }

    /// Seeds the tree from `reader`. Returns [`Flow::Abort`] when a node couldn't be allocated,
    /// in which case the menu should be skipped.
    pub fn load<Rd: BufRead>(&mut self, reader: Rd) -> Result<Flow, SessionError> {
        match loader::load(&mut self.tree, reader) {
            Ok(report) => {
                for value in &report.duplicates {
                    writeln!(
                        self.output,
                        "\n{value} already exists in tree and will be ignored."
                    )?;
                }
                if let Some(token) = &report.stopped_at {
                    writeln!(
                        self.output,
                        "\nStopped reading at {token:?}, which is not an integer."
                    )?;
                }
                Ok(Flow::Continue)
            }
            Err(LoadError::Alloc { inserted, source }) => {
                warn!(inserted, error = %source, "load aborted");
                writeln!(self.output, "{ALLOCATION_FAILURE}")?;
                Ok(Flow::Abort)
            }
            Err(LoadError::Io(source)) | Err(LoadError::Open { source, .. }) => {
                Err(SessionError::DataFile(source))
            }
        }
    }

    /// Shows the menu until an action stops the session or input runs out, and returns how the
    /// session ended. Running out of input counts as [`Flow::Halt`].
    pub fn run(&mut self) -> Result<Flow, SessionError> {
        loop {
            let step = self.menu().and_then(|action| self.dispatch(action));
            match step {
                Ok(Flow::Continue) => {}
                Ok(flow) => return Ok(flow),
                Err(SessionError::InputClosed) => {
                    info!("input closed, ending session");
                    return Ok(Flow::Halt);
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Prints the node count and the options, then reads choices until one is valid.
    pub fn menu(&mut self) -> Result<Action, SessionError> {
        if self.tree.is_empty() {
            writeln!(self.output, "\n{EMPTY_TREE}\n")?;
        } else {
            writeln!(
                self.output,
                "\nThere are {} integers in the binary search tree.\n",
                self.tree.len()
            )?;
        }
        writeln!(
            self.output,
            "--------------------Menu Options--------------------"
        )?;
        for action in Action::ALL {
            writeln!(self.output, "{action}")?;
        }

        loop {
            write!(self.output, "Enter a choice from the options above: ")?;
            self.output.flush()?;
            match self.read_line()?.parse() {
                Ok(action) => return Ok(action),
                Err(err) => {
                    debug!(error = %err, "menu choice rejected");
                    writeln!(self.output, "ERROR - Invalid character selection.")?;
                }
            }
        }
    }

    /// Carries out one menu action.
    pub fn dispatch(&mut self, action: Action) -> Result<Flow, SessionError> {
        debug!(?action, "dispatching");
        match action {
            Action::Show => self.show(),
            Action::Add => self.add(),
            Action::Delete => self.delete(),
            Action::Find => self.find(),
            Action::Exit => Ok(Flow::Halt),
        }
    }

    /// Frees every node. Returns how many were freed.
    pub fn teardown(&mut self) -> usize {
        self.tree.destroy_all()
    }

    fn show(&mut self) -> Result<Flow, SessionError> {
        writeln!(
            self.output,
            "\nValues stored in entire binary search tree are:"
        )?;
        if self.tree.is_empty() {
            writeln!(self.output, "{EMPTY_TREE}")?;
        } else {
            write_rows(&mut self.output, self.tree.iter(), &self.display)?;
            writeln!(self.output)?;
        }
        Ok(Flow::Continue)
    }

    fn add(&mut self) -> Result<Flow, SessionError> {
        let value = loop {
            let value = self.prompt_number("Enter a number to add to the tree: ")?;
            if value > 0 {
                break value;
            }
        };

        match self.tree.insert_unique(value) {
            Ok(Insertion::Inserted) => {
                writeln!(self.output, "{value} added to tree.")?;
                Ok(Flow::Continue)
            }
            Ok(Insertion::Duplicate) => {
                writeln!(
                    self.output,
                    "Number already exists in tree and cannot be added."
                )?;
                Ok(Flow::Continue)
            }
            Err(err) => {
                warn!(value, error = %err, "add aborted");
                writeln!(self.output, "{ALLOCATION_FAILURE}")?;
                Ok(Flow::Abort)
            }
        }
    }

    fn delete(&mut self) -> Result<Flow, SessionError> {
        let value = self.prompt_number("Enter a number to delete from the tree: ")?;
        if self.tree.delete(value) {
            writeln!(self.output, "{value} deleted from tree.")?;
        } else {
            writeln!(
                self.output,
                "{value} does not exist in the binary search tree."
            )?;
        }
        Ok(Flow::Continue)
    }

    fn find(&mut self) -> Result<Flow, SessionError> {
        if self.tree.is_empty() {
            writeln!(self.output, "{EMPTY_TREE}")?;
            return Ok(Flow::Continue);
        }

        let value = self.prompt_number("Enter a number to find: ")?;
        match self.tree.search(value) {
            Some(node) => {
                writeln!(self.output, "Values stored subtree with root {value} are:")?;
                write_rows(&mut self.output, node.iter(), &self.display)?;
            }
            None => writeln!(
                self.output,
                "{value} does not exist in the binary search tree."
            )?,
        }
        Ok(Flow::Continue)
    }

    /// Prompts until the answer parses as an `i32`.
    fn prompt_number(&mut self, prompt: &str) -> Result<i32, SessionError> {
        loop {
            write!(self.output, "{prompt}")?;
            self.output.flush()?;
            let line = self.read_line()?;
            match line.trim().parse() {
                Ok(value) => return Ok(value),
                Err(_) => writeln!(self.output, "ERROR - Please enter a whole number.")?,
            }
        }
    }

    fn read_line(&mut self) -> Result<String, SessionError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(SessionError::InputClosed);
        }
        Ok(line)
    }
}
