use std::error;
use std::fmt;
use std::result;

/// The discrete operations a key press can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cmd {
    Noop,
    OpenPicker,
    ClickDay,
    ApplySpan,
    Clear,
    Cancel,
    NextDay,
    PrevDay,
    NextWeek,
    PrevWeek,
    NextMonth,
    PrevMonth,
    Exit,
}

pub type CmdResult = result::Result<Cmd, CmdError>;

/// A command sent in a state that cannot accept it, e.g. a picker command
/// while no session is open.
#[derive(Debug, Clone)]
pub struct CmdError {
    message: String,
}

impl CmdError {
    pub fn new(message: impl Into<String>) -> Self {
        CmdError {
            message: message.into(),
        }
    }
}

impl fmt::Display for CmdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl error::Error for CmdError {}
