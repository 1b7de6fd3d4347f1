//! Errors found throughout this crate

use thiserror::Error;

/// Exit status reported back over the command interface. The numbering
/// matches the wire protocol spoken by existing clients
pub(crate) mod status {
    pub(crate) const SUCCESS: i32 = 0;
    pub(crate) const UNKNOWN_ERROR: i32 = 1;
    pub(crate) const COMMAND_NOT_FOUND: i32 = 2;
    pub(crate) const INVALID_ARGUMENT: i32 = 3;
    pub(crate) const SETTING_NOT_FOUND: i32 = 4;
    pub(crate) const TAG_IN_USE: i32 = 5;
    pub(crate) const FORBIDDEN: i32 = 6;
}

/// Errors that occur while manipulating monitors, tags and rectangles
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub(crate) enum Error {
    /// A rectangle argument did not match `WxH+X+Y`
    #[error("invalid rectangle \"{0}\", expected WIDTHxHEIGHT+X+Y")]
    InvalidRectangle(String),

    /// A numeric argument could not be parsed
    #[error("invalid number \"{0}\"")]
    InvalidNumber(String),

    /// An argument was not understood by the command
    #[error("invalid argument \"{0}\"")]
    InvalidArgument(String),

    /// A monitor index was out of range
    #[error("monitor index {0} is out of range")]
    InvalidMonitorIndex(i32),

    /// No tag exists under the given name or index
    #[error("no such tag: {0}")]
    NoSuchTag(String),

    /// A rectangle was smaller than the minimum usable window size
    #[error("rectangle {0} is below the minimum monitor size")]
    RectangleTooSmall(String),

    /// A command was called with too few arguments
    #[error("{0}")]
    MissingArgument(&'static str),

    /// The tag is already shown on another monitor
    #[error("tag \"{0}\" is already being viewed on a monitor")]
    TagInUse(String),

    /// No unused tag was left to assign to a new monitor
    #[error("no free tag available")]
    NoFreeTag,

    /// Structural invariant would be violated
    #[error("can't remove the last monitor")]
    LastMonitor,

    /// The command is not known to the dispatcher
    #[error("unknown command \"{0}\"")]
    UnknownCommand(String),
}

impl Error {
    /// Map the error onto its command-interface exit status
    pub(crate) const fn status(&self) -> i32 {
        match self {
            Self::InvalidRectangle(_)
            | Self::InvalidNumber(_)
            | Self::InvalidArgument(_)
            | Self::InvalidMonitorIndex(_)
            | Self::NoSuchTag(_)
            | Self::RectangleTooSmall(_)
            | Self::MissingArgument(_) => status::INVALID_ARGUMENT,
            Self::TagInUse(_) | Self::NoFreeTag => status::TAG_IN_USE,
            Self::LastMonitor => status::FORBIDDEN,
            Self::UnknownCommand(_) => status::COMMAND_NOT_FOUND,
        }
    }
}
