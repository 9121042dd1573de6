use thiserror::Error;

/// How serious a parse failure is.
///
/// Fatal errors mean the datapath cannot start safely. A soft error is handed
/// back to the caller, which decides whether to abort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Fatal,
    Soft,
}

/// A rejected option value, carrying the text that was supplied.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    #[error("Invalid portmask specified '{0}'")]
    Portmask(String),

    #[error("Invalid log level specified '{0}'")]
    LogLevel(String),

    #[error("Invalid frame size specified '{0}'")]
    FrameSize(String),
}

#[derive(Error, Debug)]
pub enum ArgsError {
    #[error(transparent)]
    Value(#[from] ValueError),

    #[error("Invalid option '{0}'")]
    UnknownOption(String),

    #[error("Option '{0}' requires an argument")]
    MissingArgument(String),

    #[error("Application configuration has already been installed")]
    AlreadyInstalled,
}

impl ArgsError {
    pub fn severity(&self) -> Severity {
        match self {
            ArgsError::Value(ValueError::FrameSize(_)) => Severity::Soft,
            _ => Severity::Fatal,
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}
