/// Where a command's standard output goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputRedirection<'a> {
    /// The shell's own standard output
    Inherit,
    /// Truncate-or-create the named file
    ToFile(&'a str),
    /// `>` ended the line; the command is reported and skipped
    MissingTarget,
}

/// One executable unit. Arguments borrow from the input line, so a command
/// cannot outlive the line it was parsed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command<'a> {
    pub args: Vec<&'a str>,
    pub output: OutputRedirection<'a>,
}

impl<'a> Command<'a> {
    pub fn new(args: Vec<&'a str>, output: OutputRedirection<'a>) -> Self {
        Self { args, output }
    }

    /// Program or builtin name
    pub fn program(&self) -> Option<&'a str> {
        self.args.first().copied()
    }
}

/// Commands parsed from one input line, in execution order.
pub type CommandSequence<'a> = Vec<Command<'a>>;
