/// Command-line parsing for the gradebook shell
///
/// A line is `command,arg1,arg2,...` with commas as the only delimiter.
/// Parsing checks the argument count before binding any names, so a bad
/// line becomes a `CommandError` instead of a half-built command.

use thiserror::Error;

/// Field delimiter for shell input.
pub const DELIMITER: char = ',';

/// A fully validated shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Student {
        github: String,
    },
    NewStudent {
        first_name: String,
        last_name: String,
        github: String,
    },
    GetProject {
        title: String,
    },
    GetGrade {
        github: String,
        title: String,
    },
    AssignGrade {
        github: String,
        title: String,
        grade: i64,
    },
    NewProject {
        title: String,
        description: String,
        max_grade: i64,
    },
    Quit,
}

/// Why a line could not be turned into a `Command`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error("'{command}' takes {expected} argument(s), got {got}")]
    WrongArity {
        command: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("{argument} must be an integer, got '{value}'")]
    InvalidInteger {
        argument: &'static str,
        value: String,
    },
}

/// Command names with their argument lists, in help order.
pub const COMMANDS: &[(&str, &[&str])] = &[
    ("student", &["github"]),
    ("new_student", &["first", "last", "github"]),
    ("get_project", &["title"]),
    ("get_grade", &["github", "title"]),
    ("assign_grade", &["github", "title", "grade"]),
    ("new_project", &["title", "description", "max_grade"]),
    ("quit", &[]),
];

impl Command {
    /// Parse one input line.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            return Err(CommandError::Empty);
        }

        let mut tokens = line.split(DELIMITER).map(str::trim);
        let name = tokens.next().unwrap_or_default();
        let args: Vec<String> = tokens.map(str::to_string).collect();

        let Some(&(command, params)) = COMMANDS.iter().find(|(command, _)| *command == name)
        else {
            return Err(CommandError::UnknownCommand(name.to_string()));
        };

        if args.len() != params.len() {
            return Err(CommandError::WrongArity {
                command,
                expected: params.len(),
                got: args.len(),
            });
        }

        let mut args = args.into_iter();
        let mut next = || args.next().unwrap_or_default();

        let parsed = match command {
            "student" => Command::Student { github: next() },
            "new_student" => Command::NewStudent {
                first_name: next(),
                last_name: next(),
                github: next(),
            },
            "get_project" => Command::GetProject { title: next() },
            "get_grade" => Command::GetGrade {
                github: next(),
                title: next(),
            },
            "assign_grade" => Command::AssignGrade {
                github: next(),
                title: next(),
                grade: parse_integer("grade", &next())?,
            },
            "new_project" => Command::NewProject {
                title: next(),
                description: next(),
                max_grade: parse_integer("max_grade", &next())?,
            },
            "quit" => Command::Quit,
            _ => return Err(CommandError::UnknownCommand(name.to_string())),
        };

        Ok(parsed)
    }

    /// Shell name of this command.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Student { .. } => "student",
            Command::NewStudent { .. } => "new_student",
            Command::GetProject { .. } => "get_project",
            Command::GetGrade { .. } => "get_grade",
            Command::AssignGrade { .. } => "assign_grade",
            Command::NewProject { .. } => "new_project",
            Command::Quit => "quit",
        }
    }
}

fn parse_integer(argument: &'static str, value: &str) -> Result<i64, CommandError> {
    value.parse().map_err(|_| CommandError::InvalidInteger {
        argument,
        value: value.to_string(),
    })
}

/// One line per command, e.g. `assign_grade,github,title,grade`.
pub fn usage() -> String {
    COMMANDS
        .iter()
        .map(|(name, params)| {
            std::iter::once(*name)
                .chain(params.iter().copied())
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
