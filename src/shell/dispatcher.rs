/// Routes parsed shell commands into storage calls
///
/// Malformed lines are answered locally and never touch storage. Storage
/// errors pass through unchanged so the caller decides whether to go on.

use crate::shell::command::{Command, CommandError};
use crate::store::{GradebookStore, Project, StoreError, Student};
use std::fmt;

/// Dispatcher lifecycle; `quit` is the only way out of `Running`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchState {
    Running,
    Terminated,
}

/// Result of one dispatched line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Student(Student),
    StudentCreated(Student),
    Project(Project),
    ProjectCreated(Project),
    Grade {
        github: String,
        title: String,
        grade: i64,
    },
    GradeAssigned {
        github: String,
        title: String,
        grade: i64,
    },
    /// The line was not a usable command; nothing was executed
    Invalid(CommandError),
    Quit,
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Student(student) => write!(
                f,
                "Student: {} {}\nGitHub account: {}",
                student.first_name, student.last_name, student.github
            ),
            Reply::StudentCreated(student) => write!(
                f,
                "Successfully added student: {} {}",
                student.first_name, student.last_name
            ),
            Reply::Project(project) => write!(
                f,
                "Title: {}, Description: {}, Max Grade: {}",
                project.title, project.description, project.max_grade
            ),
            Reply::ProjectCreated(project) => write!(
                f,
                "Confirmed, added project {}, with maximum grade of {}, described as {}.",
                project.title, project.max_grade, project.description
            ),
            Reply::Grade { grade, .. } => write!(f, "Grade: {}", grade),
            Reply::GradeAssigned { github, title, grade } => write!(
                f,
                "Confirmed, assigned grade: {} for {} on project {}.",
                grade, github, title
            ),
            Reply::Invalid(err) => write!(f, "Invalid entry ({}). Try again.", err),
            Reply::Quit => f.write_str("Goodbye."),
        }
    }
}

/// Shell command dispatcher bound to one store handle
#[derive(Debug)]
pub struct Dispatcher {
    store: GradebookStore,
    state: DispatchState,
}

impl Dispatcher {
    pub fn new(store: GradebookStore) -> Self {
        Self {
            store,
            state: DispatchState::Running,
        }
    }

    pub fn state(&self) -> DispatchState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == DispatchState::Running
    }

    /// Parse and execute one input line
    pub async fn dispatch(&mut self, line: &str) -> Result<Reply, StoreError> {
        match Command::parse(line) {
            Ok(command) => self.execute(command).await,
            Err(err) => {
                tracing::debug!("Rejected shell input {:?}: {}", line.trim_end(), err);
                Ok(Reply::Invalid(err))
            }
        }
    }

    /// Execute an already-validated command
    pub async fn execute(&mut self, command: Command) -> Result<Reply, StoreError> {
        tracing::debug!("Dispatching {}", command.name());

        let reply = match command {
            Command::Student { github } => {
                Reply::Student(self.store.get_student_by_github(&github).await?)
            }
            Command::NewStudent {
                first_name,
                last_name,
                github,
            } => Reply::StudentCreated(
                self.store
                    .create_student(&first_name, &last_name, &github)
                    .await?,
            ),
            Command::GetProject { title } => {
                Reply::Project(self.store.get_project_by_title(&title).await?)
            }
            Command::GetGrade { github, title } => {
                let grade = self.store.get_grade(&github, &title).await?;
                Reply::Grade { github, title, grade }
            }
            Command::AssignGrade { github, title, grade } => {
                self.store.assign_grade(&github, &title, grade).await?;
                Reply::GradeAssigned { github, title, grade }
            }
            Command::NewProject {
                title,
                description,
                max_grade,
            } => Reply::ProjectCreated(
                self.store
                    .create_project(&title, &description, max_grade)
                    .await?,
            ),
            Command::Quit => {
                self.state = DispatchState::Terminated;
                Reply::Quit
            }
        };

        Ok(reply)
    }
}
