//! Menu loop over generic reader/writer handles.

use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{BufRead, Write};
use student_core::{
    NewStudent, RepoError, StudentId, StudentRepository, StudentService,
    StudentServiceError,
};

const MENU_TEXT: &str = "\n1. Add Student\n2. View All Students\n3. Update Student\n4. Delete Student\n5. Sort Students\n6. Exit";

/// Fatal console session error.
#[derive(Debug)]
pub enum MenuError {
    /// Terminal read/write failed.
    Io(std::io::Error),
    /// Store unreachable or corrupt.
    Store(RepoError),
}

impl Display for MenuError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "console I/O failed: {err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for MenuError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for MenuError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

enum Flow {
    Continue,
    Exit,
}

/// Runs the menu until `Exit` or end of input.
pub fn run_menu<R, I, O>(
    service: &StudentService<R>,
    input: &mut I,
    output: &mut O,
) -> Result<(), MenuError>
where
    R: StudentRepository,
    I: BufRead,
    O: Write,
{
    let mut session = Session {
        service,
        input,
        output,
    };
    loop {
        writeln!(session.output, "{MENU_TEXT}")?;
        let Some(choice) = session.prompt("Enter choice: ")? else {
            writeln!(session.output, "Exiting.")?;
            return Ok(());
        };

        let flow = match choice.trim() {
            "1" => session.add_student()?,
            "2" => session.view_students()?,
            "3" => session.update_student()?,
            "4" => session.delete_student()?,
            "5" => session.sort_students()?,
            "6" => {
                writeln!(session.output, "Exiting.")?;
                Flow::Exit
            }
            _ => {
                writeln!(session.output, "Invalid choice!")?;
                Flow::Continue
            }
        };

        if let Flow::Exit = flow {
            info!("event=menu_exit module=cli status=ok");
            return Ok(());
        }
    }
}

struct Session<'a, R: StudentRepository, I, O> {
    service: &'a StudentService<R>,
    input: &'a mut I,
    output: &'a mut O,
}

impl<R, I, O> Session<'_, R, I, O>
where
    R: StudentRepository,
    I: BufRead,
    O: Write,
{
    /// Returns `None` at end of input.
    fn prompt(&mut self, label: &str) -> Result<Option<String>, MenuError> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Prompts and parses; unparseable input is reported and yields `None`.
    fn prompt_typed<T>(
        &mut self,
        label: &str,
        parse: impl FnOnce(&str) -> Option<T>,
    ) -> Result<Option<T>, MenuError> {
        let Some(raw) = self.prompt(label)? else {
            return Ok(None);
        };
        match parse(&raw) {
            Some(value) => Ok(Some(value)),
            None => {
                warn!("event=menu_input module=cli status=rejected prompt={}", label.trim());
                writeln!(self.output, "Invalid number: `{}`", raw.trim())?;
                Ok(None)
            }
        }
    }

    fn add_student(&mut self) -> Result<Flow, MenuError> {
        let Some(name) = self.prompt("Name: ")? else {
            return Ok(Flow::Continue);
        };
        let Some(age) = self.prompt_typed("Age: ", |raw| raw.trim().parse::<i64>().ok())? else {
            return Ok(Flow::Continue);
        };
        let Some(marks) =
            self.prompt_typed("Marks: ", |raw| raw.trim().parse::<f64>().ok())?
        else {
            return Ok(Flow::Continue);
        };

        match self.service.create_student(NewStudent::new(name, age, marks)) {
            Ok(_) => writeln!(self.output, "Student added successfully!")?,
            Err(err) => self.report(err)?,
        }
        Ok(Flow::Continue)
    }

    fn view_students(&mut self) -> Result<Flow, MenuError> {
        match self.service.list_students() {
            Ok(students) => {
                for student in students {
                    writeln!(self.output, "{student}")?;
                }
            }
            Err(err) => self.report(err)?,
        }
        Ok(Flow::Continue)
    }

    fn update_student(&mut self) -> Result<Flow, MenuError> {
        let Some(id) = self.prompt_typed("Student ID: ", |raw| raw.parse::<StudentId>().ok())?
        else {
            return Ok(Flow::Continue);
        };
        let Some(field_name) = self.prompt("Field to update (name/age/marks): ")? else {
            return Ok(Flow::Continue);
        };
        let Some(raw_value) = self.prompt("New Value: ")? else {
            return Ok(Flow::Continue);
        };

        match self
            .service
            .update_student_field(id, &field_name, &raw_value)
        {
            Ok(Some(_)) => writeln!(self.output, "Student updated.")?,
            Ok(None) => writeln!(self.output, "Student not found!")?,
            Err(err) => self.report(err)?,
        }
        Ok(Flow::Continue)
    }

    fn delete_student(&mut self) -> Result<Flow, MenuError> {
        let Some(id) = self.prompt_typed("Student ID to delete: ", |raw| {
            raw.parse::<StudentId>().ok()
        })?
        else {
            return Ok(Flow::Continue);
        };

        match self.service.delete_student(id) {
            Ok(_) => writeln!(self.output, "Student deleted if existed.")?,
            Err(err) => self.report(err)?,
        }
        Ok(Flow::Continue)
    }

    fn sort_students(&mut self) -> Result<Flow, MenuError> {
        let Some(field) = self.prompt("Sort by (name/age/marks): ")? else {
            return Ok(Flow::Continue);
        };

        match self.service.sorted_view(&field) {
            Ok(students) => {
                for student in students {
                    writeln!(self.output, "{student}")?;
                }
            }
            Err(err) => self.report(err)?,
        }
        Ok(Flow::Continue)
    }

    /// Prints recoverable errors; store errors end the session.
    fn report(&mut self, err: StudentServiceError) -> Result<(), MenuError> {
        match err {
            StudentServiceError::InvalidField(err) => {
                writeln!(self.output, "{err}")?;
                Ok(())
            }
            StudentServiceError::InvalidValue(err) => {
                writeln!(self.output, "{err}")?;
                Ok(())
            }
            StudentServiceError::Repo(RepoError::Validation(err)) => {
                writeln!(self.output, "{err}")?;
                Ok(())
            }
            StudentServiceError::Repo(err @ RepoError::IdsExhausted(_)) => {
                writeln!(self.output, "{err}")?;
                Ok(())
            }
            StudentServiceError::Repo(err) => Err(MenuError::Store(err)),
        }
    }
}
