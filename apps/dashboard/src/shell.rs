//! Line-driven dashboard session.

use std::io::{self, Write};

use anyhow::{Context, Result};
use dashboard_core::{CreationForm, Dashboard, RowEditor};
use shared::domain::CatId;

use crate::render::print_dashboard;

const HELP: &str = "\
commands:
  list                      reload and show all cats
  set <field> <value>       fill the new-cat form (name, years, breed, salary)
  form                      show the new-cat form
  submit                    create a cat from the form
  edit <id>                 start editing a salary
  draft <id> <value>        change the salary draft
  save <id>                 save the draft
  cancel <id>               discard the draft
  delete <id>               delete a cat
  help | quit";

#[derive(Debug, PartialEq, Eq)]
enum ShellCommand {
    List,
    Set(FormField, String),
    ShowForm,
    Submit,
    Edit(CatId),
    Draft(CatId, String),
    Save(CatId),
    Cancel(CatId),
    Delete(CatId),
    Help,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormField {
    Name,
    Years,
    Breed,
    Salary,
}

fn parse_line(line: &str) -> Result<Option<ShellCommand>, String> {
    let line = line.trim();
    let Some((word, rest)) = split_word(line) else {
        return Ok(None);
    };

    let command = match word {
        "list" | "reload" => ShellCommand::List,
        "form" => ShellCommand::ShowForm,
        "submit" => ShellCommand::Submit,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" => ShellCommand::Quit,
        "set" => {
            let (field, value) = split_word(rest).ok_or("usage: set <field> <value>")?;
            let field = match field {
                "name" => FormField::Name,
                "years" | "years_of_experience" => FormField::Years,
                "breed" => FormField::Breed,
                "salary" => FormField::Salary,
                other => return Err(format!("unknown form field '{other}'")),
            };
            ShellCommand::Set(field, value.to_string())
        }
        "edit" => ShellCommand::Edit(parse_id(rest)?),
        "save" => ShellCommand::Save(parse_id(rest)?),
        "cancel" => ShellCommand::Cancel(parse_id(rest)?),
        "delete" => ShellCommand::Delete(parse_id(rest)?),
        "draft" => {
            let (id, value) = split_word(rest).ok_or("usage: draft <id> <value>")?;
            ShellCommand::Draft(parse_id(id)?, value.to_string())
        }
        other => return Err(format!("unknown command '{other}' (try 'help')")),
    };
    Ok(Some(command))
}

fn split_word(text: &str) -> Option<(&str, &str)> {
    let text = text.trim_start();
    if text.is_empty() {
        return None;
    }
    match text.split_once(char::is_whitespace) {
        Some((word, rest)) => Some((word, rest.trim_start())),
        None => Some((text, "")),
    }
}

fn parse_id(text: &str) -> Result<CatId, String> {
    text.trim()
        .parse::<i64>()
        .map(CatId)
        .map_err(|_| format!("'{}' is not a cat id", text.trim()))
}

pub async fn run(dashboard: &Dashboard, editor: &RowEditor) -> Result<()> {
    let mut form = CreationForm::new();
    print_dashboard(dashboard, editor).await;

    loop {
        print!("cats> ");
        io::stdout().flush().context("failed to flush stdout")?;

        let mut line = String::new();
        if io::stdin()
            .read_line(&mut line)
            .context("failed to read command")?
            == 0
        {
            return Ok(());
        }

        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                println!("{message}");
                continue;
            }
        };

        match command {
            ShellCommand::Quit => return Ok(()),
            ShellCommand::Help => {
                println!("{HELP}");
                continue;
            }
            ShellCommand::ShowForm => {
                print_form(&form);
                continue;
            }
            ShellCommand::Set(field, value) => {
                match field {
                    FormField::Name => form.set_name(&value),
                    FormField::Years => form.set_years_of_experience(value),
                    FormField::Breed => form.set_breed(value),
                    FormField::Salary => form.set_salary(value),
                }
                continue;
            }
            ShellCommand::List => {
                dashboard.reload().await;
            }
            ShellCommand::Submit => {
                form.submit(dashboard).await;
            }
            ShellCommand::Edit(id) => match dashboard.record(id).await {
                Some(cat) => {
                    editor.begin_edit(&cat).await;
                }
                None => {
                    println!("no cat with id {id}");
                    continue;
                }
            },
            ShellCommand::Draft(id, value) => {
                if !editor.set_draft(id, value).await {
                    println!("cat {id} is not being edited");
                    continue;
                }
            }
            ShellCommand::Save(id) => {
                if editor.save(id, dashboard).await.is_none() {
                    println!("cat {id} is not being edited");
                    continue;
                }
            }
            ShellCommand::Cancel(id) => {
                editor.cancel(id).await;
            }
            ShellCommand::Delete(id) => {
                dashboard.delete(id).await;
            }
        }

        editor.forget_missing(&dashboard.records().await).await;
        print_dashboard(dashboard, editor).await;
    }
}

fn print_form(form: &CreationForm) {
    println!("name:  {}", form.name());
    println!("years: {}", form.years_of_experience());
    println!("breed: {}", form.breed());
    println!("salary: {}", form.salary());
}
