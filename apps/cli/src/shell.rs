//! Interactive terminal menu.
//!
//! Thin I/O glue around the storage port: every action reads its fields from
//! stdin, issues one store call, prints the outcome, and returns to the
//! menu. Storage failures are printed, never fatal; bad numeric input aborts
//! the current action only.

use std::io::{self, Write};
use std::sync::Arc;

use entities::{Label, Task, User};
use task_store::{TaskFilter, TaskStore};
use tracing::debug;

/// Menu-driven shell over an injected storage backend.
pub struct Shell {
    store: Arc<dyn TaskStore>,
}

impl Shell {
    /// Creates a shell speaking to `store`.
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self { store }
    }

    /// Runs the menu loop until the user quits or stdin closes.
    pub async fn run(&self) -> io::Result<()> {
        println!("-------------------------------");
        println!("Welcome to taskman!");
        println!("-------------------------------");

        loop {
            print_menu();
            let Some(choice) = prompt("\nPick an action: ")? else {
                return Ok(());
            };
            debug!(%choice, "menu selection");

            let handled = match choice.as_str() {
                "1" => {
                    self.print_tasks().await;
                    true
                }
                "2" => {
                    self.create_task().await?;
                    true
                }
                "3" => {
                    self.update_task().await?;
                    true
                }
                "4" => {
                    self.delete_task().await?;
                    true
                }
                "5" => {
                    self.print_labels().await;
                    true
                }
                "6" => {
                    self.create_label().await?;
                    true
                }
                "7" => {
                    self.print_users().await;
                    true
                }
                "8" => {
                    self.create_user().await?;
                    true
                }
                "9" => {
                    self.find_tasks_by_author().await?;
                    true
                }
                "10" => {
                    println!("Bye.");
                    return Ok(());
                }
                _ => {
                    println!("Unrecognized choice, try again.");
                    false
                }
            };

            if handled {
                wait_for_enter()?;
            }
        }
    }

    async fn print_tasks(&self) {
        match self.store.list_tasks(&TaskFilter::new()).await {
            Ok(tasks) if tasks.is_empty() => println!("No tasks yet."),
            Ok(tasks) => {
                println!("\nTasks:");
                for task in &tasks {
                    print_task(task);
                }
                println!("-------------------------------");
            }
            Err(err) => println!("Could not list tasks: {err}"),
        }
    }

    async fn create_task(&self) -> io::Result<()> {
        let Some(title) = prompt("Title: ")? else {
            return Ok(());
        };
        let Some(content) = prompt("Description: ")? else {
            return Ok(());
        };
        let Some(author_id) = prompt_id("Author id: ")? else {
            return Ok(());
        };
        let Some(assigned_id) = prompt_id("Assignee id: ")? else {
            return Ok(());
        };
        let Some(labels_text) = prompt("Label ids, comma separated (empty for none): ")? else {
            return Ok(());
        };

        let label_ids = match parse_id_list(&labels_text) {
            Ok(ids) => ids,
            Err(bad) => {
                println!("{bad:?} is not a label id.");
                return Ok(());
            }
        };

        let task = Task::new(title, content, author_id, assigned_id);
        match self.store.create_task(&task, &label_ids).await {
            Ok(id) => println!("Task created with id {id}."),
            Err(err) => println!("Could not create task: {err}"),
        }
        Ok(())
    }

    async fn update_task(&self) -> io::Result<()> {
        let Some(id) = prompt_id("Task id to update: ")? else {
            return Ok(());
        };
        let Some(title) = prompt("New title: ")? else {
            return Ok(());
        };
        let Some(content) = prompt("New description: ")? else {
            return Ok(());
        };
        let Some(author_id) = prompt_id("Author id: ")? else {
            return Ok(());
        };
        let Some(assigned_id) = prompt_id("Assignee id: ")? else {
            return Ok(());
        };

        let mut task = Task::new(title, content, author_id, assigned_id);
        task.id = id;

        match self.store.update_task(&task).await {
            Ok(()) => println!("Task updated."),
            Err(err) => println!("Could not update task: {err}"),
        }
        Ok(())
    }

    async fn delete_task(&self) -> io::Result<()> {
        let Some(id) = prompt_id("Task id to delete: ")? else {
            return Ok(());
        };

        match self.store.delete_task(id).await {
            Ok(()) => println!("Task deleted."),
            Err(err) => println!("Could not delete task: {err}"),
        }
        Ok(())
    }

    async fn print_labels(&self) {
        match self.store.list_labels().await {
            Ok(labels) if labels.is_empty() => println!("No labels yet."),
            Ok(labels) => {
                println!("\nLabels:");
                for label in &labels {
                    println!("id: {} | name: {}", label.id, label.name);
                }
            }
            Err(err) => println!("Could not list labels: {err}"),
        }
    }

    async fn create_label(&self) -> io::Result<()> {
        let Some(name) = prompt("Label name: ")? else {
            return Ok(());
        };

        match self.store.create_label(&Label::new(name)).await {
            Ok(id) => println!("Label created with id {id}."),
            Err(err) => println!("Could not create label: {err}"),
        }
        Ok(())
    }

    async fn print_users(&self) {
        match self.store.list_users().await {
            Ok(users) if users.is_empty() => println!("No users yet."),
            Ok(users) => {
                println!("\nUsers:");
                for user in &users {
                    println!("id: {} | name: {}", user.id, user.name);
                }
            }
            Err(err) => println!("Could not list users: {err}"),
        }
    }

    async fn create_user(&self) -> io::Result<()> {
        let Some(name) = prompt("User name: ")? else {
            return Ok(());
        };

        match self.store.create_user(&User::new(name)).await {
            Ok(id) => println!("User created with id {id}."),
            Err(err) => println!("Could not create user: {err}"),
        }
        Ok(())
    }

    async fn find_tasks_by_author(&self) -> io::Result<()> {
        let Some(author_id) = prompt_id("Author id: ")? else {
            return Ok(());
        };

        match self.store.tasks_by_author(author_id).await {
            Ok(tasks) if tasks.is_empty() => println!("No tasks by user {author_id}."),
            Ok(tasks) => {
                println!("\nTasks by user {author_id}:");
                for task in &tasks {
                    print_task(task);
                }
                println!("-------------------------------");
            }
            Err(err) => println!("Could not search tasks: {err}"),
        }
        Ok(())
    }
}

fn print_menu() {
    println!("\n============ TASKS ============");
    println!("1. List tasks");
    println!("2. Create a task");
    println!("3. Update a task");
    println!("4. Delete a task");
    println!("\n============ LABELS ===========");
    println!("5. List labels");
    println!("6. Create a label");
    println!("\n============ USERS ============");
    println!("7. List users");
    println!("8. Create a user");
    println!("\n============ SEARCH ===========");
    println!("9. Find tasks by author");
    println!("10. Quit");
}

fn print_task(task: &Task) {
    println!("-------------------------------");
    println!("id:       {}", task.id);
    println!("title:    {}", task.title);
    println!("content:  {}", task.content);
    println!("author:   {}", task.author_id);
    println!("assignee: {}", task.assigned_id);
}

/// Prints `label`, reads one trimmed line. `None` means stdin closed.
fn prompt(label: &str) -> io::Result<Option<String>> {
    print!("{label}");
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Like [`prompt`] but expects an integer. `None` aborts the current action:
/// either stdin closed or the input did not parse (already reported).
fn prompt_id(label: &str) -> io::Result<Option<i64>> {
    let Some(text) = prompt(label)? else {
        return Ok(None);
    };
    match text.parse() {
        Ok(id) => Ok(Some(id)),
        Err(_) => {
            println!("{text:?} is not a number.");
            Ok(None)
        }
    }
}

fn wait_for_enter() -> io::Result<()> {
    prompt("\nPress Enter to return to the menu")?;
    Ok(())
}

/// Parses a comma-separated id list; empty input means no labels. Returns
/// the offending fragment on failure.
fn parse_id_list(text: &str) -> Result<Vec<i64>, String> {
    if text.is_empty() {
        return Ok(Vec::new());
    }
    text.split(',')
        .map(|part| {
            let part = part.trim();
            part.parse().map_err(|_| part.to_string())
        })
        .collect()
}
