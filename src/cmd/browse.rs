//! Interactive issue browser: `issuetracker browse`.

use anyhow::Result;
use chrono::Utc;
use console::{Term, style};
use dialoguer::{Input, Select, theme::ColorfulTheme};

use issuetracker::config::Config;
use issuetracker::issue::IssueStatus;
use issuetracker::navigation::{ISSUES_PATH, Location, Navigator, detail_id, detail_path};
use issuetracker::views::add::IssueAddForm;
use issuetracker::views::detail::{IssueDetail, terminal_width};
use issuetracker::views::filter::IssueFilterForm;

use super::issues::{CliIssueList, open_list};
use super::spinner;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Refresh,
    Filter,
    Add,
    Close,
    Delete,
    Describe,
    HideDescription,
    Quit,
}

impl Action {
    const ALL: [Action; 8] = [
        Action::Refresh,
        Action::Filter,
        Action::Add,
        Action::Close,
        Action::Delete,
        Action::Describe,
        Action::HideDescription,
        Action::Quit,
    ];

    fn label(self) -> &'static str {
        match self {
            Action::Refresh => "Refresh",
            Action::Filter => "Change filter",
            Action::Add => "Add issue",
            Action::Close => "Close issue",
            Action::Delete => "Delete issue",
            Action::Describe => "Show description",
            Action::HideDescription => "Hide description",
            Action::Quit => "Quit",
        }
    }
}

pub async fn cmd_browse(config: &Config) -> Result<()> {
    let theme = ColorfulTheme::default();
    let term = Term::stdout();
    let mut list = open_list(config, Location::issues());
    let mut filter = IssueFilterForm::from_location(&list.navigator().location());
    let mut add_form = IssueAddForm::default();
    let mut detail = IssueDetail::new();

    let bar = spinner("Loading issues...");
    list.mount().await;
    bar.finish_and_clear();

    loop {
        term.clear_screen()?;
        println!("{}", style("Issue Tracker").bold().underlined());
        println!("{}", filter.render());
        println!();
        print!("{}", list.render());
        if detail_id(&list.navigator().location().pathname).is_some() {
            println!();
            print!("{}", detail.render(terminal_width()));
        }
        println!();

        let labels: Vec<&str> = Action::ALL.iter().map(|a| a.label()).collect();
        let choice = Select::with_theme(&theme)
            .with_prompt("What next?")
            .items(&labels)
            .default(0)
            .interact()?;

        match Action::ALL[choice] {
            Action::Refresh => {
                list.dismiss_toast();
                list.load().await;
            }
            Action::Filter => {
                edit_filter(&theme, &mut filter, &mut list)?;
                if filter.is_changed() {
                    filter.apply(list.navigator_mut());
                }
                list.location_changed().await;
            }
            Action::Add => {
                add_form.title = Input::with_theme(&theme)
                    .with_prompt("Title")
                    .allow_empty(true)
                    .interact_text()?;
                add_form.owner = Input::with_theme(&theme)
                    .with_prompt("Owner")
                    .allow_empty(true)
                    .interact_text()?;
                match add_form.submit(Utc::now()) {
                    Ok(input) => {
                        if let Some(id) = list.create_issue(input).await {
                            list.show_message(format!("Added issue {}", id));
                        }
                    }
                    Err(e) => list.show_message(e.to_string()),
                }
            }
            Action::Close => {
                if let Some(index) = pick_issue(&theme, &mut list, "Close which issue?")? {
                    list.close_issue(index).await;
                }
            }
            Action::Delete => {
                if let Some(index) = pick_issue(&theme, &mut list, "Delete which issue?")? {
                    list.delete_issue(index).await;
                }
            }
            Action::Describe => {
                if let Some(index) = pick_issue(&theme, &mut list, "Describe which issue?")? {
                    let id = list.issues()[index].id;
                    let search = list.navigator().location().search;
                    list.navigator_mut().push(Location::new(detail_path(id), search));

                    let mut messages = Vec::new();
                    detail
                        .show(list.transport(), id, |m| messages.push(m))
                        .await;
                    for message in messages {
                        list.show_message(message);
                    }
                }
            }
            Action::HideDescription => {
                let search = list.navigator().location().search;
                list.navigator_mut().push(Location::new(ISSUES_PATH, search));
            }
            Action::Quit => break,
        }
    }

    Ok(())
}

fn edit_filter(
    theme: &ColorfulTheme,
    filter: &mut IssueFilterForm,
    list: &mut CliIssueList,
) -> Result<()> {
    let mut statuses = vec!["(All)"];
    statuses.extend(IssueStatus::ALL.iter().map(|s| s.as_str()));
    let current = IssueStatus::ALL
        .iter()
        .position(|s| s.as_str() == filter.status())
        .map_or(0, |i| i + 1);
    let choice = Select::with_theme(theme)
        .with_prompt("Status")
        .items(&statuses)
        .default(current)
        .interact()?;
    filter.set_status(choice.checked_sub(1).map(|i| IssueStatus::ALL[i]));

    let min: String = Input::with_theme(theme)
        .with_prompt("Effort from")
        .with_initial_text(filter.effort_min())
        .allow_empty(true)
        .interact_text()?;
    if !filter.set_effort_min(min.trim()) {
        list.show_message(format!("Ignored effort '{}': digits only", min));
    }

    let max: String = Input::with_theme(theme)
        .with_prompt("Effort to")
        .with_initial_text(filter.effort_max())
        .allow_empty(true)
        .interact_text()?;
    if !filter.set_effort_max(max.trim()) {
        list.show_message(format!("Ignored effort '{}': digits only", max));
    }
    Ok(())
}

/// Let the user choose a row. `None` when the list is empty.
fn pick_issue(
    theme: &ColorfulTheme,
    list: &mut CliIssueList,
    prompt: &str,
) -> Result<Option<usize>> {
    if list.issues().is_empty() {
        list.show_message("No issues to choose from");
        return Ok(None);
    }
    let items: Vec<String> = list
        .issues()
        .iter()
        .enumerate()
        .map(|(i, issue)| format!("{:>2}  #{}  {}", i, issue.id, issue.title))
        .collect();
    let index = Select::with_theme(theme)
        .with_prompt(prompt)
        .items(&items)
        .default(0)
        .interact()?;
    Ok(Some(index))
}
