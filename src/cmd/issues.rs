//! One-shot issue commands: `list`, `add`, `close`, `delete`, `show`.

use anyhow::{Result, anyhow, bail};
use chrono::Utc;
use console::style;

use issuetracker::config::Config;
use issuetracker::controller::IssueList;
use issuetracker::graphql::HttpTransport;
use issuetracker::issue::IssueStatus;
use issuetracker::navigation::{Location, MemoryHistory};
use issuetracker::notification::Notification;
use issuetracker::views::add::IssueAddForm;
use issuetracker::views::detail::{IssueDetail, terminal_width};
use issuetracker::views::filter::IssueFilterForm;
use issuetracker::views::{icons, render_toast};

use super::spinner;
use crate::FilterArgs;

pub(crate) type CliIssueList = IssueList<HttpTransport, MemoryHistory>;

/// Build the filter form from flags, rejecting values the form would not accept.
pub(crate) fn filter_form(args: &FilterArgs) -> Result<IssueFilterForm> {
    let mut form = IssueFilterForm::default();
    if let Some(status) = &args.status {
        let status: IssueStatus = status.parse().map_err(|e: String| anyhow!(e))?;
        form.set_status(Some(status));
    }
    if let Some(min) = &args.effort_min {
        if !form.set_effort_min(min) {
            bail!("--effort-min must be a whole number, got '{}'", min);
        }
    }
    if let Some(max) = &args.effort_max {
        if !form.set_effort_max(max) {
            bail!("--effort-max must be a whole number, got '{}'", max);
        }
    }
    Ok(form)
}

pub(crate) fn open_list(config: &Config, location: Location) -> CliIssueList {
    let transport = HttpTransport::new(config.endpoint.clone());
    IssueList::new(transport, MemoryHistory::new(location))
        .with_notification(Notification::new(config.toast_delay))
}

/// Open a list for `args` and load it.
async fn load_filtered(
    config: &Config,
    args: &FilterArgs,
) -> Result<(IssueFilterForm, CliIssueList)> {
    let mut form = filter_form(args)?;
    let mut list = open_list(config, Location::issues());
    form.apply(list.navigator_mut());

    let bar = spinner("Loading issues...");
    list.mount().await;
    bar.finish_and_clear();
    Ok((form, list))
}

pub async fn cmd_list(config: &Config, args: &FilterArgs) -> Result<()> {
    let (form, mut list) = load_filtered(config, args).await?;
    println!("{}", form.render());
    println!();
    print!("{}", list.render());
    Ok(())
}

pub async fn cmd_add(
    config: &Config,
    title: &str,
    owner: Option<&str>,
    effort: Option<u32>,
    description: Option<&str>,
) -> Result<()> {
    let mut form = IssueAddForm {
        owner: owner.unwrap_or_default().to_string(),
        title: title.to_string(),
    };
    let mut input = form.submit(Utc::now())?;
    input.effort = effort;
    input.description = description.map(str::to_string);

    let mut list = open_list(config, Location::issues());
    let bar = spinner("Adding issue...");
    let created = list.create_issue(input).await;
    bar.finish_and_clear();

    match created {
        Some(id) => {
            println!("{}Added issue {}", icons::CHECK, style(id).bold());
            println!();
            print!("{}", list.render());
            Ok(())
        }
        None => {
            print!("{}", list.render());
            bail!("Could not add issue");
        }
    }
}

pub async fn cmd_close(config: &Config, position: usize, args: &FilterArgs) -> Result<()> {
    let (_, mut list) = load_filtered(config, args).await?;
    let bar = spinner("Closing issue...");
    let closed = list.close_issue(position).await;
    bar.finish_and_clear();

    print!("{}", list.render());
    if !closed {
        bail!("Could not close issue at position {}", position);
    }
    Ok(())
}

pub async fn cmd_delete(config: &Config, position: usize, args: &FilterArgs) -> Result<()> {
    let (_, mut list) = load_filtered(config, args).await?;
    let bar = spinner("Deleting issue...");
    let deleted = list.delete_issue(position).await;
    bar.finish_and_clear();

    print!("{}", list.render());
    if !deleted {
        bail!("Could not delete issue at position {}", position);
    }
    Ok(())
}

pub async fn cmd_show(config: &Config, id: i64) -> Result<()> {
    let transport = HttpTransport::new(config.endpoint.clone());
    let mut detail = IssueDetail::new();
    let mut messages = Vec::new();

    let bar = spinner("Loading issue...");
    detail.show(&transport, id, |m| messages.push(m)).await;
    bar.finish_and_clear();

    for message in &messages {
        println!("{}", render_toast(message));
    }
    if detail.issue().is_none() {
        bail!("Issue {} not found", id);
    }
    print!("{}", detail.render(terminal_width()));
    Ok(())
}
