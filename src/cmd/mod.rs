//! CLI command implementations.
//!
//! Each submodule owns one or more related `Commands` variants:
//!
//! | Module    | Commands handled                          |
//! |-----------|-------------------------------------------|
//! | `issues`  | `List`, `Add`, `Close`, `Delete`, `Show`  |
//! | `browse`  | `Browse`                                  |
//! | `demo`    | `Prototype`, `TryStore`                   |
//! | `config`  | `Config`                                  |

pub mod browse;
pub mod config;
pub mod demo;
pub mod issues;

pub use browse::cmd_browse;
pub use config::cmd_config;
pub use demo::{cmd_prototype, cmd_try_store};
pub use issues::{cmd_add, cmd_close, cmd_delete, cmd_list, cmd_show};

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Spinner shown on stderr while a command waits on I/O.
pub(crate) fn spinner(message: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner} {msg}")
            .expect("progress bar template is a valid static string"),
    );
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}
