// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod catalog;
pub mod clients;
pub mod menu;
pub mod quotes;
pub mod reports;

use anyhow::Result;
use thiserror::Error;

use crate::api::{ApiClient, ApiResult, Envelope};
use crate::forms::ValidationErrors;
use crate::interaction::{
    AssumeYes, Confirm, Level, Notifier, TerminalConfirm, TerminalNotifier,
};
use crate::views::{ListView, Searchable};

/// A failure that has already been shown to the user through the notifier.
/// `main` exits non-zero without printing it again.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct Reported(pub String);

pub struct Context {
    pub api: ApiClient,
    pub notifier: Box<dyn Notifier>,
    pub confirm: Box<dyn Confirm>,
}

impl Context {
    pub fn new(
        api: ApiClient,
        notifier: impl Notifier + 'static,
        confirm: impl Confirm + 'static,
    ) -> Self {
        Self {
            api,
            notifier: Box::new(notifier),
            confirm: Box::new(confirm),
        }
    }

    pub fn terminal(api: ApiClient) -> Self {
        Self::new(api, TerminalNotifier, TerminalConfirm)
    }
}

/// Alert texts for one mutation.
pub(crate) struct Alerts {
    pub done_title: &'static str,
    pub done_text: &'static str,
    /// Show the backend's message on success when it sends one.
    pub done_uses_message: bool,
    pub rejected_title: &'static str,
    pub rejected_text: &'static str,
    pub rejected_level: Level,
    pub failed_title: &'static str,
    pub failed_text: &'static str,
}

fn or_default<'a>(message: &'a str, fallback: &'a str) -> &'a str {
    if message.trim().is_empty() {
        fallback
    } else {
        message
    }
}

/// Surfaces a mutation outcome and yields `data` only on success.
pub(crate) fn settle<T>(ctx: &Context, result: ApiResult<Envelope<T>>, alerts: &Alerts) -> Result<T> {
    match result {
        Ok(Envelope::Success { message, data, .. }) => {
            let text = if alerts.done_uses_message {
                or_default(&message, alerts.done_text)
            } else {
                alerts.done_text
            };
            ctx.notifier.success(alerts.done_title, text);
            Ok(data)
        }
        Ok(Envelope::Failure { message, .. }) => {
            let text = or_default(&message, alerts.rejected_text);
            ctx.notifier
                .notify(alerts.rejected_level, alerts.rejected_title, text);
            Err(Reported(text.to_string()).into())
        }
        Err(err) => {
            ctx.notifier.error(alerts.failed_title, alerts.failed_text);
            Err(Reported(err.to_string()).into())
        }
    }
}

/// Runs one load cycle on a list view and alerts on failure.
pub(crate) fn load_list<T: Searchable>(
    ctx: &Context,
    view: &mut ListView<T>,
    fetch: impl FnOnce() -> ApiResult<Envelope<Vec<T>>>,
) -> Result<()> {
    view.begin_load();
    view.apply(fetch());
    if let Some(msg) = view.error() {
        ctx.notifier.error("Error", msg);
        return Err(Reported(msg.to_string()).into());
    }
    Ok(())
}

/// Reference list for a form selector.
pub(crate) fn load_catalog<T>(
    ctx: &Context,
    result: ApiResult<Envelope<Vec<T>>>,
    what: &str,
) -> Result<Vec<T>> {
    match result.and_then(Envelope::into_result) {
        Ok(items) => Ok(items),
        Err(err) => {
            let text = format!("Could not load {}", what);
            ctx.notifier.error("Error", &text);
            Err(Reported(format!("{}: {}", text, err)).into())
        }
    }
}

/// Aborts the submit and lists the invalid fields.
pub(crate) fn validated<T>(ctx: &Context, result: Result<T, ValidationErrors>) -> Result<T> {
    result.map_err(|errs| {
        let text = errs.to_string();
        ctx.notifier.warning("Incomplete form", &text);
        Reported(text).into()
    })
}

pub(crate) fn confirmed(ctx: &Context, sub: &clap::ArgMatches, title: &str, text: &str) -> bool {
    if sub.get_flag("yes") {
        AssumeYes.confirm(title, text)
    } else {
        ctx.confirm.confirm(title, text)
    }
}

pub(crate) fn not_found(ctx: &Context, what: &str, id: i64) -> anyhow::Error {
    let text = format!("{} {} not found", what, id);
    ctx.notifier.error("Not found", &text);
    Reported(text).into()
}

pub(crate) fn now() -> chrono::NaiveDateTime {
    chrono::Local::now().naive_local()
}

pub(crate) fn text_arg(sub: &clap::ArgMatches, name: &str) -> Option<String> {
    sub.get_one::<String>(name).map(|s| s.to_string())
}
