// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use super::{Alerts, Context, confirmed, load_catalog, load_list, not_found, settle, text_arg, validated};
use crate::forms::{QuoteForm, check_option};
use crate::interaction::Level;
use crate::models::{Quote, QuoteInsert};
use crate::utils::{fmt_amount, maybe_print_json, pretty_table};
use crate::views::{ListView, Scope};

const CREATED: Alerts = Alerts {
    done_title: "Quote created!",
    done_text: "The quote was created successfully",
    done_uses_message: false,
    rejected_title: "Error",
    rejected_text: "Could not create the quote",
    rejected_level: Level::Error,
    failed_title: "Error creating the quote",
    failed_text: "An error occurred while saving the quote. Try again.",
};

const UPDATED: Alerts = Alerts {
    done_title: "Quote updated!",
    done_text: "The quote was updated successfully",
    done_uses_message: false,
    rejected_title: "Error",
    rejected_text: "Could not update the quote",
    rejected_level: Level::Error,
    failed_title: "Error updating the quote",
    failed_text: "An error occurred while saving the quote. Try again.",
};

const DELETED: Alerts = Alerts {
    done_title: "Deleted!",
    done_text: "The quote has been deleted.",
    done_uses_message: false,
    rejected_title: "Error",
    rejected_text: "Could not delete the quote",
    rejected_level: Level::Error,
    failed_title: "Error",
    failed_text: "An error occurred while deleting the quote",
};

pub fn handle(ctx: &Context, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(ctx, sub),
        Some(("add", sub)) => add(ctx, sub),
        Some(("edit", sub)) => edit(ctx, sub),
        Some(("rm", sub)) => remove(ctx, sub),
        _ => Ok(()),
    }
}

pub fn load(ctx: &Context, scope: &Scope) -> Result<ListView<Quote>> {
    let mut view = ListView::new(scope, "quotes");
    load_list(ctx, &mut view, || ctx.api.quotes().list())?;
    Ok(view)
}

pub(crate) fn quote_rows(quotes: &[&Quote]) -> Vec<Vec<String>> {
    quotes
        .iter()
        .map(|q| {
            vec![
                q.number.clone(),
                q.date.format("%Y-%m-%d").to_string(),
                q.client_name.clone(),
                q.insurance_type.clone(),
                q.asset_description.clone(),
                q.currency_code.clone(),
                fmt_amount(&q.sum_insured),
                format!("{}%", q.rate_percent.normalize()),
                fmt_amount(&q.net_premium),
                if q.email_sent { "yes" } else { "no" }.to_string(),
            ]
        })
        .collect()
}

pub(crate) const QUOTE_HEADERS: [&str; 10] = [
    "Number",
    "Date",
    "Client",
    "Insurance",
    "Asset",
    "Currency",
    "Sum insured",
    "Rate",
    "Net premium",
    "E-mailed",
];

fn list(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let scope = Scope::new();
    let mut view = load(ctx, &scope)?;
    if let Some(term) = sub.get_one::<String>("search") {
        view.set_search(term.as_str());
    }
    let shown = view.filtered();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &shown)? {
        println!("{}", pretty_table(&QUOTE_HEADERS, quote_rows(&shown)));
        println!("{} of {} quotes", shown.len(), view.records().len());
    }
    Ok(())
}

pub fn form_from_args(sub: &clap::ArgMatches) -> QuoteForm {
    QuoteForm {
        client_id: sub.get_one::<i64>("client").copied(),
        insurance_type_id: sub.get_one::<i64>("insurance-type").copied(),
        currency_id: sub.get_one::<i64>("currency").copied(),
        asset_description: text_arg(sub, "description").unwrap_or_default(),
        sum_insured: text_arg(sub, "sum-insured").unwrap_or_default(),
    }
}

/// Checks the selected ids against the form's three reference lists.
fn check_selections(ctx: &Context, fields: &QuoteInsert) -> Result<()> {
    let scope = Scope::new();
    let clients = super::clients::load(ctx, &scope)?;
    validated(
        ctx,
        check_option("client", fields.client_id, clients.records().iter().map(|c| c.id)),
    )?;
    let types = load_catalog(ctx, ctx.api.catalog().insurance_types(), "insurance types")?;
    validated(
        ctx,
        check_option(
            "insurance_type",
            fields.insurance_type_id,
            types.iter().map(|t| t.id),
        ),
    )?;
    let currencies = load_catalog(ctx, ctx.api.catalog().currencies(), "currencies")?;
    validated(
        ctx,
        check_option("currency", fields.currency_id, currencies.iter().map(|c| c.id)),
    )?;
    Ok(())
}

fn add(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let fields = validated(ctx, form_from_args(sub).validate())?;
    check_selections(ctx, &fields)?;
    if let Some(q) = settle(ctx, ctx.api.quotes().insert(&fields), &CREATED)? {
        println!("Quote {} saved", q.number);
    }
    Ok(())
}

fn edit(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let scope = Scope::new();
    let view = load(ctx, &scope)?;
    let Some(current) = view.records().iter().find(|q| q.id == id) else {
        return Err(not_found(ctx, "Quote", id));
    };

    let mut form = QuoteForm::from_quote(current);
    let given = form_from_args(sub);
    form.client_id = given.client_id.or(form.client_id);
    form.insurance_type_id = given.insurance_type_id.or(form.insurance_type_id);
    form.currency_id = given.currency_id.or(form.currency_id);
    if let Some(d) = text_arg(sub, "description") {
        form.asset_description = d;
    }
    if let Some(s) = text_arg(sub, "sum-insured") {
        form.sum_insured = s;
    }

    let quote = validated(ctx, form.validate_update(current))?;
    let changed = quote.client_id != current.client_id
        || quote.insurance_type_id != current.insurance_type_id
        || quote.currency_id != current.currency_id;
    if changed {
        check_selections(ctx, &validated(ctx, form.validate())?)?;
    }
    settle(ctx, ctx.api.quotes().update(&quote), &UPDATED)?;
    Ok(())
}

fn remove(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    if !confirmed(ctx, sub, "Are you sure?", "This action cannot be undone") {
        println!("Cancelled");
        return Ok(());
    }
    settle(ctx, ctx.api.quotes().delete(id), &DELETED)?;

    let scope = Scope::new();
    let view = load(ctx, &scope)?;
    println!("{} quotes remaining", view.records().len());
    Ok(())
}
