// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use super::{
    Alerts, Context, confirmed, load_catalog, load_list, not_found, now, settle, text_arg,
    validated,
};
use crate::forms::{ClientForm, check_option};
use crate::interaction::Level;
use crate::models::Client;
use crate::utils::{maybe_print_json, pretty_table};
use crate::views::{ListView, Scope};

const CREATED: Alerts = Alerts {
    done_title: "Client created!",
    done_text: "The client was created successfully",
    done_uses_message: false,
    rejected_title: "Error",
    rejected_text: "Could not create the client",
    rejected_level: Level::Error,
    failed_title: "Error creating the client",
    failed_text: "An error occurred while saving the client. Try again.",
};

const UPDATED: Alerts = Alerts {
    done_title: "Client updated!",
    done_text: "The client was updated successfully",
    done_uses_message: false,
    rejected_title: "Error",
    rejected_text: "Could not update the client",
    rejected_level: Level::Error,
    failed_title: "Error updating the client",
    failed_text: "An error occurred while saving the client. Try again.",
};

// A refused delete (e.g. client has quotes) is a warning, not an error.
const DELETED: Alerts = Alerts {
    done_title: "Deleted!",
    done_text: "The client was deleted successfully",
    done_uses_message: true,
    rejected_title: "Cannot delete",
    rejected_text: "Could not delete the client",
    rejected_level: Level::Warning,
    failed_title: "Error",
    failed_text: "An error occurred while deleting the client",
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

/// Fetches the client list into a fresh view bound to `scope`.
pub fn load(ctx: &Context, scope: &Scope) -> Result<ListView<Client>> {
    let mut view = ListView::new(scope, "clients");
    load_list(ctx, &mut view, || ctx.api.clients().list())?;
    Ok(view)
}

fn list(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let scope = Scope::new();
    let mut view = load(ctx, &scope)?;
    if let Some(term) = sub.get_one::<String>("search") {
        view.set_search(term.as_str());
    }
    let shown = view.filtered();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &shown)? {
        let rows = shown
            .iter()
            .map(|c| {
                vec![
                    c.id.to_string(),
                    c.name.clone(),
                    c.identity.clone(),
                    c.client_type.clone(),
                    c.phone.clone(),
                    c.email.clone(),
                    c.birth_date.format("%Y-%m-%d").to_string(),
                    if c.active { "yes" } else { "no" }.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Name", "National ID", "Type", "Phone", "E-mail", "Born", "Active"],
                rows,
            )
        );
        println!("{} of {} clients", shown.len(), view.records().len());
    }
    Ok(())
}

/// Builds the create form from flags.
pub fn form_from_args(sub: &clap::ArgMatches) -> ClientForm {
    ClientForm {
        client_type_id: sub.get_one::<i64>("type").copied(),
        name: text_arg(sub, "name").unwrap_or_default(),
        identity: text_arg(sub, "identity").unwrap_or_default(),
        birth_date: text_arg(sub, "birth-date").unwrap_or_default(),
        phone: text_arg(sub, "phone").unwrap_or_default(),
        email: text_arg(sub, "email").unwrap_or_default(),
        ..Default::default()
    }
}

fn add(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let client = validated(ctx, form_from_args(sub).validate(now()))?;
    let types = load_catalog(ctx, ctx.api.catalog().client_types(), "client types")?;
    validated(
        ctx,
        check_option("client_type", client.client_type_id, types.iter().map(|t| t.id)),
    )?;
    let created = settle(ctx, ctx.api.clients().insert(&client), &CREATED)?;
    if let Some(c) = created {
        println!("Client {} ({}) saved", c.id, c.name);
    }
    Ok(())
}

fn edit(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let scope = Scope::new();
    let view = load(ctx, &scope)?;
    let Some(current) = view.records().iter().find(|c| c.id == id) else {
        return Err(not_found(ctx, "Client", id));
    };

    let mut form = ClientForm::from_client(current);
    if let Some(t) = sub.get_one::<i64>("type") {
        form.client_type_id = Some(*t);
    }
    for (flag, field) in [
        ("name", &mut form.name),
        ("identity", &mut form.identity),
        ("birth-date", &mut form.birth_date),
        ("phone", &mut form.phone),
        ("email", &mut form.email),
    ] {
        if let Some(v) = text_arg(sub, flag) {
            *field = v;
        }
    }

    let mut client = validated(ctx, form.validate(now()))?;
    if client.client_type_id != current.client_type_id {
        let types = load_catalog(ctx, ctx.api.catalog().client_types(), "client types")?;
        validated(
            ctx,
            check_option("client_type", client.client_type_id, types.iter().map(|t| t.id)),
        )?;
        // keep the label in step with the new type
        if let Some(t) = types.into_iter().find(|t| t.id == client.client_type_id) {
            client.client_type = t.name;
        }
    }
    settle(ctx, ctx.api.clients().update(&client), &UPDATED)?;
    Ok(())
}

fn remove(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    if !confirmed(
        ctx,
        sub,
        "Are you sure?",
        "This will delete the selected client",
    ) {
        println!("Cancelled");
        return Ok(());
    }
    settle(ctx, ctx.api.clients().delete(id), &DELETED)?;

    // The list is re-fetched after every mutation.
    let scope = Scope::new();
    let view = load(ctx, &scope)?;
    println!("{} clients remaining", view.records().len());
    Ok(())
}
