// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use common::{client_json, harness};
use cotiza::commands::{self, Reported};
use cotiza::interaction::Level;
use cotiza::views::{Scope, ViewStatus};
use cotiza::cli;
use reqwest::Method;
use serde_json::{Value, json};

fn client_cmd(args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["cotiza", "client"];
    argv.extend_from_slice(args);
    let m = cli::build_cli().get_matches_from(argv);
    m.subcommand_matches("client").unwrap().clone()
}

#[test]
fn list_holds_every_returned_client() {
    let h = harness(true);
    h.backend.ok(json!([
        client_json(1, "María López", "0801-1990-00001", "maria@example.com"),
        client_json(2, "Juan Pérez", "0501-1985-00002", "jperez@corp.hn"),
    ]));

    let scope = Scope::new();
    let view = commands::clients::load(&h.ctx, &scope).unwrap();
    assert_eq!(view.records().len(), 2);
    assert_eq!(view.status(), &ViewStatus::Loaded);
    assert_eq!(view.records()[1].name, "Juan Pérez");

    let reqs = h.backend.requests();
    assert_eq!(reqs.len(), 1);
    assert_eq!(reqs[0].method, Method::GET);
    assert_eq!(reqs[0].path, "Clientes/Listar");
}

#[test]
fn empty_list_is_not_an_error() {
    let h = harness(true);
    h.backend.ok(json!([]));
    let scope = Scope::new();
    let view = commands::clients::load(&h.ctx, &scope).unwrap();
    assert!(view.records().is_empty());
    assert_eq!(view.error(), None);
    assert!(h.notes.all().is_empty());
}

#[test]
fn null_data_reads_as_empty_list() {
    let h = harness(true);
    h.backend.ok(Value::Null);
    let scope = Scope::new();
    let view = commands::clients::load(&h.ctx, &scope).unwrap();
    assert!(view.records().is_empty());
}

#[test]
fn failed_reload_keeps_previous_records() {
    let h = harness(true);
    h.backend
        .ok(json!([client_json(1, "Ana", "1", "ana@example.com")]))
        .rejected("");
    let scope = Scope::new();
    let mut view = commands::clients::load(&h.ctx, &scope).unwrap();

    view.begin_load();
    view.apply(h.ctx.api.clients().list());
    assert_eq!(view.error(), Some("Error loading clients"));
    assert_eq!(view.records().len(), 1);
}

#[test]
fn unreachable_backend_alerts_and_fails() {
    let h = harness(true);
    h.backend.unreachable("connection refused");
    let err = commands::clients::handle(&h.ctx, &client_cmd(&["list"])).unwrap_err();
    assert!(err.is::<Reported>());
    let (level, _, text) = h.notes.last().unwrap();
    assert_eq!(level, Level::Error);
    assert_eq!(text, "Error connecting to server: Error: connection refused");
}

#[test]
fn list_search_narrows_the_view() {
    let h = harness(true);
    h.backend.ok(json!([
        client_json(1, "María López", "0801-1990-00001", "maria@example.com"),
        client_json(2, "Juan Pérez", "0501-1985-00002", "jperez@corp.hn"),
    ]));
    let scope = Scope::new();
    let mut view = commands::clients::load(&h.ctx, &scope).unwrap();
    view.set_search("CORP.HN");
    let shown = view.filtered();
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].id, 2);
}

#[test]
fn add_with_blank_name_sends_nothing() {
    let h = harness(true);
    let m = client_cmd(&[
        "add",
        "--type",
        "1",
        "--name",
        "  ",
        "--identity",
        "0801-1990-00001",
        "--phone",
        "9876-5432",
        "--email",
        "ana@example.com",
    ]);

    let form = commands::clients::form_from_args(m.subcommand_matches("add").unwrap());
    let errs = form.validate(chrono::Local::now().naive_local()).unwrap_err();
    assert!(errs.is_invalid("name"));

    let err = commands::clients::handle(&h.ctx, &m).unwrap_err();
    assert!(err.is::<Reported>());
    assert!(h.backend.requests().is_empty());
    let (level, title, text) = h.notes.last().unwrap();
    assert_eq!(level, Level::Warning);
    assert_eq!(title, "Incomplete form");
    assert!(text.contains("name is required"));
}

#[test]
fn add_posts_client_after_type_check() {
    let h = harness(true);
    h.backend
        .ok(json!([{ "tiCl_Id": 1, "tiCl_Nombre": "Persona Natural" }]))
        .ok(client_json(9, "Ana Ruiz", "0801-1990-12345", "ana@example.com"));
    let m = client_cmd(&[
        "add",
        "--type",
        "1",
        "--name",
        "Ana Ruiz",
        "--identity",
        "0801-1990-12345",
        "--birth-date",
        "1990-04-12",
        "--phone",
        "9876-5432",
        "--email",
        "ana@example.com",
    ]);
    commands::clients::handle(&h.ctx, &m).unwrap();

    let reqs = h.backend.requests();
    assert_eq!(reqs[0].path, "Clientes/TiposCliente");
    assert_eq!(reqs[1].method, Method::POST);
    assert_eq!(reqs[1].path, "Clientes/Insertar");
    let body = reqs[1].body.as_ref().unwrap();
    assert_eq!(body["clie_Nombre"], "Ana Ruiz");
    assert_eq!(body["tiCl_Id"], 1);
    assert_eq!(body["clie_FechaNacimiento"], "1990-04-12T00:00:00");
    assert_eq!(body["clie_Activo"], true);
    assert_eq!(body["tipoCliente"], "");

    let (level, title, _) = h.notes.last().unwrap();
    assert_eq!(level, Level::Success);
    assert_eq!(title, "Client created!");
}

#[test]
fn add_rejects_unknown_client_type() {
    let h = harness(true);
    h.backend
        .ok(json!([{ "tiCl_Id": 2, "tiCl_Nombre": "Empresa" }]));
    let m = client_cmd(&[
        "add",
        "--type",
        "7",
        "--name",
        "Ana",
        "--identity",
        "1",
        "--phone",
        "2",
        "--email",
        "ana@example.com",
    ]);
    assert!(commands::clients::handle(&h.ctx, &m).is_err());
    assert_eq!(h.backend.requests().len(), 1);
}

#[test]
fn edit_keeps_unset_fields() {
    let h = harness(true);
    h.backend
        .ok(json!([client_json(5, "Ana Ruiz", "0801", "ana@example.com")]))
        .ok(Value::Null);
    let m = client_cmd(&["edit", "--id", "5", "--phone", "3333-4444"]);
    commands::clients::handle(&h.ctx, &m).unwrap();

    let reqs = h.backend.requests();
    // unchanged type needs no catalog lookup
    assert_eq!(reqs.len(), 2);
    assert_eq!(reqs[1].method, Method::PUT);
    assert_eq!(reqs[1].path, "Clientes/Actualizar");
    let body = reqs[1].body.as_ref().unwrap();
    assert_eq!(body["clie_Id"], 5);
    assert_eq!(body["clie_Telefono"], "3333-4444");
    assert_eq!(body["clie_Nombre"], "Ana Ruiz");
    assert_eq!(body["clie_FechaCreacion"], "2025-01-10T08:30:00");
    assert_eq!(body["tipoCliente"], "Persona Natural");
}

#[test]
fn edit_with_new_type_sends_its_label() {
    let h = harness(true);
    h.backend
        .ok(json!([client_json(5, "Ana Ruiz", "0801", "ana@example.com")]))
        .ok(json!([
            { "tiCl_Id": 1, "tiCl_Nombre": "Persona Natural" },
            { "tiCl_Id": 2, "tiCl_Nombre": "Empresa" }
        ]))
        .ok(Value::Null);
    let m = client_cmd(&["edit", "--id", "5", "--type", "2"]);
    commands::clients::handle(&h.ctx, &m).unwrap();

    let reqs = h.backend.requests();
    assert_eq!(reqs[1].path, "Clientes/TiposCliente");
    let body = reqs[2].body.as_ref().unwrap();
    assert_eq!(body["tiCl_Id"], 2);
    assert_eq!(body["tipoCliente"], "Empresa");
}

#[test]
fn edit_unknown_id_is_not_found() {
    let h = harness(true);
    h.backend.ok(json!([]));
    let m = client_cmd(&["edit", "--id", "42", "--name", "X"]);
    let err = commands::clients::handle(&h.ctx, &m).unwrap_err();
    assert_eq!(err.to_string(), "Client 42 not found");
    assert_eq!(h.backend.requests().len(), 1);
}

#[test]
fn declined_delete_sends_nothing() {
    let h = harness(false);
    commands::clients::handle(&h.ctx, &client_cmd(&["rm", "--id", "5"])).unwrap();
    assert_eq!(h.answer.asked(), 1);
    assert!(h.backend.requests().is_empty());
}

#[test]
fn confirmed_delete_puts_id_in_path_and_reloads() {
    let h = harness(true);
    h.backend
        .ok_with_message("Cliente eliminado correctamente", Value::Null)
        .ok(json!([]));
    commands::clients::handle(&h.ctx, &client_cmd(&["rm", "--id", "5"])).unwrap();

    let reqs = h.backend.requests();
    assert_eq!(reqs[0].method, Method::DELETE);
    assert_eq!(reqs[0].path, "Clientes/Eliminar/5");
    assert!(reqs[0].body.is_none());
    assert_eq!(reqs[1].path, "Clientes/Listar");

    let (level, _, text) = h.notes.last().unwrap();
    assert_eq!(level, Level::Success);
    assert_eq!(text, "Cliente eliminado correctamente");
}

#[test]
fn refused_delete_is_a_warning() {
    let h = harness(true);
    h.backend
        .rejected("El cliente tiene cotizaciones asociadas");
    let err = commands::clients::handle(&h.ctx, &client_cmd(&["rm", "--id", "5"])).unwrap_err();
    assert!(err.is::<Reported>());
    assert_eq!(h.backend.requests().len(), 1);
    let (level, title, text) = h.notes.last().unwrap();
    assert_eq!(level, Level::Warning);
    assert_eq!(title, "Cannot delete");
    assert_eq!(text, "El cliente tiene cotizaciones asociadas");
}

#[test]
fn yes_flag_skips_the_prompt() {
    let h = harness(false);
    h.backend.ok(Value::Null).ok(json!([]));
    commands::clients::handle(&h.ctx, &client_cmd(&["rm", "--id", "5", "--yes"])).unwrap();
    assert_eq!(h.answer.asked(), 0);
    assert_eq!(h.backend.requests().len(), 2);
}
