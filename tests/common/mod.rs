// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use cotiza::api::{ApiClient, ApiError, ApiRequest, ApiResult, RawResponse, Transport};
use cotiza::commands::Context;
use cotiza::interaction::{Confirm, Level, Notifier};
use serde_json::{Value, json};

#[derive(Default)]
struct State {
    replies: VecDeque<ApiResult<RawResponse>>,
    requests: Vec<ApiRequest>,
}

/// Scripted backend: answers requests in order and records each one.
#[derive(Clone, Default)]
pub struct FakeBackend {
    state: Rc<RefCell<State>>,
}

impl FakeBackend {
    pub fn reply(&self, status: u16, body: Value) -> &Self {
        self.state.borrow_mut().replies.push_back(Ok(RawResponse {
            status,
            body: body.to_string(),
        }));
        self
    }

    pub fn ok(&self, data: Value) -> &Self {
        self.reply(200, envelope(true, "", data))
    }

    pub fn ok_with_message(&self, message: &str, data: Value) -> &Self {
        self.reply(200, envelope(true, message, data))
    }

    pub fn rejected(&self, message: &str) -> &Self {
        self.reply(200, envelope(false, message, Value::Null))
    }

    pub fn unreachable(&self, reason: &str) -> &Self {
        self.state
            .borrow_mut()
            .replies
            .push_back(Err(ApiError::Client(reason.to_string())));
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.state.borrow().requests.clone()
    }
}

impl Transport for FakeBackend {
    fn execute(&self, request: &ApiRequest) -> ApiResult<RawResponse> {
        let mut state = self.state.borrow_mut();
        state.requests.push(request.clone());
        state
            .replies
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Client("no scripted reply".to_string())))
    }
}

pub fn envelope(success: bool, message: &str, data: Value) -> Value {
    json!({
        "type": if success { 1 } else { 3 },
        "code": if success { 200 } else { 409 },
        "success": success,
        "message": message,
        "data": data,
    })
}

pub type Note = (Level, String, String);

#[derive(Clone, Default)]
pub struct Notes(Rc<RefCell<Vec<Note>>>);

impl Notes {
    pub fn all(&self) -> Vec<Note> {
        self.0.borrow().clone()
    }

    pub fn last(&self) -> Option<Note> {
        self.0.borrow().last().cloned()
    }
}

impl Notifier for Notes {
    fn notify(&self, level: Level, title: &str, text: &str) {
        self.0
            .borrow_mut()
            .push((level, title.to_string(), text.to_string()));
    }
}

/// Fixed confirmation answer; counts how often it was asked.
#[derive(Clone)]
pub struct Answer {
    pub yes: bool,
    asked: Rc<RefCell<usize>>,
}

impl Answer {
    pub fn new(yes: bool) -> Self {
        Self {
            yes,
            asked: Rc::default(),
        }
    }

    pub fn asked(&self) -> usize {
        *self.asked.borrow()
    }
}

impl Confirm for Answer {
    fn confirm(&self, _title: &str, _text: &str) -> bool {
        *self.asked.borrow_mut() += 1;
        self.yes
    }
}

pub struct Harness {
    pub ctx: Context,
    pub backend: FakeBackend,
    pub notes: Notes,
    pub answer: Answer,
}

pub fn harness(confirm: bool) -> Harness {
    let backend = FakeBackend::default();
    let notes = Notes::default();
    let answer = Answer::new(confirm);
    let ctx = Context::new(
        ApiClient::new(backend.clone()),
        notes.clone(),
        answer.clone(),
    );
    Harness {
        ctx,
        backend,
        notes,
        answer,
    }
}

pub fn client_json(id: i64, name: &str, identity: &str, email: &str) -> Value {
    json!({
        "clie_Id": id,
        "tiCl_Id": 1,
        "tipoCliente": "Persona Natural",
        "clie_Nombre": name,
        "clie_Identidad": identity,
        "clie_FechaNacimiento": "1990-04-12T00:00:00",
        "clie_Telefono": "9876-5432",
        "clie_CorreoElectronico": email,
        "clie_Activo": true,
        "clie_FechaCreacion": "2025-01-10T08:30:00"
    })
}

pub fn quote_json(id: i64, number: &str, client: &str, sum: f64, premium: f64) -> Value {
    json!({
        "coti_Id": id,
        "coti_Numero": number,
        "coti_Fecha": "2025-02-03T10:00:00",
        "coti_DescripcionBien": "Toyota Hilux 2020 doble cabina",
        "coti_SumaAsegurada": sum,
        "coti_TasaPorcentaje": 2.5,
        "coti_PrimaNeta": premium,
        "coti_CorreoEnviado": false,
        "coti_FechaEnvioCorreo": null,
        "clie_Id": 1,
        "clie_Nombre": client,
        "tiSe_Id": 2,
        "tipoSeguro": "Vehículo",
        "mone_Id": 1,
        "mone_Codigo": "HNL",
        "fechaFormateada": "03/02/2025",
        "correoEnviadoTexto": "No"
    })
}
