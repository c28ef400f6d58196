// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use reqwest::Method;
use serde_json::Value;

use crate::api::{ApiClient, ApiRequest, ApiResult, Envelope};
use crate::models::Client;

const BASE: &str = "Clientes";

pub struct ClientService<'a> {
    api: &'a ApiClient,
}

impl<'a> ClientService<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub fn list(&self) -> ApiResult<Envelope<Vec<Client>>> {
        let env = self
            .api
            .call::<Option<Vec<Client>>>(ApiRequest::get(format!("{BASE}/Listar")))?;
        Ok(env.map(Option::unwrap_or_default))
    }

    pub fn insert(&self, client: &Client) -> ApiResult<Envelope<Option<Client>>> {
        let body = serde_json::to_value(client)?;
        self.api.call(ApiRequest::with_body(
            Method::POST,
            format!("{BASE}/Insertar"),
            body,
        ))
    }

    pub fn update(&self, client: &Client) -> ApiResult<Envelope<Option<Client>>> {
        let body = serde_json::to_value(client)?;
        self.api.call(ApiRequest::with_body(
            Method::PUT,
            format!("{BASE}/Actualizar"),
            body,
        ))
    }

    /// The id travels as a path segment here, unlike quote deletion.
    pub fn delete(&self, id: i64) -> ApiResult<Envelope<Value>> {
        self.api
            .call(ApiRequest::delete(format!("{BASE}/Eliminar/{id}")))
    }
}
