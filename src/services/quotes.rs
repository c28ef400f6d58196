// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use reqwest::Method;
use serde::Serialize;
use serde_json::{Value, json};

use crate::api::{ApiClient, ApiRequest, ApiResult, Envelope};
use crate::models::{Quote, QuoteInsert};

const BASE: &str = "Cotizaciones";

/// Report filters. Absent values are sent as JSON `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReportFilter {
    #[serde(rename = "fechaInicio", serialize_with = "opt_ymd")]
    pub from: Option<NaiveDate>,
    #[serde(rename = "fechaFin", serialize_with = "opt_ymd")]
    pub to: Option<NaiveDate>,
    #[serde(rename = "tiSe_Id")]
    pub insurance_type_id: Option<i64>,
}

fn opt_ymd<S: serde::Serializer>(d: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
    match d {
        Some(d) => s.serialize_str(&d.format("%Y-%m-%d").to_string()),
        None => s.serialize_none(),
    }
}

pub struct QuoteService<'a> {
    api: &'a ApiClient,
}

impl<'a> QuoteService<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// Full listing: the report endpoint with every filter left empty.
    pub fn list(&self) -> ApiResult<Envelope<Vec<Quote>>> {
        self.report(&ReportFilter::default())
    }

    /// Filters are compound, so they go in a POST body.
    pub fn report(&self, filter: &ReportFilter) -> ApiResult<Envelope<Vec<Quote>>> {
        let body = serde_json::to_value(filter)?;
        let env = self.api.call::<Option<Vec<Quote>>>(ApiRequest::with_body(
            Method::POST,
            format!("{BASE}/Reporte"),
            body,
        ))?;
        Ok(env.map(Option::unwrap_or_default))
    }

    pub fn insert(&self, quote: &QuoteInsert) -> ApiResult<Envelope<Option<Quote>>> {
        let body = serde_json::to_value(quote)?;
        self.api.call(ApiRequest::with_body(
            Method::POST,
            format!("{BASE}/Insertar"),
            body,
        ))
    }

    pub fn update(&self, quote: &Quote) -> ApiResult<Envelope<Option<Quote>>> {
        let body = serde_json::to_value(quote)?;
        self.api.call(ApiRequest::with_body(
            Method::PUT,
            format!("{BASE}/Actualizar"),
            body,
        ))
    }

    /// The id travels in the request body, unlike client deletion.
    pub fn delete(&self, id: i64) -> ApiResult<Envelope<Value>> {
        self.api.call(ApiRequest::with_body(
            Method::DELETE,
            format!("{BASE}/Eliminar"),
            json!({ "coti_Id": id }),
        ))
    }
}
