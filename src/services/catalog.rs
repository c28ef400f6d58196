// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::{ApiClient, ApiRequest, ApiResult, Envelope};
use crate::models::{ClientType, Currency, InsuranceType};

// Reference lists are served under the clients resource.
const BASE: &str = "Clientes";

pub struct CatalogService<'a> {
    api: &'a ApiClient,
}

impl<'a> CatalogService<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub fn insurance_types(&self) -> ApiResult<Envelope<Vec<InsuranceType>>> {
        self.list(format!("{BASE}/TiposSeguro"))
    }

    pub fn client_types(&self) -> ApiResult<Envelope<Vec<ClientType>>> {
        self.list(format!("{BASE}/TiposCliente"))
    }

    pub fn currencies(&self) -> ApiResult<Envelope<Vec<Currency>>> {
        self.list(format!("{BASE}/Monedas"))
    }

    fn list<T: serde::de::DeserializeOwned>(&self, path: String) -> ApiResult<Envelope<Vec<T>>> {
        let env = self.api.call::<Option<Vec<T>>>(ApiRequest::get(path))?;
        Ok(env.map(Option::unwrap_or_default))
    }
}
