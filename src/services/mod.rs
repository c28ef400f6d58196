// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! One method per backend endpoint. Each call is a single request through
//! [`ApiClient::call`](crate::api::ApiClient::call).

pub mod catalog;
pub mod clients;
pub mod quotes;

pub use catalog::CatalogService;
pub use clients::ClientService;
pub use quotes::{QuoteService, ReportFilter};
