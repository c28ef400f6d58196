// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use tracing::warn;

use super::{Context, load_list};
use super::quotes::{QUOTE_HEADERS, quote_rows};
use crate::api::Envelope;
use crate::export::{self, ExportError, ExportFormat};
use crate::services::ReportFilter;
use crate::utils::{fmt_amount, maybe_print_json, parse_date, pretty_table};
use crate::views::{ReportView, Scope};

pub fn handle(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let exporting = sub.get_flag("export");
    // Rejected before anything is fetched.
    let format: ExportFormat = sub
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("xlsx")
        .parse()?;
    let filter = filter_from_args(sub)?;

    let scope = Scope::new();
    let report = generate(ctx, &scope, filter)?;

    if !maybe_print_json(json_flag, jsonl_flag, &report.quotes())? {
        let shown: Vec<_> = report.quotes().iter().collect();
        println!("{}", pretty_table(&QUOTE_HEADERS, quote_rows(&shown)));
        let totals = report.totals();
        let label = insurance_label(ctx, report.filter());
        println!(
            "{} quotes ({})  sum insured {}  net premium {}",
            totals.count,
            label,
            fmt_amount(&totals.sum_insured),
            fmt_amount(&totals.net_premium)
        );
    }

    if exporting {
        let out = sub
            .get_one::<String>("out")
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                let today = chrono::Local::now().date_naive();
                export::default_dir().join(export::default_file_name(today, format))
            });
        export_report(ctx, &report, format, &out)?;
    }
    Ok(())
}

pub fn filter_from_args(sub: &clap::ArgMatches) -> Result<ReportFilter> {
    let from = sub
        .get_one::<String>("from")
        .map(|s| parse_date(s))
        .transpose()?;
    let to = sub
        .get_one::<String>("to")
        .map(|s| parse_date(s))
        .transpose()?;
    Ok(ReportFilter {
        from,
        to,
        insurance_type_id: sub.get_one::<i64>("insurance-type").copied(),
    })
}

/// Loads the report for `filter`; totals always cover exactly the loaded set.
pub fn generate(ctx: &Context, scope: &Scope, filter: ReportFilter) -> Result<ReportView> {
    let mut report = ReportView::new(scope);
    report.set_filter(filter);
    let filter = report.filter().clone();
    load_list(ctx, &mut report.list, || ctx.api.quotes().report(&filter))?;
    Ok(report)
}

fn insurance_label(ctx: &Context, filter: &ReportFilter) -> String {
    let Some(id) = filter.insurance_type_id else {
        return "all insurance types".to_string();
    };
    match ctx.api.catalog().insurance_types() {
        Ok(Envelope::Success { data, .. }) => data
            .into_iter()
            .find(|t| t.id == id)
            .map(|t| t.name)
            .unwrap_or_else(|| format!("insurance type {}", id)),
        Ok(Envelope::Failure { message, .. }) => {
            warn!(%message, "insurance types unavailable");
            format!("insurance type {}", id)
        }
        Err(err) => {
            warn!(error = %err, "insurance types unavailable");
            format!("insurance type {}", id)
        }
    }
}

pub fn export_report(
    ctx: &Context,
    report: &ReportView,
    format: ExportFormat,
    out: &std::path::Path,
) -> Result<()> {
    match export::write_report(report.quotes(), format, out) {
        Ok(n) => {
            ctx.notifier.success(
                "Exported!",
                &format!("{} quotes written to {}", n, out.display()),
            );
            Ok(())
        }
        // Nothing is written for an empty report.
        Err(ExportError::Empty) => {
            ctx.notifier
                .warning("No data", "There are no quotes to export");
            Ok(())
        }
        Err(err) => {
            ctx.notifier
                .error("Export failed", "The report file could not be written");
            Err(err).with_context(|| format!("writing {}", out.display()))
        }
    }
}
