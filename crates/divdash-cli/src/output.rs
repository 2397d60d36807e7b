use std::io::{self, Write};

use divdash_core::{Cell, DashboardView, Locale, Notice, NoticeKind, RefreshReport, Settings, StatsView};
use serde_json::{json, Value};

use crate::cli::{OutputFormat, Section};
use crate::commands::{Body, CommandResult, StatusReport};
use crate::error::CliError;

pub fn render(
    result: &CommandResult,
    format: OutputFormat,
    pretty: bool,
    locale: Locale,
) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match format {
        OutputFormat::Json => {
            let payload = json!({
                "notices": result.notices.iter().map(|n| notice_json(*n, locale)).collect::<Vec<_>>(),
                "data": body_json(&result.body)?,
            });
            let text = if pretty {
                serde_json::to_string_pretty(&payload)?
            } else {
                serde_json::to_string(&payload)?
            };
            writeln!(out, "{text}")?;
        }
        OutputFormat::Table => {
            let stderr = io::stderr();
            write_notices(&mut stderr.lock(), &result.notices, locale)?;
            write_table(&mut out, &result.body, locale)?;
        }
    }
    Ok(())
}

fn notice_json(notice: Notice, locale: Locale) -> Value {
    json!({
        "kind": notice.kind(),
        "code": notice,
        "message": notice.text(locale),
    })
}

fn body_json(body: &Body) -> Result<Value, serde_json::Error> {
    match body {
        Body::Empty => Ok(Value::Null),
        Body::View(view, section) => match section {
            Section::Stocks => serde_json::to_value(&view.stocks),
            Section::Bonds => serde_json::to_value(&view.bonds),
            Section::Compare => serde_json::to_value(&view.comparison),
            Section::Portfolio => serde_json::to_value(&view.portfolio),
            Section::All => serde_json::to_value(view),
        },
        Body::Status(report) => serde_json::to_value(report),
        Body::Settings(settings) => serde_json::to_value(settings),
        Body::Refresh(report, view) => Ok(json!({
            "refresh": serde_json::to_value(report)?,
            "dashboard": serde_json::to_value(view)?,
        })),
    }
}

pub fn write_notices(out: &mut impl Write, notices: &[Notice], locale: Locale) -> io::Result<()> {
    for notice in notices {
        let marker = match notice.kind() {
            NoticeKind::Success => "ok",
            NoticeKind::Error => "error",
        };
        writeln!(out, "[{marker}] {}", notice.text(locale))?;
    }
    Ok(())
}

pub fn write_table(out: &mut impl Write, body: &Body, locale: Locale) -> io::Result<()> {
    match body {
        Body::Empty => Ok(()),
        Body::View(view, section) => write_view(out, view, *section, locale),
        Body::Status(report) => write_status(out, report),
        Body::Settings(settings) => write_settings(out, settings),
        Body::Refresh(report, view) => {
            write_refresh(out, report)?;
            writeln!(out)?;
            write_view(out, view, Section::All, locale)
        }
    }
}

fn write_view(out: &mut impl Write, view: &DashboardView, section: Section, locale: Locale) -> io::Result<()> {
    let all = section == Section::All;
    if all {
        write_stats(out, &view.stats)?;
        writeln!(out)?;
    }
    if all || section == Section::Stocks {
        writeln!(out, "Top dividend stocks")?;
        let rows = view
            .stocks
            .iter()
            .map(|s| {
                vec![
                    s.ticker.clone(),
                    format!("{:.2}", s.price),
                    format!("{:.2}%", s.dividend_yield),
                    s.next_payment.clone(),
                    s.lots.to_string(),
                ]
            })
            .collect();
        write_grid(out, &["Ticker", "Price", "Yield", "Next payment", "Lots"], rows)?;
    }
    if all || section == Section::Bonds {
        if all {
            writeln!(out)?;
        }
        writeln!(out, "Top federal loan bonds")?;
        let rows = view
            .bonds
            .iter()
            .map(|b| {
                vec![
                    b.ticker.clone(),
                    format!("{:.2}", b.price),
                    format!("{:.2}%", b.yield_pct),
                    b.maturity.clone(),
                    b.quantity.to_string(),
                ]
            })
            .collect();
        write_grid(out, &["Ticker", "Price", "Yield", "Maturity", "Quantity"], rows)?;
    }
    if all || section == Section::Compare {
        if all {
            writeln!(out)?;
        }
        writeln!(out, "Stocks vs bonds")?;
        let rows = view
            .comparison
            .rows
            .iter()
            .map(|row| {
                vec![
                    row.metric.label(locale).to_owned(),
                    cell_text(row.stocks, locale),
                    cell_text(row.bonds, locale),
                ]
            })
            .collect();
        write_grid(out, &["", "Stocks", "Bonds"], rows)?;
    }
    if all || section == Section::Portfolio {
        if all {
            writeln!(out)?;
        }
        writeln!(out, "Portfolio")?;
        if view.portfolio.is_empty() {
            writeln!(out, "{}", empty_portfolio(locale))?;
        } else {
            let rows = view
                .portfolio
                .iter()
                .map(|p| vec![p.index.to_string(), p.ticker.clone(), p.quantity.to_string()])
                .collect();
            write_grid(out, &["#", "Ticker", "Quantity"], rows)?;
        }
    }
    Ok(())
}

fn write_stats(out: &mut impl Write, stats: &StatsView) -> io::Result<()> {
    writeln!(out, "key rate    : {:.2}%", stats.key_rate)?;
    writeln!(out, "inflation   : {:.2}%", stats.inflation)?;
    writeln!(out, "amount      : {:.2}", stats.investment_amount)?;
    writeln!(
        out,
        "refreshed   : {}",
        stats.last_refresh.as_deref().unwrap_or(divdash_core::PLACEHOLDER)
    )
}

fn write_status(out: &mut impl Write, report: &StatusReport) -> io::Result<()> {
    writeln!(out, "logged_in   : {}", report.logged_in)?;
    writeln!(out, "store       : {}", report.store)?;
    writeln!(out, "relay       : {}", report.relay_url)?;
    writeln!(out, "holdings    : {}", report.portfolio_entries)?;
    write_stats(out, &report.stats)
}

fn write_settings(out: &mut impl Write, settings: &Settings) -> io::Result<()> {
    writeln!(out, "amount      : {}", settings.investment_amount)?;
    writeln!(out, "key_rate    : {}", settings.key_rate)?;
    writeln!(out, "inflation   : {}", settings.inflation)
}

fn write_refresh(out: &mut impl Write, report: &RefreshReport) -> io::Result<()> {
    let or_dash = |value: Option<String>| value.unwrap_or_else(|| divdash_core::PLACEHOLDER.to_owned());
    writeln!(out, "key rate    : {}", or_dash(report.key_rate.map(|r| format!("{r:.2}%"))))?;
    writeln!(out, "stocks      : {}", or_dash(report.stocks.map(|n| n.to_string())))?;
    writeln!(out, "bonds       : {}", or_dash(report.bonds.map(|n| n.to_string())))?;
    if report.fallback_used {
        writeln!(out, "fallback    : sample data")?;
    }
    Ok(())
}

fn cell_text(cell: Cell, locale: Locale) -> String {
    match cell {
        Cell::Percent { value: Some(value), .. } => format!("{value:.2}%"),
        Cell::Percent { value: None, .. } => divdash_core::PLACEHOLDER.to_owned(),
        Cell::Level { level } => level.label(locale).to_owned(),
    }
}

fn empty_portfolio(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "Portfolio is empty",
        Locale::Ru => "Портфель пуст",
    }
}

fn write_grid(out: &mut impl Write, headers: &[&str], rows: Vec<Vec<String>>) -> io::Result<()> {
    let mut widths = headers.iter().map(|h| h.chars().count()).collect::<Vec<_>>();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: Vec<&str>| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_owned()
    };

    writeln!(out, "{}", line(headers.to_vec()))?;
    for row in &rows {
        writeln!(out, "{}", line(row.iter().map(String::as_str).collect()))?;
    }
    Ok(())
}
