use std::time::Duration;

use engine::{TransactionDraft, TransactionId, YearMonth, build_daily_series, group_by_month};
use serde::Serialize;
use tally_client::{
    HttpTransport, Result, Store,
    config::{self, AppConfig, Command},
    report::{self, CategoryView, Summary},
};

#[tokio::main]
async fn main() -> Result<()> {
    let invocation = config::load()?;
    let level = &invocation.config.log_level;

    tracing_subscriber::fmt()
        .with_env_filter(format!("tally={level},tally_client={level}"))
        .with_writer(std::io::stderr)
        .init();

    let transport = HttpTransport::new(
        &invocation.config.base_url,
        Duration::from_secs(invocation.config.request_timeout_secs),
    )?;
    tracing::debug!(base_url = %transport.base_url(), "transport ready");

    let store = Store::new(transport);
    let output = run(&store, &invocation.config, invocation.command, invocation.json).await?;
    println!("{output}");
    Ok(())
}

async fn run(
    store: &Store<HttpTransport>,
    config: &AppConfig,
    command: Command,
    json: bool,
) -> Result<String> {
    let symbol = config.currency_symbol.as_str();

    match command {
        Command::Summary => {
            let snapshot = store.fetch().await?;
            let summary = Summary::new(&snapshot, config.top_categories);
            render(json, &summary, || summary.render(symbol))
        }
        Command::Months => {
            let snapshot = store.fetch().await?;
            let buckets = group_by_month(&snapshot.ledger);
            render(json, &buckets, || report::render_months(&buckets, symbol))
        }
        Command::Categories { kind } => {
            let snapshot = store.fetch().await?;
            let view = CategoryView::new(&snapshot.ledger, kind.into());
            render(json, &view, || view.render(symbol))
        }
        Command::Daily { all } => {
            let snapshot = store.fetch().await?;
            let window = (!all).then(YearMonth::current);
            let series = build_daily_series(&snapshot.ledger, window);
            render(json, &series, || report::render_daily(&series, symbol))
        }
        Command::CategoriesList => {
            let list = report::category_list();
            render(json, &list, report::render_category_list)
        }
        Command::Add(args) => {
            let snapshot = store.create(&TransactionDraft::from(args)).await?;
            let summary = Summary::new(&snapshot, config.top_categories);
            render(json, &summary, || {
                format!("Transaction added\n\n{}", summary.render(symbol))
            })
        }
        Command::Edit { id, fields } => {
            let id = TransactionId::from(id);
            let existing = store.ensure_loaded(&id).await?;
            let mut draft = TransactionDraft::from(&existing);
            fields.apply(&mut draft);
            let snapshot = store.update(&id, &draft).await?;
            let updated = snapshot.find(&id).cloned();
            render(json, &updated, || format!("Transaction {id} updated"))
        }
        Command::Delete { id } => {
            let id = TransactionId::from(id);
            store.ensure_loaded(&id).await?;
            let snapshot = store.delete(&id).await?;
            let summary = Summary::new(&snapshot, config.top_categories);
            render(json, &summary, || {
                format!("Transaction {id} deleted\n\n{}", summary.render(symbol))
            })
        }
    }
}

fn render<T: Serialize>(json: bool, value: &T, text: impl FnOnce() -> String) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(value)?);
    }
    Ok(text())
}
