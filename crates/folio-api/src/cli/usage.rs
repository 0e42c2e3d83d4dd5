//! `folio usage` -- one-shot token budget query.

use console::style;

use folio_core::chat::ChatApi;
use folio_core::chat::notice;

use crate::state::AppState;

pub async fn show_usage(state: &AppState, json: bool) -> anyhow::Result<()> {
    let usage = state
        .api
        .fetch_usage()
        .await
        .map_err(|e| anyhow::anyhow!("failed to fetch usage from {}: {e}", state.api.base_url()))?;

    if json {
        let out = serde_json::json!({
            "tokens_remaining": usage.tokens_remaining,
            "token_limit": state.config.token_limit,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let lang = state.config.language;
    println!();
    println!(
        "  {}: {}",
        style(notice::tokens_remaining_label(lang)).bold(),
        super::chat::budget_display::render_token_counter(
            usage.tokens_remaining,
            state.config.token_limit
        )
    );
    println!("  {}", style(notice::limits_hint(lang)).dim());
    if usage.tokens_remaining <= 0 {
        println!("  {}", style(notice::daily_limit_reached(lang)).red());
    }
    println!();
    Ok(())
}
