//! Token budget formatting.
//!
//! The counter is green while the budget is healthy, yellow once 80% of the
//! daily limit is spent, and red when nothing is left.

use console::style;

use folio_types::chat::Language;

use folio_core::chat::notice;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetLevel {
    Healthy,
    Low,
    Exhausted,
}

pub fn budget_level(remaining: i64, limit: i64) -> BudgetLevel {
    if remaining <= 0 {
        BudgetLevel::Exhausted
    } else if limit > 0 && remaining.saturating_mul(5) <= limit {
        BudgetLevel::Low
    } else {
        BudgetLevel::Healthy
    }
}

/// Example: `49 / 50`
pub fn render_token_counter(remaining: i64, limit: i64) -> String {
    let text = format!("{remaining} / {limit}");
    match budget_level(remaining, limit) {
        BudgetLevel::Healthy => format!("{}", style(text).green()),
        BudgetLevel::Low => format!("{}", style(text).yellow()),
        BudgetLevel::Exhausted => format!("{}", style(text).red().bold()),
    }
}

/// Example: `  Tokens remaining: 49 / 50  (Limit: 3 msgs/min, 10 msgs/day)`
pub fn render_budget_line(lang: Language, remaining: i64, limit: i64) -> String {
    format!(
        "  {}: {}  {}",
        style(notice::tokens_remaining_label(lang)).dim(),
        render_token_counter(remaining, limit),
        style(format!("({})", notice::limits_hint(lang))).dim(),
    )
}

/// Shown instead of the prompt hint once the budget is gone.
pub fn render_exhausted(lang: Language) -> String {
    format!(
        "  {} {}",
        style("!").red().bold(),
        style(notice::daily_limit_reached(lang)).red()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_level_thresholds() {
        assert_eq!(budget_level(50, 50), BudgetLevel::Healthy);
        assert_eq!(budget_level(11, 50), BudgetLevel::Healthy);
        assert_eq!(budget_level(10, 50), BudgetLevel::Low);
        assert_eq!(budget_level(1, 50), BudgetLevel::Low);
        assert_eq!(budget_level(0, 50), BudgetLevel::Exhausted);
        assert_eq!(budget_level(-3, 50), BudgetLevel::Exhausted);
    }

    #[test]
    fn budget_level_without_limit() {
        assert_eq!(budget_level(5, 0), BudgetLevel::Healthy);
    }

    #[test]
    fn budget_level_huge_remaining() {
        assert_eq!(budget_level(i64::MAX, 50), BudgetLevel::Healthy);
    }

    #[test]
    fn render_token_counter_contains_counts() {
        let counter = render_token_counter(49, 50);
        assert!(counter.contains("49 / 50"));
    }

    #[test]
    fn render_budget_line_is_localized() {
        let en = render_budget_line(Language::En, 10, 50);
        assert!(en.contains("Tokens remaining"));
        assert!(en.contains("10 msgs/day"));

        let pt = render_budget_line(Language::Pt, 10, 50);
        assert!(pt.contains("Tokens restantes"));
        assert!(pt.contains("10 msgs/dia"));
    }

    #[test]
    fn render_exhausted_message() {
        assert!(render_exhausted(Language::En).contains("Daily token limit reached"));
    }
}
