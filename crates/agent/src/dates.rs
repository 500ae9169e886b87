use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{Datelike, Duration, NaiveDate};
use salescope_core::DateRange;
use serde::Deserialize;
use tracing::{info, warn};

use crate::llm::LlmClient;

#[derive(Debug, Deserialize)]
struct ResolvedDates {
    start_date: NaiveDate,
    end_date: NaiveDate,
}

/// Resolves a free-text temporal expression into an inclusive date range by
/// delegating interpretation to the LLM.
///
/// Resolution is total: one best-effort call, and any failure (call error,
/// unparseable reply, invalid calendar date) falls back to today/today with
/// the reason logged, never surfaced to the caller.
pub struct DateRangeResolver {
    llm: Arc<dyn LlmClient>,
}

impl DateRangeResolver {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }

    pub async fn resolve(&self, query: &str, today: NaiveDate) -> DateRange {
        match self.try_resolve(query, today).await {
            Ok(range) => {
                info!(%range, "date range resolved");
                range
            }
            Err(error) => {
                warn!(error = %error, "date resolution failed, defaulting to today");
                DateRange::single_day(today)
            }
        }
    }

    async fn try_resolve(&self, query: &str, today: NaiveDate) -> Result<DateRange> {
        let prompt = build_prompt(query, today);
        let reply = self.llm.generate(&[&prompt]).await.context("date resolution call failed")?;

        let stripped = strip_code_fences(&reply);
        let dates: ResolvedDates = serde_json::from_str(&stripped)
            .context("reply was not the expected start_date/end_date object")?;

        Ok(DateRange::new(dates.start_date, dates.end_date))
    }
}

fn build_prompt(query: &str, today: NaiveDate) -> String {
    let yesterday = today - Duration::days(1);
    let month_start = today.with_day(1).unwrap_or(today);

    format!(
        r#"You are a date parsing assistant. Today's date is {today}.
Analyze the user's query and determine the start date and end date (inclusive) for their request.

User Query: "{query}"

Respond ONLY with a JSON object in the format:
{{"start_date": "YYYY-MM-DD", "end_date": "YYYY-MM-DD"}}

Examples:
- Query "yesterday": {{"start_date": "{yesterday}", "end_date": "{yesterday}"}}
- Query "today": {{"start_date": "{today}", "end_date": "{today}"}}
- Query "this month": {{"start_date": "{month_start}", "end_date": "{today}"}}
- Query "last week" (assume Mon-Sun): {{"start_date": "2025-10-27", "end_date": "2025-11-02"}}
- Query "how much revenue?": {{"start_date": "{today}", "end_date": "{today}"}} (Defaults to today)
"#
    )
}

/// Remove markdown fence markers some models wrap JSON replies in.
fn strip_code_fences(reply: &str) -> String {
    reply.trim().replace("```json", "").replace("```", "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use anyhow::{bail, Result};
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use salescope_core::DateRange;

    use super::{build_prompt, strip_code_fences, DateRangeResolver};
    use crate::llm::LlmClient;

    struct ScriptedLlm {
        reply: Result<String>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedLlm {
        fn replying(reply: Result<String>) -> Arc<Self> {
            Arc::new(Self { reply, prompts: Mutex::new(Vec::new()) })
        }
    }

    #[async_trait]
    impl LlmClient for ScriptedLlm {
        async fn generate(&self, parts: &[&str]) -> Result<String> {
            let joined = parts.join("\n");
            self.prompts.lock().expect("prompts lock").push(joined);
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(error) => bail!("{error}"),
            }
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, 1).expect("valid date")
    }

    #[tokio::test]
    async fn parses_a_well_formed_reply() {
        let llm = ScriptedLlm::replying(Ok(
            r#"{"start_date": "2025-10-27", "end_date": "2025-11-02"}"#.to_string(),
        ));
        let resolver = DateRangeResolver::new(llm);

        let range = resolver.resolve("last week", today()).await;
        assert_eq!(range.start, NaiveDate::from_ymd_opt(2025, 10, 27).expect("date"));
        assert_eq!(range.end, NaiveDate::from_ymd_opt(2025, 11, 2).expect("date"));
    }

    #[tokio::test]
    async fn fenced_reply_is_stripped_before_parsing() {
        let llm = ScriptedLlm::replying(Ok(
            "```json\n{\"start_date\": \"2025-11-01\", \"end_date\": \"2025-11-01\"}\n```"
                .to_string(),
        ));
        let resolver = DateRangeResolver::new(llm);

        let range = resolver.resolve("today", today()).await;
        assert_eq!(range, DateRange::single_day(today()));
    }

    #[tokio::test]
    async fn call_failure_falls_back_to_today() {
        let llm = ScriptedLlm::replying(Err(anyhow::anyhow!("service unavailable")));
        let resolver = DateRangeResolver::new(llm);

        let range = resolver.resolve("asdkfj", today()).await;
        assert_eq!(range, DateRange::single_day(today()));
    }

    #[tokio::test]
    async fn non_json_reply_falls_back_to_today() {
        let llm = ScriptedLlm::replying(Ok("I think you mean sometime recent?".to_string()));
        let resolver = DateRangeResolver::new(llm);

        let range = resolver.resolve("asdkfj", today()).await;
        assert_eq!(range, DateRange::single_day(today()));
    }

    #[tokio::test]
    async fn invalid_calendar_date_falls_back_to_today() {
        let llm = ScriptedLlm::replying(Ok(
            r#"{"start_date": "2025-13-40", "end_date": "2025-13-41"}"#.to_string(),
        ));
        let resolver = DateRangeResolver::new(llm);

        let range = resolver.resolve("next smarch", today()).await;
        assert_eq!(range, DateRange::single_day(today()));
    }

    #[tokio::test]
    async fn prompt_carries_query_today_and_default_rule() {
        let llm = ScriptedLlm::replying(Ok(
            r#"{"start_date": "2025-11-01", "end_date": "2025-11-01"}"#.to_string(),
        ));
        let resolver = DateRangeResolver::new(llm.clone());
        resolver.resolve("sales this month", today()).await;

        let prompts = llm.prompts.lock().expect("prompts lock");
        let prompt = &prompts[0];
        assert!(prompt.contains("Today's date is 2025-11-01"));
        assert!(prompt.contains("User Query: \"sales this month\""));
        assert!(prompt.contains(r#"Query "yesterday": {"start_date": "2025-10-31""#));
        assert!(prompt.contains(r#"Query "this month": {"start_date": "2025-11-01""#));
        assert!(prompt.contains("Defaults to today"));
    }

    #[test]
    fn fence_stripping_handles_plain_and_fenced_text() {
        assert_eq!(strip_code_fences("{\"a\": 1}"), "{\"a\": 1}");
        assert_eq!(strip_code_fences("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(strip_code_fences("```\n{\"a\": 1}\n```"), "{\"a\": 1}");
    }

    #[test]
    fn prompt_examples_use_computed_dates() {
        let prompt = build_prompt("whatever", today());
        assert!(prompt.contains("\"2025-10-31\""));
        assert!(prompt.contains("\"2025-11-01\""));
    }
}
