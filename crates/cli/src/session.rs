use chrono::{Local, NaiveDate};
use salescope_agent::{DateRangeResolver, SalesAnalyst};
use salescope_core::DateRange;
use salescope_orders::{filter_orders, OrderFetchError, OrderService};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

const NO_DATA_MESSAGE: &str = "I'm sorry, I couldn't retrieve valid sales data.";

/// What one completed turn produced, for the loop to print.
pub struct TurnReport {
    pub range: DateRange,
    pub matched: usize,
    pub analysis: String,
}

/// Sequences one user turn through the pipeline: fetch, resolve, filter,
/// analyze. Strictly sequential; the next turn is read only after this one
/// prints.
pub struct Session {
    orders: OrderService,
    resolver: DateRangeResolver,
    analyst: SalesAnalyst,
}

impl Session {
    pub fn new(orders: OrderService, resolver: DateRangeResolver, analyst: SalesAnalyst) -> Self {
        Self { orders, resolver, analyst }
    }

    /// One full pipeline pass. A fetch failure is the only error surfaced;
    /// everything downstream is total by contract (the resolver falls back,
    /// the analyst apologizes). The analyst runs even when nothing matched.
    pub async fn handle_turn(
        &self,
        query: &str,
        today: NaiveDate,
    ) -> Result<TurnReport, OrderFetchError> {
        let all_orders = self.orders.get_orders().await?;
        let range = self.resolver.resolve(query, today).await;

        let filtered = filter_orders(&all_orders, &range);
        info!(%range, matched = filtered.len(), "filtered completed orders in range");

        let analysis = self.analyst.analyze(query, &filtered).await;
        Ok(TurnReport { range, matched: filtered.len(), analysis })
    }

    /// Read-eval-print loop over stdin. `exit`/`quit` (any case) ends the
    /// session, as does end of input; blank lines are skipped.
    pub async fn run(&self) -> anyhow::Result<()> {
        use std::io::Write;

        println!();
        println!("--- Welcome to the Sales Insight Agent ---");
        println!("Ask me about your sales! (e.g. 'What were our best-selling items yesterday?')");
        println!("Type 'exit' to quit.");
        println!();

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            print!("> ");
            std::io::stdout().flush()?;

            let Some(line) = lines.next_line().await? else {
                break;
            };
            let query = line.trim();
            if query.is_empty() {
                continue;
            }
            if is_exit_command(query) {
                break;
            }

            println!("Processing your request...");
            let today = Local::now().date_naive();
            match self.handle_turn(query, today).await {
                Ok(report) => print_report(query, &report),
                Err(fetch_error) => {
                    warn!(error = %fetch_error, "turn aborted: no usable order data");
                    println!("{NO_DATA_MESSAGE}");
                }
            }
        }

        println!("Goodbye!");
        Ok(())
    }
}

pub fn is_exit_command(input: &str) -> bool {
    matches!(input.trim().to_lowercase().as_str(), "exit" | "quit")
}

fn print_report(query: &str, report: &TurnReport) {
    println!();
    println!("Analysis for '{query}' ({}):", report.range);
    println!("---");
    println!("Analysis Result:");
    println!();
    println!("{}", report.analysis);
    println!("---");
    println!();
}

#[cfg(test)]
mod tests {
    use super::is_exit_command;

    #[test]
    fn exit_words_are_case_insensitive() {
        assert!(is_exit_command("exit"));
        assert!(is_exit_command("QUIT"));
        assert!(is_exit_command("  Exit  "));
        assert!(!is_exit_command("exit now"));
        assert!(!is_exit_command("sales today"));
    }
}
