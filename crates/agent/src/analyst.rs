use std::sync::Arc;

use salescope_core::Order;
use tracing::{error, info};

use crate::llm::LlmClient;

/// Data contract the model must honor when narrating the order set. The
/// filter guarantees only locked orders arrive, so the analyst does not
/// re-check state.
const SYSTEM_INSTRUCTION: &str = r#"You are a friendly and expert sales analysis assistant.
You will be given a user's question and a list of sales orders in JSON format.
Your task is to analyze the JSON data to answer the user's question.

**CRITICAL INSTRUCTIONS:**
1.  All currency values in the JSON (like 'total' and 'lineItems[].price') are in **CENTS**.
2.  When you present your answer, **ALWAYS** convert these cents to dollars (e.g., 906 cents is $9.06).
3.  Only use the provided JSON data for your analysis.
4.  Answer in a clear, natural, and friendly tone. Use markdown for formatting (like lists).
5.  If the question is about 'best-selling items', analyze the 'lineItems' across all orders.
6.  If the JSON list is empty, inform the user you found no sales data for that period.
7.  The 'state' field 'locked' means the order is completed. You will only receive locked orders."#;

const APOLOGY: &str = "I'm sorry, I encountered an error while analyzing the sales data.";
const NO_ANALYSIS: &str = "No analysis available.";

/// Delegates the final natural-language analysis to the LLM.
///
/// Total by contract: any call failure becomes the user-facing apology
/// string instead of an error. The analyst is invoked even for an empty
/// order list - the instruction set covers the "no sales data" reply.
pub struct SalesAnalyst {
    llm: Arc<dyn LlmClient>,
}

impl SalesAnalyst {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }

    pub async fn analyze(&self, query: &str, orders: &[&Order]) -> String {
        info!(order_count = orders.len(), "sending order data for analysis");

        let payload = match serde_json::to_string_pretty(orders) {
            Ok(payload) => payload,
            Err(serialize_error) => {
                error!(error = %serialize_error, "could not serialize orders for analysis");
                return APOLOGY.to_string();
            }
        };

        let user_prompt = format!(
            "User Question: \"{query}\"\n\n\
             Here is the sales data for the relevant period. Please analyze it:\n{payload}"
        );

        match self.llm.generate(&[SYSTEM_INSTRUCTION, &user_prompt]).await {
            Ok(answer) if answer.trim().is_empty() => NO_ANALYSIS.to_string(),
            Ok(answer) => answer,
            Err(call_error) => {
                error!(error = %call_error, "analysis call failed");
                APOLOGY.to_string()
            }
        }
    }
}
