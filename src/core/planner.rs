use std::{fmt, future::Future, sync::Arc, time::Duration};

use serde_json::Value;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::{
    config::PlannerConfig,
    core::recovery::recover_json_traced,
    error::{PlannerError, Result},
    schemas::validation::inspect_plan,
    services::{
        anthropic_client::AnthropicClient,
        llm_client::{CompletionRequest, LlmClient},
        prompts::{intent_system_prompt, plan_system_prompt, plan_user_prompt},
    },
    types::{intent::TravelIntent, response::PlanResponse},
};

/// Where a planning run is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanStage {
    IntentPending,
    PlanPending,
    Complete,
}

impl PlanStage {
    fn call_name(self) -> &'static str {
        match self {
            PlanStage::IntentPending => "intent extraction",
            PlanStage::PlanPending => "plan generation",
            PlanStage::Complete => "complete",
        }
    }
}

impl fmt::Display for PlanStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.call_name())
    }
}

/// Turns one free-text request into an intent and a trip plan with two
/// sequential completion calls. Holds no per-request state, so one planner
/// can serve any number of concurrent requests.
#[derive(Debug, Clone)]
pub struct TripPlanner {
    client: Arc<dyn LlmClient>,
    model: String,
    intent_max_tokens: u32,
    plan_max_tokens: u32,
    intent_timeout: Duration,
    plan_timeout: Duration,
}

impl TripPlanner {
    /// Planner over an arbitrary client, with default limits.
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        let defaults = PlannerConfig::default();
        Self {
            client,
            model: defaults.model,
            intent_max_tokens: defaults.intent_max_tokens,
            plan_max_tokens: defaults.plan_max_tokens,
            intent_timeout: defaults.intent_timeout,
            plan_timeout: defaults.plan_timeout,
        }
    }

    /// Planner backed by the Anthropic API. Fails without a credential.
    pub fn from_config(config: &PlannerConfig) -> Result<Self> {
        let api_key = config.require_api_key()?;
        let client = AnthropicClient::new(api_key, config.base_url.clone())?;

        Ok(Self {
            client: Arc::new(client),
            model: config.model.clone(),
            intent_max_tokens: config.intent_max_tokens,
            plan_max_tokens: config.plan_max_tokens,
            intent_timeout: config.intent_timeout,
            plan_timeout: config.plan_timeout,
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::from_config(&PlannerConfig::from_env())
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_intent_timeout(mut self, timeout: Duration) -> Self {
        self.intent_timeout = timeout;
        self
    }

    pub fn with_plan_timeout(mut self, timeout: Duration) -> Self {
        self.plan_timeout = timeout;
        self
    }

    /// Run intent extraction, then plan generation.
    ///
    /// Unparseable model output is not an error: the affected half of the
    /// response is `{}`. Service failures and timeouts abort the run.
    pub async fn plan(&self, message: &str) -> Result<PlanResponse> {
        info!(model = %self.model, bytes = message.len(), "planning trip");

        let intent_request =
            CompletionRequest::new(self.model.as_str(), intent_system_prompt(), message)
                .with_max_tokens(self.intent_max_tokens);
        let intent_text = self
            .bounded(PlanStage::IntentPending, self.intent_timeout, self.client.complete(intent_request))
            .await?;
        let intent = recover(PlanStage::IntentPending, &intent_text);

        let resolved = TravelIntent::from_recovered(&intent);
        debug!(
            destination = %resolved.destination,
            days = resolved.duration_days,
            budget = resolved.total_budget,
            "intent resolved"
        );

        let plan_request = CompletionRequest::new(
            self.model.as_str(),
            plan_system_prompt(),
            plan_user_prompt(message, &intent, &resolved),
        )
        .with_max_tokens(self.plan_max_tokens);
        let plan_text = self
            .bounded(PlanStage::PlanPending, self.plan_timeout, self.client.complete(plan_request))
            .await?;
        let plan = recover(PlanStage::PlanPending, &plan_text);

        let response = PlanResponse::new(intent, plan);
        for issue in inspect_plan(&response) {
            warn!(target: "wandr::plan", %issue, "plan contract not met");
        }
        debug!(stage = %PlanStage::Complete, "planning finished");

        Ok(response)
    }

    async fn bounded(
        &self,
        stage: PlanStage,
        limit: Duration,
        call: impl Future<Output = Result<String>>,
    ) -> Result<String> {
        debug!(%stage, timeout_secs = limit.as_secs_f64(), "calling model");
        timeout(limit, call).await.map_err(|_| PlannerError::Timeout {
            stage: stage.call_name(),
            after: limit,
        })?
    }
}

fn recover(stage: PlanStage, text: &str) -> Value {
    let recovery = recover_json_traced(text);
    if recovery.is_fallback() {
        warn!(%stage, bytes = text.len(), "model output could not be recovered; using {{}}");
        debug!(%stage, output = %text, "unrecoverable model output");
    } else {
        debug!(%stage, recovered_by = %recovery.stage, "model output recovered");
    }
    recovery.value
}
