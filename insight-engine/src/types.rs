//! Request and response shapes for the insight boundary
//!
//! Monetary figures here are model estimates, not ledger amounts, so
//! they stay `f64`; exact arithmetic is reserved for the chain itself.

use serde::{Deserialize, Serialize};

/// A request to the external collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightRequest {
    /// Structured business payload (client history, line items, ...)
    pub payload: serde_json::Value,

    /// Natural-language instruction describing the requested analysis
    pub instruction: String,
}

impl InsightRequest {
    /// Build a request
    pub fn new(payload: serde_json::Value, instruction: impl Into<String>) -> Self {
        Self {
            payload,
            instruction: instruction.into(),
        }
    }
}

/// Risk portion of a client analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Risk score between 0 and 1
    pub score: f64,

    /// Contributing risk factors
    pub factors: Vec<String>,
}

/// Predicted next order for a client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NextOrderPrediction {
    /// Likely order date (YYYY-MM-DD)
    pub likely_date: String,

    /// Estimated order value
    pub estimated_value: f64,

    /// Products likely to be ordered
    pub suggested_products: Vec<String>,
}

/// Analysis of a client's invoice history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientAnalysis {
    /// Description of payment patterns
    pub payment_behavior: String,

    /// Average order value
    pub average_order_value: f64,

    /// Frequently ordered items
    pub preferred_products: Vec<String>,

    /// Description of seasonal trends
    pub seasonal_patterns: String,

    /// Payment risk
    pub risk_assessment: RiskAssessment,

    /// Business recommendations
    pub recommendations: Vec<String>,

    /// Predicted lifetime value
    pub predicted_ltv: f64,

    /// Predicted next order
    pub next_order_prediction: NextOrderPrediction,
}

/// A suggested invoice line item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestedItem {
    /// Item description
    pub description: String,

    /// Suggested quantity
    pub quantity: f64,

    /// Suggested unit price
    pub unit_price: f64,

    /// Why this item is suggested
    #[serde(default)]
    pub reasoning: Option<String>,
}

/// One month of a cash-flow forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPrediction {
    /// Month (YYYY-MM)
    pub month: String,

    /// Predicted billed revenue
    pub predicted_revenue: f64,

    /// Predicted collections
    pub predicted_collections: f64,

    /// Model confidence between 0 and 1
    pub confidence_level: f64,

    /// Factors affecting the prediction
    pub key_factors: Vec<String>,
}

/// Overall cash-flow trend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CashFlowTrend {
    /// Improving
    Improving,
    /// Stable
    Stable,
    /// Declining
    Declining,
}

/// Forecast summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSummary {
    /// Revenue predicted over the whole horizon
    pub total_predicted_revenue: f64,

    /// Trend direction
    pub cash_flow_trend: CashFlowTrend,

    /// Risks to the forecast
    pub risk_factors: Vec<String>,

    /// Recommendations
    pub recommendations: Vec<String>,
}

/// Multi-month cash-flow projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowForecast {
    /// Per-month predictions
    pub monthly_predictions: Vec<MonthlyPrediction>,

    /// Summary over the horizon
    pub summary: ForecastSummary,
}

/// Demand estimate for an inventory item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandEstimate {
    /// Total demand over the forecast period
    pub total_demand: f64,

    /// Daily average demand
    pub daily_average: f64,

    /// Likely peak days
    pub peak_demand_days: Vec<String>,

    /// Model confidence between 0 and 1
    pub confidence_level: f64,
}

/// Reorder urgency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReorderUrgency {
    /// Low
    Low,
    /// Medium
    Medium,
    /// High
    High,
}

/// Reorder recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReorderRecommendation {
    /// Whether to reorder now
    pub should_reorder: bool,

    /// Quantity to reorder
    pub suggested_quantity: f64,

    /// Urgency
    pub reorder_urgency: ReorderUrgency,

    /// Explanation
    pub reasoning: String,
}

/// Seasonal findings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalInsights {
    /// A seasonal pattern was detected
    pub pattern_detected: bool,

    /// Contributing factors
    pub seasonal_factors: Vec<String>,

    /// Description of the next expected peak
    pub next_peak_period: String,
}

/// Demand forecast for an inventory item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandForecast {
    /// Demand estimate
    pub demand_forecast: DemandEstimate,

    /// Reorder recommendation
    pub reorder_recommendation: ReorderRecommendation,

    /// Seasonal findings
    pub seasonal_insights: SeasonalInsights,
}
