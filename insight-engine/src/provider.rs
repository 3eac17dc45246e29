//! Provider trait and typed decoding
//!
//! [`InsightProvider`] is the single seam to the external completion
//! service: raw JSON in, raw JSON out. [`InsightClient`] wraps a
//! provider and decodes each response into its fixed shape, turning
//! shape mismatches into [`Error::Malformed`].

use crate::{
    error::{Error, Result},
    types::{CashFlowForecast, ClientAnalysis, DemandForecast, InsightRequest, SuggestedItem},
};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// External completion service
pub trait InsightProvider: Send + Sync {
    /// Run one completion; the returned JSON is unvalidated
    fn complete(&self, request: &InsightRequest) -> Result<Value>;
}

/// Typed wrapper around a provider
#[derive(Debug)]
pub struct InsightClient<P> {
    provider: P,
}

impl<P: InsightProvider> InsightClient<P> {
    /// Wrap a provider
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Analyze a client's invoice history
    pub fn analyze_client(&self, payload: Value) -> Result<ClientAnalysis> {
        self.request(
            payload,
            "Analyze the client invoice history and respond with payment behavior, \
             risk assessment, recommendations, and a next-order prediction.",
        )
    }

    /// Suggest invoice line items for a client
    pub fn suggest_items(&self, payload: Value) -> Result<Vec<SuggestedItem>> {
        self.request(
            payload,
            "Suggest invoice line items this client is likely to order next.",
        )
    }

    /// Project cash flow over the coming months
    pub fn predict_cash_flow(&self, payload: Value) -> Result<CashFlowForecast> {
        self.request(
            payload,
            "Predict monthly revenue and collections from historical and upcoming invoices.",
        )
    }

    /// Forecast demand for an inventory item
    pub fn forecast_demand(&self, payload: Value) -> Result<DemandForecast> {
        self.request(
            payload,
            "Forecast demand for the inventory item from its historical sales.",
        )
    }

    fn request<T: DeserializeOwned>(&self, payload: Value, instruction: &str) -> Result<T> {
        let request = InsightRequest::new(payload, instruction);
        let raw = self.provider.complete(&request)?;
        decode(raw)
    }
}

/// Decode a raw response into a fixed shape
pub fn decode<T: DeserializeOwned>(raw: Value) -> Result<T> {
    serde_json::from_value(raw).map_err(|e| {
        tracing::warn!(error = %e, "Discarding malformed insight response");
        Error::Malformed(e.to_string())
    })
}

/// Provider returning a fixed response, for tests and offline use
#[derive(Debug, Clone)]
pub struct CannedProvider {
    response: Value,
}

impl CannedProvider {
    /// Always respond with `response`
    pub fn new(response: Value) -> Self {
        Self { response }
    }
}

impl InsightProvider for CannedProvider {
    fn complete(&self, _request: &InsightRequest) -> Result<Value> {
        Ok(self.response.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn analysis_json() -> Value {
        json!({
            "payment_behavior": "pays within 15 days",
            "average_order_value": 1250.0,
            "preferred_products": ["Widget"],
            "seasonal_patterns": "orders peak in Q4",
            "risk_assessment": { "score": 0.2, "factors": ["short history"] },
            "recommendations": ["offer early-payment discount"],
            "predicted_ltv": 48_000.0,
            "next_order_prediction": {
                "likely_date": "2024-11-03",
                "estimated_value": 1_400.0,
                "suggested_products": ["Widget", "Widget Pro"]
            }
        })
    }

    #[test]
    fn test_well_formed_analysis_decodes() {
        let client = InsightClient::new(CannedProvider::new(analysis_json()));
        let analysis = client.analyze_client(json!({"client_id": 7})).unwrap();

        assert_eq!(analysis.risk_assessment.score, 0.2);
        assert_eq!(analysis.next_order_prediction.likely_date, "2024-11-03");
    }

    #[test]
    fn test_malformed_response_is_typed_error() {
        let client = InsightClient::new(CannedProvider::new(json!({"unexpected": true})));

        match client.analyze_client(json!({"client_id": 7})) {
            Err(Error::Malformed(_)) => {}
            other => panic!("expected Malformed, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_suggested_items_decode() {
        let canned = CannedProvider::new(json!([
            { "description": "Widget", "quantity": 2.0, "unit_price": 50.0 },
            { "description": "Gadget", "quantity": 1.0, "unit_price": 80.0, "reasoning": "reordered monthly" }
        ]));
        let client = InsightClient::new(canned);

        let items = client.suggest_items(json!({"client_id": 7})).unwrap();
        assert_eq!(items.len(), 2);
        assert!(items[0].reasoning.is_none());
        assert_eq!(items[1].reasoning.as_deref(), Some("reordered monthly"));
    }

    #[test]
    fn test_cash_flow_trend_enum_decodes_lowercase() {
        let canned = CannedProvider::new(json!({
            "monthly_predictions": [{
                "month": "2024-07",
                "predicted_revenue": 10_000.0,
                "predicted_collections": 9_000.0,
                "confidence_level": 0.8,
                "key_factors": ["two invoices due"]
            }],
            "summary": {
                "total_predicted_revenue": 10_000.0,
                "cash_flow_trend": "improving",
                "risk_factors": [],
                "recommendations": []
            }
        }));
        let client = InsightClient::new(canned);

        let forecast = client.predict_cash_flow(json!({})).unwrap();
        assert_eq!(forecast.summary.cash_flow_trend, crate::CashFlowTrend::Improving);
    }

    #[test]
    fn test_demand_forecast_decodes() {
        let canned = CannedProvider::new(json!({
            "demand_forecast": {
                "total_demand": 120.0,
                "daily_average": 4.0,
                "peak_demand_days": ["Friday"],
                "confidence_level": 0.7
            },
            "reorder_recommendation": {
                "should_reorder": true,
                "suggested_quantity": 150.0,
                "reorder_urgency": "high",
                "reasoning": "stock below forecast demand"
            },
            "seasonal_insights": {
                "pattern_detected": false,
                "seasonal_factors": [],
                "next_peak_period": "none expected"
            }
        }));
        let client = InsightClient::new(canned);

        let forecast = client.forecast_demand(json!({"item_id": 3})).unwrap();
        assert!(forecast.reorder_recommendation.should_reorder);
        assert_eq!(
            forecast.reorder_recommendation.reorder_urgency,
            crate::ReorderUrgency::High
        );
    }
}
