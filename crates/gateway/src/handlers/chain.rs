//! Chain context handler
//!
//! Read-only view of the network configuration that transaction-building
//! clients need.

use crate::AppState;
use axum::{extract::State, Json};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ChainResponse {
    pub network: String,
    pub contract_address: String,
}

pub async fn context(State(state): State<AppState>) -> Json<ChainResponse> {
    Json(ChainResponse {
        network: state.chain.network().to_string(),
        contract_address: state.chain.contract_address(),
    })
}
