//! HTTP API module for the compensation engine.
//!
//! This module exposes decomposition, annual view, annexure export and
//! payslip pro-ration as JSON endpoints.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{AnnexureRequest, DecomposeRequest, PayslipRequest};
pub use response::{
    AnnexureResponse, ApiError, ApiErrorResponse, DecomposeResponse, PayslipResponse,
};
pub use state::AppState;
