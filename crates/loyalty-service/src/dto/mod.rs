//! HTTP 请求与响应 DTO

mod request;
mod response;

pub use request::{
    CreditPointsRequest, HistoryParams, LoginRequest, RedeemRequest, RegisterCustomerRequest,
};
pub use response::{
    ApiResponse, HealthResponse, LoginResponse, RedeemResponse, RemittanceResponse,
};
