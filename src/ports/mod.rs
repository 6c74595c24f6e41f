//! Boundary contracts consumed by the application layer and implemented by
//! external collaborators.

mod gateway;
mod pacer;

pub use gateway::{AnalysisGateway, AnalysisReceipt, GatewayError};
pub use pacer::{NoopPacer, ResponsePacer, TokioPacer};
