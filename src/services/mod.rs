pub mod correction_client;
pub mod request_builder;

pub use correction_client::CorrectionClient;
pub use request_builder::RequestBuilder;
