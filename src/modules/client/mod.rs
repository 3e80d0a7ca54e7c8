pub mod payments_client;
pub mod reqwest_client;

pub use payments_client::{ApiResponse, Credential, PaymentsClient, API_KEY_HEADER};
pub use reqwest_client::ReqwestPaymentsClient;
