//! Well-known shared state keys.
//!
//! Bootstrap keys are seeded from configuration; the rest are written by steps
//! and read by the steps that follow them.

// Bootstrap
pub const BASE_URL: &str = "base_url";
pub const ADMIN_API_KEY: &str = "admin_api_key";
pub const CONNECTOR_ID: &str = "connector_id";
pub const CONNECTOR_AUTH_FILE_PATH: &str = "connector_auth_file_path";
pub const OPERATOR_EMAIL: &str = "email";
pub const OPERATOR_PASSWORD: &str = "password";

// Accounts
pub const MERCHANT_ID: &str = "merchant_id";
pub const PUBLISHABLE_KEY: &str = "publishable_key";
pub const API_KEY: &str = "api_key";
pub const API_KEY_ID: &str = "api_key_id";
pub const PROFILE_ID: &str = "profile_id";
pub const CUSTOMER_ID: &str = "customer_id";
pub const MERCHANT_CONNECTOR_ID: &str = "merchant_connector_id";

// Payments
pub const PAYMENT_ID: &str = "payment_id";
pub const CLIENT_SECRET: &str = "client_secret";
pub const PAYMENT_AMOUNT: &str = "payment_amount";
pub const PAYMENT_STATUS: &str = "payment_status";
pub const NEXT_ACTION_URL: &str = "next_action_url";
pub const REFUND_ID: &str = "refund_id";

// Mandates and saved payment methods
pub const MANDATE_ID: &str = "mandate_id";
pub const PAYMENT_METHOD_ID: &str = "payment_method_id";
pub const PAYMENT_TOKEN: &str = "payment_token";
