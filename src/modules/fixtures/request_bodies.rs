//! Generic request bodies.
//!
//! These supply the defaults every connector shares (amount, currency,
//! description, addresses); scenario fixtures layer connector-specific fields on
//! top and steps add dynamic identifiers last.

use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

pub const DEFAULT_AMOUNT: i64 = 6000;
pub const DEFAULT_CURRENCY: &str = "USD";

/// Merchant id unique to one suite run
pub fn random_merchant_id() -> String {
    format!("merchant_{}", Utc::now().timestamp_millis())
}

pub fn random_customer_id() -> String {
    format!("cus_{}", Uuid::new_v4().simple())
}

fn billing_address() -> Value {
    json!({
        "address": {
            "line1": "1467",
            "line2": "Harrison Street",
            "city": "San Francisco",
            "state": "California",
            "zip": "94122",
            "country": "US",
            "first_name": "John",
            "last_name": "Doe"
        },
        "phone": {
            "number": "9123456789",
            "country_code": "+1"
        }
    })
}

fn browser_info() -> Value {
    json!({
        "user_agent": "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
        "accept_header": "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        "language": "en-US",
        "color_depth": 24,
        "screen_height": 1080,
        "screen_width": 1920,
        "time_zone": -330,
        "java_enabled": true,
        "java_script_enabled": true,
        "ip_address": "127.0.0.1"
    })
}

fn customer_acceptance() -> Value {
    json!({
        "acceptance_type": "offline",
        "accepted_at": "1963-05-03T04:07:52.723Z",
        "online": {
            "ip_address": "127.0.0.1",
            "user_agent": "e2e"
        }
    })
}

pub fn merchant_create(merchant_id: &str, return_url: &str) -> Value {
    json!({
        "merchant_id": merchant_id,
        "locker_id": "m0010",
        "merchant_name": "NewAge Retailer",
        "merchant_details": {
            "primary_contact_person": "John Test",
            "primary_email": "john.test@example.com",
            "website": "https://example.com",
            "about_business": "Online Retail with a wide selection of organic products for North America"
        },
        "return_url": return_url,
        "webhook_details": {
            "webhook_version": "1.0.1",
            "webhook_url": "https://example.com/e2e/webhooks",
            "payment_created_enabled": true,
            "payment_succeeded_enabled": true,
            "payment_failed_enabled": true
        },
        "sub_merchants_enabled": false,
        "metadata": {
            "city": "NY",
            "unit": "245"
        }
    })
}

pub fn api_key_create() -> Value {
    json!({
        "name": "e2e API Key",
        "description": null,
        "expiration": "2069-09-23T01:02:03.000Z"
    })
}

pub fn customer_create(customer_id: &str) -> Value {
    json!({
        "customer_id": customer_id,
        "email": "guest@example.com",
        "name": "John Doe",
        "phone": "999999999",
        "phone_country_code": "+65",
        "description": "First customer",
        "address": billing_address()["address"].clone(),
        "metadata": {
            "udf1": "value1",
            "new_customer": "true"
        }
    })
}

pub fn connector_create(connector_id: &str) -> Value {
    json!({
        "connector_type": "payment_processor",
        "connector_name": connector_id,
        "test_mode": true,
        "disabled": false,
        "payment_methods_enabled": [
            {
                "payment_method": "card",
                "payment_method_types": [
                    {
                        "payment_method_type": "credit",
                        "minimum_amount": 1,
                        "maximum_amount": 68607706,
                        "recurring_enabled": true,
                        "installment_payment_enabled": true
                    },
                    {
                        "payment_method_type": "debit",
                        "minimum_amount": 1,
                        "maximum_amount": 68607706,
                        "recurring_enabled": true,
                        "installment_payment_enabled": true
                    }
                ]
            }
        ],
        "metadata": {
            "city": "NY",
            "unit": "245"
        }
    })
}

/// Unconfirmed payment, later confirmed with the client secret
pub fn payment_intent() -> Value {
    json!({
        "currency": DEFAULT_CURRENCY,
        "amount": DEFAULT_AMOUNT,
        "authentication_type": "no_three_ds",
        "capture_method": "automatic",
        "description": "e2e payment",
        "billing": billing_address(),
        "shipping": billing_address(),
        "setup_future_usage": "on_session"
    })
}

pub fn payment_confirm(return_url: &str) -> Value {
    json!({
        "return_url": return_url,
        "confirm": true,
        "customer_acceptance": null,
        "payment_method": "card",
        "payment_method_type": "debit",
        "browser_info": browser_info()
    })
}

/// Payment created and confirmed in one call
pub fn create_confirm_payment(return_url: &str) -> Value {
    json!({
        "amount": DEFAULT_AMOUNT,
        "currency": DEFAULT_CURRENCY,
        "confirm": true,
        "capture_method": "automatic",
        "authentication_type": "no_three_ds",
        "return_url": return_url,
        "description": "e2e payment",
        "billing": billing_address(),
        "shipping": billing_address(),
        "browser_info": browser_info()
    })
}

pub fn capture() -> Value {
    json!({
        "amount_to_capture": DEFAULT_AMOUNT,
        "statement_descriptor_name": "Joseph",
        "statement_descriptor_suffix": "JS"
    })
}

pub fn void() -> Value {
    json!({
        "cancellation_reason": "requested_by_customer"
    })
}

pub fn refund() -> Value {
    json!({
        "amount": DEFAULT_AMOUNT,
        "reason": "Customer returned product",
        "refund_type": "instant",
        "metadata": {
            "udf1": "value1"
        }
    })
}

/// Customer-initiated transaction that sets up a mandate
pub fn cit_mandate(return_url: &str) -> Value {
    json!({
        "amount": DEFAULT_AMOUNT,
        "currency": DEFAULT_CURRENCY,
        "confirm": true,
        "capture_method": "automatic",
        "authentication_type": "no_three_ds",
        "return_url": return_url,
        "setup_future_usage": "off_session",
        "customer_acceptance": customer_acceptance(),
        "mandate_data": {
            "customer_acceptance": customer_acceptance(),
            "mandate_type": {
                "single_use": {
                    "amount": 8000,
                    "currency": DEFAULT_CURRENCY
                }
            }
        },
        "billing": billing_address(),
        "browser_info": browser_info()
    })
}

/// Merchant-initiated transaction charged against an existing mandate
pub fn mit_mandate(return_url: &str) -> Value {
    json!({
        "amount": DEFAULT_AMOUNT,
        "currency": DEFAULT_CURRENCY,
        "confirm": true,
        "capture_method": "automatic",
        "return_url": return_url,
        "off_session": true,
        "billing": billing_address()
    })
}
