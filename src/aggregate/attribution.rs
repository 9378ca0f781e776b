//! Wallet attribution: the fee payer (first required signer) is treated as the
//! wallet that initiated the swap.

use serde_json::Value;

/// Return the attributed wallet of a `getTransaction` payload, if any
///
/// Handles both account key layouts:
/// - `json`: `accountKeys` is a list of strings and the first entry is the fee
///   payer when `header.numRequiredSignatures >= 1`
/// - `jsonParsed`: `accountKeys` is a list of `{pubkey, signer, ..}` objects;
///   the first signer wins
pub fn attribute_wallet(payload: &Value) -> Option<String> {
    let message = payload.get("transaction")?.get("message")?;
    let keys = message.get("accountKeys")?.as_array()?;
    let first = keys.first()?;

    if let Some(key) = first.as_str() {
        let required = message
            .get("header")
            .and_then(|h| h.get("numRequiredSignatures"))
            .and_then(Value::as_u64)
            .unwrap_or(0);
        return if required >= 1 { Some(key.to_string()) } else { None };
    }

    keys.iter()
        .find(|key| key.get("signer").and_then(Value::as_bool).unwrap_or(false))
        .and_then(|key| key.get("pubkey"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw_payload(keys: &[&str], required: u64) -> Value {
        json!({
            "transaction": {
                "message": {
                    "header": {
                        "numRequiredSignatures": required,
                        "numReadonlySignedAccounts": 0,
                        "numReadonlyUnsignedAccounts": 1
                    },
                    "accountKeys": keys
                }
            }
        })
    }

    #[test]
    fn test_first_signer_is_wallet() {
        assert_eq!(attribute_wallet(&raw_payload(&["A", "B", "C"], 1)), Some("A".to_string()));
    }

    #[test]
    fn test_no_required_signer_is_unattributed() {
        assert_eq!(attribute_wallet(&raw_payload(&["A", "B"], 0)), None);
    }

    #[test]
    fn test_missing_or_empty_keys() {
        assert_eq!(attribute_wallet(&raw_payload(&[], 1)), None);
        assert_eq!(attribute_wallet(&json!({"meta": {}})), None);
        assert_eq!(attribute_wallet(&Value::Null), None);
    }

    #[test]
    fn test_parsed_account_keys() {
        let payload = json!({
            "transaction": {
                "message": {
                    "accountKeys": [
                        {"pubkey": "Payer", "signer": true, "writable": true, "source": "transaction"},
                        {"pubkey": "Other", "signer": false, "writable": true, "source": "transaction"}
                    ]
                }
            }
        });
        assert_eq!(attribute_wallet(&payload), Some("Payer".to_string()));

        let unsigned = json!({
            "transaction": {"message": {"accountKeys": [{"pubkey": "X", "signer": false}]}}
        });
        assert_eq!(attribute_wallet(&unsigned), None);
    }
}
