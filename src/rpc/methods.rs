//! Typed wrappers over the two history methods the collectors need

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use solana_sdk::signature::Signature;

use super::client::RpcClient;
use super::types::RpcError;
use crate::logger::{self, LogTag};

/// One entry of a getSignaturesForAddress page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureInfo {
    pub signature: String,
    pub block_time: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSignatureInfo {
    signature: String,
    #[serde(default)]
    block_time: Option<i64>,
}

impl RpcClient {
    /// Fetch one page of signatures for `address`, newest first
    ///
    /// `before` is exclusive: the page starts with the entry just older than it.
    pub async fn get_signatures_for_address(
        &self,
        address: &str,
        limit: usize,
        before: Option<&str>,
    ) -> Result<Vec<SignatureInfo>, RpcError> {
        let mut options = Map::new();
        options.insert("limit".to_string(), json!(limit));
        if let Some(before) = before {
            options.insert("before".to_string(), json!(before));
        }

        logger::debug(
            LogTag::Rpc,
            &format!(
                "getSignaturesForAddress {} limit={} before={}",
                address,
                limit,
                before.unwrap_or("-")
            ),
        );

        let result = self
            .call("getSignaturesForAddress", json!([address, Value::Object(options)]))
            .await?;

        parse_signature_page(self.pool().current(), result)
    }

    /// Fetch a full transaction body; `Ok(None)` when the node has no record of it
    pub async fn get_transaction(
        &self,
        signature: &str,
        encoding: &str,
    ) -> Result<Option<Value>, RpcError> {
        let params = json!([
            signature,
            {
                "encoding": encoding,
                "maxSupportedTransactionVersion": 0
            }
        ]);

        let result = self.call("getTransaction", params).await?;
        if result.is_null() {
            Ok(None)
        } else {
            Ok(Some(result))
        }
    }
}

/// Parse and validate a getSignaturesForAddress result array
pub fn parse_signature_page(endpoint: &str, result: Value) -> Result<Vec<SignatureInfo>, RpcError> {
    let raw_items: Vec<RawSignatureInfo> = serde_json::from_value(result.clone()).map_err(|e| {
        RpcError::malformed(
            endpoint,
            format!("invalid signature page: {}", e),
            &result.to_string(),
        )
    })?;

    raw_items
        .into_iter()
        .map(|item| {
            Signature::from_str(&item.signature).map_err(|e| {
                RpcError::malformed(
                    endpoint,
                    format!("invalid signature '{}': {}", item.signature, e),
                    "",
                )
            })?;
            Ok(SignatureInfo {
                signature: item.signature,
                block_time: item.block_time,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpc::backoff::BackoffPolicy;
    use crate::rpc::pool::EndpointPool;
    use crate::rpc::transport::mock::ScriptedTransport;
    use std::sync::Arc;

    fn sig(seed: u8) -> String {
        Signature::from([seed; 64]).to_string()
    }

    fn client(transport: Arc<ScriptedTransport>) -> RpcClient {
        RpcClient::new(
            EndpointPool::new(vec!["https://a".to_string()]).unwrap(),
            transport,
            BackoffPolicy::default(),
        )
    }

    #[test]
    fn test_parse_page_with_null_block_time() {
        let page = json!([
            {"signature": sig(1), "slot": 10, "blockTime": 1_700_000_100, "err": null},
            {"signature": sig(2), "slot": 9, "blockTime": null, "err": null},
            {"signature": sig(3), "slot": 8}
        ]);
        let parsed = parse_signature_page("e", page).unwrap();
        assert_eq!(parsed.len(), 3);
        assert_eq!(parsed[0].block_time, Some(1_700_000_100));
        assert_eq!(parsed[1].block_time, None);
        assert_eq!(parsed[2].block_time, None);
    }

    #[test]
    fn test_parse_page_rejects_garbage() {
        assert!(parse_signature_page("e", json!({"not": "an array"})).is_err());
        assert!(parse_signature_page("e", json!([{"signature": "nope"}])).is_err());
    }

    #[tokio::test]
    async fn test_signature_request_shape() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_result(json!([])).push_result(json!([]));
        let client = client(transport.clone());

        client.get_signatures_for_address("Prog", 50, None).await.unwrap();
        client
            .get_signatures_for_address("Prog", 50, Some("cursor"))
            .await
            .unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].method(), "getSignaturesForAddress");
        assert_eq!(requests[0].params()[0], json!("Prog"));
        assert_eq!(requests[0].params()[1], json!({"limit": 50}));
        assert_eq!(requests[1].params()[1], json!({"limit": 50, "before": "cursor"}));
    }

    #[tokio::test]
    async fn test_get_transaction_null_is_none() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_result(Value::Null).push_result(json!({"slot": 1}));
        let client = client(transport.clone());

        assert_eq!(client.get_transaction("s1", "json").await.unwrap(), None);
        assert_eq!(
            client.get_transaction("s2", "jsonParsed").await.unwrap(),
            Some(json!({"slot": 1}))
        );

        let params = transport.requests()[1].params().clone();
        assert_eq!(params[1]["encoding"], json!("jsonParsed"));
        assert_eq!(params[1]["maxSupportedTransactionVersion"], json!(0));
    }
}
