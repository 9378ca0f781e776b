//! Stablecoin balance delta of the attributed wallet within one transaction

use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value;

/// Result of a delta computation; never an error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeltaOutcome {
    /// Net change in base units (post minus pre)
    Computed(i128),
    /// The payload carries no `meta`
    NoMeta,
    /// Token balance records could not be read
    Malformed(String),
}

impl DeltaOutcome {
    /// Contribution to the running PnL; zero unless computed
    pub fn value(&self) -> i128 {
        match self {
            DeltaOutcome::Computed(delta) => *delta,
            _ => 0,
        }
    }
}

/// Sum `post - pre` over `mint` token accounts owned by `wallet`
///
/// Pre and post entries are paired by `accountIndex`; a side without an
/// entry (account opened or closed in the transaction) counts as zero.
pub fn token_delta(payload: &Value, wallet: &str, mint: &str) -> DeltaOutcome {
    let meta = match payload.get("meta") {
        Some(meta) if !meta.is_null() => meta,
        _ => return DeltaOutcome::NoMeta,
    };

    let pre = match owned_balances(meta, "preTokenBalances", wallet, mint) {
        Ok(balances) => balances,
        Err(reason) => return DeltaOutcome::Malformed(reason),
    };
    let post = match owned_balances(meta, "postTokenBalances", wallet, mint) {
        Ok(balances) => balances,
        Err(reason) => return DeltaOutcome::Malformed(reason),
    };

    let indices: BTreeSet<&u64> = pre.keys().chain(post.keys()).collect();
    let mut delta: i128 = 0;
    for index in indices {
        let before = pre.get(index).copied().unwrap_or(0);
        let after = post.get(index).copied().unwrap_or(0);
        delta += after - before;
    }

    DeltaOutcome::Computed(delta)
}

/// accountIndex -> amount for entries matching owner and mint
fn owned_balances(
    meta: &Value,
    field: &str,
    wallet: &str,
    mint: &str,
) -> Result<BTreeMap<u64, i128>, String> {
    let entries = match meta.get(field) {
        None | Some(Value::Null) => return Ok(BTreeMap::new()),
        Some(Value::Array(entries)) => entries,
        Some(_) => return Err(format!("{} is not an array", field)),
    };

    let mut balances = BTreeMap::new();
    for entry in entries {
        if entry.get("mint").and_then(Value::as_str) != Some(mint)
            || entry.get("owner").and_then(Value::as_str) != Some(wallet)
        {
            continue;
        }

        let index = entry
            .get("accountIndex")
            .and_then(Value::as_u64)
            .ok_or_else(|| format!("{} entry without accountIndex", field))?;
        let raw_amount = entry
            .get("uiTokenAmount")
            .and_then(|a| a.get("amount"))
            .and_then(Value::as_str)
            .ok_or_else(|| format!("{} entry {} without uiTokenAmount.amount", field, index))?;
        let amount = raw_amount
            .parse::<i128>()
            .map_err(|e| format!("{} entry {} amount '{}': {}", field, index, raw_amount, e))?;

        *balances.entry(index).or_insert(0) += amount;
    }

    Ok(balances)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const WALLET: &str = "Wallet1";
    const MINT: &str = "StableMint";

    fn balance(index: u64, mint: &str, owner: &str, amount: &str) -> Value {
        json!({
            "accountIndex": index,
            "mint": mint,
            "owner": owner,
            "programId": "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA",
            "uiTokenAmount": {"amount": amount, "decimals": 6, "uiAmountString": "0"}
        })
    }

    fn payload(pre: Vec<Value>, post: Vec<Value>) -> Value {
        json!({"meta": {"err": null, "preTokenBalances": pre, "postTokenBalances": post}})
    }

    #[test]
    fn test_owned_mint_delta() {
        let tx = payload(
            vec![balance(3, MINT, WALLET, "1000000")],
            vec![balance(3, MINT, WALLET, "1500000")],
        );
        assert_eq!(token_delta(&tx, WALLET, MINT), DeltaOutcome::Computed(500_000));
    }

    #[test]
    fn test_other_owner_or_mint_is_zero() {
        let other_owner = payload(
            vec![balance(3, MINT, "Someone", "1000000")],
            vec![balance(3, MINT, "Someone", "1500000")],
        );
        assert_eq!(token_delta(&other_owner, WALLET, MINT), DeltaOutcome::Computed(0));

        let other_mint = payload(
            vec![balance(3, "OtherMint", WALLET, "1000000")],
            vec![balance(3, "OtherMint", WALLET, "1500000")],
        );
        assert_eq!(token_delta(&other_mint, WALLET, MINT), DeltaOutcome::Computed(0));
    }

    #[test]
    fn test_missing_side_counts_as_zero() {
        let closed = payload(vec![balance(2, MINT, WALLET, "700")], vec![]);
        assert_eq!(token_delta(&closed, WALLET, MINT), DeltaOutcome::Computed(-700));

        let opened = payload(vec![], vec![balance(5, MINT, WALLET, "42")]);
        assert_eq!(token_delta(&opened, WALLET, MINT), DeltaOutcome::Computed(42));
    }

    #[test]
    fn test_multiple_accounts_are_summed() {
        let tx = payload(
            vec![balance(1, MINT, WALLET, "100"), balance(4, MINT, WALLET, "50")],
            vec![balance(1, MINT, WALLET, "40"), balance(4, MINT, WALLET, "90")],
        );
        assert_eq!(token_delta(&tx, WALLET, MINT), DeltaOutcome::Computed(-20));
    }

    #[test]
    fn test_no_meta_and_malformed() {
        assert_eq!(token_delta(&json!({"slot": 1}), WALLET, MINT), DeltaOutcome::NoMeta);
        assert_eq!(token_delta(&json!({"meta": null}), WALLET, MINT), DeltaOutcome::NoMeta);

        let bad_amount = payload(vec![balance(1, MINT, WALLET, "12abc")], vec![]);
        let outcome = token_delta(&bad_amount, WALLET, MINT);
        assert!(matches!(outcome, DeltaOutcome::Malformed(_)));
        assert_eq!(outcome.value(), 0);

        let not_array = json!({"meta": {"preTokenBalances": {}, "postTokenBalances": []}});
        assert!(matches!(token_delta(&not_array, WALLET, MINT), DeltaOutcome::Malformed(_)));
    }
}
