use std::{fmt, str::FromStr};

use cosmwasm_std::Order;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::QueryError;

/// The direction a paginated listing is walked in.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RangeOrder {
    /// Smallest key first. Used when a query leaves `order` unset.
    #[default]
    Asc,
    /// Largest key first.
    Desc,
}

impl RangeOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            RangeOrder::Asc => "asc",
            RangeOrder::Desc => "desc",
        }
    }
}

impl From<RangeOrder> for Order {
    fn from(order: RangeOrder) -> Self {
        match order {
            RangeOrder::Asc => Order::Ascending,
            RangeOrder::Desc => Order::Descending,
        }
    }
}

impl fmt::Display for RangeOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RangeOrder {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(RangeOrder::Asc),
            "desc" => Ok(RangeOrder::Desc),
            other => Err(QueryError::InvalidOrder {
                order: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_encoding() {
        let json = serde_json::to_string(&RangeOrder::Asc).unwrap();
        assert_eq!(json, r#""asc""#);
        let json = serde_json::to_string(&RangeOrder::Desc).unwrap();
        assert_eq!(json, r#""desc""#);

        let order: RangeOrder = serde_json::from_str(r#""desc""#).unwrap();
        assert_eq!(order, RangeOrder::Desc);

        serde_json::from_str::<RangeOrder>(r#""ascending""#).unwrap_err();
        serde_json::from_str::<RangeOrder>(r#""ASC""#).unwrap_err();
    }

    #[test]
    fn test_order_from_str() {
        assert_eq!("asc".parse::<RangeOrder>().unwrap(), RangeOrder::Asc);
        assert_eq!("desc".parse::<RangeOrder>().unwrap(), RangeOrder::Desc);

        let err = "descending".parse::<RangeOrder>().unwrap_err();
        assert_eq!(
            err,
            QueryError::InvalidOrder {
                order: "descending".to_string()
            }
        );
        assert_eq!(RangeOrder::Desc.to_string(), "desc");
    }

    #[test]
    fn test_into_storage_order() {
        // `Order` has no `Debug` impl, so compare directly.
        assert!(Order::from(RangeOrder::Asc) == Order::Ascending);
        assert!(Order::from(RangeOrder::default()) == Order::Ascending);
        assert!(Order::from(RangeOrder::Desc) == Order::Descending);
    }
}
