use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Order, StdResult, Storage};
use cw20::Denom;
use cw_storage_plus::{Bound, Bounder, KeyDeserialize, Map};

use crate::{
    error::QueryError,
    msg::{ProposalsQuery, TokenBalancesQuery, VotesQuery},
    order::RangeOrder,
};

/// Page size used when a listing query does not set `limit`.
pub const DEFAULT_LIMIT: u32 = 10;
/// Largest page size a listing query may ask for.
pub const MAX_LIMIT: u32 = 30;

/// Page size bounds applied to listing queries.
#[cw_serde]
#[derive(Copy)]
#[serde(default)]
pub struct PageLimits {
    pub default_limit: u32,
    pub max_limit: u32,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
            max_limit: MAX_LIMIT,
        }
    }
}

impl PageLimits {
    pub fn validate(&self) -> Result<(), QueryError> {
        if self.default_limit == 0 || self.default_limit > self.max_limit {
            Err(QueryError::InvalidPageLimits {
                default_limit: self.default_limit,
                max_limit: self.max_limit,
            })
        } else {
            Ok(())
        }
    }

    /// Returns the page size to use for a requested `limit`. Requests
    /// above `max_limit` are errors rather than being clamped.
    pub fn check(&self, limit: Option<u32>) -> Result<u32, QueryError> {
        match limit {
            Some(limit) if limit > self.max_limit => Err(QueryError::OversizedRequest {
                size: limit as u64,
                max: self.max_limit as u64,
            }),
            Some(limit) => Ok(limit),
            None => Ok(self.default_limit),
        }
    }

    /// Resolves the pagination arguments of a listing query.
    pub fn page<'q, Q: Paginated>(&self, query: &'q Q) -> Result<Page<'q, Q::Cursor>, QueryError> {
        Ok(Page {
            limit: self.check(query.limit())?,
            order: query.order().unwrap_or_default(),
            start: query.start(),
        })
    }
}

/// A listing query's pagination arguments.
pub trait Paginated {
    /// The key type listing resumes from.
    type Cursor;

    fn limit(&self) -> Option<u32>;
    fn order(&self) -> Option<RangeOrder>;
    fn start(&self) -> Option<&Self::Cursor>;
}

impl Paginated for TokenBalancesQuery {
    type Cursor = Denom;

    fn limit(&self) -> Option<u32> {
        self.limit
    }

    fn order(&self) -> Option<RangeOrder> {
        self.order
    }

    fn start(&self) -> Option<&Denom> {
        self.start.as_ref()
    }
}

impl Paginated for ProposalsQuery {
    type Cursor = u64;

    fn limit(&self) -> Option<u32> {
        self.limit
    }

    fn order(&self) -> Option<RangeOrder> {
        self.order
    }

    fn start(&self) -> Option<&u64> {
        self.start.as_ref()
    }
}

impl Paginated for VotesQuery {
    type Cursor = String;

    fn limit(&self) -> Option<u32> {
        self.limit
    }

    fn order(&self) -> Option<RangeOrder> {
        self.order
    }

    fn start(&self) -> Option<&String> {
        self.start.as_ref()
    }
}

/// Pagination arguments with defaults and bounds applied.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Page<'q, C> {
    pub limit: u32,
    pub order: RangeOrder,
    pub start: Option<&'q C>,
}

impl<'q, C> Page<'q, C> {
    /// The order to walk storage in.
    pub fn storage_order(&self) -> Order {
        self.order.into()
    }
}

/// Range bounds for resuming a listing after `start`. The cursor
/// itself is never included in the results, whichever direction the
/// listing walks in.
pub fn bounds<'a, K>(start: Option<K>, order: Order) -> (Option<Bound<'a, K>>, Option<Bound<'a, K>>)
where
    K: Bounder<'a>,
{
    match order {
        Order::Ascending => (start.map(Bound::exclusive), None),
        Order::Descending => (None, start.map(Bound::exclusive)),
    }
}

/// Lists at most `limit` (K, V) pairs of a map, starting after
/// `start` in the given order.
pub fn paginate_map<'a, 'b, K, V, R: 'static>(
    storage: &dyn Storage,
    map: &Map<'a, K, V>,
    start: Option<K>,
    limit: u32,
    order: Order,
) -> StdResult<Vec<(R, V)>>
where
    K: Bounder<'a> + KeyDeserialize<Output = R> + 'b,
    V: serde::de::DeserializeOwned + serde::Serialize,
{
    let (min, max) = bounds(start, order);
    map.range(storage, min, max, order)
        .take(limit as usize)
        .collect()
}

/// Same as `paginate_map` but only returns the keys.
pub fn paginate_map_keys<'a, 'b, K, V, R: 'static>(
    storage: &dyn Storage,
    map: &Map<'a, K, V>,
    start: Option<K>,
    limit: u32,
    order: Order,
) -> StdResult<Vec<R>>
where
    K: Bounder<'a> + KeyDeserialize<Output = R> + 'b,
    V: serde::de::DeserializeOwned + serde::Serialize,
{
    let (min, max) = bounds(start, order);
    map.keys(storage, min, max, order)
        .take(limit as usize)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use assert_matches::assert_matches;
    use cosmwasm_std::testing::mock_dependencies;

    const PROPOSALS: Map<u64, String> = Map::new("proposals");

    fn setup_proposals(storage: &mut dyn Storage) {
        for id in 1..=5u64 {
            PROPOSALS
                .save(storage, id, &format!("proposal {id}"))
                .unwrap();
        }
    }

    #[test]
    fn test_check_limit() {
        let limits = PageLimits::default();
        assert_eq!(limits.check(None).unwrap(), DEFAULT_LIMIT);
        assert_eq!(limits.check(Some(0)).unwrap(), 0);
        assert_eq!(limits.check(Some(MAX_LIMIT)).unwrap(), MAX_LIMIT);

        let err = limits.check(Some(MAX_LIMIT + 1)).unwrap_err();
        assert_eq!(
            err,
            QueryError::OversizedRequest {
                size: 31,
                max: 30
            }
        );
        assert_eq!(err.to_string(), "Request size (31) is above limit of (30)");
    }

    #[test]
    fn test_validate_limits() {
        PageLimits::default().validate().unwrap();
        PageLimits {
            default_limit: 5,
            max_limit: 5,
        }
        .validate()
        .unwrap();

        let err = PageLimits {
            default_limit: 0,
            max_limit: 5,
        }
        .validate()
        .unwrap_err();
        assert_matches!(err, QueryError::InvalidPageLimits { .. });

        let err = PageLimits {
            default_limit: 10,
            max_limit: 5,
        }
        .validate()
        .unwrap_err();
        assert_eq!(
            err,
            QueryError::InvalidPageLimits {
                default_limit: 10,
                max_limit: 5
            }
        );
    }

    #[test]
    fn test_page_defaults() {
        let limits = PageLimits::default();
        let query = ProposalsQuery::default();
        let page = limits.page(&query).unwrap();
        assert_eq!(
            page,
            Page {
                limit: DEFAULT_LIMIT,
                order: RangeOrder::Asc,
                start: None,
            }
        );

        let query = VotesQuery::new(1)
            .with_limit(3)
            .with_order(RangeOrder::Desc)
            .with_start("addr2");
        let page = limits.page(&query).unwrap();
        assert_eq!(page.limit, 3);
        assert_eq!(page.order, RangeOrder::Desc);
        assert!(page.storage_order() == Order::Descending);
        assert_eq!(page.start.map(String::as_str), Some("addr2"));

        let query = TokenBalancesQuery::default()
            .with_start(Denom::Native("ujuno".to_string()))
            .with_limit(100);
        let err = limits.page(&query).unwrap_err();
        assert_matches!(err, QueryError::OversizedRequest { size: 100, max: 30 });
    }

    #[test]
    fn test_paginate_ascending() {
        let mut deps = mock_dependencies();
        setup_proposals(deps.as_mut().storage);

        let query = ProposalsQuery::default().with_start(2).with_limit(2);
        let page = PageLimits::default().page(&query).unwrap();
        let res = paginate_map(
            deps.as_ref().storage,
            &PROPOSALS,
            page.start.copied(),
            page.limit,
            page.storage_order(),
        )
        .unwrap();
        assert_eq!(
            res,
            vec![
                (3, "proposal 3".to_string()),
                (4, "proposal 4".to_string())
            ]
        );

        // No start lists from the beginning.
        let res =
            paginate_map_keys(deps.as_ref().storage, &PROPOSALS, None, 10, Order::Ascending)
                .unwrap();
        assert_eq!(res, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_paginate_descending() {
        let mut deps = mock_dependencies();
        setup_proposals(deps.as_mut().storage);

        let query = ProposalsQuery::default()
            .with_start(4)
            .with_order(RangeOrder::Desc);
        let page = PageLimits::default().page(&query).unwrap();
        let res = paginate_map_keys(
            deps.as_ref().storage,
            &PROPOSALS,
            page.start.copied(),
            page.limit,
            page.storage_order(),
        )
        .unwrap();
        assert_eq!(res, vec![3, 2, 1]);

        let res =
            paginate_map_keys(deps.as_ref().storage, &PROPOSALS, None, 2, Order::Descending)
                .unwrap();
        assert_eq!(res, vec![5, 4]);
    }

    #[test]
    fn test_paginate_string_cursor() {
        let mut deps = mock_dependencies();
        let votes: Map<String, String> = Map::new("votes");
        for voter in ["addr1", "addr2", "addr3"] {
            votes
                .save(deps.as_mut().storage, voter.to_string(), &"yes".to_string())
                .unwrap();
        }

        let query = VotesQuery::new(1).with_start("addr1");
        let page = PageLimits::default().page(&query).unwrap();
        let res = paginate_map_keys(
            deps.as_ref().storage,
            &votes,
            page.start.cloned(),
            page.limit,
            page.storage_order(),
        )
        .unwrap();
        assert_eq!(res, vec!["addr2".to_string(), "addr3".to_string()]);

        // A cursor past the end yields an empty page.
        let res = paginate_map(
            deps.as_ref().storage,
            &votes,
            Some("addr3".to_string()),
            10,
            Order::Ascending,
        )
        .unwrap();
        assert!(res.is_empty());
    }
}
