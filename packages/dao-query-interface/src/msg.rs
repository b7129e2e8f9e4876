use std::collections::BTreeMap;

use cosmwasm_std::{Binary, StdError, StdResult};
use cw20::Denom;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::order::RangeOrder;

/// Keys supplied in a query payload beyond the ones the payload
/// defines. They are kept verbatim and written back out when the
/// query is serialized.
pub type Extension = BTreeMap<String, Value>;

/// Payload of queries that take no arguments.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, JsonSchema)]
pub struct EmptyQuery {
    #[serde(flatten)]
    pub extension: Extension,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, JsonSchema)]
pub struct TokenBalancesQuery {
    pub limit: Option<u32>,
    pub order: Option<RangeOrder>,
    /// Denomination to resume listing from.
    pub start: Option<Denom>,
    #[serde(flatten)]
    pub extension: Extension,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, JsonSchema)]
pub struct ProposalQuery {
    pub proposal_id: u64,
    #[serde(flatten)]
    pub extension: Extension,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, JsonSchema)]
pub struct ProposalsQuery {
    pub limit: Option<u32>,
    pub order: Option<RangeOrder>,
    /// Proposal ID to resume listing from.
    pub start: Option<u64>,
    #[serde(flatten)]
    pub extension: Extension,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct VoteQuery {
    pub proposal_id: u64,
    pub voter: String,
    #[serde(flatten)]
    pub extension: Extension,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, JsonSchema)]
pub struct VotesQuery {
    pub proposal_id: u64,
    pub limit: Option<u32>,
    pub order: Option<RangeOrder>,
    /// Voter address to resume listing from.
    pub start: Option<String>,
    #[serde(flatten)]
    pub extension: Extension,
}

/// Queries understood by a DAO. Every payload is open: keys other
/// than the ones listed are accepted and carried in the payload's
/// `extension`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum QueryMsg {
    /// Returns the DAO's config.
    GetConfig(EmptyQuery),
    /// Returns the list of tokens tracked by the DAO treasury.
    TokenList(EmptyQuery),
    /// Returns the treasury's balance of each tracked token.
    TokenBalances(TokenBalancesQuery),
    /// Returns a single proposal.
    Proposal(ProposalQuery),
    /// Lists proposals.
    Proposals(ProposalsQuery),
    /// Returns the number of proposals created so far.
    ProposalCount(EmptyQuery),
    /// Returns the vote cast by `voter` on a proposal, if any.
    Vote(VoteQuery),
    /// Lists the votes cast on a proposal.
    Votes(VotesQuery),
}

macro_rules! payload_fields {
    ($query:ty, [$($field:literal),*]) => {
        impl $query {
            /// Names of the keys this payload defines.
            pub const FIELDS: &'static [&'static str] = &[$($field),*];

            /// Attaches an extra key to the payload. Keys that name
            /// one of the payload's own fields are ignored.
            pub fn with_extension(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
                let key = key.into();
                if !Self::FIELDS.contains(&key.as_str()) {
                    self.extension.insert(key, value.into());
                }
                self
            }
        }
    };
}

payload_fields!(EmptyQuery, []);
payload_fields!(TokenBalancesQuery, ["limit", "order", "start"]);
payload_fields!(ProposalQuery, ["proposal_id"]);
payload_fields!(ProposalsQuery, ["limit", "order", "start"]);
payload_fields!(VoteQuery, ["proposal_id", "voter"]);
payload_fields!(VotesQuery, ["proposal_id", "limit", "order", "start"]);

impl TokenBalancesQuery {
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_order(mut self, order: RangeOrder) -> Self {
        self.order = Some(order);
        self
    }

    pub fn with_start(mut self, start: Denom) -> Self {
        self.start = Some(start);
        self
    }
}

impl ProposalQuery {
    pub fn new(proposal_id: u64) -> Self {
        Self {
            proposal_id,
            extension: Extension::new(),
        }
    }
}

impl ProposalsQuery {
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_order(mut self, order: RangeOrder) -> Self {
        self.order = Some(order);
        self
    }

    pub fn with_start(mut self, start: u64) -> Self {
        self.start = Some(start);
        self
    }
}

impl VoteQuery {
    pub fn new(proposal_id: u64, voter: impl Into<String>) -> Self {
        Self {
            proposal_id,
            voter: voter.into(),
            extension: Extension::new(),
        }
    }
}

impl VotesQuery {
    pub fn new(proposal_id: u64) -> Self {
        Self {
            proposal_id,
            ..Default::default()
        }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_order(mut self, order: RangeOrder) -> Self {
        self.order = Some(order);
        self
    }

    pub fn with_start(mut self, start: impl Into<String>) -> Self {
        self.start = Some(start.into());
        self
    }
}

impl From<TokenBalancesQuery> for QueryMsg {
    fn from(query: TokenBalancesQuery) -> Self {
        QueryMsg::TokenBalances(query)
    }
}

impl From<ProposalQuery> for QueryMsg {
    fn from(query: ProposalQuery) -> Self {
        QueryMsg::Proposal(query)
    }
}

impl From<ProposalsQuery> for QueryMsg {
    fn from(query: ProposalsQuery) -> Self {
        QueryMsg::Proposals(query)
    }
}

impl From<VoteQuery> for QueryMsg {
    fn from(query: VoteQuery) -> Self {
        QueryMsg::Vote(query)
    }
}

impl From<VotesQuery> for QueryMsg {
    fn from(query: VotesQuery) -> Self {
        QueryMsg::Votes(query)
    }
}

impl QueryMsg {
    /// Every variant key, in declaration order.
    pub const TAGS: [&'static str; 8] = [
        "get_config",
        "token_list",
        "token_balances",
        "proposal",
        "proposals",
        "proposal_count",
        "vote",
        "votes",
    ];

    pub fn get_config() -> Self {
        QueryMsg::GetConfig(EmptyQuery::default())
    }

    pub fn token_list() -> Self {
        QueryMsg::TokenList(EmptyQuery::default())
    }

    pub fn token_balances(
        start: Option<Denom>,
        limit: Option<u32>,
        order: Option<RangeOrder>,
    ) -> Self {
        QueryMsg::TokenBalances(TokenBalancesQuery {
            limit,
            order,
            start,
            extension: Extension::new(),
        })
    }

    pub fn proposal(proposal_id: u64) -> Self {
        QueryMsg::Proposal(ProposalQuery::new(proposal_id))
    }

    pub fn proposals(start: Option<u64>, limit: Option<u32>, order: Option<RangeOrder>) -> Self {
        QueryMsg::Proposals(ProposalsQuery {
            limit,
            order,
            start,
            extension: Extension::new(),
        })
    }

    pub fn proposal_count() -> Self {
        QueryMsg::ProposalCount(EmptyQuery::default())
    }

    pub fn vote(proposal_id: u64, voter: impl Into<String>) -> Self {
        QueryMsg::Vote(VoteQuery::new(proposal_id, voter))
    }

    pub fn votes(
        proposal_id: u64,
        start: Option<String>,
        limit: Option<u32>,
        order: Option<RangeOrder>,
    ) -> Self {
        QueryMsg::Votes(VotesQuery {
            proposal_id,
            limit,
            order,
            start,
            extension: Extension::new(),
        })
    }

    /// The key this query is serialized under.
    pub fn tag(&self) -> &'static str {
        match self {
            QueryMsg::GetConfig(_) => "get_config",
            QueryMsg::TokenList(_) => "token_list",
            QueryMsg::TokenBalances(_) => "token_balances",
            QueryMsg::Proposal(_) => "proposal",
            QueryMsg::Proposals(_) => "proposals",
            QueryMsg::ProposalCount(_) => "proposal_count",
            QueryMsg::Vote(_) => "vote",
            QueryMsg::Votes(_) => "votes",
        }
    }

    pub fn extension(&self) -> &Extension {
        match self {
            QueryMsg::GetConfig(q) | QueryMsg::TokenList(q) | QueryMsg::ProposalCount(q) => {
                &q.extension
            }
            QueryMsg::TokenBalances(q) => &q.extension,
            QueryMsg::Proposal(q) => &q.extension,
            QueryMsg::Proposals(q) => &q.extension,
            QueryMsg::Vote(q) => &q.extension,
            QueryMsg::Votes(q) => &q.extension,
        }
    }

    /// The proposal this query is about, for the queries that target
    /// a single proposal.
    pub fn proposal_id(&self) -> Option<u64> {
        match self {
            QueryMsg::Proposal(q) => Some(q.proposal_id),
            QueryMsg::Vote(q) => Some(q.proposal_id),
            QueryMsg::Votes(q) => Some(q.proposal_id),
            _ => None,
        }
    }

    /// The requested page size of a listing query.
    pub fn limit(&self) -> Option<u32> {
        match self {
            QueryMsg::TokenBalances(q) => q.limit,
            QueryMsg::Proposals(q) => q.limit,
            QueryMsg::Votes(q) => q.limit,
            _ => None,
        }
    }

    /// Encodes the query in its wire form.
    pub fn to_json_binary(&self) -> StdResult<Binary> {
        serde_json::to_vec(self)
            .map(Binary::from)
            .map_err(|err| StdError::serialize_err("QueryMsg", err))
    }
}
